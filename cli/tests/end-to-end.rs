/// This is a set of tests which is ran against the `tally` binary. Input is given through
/// standard input or temporary files and the written output is checked.
extern crate tempfile;

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

const CLI_BIN_NAME: &str = "tally";

fn get_bin_path() -> PathBuf {
    let mut path = env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push(CLI_BIN_NAME);
    path
}

fn tally(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(get_bin_path())
        .args(args)
        .env("RUST_LOG", "error")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The binary may exit before reading its input, so a closed pipe is not a failure here.
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().unwrap()
}

#[test]
fn jobs_lists_names() {
    let output = tally(&["jobs"], "");
    let output_str = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert_eq!(
        output_str,
        "word_count\nbigram_count\nchar_frequency\naverage_word_length\nmost_frequent_word\n"
    );
}

#[test]
fn word_count_from_stdin() {
    let output = tally(
        &["run", "--job", "word_count", "--partitions", "2"],
        "the Cat sat\non the mat\n",
    );
    let output_str = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert_eq!(
        output_str,
        "\"cat\"\t1\n\"mat\"\t1\n\"on\"\t1\n\"sat\"\t1\n\"the\"\t2\n"
    );
}

#[test]
fn most_frequent_word_with_combiners_disabled() {
    let output = tally(
        &["run", "--job", "most_frequent_word", "--no-combine"],
        "a a b\n",
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "2\t\"a\"\n");
}

#[test]
fn directory_input_written_to_file() {
    let dir = tempdir().unwrap();
    let input_dir = dir.path().join("input");
    fs::create_dir(&input_dir).unwrap();
    File::create(input_dir.join("b.txt"))
        .unwrap()
        .write_all(b"b c\n")
        .unwrap();
    File::create(input_dir.join("a.txt"))
        .unwrap()
        .write_all(b"a b\n")
        .unwrap();
    let output_path = dir.path().join("bigrams.out");

    let output = tally(
        &[
            "run",
            "--job",
            "bigram_count",
            "--input",
            input_dir.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ],
        "",
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        "\"a b\"\t1\n\"b c\"\t1\n"
    );
}

#[test]
fn stats_printed_to_stderr() {
    let output = tally(&["run", "--job", "char_frequency", "--stats"], "AA!!bb");
    let stderr = String::from_utf8(output.stderr).unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "\"a\"\t2\n\"b\"\t2\n"
    );
    assert!(stderr.contains("\"stage_index\": 0"));
    assert!(stderr.contains("\"output_pairs\": 2"));
}

#[test]
fn unknown_job_fails() {
    let output = tally(&["run", "--job", "line_count"], "a\n");
    let stderr = String::from_utf8(output.stderr).unwrap();

    assert_eq!(Some(1), output.status.code());
    assert!(output.stdout.is_empty());
    assert!(stderr.contains("unknown job 'line_count'"));
    assert!(stderr.contains("word_count"));
}

#[test]
fn missing_input_fails() {
    let output = tally(
        &["run", "--job", "word_count", "--input", "/nonexistent/tally/input.txt"],
        "",
    );
    let stderr = String::from_utf8(output.stderr).unwrap();

    assert_eq!(Some(1), output.status.code());
    assert!(stderr.contains("input source unavailable"));
}
