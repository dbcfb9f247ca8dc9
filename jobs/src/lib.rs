#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
#[cfg(test)]
extern crate proptest;
extern crate serde;
extern crate tally;

pub mod errors {
    error_chain! {
        links {
            Engine(::tally::Error, ::tally::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }

        errors {
            UnknownJob(name: String, valid: String) {
                description("unknown job")
                display("unknown job '{}', expected one of: {}", name, valid)
            }
        }
    }
}

pub mod average_word_length;
pub mod bigram_count;
pub mod char_frequency;
pub mod most_frequent_word;
mod sum;
pub mod word_count;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::Serialize;
use tally::{write_output, Engine, LineRecord, Pipeline, RecordSource, StageStats};

use errors::*;

/// `Job` names one of the analytics jobs that can be run over line-oriented text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Job {
    WordCount,
    BigramCount,
    CharFrequency,
    AverageWordLength,
    MostFrequentWord,
}

const ALL_JOBS: [Job; 5] = [
    Job::WordCount,
    Job::BigramCount,
    Job::CharFrequency,
    Job::AverageWordLength,
    Job::MostFrequentWord,
];

impl Job {
    pub fn all() -> &'static [Job] {
        &ALL_JOBS
    }

    pub fn names() -> Vec<&'static str> {
        ALL_JOBS.iter().map(Job::name).collect()
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Job::WordCount => "word_count",
            Job::BigramCount => "bigram_count",
            Job::CharFrequency => "char_frequency",
            Job::AverageWordLength => "average_word_length",
            Job::MostFrequentWord => "most_frequent_word",
        }
    }

    /// Runs the job over `source` and writes its output pairs to `sink`, one line each.
    ///
    /// Nothing is written unless the whole run succeeds. Returns the counters of every stage.
    pub fn run<S, W>(&self, engine: &Engine, source: S, sink: &mut W) -> Result<Vec<StageStats>>
    where
        S: RecordSource<Record = LineRecord>,
        W: Write,
    {
        info!("Running job {}", self);
        match *self {
            Job::WordCount => run_pipeline(engine, &word_count::pipeline()?, source, sink),
            Job::BigramCount => run_pipeline(engine, &bigram_count::pipeline()?, source, sink),
            Job::CharFrequency => run_pipeline(engine, &char_frequency::pipeline()?, source, sink),
            Job::AverageWordLength => {
                run_pipeline(engine, &average_word_length::pipeline()?, source, sink)
            }
            Job::MostFrequentWord => {
                run_pipeline(engine, &most_frequent_word::pipeline()?, source, sink)
            }
        }
    }
}

fn run_pipeline<K, V, S, W>(
    engine: &Engine,
    pipeline: &Pipeline<LineRecord, K, V>,
    source: S,
    sink: &mut W,
) -> Result<Vec<StageStats>>
where
    K: Serialize + 'static,
    V: Serialize + 'static,
    S: RecordSource<Record = LineRecord>,
    W: Write,
{
    let (output, stats) = engine.run_with_stats(pipeline, source)?;
    debug!("Writing {} output pairs", output.len());
    write_output(sink, &output)?;
    Ok(stats)
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Job {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        ALL_JOBS
            .iter()
            .cloned()
            .find(|job| job.name() == name)
            .ok_or_else(|| ErrorKind::UnknownJob(name.to_owned(), Job::names().join(", ")).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally::{EngineConfig, TextSource};

    fn run_job(job: Job, text: &str) -> String {
        let engine = Engine::new(EngineConfig::with_partitions(2)).unwrap();
        let mut sink: Vec<u8> = Vec::new();
        job.run(&engine, TextSource::from_text(text), &mut sink).unwrap();
        String::from_utf8(sink).unwrap()
    }

    #[test]
    fn names_parse_back_to_jobs() {
        for job in Job::all() {
            assert_eq!(*job, job.name().parse::<Job>().unwrap());
        }
        assert_eq!(5, Job::names().len());
    }

    #[test]
    fn unknown_job_lists_valid_names() {
        let err = "line_count".parse::<Job>().unwrap_err();

        match *err.kind() {
            ErrorKind::UnknownJob(ref name, ref valid) => {
                assert_eq!("line_count", name);
                assert!(valid.contains("most_frequent_word"));
            }
            ref other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn word_count_writes_json_lines() {
        assert_eq!(
            "\"cat\"\t1\n\"mat\"\t1\n\"on\"\t1\n\"sat\"\t1\n\"the\"\t2\n",
            run_job(Job::WordCount, "the Cat sat on the mat")
        );
    }

    #[test]
    fn most_frequent_word_writes_count_then_word() {
        assert_eq!("2\t\"a\"\n", run_job(Job::MostFrequentWord, "a a b"));
    }

    #[test]
    fn average_word_length_writes_float() {
        assert_eq!(
            "\"average_word_length\"\t2.5\n",
            run_job(Job::AverageWordLength, "ab abc")
        );
    }

    #[test]
    fn engine_errors_are_linked() {
        let engine = Engine::new(EngineConfig::with_partitions(1)).unwrap();
        let mut sink: Vec<u8> = Vec::new();
        let source = TextSource::Files(vec!["/nonexistent/tally/input.txt".into()]);

        let err = Job::CharFrequency.run(&engine, source, &mut sink).unwrap_err();

        match *err.kind() {
            ErrorKind::Engine(::tally::ErrorKind::SourceUnavailable(_)) => {}
            ref other => panic!("unexpected error: {:?}", other),
        }
        assert!(sink.is_empty());
    }
}
