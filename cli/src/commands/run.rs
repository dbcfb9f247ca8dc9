use std::fs::File;
use std::io::{self, Write};

use clap::ArgMatches;
use serde_json;
use tally::{Engine, TextSource};
use tally_jobs::Job;

use common::{discover_inputs, load_config};
use errors::*;

fn write_output(path: Option<&str>, output: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)
                .chain_err(|| format!("Error creating output file {}", path))?;
            file.write_all(output)
                .chain_err(|| format!("Error writing output file {}", path))?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(output).chain_err(|| "Error writing output.")?;
            handle.flush().chain_err(|| "Error writing output.")?;
        }
    }
    Ok(())
}

pub fn run(config_path: Option<&str>, matches: &ArgMatches) -> Result<()> {
    let job: Job = matches
        .value_of("job")
        .chain_err(|| "Job name must be specified")?
        .parse()?;
    let config = load_config(config_path, matches)?;

    let source = match matches.values_of("input") {
        Some(values) => {
            let inputs: Vec<&str> = values.collect();
            TextSource::Files(discover_inputs(&inputs)?)
        }
        None => TextSource::Stdin,
    };

    let engine = Engine::new(config)?;

    // Output is buffered so a failed run leaves nothing behind.
    let mut output: Vec<u8> = Vec::new();
    let stats = job.run(&engine, source, &mut output)
        .chain_err(|| format!("Error running job {}", job))?;
    write_output(matches.value_of("output"), &output)?;

    if matches.is_present("stats") {
        eprintln!("{}", serde_json::to_string_pretty(&stats)?);
    }

    info!("Job {} finished", job);
    Ok(())
}
