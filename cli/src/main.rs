#[macro_use]
extern crate clap;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate serde_json;
extern crate tally;
extern crate tally_jobs;
#[cfg(test)]
extern crate tempfile;
extern crate util;

use std::io;

use errors::*;

mod errors {
    error_chain!{
        links {
            Engine(::tally::Error, ::tally::ErrorKind);
            Jobs(::tally_jobs::errors::Error, ::tally_jobs::errors::ErrorKind);
        }

        foreign_links {
            Clap(::clap::Error);
            Io(::std::io::Error);
            Json(::serde_json::Error);
        }
    }
}

mod commands;
mod common;
mod parser;

fn main() {
    let matches = parser::parse_command_line();

    if let Err(err) = util::init_logger() {
        eprintln!("Failed to initialise logging: {}", err);
    }

    if let Err(ref e) = run(&matches) {
        util::output_error(e);
        ::std::process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        ("jobs", Some(_)) => commands::jobs(&mut io::stdout()),
        ("run", Some(sub)) => commands::run(matches.value_of("config"), sub),
        _ => Err(matches.usage().into()),
    }
}
