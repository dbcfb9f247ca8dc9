use std::io::Write;

use tally_jobs::Job;

use errors::*;

/// Writes the name of every available job to `sink`, one per line.
pub fn jobs<W: Write>(sink: &mut W) -> Result<()> {
    for name in Job::names() {
        writeln!(sink, "{}", name).chain_err(|| "Error writing job list.")?;
    }
    Ok(())
}
