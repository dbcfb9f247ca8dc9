use std::path::Path;

use clap::ArgMatches;
use tally::EngineConfig;

use errors::*;

/// Builds the engine configuration for a `run`.
///
/// Starts from `config_path` when given, or the defaults otherwise, then applies the
/// `--partitions` and `--no-combine` overrides.
pub fn load_config(config_path: Option<&str>, matches: &ArgMatches) -> Result<EngineConfig> {
    let mut config = match config_path {
        Some(path) => EngineConfig::from_file(Path::new(path))
            .chain_err(|| format!("Error loading configuration from {}", path))?,
        None => EngineConfig::default(),
    };

    if let Some(partitions) = matches.value_of("partitions") {
        config.partition_count = partitions
            .parse::<usize>()
            .chain_err(|| format!("Invalid partition count '{}'", partitions))?;
    }
    if matches.is_present("no-combine") {
        config.use_combiners = false;
    }

    config.validate()?;
    debug!("Using engine configuration {:?}", config);
    Ok(config)
}
