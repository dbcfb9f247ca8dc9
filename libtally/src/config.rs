use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::thread;

use serde_json;

use errors::*;

/// Number of threads the machine can run at once, or 1 when it cannot be determined.
pub fn available_parallelism() -> usize {
    thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(1)
}

fn default_partition_count() -> usize {
    available_parallelism()
}

fn default_use_combiners() -> bool {
    true
}

/// `EngineConfig` holds the settings an `Engine` runs pipelines with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of input chunks mapped independently, and the size of the worker pool.
    #[serde(default = "default_partition_count")]
    pub partition_count: usize,
    /// Whether stage combiners are applied. Disabling them must not change any output.
    #[serde(default = "default_use_combiners")]
    pub use_combiners: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            partition_count: default_partition_count(),
            use_combiners: default_use_combiners(),
        }
    }
}

impl EngineConfig {
    pub fn with_partitions(partition_count: usize) -> Self {
        EngineConfig {
            partition_count,
            ..Default::default()
        }
    }

    /// Loads a config from a JSON file. Missing fields take their default values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .chain_err(|| format!("Unable to open config file {}", path.display()))?;
        let config: EngineConfig = serde_json::from_reader(BufReader::new(file))
            .chain_err(|| format!("Unable to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.partition_count == 0 {
            return Err(
                ErrorKind::InvalidConfig("partition_count must be at least 1".to_owned()).into(),
            );
        }
        Ok(())
    }
}
