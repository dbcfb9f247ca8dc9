use rayon::{ThreadPool, ThreadPoolBuilder};

use config::{self, EngineConfig};
use errors::*;
use executor::{StageExecutor, StageStats};
use io::RecordSource;
use pipeline::Pipeline;

/// `Engine` runs pipelines on a worker pool sized from its `EngineConfig`.
///
/// An engine can be reused for any number of runs; nothing is carried over between them.
pub struct Engine {
    config: EngineConfig,
    pool: ThreadPool,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        // Partitions are logical chunks; the pool never outgrows the machine.
        let threads = config.partition_count.min(config::available_parallelism());
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("tally-worker-{}", index))
            .build()
            .chain_err(|| "Failed to build worker pool")?;

        debug!(
            "Engine created: partition_count={} threads={} use_combiners={}",
            config.partition_count,
            threads,
            config.use_combiners
        );
        Ok(Engine { config, pool })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs `pipeline` over `source` and returns its final output pairs.
    pub fn run<I, K, V, S>(&self, pipeline: &Pipeline<I, K, V>, source: S) -> Result<Vec<(K, V)>>
    where
        I: Send + 'static,
        K: 'static,
        V: 'static,
        S: RecordSource<Record = I>,
    {
        let (output, _) = self.run_with_stats(pipeline, source)?;
        Ok(output)
    }

    /// Like `run`, but also returns the counters of every stage.
    pub fn run_with_stats<I, K, V, S>(
        &self,
        pipeline: &Pipeline<I, K, V>,
        source: S,
    ) -> Result<(Vec<(K, V)>, Vec<StageStats>)>
    where
        I: Send + 'static,
        K: 'static,
        V: 'static,
        S: RecordSource<Record = I>,
    {
        let executor = StageExecutor::new(&self.config, &self.pool);
        pipeline.execute(&executor, source)
    }
}

/// `run` is the single entry point for running a pipeline once.
///
/// # Arguments
///
/// * `pipeline` - The stages to run, in order.
/// * `source` - Where the first stage reads its records from.
/// * `config` - Partitioning and combiner settings.
pub fn run<I, K, V, S>(
    pipeline: &Pipeline<I, K, V>,
    source: S,
    config: &EngineConfig,
) -> Result<Vec<(K, V)>>
where
    I: Send + 'static,
    K: 'static,
    V: 'static,
    S: RecordSource<Record = I>,
{
    Engine::new(config.clone())?.run(pipeline, source)
}

/// `run_with_stats` is `run`, also returning the counters of every stage.
pub fn run_with_stats<I, K, V, S>(
    pipeline: &Pipeline<I, K, V>,
    source: S,
    config: &EngineConfig,
) -> Result<(Vec<(K, V)>, Vec<StageStats>)>
where
    I: Send + 'static,
    K: 'static,
    V: 'static,
    S: RecordSource<Record = I>,
{
    Engine::new(config.clone())?.run_with_stats(pipeline, source)
}
