use std::fmt;

use rayon::prelude::*;
use rayon::ThreadPool;

use combiner::Combine;
use config::EngineConfig;
use emitter::IntermediateVecEmitter;
use errors::*;
use intermediate::IntermediateInputKV;
use io::RecordSource;
use mapper::Map;
use partition::{self, Partition};
use reducer::Reduce;
use shuffle;
use stage::Stage;

/// The part of a stage an error came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Map,
    Combine,
    Reduce,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Phase::Map => "map",
            Phase::Combine => "combine",
            Phase::Reduce => "reduce",
        };
        write!(f, "{}", name)
    }
}

/// Counters collected while executing one stage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStats {
    pub stage_index: usize,
    /// Input records read by the stage.
    pub records: usize,
    /// Non-empty input chunks mapped.
    pub partitions: usize,
    /// Pairs emitted by the mapper.
    pub map_pairs: usize,
    /// Pairs left after combining. Equal to `map_pairs` when no combiner ran.
    pub combined_pairs: usize,
    /// Distinct keys handed to the reducer.
    pub groups: usize,
    /// Pairs emitted by the reducer.
    pub output_pairs: usize,
}

/// `StageExecutor` runs single stages: map, optional combine, shuffle and reduce.
pub struct StageExecutor<'a> {
    config: &'a EngineConfig,
    pool: &'a ThreadPool,
}

impl<'a> StageExecutor<'a> {
    pub fn new(config: &'a EngineConfig, pool: &'a ThreadPool) -> Self {
        StageExecutor { config, pool }
    }

    /// Executes `stage` over every record of `source`.
    ///
    /// Output pairs are ordered by the reducer key they were emitted for, ascending; the pairs
    /// of one key keep their emission order.
    pub fn execute<M, C, R, S>(
        &self,
        stage_index: usize,
        stage: &Stage<M, C, R>,
        source: S,
    ) -> Result<(Vec<(R::OutputKey, R::OutputValue)>, StageStats)>
    where
        M: Map,
        C: Combine<M::Key, M::Value>,
        R: Reduce<M::Key, M::Value>,
        S: RecordSource<Record = M::Input>,
    {
        let records = source
            .open()?
            .collect::<Result<Vec<M::Input>>>()?;
        self.execute_records(stage_index, stage, records)
    }

    /// Executes `stage` over records that have already been read into memory.
    pub fn execute_records<M, C, R>(
        &self,
        stage_index: usize,
        stage: &Stage<M, C, R>,
        records: Vec<M::Input>,
    ) -> Result<(Vec<(R::OutputKey, R::OutputValue)>, StageStats)>
    where
        M: Map,
        C: Combine<M::Key, M::Value>,
        R: Reduce<M::Key, M::Value>,
    {
        if records.is_empty() {
            warn!("Stage {} has no input records", stage_index);
        }

        let mut stats = StageStats {
            stage_index,
            records: records.len(),
            ..Default::default()
        };

        let combiner = if self.config.use_combiners {
            stage.combiner.as_ref()
        } else {
            None
        };

        let chunks = partition::split_into_chunks(records, self.config.partition_count);
        stats.partitions = chunks.len();

        let mapped: Vec<(Partition<M::Key, M::Value>, usize)> = self.pool.install(|| {
            chunks
                .into_par_iter()
                .enumerate()
                .map(|(index, chunk)| {
                    let partition = Partition::map_chunk(stage_index, index, &stage.mapper, chunk)?;
                    let map_pairs = partition.len();
                    let partition = match combiner {
                        Some(combiner) => partition.combine(stage_index, combiner)?,
                        None => partition,
                    };
                    Ok((partition, map_pairs))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        stats.map_pairs = mapped.iter().map(|&(_, map_pairs)| map_pairs).sum();
        stats.combined_pairs = mapped.iter().map(|&(ref partition, _)| partition.len()).sum();

        // Every partition has been mapped before any key is grouped or reduced.
        let partitions = mapped.into_iter().map(|(partition, _)| partition).collect();
        let groups = shuffle::group_by_key(partitions);
        stats.groups = groups.len();
        debug!("Stage {} shuffled into {} groups", stage_index, stats.groups);

        let reduced: Vec<Vec<(R::OutputKey, R::OutputValue)>> = self.pool.install(|| {
            groups
                .into_par_iter()
                .map(|(key, values)| reduce_group(stage_index, &stage.reducer, key, values))
                .collect::<Result<Vec<_>>>()
        })?;

        let output: Vec<(R::OutputKey, R::OutputValue)> =
            reduced.into_iter().flat_map(|pairs| pairs).collect();
        stats.output_pairs = output.len();

        Ok((output, stats))
    }
}

fn reduce_group<K, V, R>(
    stage_index: usize,
    reducer: &R,
    key: K,
    values: Vec<V>,
) -> Result<Vec<(R::OutputKey, R::OutputValue)>>
where
    K: Clone + fmt::Debug,
    R: Reduce<K, V>,
{
    let mut output = Vec::new();
    reducer
        .reduce(
            IntermediateInputKV::new(key.clone(), values),
            IntermediateVecEmitter::new(&mut output),
        )
        .chain_err(|| {
            ErrorKind::StageFailed(stage_index, Phase::Reduce, Some(format!("{:?}", key)))
        })?;
    Ok(output)
}
