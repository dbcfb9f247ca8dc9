use std::collections::BTreeMap;
use std::fmt::Debug;

use combiner::Combine;
use emitter::{FinalVecEmitter, IntermediateVecEmitter};
use errors::*;
use executor::Phase;
use intermediate::IntermediateInputKV;
use mapper::Map;

/// Splits `records` into at most `partition_count` contiguous chunks of near-equal size.
///
/// Chunk order follows input order, and no chunk is empty, so empty input gives no chunks.
pub fn split_into_chunks<T>(records: Vec<T>, partition_count: usize) -> Vec<Vec<T>> {
    let partition_count = partition_count.max(1);
    let total = records.len();
    let base = total / partition_count;
    let extra = total % partition_count;

    let mut chunks = Vec::with_capacity(partition_count.min(total));
    let mut records = records.into_iter();
    for index in 0..partition_count {
        let size = if index < extra { base + 1 } else { base };
        if size == 0 {
            break;
        }
        chunks.push(records.by_ref().take(size).collect());
    }
    chunks
}

/// `Partition` is the ordered output of mapping one chunk of input.
#[derive(Debug)]
pub struct Partition<K, V> {
    index: usize,
    pairs: Vec<(K, V)>,
}

impl<K, V> Partition<K, V>
where
    K: Ord + Clone + Debug,
{
    pub fn new(index: usize, pairs: Vec<(K, V)>) -> Self {
        Partition { index, pairs }
    }

    /// Runs `mapper` over every record of `chunk`, in chunk order.
    pub fn map_chunk<M>(
        stage_index: usize,
        index: usize,
        mapper: &M,
        chunk: Vec<M::Input>,
    ) -> Result<Self>
    where
        M: Map<Key = K, Value = V>,
    {
        let mut pairs = Vec::new();
        for record in chunk {
            mapper
                .map(record, IntermediateVecEmitter::new(&mut pairs))
                .chain_err(|| ErrorKind::StageFailed(stage_index, Phase::Map, None))?;
        }
        debug!(
            "Stage {} partition {} mapped to {} pairs",
            stage_index,
            index,
            pairs.len()
        );
        Ok(Partition::new(index, pairs))
    }

    /// Applies `combiner` to the values of each key in this partition.
    ///
    /// Keys holding a single value are passed through without invoking the combiner. The result
    /// is ordered by key; the values of a key keep the order the combiner emitted them in.
    pub fn combine<C>(self, stage_index: usize, combiner: &C) -> Result<Self>
    where
        C: Combine<K, V>,
    {
        let index = self.index;
        let mut grouped: BTreeMap<K, Vec<V>> = BTreeMap::new();
        for (key, value) in self.pairs {
            grouped.entry(key).or_insert_with(Vec::new).push(value);
        }

        let mut pairs = Vec::new();
        for (key, values) in grouped {
            if values.len() < 2 {
                pairs.extend(values.into_iter().map(|value| (key.clone(), value)));
                continue;
            }

            let mut combined = Vec::new();
            combiner
                .combine(
                    IntermediateInputKV::new(key.clone(), values),
                    FinalVecEmitter::new(&mut combined),
                )
                .chain_err(|| {
                    ErrorKind::StageFailed(stage_index, Phase::Combine, Some(format!("{:?}", key)))
                })?;
            pairs.extend(combined.into_iter().map(|value| (key.clone(), value)));
        }

        debug!(
            "Stage {} partition {} combined to {} pairs",
            stage_index,
            index,
            pairs.len()
        );
        Ok(Partition::new(index, pairs))
    }
}

impl<K, V> Partition<K, V> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn into_pairs(self) -> Vec<(K, V)> {
        self.pairs
    }
}
