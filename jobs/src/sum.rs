use tally::*;

/// `SumCombiner` adds up the partial counts one partition emitted for a key.
pub struct SumCombiner;
impl<K> Combine<K, u64> for SumCombiner {
    fn combine<E>(&self, input: IntermediateInputKV<K, u64>, mut emitter: E) -> Result<()>
    where
        E: EmitFinal<u64>,
    {
        emitter
            .emit(input.values.sum())
            .chain_err(|| "Error emitting combined count.")
    }
}

/// `SumReducer` emits every key with the total of its counts.
pub struct SumReducer;
impl<K: Send> Reduce<K, u64> for SumReducer {
    type OutputKey = K;
    type OutputValue = u64;
    fn reduce<E>(&self, input: IntermediateInputKV<K, u64>, mut emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::OutputKey, Self::OutputValue>,
    {
        let total: u64 = input.values.sum();
        emitter
            .emit(input.key, total)
            .chain_err(|| format!("Error emitting total {:?}.", total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combiner_sums_partial_counts() {
        let mut output = Vec::new();

        SumCombiner
            .combine(
                IntermediateInputKV::new("cat".to_owned(), vec![1, 2, 3]),
                FinalVecEmitter::new(&mut output),
            )
            .unwrap();

        assert_eq!(vec![6], output);
    }

    #[test]
    fn reducer_keeps_key() {
        let mut output = Vec::new();

        SumReducer
            .reduce(
                IntermediateInputKV::new('x', vec![4, 1]),
                IntermediateVecEmitter::new(&mut output),
            )
            .unwrap();

        assert_eq!(vec![('x', 5)], output);
    }
}
