use tally::*;

use sum::SumCombiner;
use word_count::WordCountMapper;

/// Totals the count of a word and moves it under the unit key, so the next stage sees every
/// word in a single group.
pub struct CountToGlobalReducer;
impl Reduce<String, u64> for CountToGlobalReducer {
    type OutputKey = ();
    type OutputValue = (u64, String);
    fn reduce<E>(&self, input: IntermediateInputKV<String, u64>, mut emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::OutputKey, Self::OutputValue>,
    {
        let total: u64 = input.values.sum();
        emitter
            .emit((), (total, input.key))
            .chain_err(|| "Error emitting word total.")
    }
}

/// Emits the `(count, word)` pair with the highest count.
///
/// Ties go to the lexicographically largest word, following the ordering of the tuples.
pub struct MaxCountReducer;
impl Reduce<(), (u64, String)> for MaxCountReducer {
    type OutputKey = u64;
    type OutputValue = String;
    fn reduce<E>(
        &self,
        input: IntermediateInputKV<(), (u64, String)>,
        mut emitter: E,
    ) -> Result<()>
    where
        E: EmitIntermediate<Self::OutputKey, Self::OutputValue>,
    {
        if let Some((count, word)) = input.values.max() {
            emitter
                .emit(count, word)
                .chain_err(|| "Error emitting most frequent word.")?;
        }
        Ok(())
    }
}

type MaxCountStage =
    Stage<IdentityMapper<(), (u64, String)>, NullCombiner<(), (u64, String)>, MaxCountReducer>;

pub fn pipeline() -> Result<Pipeline<LineRecord, u64, String>> {
    let count_stage = StageBuilder::new()
        .mapper(WordCountMapper)
        .combiner(SumCombiner)
        .reducer(CountToGlobalReducer)
        .build()
        .chain_err(|| "Error building word total stage.")?;

    let max_stage: MaxCountStage = Stage::reduce_only(MaxCountReducer);

    Pipeline::builder()
        .stage(count_stage)
        .stage(max_stage)
        .build()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn most_frequent(text: &str, partitions: usize) -> Vec<(u64, String)> {
        let config = EngineConfig::with_partitions(partitions);
        run(&pipeline().unwrap(), TextSource::from_text(text), &config).unwrap()
    }

    #[test]
    fn finds_most_frequent_word() {
        assert_eq!(vec![(2, "a".to_owned())], most_frequent("a a b", 1));
    }

    #[test]
    fn first_stage_counts_words() {
        let config = EngineConfig::with_partitions(2);
        let (_, stats) = run_with_stats(
            &pipeline().unwrap(),
            TextSource::from_text("a A\nb"),
            &config,
        ).unwrap();

        assert_eq!(2, stats.len());
        assert_eq!(2, stats[0].groups);
        assert_eq!(2, stats[1].records);
        assert_eq!(1, stats[1].groups);
        assert_eq!(1, stats[1].output_pairs);
    }

    #[test]
    fn ties_go_to_largest_word() {
        assert_eq!(
            vec![(2, "pear".to_owned())],
            most_frequent("apple pear\npear apple\nfig", 3)
        );
    }

    #[test]
    fn empty_input_has_no_answer() {
        assert!(most_frequent("", 2).is_empty());
    }

    fn run_with(text: &str, partition_count: usize, use_combiners: bool) -> Vec<(u64, String)> {
        let config = EngineConfig {
            partition_count,
            use_combiners,
        };
        run(&pipeline().unwrap(), TextSource::from_text(text), &config).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn answer_independent_of_partitions_and_combiners(
            lines in prop::collection::vec("[abcA ]{0,12}", 0..24),
            partitions in 2usize..8,
        ) {
            let text = lines.join("\n");

            let reference = run_with(&text, 1, false);

            prop_assert_eq!(&reference, &run_with(&text, partitions, true));
            prop_assert_eq!(&reference, &run_with(&text, partitions, false));
            prop_assert_eq!(&reference, &run_with(&text, 1, true));
        }
    }
}
