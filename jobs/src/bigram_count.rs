use tally::*;

use sum::{SumCombiner, SumReducer};

/// Emits every pair of adjacent words in a line, lowercased and joined by a single space.
///
/// A line of `n` words yields `n - 1` bigrams; bigrams never span two lines.
pub struct BigramMapper;
impl Map for BigramMapper {
    type Input = LineRecord;
    type Key = String;
    type Value = u64;
    fn map<E>(&self, input: LineRecord, mut emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::Key, Self::Value>,
    {
        let words: Vec<String> = input
            .line
            .split_whitespace()
            .map(|word| word.to_lowercase())
            .collect();

        for pair in words.windows(2) {
            emitter
                .emit(format!("{} {}", pair[0], pair[1]), 1)
                .chain_err(|| "Error emitting bigram.")?;
        }
        Ok(())
    }
}

pub fn pipeline() -> Result<Pipeline<LineRecord, String, u64>> {
    let stage = StageBuilder::new()
        .mapper(BigramMapper)
        .combiner(SumCombiner)
        .reducer(SumReducer)
        .build()
        .chain_err(|| "Error building bigram count stage.")?;

    Pipeline::builder().stage(stage).build()
}
