use tally::*;

use sum::{SumCombiner, SumReducer};

/// Emits every whitespace separated word of a line, lowercased, with a count of one.
pub struct WordCountMapper;
impl Map for WordCountMapper {
    type Input = LineRecord;
    type Key = String;
    type Value = u64;
    fn map<E>(&self, input: LineRecord, mut emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::Key, Self::Value>,
    {
        for token in input.line.split_whitespace() {
            emitter
                .emit(token.to_lowercase(), 1)
                .chain_err(|| "Error emitting map key-value pair.")?;
        }
        Ok(())
    }
}

pub fn pipeline() -> Result<Pipeline<LineRecord, String, u64>> {
    let stage = StageBuilder::new()
        .mapper(WordCountMapper)
        .combiner(SumCombiner)
        .reducer(SumReducer)
        .build()
        .chain_err(|| "Error building word count stage.")?;

    Pipeline::builder().stage(stage).build()
}
