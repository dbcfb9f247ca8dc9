use tally::*;

use sum::{SumCombiner, SumReducer};

/// Emits every ASCII letter of a line, lowercased. Digits, punctuation, whitespace and
/// non-ASCII characters are dropped.
pub struct CharFrequencyMapper;
impl Map for CharFrequencyMapper {
    type Input = LineRecord;
    type Key = String;
    type Value = u64;
    fn map<E>(&self, input: LineRecord, mut emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::Key, Self::Value>,
    {
        for letter in input.line.chars().filter(char::is_ascii_alphabetic) {
            emitter
                .emit(letter.to_ascii_lowercase().to_string(), 1)
                .chain_err(|| "Error emitting character.")?;
        }
        Ok(())
    }
}

pub fn pipeline() -> Result<Pipeline<LineRecord, String, u64>> {
    let stage = StageBuilder::new()
        .mapper(CharFrequencyMapper)
        .combiner(SumCombiner)
        .reducer(SumReducer)
        .build()
        .chain_err(|| "Error building character frequency stage.")?;

    Pipeline::builder().stage(stage).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_letters_only() {
        let config = EngineConfig::with_partitions(2);

        let output = run(&pipeline().unwrap(), TextSource::from_text("AA!!bb"), &config).unwrap();

        assert_eq!(vec![("a".to_owned(), 2), ("b".to_owned(), 2)], output);
    }

    #[test]
    fn ignores_digits_and_accents() {
        let mut output = Vec::new();

        CharFrequencyMapper
            .map(
                LineRecord::new(0, "x1 é-Y"),
                IntermediateVecEmitter::new(&mut output),
            )
            .unwrap();

        assert_eq!(vec![("x".to_owned(), 1), ("y".to_owned(), 1)], output);
    }
}
