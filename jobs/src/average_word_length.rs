use tally::*;

/// Every line reports under this single key, so one reducer call sees the whole input.
pub const AVERAGE_KEY: &str = "average_word_length";

/// Emits `(total characters, word count)` for the words of a line.
///
/// Word length is measured in characters, not bytes. Lines without words emit `(0, 0)`.
pub struct WordLengthMapper;
impl Map for WordLengthMapper {
    type Input = LineRecord;
    type Key = String;
    type Value = (u64, u64);
    fn map<E>(&self, input: LineRecord, mut emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::Key, Self::Value>,
    {
        let (mut chars, mut words) = (0u64, 0u64);
        for word in input.line.split_whitespace() {
            chars += word.chars().count() as u64;
            words += 1;
        }
        emitter
            .emit(AVERAGE_KEY.to_owned(), (chars, words))
            .chain_err(|| "Error emitting word lengths.")
    }
}

fn add_lengths(values: GroupValues<(u64, u64)>) -> (u64, u64) {
    values.fold((0, 0), |(chars, words), (c, w)| (chars + c, words + w))
}

pub struct WordLengthCombiner;
impl Combine<String, (u64, u64)> for WordLengthCombiner {
    fn combine<E>(
        &self,
        input: IntermediateInputKV<String, (u64, u64)>,
        mut emitter: E,
    ) -> Result<()>
    where
        E: EmitFinal<(u64, u64)>,
    {
        emitter
            .emit(add_lengths(input.values))
            .chain_err(|| "Error emitting combined word lengths.")
    }
}

/// Divides the total character count by the total word count. No words averages to `0`.
pub struct AverageReducer;
impl Reduce<String, (u64, u64)> for AverageReducer {
    type OutputKey = String;
    type OutputValue = f64;
    fn reduce<E>(
        &self,
        input: IntermediateInputKV<String, (u64, u64)>,
        mut emitter: E,
    ) -> Result<()>
    where
        E: EmitIntermediate<Self::OutputKey, Self::OutputValue>,
    {
        let (chars, words) = add_lengths(input.values);
        let average = if words == 0 {
            0.0
        } else {
            chars as f64 / words as f64
        };
        emitter
            .emit(input.key, average)
            .chain_err(|| format!("Error emitting average {}.", average))
    }
}

pub fn pipeline() -> Result<Pipeline<LineRecord, String, f64>> {
    let stage = StageBuilder::new()
        .mapper(WordLengthMapper)
        .combiner(WordLengthCombiner)
        .reducer(AverageReducer)
        .build()
        .chain_err(|| "Error building average word length stage.")?;

    Pipeline::builder().stage(stage).build()
}
