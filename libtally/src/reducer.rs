use emitter::EmitIntermediate;
use errors::*;
use intermediate::IntermediateInputKV;

/// The `Reduce` trait defines a function for performing a reduce operation.
///
/// The output types are decided by the implementation of this trait.
///
/// # Arguments
///
/// * `input` - A `IntermediateInputKV` holding one key and every value grouped under it.
/// * `emitter` - A struct implementing the `EmitIntermediate` trait, provided by the executor.
///
/// # Outputs
///
/// An empty result used for returning an error. Outputs of the reduce operation are sent out
/// through the `emitter`, as zero or more key-value pairs.
pub trait Reduce<K, V>: Sync {
    type OutputKey: Send;
    type OutputValue: Send;
    fn reduce<E>(&self, input: IntermediateInputKV<K, V>, emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::OutputKey, Self::OutputValue>;
}
