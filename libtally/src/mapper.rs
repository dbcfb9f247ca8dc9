use std::fmt::Debug;
use std::marker::PhantomData;

use emitter::EmitIntermediate;
use errors::*;

/// The `Map` trait defines a function for performing a map operation.
///
/// The input and output types are decided by the implementation of this trait. Implementations
/// are shared between the threads mapping different partitions, so they must not hold mutable
/// state.
///
/// # Arguments
///
/// * `input` - A single input record.
/// * `emitter` - A struct implementing the `EmitIntermediate` trait, provided by the executor.
///
/// # Outputs
///
/// An empty result used for returning an error. Outputs of the map operation are sent out through
/// the `emitter`, in emission order.
pub trait Map: Sync {
    type Input: Send;
    type Key: Ord + Clone + Debug + Send;
    type Value: Send;
    fn map<E>(&self, input: Self::Input, emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::Key, Self::Value>;
}

/// `IdentityMapper` re-emits every `(key, value)` record it receives.
///
/// It is the mapper of stages that only carry a reducer, such as the later stages of a
/// multi-stage pipeline.
pub struct IdentityMapper<K, V> {
    _types: PhantomData<fn(K, V)>,
}

impl<K, V> IdentityMapper<K, V> {
    pub fn new() -> Self {
        IdentityMapper {
            _types: PhantomData,
        }
    }
}

impl<K, V> Default for IdentityMapper<K, V> {
    fn default() -> Self {
        IdentityMapper::new()
    }
}

impl<K, V> Map for IdentityMapper<K, V>
where
    K: Ord + Clone + Debug + Send,
    V: Send,
{
    type Input = (K, V);
    type Key = K;
    type Value = V;
    fn map<E>(&self, input: (K, V), mut emitter: E) -> Result<()>
    where
        E: EmitIntermediate<K, V>,
    {
        emitter.emit(input.0, input.1)
    }
}
