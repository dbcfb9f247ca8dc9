use std::marker::PhantomData;

use emitter::EmitFinal;
use errors::*;
use intermediate::IntermediateInputKV;

/// The `Combine` trait defines a function for performing a combine operation.
///
/// A combine operation is a reduce applied locally to the values one partition emitted for a
/// key, before the shuffle. The engine may skip it, so its output must be reducible exactly like
/// raw map output would be.
///
/// # Arguments
///
/// * `input`   - A `IntermediateInputKV` containing the input data for the combine operation.
/// * `emitter` - A struct implementing the `EmitFinal` trait,
///               provided by the executor.
///
/// # Outputs
///
/// An empty result used for returning an error. Outputs of the combine operation are sent out
/// through the `emitter` and stay under the key being combined.
pub trait Combine<K, V>: Sync {
    fn combine<E>(&self, input: IntermediateInputKV<K, V>, emitter: E) -> Result<()>
    where
        E: EmitFinal<V>;
}

/// A null implementation for `Combine` as this is optional component.
///
/// Stages built without a combiner carry this type; the executor never calls it.
pub struct NullCombiner<K, V> {
    _types: PhantomData<fn(K, V)>,
}

impl<K, V> NullCombiner<K, V> {
    pub fn new() -> Self {
        NullCombiner {
            _types: PhantomData,
        }
    }
}

impl<K, V> Default for NullCombiner<K, V> {
    fn default() -> Self {
        NullCombiner::new()
    }
}

impl<K, V> Combine<K, V> for NullCombiner<K, V> {
    fn combine<E>(&self, _input: IntermediateInputKV<K, V>, _emitter: E) -> Result<()>
    where
        E: EmitFinal<V>,
    {
        Err("NullCombiner should never be invoked".into())
    }
}
