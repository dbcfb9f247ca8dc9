use combiner::{Combine, NullCombiner};
use errors::*;
use mapper::{IdentityMapper, Map};
use reducer::Reduce;

/// `Stage` holds the user's implementations of Map, Combine and Reduce for one step of a
/// pipeline.
///
/// The user should use the `StageBuilder` to create this and then add it to a `Pipeline`.
pub struct Stage<M, C, R>
where
    M: Map,
    C: Combine<M::Key, M::Value>,
    R: Reduce<M::Key, M::Value>,
{
    pub mapper: M,
    pub combiner: Option<C>,
    pub reducer: R,
}

impl<K, V, R> Stage<IdentityMapper<K, V>, NullCombiner<K, V>, R>
where
    IdentityMapper<K, V>: Map<Key = K, Value = V>,
    R: Reduce<K, V>,
{
    /// Constructs a stage which feeds its `(key, value)` input records straight to `reducer`.
    pub fn reduce_only(reducer: R) -> Self {
        Stage {
            mapper: IdentityMapper::new(),
            combiner: None,
            reducer,
        }
    }
}

/// `StageBuilder` is used to create a `Stage`.
pub struct StageBuilder<M, C, R>
where
    M: Map,
    C: Combine<M::Key, M::Value>,
    R: Reduce<M::Key, M::Value>,
{
    mapper: Option<M>,
    combiner: Option<C>,
    reducer: Option<R>,
}

impl<M, C, R> Default for StageBuilder<M, C, R>
where
    M: Map,
    C: Combine<M::Key, M::Value>,
    R: Reduce<M::Key, M::Value>,
{
    fn default() -> StageBuilder<M, C, R> {
        StageBuilder {
            mapper: None,
            combiner: None,
            reducer: None,
        }
    }
}

impl<M, C, R> StageBuilder<M, C, R>
where
    M: Map,
    C: Combine<M::Key, M::Value>,
    R: Reduce<M::Key, M::Value>,
{
    pub fn new() -> StageBuilder<M, C, R> {
        Default::default()
    }

    pub fn mapper(mut self, mapper: M) -> StageBuilder<M, C, R> {
        self.mapper = Some(mapper);
        self
    }

    pub fn combiner(mut self, combiner: C) -> StageBuilder<M, C, R> {
        self.combiner = Some(combiner);
        self
    }

    pub fn reducer(mut self, reducer: R) -> StageBuilder<M, C, R> {
        self.reducer = Some(reducer);
        self
    }

    pub fn build(self) -> Result<Stage<M, C, R>> {
        let mapper = self.mapper
            .chain_err(|| "Error building Stage: No Mapper provided")?;
        let reducer = self.reducer
            .chain_err(|| "Error building Stage: No Reducer provided")?;

        Ok(Stage {
            mapper,
            combiner: self.combiner,
            reducer,
        })
    }
}

/// Construct a `StageBuilder` that does not need a `Combine` implementation.
impl<M, R> StageBuilder<M, NullCombiner<M::Key, M::Value>, R>
where
    M: Map,
    R: Reduce<M::Key, M::Value>,
{
    pub fn new_no_combiner() -> StageBuilder<M, NullCombiner<M::Key, M::Value>, R> {
        Default::default()
    }
}
