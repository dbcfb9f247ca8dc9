use std::any::{self, Any, TypeId};
use std::marker::PhantomData;

use combiner::Combine;
use errors::*;
use executor::{StageExecutor, StageStats};
use io::RecordSource;
use mapper::Map;
use reducer::Reduce;
use stage::Stage;

#[derive(Clone, Copy)]
struct TypeSignature {
    id: TypeId,
    name: &'static str,
}

impl TypeSignature {
    fn of<T: 'static>() -> Self {
        TypeSignature {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }
}

/// A stage with its record and pair types erased, so stages of different types can be chained.
///
/// Records travel between stages as a boxed `Vec` of the producing stage's output pairs.
trait ErasedStage: Sync {
    fn input_type(&self) -> TypeSignature;
    fn output_type(&self) -> TypeSignature;
    fn execute(
        &self,
        stage_index: usize,
        executor: &StageExecutor,
        input: Box<dyn Any>,
    ) -> Result<(Box<dyn Any>, StageStats)>;
}

impl<M, C, R> ErasedStage for Stage<M, C, R>
where
    M: Map,
    M::Input: 'static,
    C: Combine<M::Key, M::Value>,
    R: Reduce<M::Key, M::Value>,
    R::OutputKey: 'static,
    R::OutputValue: 'static,
{
    fn input_type(&self) -> TypeSignature {
        TypeSignature::of::<M::Input>()
    }

    fn output_type(&self) -> TypeSignature {
        TypeSignature::of::<(R::OutputKey, R::OutputValue)>()
    }

    fn execute(
        &self,
        stage_index: usize,
        executor: &StageExecutor,
        input: Box<dyn Any>,
    ) -> Result<(Box<dyn Any>, StageStats)> {
        let records = input.downcast::<Vec<M::Input>>().map_err(|_| {
            Error::from(ErrorKind::TypeMismatch(
                stage_index,
                self.input_type().name.to_owned(),
                "records of another type".to_owned(),
            ))
        })?;
        let (output, stats) = executor.execute_records(stage_index, self, *records)?;
        Ok((Box::new(output), stats))
    }
}

/// `Pipeline` is an ordered, type-checked chain of stages.
///
/// `I` is the record type read by the first stage and `(K, V)` the pairs written by the last.
/// Each stage's output pairs are the input records of the stage after it.
pub struct Pipeline<I, K, V> {
    stages: Vec<Box<dyn ErasedStage>>,
    _types: PhantomData<fn(I) -> (K, V)>,
}

impl<I, K, V> Pipeline<I, K, V>
where
    I: Send + 'static,
    K: 'static,
    V: 'static,
{
    pub fn builder() -> PipelineBuilder<I, K, V> {
        PipelineBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs every stage in order, each one fully drained before the next starts.
    pub fn execute<S>(
        &self,
        executor: &StageExecutor,
        source: S,
    ) -> Result<(Vec<(K, V)>, Vec<StageStats>)>
    where
        S: RecordSource<Record = I>,
    {
        let stage_count = self.stages.len();
        let records = source.open()?.collect::<Result<Vec<I>>>()?;

        let mut data: Box<dyn Any> = Box::new(records);
        let mut all_stats = Vec::with_capacity(stage_count);
        for (stage_index, stage) in self.stages.iter().enumerate() {
            info!("Running stage {} of {}", stage_index + 1, stage_count);
            let (output, stats) = stage.execute(stage_index, executor, data)?;
            info!(
                "Stage {} of {} done: records={} map_pairs={} combined_pairs={} groups={} \
                 output_pairs={}",
                stage_index + 1,
                stage_count,
                stats.records,
                stats.map_pairs,
                stats.combined_pairs,
                stats.groups,
                stats.output_pairs
            );
            all_stats.push(stats);
            data = output;
        }

        let output = data.downcast::<Vec<(K, V)>>().map_err(|_| {
            Error::from(ErrorKind::TypeMismatch(
                stage_count.saturating_sub(1),
                any::type_name::<(K, V)>().to_owned(),
                "pairs of another type".to_owned(),
            ))
        })?;
        Ok((*output, all_stats))
    }
}

/// `PipelineBuilder` is used to create a `Pipeline`.
///
/// Stage types are only checked in `build`, so a mismatch is reported before anything runs.
pub struct PipelineBuilder<I, K, V> {
    stages: Vec<Box<dyn ErasedStage>>,
    _types: PhantomData<fn(I) -> (K, V)>,
}

impl<I, K, V> Default for PipelineBuilder<I, K, V> {
    fn default() -> Self {
        PipelineBuilder {
            stages: Vec::new(),
            _types: PhantomData,
        }
    }
}

impl<I, K, V> PipelineBuilder<I, K, V>
where
    I: Send + 'static,
    K: 'static,
    V: 'static,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends a stage to the end of the pipeline.
    pub fn stage<M, C, R>(mut self, stage: Stage<M, C, R>) -> Self
    where
        M: Map + 'static,
        M::Input: 'static,
        M::Key: 'static,
        M::Value: 'static,
        C: Combine<M::Key, M::Value> + 'static,
        R: Reduce<M::Key, M::Value> + 'static,
        R::OutputKey: 'static,
        R::OutputValue: 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn build(self) -> Result<Pipeline<I, K, V>> {
        if self.stages.is_empty() {
            return Err(ErrorKind::EmptyPipeline.into());
        }

        let mut expected = TypeSignature::of::<I>();
        for (stage_index, stage) in self.stages.iter().enumerate() {
            let found = stage.input_type();
            if found.id != expected.id {
                return Err(
                    ErrorKind::TypeMismatch(
                        stage_index,
                        expected.name.to_owned(),
                        found.name.to_owned(),
                    ).into(),
                );
            }
            expected = stage.output_type();
        }

        let output = TypeSignature::of::<(K, V)>();
        if output.id != expected.id {
            return Err(
                ErrorKind::TypeMismatch(
                    self.stages.len() - 1,
                    output.name.to_owned(),
                    expected.name.to_owned(),
                ).into(),
            );
        }

        Ok(Pipeline {
            stages: self.stages,
            _types: PhantomData,
        })
    }
}
