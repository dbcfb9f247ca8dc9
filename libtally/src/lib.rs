#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate rayon;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

pub mod errors {
    use executor::Phase;

    error_chain! {
        foreign_links {
            Io(::std::io::Error);
            Json(::serde_json::Error);
            ThreadPool(::rayon::ThreadPoolBuildError);
        }

        errors {
            SourceUnavailable(source: String) {
                description("input source unavailable")
                display("input source unavailable: {}", source)
            }
            StageFailed(stage_index: usize, phase: Phase, key: Option<String>) {
                description("stage failed")
                display("stage {} failed during {}{}", stage_index, phase, match *key {
                    Some(ref key) => format!(" (key {})", key),
                    None => String::new(),
                })
            }
            EmptyPipeline {
                description("pipeline has no stages")
                display("pipeline has no stages")
            }
            TypeMismatch(stage_index: usize, expected: String, found: String) {
                description("pipeline stage type mismatch")
                display("type mismatch at stage {}: expected {}, found {}",
                        stage_index, expected, found)
            }
            InvalidConfig(reason: String) {
                description("invalid engine configuration")
                display("invalid engine configuration: {}", reason)
            }
        }
    }
}

pub mod combiner;
pub mod config;
pub mod emitter;
pub mod executor;
pub mod intermediate;
pub mod io;
pub mod mapper;
pub mod partition;
pub mod pipeline;
pub mod reducer;
pub mod runner;
pub mod serialise;
pub mod shuffle;
pub mod stage;

pub use combiner::{Combine, NullCombiner};
pub use config::EngineConfig;
pub use emitter::{EmitFinal, EmitIntermediate, FinalVecEmitter, IntermediateVecEmitter};
pub use errors::*;
pub use executor::{Phase, StageExecutor, StageStats};
pub use intermediate::{GroupValues, IntermediateInputKV};
pub use io::{LineRecord, RecordSource, TextSource};
pub use mapper::{IdentityMapper, Map};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use reducer::Reduce;
pub use runner::{run, run_with_stats, Engine};
pub use serialise::{format_pair, write_output};
pub use stage::{Stage, StageBuilder};
