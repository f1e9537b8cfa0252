pub mod document;
pub mod error;
pub mod refs;
pub mod run;
pub mod slot;
pub mod stats;

pub use document::{FUSED_ROOT, PRIMARY_WRAPPER, SourceDocument};
pub use error::{FailureKind, PipelineError, Result, RunFailure};
pub use refs::ReferenceSet;
pub use run::{RunId, TransformationRequest, TransformationResult};
pub use slot::ConfigSlot;
pub use stats::StatisticsReport;
