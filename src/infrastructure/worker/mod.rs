//! Worker Layer - Background Task Processing
//!
//! 实现 ArtifactGcWorker，定期清理过期成品

mod artifact_gc;

pub use artifact_gc::{ArtifactGcWorker, ArtifactGcWorkerConfig};
