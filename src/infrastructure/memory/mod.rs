//! Memory Layer - In-Memory State Management
//!
//! 实现 ArtifactStore，保存各生成任务的成品

mod artifact_store;

pub use artifact_store::InMemoryArtifactStore;
