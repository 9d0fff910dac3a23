//! Query Handlers 实现

mod artifact_handlers;

pub use artifact_handlers::*;
