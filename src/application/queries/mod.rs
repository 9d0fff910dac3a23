//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：读取已生成的成品

mod artifact_queries;

pub mod handlers;

pub use artifact_queries::*;
