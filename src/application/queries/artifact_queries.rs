//! Artifact Queries - 成品查询

use crate::domain::book::{ArtifactFormat, RunId};

/// 获取成品查询
///
/// `format` 保留原始字符串，由 handler 负责识别，
/// 保证不支持的格式在查仓库之前就被拒绝
#[derive(Debug, Clone)]
pub struct GetArtifact {
    pub format: String,
    pub run_id: Option<RunId>,
}

/// 获取成品响应
#[derive(Debug, Clone)]
pub struct GetArtifactResponse {
    pub format: ArtifactFormat,
    pub data: Vec<u8>,
    pub content_type: &'static str,
    pub file_name: String,
}
