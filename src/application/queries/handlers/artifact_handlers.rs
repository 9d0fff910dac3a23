//! Artifact Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ArtifactSelector, ArtifactStorePort, StoreError};
use crate::application::queries::{GetArtifact, GetArtifactResponse};
use crate::domain::book::ArtifactFormat;
use crate::domain::strip_code_fences;

/// GetArtifact Handler - 读取成品并准备下载
pub struct GetArtifactHandler {
    artifact_store: Arc<dyn ArtifactStorePort>,
}

impl GetArtifactHandler {
    pub fn new(artifact_store: Arc<dyn ArtifactStorePort>) -> Self {
        Self { artifact_store }
    }

    pub fn handle(&self, query: GetArtifact) -> Result<GetArtifactResponse, ApplicationError> {
        let format: ArtifactFormat = query.format.parse()?;
        let selector = ArtifactSelector::from(query.run_id);

        let raw = self.artifact_store.retrieve(selector, format)?;

        // RTF 去掉模型包裹的代码围栏；HTML 原样返回
        let body = match format {
            ArtifactFormat::Rtf => strip_code_fences(&raw),
            ArtifactFormat::Html => raw,
        };

        // 空内容视同未生成
        if body.is_empty() {
            return Err(StoreError::NotFound.into());
        }

        Ok(GetArtifactResponse {
            format,
            data: body.into_bytes(),
            content_type: format.content_type(),
            file_name: format.file_name(),
        })
    }
}
