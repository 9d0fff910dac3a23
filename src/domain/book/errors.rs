//! Book Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("Topic must not be empty")]
    EmptyTopic,

    #[error("Chapter title must not be empty")]
    EmptyChapterTitle,

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
