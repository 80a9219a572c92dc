//! Crate-level error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::feedback::PatternError;
use crate::word::WordError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read word list {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{}: invalid word: {}", .path.display(), .line, .source)]
    InvalidWord {
        path: PathBuf,
        line: usize,
        #[source]
        source: WordError,
    },
    #[error("word list {} is empty", .path.display())]
    EmptyWordList { path: PathBuf },
    #[error("invalid word: {0}")]
    Word(#[from] WordError),
    #[error("invalid feedback pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error("bias must be at least 1.0, got {0}")]
    InvalidBias(f64),
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
