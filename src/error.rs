//! Error type shared by the hook stages.

use std::path::PathBuf;

/// Everything that can go wrong before a decision is reached.
///
/// None of these are fatal for the host: the binary logs them and allows the
/// stop.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("invalid hook input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("transcript unavailable at {path}: {source}")]
    TranscriptUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed transcript record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("config error in {path}: {message}")]
    Config { path: PathBuf, message: String },
}

/// Why a single transcript line could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("not a JSON record: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HookError>;
