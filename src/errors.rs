//! Error types for slimcss

use thiserror::Error;

/// Main error type for slimcss
#[derive(Error, Debug)]
pub enum SlimcssError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot write output to '{path}': {source}")]
    Output {
        path: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SlimcssError>;
