//! Error types for Lese.

use thiserror::Error;

/// Library-level error type for Lese operations.
#[derive(Error, Debug)]
pub enum LeseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Summary generation failed: {0}")]
    Generation(String),

    #[error("Signed URL error: {0}")]
    SignedUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] object_store::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Lese operations.
pub type Result<T> = std::result::Result<T, LeseError>;
