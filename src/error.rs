//! Error types for Mail Triage.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),
}

/// Configuration-related errors.
///
/// These are the only errors that escape engine construction. Once an
/// [`EmailClassifier`](crate::classifier::EmailClassifier) exists, every
/// classification call succeeds.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Keyword set for {label} is empty")]
    EmptyKeywordSet { label: &'static str },

    #[error("Response template pool for {label} is empty")]
    EmptyTemplatePool { label: &'static str },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build keyword matcher: {0}")]
    PatternBuild(String),
}

/// Statistical model errors.
///
/// Internal to the adapter: never surfaced to classification callers,
/// always converted into a degraded (rule-based) verdict.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to load model {model}: {reason}")]
    Load { model: String, reason: String },

    #[error("Tokenization failed: {0}")]
    Tokenize(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Unexpected model output: {0}")]
    UnexpectedOutput(String),
}

/// Batch ingestion errors.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Unsupported file type: {extension} (expected .txt)")]
    UnsupportedExtension { extension: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
