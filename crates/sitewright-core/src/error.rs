//! Unified error types for Sitewright

use thiserror::Error;

/// Unified error type for all Sitewright operations
#[derive(Error, Debug)]
pub enum SitewrightError {
    // Generation service errors
    #[error("Generation service error: {0}")]
    Api(String),

    #[error("Generation rate limited: {0}")]
    ApiLimit(String),

    #[error("Missing credentials: {0}")]
    Auth(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    // Planning errors
    #[error("Strategy planning error: {0}")]
    Planning(String),

    // Artifact store errors
    #[error("Artifact store error: {0}")]
    Store(String),

    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using SitewrightError
pub type Result<T> = std::result::Result<T, SitewrightError>;
