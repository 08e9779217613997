//! Error types for the Narcissus scanner

use thiserror::Error;

/// Main error type for Narcissus operations
#[derive(Debug, Error)]
pub enum NarcissusError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Sites file error: {0}")]
    SourceError(String),

    #[error("Scan error: {0}")]
    ScanError(String),

    #[error("Too many redirects probing {0}")]
    TooManyRedirects(String),
}

/// Result type alias for Narcissus operations
pub type Result<T> = std::result::Result<T, NarcissusError>;
