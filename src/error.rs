//! Error types for the plugin crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Client bootstrap failed: {0}")]
    Bootstrap(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Parameter extraction failed: {0}")]
    Extraction(String),

    #[error("Response generation failed: {0}")]
    Generation(String),

    #[error("Metadata resolution failed: {0}")]
    Metadata(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("SDK operation failed: {0}")]
    Sdk(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
