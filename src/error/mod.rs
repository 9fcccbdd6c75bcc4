// Error types for vision-ask
// Author: kelexine (https://github.com/kelexine)

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("OPENAI_API_KEY not found or is empty. Set it in your .env file or environment variables")]
    MissingApiKey,

    #[error("Vision client is not initialized")]
    ClientUnavailable,

    #[error("Cannot determine a valid image MIME type for: {}", .0.display())]
    UnsupportedImageType(PathBuf),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("OpenAI API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("OpenAI API returned no answer")]
    EmptyResponse,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
