//! Error types for webagent.

use thiserror::Error;

/// Library-level error type for webagent operations.
///
/// The model adapter and the tools never surface these to the agent loop;
/// they are converted to [`crate::outcome::TextResult::Failure`] text at
/// the boundary. Everything else (configuration, server startup, CLI I/O)
/// propagates them normally.
#[derive(Error, Debug)]
pub enum WebAgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model API error: {0}")]
    Model(String),

    #[error("Failed to parse page: {0}")]
    Parse(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for webagent operations.
pub type Result<T> = std::result::Result<T, WebAgentError>;
