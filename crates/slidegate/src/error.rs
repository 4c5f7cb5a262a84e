//! Error types for Slidegate

use thiserror::Error;

/// Main error type for gateway startup and configuration
#[derive(Error, Debug)]
pub enum SlidegateError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for Slidegate operations
pub type Result<T> = std::result::Result<T, SlidegateError>;
