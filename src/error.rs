// src/error.rs - Crate error type
use thiserror::Error;

/// Error type used throughout the crate.
///
/// Decoding failures are local and non-fatal: a caller that receives
/// [`AlertError::PgnMismatch`] is expected to offer the message to the next
/// decoder or drop it.
#[derive(Error, Debug)]
pub enum AlertError {
    /// Message was handed to a decoder for a different PGN
    #[error("PGN mismatch: expected {expected}, got {actual}")]
    PgnMismatch {
        /// PGN the decoder handles
        expected: u32,
        /// PGN of the message
        actual: u32,
    },

    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error while parsing YAML configuration files
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O related failure
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),

    /// No alert with this id is registered
    #[error("Alert not found: {0}")]
    UnknownAlert(u16),
}

/// Convenient alias over [`Result`] using [`AlertError`]
pub type Result<T> = std::result::Result<T, AlertError>;
