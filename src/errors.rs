/*!
 * Error types for the subgen application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while parsing subtitle data
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timestamp does not match the HH:MM:SS,mmm pattern
    #[error("Invalid timestamp '{0}': expected HH:MM:SS,mmm")]
    TimestampFormat(String),

    /// A subtitle block is structurally malformed
    #[error("Malformed subtitle block: {0}")]
    MalformedBlock(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing or generation
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
