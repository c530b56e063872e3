//! Error types for chatmark.

use std::io;
use thiserror::Error;

use crate::chat::GenerateError;

/// Result type alias for chatmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the (total) rendering pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A chat message was empty or whitespace only.
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// A chat message exceeded the configured length.
    #[error("Message too long. Maximum {max} characters allowed.")]
    MessageTooLong {
        /// Length of the rejected message in characters
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// The text generator failed.
    #[error("Generation failed: {0}")]
    Generate(#[from] GenerateError),

    /// Error during serialization of rendered output.
    #[error("Rendering error: {0}")]
    Render(String),

    /// The conversation store could not be accessed.
    #[error("Conversation store error: {0}")]
    Store(String),
}
