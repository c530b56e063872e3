//! The text generation boundary.

use thiserror::Error;

/// Failure reported by a [`Generator`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The API key was rejected.
    #[error("invalid API key")]
    InvalidKey,

    /// The account quota is used up.
    #[error("quota exceeded")]
    QuotaExceeded,

    /// Too many requests in a short time.
    #[error("rate limit exceeded")]
    RateLimited,

    /// Any other failure.
    #[error("{0}")]
    Failed(String),
}

impl GenerateError {
    /// Classify a raw error message from a generation backend.
    pub fn classify(message: &str) -> Self {
        if message.contains("API_KEY_INVALID") {
            GenerateError::InvalidKey
        } else if message.contains("QUOTA_EXCEEDED") {
            GenerateError::QuotaExceeded
        } else if message.contains("RATE_LIMIT_EXCEEDED") {
            GenerateError::RateLimited
        } else {
            GenerateError::Failed(message.to_string())
        }
    }

    /// Fixed message shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerateError::InvalidKey => {
                "Invalid API key. Please check your API key configuration."
            }
            GenerateError::QuotaExceeded => "API quota exceeded. Please try again later.",
            GenerateError::RateLimited => {
                "Rate limit exceeded. Please wait a moment before trying again."
            }
            GenerateError::Failed(_) => "Sorry, I encountered an error processing your request.",
        }
    }
}

/// A text generation backend: takes a full prompt, returns the reply.
///
/// Implementations wrap a network client; the crate itself never performs
/// the call.
pub trait Generator: Send + Sync {
    /// Generate a reply for `prompt`.
    fn generate(&self, prompt: &str) -> Result<String, GenerateError>;

    /// Name of the backend, for logging.
    fn name(&self) -> &str {
        "generator"
    }
}

impl<F> Generator for F
where
    F: Fn(&str) -> Result<String, GenerateError> + Send + Sync,
{
    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self(prompt)
    }
}
