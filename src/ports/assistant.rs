//! Assistant Service Port - free-form question answering.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the conversational assistant backend.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The backend returned a non-success status.
    #[error("assistant request rejected: {0}")]
    Rejected(String),

    /// The backend was unreachable or timed out.
    #[error("assistant unavailable: {0}")]
    Unavailable(String),

    /// The response arrived but carried no usable completion.
    #[error("assistant returned no answer")]
    EmptyAnswer,
}

/// Port for answering free-form user questions.
///
/// Failures are recovered with a generic apology and never affect the
/// conversation step.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Asks the assistant a question and returns its answer text.
    async fn ask(&self, prompt: &str) -> Result<String, AssistantError>;
}
