//! Typed errors for the fact-check pipeline.
//!
//! Collaborator clients report failures as `anyhow::Error`; the pipeline
//! converts them to degraded text, so only validation and cancellation ever
//! reach the caller as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// Claim is empty or not phrased as a verifiable proposition
    #[error("{message}")]
    Validation { message: String },

    /// Caller abandoned the request before it finished
    #[error("request cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("search provider error: {0}")]
    Search(String),

    /// Carries the provider's own message, shown to the user as is
    #[error("{0}")]
    Llm(String),

    /// Provider answered but without any completion text
    #[error("LLM returned no completion")]
    EmptyCompletion,
}

pub type Result<T> = std::result::Result<T, CheckError>;
