//! # AppError
//!
//! Centralized error handling for the flatboard ecosystem.
//! Every fallible operation below the request boundary returns one of these;
//! the api crate translates them into a redirect with a user-visible message.

use thiserror::Error;

/// The primary error type for all fb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g. board, topic, post, reply, user, badge, news)
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    /// Validation failure (length bounds, format, uniqueness)
    #[error("validation error: {0}")]
    Validation(String),

    /// Caller lacks the role the operation requires
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A page index past the end of the collection was requested
    #[error("that page does not exist")]
    PageOutOfRange,

    /// Write-through to the flat-file store did not complete
    #[error("persistence error: {0}")]
    Persistence(String),

    /// An external collaborator (captcha verifier) could not be reached
    #[error("upstream service unavailable: {0}")]
    Upstream(String),
}

impl AppError {
    /// The message shown to the user when the error is recovered at the
    /// request boundary.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(kind, _) => format!("Invalid {kind} given."),
            AppError::Validation(msg) => msg.clone(),
            AppError::Unauthorized(_) => "You are not allowed to do that.".to_string(),
            AppError::PageOutOfRange => "That page does not exist.".to_string(),
            AppError::Persistence(_) => {
                "Your change could not be saved. Please try again.".to_string()
            }
            AppError::Upstream(_) => {
                "An external service is unavailable. Please try again.".to_string()
            }
        }
    }
}

/// A specialized Result type for flatboard logic.
pub type Result<T> = std::result::Result<T, AppError>;
