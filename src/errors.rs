use thiserror::Error;

/// Error type for infrastructure and flow failures.
///
/// Field-level validation problems never travel through this type on their
/// own; they are recorded in the screen's error map and only summarised here
/// as [`OnboardError::Validation`] when they block a transition.
#[derive(Debug, Error)]
pub enum OnboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Validation failed: {0} field(s) need attention")]
    Validation(usize),
    #[error("A submission is already in progress")]
    SubmitInProgress,
    #[error("Background task failed: {0}")]
    Task(String),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

pub type Result<T> = std::result::Result<T, OnboardError>;
