use thiserror::Error;

/// Submission failures, each recovered at the status area and never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Invalid or empty media URL")]
    InvalidUrl,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server rejected the request: {0}")]
    Business(String),
}
