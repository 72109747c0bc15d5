//! Error types for fitness onboarding.

use crate::onboarding::model::Stage;

/// Fallback shown when neither the server nor the transport said anything useful.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unknown error occurred";

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the remote account API.
///
/// Only raised when no response came back at all. A response with a
/// non-success status is still an `ApiResponse`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },
}

/// Key-value storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Terminal failure of one onboarding submission.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{stage} rejected with status {status}")]
    Rejected {
        stage: Stage,
        status: u16,
        message: Option<String>,
    },

    #[error("{stage} request did not complete: {reason}")]
    Transport { stage: Stage, reason: String },

    #[error("Registration response did not include a user id")]
    MissingUserId,

    #[error("Failed to save user id: {0}")]
    Storage(#[from] StoreError),

    #[error("A submission is already in progress")]
    AlreadySubmitting,
}

impl WorkflowError {
    /// The message shown to the user.
    ///
    /// Server-supplied message first, then the transport error, then a
    /// generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Rejected { status, .. } => {
                format!("Request failed with status code {status}")
            }
            Self::Transport { reason, .. } if !reason.trim().is_empty() => reason.clone(),
            Self::Transport { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Title for the alert dialog.
    pub fn alert_title(&self) -> &'static str {
        match self.stage() {
            Some(Stage::Registration) => "Registration failed",
            Some(Stage::Onboarding) => "Onboarding failed",
            None => "Error",
        }
    }

    /// The remote call this failure belongs to, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Rejected { stage, .. } | Self::Transport { stage, .. } => Some(*stage),
            Self::MissingUserId => Some(Stage::Registration),
            Self::Storage(_) | Self::AlreadySubmitting => None,
        }
    }
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
