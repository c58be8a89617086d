//! Error types for the card advisor.

use crate::api::Endpoint;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Remote-call failure against the recommendation service.
///
/// Every variant is treated the same by the conversation: logged, then
/// surfaced as one fixed transcript message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {reason}")]
    RequestFailed { endpoint: Endpoint, reason: String },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: Endpoint, reason: String },
}

impl ApiError {
    /// Endpoint the failed call was addressed to.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::RequestFailed { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::InvalidResponse { endpoint, .. } => *endpoint,
        }
    }
}

/// Intake record errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Intake is already complete")]
    AlreadyComplete,

    #[error("Invalid intake step index: {0}")]
    InvalidStep(u8),
}

/// Channel-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Unknown command: {0}")]
    InvalidCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the card advisor.
pub type Result<T> = std::result::Result<T, Error>;
