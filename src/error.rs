//! CLI error types.
//!
//! Usage errors are owned by clap and never reach this enum. Remote failures
//! stay as [`crate::obs::ObsError`] and get wrapped with `anyhow::Context` by
//! the handler that issued the call.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Transport or authentication failure while opening the session.
    #[error("failed to connect to OBS at {endpoint}: {reason}")]
    Connection { endpoint: String, reason: String },

    /// A lookup-by-name found nothing.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// Argument rejected before any remote call.
    #[error("{0}")]
    Validation(String),

    /// OBS is not in a state where the command makes sense.
    #[error("{0}")]
    InvalidState(String),

    /// Malformed time string.
    #[error("invalid time '{input}': {reason}")]
    Format { input: String, reason: String },
}

impl CliError {
    pub fn connection(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::Connection {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
