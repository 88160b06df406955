//! Prediction collaborator failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every way the terminal prediction call can fail.
///
/// These are returned as data, never raised: the caller renders
/// [`PredictionError::message`] in place of the expected result.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictionError {
    /// A value the request needs was not collected.
    #[error("Cannot request a prediction: '{field}' is missing")]
    MissingValue { field: String },

    /// Timeout, refused connection, DNS failure, ...
    #[error("Could not reach the prediction service: {message}")]
    Network { message: String, timed_out: bool },

    /// Non-success HTTP status
    #[error("Prediction service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not the JSON object we expect
    #[error("Prediction service sent an unreadable response: {message}")]
    Malformed { message: String },

    /// Body carried an explicit error indicator.
    #[error("Prediction service reported an error: {message}")]
    Remote { message: String },
}

impl PredictionError {
    pub fn missing_value(field: impl Into<String>) -> Self {
        Self::MissingValue {
            field: field.into(),
        }
    }

    pub fn network(message: impl Into<String>, timed_out: bool) -> Self {
        Self::Network {
            message: message.into(),
            timed_out,
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// User-facing message; never empty.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { timed_out: true, .. })
    }

    /// Whether re-issuing the same request could plausibly succeed.
    ///
    /// Network failures, 429 and 5xx statuses are retryable; everything else
    /// would fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}
