//! Error types for the RasoiMitra dialogue engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole workspace.
///
/// Dialogue errors (`Validation`, `SessionMisuse`) are what `FlowEngine::submit`
/// returns. Collaborator failures have their own types (`PredictionError`,
/// `TrendsError`) and are reported as data, not through this enum.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RasoiError {
    /// Input rejected by the active slot; the session stays on the same step.
    #[error("Invalid input for '{slot}': {reason}")]
    Validation { slot: String, reason: String },

    /// `submit` was called on a session that already reached its terminal action.
    #[error("Session '{session_id}' is already complete; start a new session")]
    SessionMisuse { session_id: String },

    /// A step definition table failed its construction checks.
    #[error("Invalid step table: {0}")]
    InvalidTable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RasoiError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(slot: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            slot: slot.into(),
            reason: reason.into(),
        }
    }

    /// Creates a SessionMisuse error
    pub fn session_misuse(session_id: impl Into<String>) -> Self {
        Self::SessionMisuse {
            session_id: session_id.into(),
        }
    }

    /// Creates an InvalidTable error
    pub fn invalid_table(message: impl Into<String>) -> Self {
        Self::InvalidTable(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a SessionMisuse error
    pub fn is_session_misuse(&self) -> bool {
        matches!(self, Self::SessionMisuse { .. })
    }

    /// Returns the rejection reason of a Validation error.
    pub fn validation_reason(&self) -> Option<&str> {
        match self {
            Self::Validation { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }
}

/// A type alias for `Result<T, RasoiError>`.
pub type Result<T> = std::result::Result<T, RasoiError>;
