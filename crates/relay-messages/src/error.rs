//! Error types for relay-messages

use crate::{Action, Field};

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing, resolving or rendering messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Wire text could not be turned into a usable message
    #[error("Malformed message: {reason}")]
    MalformedMessage { reason: String },

    /// Action name outside the protocol, usually a version mismatch between agents
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// A template was rendered without one of its required fields
    #[error("Cannot render '{action}': missing required field {field}")]
    MissingField { action: Action, field: Field },

    /// A value line would be read back as a separate field or a fence
    #[error("Cannot render '{action}': {field} line {line:?} would be read as a separate field")]
    AmbiguousValue {
        action: Action,
        field: Field,
        line: String,
    },
}

impl Error {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMessage {
            reason: reason.into(),
        }
    }
}
