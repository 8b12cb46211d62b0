//! Error types for relay-agents

use std::path::PathBuf;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by external collaborators
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while configuring agents or handling messages
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required configuration value is missing or invalid
    #[error("Configuration error: {key}: {message}")]
    Configuration { key: String, message: String },

    /// Protocol error: malformed text, unknown action or missing field
    #[error(transparent)]
    Message(#[from] relay_messages::Error),

    /// I/O error at a specific path
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file exists but could not be parsed
    #[error("Failed to parse settings at {path}: {message}")]
    Settings { path: PathBuf, message: String },

    /// The step list could not be loaded
    #[error("Failed to load steps from {path}: {message}")]
    Steps { path: PathBuf, message: String },

    /// An external collaborator (search, crawler, embeddings, inferer) failed
    #[error("{collaborator} failed: {source}")]
    Collaborator {
        collaborator: &'static str,
        #[source]
        source: CollaboratorError,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn configuration(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn collaborator(collaborator: &'static str, source: CollaboratorError) -> Self {
        Self::Collaborator {
            collaborator,
            source,
        }
    }
}
