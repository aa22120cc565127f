//! Crate-wide error type

use thiserror::Error;

/// Errors surfaced by the engine, the store, and the API layer
#[derive(Debug, Error)]
pub enum Error {
    /// Backing store could not read or write a key
    #[error("storage error on key '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored value could not be encoded or decoded
    #[error("serialization error on key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Exercise selector did not match any known exercise
    #[error("unknown exercise '{0}'")]
    UnknownExercise(String),

    /// No active session with this id
    #[error("session '{0}' not found")]
    SessionNotFound(String),

    /// Blocking store work was cancelled or panicked
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    pub fn storage(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage { key: key.into(), source }
    }

    pub fn serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization { key: key.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
