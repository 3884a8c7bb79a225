//! Error types surfaced to the pool framework.
//!
//! Every variant leaves the session with the caller; the variant tells the
//! framework whether it is still worth using.

use thiserror::Error;

use crate::oracle::error::{ErrorRecord, OraError};

#[derive(Error, Debug)]
pub enum AdapterError {
    /// Transport or session failure. The session should be disconnected.
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// Statement rejected by the server. The session is still usable.
    #[error("Query execution error: {0}")]
    ServerError(ErrorRecord),

    /// Liveness check failed. The framework should recycle the session.
    #[error("Disconnected: {0}")]
    Disconnect(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AdapterError {
    /// Whether the session can keep serving statements after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AdapterError::ServerError(_))
    }

    /// Whether this is a disconnect signal.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, AdapterError::Disconnect(_))
    }

    /// The server's error record, if the server rejected a statement.
    pub fn server_error(&self) -> Option<&ErrorRecord> {
        match self {
            AdapterError::ServerError(record) => Some(record),
            _ => None,
        }
    }
}

impl From<OraError> for AdapterError {
    fn from(err: OraError) -> AdapterError {
        match err {
            OraError::Server(record) => AdapterError::ServerError(record),
            OraError::Config(msg) => AdapterError::ConfigError(msg),
            other => AdapterError::ConnectionError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
