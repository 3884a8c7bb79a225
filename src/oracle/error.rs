//! Error types for the Oracle adapter.

use std::fmt;
use std::io;

/// Result type for Oracle adapter operations.
pub type OraResult<T> = Result<T, OraError>;

/// A statement rejected by the server.
///
/// This is a value, not a transport failure: the session that produced it is
/// still usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Oracle error number (e.g. 1476 for ORA-01476)
    pub code: i64,
    /// Server message text
    pub message: String,
}

impl ErrorRecord {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORA-{:05}: {}", self.code, self.message)
    }
}

/// Errors that can occur while talking to the wire client.
#[derive(Debug)]
pub enum OraError {
    /// I/O error during communication.
    Io(io::Error),

    /// The wire client reported a session-level failure.
    Transport(String),

    /// Server rejected the statement.
    Server(ErrorRecord),

    /// Invalid connection configuration.
    Config(String),

    /// Timeout waiting for response.
    Timeout,

    /// Session is closed or was never started.
    ConnectionClosed,
}

impl OraError {
    /// Whether the session survives this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, OraError::Server(_))
    }
}

impl fmt::Display for OraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OraError::Io(e) => write!(f, "I/O error: {}", e),
            OraError::Transport(msg) => write!(f, "Transport error: {}", msg),
            OraError::Server(record) => write!(f, "{}", record),
            OraError::Config(msg) => write!(f, "Configuration error: {}", msg),
            OraError::Timeout => write!(f, "Operation timed out"),
            OraError::ConnectionClosed => write!(f, "Connection is closed"),
        }
    }
}

impl std::error::Error for OraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OraError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for OraError {
    fn from(e: io::Error) -> Self {
        OraError::Io(e)
    }
}

impl From<ErrorRecord> for OraError {
    fn from(record: ErrorRecord) -> Self {
        OraError::Server(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_record_display() {
        let record = ErrorRecord::new(1476, "divisor is equal to zero");
        assert_eq!(record.to_string(), "ORA-01476: divisor is equal to zero");
    }

    #[test]
    fn test_only_server_errors_are_recoverable() {
        assert!(OraError::Server(ErrorRecord::new(942, "table or view does not exist")).is_recoverable());
        assert!(!OraError::Timeout.is_recoverable());
        assert!(!OraError::ConnectionClosed.is_recoverable());
        assert!(!OraError::Transport("socket closed".into()).is_recoverable());
    }
}
