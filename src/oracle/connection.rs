//! Oracle session handling.
//!
//! This module provides the connection type that handles:
//! - Starting and stopping the wire client session
//! - Liveness checks
//! - Statement execution and reply classification

use std::cell::Cell;
use std::marker::PhantomData;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::client::{Bind, WireClient, WireReply};
use super::config::{OracleConfig, StartupParams};
use super::error::{ErrorRecord, OraError, OraResult};
use super::types::WireValue;
use crate::executor::{ResultSet, Response};

/// Statement used to check that a session is alive.
pub const PING_SQL: &str = "SELECT 1 FROM DUAL";

// ============================================================================
// Session
// ============================================================================

/// A live wire client session.
///
/// Exactly one caller drives a session at a time; the pool guarantees this
/// and the type enforces the local half of it: a `Session` can move between
/// threads but cannot be shared between them.
pub struct Session<C> {
    client: C,
    timeout: Duration,
    _single_owner: PhantomData<Cell<()>>,
}

impl<C: WireClient> Session<C> {
    fn new(client: C, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            _single_owner: PhantomData,
        }
    }
}

// ============================================================================
// Connection
// ============================================================================

/// An Oracle connection driven through an external wire client.
pub struct OracleConnection<C: WireClient> {
    session: Session<C>,
}

impl<C: WireClient> OracleConnection<C> {
    /// Start a new session.
    pub async fn connect(config: &OracleConfig) -> OraResult<Self> {
        let params = StartupParams::from_config(config)?;
        debug!(
            host = %params.host,
            port = params.port,
            service = ?params.service,
            user = %params.user,
            "Starting Oracle session"
        );

        let timeout = params.timeout;
        let client = C::start_link(params).await.map_err(|e| {
            warn!(host = %config.hostname, error = %e, "Failed to start Oracle session");
            e
        })?;

        Ok(Self {
            session: Session::new(client, timeout),
        })
    }

    /// Stop the session. Always succeeds.
    pub async fn disconnect(mut self) {
        debug!("Stopping Oracle session");
        self.session.client.stop().await;
    }

    /// Acknowledge a checkout; no round trip.
    pub fn checkout(&mut self) -> OraResult<()> {
        trace!("Session checked out");
        Ok(())
    }

    /// Acknowledge a checkin; no round trip.
    pub fn checkin(&mut self) -> OraResult<()> {
        trace!("Session checked in");
        Ok(())
    }

    /// Run a trivial statement, bounded by the session timeout.
    pub async fn ping(&mut self) -> OraResult<()> {
        let timeout = self.session.timeout;
        match tokio::time::timeout(timeout, self.execute(PING_SQL, Vec::new())).await {
            Ok(result) => result.map(|_| ()),
            Err(_) => Err(OraError::Timeout),
        }
    }

    /// Send a statement to the wire client and classify the reply.
    ///
    /// Server-side rejections come back as `OraError::Server`; the session is
    /// untouched by any error and stays with the caller.
    pub async fn execute(&mut self, sql: &str, params: Vec<Bind>) -> OraResult<Response<WireValue>> {
        trace!(sql = sql, params = params.len(), "Executing statement");

        let reply = self.session.client.execute(sql, params).await.map_err(|e| {
            warn!(sql = sql, error = %e, "Wire client failed");
            e
        })?;

        classify(reply).map_err(|e| {
            if let OraError::Server(record) = &e {
                debug!(sql = sql, code = record.code, message = %record.message, "Statement rejected");
            }
            e
        })
    }

    /// Get the session timeout.
    pub fn timeout(&self) -> Duration {
        self.session.timeout
    }

    /// Get the underlying wire client.
    pub fn client(&self) -> &C {
        &self.session.client
    }
}

/// Map a wire reply onto a response or a server error.
pub fn classify(reply: WireReply) -> OraResult<Response<WireValue>> {
    match reply {
        WireReply::ResultSet { columns, rows } => {
            Ok(Response::Rows(ResultSet::with_columns(columns, rows)))
        }
        WireReply::FetchedRows { rows } => Ok(Response::Rows(ResultSet::rows_only(rows))),
        WireReply::ProcResult { code, message } => {
            Err(OraError::Server(ErrorRecord::new(code, message)))
        }
        WireReply::AffectedRows(count) => Ok(Response::Rows(ResultSet::affected(count))),
        WireReply::Other(json) => Ok(Response::Other(json)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_classify_result_set() {
        let response = classify(WireReply::ResultSet {
            columns: vec!["A".to_string(), "B".to_string()],
            rows: vec![smallvec![WireValue::Int(1), WireValue::Null]],
        })
        .unwrap();

        let rs = response.into_result_set().unwrap();
        assert_eq!(rs.columns().map(|c| c.len()), Some(2));
        assert_eq!(rs.row_count(), 1);
        assert_eq!(rs.rows()[0][1], WireValue::Null);
    }

    #[test]
    fn test_classify_rows_without_columns() {
        let response = classify(WireReply::FetchedRows {
            rows: vec![smallvec![WireValue::Int(7)], smallvec![WireValue::Int(8)]],
        })
        .unwrap();

        let rs = response.into_result_set().unwrap();
        assert!(rs.columns().is_none());
        assert_eq!(rs.row_count(), 2);
    }

    #[test]
    fn test_classify_error_shaped_reply() {
        let err = classify(WireReply::ProcResult {
            code: 1476,
            message: "divisor is equal to zero".to_string(),
        })
        .unwrap_err();

        match err {
            OraError::Server(record) => {
                assert_eq!(record.code, 1476);
                assert_eq!(record.message, "divisor is equal to zero");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_classify_row_count_only() {
        let rs = classify(WireReply::AffectedRows(5))
            .unwrap()
            .into_result_set()
            .unwrap();
        assert_eq!(rs.row_count(), 5);
        assert!(rs.rows.is_none());
    }

    #[test]
    fn test_classify_passes_unknown_through() {
        let json = serde_json::json!({"cursor": [1, 2]});
        let response = classify(WireReply::Other(json.clone())).unwrap();
        assert_eq!(response, Response::Other(json));
    }
}
