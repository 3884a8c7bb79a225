//! Contract with the external wire client.
//!
//! The wire client owns the TCP session, the authentication handshake and
//! statement execution. This crate only starts it, stops it and hands it
//! statements; everything it sends back is described by [`WireReply`].

use std::future::Future;

use super::config::StartupParams;
use super::error::OraResult;
use super::types::WireValue;
use crate::executor::{JsonValue, Row};

/// Kind of an output-bound ("returning") parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutBind {
    Number,
    Text,
    Date,
    Binary,
}

/// One positional parameter as sent to the wire client.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    /// Input value
    In(WireValue),
    /// Output placeholder filled in by the server
    Out(OutBind),
}

/// A successful reply from the wire client.
///
/// Server-side statement failures also arrive here, as `ProcResult`; only
/// session-level failures are reported through `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum WireReply {
    /// Query result with column names
    ResultSet {
        columns: Vec<String>,
        rows: Vec<Row<WireValue>>,
    },
    /// Rows without column names (DML returning, procedure output)
    FetchedRows { rows: Vec<Row<WireValue>> },
    /// Statement rejected by the server
    ProcResult { code: i64, message: String },
    /// Row count only
    AffectedRows(u64),
    /// Any other reply shape
    Other(JsonValue),
}

/// The session API of the external wire client.
///
/// Implementations are not required to be `Sync`: the pool framework hands a
/// session to one caller at a time.
pub trait WireClient: Send + Sized {
    /// Open a session.
    fn start_link(params: StartupParams) -> impl Future<Output = OraResult<Self>> + Send;

    /// Close the session. Never fails from the caller's point of view.
    fn stop(&mut self) -> impl Future<Output = ()> + Send;

    /// Run one statement with positional parameters.
    fn execute(
        &mut self,
        sql: &str,
        params: Vec<Bind>,
    ) -> impl Future<Output = OraResult<WireReply>> + Send;
}
