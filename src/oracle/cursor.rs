//! Single-shot cursors.
//!
//! The wire client returns a query's complete result in one reply, so there
//! is no server-side cursor to page through. A cursor here only carries the
//! bound parameters from `declare` to `first`; `first` runs the statement
//! once and everything after it reports exhaustion.
//!
//! ```text
//! Declared --first--> Fetched --deallocate--> Deallocated --close--> Closed
//! ```
//!
//! Calls in an unexpected state are no-ops rather than errors.

use tracing::{debug, trace};

use super::client::{Bind, WireClient};
use super::connection::OracleConnection;
use super::error::OraResult;
use super::statement::Statement;
use super::types::{decode_response, encode};
use crate::executor::{Response, RowMapper, Value};
use crate::pool::Fetch;

/// Where a cursor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Parameters bound, nothing executed yet
    Declared,
    /// The single fetch has happened
    Fetched,
    Deallocated,
    Closed,
}

/// Per-execution state between `declare` and `close`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    params: Vec<Value>,
    state: CursorState,
}

impl Cursor {
    /// Bind parameters for the upcoming fetch. No round trip.
    pub fn declare(params: Vec<Value>) -> Self {
        Self {
            params,
            state: CursorState::Declared,
        }
    }

    /// Get the current state.
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Get the bound parameters still waiting to be sent.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Report exhaustion; `first` already returned every row.
    pub fn next(&mut self) -> Fetch<Response> {
        if self.state == CursorState::Declared {
            self.state = CursorState::Fetched;
        }
        trace!(state = ?self.state, "Cursor exhausted");
        Fetch::Exhausted
    }

    /// Release the cursor. Nothing is held on the server.
    pub fn deallocate(&mut self) {
        if self.state != CursorState::Closed {
            self.state = CursorState::Deallocated;
        }
        self.params.clear();
    }

    /// Close the cursor.
    pub fn close(&mut self) {
        self.state = CursorState::Closed;
        self.params.clear();
    }
}

/// Positional binds: input parameters first, then the statement's output binds.
pub fn binds(statement: &Statement, params: &[Value]) -> Vec<Bind> {
    params
        .iter()
        .map(|p| Bind::In(encode(p)))
        .chain(statement.returning_binds().iter().map(|&out| Bind::Out(out)))
        .collect()
}

impl<C: WireClient> OracleConnection<C> {
    /// Execute a declared cursor and return its complete result.
    ///
    /// On success the cursor moves to `Fetched` and the caller is told to
    /// deallocate it. On failure it stays `Declared` with its parameters.
    pub async fn first(
        &mut self,
        statement: &Statement,
        cursor: &mut Cursor,
        mapper: Option<&RowMapper>,
    ) -> OraResult<Fetch<Response>> {
        if cursor.state != CursorState::Declared {
            trace!(state = ?cursor.state, "Fetch on spent cursor");
            return Ok(Fetch::Exhausted);
        }

        let response = self
            .execute(statement.sql(), binds(statement, &cursor.params))
            .await?;

        cursor.state = CursorState::Fetched;
        cursor.params.clear();

        let response = decode_response(response, mapper);
        if let Response::Rows(rs) = &response {
            debug!(sql = statement.sql(), rows = rs.row_count(), "Fetched");
        }
        Ok(Fetch::Deallocate(response))
    }
}
