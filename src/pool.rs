//! Callback contract between a connection pool and a database adapter.
//!
//! The pool owns scheduling: it decides when to connect, when a session is
//! handed to a caller and when a broken session is recycled. The adapter
//! only answers the callbacks below. A session is driven by one caller at a
//! time; every callback takes `&mut self` and adapters are not required to
//! be `Sync`.
//!
//! Statement lifecycle, as driven by the pool:
//!
//! ```text
//! handle_prepare -> handle_declare -> handle_first -> handle_next* -> handle_deallocate -> handle_close
//! ```

use std::fmt;
use std::future::Future;

use crate::error::Result;
use crate::executor::{RowMapper, Value};

// ============================================================================
// Options
// ============================================================================

/// How `begin`/`rollback` scope a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionMode {
    /// Top-level transaction
    #[default]
    Transaction,
    /// Named nested scope
    Savepoint,
}

/// Options for `handle_begin`, `handle_commit` and `handle_rollback`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionOptions {
    pub mode: TransactionMode,
    /// Savepoint name; only used in savepoint mode
    pub name: Option<String>,
}

impl TransactionOptions {
    /// Top-level transaction options.
    pub fn transaction() -> Self {
        Self::default()
    }

    /// Savepoint mode with an optional explicit name.
    pub fn savepoint(name: Option<&str>) -> Self {
        Self {
            mode: TransactionMode::Savepoint,
            name: name.map(str::to_string),
        }
    }
}

/// Options for statement callbacks.
#[derive(Clone, Default)]
pub struct QueryOptions {
    /// Applied to every decoded row
    pub mapper: Option<RowMapper>,
}

impl QueryOptions {
    /// Set a row mapper.
    pub fn mapper(mut self, mapper: RowMapper) -> Self {
        self.mapper = Some(mapper);
        self
    }
}

impl fmt::Debug for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryOptions")
            .field("mapper", &self.mapper.is_some())
            .finish()
    }
}

// ============================================================================
// Callback results
// ============================================================================

/// Outcome of a fetch callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    /// Here is the result; no further rows exist, deallocate the cursor.
    Deallocate(T),
    /// Nothing left to fetch; deallocate the cursor.
    Exhausted,
}

impl<T> Fetch<T> {
    /// Get the fetched result, if any.
    pub fn into_result(self) -> Option<T> {
        match self {
            Fetch::Deallocate(result) => Some(result),
            Fetch::Exhausted => None,
        }
    }

    /// Check if this fetch carried no result.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Fetch::Exhausted)
    }
}

/// Transaction status reported to the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Idle (not in a transaction block)
    Idle,
    /// In a transaction block
    InTransaction,
    /// In a failed transaction block
    Failed,
}

// ============================================================================
// Contract
// ============================================================================

/// The callbacks a pool uses to drive one database session.
pub trait PoolConnection: Sized + Send {
    /// Connection configuration
    type Config: Sync;
    /// Prepared statement
    type Statement: Send + Sync;
    /// Per-execution cursor state
    type Cursor: Send;
    /// Result of executing a statement
    type Output;

    /// Open a new session.
    fn connect(config: &Self::Config) -> impl Future<Output = Result<Self>> + Send;

    /// Close the session. `reason` is the error that made the pool give up on it.
    fn disconnect(self, reason: &crate::error::AdapterError) -> impl Future<Output = ()> + Send;

    /// The session is being handed to a caller.
    fn checkout(&mut self) -> Result<()>;

    /// The session is being returned to the pool.
    fn checkin(&mut self) -> Result<()>;

    /// Liveness check. Failure is always `AdapterError::Disconnect`.
    fn ping(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Current transaction status.
    fn handle_status(&self) -> TransactionStatus;

    fn handle_begin(
        &mut self,
        opts: &TransactionOptions,
    ) -> impl Future<Output = Result<Self::Output>> + Send;

    fn handle_commit(
        &mut self,
        opts: &TransactionOptions,
    ) -> impl Future<Output = Result<Self::Output>> + Send;

    fn handle_rollback(
        &mut self,
        opts: &TransactionOptions,
    ) -> impl Future<Output = Result<Self::Output>> + Send;

    fn handle_prepare(
        &mut self,
        statement: Self::Statement,
        opts: &QueryOptions,
    ) -> Result<Self::Statement>;

    fn handle_declare(
        &mut self,
        statement: &Self::Statement,
        params: Vec<Value>,
        opts: &QueryOptions,
    ) -> Result<Self::Cursor>;

    fn handle_first(
        &mut self,
        statement: &Self::Statement,
        cursor: &mut Self::Cursor,
        opts: &QueryOptions,
    ) -> impl Future<Output = Result<Fetch<Self::Output>>> + Send;

    fn handle_next(
        &mut self,
        statement: &Self::Statement,
        cursor: &mut Self::Cursor,
        opts: &QueryOptions,
    ) -> impl Future<Output = Result<Fetch<Self::Output>>> + Send;

    fn handle_deallocate(
        &mut self,
        statement: &Self::Statement,
        cursor: &mut Self::Cursor,
        opts: &QueryOptions,
    ) -> Result<()>;

    fn handle_close(
        &mut self,
        statement: &Self::Statement,
        cursor: &mut Self::Cursor,
        opts: &QueryOptions,
    ) -> Result<()>;

    /// Run a statement once without a cursor.
    fn handle_execute(
        &mut self,
        statement: &Self::Statement,
        params: Vec<Value>,
        opts: &QueryOptions,
    ) -> impl Future<Output = Result<Self::Output>> + Send;
}
