//! Transaction control through savepoints.
//!
//! Oracle opens a transaction implicitly with the first DML statement, so
//! `begin` only marks a savepoint to roll back to. A top-level transaction
//! uses the fixed savepoint `tran`; savepoint mode uses the caller's name.
//! `COMMIT` always ends the whole transaction, whatever the nesting.

use tracing::debug;

use super::client::WireClient;
use super::connection::OracleConnection;
use super::error::OraResult;
use super::types::WireValue;
use crate::executor::Response;
use crate::pool::{TransactionMode, TransactionOptions};

/// Savepoint that marks the start of a top-level transaction
pub const TRANSACTION_SAVEPOINT: &str = "tran";

/// Savepoint name used in savepoint mode when none is given
pub const DEFAULT_SAVEPOINT: &str = "svpt";

/// Savepoint targeted by `begin` and `rollback` for these options.
pub fn savepoint_name(opts: &TransactionOptions) -> &str {
    match opts.mode {
        TransactionMode::Transaction => TRANSACTION_SAVEPOINT,
        TransactionMode::Savepoint => opts.name.as_deref().unwrap_or(DEFAULT_SAVEPOINT),
    }
}

/// SQL issued by `begin`.
pub fn begin_sql(opts: &TransactionOptions) -> String {
    format!("SAVEPOINT {}", savepoint_name(opts))
}

/// SQL issued by `commit`.
pub fn commit_sql(_opts: &TransactionOptions) -> &'static str {
    "COMMIT"
}

/// SQL issued by `rollback`.
pub fn rollback_sql(opts: &TransactionOptions) -> String {
    format!("ROLLBACK TO {}", savepoint_name(opts))
}

impl<C: WireClient> OracleConnection<C> {
    /// Mark the start of a transaction or nested scope.
    pub async fn begin(&mut self, opts: &TransactionOptions) -> OraResult<Response<WireValue>> {
        let sql = begin_sql(opts);
        debug!(mode = ?opts.mode, sql = %sql, "Begin");
        self.execute(&sql, Vec::new()).await
    }

    /// Commit the whole transaction.
    pub async fn commit(&mut self, opts: &TransactionOptions) -> OraResult<Response<WireValue>> {
        debug!(mode = ?opts.mode, "Commit");
        self.execute(commit_sql(opts), Vec::new()).await
    }

    /// Roll back to the savepoint set by the matching `begin`.
    pub async fn rollback(&mut self, opts: &TransactionOptions) -> OraResult<Response<WireValue>> {
        let sql = rollback_sql(opts);
        debug!(mode = ?opts.mode, sql = %sql, "Rollback");
        self.execute(&sql, Vec::new()).await
    }
}
