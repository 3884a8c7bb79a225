//! Prepared statements.
//!
//! The wire client parses statements itself on every execute, so preparing
//! is purely local: a `Statement` is the SQL text plus the output binds it
//! expects, and preparing it again hands back the very same statement.

use std::sync::Arc;

use super::client::OutBind;

/// A statement ready to be declared and fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// The SQL query text, shared between clones
    sql: Arc<str>,
    /// Output binds sent after the input parameters
    returning: Vec<OutBind>,
}

impl Statement {
    /// Create a new statement.
    pub fn new(sql: impl Into<Arc<str>>) -> Self {
        Self {
            sql: sql.into(),
            returning: Vec::new(),
        }
    }

    /// Set the output binds (`RETURNING ... INTO :n`).
    pub fn returning(mut self, binds: impl IntoIterator<Item = OutBind>) -> Self {
        self.returning = binds.into_iter().collect();
        self
    }

    /// Prepare the statement. Preparing a prepared statement returns it unchanged.
    #[inline]
    pub fn prepare(self) -> Self {
        self
    }

    /// Get the SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Get the output binds.
    pub fn returning_binds(&self) -> &[OutBind] {
        &self.returning
    }

    /// Check if two handles refer to the same prepared text.
    pub fn same_as(&self, other: &Statement) -> bool {
        Arc::ptr_eq(&self.sql, &other.sql)
    }
}

impl From<&str> for Statement {
    fn from(sql: &str) -> Self {
        Statement::new(sql)
    }
}

impl From<String> for Statement {
    fn from(sql: String) -> Self {
        Statement::new(sql)
    }
}
