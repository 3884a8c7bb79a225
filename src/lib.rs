//! Oracle pooled-connection adapter.
//!
//! Lets a generic connection pool drive an Oracle session through the
//! callbacks of [`pool::PoolConnection`]. Network I/O is delegated to an
//! external wire client implementing [`oracle::WireClient`]; this crate maps
//! the pool lifecycle onto savepoint-based transactions and single-shot
//! cursors, and translates values in both directions.

pub mod error;
pub mod executor;
pub mod oracle;
pub mod pool;

pub use error::{AdapterError, Result};
pub use executor::{JsonValue, ResultSet, Response, Row, RowMapper, Tag, Value};
pub use oracle::{OracleConfig, OracleConnection, Statement, WireClient};
pub use pool::{Fetch, PoolConnection, QueryOptions, TransactionMode, TransactionOptions};
