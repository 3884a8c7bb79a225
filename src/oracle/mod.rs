//! Oracle adapter over an external wire client.
//!
//! The wire client speaks the network protocol; this module supplies
//! everything a pool needs on top of it:
//! - Session start/stop, liveness checks and reply classification
//! - Savepoint-based transaction control
//! - Single-shot cursors
//! - The value codec between host values and wire values
//!
//! Architecture:
//! - `client`: Contract with the external wire client
//! - `config`: Connection configuration and startup parameters
//! - `connection`: Session handling and statement execution
//! - `transaction`: Savepoint-based begin/commit/rollback
//! - `statement`: Prepared statements
//! - `cursor`: Single-shot cursor state machine
//! - `types`: Value encoding/decoding
//! - `pool`: Pool callback implementation

pub mod client;
pub mod config;
pub mod connection;
pub mod cursor;
pub mod error;
pub mod pool;
pub mod statement;
pub mod transaction;
pub mod types;


pub use client::{Bind, OutBind, WireClient, WireReply};
pub use config::{OracleConfig, ServiceMethod, SocketOption, StartupParams};
pub use connection::{OracleConnection, Session};
pub use cursor::{Cursor, CursorState};
pub use error::{ErrorRecord, OraError, OraResult};
pub use statement::Statement;
pub use types::{WireTime, WireValue};
