//! Pool callbacks for Oracle connections.
//!
//! Maps the generic pool lifecycle onto the session, transaction and cursor
//! operations of this module, and converts driver errors into the signals a
//! pool acts on.

use tracing::{debug, warn};

use super::client::WireClient;
use super::config::OracleConfig;
use super::connection::OracleConnection;
use super::cursor::Cursor;
use super::statement::Statement;
use super::types::decode_response;
use crate::error::{AdapterError, Result};
use crate::executor::{ResultSet, Response, Value};
use crate::pool::{Fetch, PoolConnection, QueryOptions, TransactionOptions, TransactionStatus};

impl<C: WireClient> PoolConnection for OracleConnection<C> {
    type Config = OracleConfig;
    type Statement = Statement;
    type Cursor = Cursor;
    type Output = Response;

    async fn connect(config: &OracleConfig) -> Result<Self> {
        Ok(OracleConnection::<C>::connect(config).await?)
    }

    async fn disconnect(self, reason: &AdapterError) {
        debug!(reason = %reason, "Disconnecting");
        OracleConnection::<C>::disconnect(self).await
    }

    fn checkout(&mut self) -> Result<()> {
        Ok(OracleConnection::<C>::checkout(self)?)
    }

    fn checkin(&mut self) -> Result<()> {
        Ok(OracleConnection::<C>::checkin(self)?)
    }

    async fn ping(&mut self) -> Result<()> {
        OracleConnection::<C>::ping(self).await.map_err(|e| {
            warn!(error = %e, "Ping failed");
            AdapterError::Disconnect(e.to_string())
        })
    }

    /// Savepoints live on the server; the adapter tracks no transaction state.
    fn handle_status(&self) -> TransactionStatus {
        TransactionStatus::Idle
    }

    async fn handle_begin(&mut self, opts: &TransactionOptions) -> Result<Response> {
        let response = self.begin(opts).await?;
        Ok(decode_response(response, None))
    }

    async fn handle_commit(&mut self, opts: &TransactionOptions) -> Result<Response> {
        let response = self.commit(opts).await?;
        Ok(decode_response(response, None))
    }

    async fn handle_rollback(&mut self, opts: &TransactionOptions) -> Result<Response> {
        let response = self.rollback(opts).await?;
        Ok(decode_response(response, None))
    }

    fn handle_prepare(&mut self, statement: Statement, _opts: &QueryOptions) -> Result<Statement> {
        Ok(statement.prepare())
    }

    fn handle_declare(
        &mut self,
        _statement: &Statement,
        params: Vec<Value>,
        _opts: &QueryOptions,
    ) -> Result<Cursor> {
        Ok(Cursor::declare(params))
    }

    async fn handle_first(
        &mut self,
        statement: &Statement,
        cursor: &mut Cursor,
        opts: &QueryOptions,
    ) -> Result<Fetch<Response>> {
        Ok(self.first(statement, cursor, opts.mapper.as_ref()).await?)
    }

    async fn handle_next(
        &mut self,
        _statement: &Statement,
        cursor: &mut Cursor,
        _opts: &QueryOptions,
    ) -> Result<Fetch<Response>> {
        Ok(cursor.next())
    }

    fn handle_deallocate(
        &mut self,
        _statement: &Statement,
        cursor: &mut Cursor,
        _opts: &QueryOptions,
    ) -> Result<()> {
        cursor.deallocate();
        Ok(())
    }

    fn handle_close(
        &mut self,
        _statement: &Statement,
        cursor: &mut Cursor,
        _opts: &QueryOptions,
    ) -> Result<()> {
        cursor.close();
        Ok(())
    }

    async fn handle_execute(
        &mut self,
        statement: &Statement,
        params: Vec<Value>,
        opts: &QueryOptions,
    ) -> Result<Response> {
        let mut cursor = Cursor::declare(params);
        let fetched = self.first(statement, &mut cursor, opts.mapper.as_ref()).await?;
        cursor.close();
        // A freshly declared cursor always yields its result on the first fetch
        Ok(fetched
            .into_result()
            .unwrap_or_else(|| Response::Rows(ResultSet::affected(0))))
    }
}
