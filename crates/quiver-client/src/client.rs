//! QuiverDB client facade tying builders to open streams.

use crate::error::Result;
use crate::iterator::{CloseHook, TupleIterator};
use crate::query::Select;
use crate::transport::Connection;
use crate::writer::{BatchInsertClient, DEFAULT_MAX_IN_FLIGHT};
use quiver_proto::{EntityRef, QueryRequest};
use tracing::debug;

/// QuiverDB client over an established connection.
///
/// The connection supplies raw RPC streams; the client wraps them in the
/// typed iterator and writer surfaces. Statement builders from
/// [`query`](crate::query) produce the requests.
pub struct Client<C: Connection> {
    connection: C,
}

impl<C: Connection> Client<C> {
    pub fn new(connection: C) -> Self {
        Self { connection }
    }

    /// Execute a SELECT and stream its result set.
    pub fn query(&mut self, select: Select) -> Result<TupleIterator> {
        self.run(select.build())
    }

    /// Execute a SELECT and deserialize every record into a typed struct.
    pub fn query_as<T: serde::de::DeserializeOwned>(&mut self, select: Select) -> Result<Vec<T>> {
        let rows = self.query(select)?;
        rows.map(|record| record.and_then(|record| record.deserialize()))
            .collect()
    }

    /// Open a result stream for any fully formed request.
    pub fn run(&mut self, request: QueryRequest) -> Result<TupleIterator> {
        debug!(transaction_id = ?request.transaction_id, "opening result stream");
        let source = self.connection.query(request)?;
        TupleIterator::new(source)
    }

    /// Like [`run`](Self::run), with a completion hook that fires exactly
    /// once when the stream ends, closes early, or fails.
    pub fn run_with_hook(&mut self, request: QueryRequest, hook: CloseHook) -> Result<TupleIterator> {
        let source = self.connection.query(request)?;
        TupleIterator::with_close_hook(source, hook)
    }

    /// Execute a statement that returns no rows, reporting the affected
    /// row count carried in the single response batch.
    pub fn execute(&mut self, request: QueryRequest) -> Result<u64> {
        let mut rows = self.run(request)?;
        let affected = if rows.has_next()? {
            rows.try_next()?
                .at(0)
                .and_then(|datum| datum.as_i64())
                .map(|count| count.max(0) as u64)
                .unwrap_or(0)
        } else {
            0
        };
        rows.close();
        debug!(affected, "statement executed");
        Ok(affected)
    }

    /// Open a flow-controlled batch insert stream with the default
    /// in-flight bound.
    pub fn batch_insert(&mut self, target: EntityRef) -> Result<BatchInsertClient> {
        self.batch_insert_with_capacity(target, DEFAULT_MAX_IN_FLIGHT)
    }

    /// Open a batch insert stream bounded to `max_in_flight`
    /// unacknowledged writes.
    pub fn batch_insert_with_capacity(
        &mut self,
        target: EntityRef,
        max_in_flight: usize,
    ) -> Result<BatchInsertClient> {
        BatchInsertClient::open(&mut self.connection, target, max_in_flight)
    }
}
