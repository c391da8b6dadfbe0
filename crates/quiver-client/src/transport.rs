//! Transport seams the client builds on.
//!
//! Channel setup, TLS negotiation, and pooling live behind these traits;
//! the client only ever sees a pull-style message source for reads and a
//! duplex stream plus acknowledgment callbacks for batched writes.

use crate::error::Result;
use quiver_proto::{EntityRef, QueryRequest, QueryResponse, RowInsert};
use std::sync::Arc;

/// Pull side of a streamed result set.
///
/// `pull` returns `Ok(None)` once the upstream is exhausted; any transport
/// error must surface as `Err` from the same call, never asynchronously.
pub trait MessageSource: Send {
    fn pull(&mut self) -> Result<Option<QueryResponse>>;

    /// Drop the underlying stream handle. Called exactly once by the
    /// iterator, on exhaustion, close, or pull failure.
    fn release(&mut self);
}

/// Send side of a batch insert stream.
pub trait BatchStream: Send {
    fn send(&mut self, row: RowInsert) -> Result<()>;

    /// Signal end-of-writes with commit semantics.
    fn commit(&mut self) -> Result<()>;

    /// Signal cancellation; every write on this stream is discarded.
    fn abort(&mut self) -> Result<()>;
}

/// Callbacks a transport invokes from its I/O thread as the server
/// acknowledges a batch stream. Each `on_ack` accounts for exactly one
/// accepted row; `on_completed`/`on_error` are terminal and fire once.
pub trait AckObserver: Send + Sync {
    fn on_ack(&self);
    fn on_completed(&self);
    fn on_error(&self, message: &str);
}

/// An established connection able to open RPC streams from fully formed
/// request messages.
pub trait Connection {
    /// Open a (possibly multi-batch) result stream for a statement.
    fn query(&mut self, request: QueryRequest) -> Result<Box<dyn MessageSource>>;

    /// Open a batch insert stream against a target entity, wiring the
    /// given observer to the server's acknowledgment channel.
    fn batch_insert(
        &mut self,
        target: EntityRef,
        observer: Arc<dyn AckObserver>,
    ) -> Result<Box<dyn BatchStream>>;
}
