//! Flow-controlled batched writes over a bidirectional stream.

use crate::error::{Error, Result};
use crate::transport::{AckObserver, BatchStream, Connection};
use parking_lot::{Condvar, Mutex};
use quiver_proto::{EntityRef, RowInsert};
use std::sync::Arc;
use tracing::{debug, info};

/// Default bound on writes sent but not yet acknowledged by the server.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
enum Terminal {
    Completed,
    Failed(String),
}

struct FlowState {
    permits: usize,
    terminal: Option<Terminal>,
}

/// Permit pool plus tri-state done flag, shared between the caller's
/// thread and the transport's I/O thread. The condvar serves both the
/// permit wait in `insert` and the terminal wait in `complete`/`abort`;
/// only one caller-thread waiter can exist at a time (`&mut self` API).
struct FlowControl {
    state: Mutex<FlowState>,
    cond: Condvar,
}

impl FlowControl {
    fn new(permits: usize) -> Self {
        Self {
            state: Mutex::new(FlowState {
                permits,
                terminal: None,
            }),
            cond: Condvar::new(),
        }
    }

    /// Take one write permit, blocking while none are free. Fails once
    /// the stream is terminal.
    fn acquire(&self) -> Result<()> {
        let mut state = self.state.lock();
        loop {
            if let Some(terminal) = &state.terminal {
                return Err(terminal_error(terminal));
            }
            if state.permits > 0 {
                state.permits -= 1;
                return Ok(());
            }
            debug!("write permits exhausted, waiting for server acknowledgment");
            self.cond.wait(&mut state);
        }
    }

    fn peek_terminal(&self) -> Option<Terminal> {
        self.state.lock().terminal.clone()
    }

    /// Block until the stream reaches a terminal state.
    fn wait_terminal(&self) -> Terminal {
        let mut state = self.state.lock();
        loop {
            if let Some(terminal) = &state.terminal {
                return terminal.clone();
            }
            self.cond.wait(&mut state);
        }
    }

    fn set_terminal(&self, terminal: Terminal) {
        let mut state = self.state.lock();
        if state.terminal.is_none() {
            state.terminal = Some(terminal);
        }
        drop(state);
        self.cond.notify_all();
    }
}

fn terminal_error(terminal: &Terminal) -> Error {
    match terminal {
        Terminal::Completed => Error::ClosedWriter,
        Terminal::Failed(message) => Error::Transport(message.clone()),
    }
}

impl AckObserver for FlowControl {
    fn on_ack(&self) {
        let mut state = self.state.lock();
        state.permits += 1;
        drop(state);
        self.cond.notify_one();
    }

    fn on_completed(&self) {
        debug!("batch stream acknowledged completion");
        self.set_terminal(Terminal::Completed);
    }

    fn on_error(&self, message: &str) {
        debug!(message, "batch stream terminated with error");
        self.set_terminal(Terminal::Failed(message.to_string()));
    }
}

/// Batched writer with a bounded number of in-flight rows.
///
/// `insert` blocks while the configured number of unacknowledged writes is
/// outstanding, coupling the caller's write rate to server throughput and
/// bounding client-side memory. Acknowledgments arrive on the transport's
/// I/O thread through the [`AckObserver`] handle; each one releases exactly
/// one permit. Acknowledgment order is not correlated with send order.
///
/// The writer reaches a terminal state exactly once (commit acknowledged,
/// abort acknowledged, or transport failure), after which every operation
/// fails.
pub struct BatchInsertClient {
    stream: Box<dyn BatchStream>,
    flow: Arc<FlowControl>,
    closed: bool,
}

impl BatchInsertClient {
    /// Open a batch stream on a connection, bounded to `max_in_flight`
    /// unacknowledged writes.
    pub fn open<C: Connection + ?Sized>(
        connection: &mut C,
        target: EntityRef,
        max_in_flight: usize,
    ) -> Result<Self> {
        let flow = Arc::new(FlowControl::new(max_in_flight));
        let observer: Arc<dyn AckObserver> = flow.clone();
        let stream = connection.batch_insert(target, observer)?;
        info!(%max_in_flight, "batch insert stream opened");
        Ok(Self {
            stream,
            flow,
            closed: false,
        })
    }

    /// Wrap an already open stream. The caller must wire [`observer`]
    /// into the transport's acknowledgment channel.
    ///
    /// [`observer`]: Self::observer
    pub fn new(stream: Box<dyn BatchStream>, max_in_flight: usize) -> Self {
        Self {
            stream,
            flow: Arc::new(FlowControl::new(max_in_flight)),
            closed: false,
        }
    }

    /// Wrap an already open stream with the default in-flight bound.
    pub fn with_defaults(stream: Box<dyn BatchStream>) -> Self {
        Self::new(stream, DEFAULT_MAX_IN_FLIGHT)
    }

    /// The acknowledgment callbacks the transport drives from its I/O
    /// thread.
    pub fn observer(&self) -> Arc<dyn AckObserver> {
        self.flow.clone()
    }

    /// Send one row, blocking until a write permit is available.
    ///
    /// Fails with [`Error::ClosedWriter`] after `complete`/`abort`, or
    /// with the captured transport error if the stream already failed.
    pub fn insert(&mut self, row: RowInsert) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        self.flow.acquire()?;
        self.stream.send(row)
    }

    /// Signal end-of-writes with commit semantics, then block until the
    /// server acknowledges the terminal state.
    pub fn complete(&mut self) -> Result<()> {
        self.finalize(true)
    }

    /// Signal cancellation, discarding every write sent on this stream,
    /// then block until the terminal state is observed.
    pub fn abort(&mut self) -> Result<()> {
        self.finalize(false)
    }

    fn finalize(&mut self, commit: bool) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        self.closed = true;
        // A failure delivered on the ack channel before finalization is
        // observed here, at the next caller-visible operation.
        if let Some(terminal) = self.flow.peek_terminal() {
            return Err(terminal_error(&terminal));
        }
        if commit {
            debug!("committing batch stream");
            self.stream.commit()?;
        } else {
            debug!("aborting batch stream");
            self.stream.abort()?;
        }
        match (commit, self.flow.wait_terminal()) {
            (true, Terminal::Completed) => Ok(()),
            (true, Terminal::Failed(message)) => Err(Error::Transport(message)),
            // An abort is satisfied by either terminal acknowledgment.
            (false, _) => Ok(()),
        }
    }
}
