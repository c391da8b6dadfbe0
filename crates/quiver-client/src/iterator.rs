//! Synchronous pull iterator over streamed result batches.

use crate::columns::ColumnIndex;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::transport::MessageSource;
use quiver_proto::ColumnDescriptor;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// Invoked exactly once when the iterator reaches a terminal state; the
/// flag is `true` when the stream was closed early or failed, `false` on
/// natural exhaustion.
pub type CloseHook = Box<dyn FnOnce(bool) + Send>;

/// A buffered, single-threaded iterator over a streamed result set.
///
/// The first upstream batch is pulled eagerly in the constructor, so
/// `has_next()` is valid immediately and result metadata (transaction id,
/// query id, column schema) is available before the first record is read.
/// Rows are yielded in server-emission order, within and across batches.
///
/// All pulls happen on the caller's thread; there is no background work
/// and no interior locking.
pub struct TupleIterator {
    source: Box<dyn MessageSource>,
    buffer: VecDeque<Record>,
    index: Arc<ColumnIndex>,
    transaction_id: Option<u64>,
    query_id: Option<u64>,
    exhausted: bool,
    released: bool,
    hook: Option<CloseHook>,
}

impl TupleIterator {
    /// Wrap a message source with no completion hook.
    pub fn new(source: Box<dyn MessageSource>) -> Result<Self> {
        Self::with_close_hook(source, Box::new(|_| {}))
    }

    /// Wrap a message source. The hook fires exactly once per iterator,
    /// on exhaustion, close, or pull failure, so cleanup runs even when
    /// the transport errors mid-stream.
    pub fn with_close_hook(mut source: Box<dyn MessageSource>, hook: CloseHook) -> Result<Self> {
        let mut hook = Some(hook);
        match source.pull() {
            Ok(Some(first)) => {
                let index = Arc::new(ColumnIndex::build(&first.columns));
                debug!(
                    transaction_id = ?first.transaction_id,
                    query_id = ?first.query_id,
                    columns = index.len(),
                    rows = first.rows.len(),
                    "result stream opened"
                );
                let mut buffer = VecDeque::with_capacity(first.rows.len());
                for row in first.rows {
                    match Record::decode(row, Arc::clone(&index)) {
                        Ok(record) => buffer.push_back(record),
                        Err(e) => {
                            if let Some(hook) = hook.take() {
                                hook(true);
                            }
                            source.release();
                            return Err(e);
                        }
                    }
                }
                Ok(Self {
                    source,
                    buffer,
                    index,
                    transaction_id: first.transaction_id,
                    query_id: first.query_id,
                    exhausted: false,
                    released: false,
                    hook,
                })
            }
            Ok(None) => {
                // Degenerate stream with no messages at all: terminal from
                // the start, hook still fires exactly once.
                if let Some(hook) = hook.take() {
                    hook(false);
                }
                source.release();
                Ok(Self {
                    source,
                    buffer: VecDeque::new(),
                    index: Arc::new(ColumnIndex::build(&[])),
                    transaction_id: None,
                    query_id: None,
                    exhausted: true,
                    released: true,
                    hook,
                })
            }
            Err(e) => {
                if let Some(hook) = hook.take() {
                    hook(true);
                }
                source.release();
                Err(e)
            }
        }
    }

    /// Transaction id from the first response batch, if any.
    pub fn transaction_id(&self) -> Option<u64> {
        self.transaction_id
    }

    /// Query id from the first response batch, if any.
    pub fn query_id(&self) -> Option<u64> {
        self.query_id
    }

    /// Column schema of the result set, captured from the first batch.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        self.index.descriptors()
    }

    /// Number of columns; 0 for an empty result set.
    pub fn column_count(&self) -> usize {
        self.index.len()
    }

    /// Whether another record is available, pulling and decoding the next
    /// upstream batch if the buffer is empty.
    pub fn has_next(&mut self) -> Result<bool> {
        self.refill()
    }

    /// The next record in server-emission order.
    ///
    /// Fails with [`Error::IteratorDrained`] once the stream is exhausted;
    /// `has_next()` should be checked first.
    pub fn try_next(&mut self) -> Result<Record> {
        if self.refill()? {
            self.buffer.pop_front().ok_or(Error::IteratorDrained)
        } else {
            Err(Error::IteratorDrained)
        }
    }

    /// Close the stream early. Fires the completion hook with the aborted
    /// flag set, unless it already fired; safe to call repeatedly.
    pub fn close(&mut self) {
        if self.hook.is_some() {
            debug!("result stream closed before exhaustion");
        }
        self.buffer.clear();
        self.finish(true);
    }

    fn refill(&mut self) -> Result<bool> {
        while self.buffer.is_empty() {
            if self.exhausted {
                return Ok(false);
            }
            match self.source.pull() {
                Ok(Some(message)) => {
                    // A mid-stream batch may carry zero rows; keep pulling.
                    for row in message.rows {
                        let record = Record::decode(row, Arc::clone(&self.index))?;
                        self.buffer.push_back(record);
                    }
                }
                Ok(None) => {
                    debug!("result stream exhausted");
                    self.finish(false);
                    return Ok(false);
                }
                Err(e) => {
                    self.finish(true);
                    return Err(e);
                }
            }
        }
        Ok(true)
    }

    fn finish(&mut self, aborted: bool) {
        self.exhausted = true;
        if let Some(hook) = self.hook.take() {
            hook(aborted);
        }
        if !self.released {
            self.source.release();
            self.released = true;
        }
    }
}

impl Iterator for TupleIterator {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.refill() {
            Ok(true) => self.buffer.pop_front().map(Ok),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl Drop for TupleIterator {
    fn drop(&mut self) {
        self.finish(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use quiver_proto::{FieldKind, FieldPayload, QueryResponse, RowPayload};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        messages: VecDeque<Result<QueryResponse>>,
        releases: Arc<AtomicUsize>,
    }

    impl StubSource {
        fn new(messages: Vec<Result<QueryResponse>>) -> (Box<dyn MessageSource>, Arc<AtomicUsize>) {
            let releases = Arc::new(AtomicUsize::new(0));
            (
                Box::new(Self {
                    messages: messages.into(),
                    releases: Arc::clone(&releases),
                }),
                releases,
            )
        }
    }

    impl MessageSource for StubSource {
        fn pull(&mut self) -> Result<Option<QueryResponse>> {
            self.messages.pop_front().transpose()
        }

        fn release(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn hook_recorder() -> (CloseHook, Arc<Mutex<Vec<bool>>>) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let handle = Arc::clone(&fired);
        (Box::new(move |aborted| handle.lock().push(aborted)), fired)
    }

    fn batch(ids: &[i64], with_schema: bool) -> QueryResponse {
        QueryResponse {
            transaction_id: with_schema.then_some(11),
            query_id: with_schema.then_some(42),
            columns: if with_schema {
                vec![quiver_proto::ColumnDescriptor::new(
                    "s.t.id",
                    "id",
                    FieldKind::Int64,
                )]
            } else {
                Vec::new()
            },
            rows: ids
                .iter()
                .map(|id| RowPayload::new(vec![FieldPayload::Int64(*id)]))
                .collect(),
        }
    }

    #[test]
    fn test_rows_across_batches_in_order() {
        let (source, releases) = StubSource::new(vec![
            Ok(batch(&[1, 2], true)),
            Ok(batch(&[], false)),
            Ok(batch(&[3], false)),
        ]);
        let (hook, fired) = hook_recorder();
        let mut iter = TupleIterator::with_close_hook(source, hook).unwrap();

        assert_eq!(iter.transaction_id(), Some(11));
        assert_eq!(iter.query_id(), Some(42));

        let mut seen = Vec::new();
        while iter.has_next().unwrap() {
            seen.push(iter.try_next().unwrap().as_i64("id").unwrap().unwrap());
        }
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(*fired.lock(), vec![false]);
        assert_eq!(releases.load(Ordering::SeqCst), 1);

        // Repeated calls after exhaustion stay terminal and quiet.
        assert!(!iter.has_next().unwrap());
        assert!(matches!(iter.try_next(), Err(Error::IteratorDrained)));
        assert_eq!(*fired.lock(), vec![false]);
    }

    #[test]
    fn test_empty_result_set() {
        let (source, _) = StubSource::new(vec![Ok(batch(&[], true))]);
        let (hook, fired) = hook_recorder();
        let mut iter = TupleIterator::with_close_hook(source, hook).unwrap();
        assert_eq!(iter.column_count(), 1);
        assert!(!iter.has_next().unwrap());
        assert_eq!(*fired.lock(), vec![false]);
    }

    #[test]
    fn test_stream_with_no_messages() {
        let (source, releases) = StubSource::new(vec![]);
        let (hook, fired) = hook_recorder();
        let mut iter = TupleIterator::with_close_hook(source, hook).unwrap();
        assert_eq!(iter.column_count(), 0);
        assert!(!iter.has_next().unwrap());
        assert_eq!(*fired.lock(), vec![false]);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_close_is_idempotent() {
        let (source, releases) = StubSource::new(vec![Ok(batch(&[1, 2], true))]);
        let (hook, fired) = hook_recorder();
        let mut iter = TupleIterator::with_close_hook(source, hook).unwrap();

        iter.close();
        assert_eq!(*fired.lock(), vec![true]);
        iter.close();
        assert_eq!(*fired.lock(), vec![true]);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
        assert!(!iter.has_next().unwrap());
    }

    #[test]
    fn test_close_after_exhaustion_does_not_refire() {
        let (source, _) = StubSource::new(vec![Ok(batch(&[1], true))]);
        let (hook, fired) = hook_recorder();
        let mut iter = TupleIterator::with_close_hook(source, hook).unwrap();
        while iter.has_next().unwrap() {
            iter.try_next().unwrap();
        }
        assert_eq!(*fired.lock(), vec![false]);
        iter.close();
        assert_eq!(*fired.lock(), vec![false]);
    }

    #[test]
    fn test_transport_error_fires_hook_then_propagates() {
        let (source, releases) = StubSource::new(vec![
            Ok(batch(&[1], true)),
            Err(Error::Transport("connection reset".to_string())),
        ]);
        let (hook, fired) = hook_recorder();
        let mut iter = TupleIterator::with_close_hook(source, hook).unwrap();

        assert_eq!(iter.try_next().unwrap().as_i64("id").unwrap(), Some(1));
        match iter.try_next() {
            Err(Error::Transport(message)) => assert_eq!(message, "connection reset"),
            other => panic!("expected transport failure, got {other:?}"),
        }
        assert_eq!(*fired.lock(), vec![true]);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_without_iterating_fires_aborted() {
        let (source, releases) = StubSource::new(vec![Ok(batch(&[1], true))]);
        let (hook, fired) = hook_recorder();
        let iter = TupleIterator::with_close_hook(source, hook).unwrap();
        drop(iter);
        assert_eq!(*fired.lock(), vec![true]);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_for_loop_adapter() {
        let (source, _) = StubSource::new(vec![Ok(batch(&[1, 2], true)), Ok(batch(&[3], false))]);
        let iter = TupleIterator::new(source).unwrap();
        let ids: Vec<i64> = iter
            .map(|record| record.unwrap().as_i64("id").unwrap().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
