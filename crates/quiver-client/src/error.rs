//! Error types for the QuiverDB client library

use quiver_proto::DecodeError;
use thiserror::Error;

/// Result type alias for QuiverDB client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the QuiverDB client
#[derive(Debug, Error)]
pub enum Error {
    /// A row field carries a kind this client cannot decode
    #[error("unsupported field kind: {kind}")]
    UnsupportedKind { kind: String },

    /// Name-based access against a column absent from the result schema
    #[error("unknown column: {name}")]
    UnknownColumn { name: String },

    /// `try_next()` called after the result stream was exhausted
    #[error("result iterator is drained")]
    IteratorDrained,

    /// Write operation on a batch writer already in a terminal state
    #[error("batch writer is closed")]
    ClosedWriter,

    /// The underlying transport failed while pulling or pushing messages
    #[error("transport failure: {0}")]
    Transport(String),

    /// A wire payload failed to decode
    #[error("decode error: {0}")]
    Decode(DecodeError),

    /// Deserialization of a record into a user type failed
    #[error("failed to deserialize record: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::UnsupportedKind { kind } => Error::UnsupportedKind { kind },
            other => Error::Decode(other),
        }
    }
}
