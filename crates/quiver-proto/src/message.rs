//! Request, response, and batch-stream messages.
//!
//! Every type here is plain serde data; transports frame them with the
//! MessagePack helpers at the bottom of the module. Result metadata
//! (`transaction_id`, `query_id`, column descriptors) is only meaningful on
//! the first response batch of a result set.

use crate::ident::{ColumnRef, EntityRef};
use crate::kind::FieldKind;
use crate::statement::Statement;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// One column of a result schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Fully qualified `schema.entity.column` spelling. Always unique
    /// within a result set.
    pub qualified: String,
    /// Bare column name. May collide across joined entities.
    pub name: String,
    /// Declared kind of the column.
    pub declared: FieldKind,
}

impl ColumnDescriptor {
    pub fn new(qualified: impl Into<String>, name: impl Into<String>, declared: FieldKind) -> Self {
        Self {
            qualified: qualified.into(),
            name: name.into(),
            declared,
        }
    }
}

/// A kind-tagged field payload as it crosses the wire.
///
/// Dates travel as integer epoch milliseconds; complex kinds travel as
/// `(re, im)` pairs. `Extension` preserves a kind this client version does
/// not know; transports pass it through and decoding refuses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldPayload {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Blob(Vec<u8>),
    Date(i64),
    Complex32(f32, f32),
    Complex64(f64, f64),
    BooleanVector(Vec<bool>),
    Int8Vector(Vec<i8>),
    Int16Vector(Vec<i16>),
    Int32Vector(Vec<i32>),
    Int64Vector(Vec<i64>),
    Float32Vector(Vec<f32>),
    Float64Vector(Vec<f64>),
    Complex32Vector(Vec<(f32, f32)>),
    Complex64Vector(Vec<(f64, f64)>),
    Extension { kind: String, payload: Vec<u8> },
}

impl FieldPayload {
    /// The kind tag, or the raw spelling for an extension payload.
    pub fn kind_name(&self) -> &str {
        match self {
            FieldPayload::Null => FieldKind::Null.as_str(),
            FieldPayload::Boolean(_) => FieldKind::Boolean.as_str(),
            FieldPayload::Int8(_) => FieldKind::Int8.as_str(),
            FieldPayload::Int16(_) => FieldKind::Int16.as_str(),
            FieldPayload::Int32(_) => FieldKind::Int32.as_str(),
            FieldPayload::Int64(_) => FieldKind::Int64.as_str(),
            FieldPayload::Float32(_) => FieldKind::Float32.as_str(),
            FieldPayload::Float64(_) => FieldKind::Float64.as_str(),
            FieldPayload::String(_) => FieldKind::String.as_str(),
            FieldPayload::Blob(_) => FieldKind::Blob.as_str(),
            FieldPayload::Date(_) => FieldKind::Date.as_str(),
            FieldPayload::Complex32(..) => FieldKind::Complex32.as_str(),
            FieldPayload::Complex64(..) => FieldKind::Complex64.as_str(),
            FieldPayload::BooleanVector(_) => FieldKind::BooleanVector.as_str(),
            FieldPayload::Int8Vector(_) => FieldKind::Int8Vector.as_str(),
            FieldPayload::Int16Vector(_) => FieldKind::Int16Vector.as_str(),
            FieldPayload::Int32Vector(_) => FieldKind::Int32Vector.as_str(),
            FieldPayload::Int64Vector(_) => FieldKind::Int64Vector.as_str(),
            FieldPayload::Float32Vector(_) => FieldKind::Float32Vector.as_str(),
            FieldPayload::Float64Vector(_) => FieldKind::Float64Vector.as_str(),
            FieldPayload::Complex32Vector(_) => FieldKind::Complex32Vector.as_str(),
            FieldPayload::Complex64Vector(_) => FieldKind::Complex64Vector.as_str(),
            FieldPayload::Extension { kind, .. } => kind,
        }
    }
}

/// One wire-format row: an ordered list of field payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowPayload {
    pub fields: Vec<FieldPayload>,
}

impl RowPayload {
    pub fn new(fields: Vec<FieldPayload>) -> Self {
        Self { fields }
    }
}

/// One streamed batch of a result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryResponse {
    pub transaction_id: Option<u64>,
    pub query_id: Option<u64>,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<RowPayload>,
}

/// A fully formed statement request, as produced by the builders in
/// `quiver-client`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub statement: Statement,
    /// Binds the request to an open transaction when present.
    pub transaction_id: Option<u64>,
}

impl QueryRequest {
    pub fn new(statement: Statement) -> Self {
        Self {
            statement,
            transaction_id: None,
        }
    }

    pub fn in_transaction(statement: Statement, transaction_id: u64) -> Self {
        Self {
            statement,
            transaction_id: Some(transaction_id),
        }
    }
}

/// One row of a batched insert stream: ordered column/payload pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RowInsert {
    pub assignments: Vec<(ColumnRef, FieldPayload)>,
}

impl RowInsert {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: ColumnRef, payload: FieldPayload) {
        self.assignments.push((column, payload));
    }

    pub fn with(mut self, column: ColumnRef, payload: FieldPayload) -> Self {
        self.push(column, payload);
        self
    }
}

/// Client-to-server frames on a batch insert stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BatchCommand {
    /// Open the stream against a target entity.
    Open { target: EntityRef },
    Row(RowInsert),
    /// End of writes; everything sent is to be durably applied.
    Commit,
    /// Discard every write sent on this stream.
    Abort,
}

/// Server-to-client frames on a batch insert stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BatchAck {
    /// One row was accepted. Not correlated to a specific send.
    RowAccepted,
    /// Terminal: the stream committed.
    Committed,
    /// Terminal: the stream was rolled back at the client's request.
    Aborted,
    /// Terminal: the stream failed server-side.
    Failed { message: String },
}

/// A message failed to encode or decode at the framing layer.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to encode message: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("failed to decode message: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

/// Frame a message as MessagePack bytes.
pub fn to_bytes<T: Serialize>(message: &T) -> Result<Vec<u8>, EncodeError> {
    Ok(rmp_serde::to_vec_named(message)?)
}

/// Read a message back from MessagePack bytes.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, EncodeError> {
    Ok(rmp_serde::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_framing_round_trip() {
        let response = QueryResponse {
            transaction_id: Some(7),
            query_id: Some(99),
            columns: vec![ColumnDescriptor::new("s.t.id", "id", FieldKind::Int64)],
            rows: vec![RowPayload::new(vec![FieldPayload::Int64(1)])],
        };
        let bytes = to_bytes(&response).unwrap();
        let back: QueryResponse = from_bytes(&bytes).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn test_batch_command_framing_round_trip() {
        let row = RowInsert::new().with(
            ColumnRef::new("s", "t", "id"),
            FieldPayload::Int64(5),
        );
        let command = BatchCommand::Row(row);
        let bytes = to_bytes(&command).unwrap();
        let back: BatchCommand = from_bytes(&bytes).unwrap();
        assert_eq!(back, command);
    }

    #[test]
    fn test_truncated_frame_fails() {
        let bytes = to_bytes(&BatchAck::RowAccepted).unwrap();
        let result: Result<BatchAck, _> = from_bytes(&bytes[..bytes.len() - 1]);
        assert!(result.is_err());
    }
}
