//! Wire-format types for the QuiverDB RPC protocol.
//!
//! This crate defines everything that crosses the wire between a QuiverDB
//! client and server: the field-kind table, typed datum values, request and
//! response messages, batch-stream control frames, and the MessagePack
//! framing helpers transports use to move them. It contains no I/O; the
//! `quiver-client` crate supplies the streaming and flow-control machinery
//! on top of these types.

pub mod encode;
pub mod ident;
pub mod kind;
pub mod message;
pub mod statement;
pub mod value;

pub use encode::{decode, encode, DecodeError};
pub use ident::{ColumnRef, EntityRef, MalformedIdentifier};
pub use kind::{FieldKind, UnknownKind};
pub use message::{
    from_bytes, to_bytes, BatchAck, BatchCommand, ColumnDescriptor, EncodeError, FieldPayload,
    QueryRequest, QueryResponse, RowInsert, RowPayload,
};
pub use statement::{
    ColumnSpec, Comparison, CreateEntity, DeleteStatement, Direction, InsertStatement, Predicate,
    SelectStatement, Statement, UpdateStatement,
};
pub use value::{Complex32, Complex64, Datum};
