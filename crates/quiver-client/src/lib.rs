//! QuiverDB Native Rust Client Library
//!
//! A client SDK for QuiverDB, a remote analytical database reached over a
//! network RPC protocol.
//!
//! # Features
//!
//! - **Streaming reads** - Pull-based [`TupleIterator`] decodes paginated
//!   result batches on demand, with column-name resolution
//! - **Flow-controlled writes** - [`BatchInsertClient`] bounds in-flight
//!   rows with a counting permit, coupling write rate to server throughput
//! - **Fluent statement builders** - SELECT/INSERT/UPDATE/DELETE and DDL
//!   requests assembled without string concatenation
//! - **Type-safe records** - Deserialize results directly into Rust structs
//!   using serde
//!
//! # Quick Start
//!
//! ```no_run
//! use quiver_client::{field, Client, Connection, Select};
//! use quiver_proto::{Datum, EntityRef};
//!
//! fn run(client: &mut Client<impl Connection>) -> quiver_client::Result<()> {
//!     let orders = EntityRef::new("sales", "orders");
//!
//!     // Stream a result set.
//!     let mut rows = client.query(
//!         Select::from(orders.clone())
//!             .columns(["id", "total"])
//!             .filter(field("total").gt(Datum::Float64(10.0))),
//!     )?;
//!     while rows.has_next()? {
//!         let record = rows.try_next()?;
//!         println!("order {:?}: {:?}", record.as_i64("id")?, record.as_f64("total")?);
//!     }
//!
//!     // Bulk load with bounded in-flight writes.
//!     let mut writer = client.batch_insert(orders)?;
//!     // writer.insert(...) per row, then:
//!     writer.complete()?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod columns;
pub mod error;
pub mod iterator;
pub mod query;
pub mod record;
pub mod transport;
pub mod writer;

pub use client::Client;
pub use columns::ColumnIndex;
pub use error::{Error, Result};
pub use iterator::{CloseHook, TupleIterator};
pub use query::{
    begin, commit, create_schema, drop_entity, drop_schema, field, rollback, Delete, EntityBuilder,
    Insert, Select, Update,
};
pub use record::Record;
pub use transport::{AckObserver, BatchStream, Connection, MessageSource};
pub use writer::{BatchInsertClient, DEFAULT_MAX_IN_FLIGHT};
