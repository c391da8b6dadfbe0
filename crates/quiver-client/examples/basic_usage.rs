//! Basic usage of the QuiverDB client.
//!
//! A real application plugs an RPC transport in behind the [`Connection`]
//! trait; this example uses a canned in-memory source so it runs anywhere.

use quiver_client::{field, AckObserver, BatchStream, Client, Connection, MessageSource, Select};
use quiver_proto::{
    ColumnDescriptor, Datum, EntityRef, FieldKind, FieldPayload, QueryRequest, QueryResponse,
    RowPayload,
};
use std::sync::Arc;

struct CannedSource {
    message: Option<QueryResponse>,
}

impl MessageSource for CannedSource {
    fn pull(&mut self) -> quiver_client::Result<Option<QueryResponse>> {
        Ok(self.message.take())
    }

    fn release(&mut self) {}
}

struct CannedConnection;

impl Connection for CannedConnection {
    fn query(&mut self, _request: QueryRequest) -> quiver_client::Result<Box<dyn MessageSource>> {
        Ok(Box::new(CannedSource {
            message: Some(QueryResponse {
                transaction_id: None,
                query_id: Some(1),
                columns: vec![
                    ColumnDescriptor::new("sales.orders.id", "id", FieldKind::Int64),
                    ColumnDescriptor::new("sales.orders.total", "total", FieldKind::Float64),
                ],
                rows: vec![
                    RowPayload::new(vec![FieldPayload::Int64(1), FieldPayload::Float64(19.5)]),
                    RowPayload::new(vec![FieldPayload::Int64(2), FieldPayload::Float64(42.0)]),
                ],
            }),
        }))
    }

    fn batch_insert(
        &mut self,
        _target: EntityRef,
        _observer: Arc<dyn AckObserver>,
    ) -> quiver_client::Result<Box<dyn BatchStream>> {
        Err(quiver_client::Error::Transport(
            "this example only reads".to_string(),
        ))
    }
}

fn main() -> quiver_client::Result<()> {
    tracing_subscriber::fmt::init();

    let mut client = Client::new(CannedConnection);

    let mut rows = client.query(
        Select::from(EntityRef::new("sales", "orders"))
            .columns(["id", "total"])
            .filter(field("total").gt(Datum::Float64(10.0))),
    )?;

    while rows.has_next()? {
        let record = rows.try_next()?;
        println!(
            "order {:?} -> total {:?}",
            record.as_i64("id")?,
            record.as_f64("total")?
        );
    }
    Ok(())
}
