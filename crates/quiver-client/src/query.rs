//! Fluent builders for the statement surface.
//!
//! Builders are pure request construction: they encode literals and
//! assemble [`Statement`] payloads, nothing more. Execution happens on a
//! [`Client`](crate::Client) or directly against a transport.

use quiver_proto::{
    encode, ColumnSpec, Comparison, CreateEntity, Datum, DeleteStatement, Direction, EntityRef,
    FieldKind, InsertStatement, Predicate, QueryRequest, SelectStatement, Statement,
    UpdateStatement,
};

/// A column term of a predicate under construction.
pub struct Field(String);

/// Start a comparison against a qualified or simple column name.
pub fn field(name: impl Into<String>) -> Field {
    Field(name.into())
}

impl Field {
    fn compare(self, op: Comparison, value: Datum) -> Predicate {
        Predicate::Compare {
            column: self.0,
            op,
            value: encode(&value),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn eq(self, value: Datum) -> Predicate {
        self.compare(Comparison::Eq, value)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn ne(self, value: Datum) -> Predicate {
        self.compare(Comparison::Ne, value)
    }

    pub fn lt(self, value: Datum) -> Predicate {
        self.compare(Comparison::Lt, value)
    }

    pub fn le(self, value: Datum) -> Predicate {
        self.compare(Comparison::Le, value)
    }

    pub fn gt(self, value: Datum) -> Predicate {
        self.compare(Comparison::Gt, value)
    }

    pub fn ge(self, value: Datum) -> Predicate {
        self.compare(Comparison::Ge, value)
    }
}

/// Builder for a SELECT request.
pub struct Select {
    inner: SelectStatement,
}

impl Select {
    pub fn from(entity: EntityRef) -> Self {
        Self {
            inner: SelectStatement {
                from: entity,
                columns: Vec::new(),
                predicate: None,
                order_by: Vec::new(),
                limit: None,
                offset: None,
            },
        }
    }

    /// Project a subset of columns; the default is every column.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add a filter; repeated calls are conjoined.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.inner.predicate = Some(match self.inner.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.inner.order_by.push((column.into(), direction));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.inner.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.inner.offset = Some(offset);
        self
    }

    pub fn build(self) -> QueryRequest {
        QueryRequest::new(Statement::Select(self.inner))
    }

    /// Build the request bound to an open transaction.
    pub fn build_in(self, transaction_id: u64) -> QueryRequest {
        QueryRequest::in_transaction(Statement::Select(self.inner), transaction_id)
    }
}

/// Builder for a single-row INSERT request. Bulk loads go through
/// [`BatchInsertClient`](crate::BatchInsertClient) instead.
pub struct Insert {
    inner: InsertStatement,
}

impl Insert {
    pub fn into_entity(entity: EntityRef) -> Self {
        Self {
            inner: InsertStatement {
                into: entity,
                assignments: Vec::new(),
            },
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: Datum) -> Self {
        self.inner.assignments.push((column.into(), encode(&value)));
        self
    }

    pub fn build(self) -> QueryRequest {
        QueryRequest::new(Statement::Insert(self.inner))
    }

    pub fn build_in(self, transaction_id: u64) -> QueryRequest {
        QueryRequest::in_transaction(Statement::Insert(self.inner), transaction_id)
    }
}

/// Builder for an UPDATE request.
pub struct Update {
    inner: UpdateStatement,
}

impl Update {
    pub fn entity(entity: EntityRef) -> Self {
        Self {
            inner: UpdateStatement {
                entity,
                assignments: Vec::new(),
                predicate: None,
            },
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: Datum) -> Self {
        self.inner.assignments.push((column.into(), encode(&value)));
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.inner.predicate = Some(match self.inner.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn build(self) -> QueryRequest {
        QueryRequest::new(Statement::Update(self.inner))
    }

    pub fn build_in(self, transaction_id: u64) -> QueryRequest {
        QueryRequest::in_transaction(Statement::Update(self.inner), transaction_id)
    }
}

/// Builder for a DELETE request.
pub struct Delete {
    inner: DeleteStatement,
}

impl Delete {
    pub fn entity(entity: EntityRef) -> Self {
        Self {
            inner: DeleteStatement {
                entity,
                predicate: None,
            },
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.inner.predicate = Some(match self.inner.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn build(self) -> QueryRequest {
        QueryRequest::new(Statement::Delete(self.inner))
    }

    pub fn build_in(self, transaction_id: u64) -> QueryRequest {
        QueryRequest::in_transaction(Statement::Delete(self.inner), transaction_id)
    }
}

/// Builder for a CREATE ENTITY request.
pub struct EntityBuilder {
    inner: CreateEntity,
}

impl EntityBuilder {
    pub fn new(entity: EntityRef) -> Self {
        Self {
            inner: CreateEntity {
                entity,
                columns: Vec::new(),
            },
        }
    }

    pub fn column(mut self, name: impl Into<String>, kind: FieldKind, nullable: bool) -> Self {
        self.inner.columns.push(ColumnSpec {
            name: name.into(),
            kind,
            nullable,
        });
        self
    }

    pub fn build(self) -> QueryRequest {
        QueryRequest::new(Statement::CreateEntity(self.inner))
    }
}

pub fn create_schema(name: impl Into<String>) -> QueryRequest {
    QueryRequest::new(Statement::CreateSchema { name: name.into() })
}

pub fn drop_schema(name: impl Into<String>) -> QueryRequest {
    QueryRequest::new(Statement::DropSchema { name: name.into() })
}

pub fn drop_entity(entity: EntityRef) -> QueryRequest {
    QueryRequest::new(Statement::DropEntity { entity })
}

/// Open a transaction; the assigned id arrives as the first response
/// batch's `transaction_id`.
pub fn begin() -> QueryRequest {
    QueryRequest::new(Statement::Begin)
}

pub fn commit(transaction_id: u64) -> QueryRequest {
    QueryRequest::in_transaction(Statement::Commit, transaction_id)
}

pub fn rollback(transaction_id: u64) -> QueryRequest {
    QueryRequest::in_transaction(Statement::Rollback, transaction_id)
}
