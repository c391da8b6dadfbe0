//! Statement payloads carried inside [`QueryRequest`](crate::QueryRequest).
//!
//! These are the wire form of the fluent builders in `quiver-client`; the
//! server consumes them as-is. Pure data, no behavior beyond construction.

use crate::ident::EntityRef;
use crate::kind::FieldKind;
use crate::message::FieldPayload;
use serde::{Deserialize, Serialize};

/// Sort direction for an `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Comparison operator between a column and a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A filter tree over column/literal comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Compare {
        column: String,
        op: Comparison,
        value: FieldPayload,
    },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    pub from: EntityRef,
    /// Empty means every column of the entity.
    pub columns: Vec<String>,
    pub predicate: Option<Predicate>,
    pub order_by: Vec<(String, Direction)>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStatement {
    pub into: EntityRef,
    pub assignments: Vec<(String, FieldPayload)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatement {
    pub entity: EntityRef,
    pub assignments: Vec<(String, FieldPayload)>,
    pub predicate: Option<Predicate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStatement {
    pub entity: EntityRef,
    pub predicate: Option<Predicate>,
}

/// One column definition of a `CreateEntity` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: FieldKind,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEntity {
    pub entity: EntityRef,
    pub columns: Vec<ColumnSpec>,
}

/// The full statement surface of the protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    CreateSchema { name: String },
    DropSchema { name: String },
    CreateEntity(CreateEntity),
    DropEntity { entity: EntityRef },
    Begin,
    Commit,
    Rollback,
}
