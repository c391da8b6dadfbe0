//! Dotted identifier parsing for schemas, entities, and columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An identifier string that does not match the expected dotted form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed identifier {input:?}: expected {expected}")]
pub struct MalformedIdentifier {
    pub input: String,
    pub expected: &'static str,
}

fn split_parts<'a>(input: &'a str, count: usize, expected: &'static str) -> Result<Vec<&'a str>, MalformedIdentifier> {
    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != count || parts.iter().any(|p| p.is_empty()) {
        return Err(MalformedIdentifier {
            input: input.to_string(),
            expected,
        });
    }
    Ok(parts)
}

/// A `schema.entity` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub schema: String,
    pub entity: String,
}

impl EntityRef {
    pub fn new(schema: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            entity: entity.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.entity)
    }
}

impl FromStr for EntityRef {
    type Err = MalformedIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_parts(s, 2, "schema.entity")?;
        Ok(Self::new(parts[0], parts[1]))
    }
}

/// A fully qualified `schema.entity.column` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub schema: String,
    pub entity: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(
        schema: impl Into<String>,
        entity: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            entity: entity.into(),
            column: column.into(),
        }
    }

    /// The owning entity of this column.
    pub fn entity(&self) -> EntityRef {
        EntityRef::new(self.schema.clone(), self.entity.clone())
    }

    /// The full dotted spelling.
    pub fn qualified(&self) -> String {
        self.to_string()
    }

    /// The bare column name.
    pub fn simple(&self) -> &str {
        &self.column
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.schema, self.entity, self.column)
    }
}

impl FromStr for ColumnRef {
    type Err = MalformedIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_parts(s, 3, "schema.entity.column")?;
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ref_round_trip() {
        let r: EntityRef = "sales.orders".parse().unwrap();
        assert_eq!(r, EntityRef::new("sales", "orders"));
        assert_eq!(r.to_string(), "sales.orders");
    }

    #[test]
    fn test_column_ref_round_trip() {
        let r: ColumnRef = "sales.orders.total".parse().unwrap();
        assert_eq!(r.simple(), "total");
        assert_eq!(r.qualified(), "sales.orders.total");
        assert_eq!(r.entity(), EntityRef::new("sales", "orders"));
    }

    #[test]
    fn test_malformed_inputs() {
        assert!("orders".parse::<EntityRef>().is_err());
        assert!("a.b.c".parse::<EntityRef>().is_err());
        assert!("a..c".parse::<ColumnRef>().is_err());
        assert!("a.b".parse::<ColumnRef>().is_err());
    }
}
