//! Name-to-position index for a result schema.

use crate::error::{Error, Result};
use quiver_proto::ColumnDescriptor;
use std::collections::HashMap;

/// Maps qualified and simple column names to positional indices.
///
/// Built once from the first response batch of a result set and shared
/// read-only by every record of that set. Qualified names are always
/// unique; simple-name collisions resolve to the first occurrence.
#[derive(Debug, Default)]
pub struct ColumnIndex {
    columns: Vec<ColumnDescriptor>,
    qualified: HashMap<String, usize>,
    simple: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Build the index from ordered schema metadata. An empty descriptor
    /// list (possible for empty result sets) yields an empty index.
    pub fn build(columns: &[ColumnDescriptor]) -> Self {
        let mut qualified = HashMap::with_capacity(columns.len());
        let mut simple = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            qualified.insert(column.qualified.clone(), position);
            // First occurrence wins on simple-name collisions.
            simple.entry(column.name.clone()).or_insert(position);
        }
        Self {
            columns: columns.to_vec(),
            qualified,
            simple,
        }
    }

    /// Resolve a qualified or simple column name to its position.
    pub fn resolve(&self, name: &str) -> Result<usize> {
        self.qualified
            .get(name)
            .or_else(|| self.simple.get(name))
            .copied()
            .ok_or_else(|| Error::UnknownColumn {
                name: name.to_string(),
            })
    }

    /// Number of columns in the result schema.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Descriptor at a position.
    pub fn descriptor(&self, position: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(position)
    }

    /// All descriptors, in result order.
    pub fn descriptors(&self) -> &[ColumnDescriptor] {
        &self.columns
    }
}
