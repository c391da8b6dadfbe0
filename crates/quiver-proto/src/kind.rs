//! The field-kind table shared by column metadata and row payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A kind spelling that is not part of the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field kind: {0}")]
pub struct UnknownKind(pub String);

/// Every value kind the protocol can carry in a row field.
///
/// Scalar kinds have a matching homogeneous vector kind; `Null` is a
/// distinguished kind of its own, not the absence of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Null,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Blob,
    Date,
    Complex32,
    Complex64,
    BooleanVector,
    Int8Vector,
    Int16Vector,
    Int32Vector,
    Int64Vector,
    Float32Vector,
    Float64Vector,
    Complex32Vector,
    Complex64Vector,
}

impl FieldKind {
    /// Whether this kind is one of the homogeneous vector kinds.
    pub fn is_vector(&self) -> bool {
        self.element().is_some()
    }

    /// The scalar element kind of a vector kind, `None` for scalars.
    pub fn element(&self) -> Option<FieldKind> {
        match self {
            FieldKind::BooleanVector => Some(FieldKind::Boolean),
            FieldKind::Int8Vector => Some(FieldKind::Int8),
            FieldKind::Int16Vector => Some(FieldKind::Int16),
            FieldKind::Int32Vector => Some(FieldKind::Int32),
            FieldKind::Int64Vector => Some(FieldKind::Int64),
            FieldKind::Float32Vector => Some(FieldKind::Float32),
            FieldKind::Float64Vector => Some(FieldKind::Float64),
            FieldKind::Complex32Vector => Some(FieldKind::Complex32),
            FieldKind::Complex64Vector => Some(FieldKind::Complex64),
            _ => None,
        }
    }

    /// The wire spelling used in schema metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Null => "null",
            FieldKind::Boolean => "boolean",
            FieldKind::Int8 => "int8",
            FieldKind::Int16 => "int16",
            FieldKind::Int32 => "int32",
            FieldKind::Int64 => "int64",
            FieldKind::Float32 => "float32",
            FieldKind::Float64 => "float64",
            FieldKind::String => "string",
            FieldKind::Blob => "blob",
            FieldKind::Date => "date",
            FieldKind::Complex32 => "complex32",
            FieldKind::Complex64 => "complex64",
            FieldKind::BooleanVector => "boolean[]",
            FieldKind::Int8Vector => "int8[]",
            FieldKind::Int16Vector => "int16[]",
            FieldKind::Int32Vector => "int32[]",
            FieldKind::Int64Vector => "int64[]",
            FieldKind::Float32Vector => "float32[]",
            FieldKind::Float64Vector => "float64[]",
            FieldKind::Complex32Vector => "complex32[]",
            FieldKind::Complex64Vector => "complex64[]",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(FieldKind::Null),
            "boolean" => Ok(FieldKind::Boolean),
            "int8" => Ok(FieldKind::Int8),
            "int16" => Ok(FieldKind::Int16),
            "int32" => Ok(FieldKind::Int32),
            "int64" => Ok(FieldKind::Int64),
            "float32" => Ok(FieldKind::Float32),
            "float64" => Ok(FieldKind::Float64),
            "string" => Ok(FieldKind::String),
            "blob" => Ok(FieldKind::Blob),
            "date" => Ok(FieldKind::Date),
            "complex32" => Ok(FieldKind::Complex32),
            "complex64" => Ok(FieldKind::Complex64),
            "boolean[]" => Ok(FieldKind::BooleanVector),
            "int8[]" => Ok(FieldKind::Int8Vector),
            "int16[]" => Ok(FieldKind::Int16Vector),
            "int32[]" => Ok(FieldKind::Int32Vector),
            "int64[]" => Ok(FieldKind::Int64Vector),
            "float32[]" => Ok(FieldKind::Float32Vector),
            "float64[]" => Ok(FieldKind::Float64Vector),
            "complex32[]" => Ok(FieldKind::Complex32Vector),
            "complex64[]" => Ok(FieldKind::Complex64Vector),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_spelling_round_trip() {
        let kinds = [
            FieldKind::Null,
            FieldKind::Boolean,
            FieldKind::Int64,
            FieldKind::Float32,
            FieldKind::String,
            FieldKind::Blob,
            FieldKind::Date,
            FieldKind::Complex64,
            FieldKind::Int8Vector,
            FieldKind::Complex32Vector,
        ];
        for kind in kinds {
            assert_eq!(kind.as_str().parse::<FieldKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_spelling() {
        assert_eq!(
            "decimal".parse::<FieldKind>(),
            Err(UnknownKind("decimal".to_string()))
        );
    }

    #[test]
    fn test_vector_elements() {
        assert_eq!(FieldKind::Float64Vector.element(), Some(FieldKind::Float64));
        assert_eq!(FieldKind::Float64.element(), None);
        assert!(FieldKind::BooleanVector.is_vector());
        assert!(!FieldKind::Null.is_vector());
    }
}
