//! Typed records decoded from wire-format rows.

use crate::columns::ColumnIndex;
use crate::error::{Error, Result};
use quiver_proto::{decode, Complex32, Complex64, Datum, DecodeError, RowPayload};
use serde_json::json;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// One decoded row of a result set.
///
/// The full row is decoded eagerly at construction. Each record holds a
/// shared handle to its result set's [`ColumnIndex`] for name resolution;
/// positional access needs no index at all.
#[derive(Debug, Clone)]
pub struct Record {
    values: Vec<Datum>,
    index: Arc<ColumnIndex>,
}

impl Record {
    /// Decode one wire row against the result schema. Fails on the first
    /// undecodable field rather than dropping it.
    pub(crate) fn decode(row: RowPayload, index: Arc<ColumnIndex>) -> Result<Self> {
        if row.fields.len() != index.len() {
            return Err(DecodeError::ColumnCountMismatch {
                expected: index.len(),
                actual: row.fields.len(),
            }
            .into());
        }
        let values = row
            .fields
            .into_iter()
            .map(|field| decode(field).map_err(Error::from))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { values, index })
    }

    /// Number of fields; always equals the result schema's column count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by position.
    pub fn at(&self, position: usize) -> Option<&Datum> {
        self.values.get(position)
    }

    /// Get a value by qualified or simple column name.
    pub fn get(&self, name: &str) -> Result<&Datum> {
        let position = self.index.resolve(name)?;
        self.values.get(position).ok_or_else(|| Error::UnknownColumn {
            name: name.to_string(),
        })
    }

    /// All values, in column order.
    pub fn values(&self) -> &[Datum] {
        &self.values
    }

    pub fn as_bool(&self, name: &str) -> Result<Option<bool>> {
        Ok(self.get(name)?.as_bool())
    }

    pub fn as_i64(&self, name: &str) -> Result<Option<i64>> {
        Ok(self.get(name)?.as_i64())
    }

    pub fn as_f64(&self, name: &str) -> Result<Option<f64>> {
        Ok(self.get(name)?.as_f64())
    }

    pub fn as_str(&self, name: &str) -> Result<Option<&str>> {
        Ok(self.get(name)?.as_str())
    }

    pub fn as_bytes(&self, name: &str) -> Result<Option<&[u8]>> {
        Ok(self.get(name)?.as_bytes())
    }

    pub fn as_date(&self, name: &str) -> Result<Option<OffsetDateTime>> {
        Ok(self.get(name)?.as_date())
    }

    pub fn as_complex64(&self, name: &str) -> Result<Option<Complex64>> {
        Ok(self.get(name)?.as_complex64())
    }

    pub fn as_f64_vec(&self, name: &str) -> Result<Option<&[f64]>> {
        Ok(self.get(name)?.as_f64_vec())
    }

    /// Deserialize the record into a typed struct, mapping simple column
    /// names to struct fields.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        let mut map = serde_json::Map::with_capacity(self.values.len());
        for (position, value) in self.values.iter().enumerate() {
            if let Some(descriptor) = self.index.descriptor(position) {
                map.insert(descriptor.name.clone(), datum_to_json(value));
            }
        }
        Ok(serde_json::from_value(serde_json::Value::Object(map))?)
    }
}

fn complex32_to_json(c: &Complex32) -> serde_json::Value {
    json!({ "re": c.re, "im": c.im })
}

fn complex64_to_json(c: &Complex64) -> serde_json::Value {
    json!({ "re": c.re, "im": c.im })
}

fn datum_to_json(datum: &Datum) -> serde_json::Value {
    match datum {
        Datum::Null => serde_json::Value::Null,
        Datum::Boolean(b) => json!(b),
        Datum::Int8(i) => json!(i),
        Datum::Int16(i) => json!(i),
        Datum::Int32(i) => json!(i),
        Datum::Int64(i) => json!(i),
        Datum::Float32(f) => json!(f),
        Datum::Float64(f) => json!(f),
        Datum::String(s) => json!(s),
        Datum::Blob(b) => json!(b),
        Datum::Date(d) => d
            .format(&Rfc3339)
            .map(serde_json::Value::String)
            .unwrap_or(serde_json::Value::Null),
        Datum::Complex32(c) => complex32_to_json(c),
        Datum::Complex64(c) => complex64_to_json(c),
        Datum::BooleanVector(v) => json!(v),
        Datum::Int8Vector(v) => json!(v),
        Datum::Int16Vector(v) => json!(v),
        Datum::Int32Vector(v) => json!(v),
        Datum::Int64Vector(v) => json!(v),
        Datum::Float32Vector(v) => json!(v),
        Datum::Float64Vector(v) => json!(v),
        Datum::Complex32Vector(v) => {
            serde_json::Value::Array(v.iter().map(complex32_to_json).collect())
        }
        Datum::Complex64Vector(v) => {
            serde_json::Value::Array(v.iter().map(complex64_to_json).collect())
        }
    }
}
