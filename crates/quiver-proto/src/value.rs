//! Decoded datum values and their checked downcast accessors.

use crate::kind::FieldKind;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A single-precision complex number, stored as a real/imaginary pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex32 {
    pub re: f32,
    pub im: f32,
}

impl Complex32 {
    pub fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }
}

/// A double-precision complex number, stored as a real/imaginary pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex64 {
    pub re: f64,
    pub im: f64,
}

impl Complex64 {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

/// A fully decoded value from one row field.
///
/// `Null` is a distinguished decoded value, not absence. The `as_*`
/// accessors perform a checked downcast: a kind mismatch yields `None`
/// rather than an error, so callers can probe types defensively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Datum {
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
    Date(OffsetDateTime),
    Complex32(Complex32),
    Complex64(Complex64),
    BooleanVector(Vec<bool>),
    Int8Vector(Vec<i8>),
    Int16Vector(Vec<i16>),
    Int32Vector(Vec<i32>),
    Int64Vector(Vec<i64>),
    Float32Vector(Vec<f32>),
    Float64Vector(Vec<f64>),
    Complex32Vector(Vec<Complex32>),
    Complex64Vector(Vec<Complex64>),
}

impl Datum {
    /// The kind tag of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            Datum::Null => FieldKind::Null,
            Datum::Boolean(_) => FieldKind::Boolean,
            Datum::Int8(_) => FieldKind::Int8,
            Datum::Int16(_) => FieldKind::Int16,
            Datum::Int32(_) => FieldKind::Int32,
            Datum::Int64(_) => FieldKind::Int64,
            Datum::Float32(_) => FieldKind::Float32,
            Datum::Float64(_) => FieldKind::Float64,
            Datum::String(_) => FieldKind::String,
            Datum::Blob(_) => FieldKind::Blob,
            Datum::Date(_) => FieldKind::Date,
            Datum::Complex32(_) => FieldKind::Complex32,
            Datum::Complex64(_) => FieldKind::Complex64,
            Datum::BooleanVector(_) => FieldKind::BooleanVector,
            Datum::Int8Vector(_) => FieldKind::Int8Vector,
            Datum::Int16Vector(_) => FieldKind::Int16Vector,
            Datum::Int32Vector(_) => FieldKind::Int32Vector,
            Datum::Int64Vector(_) => FieldKind::Int64Vector,
            Datum::Float32Vector(_) => FieldKind::Float32Vector,
            Datum::Float64Vector(_) => FieldKind::Float64Vector,
            Datum::Complex32Vector(_) => FieldKind::Complex32Vector,
            Datum::Complex64Vector(_) => FieldKind::Complex64Vector,
        }
    }

    /// Check if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Datum::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Datum::Int8(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Datum::Int16(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Datum::Int32(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Datum::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Datum::Float32(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to convert the value to an f64; integer kinds widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Datum::Float64(f) => Some(*f),
            Datum::Float32(f) => Some(*f as f64),
            Datum::Int8(i) => Some(*i as f64),
            Datum::Int16(i) => Some(*i as f64),
            Datum::Int32(i) => Some(*i as f64),
            Datum::Int64(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Datum::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Datum::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<OffsetDateTime> {
        match self {
            Datum::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_complex32(&self) -> Option<Complex32> {
        match self {
            Datum::Complex32(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_complex64(&self) -> Option<Complex64> {
        match self {
            Datum::Complex64(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_bool_vec(&self) -> Option<&[bool]> {
        match self {
            Datum::BooleanVector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i8_vec(&self) -> Option<&[i8]> {
        match self {
            Datum::Int8Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i16_vec(&self) -> Option<&[i16]> {
        match self {
            Datum::Int16Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32_vec(&self) -> Option<&[i32]> {
        match self {
            Datum::Int32Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64_vec(&self) -> Option<&[i64]> {
        match self {
            Datum::Int64Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f32_vec(&self) -> Option<&[f32]> {
        match self {
            Datum::Float32Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64_vec(&self) -> Option<&[f64]> {
        match self {
            Datum::Float64Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_complex32_vec(&self) -> Option<&[Complex32]> {
        match self {
            Datum::Complex32Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_complex64_vec(&self) -> Option<&[Complex64]> {
        match self {
            Datum::Complex64Vector(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_downcasts() {
        let v = Datum::Int64(42);
        assert_eq!(v.as_i64(), Some(42));
        assert_eq!(v.as_f64(), Some(42.0));
        assert_eq!(v.as_str(), None);
        assert_eq!(v.as_bool(), None);
        assert!(!v.is_null());

        let v = Datum::Null;
        assert!(v.is_null());
        assert_eq!(v.as_i64(), None);
    }

    #[test]
    fn test_float_widening() {
        assert_eq!(Datum::Int8(-3).as_f64(), Some(-3.0));
        assert_eq!(Datum::Float32(1.5).as_f64(), Some(1.5));
        assert_eq!(Datum::Float64(1.5).as_f32(), None);
    }

    #[test]
    fn test_vector_downcasts() {
        let v = Datum::Float64Vector(vec![1.0, 2.0]);
        assert_eq!(v.as_f64_vec(), Some(&[1.0, 2.0][..]));
        assert_eq!(v.as_i64_vec(), None);
        assert_eq!(v.kind(), FieldKind::Float64Vector);
    }

    #[test]
    fn test_complex_pair() {
        let c = Complex64::new(1.0, -2.0);
        assert_eq!(Datum::Complex64(c).as_complex64(), Some(c));
        assert_eq!(Datum::Complex64(c).as_complex32(), None);
    }
}
