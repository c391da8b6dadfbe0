//! Literal and vector codecs between [`Datum`] and [`FieldPayload`].

use crate::message::FieldPayload;
use crate::value::{Complex32, Complex64, Datum};
use thiserror::Error;
use time::OffsetDateTime;

/// A wire payload that cannot be decoded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The payload carries a kind this client does not know. Fails the
    /// whole row rather than dropping the field.
    #[error("unsupported field kind: {kind}")]
    UnsupportedKind { kind: String },

    /// A date payload outside the representable timestamp range.
    #[error("date out of range: {millis} ms since epoch")]
    OutOfRangeDate { millis: i64 },

    /// A row arrived with a different field count than its result schema.
    #[error("row has {actual} fields, result schema declares {expected}")]
    ColumnCountMismatch { expected: usize, actual: usize },
}

/// Encode a decoded value back into its wire payload. Total over every
/// datum kind; dates encode to integer epoch milliseconds.
pub fn encode(datum: &Datum) -> FieldPayload {
    match datum {
        Datum::Null => FieldPayload::Null,
        Datum::Boolean(b) => FieldPayload::Boolean(*b),
        Datum::Int8(i) => FieldPayload::Int8(*i),
        Datum::Int16(i) => FieldPayload::Int16(*i),
        Datum::Int32(i) => FieldPayload::Int32(*i),
        Datum::Int64(i) => FieldPayload::Int64(*i),
        Datum::Float32(f) => FieldPayload::Float32(*f),
        Datum::Float64(f) => FieldPayload::Float64(*f),
        Datum::String(s) => FieldPayload::String(s.clone()),
        Datum::Blob(b) => FieldPayload::Blob(b.clone()),
        Datum::Date(d) => FieldPayload::Date((d.unix_timestamp_nanos() / 1_000_000) as i64),
        Datum::Complex32(c) => FieldPayload::Complex32(c.re, c.im),
        Datum::Complex64(c) => FieldPayload::Complex64(c.re, c.im),
        Datum::BooleanVector(v) => FieldPayload::BooleanVector(v.clone()),
        Datum::Int8Vector(v) => FieldPayload::Int8Vector(v.clone()),
        Datum::Int16Vector(v) => FieldPayload::Int16Vector(v.clone()),
        Datum::Int32Vector(v) => FieldPayload::Int32Vector(v.clone()),
        Datum::Int64Vector(v) => FieldPayload::Int64Vector(v.clone()),
        Datum::Float32Vector(v) => FieldPayload::Float32Vector(v.clone()),
        Datum::Float64Vector(v) => FieldPayload::Float64Vector(v.clone()),
        Datum::Complex32Vector(v) => {
            FieldPayload::Complex32Vector(v.iter().map(|c| (c.re, c.im)).collect())
        }
        Datum::Complex64Vector(v) => {
            FieldPayload::Complex64Vector(v.iter().map(|c| (c.re, c.im)).collect())
        }
    }
}

/// Decode one wire payload into its typed value.
///
/// Total over every known payload kind; an `Extension` payload fails with
/// [`DecodeError::UnsupportedKind`].
pub fn decode(payload: FieldPayload) -> Result<Datum, DecodeError> {
    Ok(match payload {
        FieldPayload::Null => Datum::Null,
        FieldPayload::Boolean(b) => Datum::Boolean(b),
        FieldPayload::Int8(i) => Datum::Int8(i),
        FieldPayload::Int16(i) => Datum::Int16(i),
        FieldPayload::Int32(i) => Datum::Int32(i),
        FieldPayload::Int64(i) => Datum::Int64(i),
        FieldPayload::Float32(f) => Datum::Float32(f),
        FieldPayload::Float64(f) => Datum::Float64(f),
        FieldPayload::String(s) => Datum::String(s),
        FieldPayload::Blob(b) => Datum::Blob(b),
        FieldPayload::Date(millis) => Datum::Date(decode_date(millis)?),
        FieldPayload::Complex32(re, im) => Datum::Complex32(Complex32::new(re, im)),
        FieldPayload::Complex64(re, im) => Datum::Complex64(Complex64::new(re, im)),
        FieldPayload::BooleanVector(v) => Datum::BooleanVector(v),
        FieldPayload::Int8Vector(v) => Datum::Int8Vector(v),
        FieldPayload::Int16Vector(v) => Datum::Int16Vector(v),
        FieldPayload::Int32Vector(v) => Datum::Int32Vector(v),
        FieldPayload::Int64Vector(v) => Datum::Int64Vector(v),
        FieldPayload::Float32Vector(v) => Datum::Float32Vector(v),
        FieldPayload::Float64Vector(v) => Datum::Float64Vector(v),
        FieldPayload::Complex32Vector(v) => {
            Datum::Complex32Vector(v.into_iter().map(|(re, im)| Complex32::new(re, im)).collect())
        }
        FieldPayload::Complex64Vector(v) => {
            Datum::Complex64Vector(v.into_iter().map(|(re, im)| Complex64::new(re, im)).collect())
        }
        FieldPayload::Extension { kind, .. } => {
            return Err(DecodeError::UnsupportedKind { kind })
        }
    })
}

fn decode_date(millis: i64) -> Result<OffsetDateTime, DecodeError> {
    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
        .map_err(|_| DecodeError::OutOfRangeDate { millis })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_round_trip() {
        assert_eq!(decode(encode(&Datum::Null)).unwrap(), Datum::Null);
    }

    #[test]
    fn test_date_round_trip_millisecond_precision() {
        // 2024-05-17T08:30:00.125Z
        let millis: i64 = 1_715_934_600_125;
        let date = OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000).unwrap();
        let payload = encode(&Datum::Date(date));
        assert_eq!(payload, FieldPayload::Date(millis));
        assert_eq!(decode(payload).unwrap(), Datum::Date(date));
    }

    #[test]
    fn test_complex_vector_round_trip() {
        let datum = Datum::Complex64Vector(vec![
            Complex64::new(0.5, -0.5),
            Complex64::new(2.0, 3.0),
        ]);
        assert_eq!(decode(encode(&datum)).unwrap(), datum);
    }

    #[test]
    fn test_extension_payload_is_refused() {
        let payload = FieldPayload::Extension {
            kind: "decimal128".to_string(),
            payload: vec![0, 1, 2],
        };
        assert_eq!(
            decode(payload),
            Err(DecodeError::UnsupportedKind {
                kind: "decimal128".to_string()
            })
        );
    }

    #[test]
    fn test_out_of_range_date() {
        assert!(matches!(
            decode(FieldPayload::Date(i64::MAX)),
            Err(DecodeError::OutOfRangeDate { .. })
        ));
    }
}
