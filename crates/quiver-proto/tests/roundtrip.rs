//! Encode/decode round-trip property for scalar datums.

use proptest::prelude::*;
use quiver_proto::{decode, encode, Complex64, Datum};
use time::OffsetDateTime;

// Finite float ranges: the wire codec is identity on payloads, and NaN
// would defeat equality-based assertions without testing anything extra.
fn scalar_datum() -> impl Strategy<Value = Datum> {
    prop_oneof![
        Just(Datum::Null),
        any::<bool>().prop_map(Datum::Boolean),
        any::<i8>().prop_map(Datum::Int8),
        any::<i16>().prop_map(Datum::Int16),
        any::<i32>().prop_map(Datum::Int32),
        any::<i64>().prop_map(Datum::Int64),
        (-1.0e30f32..1.0e30).prop_map(Datum::Float32),
        (-1.0e300f64..1.0e300).prop_map(Datum::Float64),
        ".*".prop_map(Datum::String),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Datum::Blob),
        // Years 1..=9999 in epoch milliseconds.
        (-62_135_596_800_000i64..253_402_300_799_000).prop_map(|millis| {
            Datum::Date(
                OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000).unwrap(),
            )
        }),
        (-1.0e300f64..1.0e300, -1.0e300f64..1.0e300)
            .prop_map(|(re, im)| Datum::Complex64(Complex64::new(re, im))),
    ]
}

proptest! {
    #[test]
    fn scalar_round_trip(datum in scalar_datum()) {
        prop_assert_eq!(decode(encode(&datum)).unwrap(), datum);
    }
}
