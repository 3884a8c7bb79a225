//! Value codec between host values and the wire client's representation.
//!
//! Both directions are total: shapes the codec has no rule for are carried
//! across unchanged.

use bytes::Bytes;
use chrono::{NaiveDate, Timelike};
use rust_decimal::prelude::ToPrimitive;

use crate::executor::{JsonValue, ResultSet, Response, Row, RowMapper, Tag, Value};

// ============================================================================
// Wire Values
// ============================================================================

/// Time of day as the wire client sends it. Seconds may carry a fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireTime {
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl WireTime {
    pub fn new(hour: u32, minute: u32, second: f64) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

/// A value in the wire client's representation.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// The null marker
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Bytes),
    /// Single-element wrapper, used by the client for NUMBER columns
    Wrapped(Box<WireValue>),
    /// `(date, (h, m, s))`, or `(date, (h, m, s), offset)` for TIMESTAMP WITH TIME ZONE
    Timestamp {
        date: NaiveDate,
        time: WireTime,
        offset: Option<String>,
    },
    /// Raw byte list: byte-sized integers and binary chunks, possibly nested
    List(Vec<WireValue>),
    /// Anything else, carried through untouched
    Opaque(JsonValue),
}

impl WireValue {
    /// Check if this is the null marker
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    /// Wrap a number the way the client does for NUMBER columns.
    pub fn wrapped(inner: WireValue) -> Self {
        WireValue::Wrapped(Box::new(inner))
    }
}

// ============================================================================
// Encoding (host -> wire)
// ============================================================================

/// Encode a host value for the wire client.
pub fn encode(value: &Value) -> WireValue {
    match value {
        Value::Null => WireValue::Null,
        Value::Bool(b) => WireValue::Bool(*b),
        Value::Int(i) => WireValue::Int(*i),
        Value::Float(f) => WireValue::Float(*f),
        Value::Decimal(d) => WireValue::Float(d.to_f64().unwrap_or(f64::NAN)),
        Value::String(s) => WireValue::Text(s.clone()),
        Value::Bytes(b) => WireValue::Bytes(b.clone()),
        Value::DateTime(dt) => WireValue::Timestamp {
            date: dt.date(),
            time: WireTime::new(
                dt.hour(),
                dt.minute(),
                dt.second() as f64 + dt.nanosecond() as f64 / 1e9,
            ),
            offset: None,
        },
        Value::Tagged(Tag::Binary, inner) => match inner.as_ref() {
            Value::Bytes(b) => WireValue::Text(hex::encode(b)),
            Value::String(s) => WireValue::Text(hex::encode(s.as_bytes())),
            other => encode(other),
        },
        Value::Tagged(Tag::Named(_), inner) => encode(inner),
        Value::Json(json) => WireValue::Opaque(json.clone()),
    }
}

/// Encode a parameter list in order.
pub fn encode_params(params: &[Value]) -> Vec<WireValue> {
    params.iter().map(encode).collect()
}

// ============================================================================
// Decoding (wire -> host)
// ============================================================================

/// Decode a single cell.
pub fn decode(value: WireValue) -> Value {
    match value {
        WireValue::Null => Value::Null,
        WireValue::Bool(b) => Value::Bool(b),
        WireValue::Int(i) => Value::Int(i),
        WireValue::Float(f) => Value::Float(f),
        WireValue::Text(s) => Value::String(s),
        WireValue::Bytes(b) => Value::Bytes(b),
        WireValue::Wrapped(inner) => match *inner {
            WireValue::Int(i) => Value::Int(i),
            WireValue::Float(f) => Value::Float(f),
            // Non-numeric wrappers are unwrapped and decoded as their content
            other => decode(other),
        },
        WireValue::Timestamp { date, time, .. } => decode_timestamp(date, time),
        WireValue::List(items) => decode_byte_list(items),
        WireValue::Opaque(json) => Value::Json(json),
    }
}

/// Decode one row, cell by cell.
pub fn decode_row(row: Row<WireValue>) -> Row {
    row.into_iter().map(decode).collect()
}

/// Decode every row of a result set, then apply the mapper if one is given.
///
/// Results without rows, or with an empty row list, come back unchanged.
pub fn decode_result_set(rs: ResultSet<WireValue>, mapper: Option<&RowMapper>) -> ResultSet {
    let rows = rs.rows.map(|rows| {
        rows.into_iter()
            .map(|row| {
                let row = decode_row(row);
                match mapper {
                    Some(map) => map(row),
                    None => row,
                }
            })
            .collect()
    });

    ResultSet {
        columns: rs.columns,
        row_count: rs.row_count,
        rows,
    }
}

/// Decode a whole execute response.
pub fn decode_response(response: Response<WireValue>, mapper: Option<&RowMapper>) -> Response {
    match response {
        Response::Rows(rs) => Response::Rows(decode_result_set(rs, mapper)),
        Response::Other(json) => Response::Other(json),
    }
}

/// Build a datetime with fractional seconds truncated toward zero.
fn decode_timestamp(date: NaiveDate, time: WireTime) -> Value {
    let second = time.second.trunc() as u32;
    match date.and_hms_opt(time.hour, time.minute, second) {
        Some(dt) => Value::DateTime(dt),
        // Out-of-range components cannot form a chrono time; keep them readable
        None => Value::String(format!(
            "{} {:02}:{:02}:{:02}",
            date, time.hour, time.minute, second
        )),
    }
}

/// Concatenate a byte list, or join its elements as text when it holds
/// anything that is not a byte or a binary chunk.
fn decode_byte_list(items: Vec<WireValue>) -> Value {
    let mut buf = Vec::new();
    if concat_bytes(&items, &mut buf) {
        return Value::Bytes(Bytes::from(buf));
    }
    Value::String(join_text(items))
}

fn concat_bytes(items: &[WireValue], out: &mut Vec<u8>) -> bool {
    for item in items {
        match item {
            WireValue::Int(b) if (0..=255).contains(b) => out.push(*b as u8),
            WireValue::Bytes(b) => out.extend_from_slice(b),
            WireValue::Text(s) => out.extend_from_slice(s.as_bytes()),
            WireValue::List(inner) => {
                if !concat_bytes(inner, out) {
                    return false;
                }
            }
            _ => return false,
        }
    }
    true
}

fn join_text(items: Vec<WireValue>) -> String {
    items
        .into_iter()
        .map(|item| match item {
            WireValue::List(inner) => join_text(inner),
            other => render(&decode(other)),
        })
        .collect()
}

/// Text form of a decoded value; null renders as the empty string.
fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::String(s) => s.clone(),
        Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Value::Tagged(_, inner) => render(inner),
        Value::Json(json) => json.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use smallvec::smallvec;
    use std::str::FromStr;
    use std::sync::Arc;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn datetime(date: NaiveDate, hour: u32, minute: u32, second: u32) -> Option<chrono::NaiveDateTime> {
        date.and_hms_opt(hour, minute, second)
    }

    #[test]
    fn test_null_roundtrip() {
        assert_eq!(encode(&Value::Null), WireValue::Null);
        assert_eq!(decode(encode(&Value::Null)), Value::Null);
    }

    #[test]
    fn test_decimal_encodes_as_float() {
        let d = Decimal::from_str("123.45").unwrap();
        let decoded = decode(encode(&Value::Decimal(d)));
        let f = decoded.as_f64().unwrap();
        assert!((f - 123.45).abs() < 1e-9);
    }

    #[test]
    fn test_tagged_binary_is_lowercase_hex() {
        let encoded = encode(&Value::binary(vec![0xDE, 0xAD, 0xBE, 0xEF]));
        assert_eq!(encoded, WireValue::Text("deadbeef".to_string()));
    }

    #[test]
    fn test_named_tag_sends_inner_value() {
        let encoded = encode(&Value::tagged("id", Value::Int(7)));
        assert_eq!(encoded, WireValue::Int(7));
    }

    #[test]
    fn test_untagged_values_unchanged() {
        assert_eq!(encode(&Value::from("x")), WireValue::Text("x".to_string()));
        assert_eq!(encode(&Value::Int(3)), WireValue::Int(3));
        assert_eq!(
            encode(&Value::Bytes(Bytes::from_static(b"ab"))),
            WireValue::Bytes(Bytes::from_static(b"ab"))
        );
    }

    #[test]
    fn test_wrapped_number_is_unwrapped() {
        assert_eq!(decode(WireValue::wrapped(WireValue::Int(2))), Value::Int(2));
        assert_eq!(
            decode(WireValue::wrapped(WireValue::Float(2.5))),
            Value::Float(2.5)
        );
    }

    #[test]
    fn test_fractional_seconds_truncated_not_rounded() {
        let decoded = decode(WireValue::Timestamp {
            date: day(),
            time: WireTime::new(10, 30, 12.9),
            offset: None,
        });
        assert_eq!(decoded, Value::DateTime(datetime(day(), 10, 30, 12).unwrap()));
    }

    #[test]
    fn test_timestamp_with_offset_drops_offset() {
        let decoded = decode(WireValue::Timestamp {
            date: day(),
            time: WireTime::new(23, 59, 59.999),
            offset: Some("+02:00".to_string()),
        });
        assert_eq!(decoded, Value::DateTime(datetime(day(), 23, 59, 59).unwrap()));
    }

    #[test]
    fn test_datetime_encode_keeps_fraction() {
        let dt = day().and_hms_milli_opt(1, 2, 3, 500).unwrap();
        match encode(&Value::DateTime(dt)) {
            WireValue::Timestamp { time, offset, .. } => {
                assert_eq!((time.hour, time.minute), (1, 2));
                assert!((time.second - 3.5).abs() < 1e-9);
                assert!(offset.is_none());
            }
            other => panic!("unexpected encoding: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_time_falls_back_to_text() {
        let decoded = decode(WireValue::Timestamp {
            date: day(),
            time: WireTime::new(25, 0, 0.0),
            offset: None,
        });
        assert_eq!(decoded, Value::String("2024-03-15 25:00:00".to_string()));
    }

    #[test]
    fn test_byte_list_concatenates() {
        let decoded = decode(WireValue::List(vec![
            WireValue::Int(0x01),
            WireValue::Bytes(Bytes::from_static(&[0x02, 0x03])),
            WireValue::List(vec![WireValue::Int(0x04)]),
        ]));
        assert_eq!(decoded, Value::Bytes(Bytes::from_static(&[1, 2, 3, 4])));
    }

    #[test]
    fn test_mixed_byte_list_joins_as_text() {
        let decoded = decode(WireValue::List(vec![
            WireValue::Text("AB".to_string()),
            WireValue::Null,
            WireValue::List(vec![WireValue::Null, WireValue::Text("C".to_string())]),
            WireValue::Int(1000),
        ]));
        assert_eq!(decoded, Value::String("ABC1000".to_string()));
    }

    #[test]
    fn test_decode_result_set_applies_mapper() {
        let rs = ResultSet::with_columns(
            vec!["N".to_string()],
            vec![smallvec![WireValue::wrapped(WireValue::Int(1))]],
        );
        let mapper: RowMapper = Arc::new(|mut row: Row| {
            row.push(Value::from("extra"));
            row
        });
        let decoded = decode_result_set(rs, Some(&mapper));
        assert_eq!(decoded.rows()[0].as_slice(), &[Value::Int(1), Value::from("extra")]);
    }

    #[test]
    fn test_decode_is_noop_without_rows() {
        let mapper: RowMapper = Arc::new(|_: Row| -> Row { panic!("mapper must not run") });

        let decoded = decode_result_set(ResultSet::affected(3), Some(&mapper));
        assert_eq!(decoded, ResultSet::affected(3));

        let empty: ResultSet<WireValue> = ResultSet::with_columns(vec!["A".to_string()], vec![]);
        let decoded = decode_result_set(empty, Some(&mapper));
        assert!(decoded.is_empty());
        assert_eq!(decoded.row_count(), 0);
    }
}
