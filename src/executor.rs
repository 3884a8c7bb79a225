//! Host-side value and result model.
//!
//! Rows are decoded once per fetch into `Value`s; the pool framework and its
//! callers only ever see these types, never the wire client's shapes.

use std::sync::Arc;

use bytes::Bytes;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use smallvec::SmallVec;

// Re-export serde_json::Value for opaque pass-through values
pub use serde_json::Value as JsonValue;

/// Marker carried by a tagged value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    /// Raw binary that must travel as lower-case hex text.
    Binary,
    /// Any other caller-defined tag; only the inner value is sent.
    Named(String),
}

/// A host value, as bound into parameters or decoded out of a row.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    String(String),
    Bytes(Bytes),
    /// Date and time, whole seconds when decoded from a row.
    DateTime(NaiveDateTime),
    /// A value wrapped with a type hint for the encoder.
    Tagged(Tag, Box<Value>),
    /// Opaque value passed through the codec untouched.
    Json(JsonValue),
}

impl Value {
    /// Wrap raw bytes so they are sent as hex text.
    pub fn binary(data: impl Into<Bytes>) -> Self {
        Value::Tagged(Tag::Binary, Box::new(Value::Bytes(data.into())))
    }

    /// Wrap a value with a named tag.
    pub fn tagged(tag: impl Into<String>, value: Value) -> Self {
        Value::Tagged(Tag::Named(tag.into()), Box::new(value))
    }

    /// Check if this value is NULL
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A row stored as column values.
/// Uses SmallVec to inline storage for rows with ≤16 columns (most tables),
/// avoiding heap allocation for typical workloads.
pub type Row<T = Value> = SmallVec<[T; 16]>;

/// Caller-supplied transform applied to each row after structural decode.
pub type RowMapper = Arc<dyn Fn(Row) -> Row + Send + Sync>;

/// Result of one execute round trip.
///
/// The wire client hands back the complete result in a single reply, so a
/// `ResultSet` is never partial.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultSet<T = Value> {
    /// Column names, absent when the reply carried rows only
    pub columns: Option<Vec<String>>,
    /// Number of rows returned, or rows affected for DML
    pub row_count: u64,
    /// Row data, absent for row-count-only replies
    pub rows: Option<Vec<Row<T>>>,
}

impl<T> ResultSet<T> {
    /// Tabular reply with a column list.
    pub fn with_columns(columns: Vec<String>, rows: Vec<Row<T>>) -> Self {
        Self {
            columns: Some(columns),
            row_count: rows.len() as u64,
            rows: Some(rows),
        }
    }

    /// Tabular reply without a column list.
    pub fn rows_only(rows: Vec<Row<T>>) -> Self {
        Self {
            columns: None,
            row_count: rows.len() as u64,
            rows: Some(rows),
        }
    }

    /// Row-count-only reply (DML, DDL, transaction control).
    pub fn affected(row_count: u64) -> Self {
        Self {
            columns: None,
            row_count,
            rows: None,
        }
    }

    /// Get the column names, if any.
    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// Get the rows, or an empty slice when the reply carried none.
    pub fn rows(&self) -> &[Row<T>] {
        self.rows.as_deref().unwrap_or(&[])
    }

    /// Get the row count.
    #[inline]
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Check if there are no rows to decode.
    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

/// Successful reply to an execute call.
#[derive(Clone, Debug, PartialEq)]
pub enum Response<T = Value> {
    /// Anything shaped like a result set
    Rows(ResultSet<T>),
    /// A reply shape the classifier does not know, passed through as-is
    Other(JsonValue),
}

impl<T> Response<T> {
    /// Get the result set, if this response is one.
    pub fn result_set(&self) -> Option<&ResultSet<T>> {
        match self {
            Response::Rows(rs) => Some(rs),
            Response::Other(_) => None,
        }
    }

    /// Convert into the result set, if this response is one.
    pub fn into_result_set(self) -> Option<ResultSet<T>> {
        match self {
            Response::Rows(rs) => Some(rs),
            Response::Other(_) => None,
        }
    }
}
