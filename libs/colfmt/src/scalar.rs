use std::fmt;

use base64::Engine;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::error::FormatError;
use crate::escape::{double_quote_string, readable_bytes};
use crate::float::{non_finite, shortest_f32, shortest_f64};
use crate::interval::Interval;
use crate::numeric::Numeric;
use crate::types::Type;
use crate::value::TypedRef;

const NULL_DISPLAY: &str = "<null>";

// ═══════════════════════════════════════════════════════════════
//  NullableScalar
// ═══════════════════════════════════════════════════════════════

/// A decoded scalar column value, one variant per scalar type.
///
/// `None` is SQL NULL. ENUM and PROTO decode exactly like INT64 and BYTES
/// but keep their own variant so dialects can render them as casts.
#[derive(Debug, Clone, PartialEq)]
pub enum NullableScalar {
    Bool(Option<bool>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    String(Option<String>),
    Bytes(Option<Vec<u8>>),
    Date(Option<NaiveDate>),
    Timestamp(Option<DateTime<Utc>>),
    Numeric(Option<Numeric>),
    Json(Option<Value>),
    Interval(Option<Interval>),
    Uuid(Option<Uuid>),
    Enum(Option<i64>),
    Proto(Option<Vec<u8>>),
}

impl NullableScalar {
    pub fn is_null(&self) -> bool {
        match self {
            NullableScalar::Bool(v) => v.is_none(),
            NullableScalar::Int64(v) | NullableScalar::Enum(v) => v.is_none(),
            NullableScalar::Float32(v) => v.is_none(),
            NullableScalar::Float64(v) => v.is_none(),
            NullableScalar::String(v) => v.is_none(),
            NullableScalar::Bytes(v) | NullableScalar::Proto(v) => v.is_none(),
            NullableScalar::Date(v) => v.is_none(),
            NullableScalar::Timestamp(v) => v.is_none(),
            NullableScalar::Numeric(v) => v.is_none(),
            NullableScalar::Json(v) => v.is_none(),
            NullableScalar::Interval(v) => v.is_none(),
            NullableScalar::Uuid(v) => v.is_none(),
        }
    }

    /// Type keyword, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            NullableScalar::Bool(_) => "BOOL",
            NullableScalar::Int64(_) => "INT64",
            NullableScalar::Float32(_) => "FLOAT32",
            NullableScalar::Float64(_) => "FLOAT64",
            NullableScalar::String(_) => "STRING",
            NullableScalar::Bytes(_) => "BYTES",
            NullableScalar::Date(_) => "DATE",
            NullableScalar::Timestamp(_) => "TIMESTAMP",
            NullableScalar::Numeric(_) => "NUMERIC",
            NullableScalar::Json(_) => "JSON",
            NullableScalar::Interval(_) => "INTERVAL",
            NullableScalar::Uuid(_) => "UUID",
            NullableScalar::Enum(_) => "ENUM",
            NullableScalar::Proto(_) => "PROTO",
        }
    }
}

/// Default (debug) rendering. Strings, dates, timestamps and numerics are
/// double-quoted; NULL is `<null>`.
impl fmt::Display for NullableScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str(NULL_DISPLAY);
        }
        match self {
            NullableScalar::Bool(Some(v)) => write!(f, "{v}"),
            NullableScalar::Int64(Some(v)) | NullableScalar::Enum(Some(v)) => write!(f, "{v}"),
            NullableScalar::Float32(Some(v)) => f.write_str(&display_float(f64::from(*v), || shortest_f32(*v))),
            NullableScalar::Float64(Some(v)) => f.write_str(&display_float(*v, || shortest_f64(*v))),
            NullableScalar::String(Some(v)) => f.write_str(&double_quote_string(v)),
            NullableScalar::Bytes(Some(v)) | NullableScalar::Proto(Some(v)) => f.write_str(&readable_bytes(v)),
            NullableScalar::Date(Some(v)) => write!(f, "\"{v}\""),
            NullableScalar::Timestamp(Some(v)) => write!(f, "\"{}\"", format_timestamp(v)),
            NullableScalar::Numeric(Some(v)) => write!(f, "\"{v}\""),
            NullableScalar::Json(Some(v)) => write!(f, "{v}"),
            NullableScalar::Interval(Some(v)) => write!(f, "{v}"),
            NullableScalar::Uuid(Some(v)) => write!(f, "{v}"),
            _ => f.write_str(NULL_DISPLAY),
        }
    }
}

fn display_float(v: f64, finite: impl FnOnce() -> String) -> String {
    non_finite(v).map_or_else(finite, str::to_string)
}

/// RFC 3339 in UTC with trailing fraction zeros trimmed:
/// `2018-01-23T03:00:00Z`, `2018-01-23T03:00:00.5Z`. Leap seconds are kept:
/// `2016-12-31T23:59:60.5Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    let mut out = ts.format("%Y-%m-%dT%H:%M:%S").to_string();
    // A leap second prints as second 60; its nanos carry an extra 1e9.
    let nanos = ts.timestamp_subsec_nanos() % 1_000_000_000;
    if nanos != 0 {
        let frac = format!("{nanos:09}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out.push('Z');
    out
}

// ═══════════════════════════════════════════════════════════════
//  Decoder
// ═══════════════════════════════════════════════════════════════

/// Decode a scalar-typed value. Dispatches on the type tag only.
///
/// NULL is reported through [`NullableScalar::is_null`], not as an error.
/// Containers and unspecified types are rejected.
pub fn decode(value: TypedRef<'_>) -> Result<NullableScalar, FormatError> {
    let ty = value.ty;
    let v = value.value;
    let fail = |detail: String| FormatError::decode(ty, detail);

    let scalar = match ty {
        Type::Bool => NullableScalar::Bool(decode_bool(v).map_err(fail)?),
        Type::Int64 => NullableScalar::Int64(decode_int64(v).map_err(fail)?),
        Type::Enum { .. } => NullableScalar::Enum(decode_int64(v).map_err(fail)?),
        Type::Float32 => NullableScalar::Float32(decode_float(v).map_err(fail)?.map(|f| f as f32)),
        Type::Float64 => NullableScalar::Float64(decode_float(v).map_err(fail)?),
        Type::String => NullableScalar::String(decode_str(v).map_err(fail)?.map(str::to_string)),
        Type::Bytes => NullableScalar::Bytes(decode_bytes(v).map_err(fail)?),
        Type::Proto { .. } => NullableScalar::Proto(decode_bytes(v).map_err(fail)?),
        Type::Date => NullableScalar::Date(decode_parsed(v).map_err(fail)?),
        Type::Timestamp => NullableScalar::Timestamp(decode_timestamp(v).map_err(fail)?),
        Type::Numeric => NullableScalar::Numeric(decode_parsed(v).map_err(fail)?),
        Type::Json => NullableScalar::Json(decode_json(v).map_err(fail)?),
        Type::Interval => NullableScalar::Interval(decode_parsed(v).map_err(fail)?),
        Type::Uuid => NullableScalar::Uuid(decode_parsed(v).map_err(fail)?),
        Type::Array { .. } | Type::Struct { .. } => {
            return Err(fail("container type is not a scalar".to_string()));
        }
        Type::Unspecified => return Err(FormatError::UnknownType(ty.code().to_string())),
    };
    Ok(scalar)
}

fn unexpected(expected: &str, v: &Value) -> String {
    format!("expected {expected}, got {v}")
}

fn decode_bool(v: &Value) -> Result<Option<bool>, String> {
    match v {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        other => Err(unexpected("bool", other)),
    }
}

/// INT64 travels as a decimal string; plain JSON integers are accepted too.
fn decode_int64(v: &Value) -> Result<Option<i64>, String> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => s.parse().map(Some).map_err(|e| format!("{s:?}: {e}")),
        Value::Number(n) => n.as_i64().map(Some).ok_or_else(|| unexpected("integer", v)),
        other => Err(unexpected("integer string", other)),
    }
}

/// Finite floats are JSON numbers; NaN and infinities are strings.
fn decode_float(v: &Value) -> Result<Option<f64>, String> {
    match v {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| unexpected("number", v)),
        Value::String(s) => match s.as_str() {
            "NaN" => Ok(Some(f64::NAN)),
            "Infinity" => Ok(Some(f64::INFINITY)),
            "-Infinity" => Ok(Some(f64::NEG_INFINITY)),
            _ => Err(unexpected("number, NaN or Infinity", v)),
        },
        other => Err(unexpected("number", other)),
    }
}

fn decode_str(v: &Value) -> Result<Option<&str>, String> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(unexpected("string", other)),
    }
}

pub(crate) fn decode_bytes(v: &Value) -> Result<Option<Vec<u8>>, String> {
    let Some(s) = decode_str(v)? else {
        return Ok(None);
    };
    base64::engine::general_purpose::STANDARD
        .decode(s)
        .map(Some)
        .map_err(|e| format!("base64: {e}"))
}

fn decode_parsed<T>(v: &Value) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let Some(s) = decode_str(v)? else {
        return Ok(None);
    };
    s.parse().map(Some).map_err(|e| format!("{s:?}: {e}"))
}

fn decode_timestamp(v: &Value) -> Result<Option<DateTime<Utc>>, String> {
    let Some(s) = decode_str(v)? else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(s)
        .map(|ts| Some(ts.with_timezone(&Utc)))
        .map_err(|e| format!("{s:?}: {e}"))
}

/// The JSON document arrives as text; it is parsed so rendering is canonical.
/// Numbers keep their exact text, however many digits they carry.
fn decode_json(v: &Value) -> Result<Option<Value>, String> {
    let Some(s) = decode_str(v)? else {
        return Ok(None);
    };
    serde_json::from_str(s).map(Some).map_err(|e| format!("json: {e}"))
}
