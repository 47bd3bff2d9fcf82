//! Constructors for [`TypedValue`]s in wire encoding.
//!
//! Meant for tests and fixtures. Arrays and structs do no type coercion:
//! elements must already share one type.

use base64::Engine;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::error::FormatError;
use crate::interval::Interval;
use crate::numeric::Numeric;
use crate::scalar::format_timestamp;
use crate::types::{StructField, Type};
use crate::value::TypedValue;

pub fn bool_value(v: bool) -> TypedValue {
    TypedValue::new(Type::Bool, Value::Bool(v))
}

pub fn int64_value(v: i64) -> TypedValue {
    TypedValue::new(Type::Int64, Value::String(v.to_string()))
}

pub fn float64_value(v: f64) -> TypedValue {
    TypedValue::new(Type::Float64, float_to_wire(v))
}

pub fn float32_value(v: f32) -> TypedValue {
    TypedValue::new(Type::Float32, float_to_wire(f64::from(v)))
}

/// JSON numbers cannot hold NaN or infinities; the wire spells them out.
fn float_to_wire(v: f64) -> Value {
    match serde_json::Number::from_f64(v) {
        Some(n) => Value::Number(n),
        None if v.is_nan() => Value::String("NaN".to_string()),
        None if v > 0.0 => Value::String("Infinity".to_string()),
        None => Value::String("-Infinity".to_string()),
    }
}

pub fn string_value(v: impl Into<String>) -> TypedValue {
    TypedValue::new(Type::String, Value::String(v.into()))
}

pub fn bytes_value(v: &[u8]) -> TypedValue {
    bytes_based_value(Type::Bytes, v)
}

/// Any type carried as base64 on the wire (BYTES, PROTO).
pub fn bytes_based_value(ty: Type, v: &[u8]) -> TypedValue {
    TypedValue::new(ty, Value::String(base64::engine::general_purpose::STANDARD.encode(v)))
}

/// Any type carried as its canonical string.
pub fn string_based_value(ty: Type, v: impl Into<String>) -> TypedValue {
    TypedValue::new(ty, Value::String(v.into()))
}

pub fn date_value(v: NaiveDate) -> TypedValue {
    string_based_value(Type::Date, v.to_string())
}

pub fn timestamp_value(v: DateTime<Utc>) -> TypedValue {
    string_based_value(Type::Timestamp, format_timestamp(&v))
}

pub fn numeric_value(v: Numeric) -> TypedValue {
    string_based_value(Type::Numeric, v.to_string())
}

/// Serializes `v` to JSON text, as the wire carries it.
pub fn json_value<T: serde::Serialize>(v: &T) -> Result<TypedValue, FormatError> {
    let text = serde_json::to_string(v).map_err(|e| FormatError::InvalidValue(format!("json: {e}")))?;
    Ok(string_based_value(Type::Json, text))
}

pub fn interval_value(v: Interval) -> TypedValue {
    string_based_value(Type::Interval, v.to_string())
}

pub fn uuid_value(v: Uuid) -> TypedValue {
    string_based_value(Type::Uuid, v.to_string())
}

pub fn proto_value(fqn: impl Into<String>, v: &[u8]) -> TypedValue {
    bytes_based_value(Type::proto(fqn), v)
}

pub fn enum_value(fqn: impl Into<String>, v: i64) -> TypedValue {
    TypedValue::new(Type::enumeration(fqn), Value::String(v.to_string()))
}

/// ARRAY whose element type is taken from the first value. Empty input
/// has no element type; use [`array_of`] for that.
pub fn array_value(values: Vec<TypedValue>) -> Result<TypedValue, FormatError> {
    let element = values
        .first()
        .map(|v| v.ty.clone())
        .ok_or_else(|| FormatError::InvalidValue("empty array needs an explicit element type".to_string()))?;
    array_of(element, values)
}

/// ARRAY with an explicit element type; every value must have exactly it.
pub fn array_of(element: Type, values: Vec<TypedValue>) -> Result<TypedValue, FormatError> {
    let mut items = Vec::with_capacity(values.len());
    for (i, v) in values.into_iter().enumerate() {
        if v.ty != element {
            return Err(FormatError::InvalidValue(format!("element {i} is {}, not {element}", v.ty)));
        }
        items.push(v.value);
    }
    Ok(TypedValue::new(Type::array(element), Value::Array(items)))
}

/// STRUCT from parallel name and value lists. Empty names make unnamed fields.
pub fn struct_value(names: &[&str], values: Vec<TypedValue>) -> Result<TypedValue, FormatError> {
    if names.len() != values.len() {
        return Err(FormatError::InvalidValue(format!(
            "{} names for {} values",
            names.len(),
            values.len()
        )));
    }
    let (fields, items): (Vec<_>, Vec<_>) = names
        .iter()
        .zip(values)
        .map(|(name, v)| (StructField::new(*name, v.ty), v.value))
        .unzip();
    Ok(TypedValue::new(Type::structure(fields), Value::Array(items)))
}

/// NULL of the given type. Structs cannot be NULL, so a struct becomes a
/// list of NULL fields.
pub fn typed_null(ty: Type) -> TypedValue {
    let value = null_value(&ty);
    TypedValue::new(ty, value)
}

fn null_value(ty: &Type) -> Value {
    match ty {
        Type::Struct { struct_type } => Value::Array(struct_type.fields.iter().map(|f| null_value(&f.ty)).collect()),
        _ => Value::Null,
    }
}
