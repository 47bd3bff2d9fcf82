//! Output of the legacy interactive CLI client, byte for byte.
//!
//! Strings print raw, bytes as base64, floats in fixed point with six
//! fraction digits, numerics with trailing zeros trimmed, JSON re-marshalled
//! the legacy way, structs in brackets. Trades round-tripping for compatibility.

use std::borrow::Cow;

use base64::Engine;

use crate::config::{
    DialectConfig, FormatStruct, SpecialCaseFn, format_bracket_struct, format_simple_struct_field, format_untyped_array,
};
use crate::dialect::cast::{format_enum_as_cast, format_proto_as_cast};
use crate::dialect::legacy_json::to_legacy_json;
use crate::error::FormatError;
use crate::float::fixed6;
use crate::scalar::{NullableScalar, format_timestamp};
use crate::value::{Row, TypedValue};

const SPECIAL_CASES: &[SpecialCaseFn] = &[format_proto_as_cast, format_enum_as_cast];

pub static CONFIG: DialectConfig = DialectConfig {
    name: Cow::Borrowed("compat"),
    null_string: Cow::Borrowed("NULL"),
    format_array: format_untyped_array,
    format_struct: FormatStruct {
        field: format_simple_struct_field,
        paren: format_bracket_struct,
    },
    format_scalar: format_scalar_compat,
    special_cases: Cow::Borrowed(SPECIAL_CASES),
};

pub fn format_column(value: &TypedValue) -> Result<String, FormatError> {
    CONFIG.format_column(value)
}

pub fn format_row<R: Row + ?Sized>(row: &R) -> Result<Vec<String>, FormatError> {
    CONFIG.format_row(row)
}

pub fn format_scalar_compat(config: &DialectConfig, value: &NullableScalar) -> Result<String, FormatError> {
    let s = match value {
        NullableScalar::String(Some(v)) => v.clone(),
        NullableScalar::Bool(Some(v)) => v.to_string(),
        NullableScalar::Bytes(Some(v)) | NullableScalar::Proto(Some(v)) => {
            base64::engine::general_purpose::STANDARD.encode(v)
        }
        NullableScalar::Float32(Some(v)) => fixed6(f64::from(*v)),
        NullableScalar::Float64(Some(v)) => fixed6(*v),
        NullableScalar::Int64(Some(v)) | NullableScalar::Enum(Some(v)) => v.to_string(),
        NullableScalar::Numeric(Some(v)) => v.to_trimmed_string(),
        NullableScalar::Timestamp(Some(v)) => format_timestamp(v),
        NullableScalar::Date(Some(v)) => v.to_string(),
        NullableScalar::Json(Some(v)) => to_legacy_json(v)?,
        NullableScalar::Interval(Some(v)) => v.to_string(),
        NullableScalar::Uuid(Some(v)) => v.to_string(),
        _ => config.null_string.to_string(),
    };
    Ok(s)
}
