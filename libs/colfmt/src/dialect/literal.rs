//! Round-trippable SQL literals.
//!
//! Every supported scalar renders as an expression that parses back to the
//! same value and type. Kinds without a lossless rendering are errors rather
//! than best-effort text.

use std::borrow::Cow;

use crate::config::{
    DialectConfig, FormatStruct, SpecialCaseFn, format_optionally_typed_array, format_simple_struct_field,
    format_typed_struct_paren,
};
use crate::dialect::cast::{format_enum_as_cast, format_proto_as_cast};
use crate::error::FormatError;
use crate::escape::{quote_bytes, quote_string};
use crate::float::{shortest_f32, shortest_f64};
use crate::scalar::{NullableScalar, format_timestamp};
use crate::value::{Row, TypedValue};

const SPECIAL_CASES: &[SpecialCaseFn] = &[format_proto_as_cast, format_enum_as_cast];

pub static CONFIG: DialectConfig = DialectConfig {
    name: Cow::Borrowed("literal"),
    null_string: Cow::Borrowed("NULL"),
    format_array: format_optionally_typed_array,
    format_struct: FormatStruct {
        field: format_simple_struct_field,
        paren: format_typed_struct_paren,
    },
    format_scalar: format_scalar_literal,
    special_cases: Cow::Borrowed(SPECIAL_CASES),
};

pub fn format_column(value: &TypedValue) -> Result<String, FormatError> {
    CONFIG.format_column(value)
}

pub fn format_row<R: Row + ?Sized>(row: &R) -> Result<Vec<String>, FormatError> {
    CONFIG.format_row(row)
}

/// Scalar renderer of the literal dialect.
///
/// ENUM and PROTO need their type name to round-trip, which only the cast
/// handlers have; reaching this point with one of them is an error.
pub fn format_scalar_literal(config: &DialectConfig, value: &NullableScalar) -> Result<String, FormatError> {
    let s = match value {
        NullableScalar::Bool(Some(v)) => v.to_string(),
        NullableScalar::Int64(Some(v)) => v.to_string(),
        NullableScalar::Float32(Some(v)) => float32_literal(*v),
        NullableScalar::Float64(Some(v)) => float64_literal(*v),
        NullableScalar::String(Some(v)) => quote_string(v),
        NullableScalar::Bytes(Some(v)) => quote_bytes(v),
        NullableScalar::Date(Some(v)) => format!("DATE {}", quote_string(&v.to_string())),
        NullableScalar::Timestamp(Some(v)) => format!("TIMESTAMP {}", quote_string(&format_timestamp(v))),
        NullableScalar::Numeric(Some(v)) => format!("NUMERIC {}", quote_string(&v.to_string())),
        NullableScalar::Json(Some(v)) => format!("JSON {}", quote_string(&v.to_string())),
        // No intuitive literal syntax for these two; a cast from the
        // canonical string keeps all information.
        NullableScalar::Interval(Some(v)) => format!("CAST({} AS INTERVAL)", quote_string(&v.to_string())),
        NullableScalar::Uuid(Some(v)) => format!("CAST({} AS UUID)", quote_string(&v.to_string())),
        NullableScalar::Enum(_) | NullableScalar::Proto(_) => {
            return Err(FormatError::unsupported(config.name.clone(), value.kind()));
        }
        _ => config.null_string.to_string(),
    };
    Ok(s)
}

fn float64_literal(v: f64) -> String {
    if v.is_nan() {
        "CAST('nan' AS FLOAT64)".to_string()
    } else if v == f64::INFINITY {
        "CAST('inf' AS FLOAT64)".to_string()
    } else if v == f64::NEG_INFINITY {
        "CAST('-inf' AS FLOAT64)".to_string()
    } else {
        shortest_f64(v)
    }
}

/// Always a cast, so the value is read back as FLOAT32 rather than FLOAT64.
fn float32_literal(v: f32) -> String {
    if v.is_nan() {
        "CAST('nan' AS FLOAT32)".to_string()
    } else if v == f32::INFINITY {
        "CAST('inf' AS FLOAT32)".to_string()
    } else if v == f32::NEG_INFINITY {
        "CAST('-inf' AS FLOAT32)".to_string()
    } else {
        format!("CAST({} AS FLOAT32)", shortest_f32(v))
    }
}
