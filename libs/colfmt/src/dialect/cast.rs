//! Special-case handlers rendering PROTO and ENUM values as casts to their
//! fully-qualified type. NULL values fall through to generic handling.

use crate::config::{DialectConfig, Handled};
use crate::error::FormatError;
use crate::escape::quote_bytes;
use crate::scalar::{self, NullableScalar};
use crate::types::Type;
use crate::value::TypedRef;

/// ``CAST(b"..." AS `pkg.Message`)``.
pub fn format_proto_as_cast(_config: &DialectConfig, value: TypedRef<'_>, _toplevel: bool) -> Result<Handled, FormatError> {
    if !matches!(value.ty, Type::Proto { .. }) {
        return Ok(Handled::Fallthrough);
    }
    match scalar::decode_bytes(value.value).map_err(|detail| FormatError::decode(value.ty, detail))? {
        Some(bytes) => Ok(Handled::Rendered(format!("CAST({} AS {})", quote_bytes(&bytes), value.ty))),
        None => Ok(Handled::Fallthrough),
    }
}

/// ``CAST(42 AS `pkg.Enum`)``.
pub fn format_enum_as_cast(_config: &DialectConfig, value: TypedRef<'_>, _toplevel: bool) -> Result<Handled, FormatError> {
    if !matches!(value.ty, Type::Enum { .. }) {
        return Ok(Handled::Fallthrough);
    }
    match scalar::decode(value)? {
        NullableScalar::Enum(Some(n)) => Ok(Handled::Rendered(format!("CAST({n} AS {})", value.ty))),
        _ => Ok(Handled::Fallthrough),
    }
}
