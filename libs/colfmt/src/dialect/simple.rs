//! Debug text: each scalar's default string, `<null>` for NULL, arrays in
//! brackets and structs as tuples with `AS name` suffixes. Not parseable.

use std::borrow::Cow;

use crate::config::{DialectConfig, FormatStruct, format_named_struct_field, format_tuple_struct, format_untyped_array};
use crate::error::FormatError;
use crate::scalar::NullableScalar;
use crate::value::{Row, TypedValue};

pub static CONFIG: DialectConfig = DialectConfig {
    name: Cow::Borrowed("simple"),
    null_string: Cow::Borrowed("<null>"),
    format_array: format_untyped_array,
    format_struct: FormatStruct {
        field: format_named_struct_field,
        paren: format_tuple_struct,
    },
    format_scalar: format_scalar_simple,
    special_cases: Cow::Borrowed(&[]),
};

pub fn format_column(value: &TypedValue) -> Result<String, FormatError> {
    CONFIG.format_column(value)
}

pub fn format_row<R: Row + ?Sized>(row: &R) -> Result<Vec<String>, FormatError> {
    CONFIG.format_row(row)
}

pub fn format_scalar_simple(_config: &DialectConfig, value: &NullableScalar) -> Result<String, FormatError> {
    Ok(value.to_string())
}
