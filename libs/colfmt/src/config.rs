use std::borrow::Cow;

use serde_json::Value;

use crate::error::FormatError;
use crate::scalar::NullableScalar;
use crate::types::{StructField, Type};
use crate::value::TypedRef;

// ═══════════════════════════════════════════════════════════════
//  Strategy signatures
// ═══════════════════════════════════════════════════════════════

/// Renders an array from its already formatted elements.
/// Gets the array type so it can decide on a type annotation.
pub type FormatArrayFn = fn(ty: &Type, toplevel: bool, elements: &[String]) -> String;

/// Renders a struct from its already formatted fields.
pub type FormatStructParenFn = fn(ty: &Type, toplevel: bool, fields: &[String]) -> String;

/// Formats one struct field. Expected to recurse through
/// [`DialectConfig::format_value`] with `toplevel = false`.
pub type FormatStructFieldFn = fn(config: &DialectConfig, field: &StructField, value: &Value) -> Result<String, FormatError>;

/// Renders a non-null decoded scalar.
pub type FormatScalarFn = fn(config: &DialectConfig, value: &NullableScalar) -> Result<String, FormatError>;

/// Special-case handler tried before generic scalar handling.
pub type SpecialCaseFn = fn(config: &DialectConfig, value: TypedRef<'_>, toplevel: bool) -> Result<Handled, FormatError>;

/// Outcome of a special-case handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// The handler claimed the value.
    Rendered(String),
    /// Not applicable; try the next handler, then generic handling.
    Fallthrough,
}

#[derive(Clone, Copy)]
pub struct FormatStruct {
    pub field: FormatStructFieldFn,
    pub paren: FormatStructParenFn,
}

// ═══════════════════════════════════════════════════════════════
//  DialectConfig
// ═══════════════════════════════════════════════════════════════

/// Strategy bundle for one output dialect.
///
/// Immutable and free of interior state, so one instance (the preconfigured
/// ones are `static`) serves any number of concurrent callers. Custom
/// dialects are built by struct update from an existing one:
///
/// ```
/// use colfmt::{DialectConfig, dialect};
///
/// let quiet = DialectConfig {
///     name: "quiet".into(),
///     null_string: "".into(),
///     ..dialect::simple::CONFIG.clone()
/// };
/// # let _ = quiet;
/// ```
#[derive(Clone)]
pub struct DialectConfig {
    /// Used in error messages.
    pub name: Cow<'static, str>,
    pub null_string: Cow<'static, str>,
    pub format_array: FormatArrayFn,
    pub format_struct: FormatStruct,
    pub format_scalar: FormatScalarFn,
    /// Tried in order; the first [`Handled::Rendered`] wins.
    pub special_cases: Cow<'static, [SpecialCaseFn]>,
}

impl std::fmt::Debug for DialectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialectConfig")
            .field("name", &self.name)
            .field("null_string", &self.null_string)
            .field("special_cases", &self.special_cases.len())
            .finish_non_exhaustive()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Shared renderers
// ═══════════════════════════════════════════════════════════════

/// `[a, b]`, never annotated.
pub fn format_untyped_array(_ty: &Type, _toplevel: bool, elements: &[String]) -> String {
    format!("[{}]", elements.join(", "))
}

/// `[a, b]`, prefixed with the array type at toplevel when the element type
/// is itself a container: `ARRAY<STRUCT<INT64>>[(1), (2)]`.
pub fn format_optionally_typed_array(ty: &Type, toplevel: bool, elements: &[String]) -> String {
    let annotate = toplevel && matches!(ty, Type::Array { element } if element.is_container());
    if annotate {
        format!("{ty}[{}]", elements.join(", "))
    } else {
        format_untyped_array(ty, toplevel, elements)
    }
}

/// `(a, b)`, prefixed with the struct type at toplevel:
/// `STRUCT<INT64, STRING>(1, "foo")`.
pub fn format_typed_struct_paren(ty: &Type, toplevel: bool, fields: &[String]) -> String {
    if toplevel {
        format!("{ty}({})", fields.join(", "))
    } else {
        format_tuple_struct(ty, toplevel, fields)
    }
}

/// `(a, b)`.
pub fn format_tuple_struct(_ty: &Type, _toplevel: bool, fields: &[String]) -> String {
    format!("({})", fields.join(", "))
}

/// `[a, b]`.
pub fn format_bracket_struct(_ty: &Type, _toplevel: bool, fields: &[String]) -> String {
    format!("[{}]", fields.join(", "))
}

/// Field value only, names dropped.
pub fn format_simple_struct_field(config: &DialectConfig, field: &StructField, value: &Value) -> Result<String, FormatError> {
    config.format_value(TypedRef::new(&field.ty, value), false)
}

/// Field value with an `AS name` suffix when the field is named.
pub fn format_named_struct_field(config: &DialectConfig, field: &StructField, value: &Value) -> Result<String, FormatError> {
    let expr = config.format_value(TypedRef::new(&field.ty, value), false)?;
    if field.name.is_empty() {
        Ok(expr)
    } else {
        Ok(format!("{expr} AS {}", field.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StructField;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn array_annotation_only_for_container_elements_at_toplevel() {
        let nested = Type::array(Type::array(Type::Int64));
        let flat = Type::array(Type::Int64);
        let elems = strings(&["[1]", "[2]"]);
        assert_eq!(format_optionally_typed_array(&nested, true, &elems), "ARRAY<ARRAY<INT64>>[[1], [2]]");
        assert_eq!(format_optionally_typed_array(&nested, false, &elems), "[[1], [2]]");
        assert_eq!(format_optionally_typed_array(&flat, true, &strings(&["1"])), "[1]");
        assert_eq!(format_optionally_typed_array(&nested, true, &[]), "ARRAY<ARRAY<INT64>>[]");
    }

    #[test]
    fn struct_parens() {
        let ty = Type::structure(vec![StructField::new("a", Type::Int64), StructField::unnamed(Type::String)]);
        let fields = strings(&["1", "\"x\""]);
        assert_eq!(format_typed_struct_paren(&ty, true, &fields), "STRUCT<a INT64, STRING>(1, \"x\")");
        assert_eq!(format_typed_struct_paren(&ty, false, &fields), "(1, \"x\")");
        assert_eq!(format_bracket_struct(&ty, true, &fields), "[1, \"x\"]");
    }
}
