use crate::config::{DialectConfig, Handled};
use crate::error::FormatError;
use crate::scalar;
use crate::types::Type;
use crate::value::{Row, TypedRef, TypedValue};

impl DialectConfig {
    /// Format one value. `toplevel` is true only for the outermost
    /// expression of a column; nested values never get type annotations.
    pub fn format_value(&self, value: TypedRef<'_>, toplevel: bool) -> Result<String, FormatError> {
        match value.ty {
            Type::Array { element } => {
                if value.is_null() {
                    return Ok(self.null_string.to_string());
                }
                let items = value
                    .value
                    .as_array()
                    .ok_or_else(|| FormatError::decode(value.ty, format!("expected list, got {}", value.value)))?;
                let elements = items
                    .iter()
                    .map(|item| self.format_value(TypedRef::new(element, item), false))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((self.format_array)(value.ty, toplevel, &elements))
            }
            Type::Struct { struct_type } => {
                // There is no NULL struct: the value is always the field list.
                let items = value
                    .value
                    .as_array()
                    .ok_or_else(|| FormatError::decode(value.ty, format!("expected field list, got {}", value.value)))?;
                if items.len() != struct_type.fields.len() {
                    return Err(FormatError::decode(
                        value.ty,
                        format!("{} values for {} fields", items.len(), struct_type.fields.len()),
                    ));
                }
                // Paired by position: names may be empty or repeated.
                let fields = struct_type
                    .fields
                    .iter()
                    .zip(items)
                    .map(|(field, item)| (self.format_struct.field)(self, field, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((self.format_struct.paren)(value.ty, toplevel, &fields))
            }
            _ => {
                for handler in self.special_cases.iter() {
                    if let Handled::Rendered(s) = handler(self, value, toplevel)? {
                        return Ok(s);
                    }
                }
                self.format_scalar_value(value)
            }
        }
    }

    /// Generic scalar path: decode, then NULL token or the scalar renderer.
    fn format_scalar_value(&self, value: TypedRef<'_>) -> Result<String, FormatError> {
        let decoded = scalar::decode(value)?;
        if decoded.is_null() {
            return Ok(self.null_string.to_string());
        }
        (self.format_scalar)(self, &decoded)
    }

    /// Format a whole column value (toplevel).
    pub fn format_column(&self, value: &TypedValue) -> Result<String, FormatError> {
        self.format_value(value.as_typed_ref(), true)
    }

    /// Format every column of a row, in order. The first failing column
    /// aborts the row; its index is attached to the error.
    pub fn format_row<R: Row + ?Sized>(&self, row: &R) -> Result<Vec<String>, FormatError> {
        (0..row.column_count())
            .map(|index| {
                row.column(index)
                    .and_then(|value| self.format_column(&value))
                    .map_err(|e| {
                        tracing::debug!(dialect = %self.name, column = index, error = %e, "column format failed");
                        e.in_column(index)
                    })
            })
            .collect()
    }
}

/// Format a column value with the given dialect.
pub fn format_column(config: &DialectConfig, value: &TypedValue) -> Result<String, FormatError> {
    config.format_column(value)
}

/// Format a row with the given dialect.
pub fn format_row<R: Row + ?Sized>(config: &DialectConfig, row: &R) -> Result<Vec<String>, FormatError> {
    config.format_row(row)
}
