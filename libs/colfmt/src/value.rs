use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormatError;
use crate::types::Type;

// ═══════════════════════════════════════════════════════════════
//  TypedValue
// ═══════════════════════════════════════════════════════════════

/// One column value: a type and the dynamic value it describes.
///
/// For `STRUCT` the value is a list with exactly one entry per field, in
/// field order. Struct values themselves are never null; their fields may be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedValue {
    #[serde(rename = "type")]
    pub ty: Type,
    pub value: Value,
}

impl TypedValue {
    pub fn new(ty: Type, value: Value) -> Self {
        Self { ty, value }
    }

    pub fn as_typed_ref(&self) -> TypedRef<'_> {
        TypedRef { ty: &self.ty, value: &self.value }
    }
}

/// Borrowed (type, value) pair. The formatter builds a fresh one for every
/// array element and struct field it visits.
#[derive(Debug, Clone, Copy)]
pub struct TypedRef<'a> {
    pub ty: &'a Type,
    pub value: &'a Value,
}

impl<'a> TypedRef<'a> {
    pub fn new(ty: &'a Type, value: &'a Value) -> Self {
        Self { ty, value }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn to_owned_value(&self) -> TypedValue {
        TypedValue::new(self.ty.clone(), self.value.clone())
    }
}

impl<'a> From<&'a TypedValue> for TypedRef<'a> {
    fn from(value: &'a TypedValue) -> Self {
        value.as_typed_ref()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Row
// ═══════════════════════════════════════════════════════════════

/// A result row as handed over by the database client.
///
/// The formatter only needs the column count and a way to materialize each
/// column as a [`TypedValue`]; how that happens is up to the client.
pub trait Row {
    fn column_count(&self) -> usize;
    fn column(&self, index: usize) -> Result<TypedValue, FormatError>;
}

impl Row for [TypedValue] {
    fn column_count(&self) -> usize {
        self.len()
    }

    fn column(&self, index: usize) -> Result<TypedValue, FormatError> {
        self.get(index)
            .cloned()
            .ok_or_else(|| FormatError::InvalidValue(format!("column {index} out of range ({})", self.len())))
    }
}

impl Row for Vec<TypedValue> {
    fn column_count(&self) -> usize {
        self.as_slice().column_count()
    }

    fn column(&self, index: usize) -> Result<TypedValue, FormatError> {
        self.as_slice().column(index)
    }
}
