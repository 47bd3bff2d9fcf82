use std::fmt;

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════
//  Type
// ═══════════════════════════════════════════════════════════════

/// Shape of a column value.
///
/// Serialized the way the database wire protocol spells it: an object tagged
/// by `code`, with the element type, struct fields or proto FQN alongside.
/// Codes this crate does not know deserialize as [`Type::Unspecified`] and
/// fail when formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Type {
    Bool,
    Int64,
    Float32,
    Float64,
    String,
    Bytes,
    Date,
    Timestamp,
    Numeric,
    Json,
    /// Protobuf enum, carried as INT64 on the wire.
    Enum {
        #[serde(rename = "protoTypeFqn")]
        fqn: std::string::String,
    },
    /// Protobuf message, carried as BYTES on the wire.
    Proto {
        #[serde(rename = "protoTypeFqn")]
        fqn: std::string::String,
    },
    Interval,
    Uuid,
    Array {
        #[serde(rename = "arrayElementType")]
        element: Box<Type>,
    },
    Struct {
        #[serde(rename = "structType")]
        struct_type: StructType,
    },
    #[serde(rename = "TYPE_CODE_UNSPECIFIED", other)]
    Unspecified,
}

/// Ordered struct fields. Names may be empty and need not be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructType {
    #[serde(default)]
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    /// Empty for unnamed (tuple-like) fields.
    #[serde(default)]
    pub name: std::string::String,
    #[serde(rename = "type")]
    pub ty: Type,
}

impl StructField {
    pub fn new(name: impl Into<std::string::String>, ty: Type) -> Self {
        Self { name: name.into(), ty }
    }

    /// Shortcut: unnamed field.
    pub fn unnamed(ty: Type) -> Self {
        Self::new("", ty)
    }
}

impl Type {
    pub fn array(element: Type) -> Self {
        Type::Array { element: Box::new(element) }
    }

    pub fn structure(fields: Vec<StructField>) -> Self {
        Type::Struct { struct_type: StructType { fields } }
    }

    pub fn proto(fqn: impl Into<std::string::String>) -> Self {
        Type::Proto { fqn: fqn.into() }
    }

    pub fn enumeration(fqn: impl Into<std::string::String>) -> Self {
        Type::Enum { fqn: fqn.into() }
    }

    /// ARRAY and STRUCT recurse into child values; everything else is a scalar.
    pub fn is_container(&self) -> bool {
        matches!(self, Type::Array { .. } | Type::Struct { .. })
    }

    /// Upper-case type code, as used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Type::Bool => "BOOL",
            Type::Int64 => "INT64",
            Type::Float32 => "FLOAT32",
            Type::Float64 => "FLOAT64",
            Type::String => "STRING",
            Type::Bytes => "BYTES",
            Type::Date => "DATE",
            Type::Timestamp => "TIMESTAMP",
            Type::Numeric => "NUMERIC",
            Type::Json => "JSON",
            Type::Enum { .. } => "ENUM",
            Type::Proto { .. } => "PROTO",
            Type::Interval => "INTERVAL",
            Type::Uuid => "UUID",
            Type::Array { .. } => "ARRAY",
            Type::Struct { .. } => "STRUCT",
            Type::Unspecified => "TYPE_CODE_UNSPECIFIED",
        }
    }
}

/// Verbose SQL type syntax: `ARRAY<STRUCT<id INT64, STRING>>`, with proto and
/// enum names back-quoted so the annotation parses as a type expression.
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Enum { fqn } | Type::Proto { fqn } => write!(f, "`{fqn}`"),
            Type::Array { element } => write!(f, "ARRAY<{element}>"),
            Type::Struct { struct_type } => {
                f.write_str("STRUCT<")?;
                for (i, field) in struct_type.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if !field.name.is_empty() {
                        write!(f, "{} ", field.name)?;
                    }
                    write!(f, "{}", field.ty)?;
                }
                f.write_str(">")
            }
            other => f.write_str(other.code()),
        }
    }
}
