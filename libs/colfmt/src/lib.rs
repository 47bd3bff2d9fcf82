//! Typed column value formatting.
//!
//! A column value is a [`TypedValue`]: a [`Type`] paired with a JSON-shaped
//! dynamic value. [`DialectConfig`] walks that tree and renders it as text in
//! one of three dialects:
//!
//! - [`dialect::literal`]: round-trippable SQL literals.
//! - [`dialect::simple`]: debug text, `<null>` for NULL.
//! - [`dialect::compat`]: byte-for-byte the output of the legacy CLI client.

pub mod config;
pub mod ctor;
pub mod dialect;
pub mod error;
pub mod escape;
pub mod format;
pub mod interval;
pub mod numeric;
pub mod scalar;
pub mod types;
pub mod value;

mod float;

pub use config::{DialectConfig, FormatStruct, Handled, SpecialCaseFn};
pub use dialect::Dialect;
pub use error::FormatError;
pub use format::{format_column, format_row};
pub use scalar::NullableScalar;
pub use types::{StructField, StructType, Type};
pub use value::{Row, TypedRef, TypedValue};
