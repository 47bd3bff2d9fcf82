use crate::types::Type;

/// Error returned by every fallible formatting call.
///
/// There is no partial output: the first error aborts the whole column (or
/// row) and is handed back unchanged, wrapped in [`FormatError::Column`] when
/// it happened inside [`crate::format_row`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    /// The type tag is unspecified or not known to the decoder.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// The dynamic value does not have the shape its type declares.
    #[error("decode {ty}: {detail}")]
    Decode { ty: String, detail: String },

    /// The dialect has no lossless rendering for this scalar kind.
    #[error("{dialect} dialect cannot render {kind} values")]
    Unsupported { dialect: String, kind: &'static str },

    #[error("column {index}: {source}")]
    Column {
        index: usize,
        #[source]
        source: Box<FormatError>,
    },

    /// A construction helper was handed values that do not fit together.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl FormatError {
    pub fn decode(ty: &Type, detail: impl Into<String>) -> Self {
        Self::Decode { ty: ty.to_string(), detail: detail.into() }
    }

    pub fn unsupported(dialect: impl Into<String>, kind: &'static str) -> Self {
        Self::Unsupported { dialect: dialect.into(), kind }
    }

    /// Attach the column position, keeping the original error as the source.
    pub fn in_column(self, index: usize) -> Self {
        Self::Column { index, source: Box::new(self) }
    }
}
