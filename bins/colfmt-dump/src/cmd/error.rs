#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: bad json: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Format {
        line: usize,
        #[source]
        source: colfmt::FormatError,
    },
}
