//! Error types for sibyl

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("No analyzer registered for language: {0}")]
    UnknownLanguage(String),

    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("No tokens produced for CONTAINS operand on field {0}")]
    NoTokens(String),

    #[error("Range operand {value} does not fit the 32-bit field {field}")]
    RangeOperand { field: String, value: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
