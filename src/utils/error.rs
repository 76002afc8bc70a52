use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid email address: {value}")]
    InvalidEmail { value: String },

    #[error("Invalid student number: {number}")]
    InvalidNumber { number: i64 },

    #[error("Student with number {number} already exists")]
    DuplicateNumber { number: i64 },

    #[error("Student with email {email} already exists")]
    DuplicateEmail { email: String },

    #[error("Parse error at line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("Unknown student field: {field}")]
    UnknownField { field: String },

    #[error("Field '{field}' value '{value}' is not an integer")]
    NonNumericField { field: String, value: String },

    #[error("Index {index} out of bounds for collection of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

pub type Result<T> = std::result::Result<T, RosterError>;
