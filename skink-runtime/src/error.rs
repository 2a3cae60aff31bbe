// skink-runtime - Value model, object store, and execution context for skink
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Runtime value errors.

/// Error raised by value-level operations.
#[derive(Debug, Clone)]
pub enum Error {
    /// Operation not implemented for these operand types.
    NotImplemented { op: &'static str, detail: String },
    /// Wrong value type for an operation.
    TypeError {
        expected: &'static str,
        got: &'static str,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotImplemented { op, detail } => {
                write!(f, "Not implemented: {} on {}", op, detail)
            }
            Error::TypeError { expected, got } => {
                write!(f, "Type error: expected {}, got {}", expected, got)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type for value operations.
pub type Result<T> = std::result::Result<T, Error>;
