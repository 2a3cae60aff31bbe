// skink-vm - Bytecode compiler and virtual machine for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Runtime errors for the VM.

/// Runtime error during VM execution.
#[derive(Debug, Clone)]
pub enum RuntimeError {
    /// Stack underflow.
    StackUnderflow,
    /// The called value is not a function.
    NotCallable(String),
    /// A value-level operation failed (bad coercion, unsupported operand
    /// types, property access on a non-object).
    Value(skink_runtime::Error),
    /// Internal error; indicates a compiler or VM bug.
    Internal(String),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::StackUnderflow => write!(f, "Stack underflow"),
            RuntimeError::NotCallable(typ) => write!(f, "Value is not callable: {}", typ),
            RuntimeError::Value(err) => write!(f, "{}", err),
            RuntimeError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<skink_runtime::Error> for RuntimeError {
    fn from(err: skink_runtime::Error) -> Self {
        RuntimeError::Value(err)
    }
}

/// Result type for VM operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
