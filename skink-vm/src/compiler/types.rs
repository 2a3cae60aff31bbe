// skink-vm - Bytecode compiler and virtual machine for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Compiler error types.

use std::fmt;

/// Errors reported while compiling an AST to bytecode.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Structurally invalid program (bad assignment target, unknown break
    /// or continue target, duplicate label, return at the top level).
    Syntax(String),
    /// A construct the compiler recognises but does not yet support.
    Unsupported(String),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Syntax(msg) => write!(f, "Syntax error: {}", msg),
            CompileError::Unsupported(what) => write!(f, "Not implemented: {}", what),
        }
    }
}

impl std::error::Error for CompileError {}

pub type Result<T> = std::result::Result<T, CompileError>;
