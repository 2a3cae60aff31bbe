// skink-vm - Bytecode compiler and virtual machine for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Bytecode compiler: transforms skink ASTs into instruction sequences.

pub mod codegen;
pub mod label;
pub mod lvars;
pub mod types;

pub use codegen::CodeGen;
pub use label::{JumpLabel, LabelKind, LabelRef, LabelScope};
pub use lvars::LocalCollector;
pub use types::{CompileError, Result};
