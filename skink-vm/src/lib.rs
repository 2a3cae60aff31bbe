// skink-vm - Bytecode compiler and virtual machine for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! # skink-vm
//!
//! Bytecode compiler and stack-based virtual machine for skink. ASTs from
//! `skink-ast` are compiled into per-function instruction sequences, then
//! executed by a dispatch loop over an operand stack. Lexical closures are
//! supported through a dual-chain frame model: a LIFO call chain owned by
//! the VM and a shared, reference-counted capture chain that lets a frame
//! outlive the call that created it.

pub mod compiler;
pub mod function;
pub mod opcode;
pub mod utils;
pub mod vm;

pub use compiler::codegen::CodeGen;
pub use compiler::label::{JumpLabel, LabelKind, LabelRef, LabelScope};
pub use compiler::types::{CompileError, Result as CompileResult};
pub use function::{
    CodeSeq, FunctionObject, FunctionObjectWrapper, NativeFunction, SlotTable, UserFunction,
};
pub use opcode::Instr;
pub use utils::{function_object, native_function};
pub use vm::{Frame, Interpreter, Result as RuntimeResult, RuntimeError};
