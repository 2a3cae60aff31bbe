// skink-vm - Bytecode compiler and virtual machine for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Bytecode instruction definitions.
//!
//! Instructions are fixed-size records: an opcode tag plus inline
//! operands. They operate on a value stack; jump operands are absolute
//! instruction addresses within the current function's sequence. Formal
//! and local slots are addressed by index; the `*Outer` variants carry a
//! link depth resolved by walking captured-frame links at run time.

use std::rc::Rc;

use skink_runtime::Value;

use crate::function::UserFunction;

/// Bytecode instructions for the skink VM.
#[derive(Debug, Clone)]
pub enum Instr {
    // =========================================================================
    // Constants & Stack
    // =========================================================================
    /// Push an immediate constant.
    Const(Value),

    /// Pop the top value.
    Drop,

    /// Duplicate the top value.
    Dup,

    // =========================================================================
    // Variables & Properties
    // =========================================================================
    /// Push the current frame's formal slot `n`.
    LoadFormal(usize),

    /// Pop into the current frame's formal slot `n`.
    StoreFormal(usize),

    /// Push the current frame's local slot `n`.
    LoadLocal(usize),

    /// Pop into the current frame's local slot `n`.
    StoreLocal(usize),

    /// Walk `link` captured-frame links, push that frame's formal slot.
    LoadFormalOuter { link: usize, index: usize },

    /// Walk `link` captured-frame links, pop into that frame's formal slot.
    StoreFormalOuter { link: usize, index: usize },

    /// Walk `link` captured-frame links, push that frame's local slot.
    LoadLocalOuter { link: usize, index: usize },

    /// Walk `link` captured-frame links, pop into that frame's local slot.
    StoreLocalOuter { link: usize, index: usize },

    /// Push the global object.
    GetGlobal,

    /// Push the current frame's `this` value.
    This,

    /// Property read: pop name, pop object, push the property value.
    GetProp,

    /// Property write: pop name, pop object, pop value, store it.
    PutProp,

    // =========================================================================
    // Control Flow
    // =========================================================================
    /// Unconditional jump to an absolute address.
    Jump(usize),

    /// Pop; jump if the boolean coercion is true.
    JumpIfTrue(usize),

    /// Pop; jump if the boolean coercion is false.
    JumpIfFalse(usize),

    // =========================================================================
    // Functions
    // =========================================================================
    /// Push a closure pairing the descriptor with the current frame.
    Closure(Rc<UserFunction>),

    /// Call with `n` arguments: pop them, pop the callee, enter it.
    Call(usize),

    /// Return to the caller; the return value stays on the operand stack.
    Return,

    // =========================================================================
    // Operators
    // =========================================================================
    /// Push a + b where b = pop(), a = pop().
    Add,

    /// Push a - b where b = pop(), a = pop().
    Sub,

    /// Push a * b where b = pop(), a = pop().
    Mul,

    /// Push a / b where b = pop(), a = pop().
    Div,

    /// Arithmetic negation of the top value.
    Neg,

    /// Push a < b where b = pop(), a = pop(); unordered is false.
    Lt,

    /// Push a > b where b = pop(), a = pop(); unordered is false.
    Gt,

    /// Push a <= b, computed as not(b < a); unordered is false.
    LtEq,

    /// Push a >= b, computed as not(a < b); unordered is false.
    GtEq,

    /// Loose equality (not implemented by the VM).
    Eq,

    /// Loose inequality (not implemented by the VM).
    NotEq,

    /// Push a === b where b = pop(), a = pop().
    StrictEq,

    /// Push a !== b where b = pop(), a = pop().
    StrictNotEq,
}

impl Instr {
    /// Returns true for instructions carrying a jump-target operand.
    #[inline]
    pub fn is_jump(&self) -> bool {
        matches!(
            self,
            Instr::Jump(_) | Instr::JumpIfTrue(_) | Instr::JumpIfFalse(_)
        )
    }

    /// The jump-target operand, if this instruction has one.
    #[inline]
    pub fn jump_target(&self) -> Option<usize> {
        match self {
            Instr::Jump(target) | Instr::JumpIfTrue(target) | Instr::JumpIfFalse(target) => {
                Some(*target)
            }
            _ => None,
        }
    }
}
