// skink-vm - Bytecode compiler and virtual machine for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Forward-reference jump labels and the break/continue scope.
//!
//! A `JumpLabel` decouples emitting a jump from knowing its target: jumps
//! referred before the label is resolved are emitted with a placeholder
//! operand and patched in place once the address is known. `LabelScope`
//! tracks which labels `break` and `continue` statements may target at
//! each point of a function body.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::compiler::types::{CompileError, Result};
use crate::function::CodeSeq;
use crate::opcode::Instr;

/// Shared handle to a label; loops hand the same label to every jump that
/// targets it.
pub type LabelRef = Rc<RefCell<JumpLabel>>;

/// A jump target that may be referred to before its address is known.
///
/// Pending sites index the code sequence passed to `refer`; `resolve` must
/// receive that same sequence. Labels never cross a function boundary, so
/// in practice this is always the sequence of the function being compiled.
#[derive(Debug, Default)]
pub struct JumpLabel {
    resolved: Option<usize>,
    pending: Vec<usize>,
}

impl JumpLabel {
    pub fn new() -> Self {
        JumpLabel {
            resolved: None,
            pending: Vec::new(),
        }
    }

    pub fn new_ref() -> LabelRef {
        Rc::new(RefCell::new(JumpLabel::new()))
    }

    /// Emit a jump to this label. `make` builds the instruction from a
    /// target address; jump variant constructors fit directly. Before
    /// resolution the operand is a placeholder and the site is recorded
    /// for patching.
    pub fn refer(&mut self, code: &mut CodeSeq, make: fn(usize) -> Instr) {
        match self.resolved {
            Some(address) => code.emit(make(address)),
            None => {
                self.pending.push(code.len());
                code.emit(make(CodeSeq::UNPATCHED));
            }
        }
    }

    /// Fix the label to `address` and patch every pending site. A label
    /// resolves exactly once.
    pub fn resolve(&mut self, code: &mut CodeSeq, address: usize) {
        assert!(self.resolved.is_none(), "jump label resolved twice");
        self.resolved = Some(address);
        for site in self.pending.drain(..) {
            code.patch_target(site, address);
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// The resolved address, if resolution has happened.
    pub fn address(&self) -> Option<usize> {
        self.resolved
    }
}

/// Which statement kind a lookup serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Break,
    Continue,
}

#[derive(Debug)]
struct AnonEntry {
    break_label: LabelRef,
    /// Absent for `switch`, which is a break target but not a continue
    /// target.
    continue_label: Option<LabelRef>,
}

/// Break/continue targets visible at the current compile position.
///
/// Named registries hold statement labels (`foo: while ...`); the
/// anonymous stack holds one entry per enclosing loop or switch. A bare
/// `break` binds to the innermost entry only, while a bare `continue`
/// searches outward for the nearest enclosing loop, skipping switches.
#[derive(Debug, Default)]
pub struct LabelScope {
    named_break: HashMap<String, LabelRef>,
    named_continue: HashMap<String, LabelRef>,
    anon: Vec<AnonEntry>,
}

impl LabelScope {
    pub fn new() -> Self {
        LabelScope::default()
    }

    /// Register statement labels for the duration of their statement.
    /// Re-registering an active name is an error.
    pub fn put_named(&mut self, names: &[String], kind: LabelKind, label: &LabelRef) -> Result<()> {
        let map = self.named_map_mut(kind);
        for name in names {
            if map.contains_key(name) {
                return Err(CompileError::Syntax(format!("duplicate label: {}", name)));
            }
            map.insert(name.clone(), Rc::clone(label));
        }
        Ok(())
    }

    pub fn remove_named(&mut self, names: &[String], kind: LabelKind) {
        let map = self.named_map_mut(kind);
        for name in names {
            map.remove(name);
        }
    }

    pub fn get_named(&self, name: &str, kind: LabelKind) -> Option<LabelRef> {
        self.named_map(kind).get(name).map(Rc::clone)
    }

    /// Enter a loop or switch body.
    pub fn push_anon(&mut self, break_label: &LabelRef, continue_label: Option<&LabelRef>) {
        self.anon.push(AnonEntry {
            break_label: Rc::clone(break_label),
            continue_label: continue_label.map(Rc::clone),
        });
    }

    pub fn pop_anon(&mut self) {
        self.anon.pop();
    }

    /// Target of a bare `break` or `continue` here, if any.
    pub fn get_anon(&self, kind: LabelKind) -> Option<LabelRef> {
        match kind {
            LabelKind::Break => self.anon.last().map(|e| Rc::clone(&e.break_label)),
            LabelKind::Continue => self
                .anon
                .iter()
                .rev()
                .find_map(|e| e.continue_label.as_ref().map(Rc::clone)),
        }
    }

    fn named_map(&self, kind: LabelKind) -> &HashMap<String, LabelRef> {
        match kind {
            LabelKind::Break => &self.named_break,
            LabelKind::Continue => &self.named_continue,
        }
    }

    fn named_map_mut(&mut self, kind: LabelKind) -> &mut HashMap<String, LabelRef> {
        match kind {
            LabelKind::Break => &mut self.named_break,
            LabelKind::Continue => &mut self.named_continue,
        }
    }
}
