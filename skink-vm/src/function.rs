// skink-vm - Bytecode compiler and virtual machine for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Instruction sequences, function descriptors, and runtime callees.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexSet;

use skink_runtime::{CustomType, Value};

use crate::opcode::Instr;
use crate::vm::frame::Frame;

/// An append-only instruction sequence with patchable jump operands.
///
/// Jump targets are emitted as `UNPATCHED` placeholders while the target
/// address is still unknown, then overwritten through `patch_target`. The
/// VM refuses to jump through a placeholder that survives to run time.
#[derive(Debug, Clone, Default)]
pub struct CodeSeq {
    instrs: Vec<Instr>,
}

impl CodeSeq {
    /// Placeholder jump operand; never a valid address.
    pub const UNPATCHED: usize = usize::MAX;

    pub fn new() -> Self {
        CodeSeq { instrs: Vec::new() }
    }

    /// Append an instruction.
    pub fn emit(&mut self, instr: Instr) {
        self.instrs.push(instr);
    }

    /// Number of instructions; also the address of the next one emitted.
    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instr> {
        self.instrs.get(index)
    }

    pub fn last(&self) -> Option<&Instr> {
        self.instrs.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instr> {
        self.instrs.iter()
    }

    /// Overwrite the jump operand of the instruction at `index`.
    pub fn patch_target(&mut self, index: usize, address: usize) {
        match &mut self.instrs[index] {
            Instr::Jump(target) | Instr::JumpIfTrue(target) | Instr::JumpIfFalse(target) => {
                *target = address;
            }
            other => debug_assert!(false, "patch_target called on non-jump: {:?}", other),
        }
    }

    /// Whether any jump operand is still the placeholder.
    pub fn has_unpatched_jumps(&self) -> bool {
        self.instrs
            .iter()
            .any(|i| i.jump_target() == Some(Self::UNPATCHED))
    }
}

impl fmt::Display for CodeSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (address, instr) in self.instrs.iter().enumerate() {
            writeln!(f, "{:04} {:?}", address, instr)?;
        }
        Ok(())
    }
}

/// Dense, ordered name-to-index table for formal or local slots.
///
/// Indices are zero-based, assigned in insertion order, and stable;
/// re-adding a name returns its existing index.
#[derive(Debug, Clone, Default)]
pub struct SlotTable {
    names: IndexSet<String>,
}

impl SlotTable {
    pub fn new() -> Self {
        SlotTable {
            names: IndexSet::new(),
        }
    }

    pub fn from_names(names: &[String]) -> Self {
        let mut table = SlotTable::new();
        for name in names {
            table.add(name);
        }
        table
    }

    /// Add a name, returning its slot index (existing index on re-add).
    pub fn add(&mut self, name: &str) -> usize {
        self.names.insert_full(name.to_string()).0
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Slot names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// A compile-time function descriptor.
///
/// Built when the compiler meets a function declaration (or for the
/// top-level unit by the embedder), then filled in: the pre-pass grows the
/// local table, and the compiled body is installed as the code sequence.
/// `outer` fixes the lexical parent chain at compile time; the VM walks
/// the parallel captured-frame chain at run time.
pub struct UserFunction {
    name: Option<String>,
    outer: Option<Rc<UserFunction>>,
    formals: SlotTable,
    locals: RefCell<SlotTable>,
    code: RefCell<CodeSeq>,
}

impl UserFunction {
    pub fn new(
        name: Option<&str>,
        formals: &[String],
        outer: Option<Rc<UserFunction>>,
    ) -> UserFunction {
        UserFunction {
            name: name.map(String::from),
            outer,
            formals: SlotTable::from_names(formals),
            locals: RefCell::new(SlotTable::new()),
            code: RefCell::new(CodeSeq::new()),
        }
    }

    /// Descriptor for a top-level (global) code unit.
    pub fn top_level() -> Rc<UserFunction> {
        Rc::new(UserFunction::new(None, &[], None))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The statically enclosing function, if any.
    pub fn outer(&self) -> Option<&Rc<UserFunction>> {
        self.outer.as_ref()
    }

    /// Whether this is the top-level unit (no lexical parent).
    pub fn is_top_level(&self) -> bool {
        self.outer.is_none()
    }

    pub fn num_formals(&self) -> usize {
        self.formals.len()
    }

    pub fn num_locals(&self) -> usize {
        self.locals.borrow().len()
    }

    pub fn formal_index(&self, name: &str) -> Option<usize> {
        self.formals.index_of(name)
    }

    pub fn local_index(&self, name: &str) -> Option<usize> {
        self.locals.borrow().index_of(name)
    }

    /// Ensure a local slot for `name`, returning its index. A name that is
    /// already a formal aliases the formal slot instead of shadowing it.
    pub fn add_local(&self, name: &str) -> usize {
        if let Some(index) = self.formals.index_of(name) {
            return index;
        }
        self.locals.borrow_mut().add(name)
    }

    /// The compiled instruction sequence.
    pub fn code(&self) -> Ref<'_, CodeSeq> {
        self.code.borrow()
    }

    /// Install the compiled body. Called once per descriptor when its
    /// compilation finishes.
    pub fn install_code(&self, code: CodeSeq) {
        *self.code.borrow_mut() = code;
    }
}

// Not derived: `outer` and the `Closure` instructions in `code` form a
// reference cycle, so a derived impl would recurse without bound.
impl fmt::Debug for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "function {} (formals: {}, locals: {})",
            self.name.as_deref().unwrap_or("<main>"),
            self.num_formals(),
            self.num_locals(),
        )?;
        write!(f, "{}", self.code.borrow())
    }
}

/// A runtime callee.
#[derive(Debug)]
pub enum FunctionObject {
    /// A compiled function paired with the frame live at its creation;
    /// that frame anchors the captured-frame chain of every invocation.
    Closure {
        func: Rc<UserFunction>,
        captured: Rc<Frame>,
    },
    /// A host callable, invoked without a frame.
    Native(NativeFunction),
}

impl FunctionObject {
    pub fn name(&self) -> Option<&str> {
        match self {
            FunctionObject::Closure { func, .. } => func.name(),
            FunctionObject::Native(native) => Some(native.name()),
        }
    }

    /// Wrap into a value the VM (and the object store) can hold.
    pub fn into_value(self) -> Value {
        Value::custom(FunctionObjectWrapper(Rc::new(self)))
    }
}

/// A host function exposed to scripts.
pub struct NativeFunction {
    name: String,
    func: Box<dyn Fn(&[Value]) -> skink_runtime::Result<Value>>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> skink_runtime::Result<Value> + 'static,
    ) -> Self {
        NativeFunction {
            name: name.into(),
            func: Box::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> skink_runtime::Result<Value> {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Wrapper storing a `FunctionObject` in `Value::Custom`.
#[derive(Debug, Clone)]
pub struct FunctionObjectWrapper(pub Rc<FunctionObject>);

impl CustomType for FunctionObjectWrapper {
    fn type_name(&self) -> &'static str {
        "function"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.0.name().unwrap_or("anonymous"))
    }
}
