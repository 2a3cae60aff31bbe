// skink-vm - Bytecode compiler and virtual machine for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Activation frames.
//!
//! Frames participate in two distinct relations. The VM's call chain
//! (`CallRecord` entries, strictly LIFO) tracks which invocation resumes
//! where; the captured-frame chain (`Frame::captured`, arbitrary-lifetime
//! `Rc` links) gives closures access to the slots of the frames they were
//! created under. A frame popped off the call chain stays alive for as
//! long as some closure captures it.

use std::cell::RefCell;
use std::rc::Rc;

use skink_runtime::Value;

use crate::function::UserFunction;

/// One invocation's slot storage.
#[derive(Debug)]
pub struct Frame {
    function: Rc<UserFunction>,
    this: Value,
    formals: RefCell<Vec<Value>>,
    locals: RefCell<Vec<Value>>,
    captured: Option<Rc<Frame>>,
}

impl Frame {
    /// Build a frame for invoking `function`. Surplus arguments are
    /// dropped and missing ones read as undefined; locals all start
    /// undefined. `captured` is absent only for the top-level frame.
    pub fn new(
        function: Rc<UserFunction>,
        this: Value,
        mut args: Vec<Value>,
        captured: Option<Rc<Frame>>,
    ) -> Frame {
        args.resize(function.num_formals(), Value::Undefined);
        let locals = vec![Value::Undefined; function.num_locals()];
        Frame {
            function,
            this,
            formals: RefCell::new(args),
            locals: RefCell::new(locals),
            captured,
        }
    }

    pub fn function(&self) -> &Rc<UserFunction> {
        &self.function
    }

    pub fn this(&self) -> &Value {
        &self.this
    }

    /// The frame captured at this invocation's closure creation.
    pub fn captured(&self) -> Option<&Rc<Frame>> {
        self.captured.as_ref()
    }

    /// Walk `link` hops up the captured-frame chain. `link` zero is this
    /// frame itself.
    pub fn outer(self: &Rc<Frame>, link: usize) -> Option<Rc<Frame>> {
        let mut frame = Rc::clone(self);
        for _ in 0..link {
            let next = Rc::clone(frame.captured.as_ref()?);
            frame = next;
        }
        Some(frame)
    }

    #[inline]
    pub fn get_formal(&self, index: usize) -> Value {
        self.formals.borrow()[index].clone()
    }

    #[inline]
    pub fn set_formal(&self, index: usize, value: Value) {
        self.formals.borrow_mut()[index] = value;
    }

    #[inline]
    pub fn get_local(&self, index: usize) -> Value {
        self.locals.borrow()[index].clone()
    }

    #[inline]
    pub fn set_local(&self, index: usize, value: Value) {
        self.locals.borrow_mut()[index] = value;
    }
}

/// One entry of the VM's call chain. `pc` indexes the next instruction of
/// `frame`'s function; for a suspended caller that is the return address.
#[derive(Debug)]
pub(crate) struct CallRecord {
    pub(crate) frame: Rc<Frame>,
    pub(crate) pc: usize,
}
