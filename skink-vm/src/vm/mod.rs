// skink-vm - Bytecode compiler and virtual machine for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! The virtual machine.
//!
//! A fetch-execute loop over compiled instruction sequences. All operands
//! travel on one shared operand stack; activation state lives in a chain
//! of call records, each pairing a frame with the program counter of its
//! suspended (or running) function. Calls push a record, returns pop one,
//! and the run ends when the top-level record is popped.

pub mod error;
pub mod frame;
pub mod stack;

use std::rc::Rc;

use skink_runtime::{Context, Value};

use crate::function::{CodeSeq, FunctionObject, UserFunction};
use crate::opcode::Instr;
use crate::utils::function_object;

pub use error::{Result, RuntimeError};
pub use frame::Frame;
pub use stack::OperandStack;

use frame::CallRecord;

/// The bytecode interpreter.
pub struct Interpreter {
    context: Context,
    stack: OperandStack,
    calls: Vec<CallRecord>,
}

impl Interpreter {
    pub fn new(context: Context) -> Self {
        Interpreter {
            context,
            stack: OperandStack::new(),
            calls: Vec::new(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Run a compiled top-level unit to completion. The result is the
    /// value left on the operand stack, undefined when there is none.
    pub fn execute(&mut self, func: &Rc<UserFunction>) -> Result<Value> {
        debug_assert!(
            self.calls.is_empty() && self.stack.is_empty(),
            "interpreter re-entered mid-run"
        );
        let frame = Rc::new(Frame::new(Rc::clone(func), Value::Null, Vec::new(), None));
        self.calls.push(CallRecord { frame, pc: 0 });
        match self.run_loop() {
            Ok(value) => Ok(value),
            Err(err) => {
                // Leave the interpreter reusable after a failed run.
                self.stack.clear();
                self.calls.clear();
                Err(err)
            }
        }
    }

    fn run_loop(&mut self) -> Result<Value> {
        loop {
            let Some(instr) = self.fetch() else {
                // Only the top-level unit may run off the end of its code;
                // function bodies always end in an explicit return.
                if self.calls.len() == 1 {
                    self.calls.pop();
                    break;
                }
                return Err(RuntimeError::Internal(
                    "instruction pointer past end of code".into(),
                ));
            };
            match instr {
                Instr::Const(value) => self.stack.push(value),
                Instr::Drop => {
                    self.stack.pop()?;
                }
                Instr::Dup => {
                    let top = self.stack.peek(0)?;
                    self.stack.push(top);
                }

                Instr::LoadFormal(index) => {
                    let value = self.frame().get_formal(index);
                    self.stack.push(value);
                }
                Instr::StoreFormal(index) => {
                    let value = self.stack.pop()?;
                    self.frame().set_formal(index, value);
                }
                Instr::LoadLocal(index) => {
                    let value = self.frame().get_local(index);
                    self.stack.push(value);
                }
                Instr::StoreLocal(index) => {
                    let value = self.stack.pop()?;
                    self.frame().set_local(index, value);
                }
                Instr::LoadFormalOuter { link, index } => {
                    let frame = self.outer_frame(link)?;
                    self.stack.push(frame.get_formal(index));
                }
                Instr::StoreFormalOuter { link, index } => {
                    let value = self.stack.pop()?;
                    self.outer_frame(link)?.set_formal(index, value);
                }
                Instr::LoadLocalOuter { link, index } => {
                    let frame = self.outer_frame(link)?;
                    self.stack.push(frame.get_local(index));
                }
                Instr::StoreLocalOuter { link, index } => {
                    let value = self.stack.pop()?;
                    self.outer_frame(link)?.set_local(index, value);
                }
                Instr::GetGlobal => {
                    self.stack.push(Value::Object(self.context.global_object()));
                }
                Instr::This => {
                    let value = self.frame().this().clone();
                    self.stack.push(value);
                }
                Instr::GetProp => {
                    let name = self.stack.pop()?;
                    let object = self.stack.pop()?;
                    self.stack.push(object.get_property(&name)?);
                }
                Instr::PutProp => {
                    let name = self.stack.pop()?;
                    let object = self.stack.pop()?;
                    let value = self.stack.pop()?;
                    object.put_property(&name, value)?;
                }

                Instr::Jump(target) => self.jump(target)?,
                Instr::JumpIfTrue(target) => {
                    let cond = self.stack.pop()?;
                    if cond.to_boolean() {
                        self.jump(target)?;
                    }
                }
                Instr::JumpIfFalse(target) => {
                    let cond = self.stack.pop()?;
                    if !cond.to_boolean() {
                        self.jump(target)?;
                    }
                }

                Instr::Closure(func) => {
                    let captured = Rc::clone(self.frame());
                    let closure = FunctionObject::Closure { func, captured };
                    self.stack.push(closure.into_value());
                }
                Instr::Call(argc) => self.call(argc)?,
                Instr::Return => {
                    self.calls.pop();
                    if self.calls.is_empty() {
                        break;
                    }
                }

                Instr::Add => self.binary_arith(Value::add)?,
                Instr::Sub => self.binary_arith(Value::sub)?,
                Instr::Mul => self.binary_arith(Value::mul)?,
                Instr::Div => self.binary_arith(Value::div)?,
                Instr::Neg => {
                    let value = self.stack.pop()?;
                    self.stack.push(value.neg()?);
                }

                Instr::Lt => self.relational(false, false)?,
                Instr::Gt => self.relational(true, false)?,
                Instr::LtEq => self.relational(true, true)?,
                Instr::GtEq => self.relational(false, true)?,
                Instr::Eq => self.loose_equality("==")?,
                Instr::NotEq => self.loose_equality("!=")?,
                Instr::StrictEq => {
                    let b = self.stack.pop()?;
                    let a = self.stack.pop()?;
                    self.stack.push(Value::Bool(a.strict_equals(&b)));
                }
                Instr::StrictNotEq => {
                    let b = self.stack.pop()?;
                    let a = self.stack.pop()?;
                    self.stack.push(Value::Bool(!a.strict_equals(&b)));
                }
            }
        }

        let result = if self.stack.is_empty() {
            Value::Undefined
        } else {
            self.stack.pop()?
        };
        debug_assert!(
            self.stack.is_empty(),
            "operand stack not balanced after run"
        );
        Ok(result)
    }

    /// Read the next instruction of the active function and advance its
    /// program counter. None when the counter is past the end.
    fn fetch(&mut self) -> Option<Instr> {
        let record = self.calls.last_mut()?;
        let instr = record.frame.function().code().get(record.pc).cloned();
        if instr.is_some() {
            record.pc += 1;
        }
        instr
    }

    fn frame(&self) -> &Rc<Frame> {
        &self.calls.last().expect("no active frame").frame
    }

    fn outer_frame(&self, link: usize) -> Result<Rc<Frame>> {
        self.frame().outer(link).ok_or_else(|| {
            RuntimeError::Internal(format!(
                "captured-frame chain shorter than link depth {}",
                link
            ))
        })
    }

    fn jump(&mut self, target: usize) -> Result<()> {
        if target == CodeSeq::UNPATCHED {
            return Err(RuntimeError::Internal("jump through unresolved label".into()));
        }
        self.calls.last_mut().expect("no active frame").pc = target;
        Ok(())
    }

    /// Invoke the value under `argc` arguments. Native callees run inline
    /// on the host stack; closures push a call record whose frame chains
    /// to the frame captured at closure creation.
    fn call(&mut self, argc: usize) -> Result<()> {
        let args = self.stack.pop_n(argc)?;
        let callee = self.stack.pop()?;
        let Some(function) = function_object(&callee) else {
            return Err(RuntimeError::NotCallable(callee.type_name().to_string()));
        };
        match function.as_ref() {
            FunctionObject::Native(native) => {
                let result = native.call(&args)?;
                self.stack.push(result);
            }
            FunctionObject::Closure { func, captured } => {
                let frame = Rc::new(Frame::new(
                    Rc::clone(func),
                    Value::Null,
                    args,
                    Some(Rc::clone(captured)),
                ));
                self.calls.push(CallRecord { frame, pc: 0 });
            }
        }
        Ok(())
    }

    fn binary_arith(
        &mut self,
        op: fn(&Value, &Value) -> skink_runtime::Result<Value>,
    ) -> Result<()> {
        let b = self.stack.pop()?;
        let a = self.stack.pop()?;
        self.stack.push(op(&a, &b)?);
        Ok(())
    }

    /// Shared evaluator for the four relational opcodes. Each is phrased
    /// as "is x less than y" with operands possibly swapped and the
    /// outcome possibly negated. The undefined comparison outcome (NaN on
    /// either side) makes all four false, negation included.
    fn relational(&mut self, swap: bool, negate: bool) -> Result<()> {
        let b = self.stack.pop()?;
        let a = self.stack.pop()?;
        let (x, y) = if swap { (b, a) } else { (a, b) };
        let result = match x.compare(&y)? {
            Some(less) => {
                if negate {
                    !less
                } else {
                    less
                }
            }
            None => false,
        };
        self.stack.push(Value::Bool(result));
        Ok(())
    }

    /// Loose equality is compiled but not yet given runtime semantics.
    fn loose_equality(&mut self, op: &'static str) -> Result<()> {
        let b = self.stack.pop()?;
        let a = self.stack.pop()?;
        Err(RuntimeError::Value(skink_runtime::Error::NotImplemented {
            op,
            detail: format!("{} and {}", a.type_name(), b.type_name()),
        }))
    }
}
