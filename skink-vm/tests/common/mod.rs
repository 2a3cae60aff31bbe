// skink-vm - Common test utilities
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Shared helpers for skink-vm integration tests.
//!
//! Programs are assembled from the `skink_ast` constructors (there is no
//! parser), compiled into a fresh top-level descriptor, and run against a
//! fresh context. A balanced program leaves no value on the operand
//! stack, so most tests observe results through global properties.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::*;
//! ```

use std::cell::RefCell;
use std::rc::Rc;

#[allow(unused_imports)]
pub use skink_ast::{
    AssignOp, BinaryOp, CaseClause, Expr, ForInit, FuncDecl, Literal, Program, SourceElement,
    Stmt, UnaryOp, VarDecl,
};
#[allow(unused_imports)]
pub use skink_runtime::{Context, Value};
#[allow(unused_imports)]
pub use skink_vm::{
    CodeGen, CompileError, FunctionObject, Instr, Interpreter, RuntimeError, UserFunction,
};

/// Compile source elements into a fresh top-level descriptor.
#[allow(dead_code)]
pub fn compile(elements: Vec<SourceElement>) -> Rc<UserFunction> {
    try_compile(elements).expect("compile error")
}

/// Compile, handing back the error for tests that expect one.
#[allow(dead_code)]
pub fn try_compile(elements: Vec<SourceElement>) -> Result<Rc<UserFunction>, CompileError> {
    let func = UserFunction::top_level();
    CodeGen::compile(&func, &Program::new(elements))?;
    Ok(func)
}

/// Compile and run against a fresh context.
#[allow(dead_code)]
pub fn run(elements: Vec<SourceElement>) -> (Result<Value, RuntimeError>, Context) {
    let context = Context::new();
    let result = run_in(&context, elements);
    (result, context)
}

/// Compile and run against the given context.
#[allow(dead_code)]
pub fn run_in(context: &Context, elements: Vec<SourceElement>) -> Result<Value, RuntimeError> {
    let func = compile(elements);
    let mut interp = Interpreter::new(context.clone());
    interp.execute(&func)
}

/// Compile and run, asserting success, and hand back the context for
/// global inspection.
#[allow(dead_code)]
pub fn run_ok(elements: Vec<SourceElement>) -> Context {
    let (result, context) = run(elements);
    result.expect("runtime error");
    context
}

/// Read a global property.
#[allow(dead_code)]
pub fn global(context: &Context, name: &str) -> Value {
    context.global_object().get(name)
}

/// Read a global property that must be a number.
#[allow(dead_code)]
pub fn global_number(context: &Context, name: &str) -> f64 {
    let value = global(context, name);
    value
        .as_number()
        .unwrap_or_else(|| panic!("global {} is not a number: {:?}", name, value))
}

/// Read a global property that must be a boolean.
#[allow(dead_code)]
pub fn global_bool(context: &Context, name: &str) -> bool {
    let value = global(context, name);
    value
        .as_bool()
        .unwrap_or_else(|| panic!("global {} is not a boolean: {:?}", name, value))
}

/// Read a global property that must be a string.
#[allow(dead_code)]
pub fn global_str(context: &Context, name: &str) -> String {
    let value = global(context, name);
    value
        .as_str()
        .unwrap_or_else(|| panic!("global {} is not a string: {:?}", name, value))
        .to_string()
}

/// Install a `log` native that records its first argument on every call,
/// returning the shared record.
#[allow(dead_code)]
pub fn install_log(context: &Context) -> Rc<RefCell<Vec<Value>>> {
    let record = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&record);
    let log = skink_vm::native_function("log", move |args| {
        sink.borrow_mut()
            .push(args.first().cloned().unwrap_or(Value::Undefined));
        Ok(Value::Undefined)
    });
    context.global_object().set("log", log);
    record
}

/// The nested functions a compiled body creates, in emission order.
#[allow(dead_code)]
pub fn closures_in(func: &UserFunction) -> Vec<Rc<UserFunction>> {
    func.code()
        .iter()
        .filter_map(|instr| match instr {
            Instr::Closure(f) => Some(Rc::clone(f)),
            _ => None,
        })
        .collect()
}

/// Debug rendering of a compiled body, one instruction per element.
#[allow(dead_code)]
pub fn listing(func: &UserFunction) -> Vec<String> {
    func.code().iter().map(|i| format!("{:?}", i)).collect()
}
