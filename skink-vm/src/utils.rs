// skink-vm - Bytecode compiler and virtual machine for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Helpers shared by the VM and embedders.

use std::rc::Rc;

use skink_runtime::Value;

use crate::function::{FunctionObject, FunctionObjectWrapper, NativeFunction};

/// Extract a function object from a value, if it holds one.
pub fn function_object(val: &Value) -> Option<Rc<FunctionObject>> {
    if let Value::Custom(custom) = val
        && let Some(wrapper) = custom.downcast_ref::<FunctionObjectWrapper>()
    {
        return Some(Rc::clone(&wrapper.0));
    }
    None
}

/// Build a host function value, ready to be stored as a global property.
pub fn native_function(
    name: &str,
    func: impl Fn(&[Value]) -> skink_runtime::Result<Value> + 'static,
) -> Value {
    FunctionObject::Native(NativeFunction::new(name, func)).into_value()
}
