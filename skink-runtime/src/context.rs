// skink-runtime - Value model, object store, and execution context for skink
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Execution context.

use crate::object::JsObject;

/// The execution context a program runs against. Owns the global object;
/// top-level variables and functions become its properties. Cloning
/// shares the same global object.
#[derive(Debug, Clone, Default)]
pub struct Context {
    global: JsObject,
}

impl Context {
    pub fn new() -> Self {
        Context {
            global: JsObject::new(),
        }
    }

    /// The global object (shared handle).
    pub fn global_object(&self) -> JsObject {
        self.global.clone()
    }
}
