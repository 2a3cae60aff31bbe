// skink-runtime - Value model, object store, and execution context for skink
// Copyright (c) 2026 The skink authors. MIT licensed.

//! String-keyed object store.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::value::Value;

/// A mutable object: an insertion-ordered map from property names to
/// values, shared by handle. Cloning a `JsObject` clones the handle, not
/// the storage; equality is identity.
#[derive(Debug, Clone)]
pub struct JsObject {
    props: Rc<RefCell<IndexMap<String, Value>>>,
}

impl JsObject {
    pub fn new() -> Self {
        JsObject {
            props: Rc::new(RefCell::new(IndexMap::new())),
        }
    }

    /// Read a property. Missing properties read as undefined.
    pub fn get(&self, name: &str) -> Value {
        self.props
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or(Value::Undefined)
    }

    /// Write a property, creating or overwriting it.
    pub fn set(&self, name: &str, value: Value) {
        self.props.borrow_mut().insert(name.to_string(), value);
    }

    /// Whether a property is present (undefined-valued properties count).
    pub fn has(&self, name: &str) -> bool {
        self.props.borrow().contains_key(name)
    }

    /// Property names in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.props.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.props.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.borrow().is_empty()
    }

    /// Identity comparison (same underlying storage).
    pub fn ptr_eq(a: &JsObject, b: &JsObject) -> bool {
        Rc::ptr_eq(&a.props, &b.props)
    }
}

impl Default for JsObject {
    fn default() -> Self {
        JsObject::new()
    }
}

impl fmt::Display for JsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[object Object]")
    }
}
