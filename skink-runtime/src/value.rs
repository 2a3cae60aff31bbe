// skink-runtime - Value model, object store, and execution context for skink
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Tagged primitive values and their operation set.
//!
//! Numbers are IEEE f64 throughout. Arithmetic is defined for
//! number-on-number only; other combinations (notably string `+`) report
//! a not-implemented error rather than coercing. Relational comparison
//! follows the abstract three-outcome shape: ordered true, ordered false,
//! or undefined when NaN is involved.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::object::JsObject;

/// Trait for host-defined value types stored in `Value::Custom`.
///
/// Implementors pick a type name for error messages, expose themselves
/// for downcasting, and render their own display form. This is how the VM
/// injects function objects into the value model without this crate
/// knowing about them.
pub trait CustomType: fmt::Debug {
    /// Type name used in error messages.
    fn type_name(&self) -> &'static str;

    /// Expose the concrete type for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Render the display form.
    fn display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Shared handle to a custom value.
#[derive(Debug, Clone)]
pub struct CustomValue(Rc<dyn CustomType>);

impl CustomValue {
    pub fn new(value: impl CustomType + 'static) -> Self {
        CustomValue(Rc::new(value))
    }

    /// Downcast to a concrete custom type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Identity comparison (same underlying allocation).
    pub fn ptr_eq(a: &CustomValue, b: &CustomValue) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Display for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display(f)
    }
}

/// A skink value.
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Object(JsObject),
    /// Host-defined types (function objects live here).
    Custom(CustomValue),
}

impl Value {
    /// Wrap a host-defined type.
    pub fn custom(value: impl CustomType + 'static) -> Value {
        Value::Custom(CustomValue::new(value))
    }

    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Custom(c) => c.type_name(),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&CustomValue> {
        match self {
            Value::Custom(c) => Some(c),
            _ => None,
        }
    }

    // =====================================================================
    // Coercion
    // =====================================================================

    /// Numeric coercion. Undefined is NaN, null is zero; strings and
    /// objects are not implemented.
    pub fn to_number(&self) -> Result<f64> {
        match self {
            Value::Undefined => Ok(f64::NAN),
            Value::Null => Ok(0.0),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => Ok(*n),
            Value::String(_) => Err(Error::NotImplemented {
                op: "to_number",
                detail: "string".into(),
            }),
            Value::Object(_) | Value::Custom(_) => Err(Error::NotImplemented {
                op: "to_number",
                detail: self.type_name().into(),
            }),
        }
    }

    /// Boolean coercion. Total: undefined, null, NaN, zero, and the empty
    /// string are false; objects are true.
    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Object(_) | Value::Custom(_) => true,
        }
    }

    // =====================================================================
    // Arithmetic
    // =====================================================================

    fn numeric_pair(&self, other: &Value, op: &'static str) -> Result<(f64, f64)> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
            _ => Err(Error::NotImplemented {
                op,
                detail: format!("{} and {}", self.type_name(), other.type_name()),
            }),
        }
    }

    pub fn add(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_pair(other, "+")?;
        Ok(Value::Number(a + b))
    }

    pub fn sub(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_pair(other, "-")?;
        Ok(Value::Number(a - b))
    }

    pub fn mul(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_pair(other, "*")?;
        Ok(Value::Number(a * b))
    }

    pub fn div(&self, other: &Value) -> Result<Value> {
        let (a, b) = self.numeric_pair(other, "/")?;
        Ok(Value::Number(a / b))
    }

    pub fn neg(&self) -> Result<Value> {
        match self {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(Error::NotImplemented {
                op: "-",
                detail: self.type_name().into(),
            }),
        }
    }

    // =====================================================================
    // Comparison
    // =====================================================================

    /// Abstract relational comparison: is `self` less than `other`.
    ///
    /// Returns `Ok(None)` for the undefined outcome (NaN on either side,
    /// which includes coerced `undefined`). String-on-string ordering is
    /// not implemented.
    pub fn compare(&self, other: &Value) -> Result<Option<bool>> {
        if let (Value::String(_), Value::String(_)) = (self, other) {
            return Err(Error::NotImplemented {
                op: "compare",
                detail: "string and string".into(),
            });
        }
        let x = self.to_number()?;
        let y = other.to_number()?;
        if x.is_nan() || y.is_nan() {
            return Ok(None);
        }
        Ok(Some(x < y))
    }

    /// Strict (type-and-value) equality. Cross-type is false, NaN is never
    /// equal to anything, objects and custom values compare by identity.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => JsObject::ptr_eq(a, b),
            (Value::Custom(a), Value::Custom(b)) => CustomValue::ptr_eq(a, b),
            _ => false,
        }
    }

    // =====================================================================
    // Properties
    // =====================================================================

    /// Property read: the receiver must be an object and the key a string.
    /// A missing property reads as undefined.
    pub fn get_property(&self, name: &Value) -> Result<Value> {
        match (self, name) {
            (Value::Object(obj), Value::String(key)) => Ok(obj.get(key)),
            (Value::Object(_), other) => Err(Error::TypeError {
                expected: "string",
                got: other.type_name(),
            }),
            (receiver, _) => Err(Error::TypeError {
                expected: "object",
                got: receiver.type_name(),
            }),
        }
    }

    /// Property write: same receiver/key contract as `get_property`.
    pub fn put_property(&self, name: &Value, value: Value) -> Result<()> {
        match (self, name) {
            (Value::Object(obj), Value::String(key)) => {
                obj.set(key, value);
                Ok(())
            }
            (Value::Object(_), other) => Err(Error::TypeError {
                expected: "string",
                got: other.type_name(),
            }),
            (receiver, _) => Err(Error::TypeError {
                expected: "object",
                got: receiver.type_name(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::Object(o) => write!(f, "{}", o),
            Value::Custom(c) => write!(f, "{}", c),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(Rc::from(s))
    }
}
