// skink-runtime - Value model, object store, and execution context for skink
// Copyright (c) 2026 The skink authors. MIT licensed.

//! # skink-runtime
//!
//! The primitive value model of the skink scripting language: tagged
//! values with JavaScript-flavoured arithmetic, comparison, and coercion
//! semantics, a string-keyed object store, and the execution context that
//! owns the global object. The bytecode VM in `skink-vm` dispatches on
//! these operations but does not define them.

pub mod context;
pub mod error;
pub mod object;
pub mod value;

pub use context::Context;
pub use error::{Error, Result};
pub use object::JsObject;
pub use value::{CustomType, CustomValue, Value};
