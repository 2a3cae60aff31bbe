// skink-vm - Bytecode compiler and virtual machine for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Local-slot collection pre-pass.
//!
//! Before a function body is compiled, every `var` declarator and nested
//! function declaration in it claims a local slot, however deeply it is
//! buried in blocks, loops, or switch clauses. This gives `var` its
//! function-wide scope: a use can be compiled to a slot access before the
//! declaration has been reached in source order.

use skink_ast::{FuncDecl, SourceElement, VarDecl, Visit, walk_source_element};

use crate::function::UserFunction;

/// Collects local slots for one function body. Does not descend into
/// nested functions; each gets its own collection pass.
pub struct LocalCollector<'a> {
    func: &'a UserFunction,
}

impl LocalCollector<'_> {
    /// Populate `func`'s local table from its body.
    pub fn run(func: &UserFunction, body: &[SourceElement]) {
        let mut collector = LocalCollector { func };
        for elem in body {
            walk_source_element(elem, &mut collector);
        }
    }
}

impl Visit for LocalCollector<'_> {
    fn visit_var_decl(&mut self, decl: &VarDecl) {
        self.func.add_local(&decl.name);
    }

    fn visit_func_decl(&mut self, func: &FuncDecl) {
        self.func.add_local(&func.name);
    }

    fn should_descend_into_function(&self, _func: &FuncDecl) -> bool {
        false
    }
}
