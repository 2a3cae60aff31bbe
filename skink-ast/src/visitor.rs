// skink-ast - AST node types and visitor for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! AST visitor trait and walk functions.
//!
//! The walk functions drive the traversal and invoke the visitor's
//! callbacks at each node. Visitors override only the callbacks they care
//! about; descent into nested function bodies can be suppressed, which
//! scope-sensitive analyses rely on.

use crate::ast::{CaseClause, Expr, ForInit, FuncDecl, Program, SourceElement, Stmt, VarDecl};

/// Trait for visiting AST nodes.
///
/// The default implementations do nothing; traversal order is handled by
/// the `walk_*` functions.
pub trait Visit {
    /// Visit a statement, before its children.
    fn visit_stmt(&mut self, _stmt: &Stmt) {}

    /// Visit an expression, before its children.
    fn visit_expr(&mut self, _expr: &Expr) {}

    /// Visit a single `var` declarator.
    fn visit_var_decl(&mut self, _decl: &VarDecl) {}

    /// Visit a function declaration, before its body.
    fn visit_func_decl(&mut self, _func: &FuncDecl) {}

    /// Return false to skip a nested function's body.
    fn should_descend_into_function(&self, _func: &FuncDecl) -> bool {
        true
    }
}

/// Walk a whole program.
pub fn walk_program<V: Visit>(prog: &Program, visitor: &mut V) {
    for elem in &prog.elements {
        walk_source_element(elem, visitor);
    }
}

/// Walk one source element.
pub fn walk_source_element<V: Visit>(elem: &SourceElement, visitor: &mut V) {
    match elem {
        SourceElement::Statement(stmt) => walk_stmt(stmt, visitor),
        SourceElement::Function(func) => walk_func_decl(func, visitor),
    }
}

/// Walk a function declaration and, unless suppressed, its body.
pub fn walk_func_decl<V: Visit>(func: &FuncDecl, visitor: &mut V) {
    visitor.visit_func_decl(func);
    if visitor.should_descend_into_function(func) {
        for elem in &func.body {
            walk_source_element(elem, visitor);
        }
    }
}

/// Walk a `var` declarator and its initialiser.
pub fn walk_var_decl<V: Visit>(decl: &VarDecl, visitor: &mut V) {
    visitor.visit_var_decl(decl);
    if let Some(init) = &decl.init {
        walk_expr(init, visitor);
    }
}

/// Walk a statement tree.
pub fn walk_stmt<V: Visit>(stmt: &Stmt, visitor: &mut V) {
    visitor.visit_stmt(stmt);
    match stmt {
        Stmt::Block(stmts) => {
            for s in stmts {
                walk_stmt(s, visitor);
            }
        }
        Stmt::Vars(decls) => {
            for d in decls {
                walk_var_decl(d, visitor);
            }
        }
        Stmt::Expr(e) => walk_expr(e, visitor),
        Stmt::If { cond, cons, alt } => {
            walk_expr(cond, visitor);
            walk_stmt(cons, visitor);
            if let Some(alt) = alt {
                walk_stmt(alt, visitor);
            }
        }
        Stmt::While { cond, body } => {
            walk_expr(cond, visitor);
            walk_stmt(body, visitor);
        }
        Stmt::DoWhile { body, cond } => {
            walk_stmt(body, visitor);
            walk_expr(cond, visitor);
        }
        Stmt::For {
            init,
            cond,
            step,
            body,
        } => {
            match init {
                Some(ForInit::Vars(decls)) => {
                    for d in decls {
                        walk_var_decl(d, visitor);
                    }
                }
                Some(ForInit::Expr(e)) => walk_expr(e, visitor),
                None => {}
            }
            if let Some(cond) = cond {
                walk_expr(cond, visitor);
            }
            if let Some(step) = step {
                walk_expr(step, visitor);
            }
            walk_stmt(body, visitor);
        }
        Stmt::Switch { disc, cases } => {
            walk_expr(disc, visitor);
            for clause in cases {
                walk_case_clause(clause, visitor);
            }
        }
        Stmt::Labelled { body, .. } => walk_stmt(body, visitor),
        Stmt::Break(_) | Stmt::Continue(_) => {}
        Stmt::Return(value) => {
            if let Some(value) = value {
                walk_expr(value, visitor);
            }
        }
    }
}

/// Walk one switch clause.
pub fn walk_case_clause<V: Visit>(clause: &CaseClause, visitor: &mut V) {
    if let Some(test) = &clause.test {
        walk_expr(test, visitor);
    }
    for s in &clause.body {
        walk_stmt(s, visitor);
    }
}

/// Walk an expression tree.
pub fn walk_expr<V: Visit>(expr: &Expr, visitor: &mut V) {
    visitor.visit_expr(expr);
    match expr {
        Expr::Literal(_) | Expr::Ident(_) | Expr::This => {}
        Expr::Unary { operand, .. } => walk_expr(operand, visitor),
        Expr::Binary { left, right, .. } => {
            walk_expr(left, visitor);
            walk_expr(right, visitor);
        }
        Expr::Assign { target, value, .. } => {
            walk_expr(target, visitor);
            walk_expr(value, visitor);
        }
        Expr::Call { callee, args } => {
            walk_expr(callee, visitor);
            for a in args {
                walk_expr(a, visitor);
            }
        }
    }
}
