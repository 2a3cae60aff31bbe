// skink-ast - AST node types and visitor for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! # skink-ast
//!
//! AST node vocabulary for the skink scripting language, a small
//! JavaScript-like language. The parser is an external collaborator:
//! embedders (and the test suites) construct these nodes directly and feed
//! them to the compiler in `skink-vm`.

pub mod ast;
pub mod visitor;

pub use ast::{
    AssignOp, BinaryOp, CaseClause, Expr, ForInit, FuncDecl, Literal, Program, SourceElement,
    Stmt, UnaryOp, VarDecl,
};
pub use visitor::{
    Visit, walk_case_clause, walk_expr, walk_func_decl, walk_program, walk_source_element,
    walk_stmt, walk_var_decl,
};
