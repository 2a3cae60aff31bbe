// skink-ast - AST node types and visitor for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! AST node definitions.
//!
//! Each syntactic form is a variant of a small number of sum types
//! (`Expr`, `Stmt`, `SourceElement`) carrying its fixed fields. Function
//! declarations are kept apart from ordinary statements so that programs
//! and function bodies can hoist them without inspecting statement
//! payloads.

use std::fmt;

/// A complete compilation unit: the source elements of top-level code.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub elements: Vec<SourceElement>,
}

impl Program {
    pub fn new(elements: Vec<SourceElement>) -> Self {
        Program { elements }
    }
}

/// One element of a program or function body: a statement or a function
/// declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceElement {
    Statement(Stmt),
    Function(FuncDecl),
}

/// A function declaration: `function name(formals...) { body }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub formals: Vec<String>,
    pub body: Vec<SourceElement>,
}

impl FuncDecl {
    pub fn new(
        name: impl Into<String>,
        formals: Vec<String>,
        body: Vec<SourceElement>,
    ) -> Self {
        FuncDecl {
            name: name.into(),
            formals,
            body,
        }
    }
}

/// A single declarator in a `var` statement: `name` or `name = init`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub init: Option<Expr>,
}

impl VarDecl {
    pub fn new(name: impl Into<String>, init: Option<Expr>) -> Self {
        VarDecl {
            name: name.into(),
            init,
        }
    }
}

/// The initialiser clause of a `for` statement head.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    /// `for (var a = 1, b = 2; ...)`
    Vars(Vec<VarDecl>),
    /// `for (i = 0; ...)`
    Expr(Expr),
}

/// One clause of a `switch` statement. `test` is `None` for the default
/// clause.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

impl CaseClause {
    pub fn case(test: Expr, body: Vec<Stmt>) -> Self {
        CaseClause {
            test: Some(test),
            body,
        }
    }

    pub fn default(body: Vec<Stmt>) -> Self {
        CaseClause { test: None, body }
    }
}

/// Statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `{ ... }`. Blocks have no scope of their own; `var` is
    /// function-scoped.
    Block(Vec<Stmt>),
    /// `var a = 1, b;`
    Vars(Vec<VarDecl>),
    /// An expression evaluated for its side effects.
    Expr(Expr),
    If {
        cond: Expr,
        cons: Box<Stmt>,
        alt: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        cond: Expr,
    },
    For {
        init: Option<ForInit>,
        cond: Option<Expr>,
        step: Option<Expr>,
        body: Box<Stmt>,
    },
    Switch {
        disc: Expr,
        cases: Vec<CaseClause>,
    },
    /// `a: b: stmt`, one or more labels on a single statement.
    Labelled {
        labels: Vec<String>,
        body: Box<Stmt>,
    },
    Break(Option<String>),
    Continue(Option<String>),
    Return(Option<Expr>),
}

/// Expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(String),
    This,
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Whether this expression is a syntactically valid assignment target.
    /// Only plain identifiers qualify in this language subset.
    pub fn is_assign_target(&self) -> bool {
        matches!(self, Expr::Ident(_))
    }
}

/// Literal values as they appear in source.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `!x`
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    LtEq,
    GtEq,
    /// `==` (loose)
    Eq,
    /// `!=` (loose)
    NotEq,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNotEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tok = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
        };
        write!(f, "{}", tok)
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tok = match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
        };
        write!(f, "{}", tok)
    }
}

// =========================================================================
// Construction helpers
// =========================================================================
//
// ASTs are assembled by hand wherever a parser would normally sit, so the
// usual Box/Vec plumbing is wrapped once here.

impl Expr {
    pub fn number(n: f64) -> Expr {
        Expr::Literal(Literal::Number(n))
    }

    pub fn string(s: impl Into<String>) -> Expr {
        Expr::Literal(Literal::String(s.into()))
    }

    pub fn bool(b: bool) -> Expr {
        Expr::Literal(Literal::Bool(b))
    }

    pub fn null() -> Expr {
        Expr::Literal(Literal::Null)
    }

    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Ident(name.into())
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Expr {
        Expr::Assign {
            op: AssignOp::Assign,
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }
}

impl Stmt {
    pub fn expr(e: Expr) -> Stmt {
        Stmt::Expr(e)
    }

    pub fn var(name: impl Into<String>, init: Option<Expr>) -> Stmt {
        Stmt::Vars(vec![VarDecl::new(name, init)])
    }

    pub fn if_stmt(cond: Expr, cons: Stmt, alt: Option<Stmt>) -> Stmt {
        Stmt::If {
            cond,
            cons: Box::new(cons),
            alt: alt.map(Box::new),
        }
    }

    pub fn while_stmt(cond: Expr, body: Stmt) -> Stmt {
        Stmt::While {
            cond,
            body: Box::new(body),
        }
    }

    pub fn do_while(body: Stmt, cond: Expr) -> Stmt {
        Stmt::DoWhile {
            body: Box::new(body),
            cond,
        }
    }

    pub fn for_stmt(
        init: Option<ForInit>,
        cond: Option<Expr>,
        step: Option<Expr>,
        body: Stmt,
    ) -> Stmt {
        Stmt::For {
            init,
            cond,
            step,
            body: Box::new(body),
        }
    }

    pub fn labelled(labels: Vec<String>, body: Stmt) -> Stmt {
        Stmt::Labelled {
            labels,
            body: Box::new(body),
        }
    }

    pub fn ret(value: Option<Expr>) -> Stmt {
        Stmt::Return(value)
    }

    /// Wrap into a source element.
    pub fn into_element(self) -> SourceElement {
        SourceElement::Statement(self)
    }
}

impl FuncDecl {
    /// Wrap into a source element.
    pub fn into_element(self) -> SourceElement {
        SourceElement::Function(self)
    }
}
