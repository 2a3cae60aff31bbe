// skink-ast - Visitor traversal tests
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Walk coverage, callback ordering, and descent suppression.

use skink_ast::{
    BinaryOp, Expr, ForInit, FuncDecl, Program, Stmt, UnaryOp, VarDecl, Visit, walk_program,
    walk_stmt,
};

#[derive(Default)]
struct Counter {
    stmts: usize,
    exprs: usize,
    var_decls: usize,
    func_decls: usize,
    descend: bool,
}

impl Visit for Counter {
    fn visit_stmt(&mut self, _stmt: &Stmt) {
        self.stmts += 1;
    }

    fn visit_expr(&mut self, _expr: &Expr) {
        self.exprs += 1;
    }

    fn visit_var_decl(&mut self, _decl: &VarDecl) {
        self.var_decls += 1;
    }

    fn visit_func_decl(&mut self, _func: &FuncDecl) {
        self.func_decls += 1;
    }

    fn should_descend_into_function(&self, _func: &FuncDecl) -> bool {
        self.descend
    }
}

/// var a = 1;
/// function f(x) { var b = x + 2; }
/// while (a < 3) { a = a + 1; }
fn sample_program() -> Program {
    Program::new(vec![
        Stmt::var("a", Some(Expr::number(1.0))).into_element(),
        FuncDecl::new("f", vec!["x".to_string()], vec![
            Stmt::var(
                "b",
                Some(Expr::binary(
                    BinaryOp::Add,
                    Expr::ident("x"),
                    Expr::number(2.0),
                )),
            )
            .into_element(),
        ])
        .into_element(),
        Stmt::while_stmt(
            Expr::binary(BinaryOp::Lt, Expr::ident("a"), Expr::number(3.0)),
            Stmt::Block(vec![Stmt::expr(Expr::assign(
                Expr::ident("a"),
                Expr::binary(BinaryOp::Add, Expr::ident("a"), Expr::number(1.0)),
            ))]),
        )
        .into_element(),
    ])
}

#[test]
fn walk_reaches_every_node() {
    let mut counter = Counter {
        descend: true,
        ..Counter::default()
    };
    walk_program(&sample_program(), &mut counter);

    // var a; while; block; a = a + 1; var b (inside f).
    assert_eq!(counter.stmts, 5);
    assert_eq!(counter.var_decls, 2);
    assert_eq!(counter.func_decls, 1);
    // 1 | x + 2, x, 2 | a < 3, a, 3 | a = .., a (target), a + 1, a, 1
    assert_eq!(counter.exprs, 12);
}

#[test]
fn descent_into_functions_can_be_suppressed() {
    let mut counter = Counter {
        descend: false,
        ..Counter::default()
    };
    walk_program(&sample_program(), &mut counter);

    assert_eq!(counter.func_decls, 1);
    // var b and its initialiser stay unvisited.
    assert_eq!(counter.var_decls, 1);
    assert_eq!(counter.stmts, 4);
    assert_eq!(counter.exprs, 9);
}

#[test]
fn for_heads_are_walked_in_both_init_forms() {
    let mut counter = Counter {
        descend: true,
        ..Counter::default()
    };
    // for (var i = 0; i < 3; i = i + 1) {}
    walk_stmt(
        &Stmt::for_stmt(
            Some(ForInit::Vars(vec![VarDecl::new(
                "i",
                Some(Expr::number(0.0)),
            )])),
            Some(Expr::binary(
                BinaryOp::Lt,
                Expr::ident("i"),
                Expr::number(3.0),
            )),
            Some(Expr::assign(
                Expr::ident("i"),
                Expr::binary(BinaryOp::Add, Expr::ident("i"), Expr::number(1.0)),
            )),
            Stmt::Block(vec![]),
        ),
        &mut counter,
    );
    assert_eq!(counter.var_decls, 1);
    // 0 | i < 3, i, 3 | i = .., i, i + 1, i, 1
    assert_eq!(counter.exprs, 9);
    // for, block
    assert_eq!(counter.stmts, 2);

    let mut counter = Counter {
        descend: true,
        ..Counter::default()
    };
    // for (i = 0; ; ) {}
    walk_stmt(
        &Stmt::for_stmt(
            Some(ForInit::Expr(Expr::assign(
                Expr::ident("i"),
                Expr::number(0.0),
            ))),
            None,
            None,
            Stmt::Block(vec![]),
        ),
        &mut counter,
    );
    assert_eq!(counter.var_decls, 0);
    assert_eq!(counter.exprs, 3);
}

#[test]
fn switch_clauses_are_walked() {
    use skink_ast::CaseClause;

    let mut counter = Counter {
        descend: true,
        ..Counter::default()
    };
    // switch (x) { case 1: y = 1; default: y = 2; }
    walk_stmt(
        &Stmt::Switch {
            disc: Expr::ident("x"),
            cases: vec![
                CaseClause::case(Expr::number(1.0), vec![Stmt::expr(Expr::assign(
                    Expr::ident("y"),
                    Expr::number(1.0),
                ))]),
                CaseClause::default(vec![Stmt::expr(Expr::assign(
                    Expr::ident("y"),
                    Expr::number(2.0),
                ))]),
            ],
        },
        &mut counter,
    );
    // switch + two body statements.
    assert_eq!(counter.stmts, 3);
    // x | 1 | y = 1, y, 1 | y = 2, y, 2
    assert_eq!(counter.exprs, 8);
}

/// Records the shape of each visited node, proving parents are visited
/// before their children.
#[derive(Default)]
struct Tracer {
    trace: Vec<&'static str>,
}

impl Visit for Tracer {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.trace.push(match stmt {
            Stmt::If { .. } => "if",
            Stmt::Expr(_) => "expr-stmt",
            _ => "stmt",
        });
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.trace.push(match expr {
            Expr::Binary { .. } => "binary",
            Expr::Ident(_) => "ident",
            Expr::Literal(_) => "literal",
            _ => "expr",
        });
    }
}

#[test]
fn parents_are_visited_before_children() {
    let mut tracer = Tracer::default();
    // if (a < 1) b = 2;
    walk_stmt(
        &Stmt::if_stmt(
            Expr::binary(BinaryOp::Lt, Expr::ident("a"), Expr::number(1.0)),
            Stmt::expr(Expr::assign(Expr::ident("b"), Expr::number(2.0))),
            None,
        ),
        &mut tracer,
    );
    assert_eq!(tracer.trace, [
        "if", "binary", "ident", "literal", "expr-stmt", "expr", "ident", "literal",
    ]);
}

// =============================================================================
// Node helpers
// =============================================================================

#[test]
fn assignment_targets_are_plain_identifiers_only() {
    assert!(Expr::ident("x").is_assign_target());
    assert!(!Expr::number(1.0).is_assign_target());
    assert!(!Expr::call(Expr::ident("f"), vec![]).is_assign_target());
    assert!(!Expr::This.is_assign_target());
}

#[test]
fn operator_display_tokens() {
    use skink_ast::AssignOp;

    assert_eq!(format!("{}", BinaryOp::Add), "+");
    assert_eq!(format!("{}", BinaryOp::LtEq), "<=");
    assert_eq!(format!("{}", BinaryOp::StrictEq), "===");
    assert_eq!(format!("{}", BinaryOp::StrictNotEq), "!==");
    assert_eq!(format!("{}", BinaryOp::Eq), "==");
    assert_eq!(format!("{}", BinaryOp::Mod), "%");
    assert_eq!(format!("{}", UnaryOp::Neg), "-");
    assert_eq!(format!("{}", UnaryOp::Not), "!");
    assert_eq!(format!("{}", AssignOp::AddAssign), "+=");
}
