// skink-vm - Control flow tests
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Branching, loops, break/continue (bare and labelled), and switch
//! dispatch semantics.

mod common;

use common::*;

fn assign(name: &str, value: Expr) -> SourceElement {
    Stmt::expr(Expr::assign(Expr::ident(name), value)).into_element()
}

fn add_to(name: &str, amount: f64) -> Stmt {
    Stmt::expr(Expr::assign(
        Expr::ident(name),
        Expr::binary(BinaryOp::Add, Expr::ident(name), Expr::number(amount)),
    ))
}

// =============================================================================
// If
// =============================================================================

#[test]
fn if_takes_the_true_branch() {
    let context = run_ok(vec![
        Stmt::if_stmt(
            Expr::bool(true),
            Stmt::expr(Expr::assign(Expr::ident("r"), Expr::number(1.0))),
            Some(Stmt::expr(Expr::assign(Expr::ident("r"), Expr::number(2.0)))),
        )
        .into_element(),
    ]);
    assert_eq!(global_number(&context, "r"), 1.0);
}

#[test]
fn if_takes_the_else_branch() {
    let context = run_ok(vec![
        Stmt::if_stmt(
            Expr::number(0.0),
            Stmt::expr(Expr::assign(Expr::ident("r"), Expr::number(1.0))),
            Some(Stmt::expr(Expr::assign(Expr::ident("r"), Expr::number(2.0)))),
        )
        .into_element(),
    ]);
    assert_eq!(global_number(&context, "r"), 2.0);
}

#[test]
fn if_without_else_falls_through() {
    let context = run_ok(vec![
        Stmt::var("r", Some(Expr::number(5.0))).into_element(),
        Stmt::if_stmt(
            Expr::bool(false),
            Stmt::expr(Expr::assign(Expr::ident("r"), Expr::number(1.0))),
            None,
        )
        .into_element(),
    ]);
    assert_eq!(global_number(&context, "r"), 5.0);
}

// =============================================================================
// While / do-while
// =============================================================================

#[test]
fn while_loop_counts_up() {
    // var i = 0; while (i < 5) { i = i + 1; }
    let context = run_ok(vec![
        Stmt::var("i", Some(Expr::number(0.0))).into_element(),
        Stmt::while_stmt(
            Expr::binary(BinaryOp::Lt, Expr::ident("i"), Expr::number(5.0)),
            add_to("i", 1.0),
        )
        .into_element(),
    ]);
    assert_eq!(global_number(&context, "i"), 5.0);
}

#[test]
fn while_false_never_runs() {
    let context = run_ok(vec![
        Stmt::var("n", Some(Expr::number(0.0))).into_element(),
        Stmt::while_stmt(Expr::bool(false), add_to("n", 1.0)).into_element(),
    ]);
    assert_eq!(global_number(&context, "n"), 0.0);
}

#[test]
fn do_while_runs_at_least_once() {
    // var i = 10; do { runs = runs + 1; } while (i < 3);
    let context = run_ok(vec![
        Stmt::var("runs", Some(Expr::number(0.0))).into_element(),
        Stmt::var("i", Some(Expr::number(10.0))).into_element(),
        Stmt::do_while(
            add_to("runs", 1.0),
            Expr::binary(BinaryOp::Lt, Expr::ident("i"), Expr::number(3.0)),
        )
        .into_element(),
    ]);
    assert_eq!(global_number(&context, "runs"), 1.0);
}

#[test]
fn break_leaves_the_loop() {
    // var i = 0; while (true) { i = i + 1; if (i === 3) break; }
    let context = run_ok(vec![
        Stmt::var("i", Some(Expr::number(0.0))).into_element(),
        Stmt::while_stmt(
            Expr::bool(true),
            Stmt::Block(vec![
                add_to("i", 1.0),
                Stmt::if_stmt(
                    Expr::binary(BinaryOp::StrictEq, Expr::ident("i"), Expr::number(3.0)),
                    Stmt::Break(None),
                    None,
                ),
            ]),
        )
        .into_element(),
    ]);
    assert_eq!(global_number(&context, "i"), 3.0);
}

// =============================================================================
// For
// =============================================================================

fn counting_for(body: Stmt) -> Stmt {
    // for (i = 0; i < 3; i = i + 1) body
    Stmt::for_stmt(
        Some(ForInit::Expr(Expr::assign(
            Expr::ident("i"),
            Expr::number(0.0),
        ))),
        Some(Expr::binary(
            BinaryOp::Lt,
            Expr::ident("i"),
            Expr::number(3.0),
        )),
        Some(Expr::assign(
            Expr::ident("i"),
            Expr::binary(BinaryOp::Add, Expr::ident("i"), Expr::number(1.0)),
        )),
        body,
    )
}

#[test]
fn for_loop_runs_the_step_each_iteration() {
    let context = run_ok(vec![
        Stmt::var("total", Some(Expr::number(0.0))).into_element(),
        counting_for(Stmt::expr(Expr::assign(
            Expr::ident("total"),
            Expr::binary(BinaryOp::Add, Expr::ident("total"), Expr::ident("i")),
        )))
        .into_element(),
    ]);
    assert_eq!(global_number(&context, "total"), 3.0); // 0 + 1 + 2
    assert_eq!(global_number(&context, "i"), 3.0);
}

#[test]
fn for_with_var_init() {
    // function f() { var t = 0; for (var k = 0; k < 4; k = k + 1) { t = t + k; } return t; }
    let body = vec![
        Stmt::var("t", Some(Expr::number(0.0))).into_element(),
        Stmt::for_stmt(
            Some(ForInit::Vars(vec![VarDecl::new(
                "k",
                Some(Expr::number(0.0)),
            )])),
            Some(Expr::binary(
                BinaryOp::Lt,
                Expr::ident("k"),
                Expr::number(4.0),
            )),
            Some(Expr::assign(
                Expr::ident("k"),
                Expr::binary(BinaryOp::Add, Expr::ident("k"), Expr::number(1.0)),
            )),
            Stmt::expr(Expr::assign(
                Expr::ident("t"),
                Expr::binary(BinaryOp::Add, Expr::ident("t"), Expr::ident("k")),
            )),
        )
        .into_element(),
        Stmt::ret(Some(Expr::ident("t"))).into_element(),
    ];
    let context = run_ok(vec![
        FuncDecl::new("f", vec![], body).into_element(),
        assign("r", Expr::call(Expr::ident("f"), vec![])),
    ]);
    assert_eq!(global_number(&context, "r"), 6.0); // 0 + 1 + 2 + 3
}

#[test]
fn continue_in_for_still_runs_the_step() {
    // Skipping an iteration must not stall the induction variable: the
    // recorded values are 0 and 2, and the loop terminates.
    let context = Context::new();
    let record = install_log(&context);

    let body = Stmt::Block(vec![
        Stmt::if_stmt(
            Expr::binary(BinaryOp::StrictEq, Expr::ident("i"), Expr::number(1.0)),
            Stmt::Continue(None),
            None,
        ),
        Stmt::expr(Expr::call(Expr::ident("log"), vec![Expr::ident("i")])),
    ]);
    run_in(&context, vec![counting_for(body).into_element()]).expect("runtime error");

    let logged: Vec<f64> = record
        .borrow()
        .iter()
        .map(|v| v.as_number().unwrap())
        .collect();
    assert_eq!(logged, [0.0, 2.0]);
    assert_eq!(global_number(&context, "i"), 3.0);
}

#[test]
fn for_without_condition_loops_until_break() {
    // for (n = 0; ; n = n + 1) { if (n >= 4) break; }
    let context = run_ok(vec![
        Stmt::for_stmt(
            Some(ForInit::Expr(Expr::assign(
                Expr::ident("n"),
                Expr::number(0.0),
            ))),
            None,
            Some(Expr::assign(
                Expr::ident("n"),
                Expr::binary(BinaryOp::Add, Expr::ident("n"), Expr::number(1.0)),
            )),
            Stmt::if_stmt(
                Expr::binary(BinaryOp::GtEq, Expr::ident("n"), Expr::number(4.0)),
                Stmt::Break(None),
                None,
            ),
        )
        .into_element(),
    ]);
    assert_eq!(global_number(&context, "n"), 4.0);
}

// =============================================================================
// Labelled break and continue
// =============================================================================

fn nested_counting_loops(inner_body: Stmt) -> Stmt {
    // for (i = 0; i < 3; i = i + 1)
    //   for (j = 0; j < 3; j = j + 1) inner_body
    counting_for(Stmt::for_stmt(
        Some(ForInit::Expr(Expr::assign(
            Expr::ident("j"),
            Expr::number(0.0),
        ))),
        Some(Expr::binary(
            BinaryOp::Lt,
            Expr::ident("j"),
            Expr::number(3.0),
        )),
        Some(Expr::assign(
            Expr::ident("j"),
            Expr::binary(BinaryOp::Add, Expr::ident("j"), Expr::number(1.0)),
        )),
        inner_body,
    ))
}

#[test]
fn labelled_break_leaves_the_outer_loop() {
    // outer: for (...) for (...) { if (j === 1) break outer; count = count + 1; }
    let inner_body = Stmt::Block(vec![
        Stmt::if_stmt(
            Expr::binary(BinaryOp::StrictEq, Expr::ident("j"), Expr::number(1.0)),
            Stmt::Break(Some("outer".to_string())),
            None,
        ),
        add_to("count", 1.0),
    ]);
    let context = run_ok(vec![
        Stmt::var("count", Some(Expr::number(0.0))).into_element(),
        Stmt::labelled(vec!["outer".to_string()], nested_counting_loops(inner_body))
            .into_element(),
    ]);

    assert_eq!(global_number(&context, "count"), 1.0);
    assert_eq!(global_number(&context, "i"), 0.0);
}

#[test]
fn labelled_continue_advances_the_outer_loop() {
    // scan: for (...) for (...) { if (j === 1) continue scan; hits = hits + 1; }
    let inner_body = Stmt::Block(vec![
        Stmt::if_stmt(
            Expr::binary(BinaryOp::StrictEq, Expr::ident("j"), Expr::number(1.0)),
            Stmt::Continue(Some("scan".to_string())),
            None,
        ),
        add_to("hits", 1.0),
    ]);
    let context = run_ok(vec![
        Stmt::var("hits", Some(Expr::number(0.0))).into_element(),
        Stmt::labelled(vec!["scan".to_string()], nested_counting_loops(inner_body))
            .into_element(),
    ]);

    // One inner iteration per outer pass; the outer loop still finishes.
    assert_eq!(global_number(&context, "hits"), 3.0);
    assert_eq!(global_number(&context, "i"), 3.0);
}

#[test]
fn labelled_break_works_on_a_plain_block() {
    // stop: { a = 1; break stop; a = 2; }
    let context = run_ok(vec![
        Stmt::labelled(
            vec!["stop".to_string()],
            Stmt::Block(vec![
                Stmt::expr(Expr::assign(Expr::ident("a"), Expr::number(1.0))),
                Stmt::Break(Some("stop".to_string())),
                Stmt::expr(Expr::assign(Expr::ident("a"), Expr::number(2.0))),
            ]),
        )
        .into_element(),
    ]);
    assert_eq!(global_number(&context, "a"), 1.0);
}

// =============================================================================
// Switch
// =============================================================================

#[test]
fn switch_dispatch_is_strict() {
    // switch ("1") { case 1: ...; case "1": ...; default: ... }
    let context = run_ok(vec![
        Stmt::Switch {
            disc: Expr::string("1"),
            cases: vec![
                CaseClause::case(
                    Expr::number(1.0),
                    vec![
                        Stmt::expr(Expr::assign(Expr::ident("kind"), Expr::string("number"))),
                        Stmt::Break(None),
                    ],
                ),
                CaseClause::case(
                    Expr::string("1"),
                    vec![
                        Stmt::expr(Expr::assign(Expr::ident("kind"), Expr::string("string"))),
                        Stmt::Break(None),
                    ],
                ),
                CaseClause::default(vec![Stmt::expr(Expr::assign(
                    Expr::ident("kind"),
                    Expr::string("none"),
                ))]),
            ],
        }
        .into_element(),
    ]);
    assert_eq!(global_str(&context, "kind"), "string");
}

#[test]
fn switch_falls_through_without_break() {
    // t = 0; switch (2) { case 1: +1; case 2: +10; case 3: +100; break; case 4: +1000; }
    let context = run_ok(vec![
        Stmt::var("t", Some(Expr::number(0.0))).into_element(),
        Stmt::Switch {
            disc: Expr::number(2.0),
            cases: vec![
                CaseClause::case(Expr::number(1.0), vec![add_to("t", 1.0)]),
                CaseClause::case(Expr::number(2.0), vec![add_to("t", 10.0)]),
                CaseClause::case(Expr::number(3.0), vec![add_to("t", 100.0), Stmt::Break(None)]),
                CaseClause::case(Expr::number(4.0), vec![add_to("t", 1000.0)]),
            ],
        }
        .into_element(),
    ]);
    assert_eq!(global_number(&context, "t"), 110.0);
}

#[test]
fn switch_without_match_takes_the_default() {
    let context = run_ok(vec![
        Stmt::var("r", Some(Expr::number(0.0))).into_element(),
        Stmt::Switch {
            disc: Expr::number(9.0),
            cases: vec![
                CaseClause::case(Expr::number(1.0), vec![Stmt::expr(Expr::assign(
                    Expr::ident("r"),
                    Expr::number(1.0),
                ))]),
                CaseClause::default(vec![Stmt::expr(Expr::assign(
                    Expr::ident("r"),
                    Expr::number(99.0),
                ))]),
            ],
        }
        .into_element(),
    ]);
    assert_eq!(global_number(&context, "r"), 99.0);
}

#[test]
fn switch_without_match_or_default_does_nothing() {
    // The discriminant must come off the stack even when nothing matches;
    // a leak here would trip the post-run balance check.
    let (result, context) = run(vec![
        Stmt::var("r", Some(Expr::number(7.0))).into_element(),
        Stmt::Switch {
            disc: Expr::number(3.0),
            cases: vec![CaseClause::case(Expr::number(1.0), vec![Stmt::expr(
                Expr::assign(Expr::ident("r"), Expr::number(1.0)),
            )])],
        }
        .into_element(),
    ]);
    assert!(matches!(result, Ok(Value::Undefined)));
    assert_eq!(global_number(&context, "r"), 7.0);
}

#[test]
fn continue_inside_switch_targets_the_enclosing_loop() {
    // for (i = 0; i < 3; i = i + 1) { switch (i) { case 1: continue; } n = n + 1; }
    let body = Stmt::Block(vec![
        Stmt::Switch {
            disc: Expr::ident("i"),
            cases: vec![CaseClause::case(Expr::number(1.0), vec![Stmt::Continue(
                None,
            )])],
        },
        add_to("n", 1.0),
    ]);
    let context = run_ok(vec![
        Stmt::var("n", Some(Expr::number(0.0))).into_element(),
        counting_for(body).into_element(),
    ]);
    assert_eq!(global_number(&context, "n"), 2.0);
}

#[test]
fn break_inside_switch_leaves_the_switch_not_the_loop() {
    // for (i = 0; i < 3; i = i + 1) { switch (i) { case 0: break; } n = n + 1; }
    let body = Stmt::Block(vec![
        Stmt::Switch {
            disc: Expr::ident("i"),
            cases: vec![CaseClause::case(Expr::number(0.0), vec![Stmt::Break(None)])],
        },
        add_to("n", 1.0),
    ]);
    let context = run_ok(vec![
        Stmt::var("n", Some(Expr::number(0.0))).into_element(),
        counting_for(body).into_element(),
    ]);
    assert_eq!(global_number(&context, "n"), 3.0);
}
