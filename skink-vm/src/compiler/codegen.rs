// skink-vm - Bytecode compiler and virtual machine for the skink scripting language
// Copyright (c) 2026 The skink authors. MIT licensed.

//! Single-pass AST to bytecode translation.
//!
//! Code generation walks the AST once, emitting instructions as it goes.
//! Forward control flow goes through jump labels, which patch their sites
//! in place once the target address is known, so no second pass exists.
//! A context stack mirrors the lexical nesting of function declarations:
//! each entry owns the code under construction and the break/continue
//! scope for one function, and finished bodies are installed into their
//! descriptor when the entry is popped.

use std::rc::Rc;

use skink_ast::{
    AssignOp, BinaryOp, CaseClause, Expr, ForInit, FuncDecl, Literal, Program, SourceElement,
    Stmt, UnaryOp, VarDecl,
};
use skink_runtime::Value;

use crate::compiler::label::{JumpLabel, LabelKind, LabelRef, LabelScope};
use crate::compiler::lvars::LocalCollector;
use crate::compiler::types::{CompileError, Result};
use crate::function::{CodeSeq, UserFunction};
use crate::opcode::Instr;

/// Compilation state for one function body.
struct FuncCtx {
    func: Rc<UserFunction>,
    code: CodeSeq,
    labels: LabelScope,
}

impl FuncCtx {
    fn new(func: Rc<UserFunction>) -> Self {
        FuncCtx {
            func,
            code: CodeSeq::new(),
            labels: LabelScope::new(),
        }
    }
}

/// Where a variable name binds, seen from the function being compiled.
enum Resolution {
    /// Formal slot, `link` capture hops away.
    Formal { link: usize, index: usize },
    /// Local slot, `link` capture hops away.
    Local { link: usize, index: usize },
    /// Not found in any enclosing function: a global-object property.
    Global,
}

/// The bytecode compiler.
pub struct CodeGen {
    /// Innermost function under compilation is the last entry.
    funcs: Vec<FuncCtx>,
}

impl CodeGen {
    /// Compile `program` into `func`, which must be a fresh top-level
    /// descriptor. On success the compiled body (and those of all nested
    /// functions) is installed; on error no descriptor is modified.
    pub fn compile(func: &Rc<UserFunction>, program: &Program) -> Result<()> {
        let mut r#gen = CodeGen {
            funcs: vec![FuncCtx::new(Rc::clone(func))],
        };
        r#gen.compile_source_elements(&program.elements)?;
        let ctx = r#gen.funcs.pop().expect("function context stack empty");
        debug_assert!(
            !ctx.code.has_unpatched_jumps(),
            "unresolved jump target in compiled code"
        );
        ctx.func.install_code(ctx.code);
        Ok(())
    }

    // =====================================================================
    // Context plumbing
    // =====================================================================

    fn ctx(&mut self) -> &mut FuncCtx {
        self.funcs.last_mut().expect("no active function context")
    }

    fn current_func(&self) -> &Rc<UserFunction> {
        &self.funcs.last().expect("no active function context").func
    }

    fn emit(&mut self, instr: Instr) {
        self.ctx().code.emit(instr);
    }

    fn refer_jump(&mut self, label: &LabelRef, make: fn(usize) -> Instr) {
        let ctx = self.ctx();
        label.borrow_mut().refer(&mut ctx.code, make);
    }

    fn resolve_label(&mut self, label: &LabelRef) {
        let ctx = self.ctx();
        let address = ctx.code.len();
        label.borrow_mut().resolve(&mut ctx.code, address);
    }

    // =====================================================================
    // Source elements and functions
    // =====================================================================

    /// Compile one level of a program or function body. Function
    /// declarations hoist: their closures are constructed and bound before
    /// any statement of the same level runs.
    fn compile_source_elements(&mut self, elements: &[SourceElement]) -> Result<()> {
        for elem in elements {
            if let SourceElement::Function(func) = elem {
                self.compile_func_decl(func)?;
            }
        }
        for elem in elements {
            if let SourceElement::Statement(stmt) = elem {
                self.compile_stmt(stmt)?;
            }
        }
        Ok(())
    }

    fn compile_func_decl(&mut self, decl: &FuncDecl) -> Result<()> {
        let func = Rc::new(UserFunction::new(
            Some(&decl.name),
            &decl.formals,
            Some(Rc::clone(self.current_func())),
        ));
        LocalCollector::run(&func, &decl.body);

        self.funcs.push(FuncCtx::new(Rc::clone(&func)));
        self.compile_source_elements(&decl.body)?;
        self.finish_function();

        self.emit(Instr::Closure(func));
        self.store_variable(&decl.name);
        Ok(())
    }

    /// Pop the finished function context, append the implicit-undefined
    /// return epilogue where the body can run off the end, and install the
    /// code into the descriptor.
    fn finish_function(&mut self) {
        let mut ctx = self.funcs.pop().expect("no active function context");
        if !ends_in_return(&ctx.code) {
            ctx.code.emit(Instr::Const(Value::Undefined));
            ctx.code.emit(Instr::Return);
        }
        debug_assert!(
            !ctx.code.has_unpatched_jumps(),
            "unresolved jump target in compiled function"
        );
        ctx.func.install_code(ctx.code);
    }

    // =====================================================================
    // Variable access
    // =====================================================================

    /// Resolve a name against the formal and local tables of the current
    /// function, then each lexical ancestor in turn. `link` counts how
    /// many capture hops separate the use from the binding.
    fn resolve_variable(&self, name: &str) -> Resolution {
        let mut link = 0;
        let mut func = Some(Rc::clone(self.current_func()));
        while let Some(f) = func {
            if let Some(index) = f.formal_index(name) {
                return Resolution::Formal { link, index };
            }
            if let Some(index) = f.local_index(name) {
                return Resolution::Local { link, index };
            }
            func = f.outer().cloned();
            link += 1;
        }
        Resolution::Global
    }

    /// Emit a read of `name`, pushing its value.
    fn load_variable(&mut self, name: &str) {
        match self.resolve_variable(name) {
            Resolution::Formal { link: 0, index } => self.emit(Instr::LoadFormal(index)),
            Resolution::Formal { link, index } => {
                self.emit(Instr::LoadFormalOuter { link, index })
            }
            Resolution::Local { link: 0, index } => self.emit(Instr::LoadLocal(index)),
            Resolution::Local { link, index } => self.emit(Instr::LoadLocalOuter { link, index }),
            Resolution::Global => {
                self.emit(Instr::GetGlobal);
                self.emit(Instr::Const(Value::from(name)));
                self.emit(Instr::GetProp);
            }
        }
    }

    /// Emit a write to `name`, consuming the value on top of the stack.
    fn store_variable(&mut self, name: &str) {
        match self.resolve_variable(name) {
            Resolution::Formal { link: 0, index } => self.emit(Instr::StoreFormal(index)),
            Resolution::Formal { link, index } => {
                self.emit(Instr::StoreFormalOuter { link, index })
            }
            Resolution::Local { link: 0, index } => self.emit(Instr::StoreLocal(index)),
            Resolution::Local { link, index } => {
                self.emit(Instr::StoreLocalOuter { link, index })
            }
            Resolution::Global => {
                self.emit(Instr::GetGlobal);
                self.emit(Instr::Const(Value::from(name)));
                self.emit(Instr::PutProp);
            }
        }
    }

    // =====================================================================
    // Statements
    // =====================================================================

    fn compile_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Block(stmts) => {
                for s in stmts {
                    self.compile_stmt(s)?;
                }
                Ok(())
            }
            Stmt::Vars(decls) => {
                for d in decls {
                    self.compile_var_decl(d)?;
                }
                Ok(())
            }
            Stmt::Expr(e) => {
                self.compile_expr(e)?;
                self.emit(Instr::Drop);
                Ok(())
            }
            Stmt::If { cond, cons, alt } => self.compile_if(cond, cons, alt.as_deref()),
            Stmt::While { cond, body } => self.compile_while(cond, body, &[]),
            Stmt::DoWhile { body, cond } => self.compile_do_while(body, cond, &[]),
            Stmt::For {
                init,
                cond,
                step,
                body,
            } => self.compile_for(init.as_ref(), cond.as_ref(), step.as_ref(), body, &[]),
            Stmt::Switch { disc, cases } => self.compile_switch(disc, cases),
            Stmt::Labelled { labels, body } => self.compile_labelled(labels, body),
            Stmt::Break(target) => self.compile_break(target.as_deref()),
            Stmt::Continue(target) => self.compile_continue(target.as_deref()),
            Stmt::Return(value) => self.compile_return(value.as_ref()),
        }
    }

    /// Inside a function the pre-pass has already claimed the slot, so a
    /// declarator reduces to an optional initialising write. At the top
    /// level there are no slots and the write goes to the global object;
    /// with no initialiser the declarator emits nothing at all.
    fn compile_var_decl(&mut self, decl: &VarDecl) -> Result<()> {
        if !self.current_func().is_top_level() {
            self.current_func().add_local(&decl.name);
        }
        if let Some(init) = &decl.init {
            self.compile_expr(init)?;
            self.store_variable(&decl.name);
        }
        Ok(())
    }

    fn compile_if(&mut self, cond: &Expr, cons: &Stmt, alt: Option<&Stmt>) -> Result<()> {
        let false_label = JumpLabel::new_ref();
        self.compile_expr(cond)?;
        self.refer_jump(&false_label, Instr::JumpIfFalse);
        self.compile_stmt(cons)?;
        match alt {
            Some(alt) => {
                let leave_label = JumpLabel::new_ref();
                self.refer_jump(&leave_label, Instr::Jump);
                self.resolve_label(&false_label);
                self.compile_stmt(alt)?;
                self.resolve_label(&leave_label);
            }
            None => self.resolve_label(&false_label),
        }
        Ok(())
    }

    /// Loop shape: jump down to the condition, loop back up on true. The
    /// condition is also the continue target.
    fn compile_while(&mut self, cond: &Expr, body: &Stmt, labels: &[String]) -> Result<()> {
        let cond_label = JumpLabel::new_ref();
        let loop_label = JumpLabel::new_ref();
        let break_label = JumpLabel::new_ref();

        self.refer_jump(&cond_label, Instr::Jump);
        self.resolve_label(&loop_label);

        self.ctx()
            .labels
            .put_named(labels, LabelKind::Continue, &cond_label)?;
        self.ctx().labels.push_anon(&break_label, Some(&cond_label));
        self.compile_stmt(body)?;
        self.ctx().labels.pop_anon();
        self.ctx().labels.remove_named(labels, LabelKind::Continue);

        self.resolve_label(&cond_label);
        self.compile_expr(cond)?;
        self.refer_jump(&loop_label, Instr::JumpIfTrue);
        self.resolve_label(&break_label);
        Ok(())
    }

    fn compile_do_while(&mut self, body: &Stmt, cond: &Expr, labels: &[String]) -> Result<()> {
        let loop_label = JumpLabel::new_ref();
        let continue_label = JumpLabel::new_ref();
        let break_label = JumpLabel::new_ref();

        self.resolve_label(&loop_label);

        self.ctx()
            .labels
            .put_named(labels, LabelKind::Continue, &continue_label)?;
        self.ctx()
            .labels
            .push_anon(&break_label, Some(&continue_label));
        self.compile_stmt(body)?;
        self.ctx().labels.pop_anon();
        self.ctx().labels.remove_named(labels, LabelKind::Continue);

        self.resolve_label(&continue_label);
        self.compile_expr(cond)?;
        self.refer_jump(&loop_label, Instr::JumpIfTrue);
        self.resolve_label(&break_label);
        Ok(())
    }

    /// Continue targets the step clause, not the condition, so `continue`
    /// still advances the induction variable.
    fn compile_for(
        &mut self,
        init: Option<&ForInit>,
        cond: Option<&Expr>,
        step: Option<&Expr>,
        body: &Stmt,
        labels: &[String],
    ) -> Result<()> {
        match init {
            Some(ForInit::Vars(decls)) => {
                for d in decls {
                    self.compile_var_decl(d)?;
                }
            }
            Some(ForInit::Expr(e)) => {
                self.compile_expr(e)?;
                self.emit(Instr::Drop);
            }
            None => {}
        }

        let cond_label = JumpLabel::new_ref();
        let loop_label = JumpLabel::new_ref();
        let continue_label = JumpLabel::new_ref();
        let break_label = JumpLabel::new_ref();

        self.refer_jump(&cond_label, Instr::Jump);
        self.resolve_label(&loop_label);

        self.ctx()
            .labels
            .put_named(labels, LabelKind::Continue, &continue_label)?;
        self.ctx()
            .labels
            .push_anon(&break_label, Some(&continue_label));
        self.compile_stmt(body)?;
        self.ctx().labels.pop_anon();
        self.ctx().labels.remove_named(labels, LabelKind::Continue);

        self.resolve_label(&continue_label);
        if let Some(step) = step {
            self.compile_expr(step)?;
            self.emit(Instr::Drop);
        }

        self.resolve_label(&cond_label);
        match cond {
            Some(cond) => {
                self.compile_expr(cond)?;
                self.refer_jump(&loop_label, Instr::JumpIfTrue);
            }
            None => self.refer_jump(&loop_label, Instr::Jump),
        }
        self.resolve_label(&break_label);
        Ok(())
    }

    /// Dispatch on the discriminant by strict equality, in clause order,
    /// then fall through bodies from the matched clause. The discriminant
    /// stays on the stack during the tests and is dropped exactly once on
    /// every path.
    fn compile_switch(&mut self, disc: &Expr, cases: &[CaseClause]) -> Result<()> {
        self.compile_expr(disc)?;

        let break_label = JumpLabel::new_ref();
        let case_labels: Vec<LabelRef> = cases.iter().map(|_| JumpLabel::new_ref()).collect();

        for (clause, case_label) in cases.iter().zip(&case_labels) {
            let Some(test) = &clause.test else { continue };
            let skip_label = JumpLabel::new_ref();
            self.emit(Instr::Dup);
            self.compile_expr(test)?;
            self.emit(Instr::StrictNotEq);
            self.refer_jump(&skip_label, Instr::JumpIfTrue);
            self.emit(Instr::Drop);
            self.refer_jump(case_label, Instr::Jump);
            self.resolve_label(&skip_label);
        }

        // No clause matched.
        self.emit(Instr::Drop);
        match cases.iter().position(|c| c.test.is_none()) {
            Some(default) => self.refer_jump(&case_labels[default], Instr::Jump),
            None => self.refer_jump(&break_label, Instr::Jump),
        }

        self.ctx().labels.push_anon(&break_label, None);
        for (clause, case_label) in cases.iter().zip(&case_labels) {
            self.resolve_label(case_label);
            for s in &clause.body {
                self.compile_stmt(s)?;
            }
        }
        self.ctx().labels.pop_anon();

        self.resolve_label(&break_label);
        Ok(())
    }

    /// Register the statement's labels as break targets around its body.
    /// A labelled loop additionally gets the labels as continue targets,
    /// so the loop compilers take them as a parameter.
    fn compile_labelled(&mut self, labels: &[String], body: &Stmt) -> Result<()> {
        let break_label = JumpLabel::new_ref();
        self.ctx()
            .labels
            .put_named(labels, LabelKind::Break, &break_label)?;

        match body {
            Stmt::While { cond, body } => self.compile_while(cond, body, labels)?,
            Stmt::DoWhile { body, cond } => self.compile_do_while(body, cond, labels)?,
            Stmt::For {
                init,
                cond,
                step,
                body,
            } => self.compile_for(init.as_ref(), cond.as_ref(), step.as_ref(), body, labels)?,
            other => self.compile_stmt(other)?,
        }

        self.ctx().labels.remove_named(labels, LabelKind::Break);
        self.resolve_label(&break_label);
        Ok(())
    }

    fn compile_break(&mut self, target: Option<&str>) -> Result<()> {
        let label = match target {
            Some(name) => self
                .ctx()
                .labels
                .get_named(name, LabelKind::Break)
                .ok_or_else(|| {
                    CompileError::Syntax(format!("break target not found: {}", name))
                })?,
            None => self
                .ctx()
                .labels
                .get_anon(LabelKind::Break)
                .ok_or_else(|| CompileError::Syntax("break outside loop or switch".into()))?,
        };
        self.refer_jump(&label, Instr::Jump);
        Ok(())
    }

    fn compile_continue(&mut self, target: Option<&str>) -> Result<()> {
        let label = match target {
            Some(name) => self
                .ctx()
                .labels
                .get_named(name, LabelKind::Continue)
                .ok_or_else(|| {
                    CompileError::Syntax(format!("continue target not found: {}", name))
                })?,
            None => self
                .ctx()
                .labels
                .get_anon(LabelKind::Continue)
                .ok_or_else(|| CompileError::Syntax("continue outside loop".into()))?,
        };
        self.refer_jump(&label, Instr::Jump);
        Ok(())
    }

    fn compile_return(&mut self, value: Option<&Expr>) -> Result<()> {
        if self.current_func().is_top_level() {
            return Err(CompileError::Syntax(
                "return statement outside function body".into(),
            ));
        }
        match value {
            Some(expr) => self.compile_expr(expr)?,
            None => self.emit(Instr::Const(Value::Undefined)),
        }
        self.emit(Instr::Return);
        Ok(())
    }

    // =====================================================================
    // Expressions
    // =====================================================================

    fn compile_expr(&mut self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Literal(lit) => {
                self.emit(Instr::Const(literal_value(lit)));
                Ok(())
            }
            Expr::Ident(name) => {
                self.load_variable(name);
                Ok(())
            }
            Expr::This => {
                self.emit(Instr::This);
                Ok(())
            }
            Expr::Unary { op, operand } => match op {
                UnaryOp::Neg => {
                    self.compile_expr(operand)?;
                    self.emit(Instr::Neg);
                    Ok(())
                }
                UnaryOp::Not => Err(CompileError::Unsupported(format!("unary operator {}", op))),
            },
            Expr::Binary { op, left, right } => {
                let instr = binary_op_instr(*op)
                    .ok_or_else(|| CompileError::Unsupported(format!("binary operator {}", op)))?;
                self.compile_expr(left)?;
                self.compile_expr(right)?;
                self.emit(instr);
                Ok(())
            }
            Expr::Assign { op, target, value } => {
                if *op != AssignOp::Assign {
                    return Err(CompileError::Unsupported(format!(
                        "assignment operator {}",
                        op
                    )));
                }
                if !target.is_assign_target() {
                    return Err(CompileError::Syntax("invalid assignment target".into()));
                }
                self.compile_expr(value)?;
                // Assignment is an expression; keep a copy as its value.
                self.emit(Instr::Dup);
                self.compile_store(target)
            }
            Expr::Call { callee, args } => {
                self.compile_expr(callee)?;
                for arg in args {
                    self.compile_expr(arg)?;
                }
                self.emit(Instr::Call(args.len()));
                Ok(())
            }
        }
    }

    fn compile_store(&mut self, target: &Expr) -> Result<()> {
        match target {
            Expr::Ident(name) => {
                self.store_variable(name);
                Ok(())
            }
            _ => Err(CompileError::Syntax("invalid assignment target".into())),
        }
    }
}

fn literal_value(lit: &Literal) -> Value {
    match lit {
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::from(s.as_str()),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Null => Value::Null,
    }
}

fn binary_op_instr(op: BinaryOp) -> Option<Instr> {
    Some(match op {
        BinaryOp::Add => Instr::Add,
        BinaryOp::Sub => Instr::Sub,
        BinaryOp::Mul => Instr::Mul,
        BinaryOp::Div => Instr::Div,
        BinaryOp::Mod => return None,
        BinaryOp::Lt => Instr::Lt,
        BinaryOp::Gt => Instr::Gt,
        BinaryOp::LtEq => Instr::LtEq,
        BinaryOp::GtEq => Instr::GtEq,
        BinaryOp::Eq => Instr::Eq,
        BinaryOp::NotEq => Instr::NotEq,
        BinaryOp::StrictEq => Instr::StrictEq,
        BinaryOp::StrictNotEq => Instr::StrictNotEq,
    })
}

/// Whether the body provably ends at a `return` already. A label may
/// resolve to the address one past the last instruction (`if (c) return;`
/// does this), in which case control can still run off the end and the
/// epilogue is required.
fn ends_in_return(code: &CodeSeq) -> bool {
    matches!(code.last(), Some(Instr::Return))
        && !code.iter().any(|i| i.jump_target() == Some(code.len()))
}
