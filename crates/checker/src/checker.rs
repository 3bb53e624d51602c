//! The symbolic assertion checker.
//!
//! Walks each function body, keeps an SSA-indexed symbolic store per
//! variable, and builds first-order formulas in the theory of integers,
//! booleans and extensional arrays. Explicit `assert(...)` calls, integer
//! overflow/underflow and division by zero become goals: formulas the
//! solver is asked to prove unreachable. A satisfiable goal is reported as
//! a warning with a counter-example model.
//!
//! ## Branches, loops and calls
//!
//! Branch bodies are visited under a pushed path condition; afterwards each
//! touched variable is reunified with `v_new == ite(cond, v_true, v_false)`
//! over the two branch-exit SSA indices. Loops are abstracted to one
//! symbolic iteration: every variable the loop touches is havocked first,
//! so nothing learned before the loop survives it. Internal calls are
//! inlined with fresh SSA versions for parameters and locals; recursion is
//! reported as unsupported.
//!
//! Assertions accumulate monotonically while traversing; the solver's
//! push/pop scopes are used only around individual goal queries.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use veract_smtlib::Term;
use veract_solver::{CheckResult, Portfolio, QueryResponses, SmtSolver};

use crate::ast::{
    AssignOp, BinOp, CallKind, Contract, Expr, ExprKind, Function, Loc, NodeId, SourceCache,
    SourceUnit, Stmt, StmtKind, Ty, UnOp, VarDecl,
};
use crate::humanize::{format_number_readable, humanize_model_value};
use crate::reporter::{ErrorReporter, SecondaryNote};
use crate::symbol::{
    new_symbolic_variable, set_unknown_term, set_unknown_value, set_zero_value, SymbolicVariable,
};
use crate::usage;

const CONFLICTING_ANSWERS: &str =
    "At least two SMT solvers provided conflicting answers. Results might not be sound.";
const SOLVER_ERROR: &str = "Error trying to invoke SMT solver.";

const LOOP_HINT: &str = "\nNote that some information is erased after the execution of loops.\n\
     You can re-introduce information using require().";
const MAPPING_HINT: &str = "\nNote that array aliasing is not supported, therefore all mapping \
     information is erased after a mapping local variable/parameter is assigned.\n\
     You can re-introduce information using require().";

/// Snapshot of the live SSA index of every known variable.
type VariableIndices = FxHashMap<NodeId, usize>;

/// An expression whose value the solver treats opaquely (index reads,
/// abstract call results); its source text names it in counter-examples.
#[derive(Debug, Clone)]
struct UninterpretedTerm {
    id: NodeId,
    loc: Loc,
    ty: Ty,
}

/// The checker. One instance analyzes source units sequentially.
pub struct Checker<'a> {
    solver: Box<dyn SmtSolver>,
    reporter: &'a mut dyn ErrorReporter,
    source: &'a SourceCache,

    /// Function definitions by id, for call inlining.
    functions: FxHashMap<NodeId, Rc<Function>>,
    /// Symbolic variable per declaration. Local entries are dropped when the
    /// owning root function finishes; state entries persist per contract.
    vars: FxHashMap<NodeId, SymbolicVariable>,
    /// Declaration metadata mirroring `vars`.
    var_decls: FxHashMap<NodeId, VarDecl>,
    /// Symbolic variable per encoded expression node.
    exprs: FxHashMap<NodeId, SymbolicVariable>,
    /// Pseudo-globals (`now`, `gasleft()`, `msg.sender`, function symbols).
    globals: FxHashMap<String, SymbolicVariable>,
    /// Opaque terms, in encounter order.
    uninterp: Vec<UninterpretedTerm>,
    /// Stack of pre-conjoined path conditions; the top is the current one.
    path_conditions: Vec<Term>,
    /// Functions being visited; length one means we are at the root.
    function_path: Vec<NodeId>,

    loop_execution_happened: bool,
    array_assignment_happened: bool,
}

impl<'a> Checker<'a> {
    /// Build a checker over the default solver portfolio.
    ///
    /// `responses` feeds the canned-response oracle used when no native
    /// solver is installed; when one is, the responses are ignored and a
    /// warning says so.
    pub fn new(
        responses: QueryResponses,
        reporter: &'a mut dyn ErrorReporter,
        source: &'a SourceCache,
    ) -> Self {
        let has_responses = !responses.is_empty();
        let portfolio = Portfolio::with_default_backends(responses);
        tracing::info!(
            native_backends = portfolio.native_backends(),
            canned_responses = has_responses,
            "solver portfolio ready"
        );
        if portfolio.native_backends() > 0 && has_responses {
            reporter.warning(
                None,
                "SMT-LIB2 query responses were given in the auxiliary input, but this binary \
                 uses an SMT solver directly. These responses will be ignored."
                    .to_string(),
                Vec::new(),
            );
        }
        Self::with_solver(Box::new(portfolio), reporter, source)
    }

    /// Build a checker over an explicit solver.
    pub fn with_solver(
        solver: Box<dyn SmtSolver>,
        reporter: &'a mut dyn ErrorReporter,
        source: &'a SourceCache,
    ) -> Self {
        Self {
            solver,
            reporter,
            source,
            functions: FxHashMap::default(),
            vars: FxHashMap::default(),
            var_decls: FxHashMap::default(),
            exprs: FxHashMap::default(),
            globals: FxHashMap::default(),
            uninterp: Vec::new(),
            path_conditions: Vec::new(),
            function_path: Vec::new(),
            loop_execution_happened: false,
            array_assignment_happened: false,
        }
    }

    /// Analyze a source unit: every function of every contract.
    pub fn analyze(&mut self, unit: &SourceUnit) {
        if !unit.smt_checker_enabled {
            tracing::debug!("assertion checker not requested for this unit");
            return;
        }
        tracing::info!(contracts = unit.contracts.len(), "analyzing source unit");
        self.functions.clear();
        for contract in &unit.contracts {
            for function in &contract.functions {
                self.functions
                    .insert(function.id, Rc::new(function.clone()));
            }
        }
        for contract in &unit.contracts {
            self.visit_contract(contract);
        }
    }

    // -----------------------------------------------------------------------
    // Definitions
    // -----------------------------------------------------------------------

    fn visit_contract(&mut self, contract: &Contract) {
        tracing::debug!(
            contract = %contract.name,
            state_vars = contract.state_vars.len(),
            functions = contract.functions.len(),
            "visiting contract"
        );
        for var in &contract.state_vars {
            self.create_variable(var);
        }
        for function in &contract.functions {
            self.visit_function(function);
        }
        self.vars.clear();
        self.var_decls.clear();
    }

    fn visit_function(&mut self, function: &Function) {
        if function.is_constructor || function.has_modifiers {
            self.warn(
                function.loc,
                "Assertion checker does not yet support constructors and functions with modifiers.",
            );
        }
        self.function_path.push(function.id);
        tracing::debug!(
            function = %function.name,
            root = self.is_root_function(),
            "visiting function"
        );
        // Root functions start from arbitrary inbound transaction state;
        // inlined ones inherit the caller's context.
        if self.is_root_function() {
            self.solver.reset();
            self.path_conditions.clear();
            self.exprs.clear();
            self.globals.clear();
            self.uninterp.clear();
            self.reset_state_variables();
            self.initialize_local_variables(function);
            self.loop_execution_happened = false;
            self.array_assignment_happened = false;
        }
        if let Some(body) = &function.body {
            self.visit_stmt(body);
        }
        // Locals of inlined callees stay around for future calls; the root
        // drops every non-state variable on exit.
        if self.is_root_function() {
            self.remove_local_variables();
        }
        self.function_path.pop();
    }

    fn initialize_local_variables(&mut self, function: &Function) {
        for variable in function.local_variables() {
            if self.create_variable(variable) {
                self.set_zero(variable.id);
            }
        }
        for param in &function.params {
            if self.create_variable(param) {
                self.set_unknown(param.id);
            }
        }
        for ret_param in &function.returns {
            if self.create_variable(ret_param) {
                self.set_zero(ret_param.id);
            }
        }
    }

    fn initialize_function_call_parameters(&mut self, function: &Function, call_args: &[Term]) {
        assert_eq!(
            function.params.len(),
            call_args.len(),
            "argument count mismatch on inlined call"
        );
        for (param, arg) in function.params.iter().zip(call_args) {
            if self.create_variable(param) {
                let new_value = self.new_value(param.id);
                self.solver
                    .add_assertion(&Term::eq(arg.clone(), new_value));
                if matches!(param.ty, Ty::Mapping(..)) {
                    self.array_assignment_happened = true;
                }
            }
        }
        for variable in function.local_variables() {
            if self.create_variable(variable) {
                self.new_value(variable.id);
                self.set_zero(variable.id);
            }
        }
        for ret_param in &function.returns {
            if self.create_variable(ret_param) {
                self.new_value(ret_param.id);
                self.set_zero(ret_param.id);
            }
        }
    }

    fn remove_local_variables(&mut self) {
        let local_ids: Vec<NodeId> = self
            .var_decls
            .iter()
            .filter(|(_, decl)| !decl.is_state_variable())
            .map(|(id, _)| *id)
            .collect();
        for id in local_ids {
            self.vars.remove(&id);
            self.var_decls.remove(&id);
        }
    }

    fn reset_state_variables(&mut self) {
        let mut state_ids: Vec<NodeId> = self
            .var_decls
            .iter()
            .filter(|(_, decl)| decl.is_state_variable())
            .map(|(id, _)| *id)
            .collect();
        state_ids.sort();
        for id in state_ids {
            self.new_value(id);
            self.set_unknown(id);
        }
    }

    // -----------------------------------------------------------------------
    // Statements
    // -----------------------------------------------------------------------

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Block(stmts) => {
                for s in stmts {
                    self.visit_stmt(s);
                }
            }
            StmtKind::Expression(expr) => self.visit_expr(expr),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => self.visit_if(cond, then_branch, else_branch.as_deref()),
            StmtKind::While {
                cond,
                body,
                is_do_while,
            } => self.visit_while(stmt, cond, body, *is_do_while),
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => self.visit_for(init.as_deref(), cond.as_ref(), post.as_ref(), body),
            StmtKind::Return { expr } => self.visit_return(stmt, expr.as_ref()),
            StmtKind::VarDecl { decls, init } => self.visit_var_decl(stmt, decls, init.as_ref()),
        }
    }

    fn visit_if(&mut self, cond: &Expr, then_branch: &Stmt, else_branch: Option<&Stmt>) {
        self.visit_expr(cond);
        // Inlined callees have specific input values; the constantness of
        // their conditions says nothing about the source.
        if self.is_root_function() {
            self.check_boolean_not_constant(cond, "Condition is always $VALUE.");
        }
        let condition = self.expr_term(cond);

        let indices_end_true = self.visit_branch(then_branch, Some(&condition));
        let mut touched = usage::touched_variables(then_branch);
        let indices_end_false = match else_branch {
            Some(els) => {
                touched.extend(usage::touched_variables(els));
                self.visit_branch(els, Some(&Term::not(condition.clone())))
            }
            None => self.copy_variable_indices(),
        };

        self.merge_variables(&touched, &condition, &indices_end_true, &indices_end_false);
    }

    // One-shot loop abstraction. Branch 1 assumes the condition and runs the
    // body once over havocked variables; branch 2 skips the loop with
    // knowledge intact. Touched variables are merged over the condition.
    // Deliberately unsound as a proof (knowledge is dropped), sound as a bug
    // finder: a failure inside the symbolic iteration has a real witness.
    fn visit_while(&mut self, stmt: &Stmt, cond: &Expr, body: &Stmt, is_do_while: bool) {
        let indices_before = self.copy_variable_indices();
        let touched = usage::touched_variables(stmt);
        tracing::debug!(
            touched = touched.len(),
            do_while = is_do_while,
            "abstracting loop to one symbolic iteration"
        );
        self.reset_variables(&touched);

        let indices_after = if is_do_while {
            // The condition is evaluated after the body once; its
            // side-effects on the skip path are lost.
            let after = self.visit_branch(body, None);
            self.visit_expr(cond);
            if self.is_root_function() {
                self.check_boolean_not_constant(cond, "Do-while loop condition is always $VALUE.");
            }
            after
        } else {
            self.visit_expr(cond);
            if self.is_root_function() {
                self.check_boolean_not_constant(cond, "While loop condition is always $VALUE.");
            }
            let condition = self.expr_term(cond);
            self.visit_branch(body, Some(&condition))
        };

        self.reset_variable_indices(&indices_before);
        if !is_do_while {
            self.visit_expr(cond);
        }
        let condition = self.expr_term(cond);
        let indices_skip = self.copy_variable_indices();
        self.merge_variables(&touched, &condition, &indices_after, &indices_skip);

        self.loop_execution_happened = true;
    }

    fn visit_for(
        &mut self,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        post: Option<&Expr>,
        body: &Stmt,
    ) {
        // The init part runs exactly once, before any forgetting.
        if let Some(init) = init {
            self.visit_stmt(init);
        }

        let indices_before = self.copy_variable_indices();
        let mut touched = usage::touched_variables(body);
        if let Some(cond) = cond {
            touched.extend(usage::touched_in_expr(cond));
        }
        if let Some(post) = post {
            touched.extend(usage::touched_in_expr(post));
        }
        touched.sort();
        touched.dedup();
        tracing::debug!(
            touched = touched.len(),
            "abstracting for loop to one symbolic iteration"
        );
        self.reset_variables(&touched);

        if let Some(cond) = cond {
            self.visit_expr(cond);
            if self.is_root_function() {
                self.check_boolean_not_constant(cond, "For loop condition is always $VALUE.");
            }
        }

        let loop_condition = match cond {
            Some(cond) => self.expr_term(cond),
            None => Term::top(),
        };
        self.push_path_condition(loop_condition);
        self.visit_stmt(body);
        if let Some(post) = post {
            self.visit_expr(post);
        }
        self.pop_path_condition();

        let indices_after = self.copy_variable_indices();
        self.reset_variable_indices(&indices_before);
        if let Some(cond) = cond {
            self.visit_expr(cond);
        }
        let merge_condition = match cond {
            Some(cond) => self.expr_term(cond),
            None => Term::top(),
        };
        let indices_skip = self.copy_variable_indices();
        self.merge_variables(&touched, &merge_condition, &indices_after, &indices_skip);

        self.loop_execution_happened = true;
    }

    fn visit_return(&mut self, stmt: &Stmt, expr: Option<&Expr>) {
        let Some(expr) = expr else { return };
        self.visit_expr(expr);
        if !self.exprs.contains_key(&expr.id) {
            return;
        }
        let function = self
            .function_path
            .last()
            .and_then(|id| self.functions.get(id).cloned())
            .expect("return statement outside of a function");
        if function.returns.len() > 1 {
            self.warn(
                stmt.loc,
                "Assertion checker does not yet support more than one return value.",
            );
        } else if let [ret_param] = function.returns.as_slice() {
            let value = self.expr_term(expr);
            let new_value = self.new_value(ret_param.id);
            self.solver.add_assertion(&Term::eq(value, new_value));
        }
    }

    fn visit_var_decl(&mut self, stmt: &Stmt, decls: &[VarDecl], init: Option<&Expr>) {
        if let Some(init) = init {
            self.visit_expr(init);
        }
        if decls.len() != 1 {
            self.warn(
                stmt.loc,
                "Assertion checker does not yet support such variable declarations.",
            );
        } else if self.vars.contains_key(&decls[0].id) {
            if let Some(init) = init {
                let value = self.expr_term(init);
                self.assignment(decls[0].id, value, stmt.loc);
            }
        } else {
            self.warn(
                stmt.loc,
                "Assertion checker does not yet implement such variable declarations.",
            );
        }
    }

    /// Visit a statement under an optional extra path condition, snapshot
    /// its exiting SSA indices and roll the live indices back.
    fn visit_branch(&mut self, stmt: &Stmt, condition: Option<&Term>) -> VariableIndices {
        let indices_before = self.copy_variable_indices();
        if let Some(condition) = condition {
            self.push_path_condition(condition.clone());
        }
        self.visit_stmt(stmt);
        if condition.is_some() {
            self.pop_path_condition();
        }
        let indices_after = self.copy_variable_indices();
        self.reset_variable_indices(&indices_before);
        indices_after
    }

    // -----------------------------------------------------------------------
    // Expressions
    // -----------------------------------------------------------------------

    fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::BoolLit(value) => {
                self.define_expr(expr, Term::BoolLit(*value));
            }
            ExprKind::NumberLit(value) => {
                self.define_expr(expr, Term::IntLit(value.clone()));
            }
            ExprKind::StringLit(_) => {
                self.warn(
                    expr.loc,
                    format!(
                        "Assertion checker does not yet support the type of this literal ({}).",
                        expr.ty
                    ),
                );
            }
            ExprKind::Ident { name, decl } => self.visit_identifier(expr, name, *decl),
            ExprKind::Unary { op, operand } => self.visit_unary(expr, *op, operand),
            ExprKind::Binary {
                op,
                common_ty,
                lhs,
                rhs,
            } => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
                if op.is_arithmetic() {
                    self.arithmetic_operation(expr, *op, common_ty, lhs, rhs);
                } else if op.is_compare() {
                    self.compare_operation(expr, *op, common_ty, lhs, rhs);
                } else {
                    self.boolean_operation(expr, *op, common_ty, lhs, rhs);
                }
            }
            ExprKind::Assign { op, lhs, rhs } => self.visit_assignment(expr, *op, lhs, rhs),
            ExprKind::Index { base, index } => self.visit_index_access(expr, base, index),
            ExprKind::Member { base, .. } => self.visit_member_access(expr, base),
            ExprKind::Tuple {
                components,
                is_inline_array,
            } => {
                for component in components {
                    self.visit_expr(component);
                }
                if *is_inline_array
                    || components.len() != 1
                    || !components[0].ty.is_supported()
                {
                    self.warn(
                        expr.loc,
                        "Assertion checker does not yet implement tuples and inline arrays.",
                    );
                } else {
                    let value = self.expr_term(&components[0]);
                    self.define_expr(expr, value);
                }
            }
            ExprKind::Call { callee, args, kind } => {
                self.visit_expr(callee);
                for arg in args {
                    self.visit_expr(arg);
                }
                match kind {
                    CallKind::Assert => self.visit_assert(expr, args),
                    CallKind::Require => self.visit_require(args),
                    CallKind::GasLeft => self.visit_gas_left(expr),
                    CallKind::Internal { function, bound } => {
                        self.inline_function_call(expr, callee, args, *function, *bound)
                    }
                    CallKind::Abstract => self.abstract_function_call(expr, callee, args),
                    CallKind::TypeConversion => self.warn(
                        expr.loc,
                        "Assertion checker does not yet implement this expression.",
                    ),
                    CallKind::Other => self.warn(
                        expr.loc,
                        "Assertion checker does not yet implement this type of function call.",
                    ),
                }
            }
        }
    }

    fn visit_identifier(&mut self, expr: &Expr, name: &str, decl: Option<NodeId>) {
        if matches!(expr.ty, Ty::Function { .. }) {
            self.visit_function_identifier(expr, name);
        } else if expr.ty.is_supported() {
            if let Some(decl_id) = decl {
                let value = self.current_value(decl_id);
                self.define_expr(expr, value);
            } else if name == "now" {
                self.define_global_variable("now", expr, false);
            } else {
                self.warn(
                    expr.loc,
                    "Assertion checker does not yet support the type of this variable.",
                );
            }
        }
        // Unsupported types stay unencoded; a later read falls back to a
        // fresh unknown through `expr_term`.
    }

    fn visit_function_identifier(&mut self, expr: &Expr, name: &str) {
        if let Ty::Function { returns, .. } = &expr.ty {
            if returns.len() > 1 {
                self.warn(
                    expr.loc,
                    "Assertion checker does not yet support functions with more than one \
                     return parameter.",
                );
            }
        }
        let symbol = function_symbol_name(name, &expr.ty);
        self.define_global_function(&symbol, expr);
    }

    fn visit_unary(&mut self, expr: &Expr, op: UnOp, operand: &Expr) {
        match op {
            UnOp::Not => {
                self.visit_expr(operand);
                let value = self.expr_term(operand);
                self.define_expr(expr, Term::not(value));
            }
            UnOp::Neg => {
                self.visit_expr(operand);
                let value = self.expr_term(operand);
                self.define_expr(expr, Term::sub(Term::int(0), value));
                if expr.ty.is_integer() {
                    let result = self.expr_term(expr);
                    let ty = expr.ty.clone();
                    self.check_under_overflow(&result, &ty, expr.loc);
                }
            }
            UnOp::PreInc | UnOp::PostInc | UnOp::PreDec | UnOp::PostDec => {
                if let ExprKind::Ident { decl, .. } = &operand.kind {
                    let known = decl.filter(|id| self.vars.contains_key(id));
                    match known {
                        Some(decl_id) => {
                            let inner_value = self.current_value(decl_id);
                            let new_value = if op.is_increment() {
                                Term::add(inner_value.clone(), Term::int(1))
                            } else {
                                Term::sub(inner_value.clone(), Term::int(1))
                            };
                            self.assignment(decl_id, new_value.clone(), expr.loc);
                            let result = if op.is_prefix() { new_value } else { inner_value };
                            self.define_expr(expr, result);
                        }
                        None => self.warn(
                            expr.loc,
                            "Assertion checker does not yet implement such assignments.",
                        ),
                    }
                } else {
                    self.visit_expr(operand);
                    self.warn(
                        expr.loc,
                        "Assertion checker does not yet implement such increments / decrements.",
                    );
                }
            }
        }
    }

    fn arithmetic_operation(
        &mut self,
        expr: &Expr,
        op: BinOp,
        common_ty: &Ty,
        lhs: &Expr,
        rhs: &Expr,
    ) {
        if !common_ty.is_integer() {
            self.warn(
                expr.loc,
                "Assertion checker does not yet implement this operator on non-integer types.",
            );
            return;
        }
        let left = self.expr_term(lhs);
        let right = self.expr_term(rhs);
        let value = match op {
            BinOp::Add => Term::add(left, right.clone()),
            BinOp::Sub => Term::sub(left, right.clone()),
            BinOp::Mul => Term::mul(left, right.clone()),
            BinOp::Div => division(left, right.clone(), common_ty),
            _ => unreachable!("non-arithmetic operator {op:?}"),
        };

        if op == BinOp::Div {
            self.check_condition(
                Term::eq(right.clone(), Term::int(0)),
                expr.loc,
                "Division by zero",
                Some("<result>"),
                Some(right.clone()),
            );
            // The continuation only exists when the division succeeded.
            self.solver
                .add_assertion(&Term::distinct(right, Term::int(0)));
        }

        self.check_under_overflow(&value, common_ty, expr.loc);
        self.define_expr(expr, value);
    }

    fn compare_operation(&mut self, expr: &Expr, op: BinOp, common_ty: &Ty, lhs: &Expr, rhs: &Expr) {
        if !common_ty.is_supported() {
            self.warn(
                expr.loc,
                format!(
                    "Assertion checker does not yet implement the type {common_ty} for comparisons"
                ),
            );
            return;
        }
        let left = self.expr_term(lhs);
        let right = self.expr_term(rhs);
        let value = if common_ty.is_integer() || *common_ty == Ty::Address {
            match op {
                BinOp::Eq => Term::eq(left, right),
                BinOp::Neq => Term::distinct(left, right),
                BinOp::Lt => Term::lt(left, right),
                BinOp::Le => Term::le(left, right),
                BinOp::Gt => Term::gt(left, right),
                BinOp::Ge => Term::ge(left, right),
                _ => unreachable!("non-compare operator {op:?}"),
            }
        } else {
            assert!(
                matches!(common_ty, Ty::Bool),
                "comparison not yet supported on type {common_ty}"
            );
            match op {
                BinOp::Eq => Term::eq(left, right),
                BinOp::Neq => Term::distinct(left, right),
                _ => panic!("ordering comparison on booleans"),
            }
        };
        self.define_expr(expr, value);
    }

    fn boolean_operation(&mut self, expr: &Expr, op: BinOp, common_ty: &Ty, lhs: &Expr, rhs: &Expr) {
        if !matches!(common_ty, Ty::Bool) {
            self.warn(
                expr.loc,
                format!(
                    "Assertion checker does not yet implement the type {common_ty} for boolean \
                     operations"
                ),
            );
            return;
        }
        // Both sides are encoded unconditionally; there is no short-circuit
        // at the formula level.
        let left = self.expr_term(lhs);
        let right = self.expr_term(rhs);
        let value = match op {
            BinOp::And => Term::and(left, right),
            BinOp::Or => Term::or(left, right),
            _ => unreachable!("non-boolean operator {op:?}"),
        };
        self.define_expr(expr, value);
    }

    fn visit_assignment(&mut self, expr: &Expr, op: AssignOp, lhs: &Expr, rhs: &Expr) {
        // An identifier l-value is translated by this node, not on its own.
        if !matches!(lhs.kind, ExprKind::Ident { .. }) {
            self.visit_expr(lhs);
        }
        self.visit_expr(rhs);

        if op != AssignOp::Assign {
            self.warn(
                expr.loc,
                "Assertion checker does not yet implement compound assignment.",
            );
        } else if !expr.ty.is_supported() {
            self.warn(
                expr.loc,
                format!("Assertion checker does not yet implement type {}", expr.ty),
            );
        } else if let ExprKind::Ident { decl, .. } = &lhs.kind {
            let decl_id = decl.expect("assignment to unresolved identifier");
            let value = self.expr_term(rhs);
            self.assignment(decl_id, value.clone(), expr.loc);
            self.define_expr(expr, value);
        } else if matches!(lhs.kind, ExprKind::Index { .. }) {
            let value = self.expr_term(rhs);
            self.array_index_assignment(expr, lhs, value.clone());
            self.define_expr(expr, value);
        } else {
            self.warn(
                expr.loc,
                "Assertion checker does not yet implement such assignments.",
            );
        }
    }

    fn visit_index_access(&mut self, expr: &Expr, base: &Expr, index: &Expr) {
        self.visit_expr(base);
        self.visit_expr(index);

        let array = match &base.kind {
            ExprKind::Ident {
                decl: Some(decl_id),
                ..
            } => self.current_value(*decl_id),
            ExprKind::Index { .. } => {
                assert!(
                    self.exprs.contains_key(&base.id),
                    "inner index access was not encoded"
                );
                self.exprs[&base.id].current_value()
            }
            _ => {
                self.warn(
                    expr.loc,
                    "Assertion checker does not yet implement this expression.",
                );
                return;
            }
        };

        let index_value = self.expr_term(index);
        self.define_expr(expr, Term::select(array, index_value));
        set_unknown_value(&self.exprs[&expr.id], self.solver.as_mut());
        self.record_uninterpreted(expr);
    }

    fn visit_member_access(&mut self, expr: &Expr, base: &Expr) {
        // Function-typed members are translated at the call site; only the
        // receiver needs encoding here.
        if matches!(expr.ty, Ty::Function { .. }) {
            self.visit_expr(base);
            return;
        }
        if matches!(base.ty, Ty::Magic) {
            if let ExprKind::Ident { name, .. } = &base.kind {
                let member = match &expr.kind {
                    ExprKind::Member { member, .. } => member.clone(),
                    _ => unreachable!(),
                };
                let global_name = format!("{name}.{member}");
                self.define_global_variable(&global_name, expr, false);
            } else {
                self.warn(
                    expr.loc,
                    "Assertion checker does not yet support this expression.",
                );
            }
        } else {
            self.warn(
                expr.loc,
                "Assertion checker does not yet support this expression.",
            );
            self.visit_expr(base);
        }
    }

    // -----------------------------------------------------------------------
    // Function calls
    // -----------------------------------------------------------------------

    fn visit_assert(&mut self, call: &Expr, args: &[Expr]) {
        assert!(args.len() == 1, "assert takes exactly one argument");
        assert!(
            matches!(args[0].ty, Ty::Bool),
            "assert argument must be boolean"
        );
        let condition = self.expr_term(&args[0]);
        self.check_condition(
            Term::not(condition.clone()),
            call.loc,
            "Assertion violation",
            None,
            None,
        );
        // Later code may rely on the asserted condition.
        self.add_path_implied_expression(&condition);
    }

    fn visit_require(&mut self, args: &[Expr]) {
        assert!(args.len() == 1, "require takes exactly one argument");
        assert!(
            matches!(args[0].ty, Ty::Bool),
            "require argument must be boolean"
        );
        if self.is_root_function() {
            self.check_boolean_not_constant(&args[0], "Condition is always $VALUE.");
        }
        // require restricts feasible futures without claiming the condition
        // always holds, hence the implication instead of a goal.
        let condition = self.expr_term(&args[0]);
        self.add_path_implied_expression(&condition);
    }

    fn visit_gas_left(&mut self, call: &Expr) {
        let name = "gasleft()";
        // Every call returns a fresh value, so the index is bumped.
        self.define_global_variable(name, call, true);
        let var = &self.globals[name];
        let index = var.index();
        set_unknown_value(var, self.solver.as_mut());
        // Gas is monotonically non-increasing within a transaction.
        if index > 0 {
            let var = &self.globals[name];
            self.solver.add_assertion(&Term::le(
                var.current_value(),
                var.value_at_index(index - 1),
            ));
        }
    }

    fn inline_function_call(
        &mut self,
        call: &Expr,
        callee: &Expr,
        args: &[Expr],
        function_id: NodeId,
        bound: bool,
    ) {
        let Some(function) = self.functions.get(&function_id).cloned() else {
            self.warn(
                call.loc,
                "Assertion checker does not yet implement this type of function call.",
            );
            return;
        };

        if self.function_path.contains(&function_id) {
            self.reporter.warning(
                Some(call.loc),
                "Assertion checker does not support recursive function calls.".to_string(),
                vec![SecondaryNote::new(
                    "Starting from function:",
                    Some(function.loc),
                )],
            );
        } else if function.is_implemented() {
            tracing::debug!(
                function = %function.name,
                bound,
                "inlining internal call"
            );
            let mut fun_args = Vec::new();
            if bound {
                let ExprKind::Member { base, .. } = &callee.kind else {
                    panic!("bound call without a member callee");
                };
                fun_args.push(self.expr_term(base));
            }
            for arg in args {
                fun_args.push(self.expr_term(arg));
            }
            self.initialize_function_call_parameters(&function, &fun_args);
            self.visit_function(&function);
            if !function.returns.is_empty() {
                if function.returns.len() > 1 {
                    self.warn(
                        call.loc,
                        "Assertion checker does not yet support calls to functions that return \
                         more than one value.",
                    );
                } else {
                    let value = self.current_value(function.returns[0].id);
                    self.define_expr(call, value);
                }
            }
        } else {
            self.warn(
                call.loc,
                "Assertion checker does not support calls to functions without implementation.",
            );
        }
    }

    fn abstract_function_call(&mut self, call: &Expr, callee: &Expr, args: &[Expr]) {
        let mut smt_args = Vec::new();
        for arg in args {
            smt_args.push(self.expr_term(arg));
        }
        let symbol = match &callee.kind {
            ExprKind::Ident { name, .. } if matches!(callee.ty, Ty::Function { .. }) => {
                function_symbol_name(name, &callee.ty)
            }
            _ => {
                self.warn(
                    call.loc,
                    "Assertion checker does not yet implement this type of function call.",
                );
                return;
            }
        };
        // The uninterpreted function is keyed by callee identity, so
        // identical arguments yield identical results.
        let application = self
            .globals
            .get(&symbol)
            .expect("abstract callee was not registered")
            .apply(smt_args);
        self.define_expr(call, application);
        self.record_uninterpreted(call);
        let result = self.exprs[&call.id].current_value();
        set_unknown_term(&result, &call.ty, self.solver.as_mut());
    }

    // -----------------------------------------------------------------------
    // Verification goals
    // -----------------------------------------------------------------------

    fn check_under_overflow(&mut self, value: &Term, ty: &Ty, loc: Loc) {
        let (min, max) = ty
            .int_bounds()
            .expect("overflow check on a type without bounds");
        self.check_condition(
            Term::lt(value.clone(), Term::IntLit(min.clone())),
            loc,
            &format!(
                "Underflow (resulting value less than {})",
                format_number_readable(&min)
            ),
            Some("<result>"),
            Some(value.clone()),
        );
        self.check_condition(
            Term::gt(value.clone(), Term::IntLit(max.clone())),
            loc,
            &format!(
                "Overflow (resulting value larger than {})",
                format_number_readable(&max)
            ),
            Some("<result>"),
            Some(value.clone()),
        );
    }

    /// Check whether `condition` is reachable under the current path and
    /// report it with a counter-example when it is.
    fn check_condition(
        &mut self,
        condition: Term,
        loc: Loc,
        description: &str,
        additional_name: Option<&str>,
        additional_value: Option<Term>,
    ) {
        self.solver.push();
        let guarded = Term::and(self.current_path_conditions(), condition);
        self.solver.add_assertion(&guarded);

        let mut terms: Vec<Term> = Vec::new();
        let mut names: Vec<String> = Vec::new();
        if !self.function_path.is_empty() {
            if let (Some(name), Some(value)) = (additional_name, additional_value.as_ref()) {
                terms.push(value.clone());
                names.push(name.to_string());
            }
            let mut var_ids: Vec<NodeId> = self.vars.keys().copied().collect();
            var_ids.sort();
            for id in var_ids {
                let decl = &self.var_decls[&id];
                if decl.ty.is_value_type() {
                    terms.push(self.vars[&id].current_value());
                    names.push(decl.name.clone());
                }
            }
            let mut global_names: Vec<String> = self.globals.keys().cloned().collect();
            global_names.sort();
            for name in global_names {
                let var = &self.globals[&name];
                if var.ty().is_value_type() && !var.sort().is_function() {
                    terms.push(var.current_value());
                    names.push(name);
                }
            }
            for entry in &self.uninterp {
                if entry.ty.is_value_type() {
                    terms.push(self.exprs[&entry.id].current_value());
                    names.push(self.source.text_at(entry.loc).to_string());
                }
            }
        }

        let (result, values) = self.check_satisfiable_and_generate_model(&terms);
        tracing::debug!(goal = description, result = ?result, "goal checked");

        let mut hint_text = String::new();
        if self.loop_execution_happened {
            hint_text.push_str(LOOP_HINT);
        }
        if self.array_assignment_happened {
            hint_text.push_str(MAPPING_HINT);
        }
        let hints = |text: &str| -> Vec<SecondaryNote> {
            if text.is_empty() {
                Vec::new()
            } else {
                vec![SecondaryNote::new(text, None)]
            }
        };

        match result {
            CheckResult::Satisfiable => {
                let mut message = format!("{description} happens here");
                if !self.function_path.is_empty() {
                    // Rows whose value echoes the solver name are noise.
                    let mut model: BTreeMap<String, String> = BTreeMap::new();
                    for ((term, name), value) in terms.iter().zip(&names).zip(&values) {
                        if term.head_name() != *value {
                            model.insert(name.clone(), value.clone());
                        }
                    }
                    let mut model_message = String::from("  for:\n");
                    for (name, value) in &model {
                        model_message.push_str(&format!("  {name} = {value}\n"));
                    }
                    let mut secondary = vec![SecondaryNote::new(model_message, None)];
                    secondary.extend(hints(&hint_text));
                    self.reporter.warning(Some(loc), message, secondary);
                } else {
                    message.push('.');
                    self.reporter.warning(Some(loc), message, hints(&hint_text));
                }
            }
            CheckResult::Unsatisfiable => {}
            CheckResult::Unknown => {
                self.reporter.warning(
                    Some(loc),
                    format!("{description} might happen here."),
                    hints(&hint_text),
                );
            }
            CheckResult::Conflicting => {
                self.reporter
                    .warning(Some(loc), CONFLICTING_ANSWERS.to_string(), Vec::new());
            }
            CheckResult::Error => {
                self.reporter
                    .warning(Some(loc), SOLVER_ERROR.to_string(), Vec::new());
            }
        }
        self.solver.pop();
    }

    /// Report when a boolean condition cannot vary: always true, always
    /// false, or sitting on an unreachable path.
    fn check_boolean_not_constant(&mut self, cond: &Expr, description: &str) {
        // Literal conditions are constant by definition; no report.
        if matches!(
            cond.kind,
            ExprKind::BoolLit(_) | ExprKind::NumberLit(_) | ExprKind::StringLit(_)
        ) {
            return;
        }

        let condition = self.expr_term(cond);

        self.solver.push();
        self.solver.add_assertion(&Term::and(
            self.current_path_conditions(),
            condition.clone(),
        ));
        let positive = self.check_satisfiable();
        self.solver.pop();

        self.solver.push();
        self.solver.add_assertion(&Term::and(
            self.current_path_conditions(),
            Term::not(condition),
        ));
        let negated = self.check_satisfiable();
        self.solver.pop();
        tracing::trace!(?positive, ?negated, "condition constantness probed");

        use CheckResult::*;
        if positive == Error || negated == Error {
            self.warn(cond.loc, SOLVER_ERROR);
        } else if positive == Conflicting || negated == Conflicting {
            self.warn(cond.loc, CONFLICTING_ANSWERS);
        } else if positive == Satisfiable && negated == Satisfiable {
            // The condition is genuinely variable.
        } else if positive == Unknown || negated == Unknown {
            // Nothing can be concluded.
        } else if positive == Unsatisfiable && negated == Unsatisfiable {
            self.warn(cond.loc, "Condition unreachable.");
        } else {
            let value = if positive == Satisfiable { "true" } else { "false" };
            self.warn(cond.loc, description.replace("$VALUE", value));
        }
    }

    fn check_satisfiable(&mut self) -> CheckResult {
        self.check_satisfiable_and_generate_model(&[]).0
    }

    fn check_satisfiable_and_generate_model(
        &mut self,
        expressions: &[Term],
    ) -> (CheckResult, Vec<String>) {
        let (result, mut values) = self.solver.check(expressions);
        for value in &mut values {
            *value = humanize_model_value(value);
        }
        (result, values)
    }

    // -----------------------------------------------------------------------
    // Assignment protocol
    // -----------------------------------------------------------------------

    fn assignment(&mut self, decl_id: NodeId, value: Term, loc: Loc) {
        let ty = self
            .var_decls
            .get(&decl_id)
            .unwrap_or_else(|| panic!("assignment to unknown variable {decl_id:?}"))
            .ty
            .clone();
        if matches!(ty, Ty::Int(_) | Ty::Uint(_) | Ty::Address) {
            self.check_under_overflow(&value, &ty, loc);
        } else if matches!(ty, Ty::Mapping(..)) {
            self.array_assignment();
        }
        let new_value = self.new_value(decl_id);
        self.solver.add_assertion(&Term::eq(new_value, value));
    }

    // Mapping aliases are not tracked; rebinding any mapping variable
    // invalidates all mapping knowledge.
    fn array_assignment(&mut self) {
        self.array_assignment_happened = true;
        let mut mapping_ids: Vec<NodeId> = self
            .vars
            .iter()
            .filter(|(_, var)| matches!(var.ty(), Ty::Mapping(..)))
            .map(|(id, _)| *id)
            .collect();
        mapping_ids.sort();
        for id in mapping_ids {
            self.new_value(id);
        }
    }

    fn array_index_assignment(&mut self, assign: &Expr, lhs: &Expr, value: Term) {
        let ExprKind::Index { base, index } = &lhs.kind else {
            unreachable!("index assignment without an index l-value")
        };
        match &base.kind {
            ExprKind::Ident {
                decl: Some(decl_id),
                ..
            } => {
                let store = Term::store(
                    self.current_value(*decl_id),
                    self.expr_term(index),
                    value,
                );
                let new_value = self.new_value(*decl_id);
                self.solver.add_assertion(&Term::eq(new_value, store));
            }
            ExprKind::Index { .. } => self.warn(
                lhs.loc,
                "Assertion checker does not yet implement assignments to multi-dimensional \
                 mappings or arrays.",
            ),
            _ => self.warn(
                assign.loc,
                "Assertion checker does not yet implement this expression.",
            ),
        }
    }

    // -----------------------------------------------------------------------
    // Symbol table plumbing
    // -----------------------------------------------------------------------

    /// Create the symbolic variable for a declaration if not yet known.
    /// Returns whether the declared type is modelled.
    fn create_variable(&mut self, decl: &VarDecl) -> bool {
        // Multiple calls to the same function reuse its variables.
        if self.vars.contains_key(&decl.id) {
            return true;
        }
        let unique_name = format!("{}_{}", decl.name, decl.id.0);
        let (unsupported, var) =
            new_symbolic_variable(&decl.ty, unique_name, self.solver.as_mut());
        self.vars.insert(decl.id, var);
        self.var_decls.insert(decl.id, decl.clone());
        if unsupported {
            self.warn(
                decl.loc,
                "Assertion checker does not yet support the type of this variable.",
            );
            return false;
        }
        true
    }

    fn current_value(&self, decl_id: NodeId) -> Term {
        self.vars
            .get(&decl_id)
            .unwrap_or_else(|| panic!("unknown variable {decl_id:?}"))
            .current_value()
    }

    fn new_value(&mut self, decl_id: NodeId) -> Term {
        let var = self
            .vars
            .get_mut(&decl_id)
            .unwrap_or_else(|| panic!("unknown variable {decl_id:?}"));
        var.increase_index(self.solver.as_mut())
    }

    fn set_zero(&mut self, decl_id: NodeId) {
        set_zero_value(&self.vars[&decl_id], self.solver.as_mut());
    }

    fn set_unknown(&mut self, decl_id: NodeId) {
        set_unknown_value(&self.vars[&decl_id], self.solver.as_mut());
    }

    /// Havoc: new index plus only the sort bounds.
    fn reset_variables(&mut self, touched: &[NodeId]) {
        let unique: BTreeSet<NodeId> = touched.iter().copied().collect();
        for id in unique {
            self.new_value(id);
            self.set_unknown(id);
        }
    }

    /// Reunify two SSA index views of every touched variable under a branch
    /// condition.
    fn merge_variables(
        &mut self,
        touched: &[NodeId],
        condition: &Term,
        indices_end_true: &VariableIndices,
        indices_end_false: &VariableIndices,
    ) {
        let unique: BTreeSet<NodeId> = touched.iter().copied().collect();
        for id in unique {
            let true_index = *indices_end_true
                .get(&id)
                .unwrap_or_else(|| panic!("touched variable {id:?} missing from true snapshot"));
            let false_index = *indices_end_false
                .get(&id)
                .unwrap_or_else(|| panic!("touched variable {id:?} missing from false snapshot"));
            // Touched but never actually reassigned (an unsupported
            // construct): both views agree, nothing to merge.
            if true_index == false_index {
                continue;
            }
            let merged = Term::ite(
                condition.clone(),
                self.vars[&id].value_at_index(true_index),
                self.vars[&id].value_at_index(false_index),
            );
            let new_value = self.new_value(id);
            self.solver.add_assertion(&Term::eq(new_value, merged));
        }
    }

    fn copy_variable_indices(&self) -> VariableIndices {
        self.vars.iter().map(|(id, var)| (*id, var.index())).collect()
    }

    fn reset_variable_indices(&mut self, indices: &VariableIndices) {
        for (id, index) in indices {
            self.vars
                .get_mut(id)
                .expect("snapshot refers to a removed variable")
                .set_index(*index);
        }
    }

    // -----------------------------------------------------------------------
    // Expression symbols
    // -----------------------------------------------------------------------

    /// The solver term of an encoded expression. Reading an expression the
    /// traversal never defined is an internal fault; a fresh unknown keeps
    /// the analysis going.
    fn expr_term(&mut self, expr: &Expr) -> Term {
        if !self.exprs.contains_key(&expr.id) {
            self.warn(
                expr.loc,
                "Internal error: Expression undefined for SMT solver.",
            );
            self.create_expr(expr);
        }
        self.exprs[&expr.id].current_value()
    }

    fn create_expr(&mut self, expr: &Expr) {
        if let Some(var) = self.exprs.get_mut(&expr.id) {
            // A re-visit bumps the index so the old value term is not lost.
            var.increase_index(self.solver.as_mut());
            return;
        }
        let (unsupported, var) = new_symbolic_variable(
            &expr.ty,
            format!("expr_{}", expr.id.0),
            self.solver.as_mut(),
        );
        self.exprs.insert(expr.id, var);
        if unsupported {
            self.warn(
                expr.loc,
                "Assertion checker does not yet implement this type.",
            );
        }
    }

    fn define_expr(&mut self, expr: &Expr, value: Term) {
        self.create_expr(expr);
        assert!(
            expr.ty.is_supported(),
            "equality applied to unsupported type {}",
            expr.ty
        );
        let term = self.exprs[&expr.id].current_value();
        self.solver.add_assertion(&Term::eq(term, value));
    }

    fn record_uninterpreted(&mut self, expr: &Expr) {
        if !self.uninterp.iter().any(|entry| entry.id == expr.id) {
            self.uninterp.push(UninterpretedTerm {
                id: expr.id,
                loc: expr.loc,
                ty: expr.ty.clone(),
            });
        }
    }

    fn define_global_variable(&mut self, name: &str, expr: &Expr, increase_index: bool) {
        if !self.globals.contains_key(name) {
            let (unsupported, var) =
                new_symbolic_variable(&expr.ty, name.to_string(), self.solver.as_mut());
            set_unknown_value(&var, self.solver.as_mut());
            self.globals.insert(name.to_string(), var);
            if unsupported {
                self.warn(
                    expr.loc,
                    "Assertion checker does not yet support this global variable.",
                );
            }
        } else if increase_index {
            let var = self.globals.get_mut(name).expect("checked above");
            var.increase_index(self.solver.as_mut());
        }
        // Most global values stay fixed within a transaction; the index is
        // only bumped on explicit request.
        if expr.ty.is_supported() {
            let value = self.globals[name].current_value();
            self.define_expr(expr, value);
        }
    }

    fn define_global_function(&mut self, name: &str, expr: &Expr) {
        if !self.globals.contains_key(name) {
            let (unsupported, var) =
                new_symbolic_variable(&expr.ty, name.to_string(), self.solver.as_mut());
            self.globals.insert(name.to_string(), var);
            if unsupported {
                self.warn(
                    expr.loc,
                    "Assertion checker does not yet support the type of this function.",
                );
            }
        }
    }

    // -----------------------------------------------------------------------
    // Path conditions
    // -----------------------------------------------------------------------

    fn push_path_condition(&mut self, condition: Term) {
        let conjoined = Term::and(self.current_path_conditions(), condition);
        self.path_conditions.push(conjoined);
    }

    fn pop_path_condition(&mut self) {
        assert!(
            !self.path_conditions.is_empty(),
            "cannot pop path condition, stack is empty"
        );
        self.path_conditions.pop();
    }

    fn current_path_conditions(&self) -> Term {
        self.path_conditions.last().cloned().unwrap_or_else(Term::top)
    }

    fn add_path_implied_expression(&mut self, expression: &Term) {
        self.solver.add_assertion(&Term::implies(
            self.current_path_conditions(),
            expression.clone(),
        ));
    }

    fn is_root_function(&self) -> bool {
        self.function_path.len() == 1
    }

    fn warn(&mut self, loc: Loc, message: impl Into<String>) {
        self.reporter
            .warning(Some(loc), message.into(), Vec::new());
    }
}

/// Stable solver symbol for a function identifier, keyed by name and
/// signature.
fn function_symbol_name(name: &str, ty: &Ty) -> String {
    format!("{}_{}", name, ty.rich_identifier())
}

/// Division that rounds toward zero, as the Source defines it.
///
/// SMT-LIB integer division rounds toward negative infinity, so signed
/// division is case-split on the operand signs; unsigned division maps to
/// the raw operator.
fn division(left: Term, right: Term, ty: &Ty) -> Term {
    let neg = |t: Term| Term::sub(Term::int(0), t);
    if matches!(ty, Ty::Int(_)) {
        Term::ite(
            Term::ge(left.clone(), Term::int(0)),
            Term::ite(
                Term::ge(right.clone(), Term::int(0)),
                Term::div(left.clone(), right.clone()),
                neg(Term::div(left.clone(), neg(right.clone()))),
            ),
            Term::ite(
                Term::ge(right.clone(), Term::int(0)),
                neg(Term::div(neg(left.clone()), right.clone())),
                Term::div(neg(left), neg(right)),
            ),
        )
    } else {
        Term::div(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder::AstBuilder;
    use crate::reporter::CollectingReporter;
    use veract_solver::NullSolver;

    fn analyze_with_null_solver(unit: &SourceUnit) -> CollectingReporter {
        let mut reporter = CollectingReporter::new();
        let source = SourceCache::default();
        let mut checker =
            Checker::with_solver(Box::new(NullSolver::new()), &mut reporter, &source);
        checker.analyze(unit);
        reporter
    }

    #[test]
    fn disabled_unit_is_skipped() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        let xi = b.ident(&x);
        let zero = b.num(0, Ty::Uint(256));
        let cond = b.binary(BinOp::Gt, Ty::Uint(256), xi, zero);
        let assert_c = b.assert_call(cond);
        let s = b.expr_stmt(assert_c);
        let body = b.block(vec![s]);
        let f = b.function("f", vec![x], vec![], body);
        let c = b.contract("C", vec![], vec![f]);
        let mut unit = b.unit(vec![c]);
        unit.smt_checker_enabled = false;

        let reporter = analyze_with_null_solver(&unit);
        assert!(reporter.is_empty());
    }

    #[test]
    fn unknown_answer_reports_might_happen() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        let xi = b.ident(&x);
        let zero = b.num(0, Ty::Uint(256));
        let cond = b.binary(BinOp::Gt, Ty::Uint(256), xi, zero);
        let assert_c = b.assert_call(cond);
        let s = b.expr_stmt(assert_c);
        let body = b.block(vec![s]);
        let f = b.function("f", vec![x], vec![], body);
        let c = b.contract("C", vec![], vec![f]);
        let unit = b.unit(vec![c]);

        let reporter = analyze_with_null_solver(&unit);
        assert_eq!(
            reporter.messages(),
            vec!["Assertion violation might happen here."]
        );
    }

    #[test]
    fn compound_assignment_is_unsupported() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        let lhs = b.ident(&x);
        let one = b.num(1, Ty::Uint(256));
        let assign = b.assign_op(AssignOp::AddAssign, lhs, one);
        let s = b.expr_stmt(assign);
        let body = b.block(vec![s]);
        let f = b.function("f", vec![x], vec![], body);
        let c = b.contract("C", vec![], vec![f]);
        let unit = b.unit(vec![c]);

        let reporter = analyze_with_null_solver(&unit);
        assert_eq!(
            reporter.messages(),
            vec!["Assertion checker does not yet implement compound assignment."]
        );
    }

    #[test]
    fn multi_declarator_statement_is_unsupported() {
        let mut b = AstBuilder::new();
        let y = b.local("y", Ty::Uint(256));
        let z = b.local("z", Ty::Uint(256));
        let stmt = b.multi_decl_stmt(vec![y, z], None);
        let body = b.block(vec![stmt]);
        let f = b.function("f", vec![], vec![], body);
        let c = b.contract("C", vec![], vec![f]);
        let unit = b.unit(vec![c]);

        let reporter = analyze_with_null_solver(&unit);
        assert_eq!(
            reporter.messages(),
            vec!["Assertion checker does not yet support such variable declarations."]
        );
    }

    #[test]
    fn constructor_is_unsupported_but_visited() {
        let mut b = AstBuilder::new();
        let body = b.block(vec![]);
        let mut f = b.function("C", vec![], vec![], body);
        f.is_constructor = true;
        let c = b.contract("C", vec![], vec![f]);
        let unit = b.unit(vec![c]);

        let reporter = analyze_with_null_solver(&unit);
        assert_eq!(
            reporter.messages(),
            vec![
                "Assertion checker does not yet support constructors and functions with modifiers."
            ]
        );
    }

    #[test]
    fn inline_array_is_unsupported() {
        let mut b = AstBuilder::new();
        let one = b.num(1, Ty::Uint(256));
        let two = b.num(2, Ty::Uint(256));
        let arr = b.inline_array(vec![one, two]);
        let s = b.expr_stmt(arr);
        let body = b.block(vec![s]);
        let f = b.function("f", vec![], vec![], body);
        let c = b.contract("C", vec![], vec![f]);
        let unit = b.unit(vec![c]);

        let reporter = analyze_with_null_solver(&unit);
        assert_eq!(
            reporter.messages(),
            vec!["Assertion checker does not yet implement tuples and inline arrays."]
        );
    }

    #[test]
    fn single_element_tuple_passes_through() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        let xi = b.ident(&x);
        let tup = b.tuple(vec![xi]);
        let zero = b.num(0, Ty::Uint(256));
        let cond = b.binary(BinOp::Ge, Ty::Uint(256), tup, zero);
        let req = b.require_call(cond);
        let s = b.expr_stmt(req);
        let body = b.block(vec![s]);
        let f = b.function("f", vec![x], vec![], body);
        let c = b.contract("C", vec![], vec![f]);
        let unit = b.unit(vec![c]);

        let reporter = analyze_with_null_solver(&unit);
        // require emits no goal; with an unknown-answering solver the
        // tautology check is silent too.
        assert!(reporter.is_empty(), "{:?}", reporter.messages());
    }

    #[test]
    fn recursive_call_is_unsupported() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        // Build `function f(uint x) { f(x); }`: the call site names f's own
        // id, assigned to the function node after the body is assembled.
        let xi = b.ident(&x);
        let callee = b.free_ident(
            "f",
            Ty::Function {
                params: vec![Ty::Uint(256)],
                returns: vec![],
            },
        );
        let call = b.call(
            callee,
            vec![xi],
            CallKind::Internal {
                function: NodeId(9999),
                bound: false,
            },
            Ty::Other("tuple".to_string()),
        );
        let s = b.expr_stmt(call);
        let body = b.block(vec![s]);
        let mut f = b.function("f", vec![x], vec![], body);
        f.id = NodeId(9999);
        let c = b.contract("C", vec![], vec![f]);
        let unit = b.unit(vec![c]);

        let reporter = analyze_with_null_solver(&unit);
        assert_eq!(
            reporter.messages(),
            vec!["Assertion checker does not support recursive function calls."]
        );
        assert_eq!(reporter.warnings()[0].secondary[0].message, "Starting from function:");
    }

    #[test]
    fn call_to_unimplemented_function_is_unsupported() {
        let mut b = AstBuilder::new();
        let g = b.unimplemented_function("g", vec![], vec![]);
        let call = b.internal_call(&g, vec![]);
        let s = b.expr_stmt(call);
        let body = b.block(vec![s]);
        let f = b.function("f", vec![], vec![], body);
        let c = b.contract("C", vec![], vec![g, f]);
        let unit = b.unit(vec![c]);

        let reporter = analyze_with_null_solver(&unit);
        assert_eq!(
            reporter.messages(),
            vec!["Assertion checker does not support calls to functions without implementation."]
        );
    }

    #[test]
    fn string_literal_is_unsupported() {
        let mut b = AstBuilder::new();
        let lit = b.string_lit("hello");
        let s = b.expr_stmt(lit);
        let body = b.block(vec![s]);
        let f = b.function("f", vec![], vec![], body);
        let c = b.contract("C", vec![], vec![f]);
        let unit = b.unit(vec![c]);

        let reporter = analyze_with_null_solver(&unit);
        assert_eq!(
            reporter.messages(),
            vec!["Assertion checker does not yet support the type of this literal (string)."]
        );
    }

    #[test]
    fn unsupported_variable_type_warns_once() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Other("bytes".to_string()));
        let body = b.block(vec![]);
        let f = b.function("f", vec![x], vec![], body);
        let c = b.contract("C", vec![], vec![f]);
        let unit = b.unit(vec![c]);

        let reporter = analyze_with_null_solver(&unit);
        assert_eq!(
            reporter.messages(),
            vec!["Assertion checker does not yet support the type of this variable."]
        );
    }

    #[test]
    fn division_case_split_for_signed_types() {
        let l = Term::Const("l".into());
        let r = Term::Const("r".into());
        let signed = division(l.clone(), r.clone(), &Ty::Int(8));
        assert_eq!(
            signed.to_string(),
            "(ite (>= l 0) (ite (>= r 0) (div l r) (- 0 (div l (- 0 r)))) \
             (ite (>= r 0) (- 0 (div (- 0 l) r)) (div (- 0 l) (- 0 r))))"
        );
        let unsigned = division(l, r, &Ty::Uint(8));
        assert_eq!(unsigned.to_string(), "(div l r)");
    }
}
