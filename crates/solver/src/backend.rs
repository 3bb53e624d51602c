use rustc_hash::FxHashSet;

use veract_smtlib::{Command, Script, Sort, Term};

use crate::result::CheckResult;

/// Uniform front over one SMT solver (or a portfolio of them).
///
/// Declarations are global: `pop` reverts assertions added since the matching
/// `push`, but never removes declared symbols. This mirrors native solver
/// APIs, where constants stay declared across scopes, and lets merge logic
/// refer to SSA indices created inside an already-popped scope.
pub trait SmtSolver {
    /// Discard all assertions, declarations and scopes.
    fn reset(&mut self);
    /// Open a new assertion scope.
    fn push(&mut self);
    /// Close the innermost scope, reverting its assertions.
    fn pop(&mut self);
    /// Declare a symbol. Redeclaring the same name is a no-op.
    fn declare(&mut self, name: &str, sort: &Sort);
    /// Add a boolean assertion to the current scope.
    fn add_assertion(&mut self, term: &Term);
    /// Query satisfiability of the current assertion set.
    ///
    /// On a satisfiable answer, returns the model values of `expressions`
    /// as strings, in order.
    fn check(&mut self, expressions: &[Term]) -> (CheckResult, Vec<String>);
}

/// Shared state of the script-replaying backends: global declarations plus a
/// stack of assertion scopes, rebuilt into a full SMT-LIB2 query per `check`.
#[derive(Debug, Clone)]
pub struct AssertionStack {
    declarations: Vec<Command>,
    declared: FxHashSet<String>,
    scopes: Vec<Vec<Term>>,
}

impl AssertionStack {
    pub fn new() -> Self {
        Self {
            declarations: Vec::new(),
            declared: FxHashSet::default(),
            scopes: vec![Vec::new()],
        }
    }

    pub fn reset(&mut self) {
        self.declarations.clear();
        self.declared.clear();
        self.scopes.clear();
        self.scopes.push(Vec::new());
    }

    pub fn push(&mut self) {
        self.scopes.push(Vec::new());
    }

    pub fn pop(&mut self) {
        assert!(self.scopes.len() > 1, "unmatched pop on solver scope stack");
        self.scopes.pop();
    }

    /// Scope depth: 0 before any `push`.
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    pub fn declare(&mut self, name: &str, sort: &Sort) {
        if !self.declared.insert(name.to_string()) {
            return;
        }
        let command = match sort {
            Sort::Function(domain, codomain) => Command::DeclareFun(
                name.to_string(),
                domain.clone(),
                codomain.as_ref().clone(),
            ),
            _ => Command::DeclareConst(name.to_string(), sort.clone()),
        };
        self.declarations.push(command);
    }

    pub fn add_assertion(&mut self, term: &Term) {
        self.scopes
            .last_mut()
            .expect("assertion scope stack is never empty")
            .push(term.clone());
    }

    /// Render the accumulated state as one self-contained SMT-LIB2 query.
    pub fn build_query(&self, expressions: &[Term]) -> String {
        let mut script = Script::new();
        script.push(Command::SetOption(
            "produce-models".to_string(),
            "true".to_string(),
        ));
        script.push(Command::SetLogic("ALL".to_string()));
        script.extend(self.declarations.iter().cloned());
        for scope in &self.scopes {
            for term in scope {
                script.push(Command::Assert(term.clone()));
            }
        }
        script.push(Command::CheckSat);
        if !expressions.is_empty() {
            script.push(Command::GetValue(expressions.to_vec()));
        }
        script.to_smtlib()
    }
}

impl Default for AssertionStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend of last resort: tracks nothing and always answers unknown.
#[derive(Debug, Clone, Default)]
pub struct NullSolver;

impl NullSolver {
    pub fn new() -> Self {
        NullSolver
    }
}

impl SmtSolver for NullSolver {
    fn reset(&mut self) {}
    fn push(&mut self) {}
    fn pop(&mut self) {}
    fn declare(&mut self, _name: &str, _sort: &Sort) {}
    fn add_assertion(&mut self, _term: &Term) {}

    fn check(&mut self, _expressions: &[Term]) -> (CheckResult, Vec<String>) {
        (CheckResult::Unknown, Vec::new())
    }
}
