//! SSA-indexed symbolic variables.
//!
//! Each source variable (and each encoded expression node) is backed by a
//! [`SymbolicVariable`]: a family of solver constants `name_0, name_1, ...`
//! indexed by an SSA version counter. Assignments bump the index; branch
//! merging restores index snapshots and unifies values with `ite`.
//!
//! Indices are never reused: the live index can be rolled back to a
//! snapshot, but the next bump always takes a fresh index. Two branches
//! restarted from the same snapshot therefore write to distinct constants,
//! and the merged value can refer to both sides.

use veract_smtlib::{Sort, Term};
use veract_solver::SmtSolver;

use crate::ast::Ty;

/// One SSA-versioned symbolic variable.
#[derive(Debug, Clone)]
pub struct SymbolicVariable {
    unique_name: String,
    ty: Ty,
    sort: Sort,
    current: usize,
    next_free: usize,
}

impl SymbolicVariable {
    fn new(ty: Ty, sort: Sort, unique_name: String, solver: &mut dyn SmtSolver) -> Self {
        let var = Self {
            unique_name,
            ty,
            sort,
            current: 0,
            next_free: 1,
        };
        solver.declare(&var.symbol(0), &var.sort);
        var
    }

    pub fn ty(&self) -> &Ty {
        &self.ty
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// The live SSA index.
    pub fn index(&self) -> usize {
        self.current
    }

    /// Roll the live index back to a previously used one.
    pub fn set_index(&mut self, index: usize) {
        assert!(index < self.next_free, "index {index} was never assigned");
        self.current = index;
    }

    /// Solver symbol for a given index.
    pub fn symbol(&self, index: usize) -> String {
        format!("{}_{}", self.unique_name, index)
    }

    /// Term at the live index.
    pub fn current_value(&self) -> Term {
        self.value_at_index(self.current)
    }

    /// Term at an arbitrary (already assigned) index.
    pub fn value_at_index(&self, index: usize) -> Term {
        Term::Const(self.symbol(index))
    }

    /// Move to a globally fresh index and return the term there.
    ///
    /// Pure bookkeeping plus a declaration; no value constraint is added.
    pub fn increase_index(&mut self, solver: &mut dyn SmtSolver) -> Term {
        self.current = self.next_free;
        self.next_free += 1;
        solver.declare(&self.symbol(self.current), &self.sort);
        self.current_value()
    }

    /// Apply the variable as an uninterpreted function.
    pub fn apply(&self, args: Vec<Term>) -> Term {
        Term::app(self.symbol(self.current), args)
    }
}

/// Map a source type to its solver sort. `None` means unmodelled.
pub fn smt_sort(ty: &Ty) -> Option<Sort> {
    match ty {
        Ty::Bool => Some(Sort::Bool),
        Ty::Int(_) | Ty::Uint(_) | Ty::Address => Some(Sort::Int),
        Ty::Mapping(key, value) => Some(Sort::array(smt_sort(key)?, smt_sort(value)?)),
        Ty::Function { params, returns } => {
            let domain = params
                .iter()
                .map(|p| smt_sort(p).unwrap_or(Sort::Int))
                .collect();
            let codomain = returns
                .first()
                .and_then(smt_sort)
                .unwrap_or(Sort::Int);
            Some(Sort::function(domain, codomain))
        }
        Ty::Magic | Ty::Other(_) => None,
    }
}

/// Create a symbolic variable appropriate to `ty`.
///
/// Returns `unsupported = true` when the type is not modelled; a fallback
/// integer variable is still handed back so traversal can continue.
pub fn new_symbolic_variable(
    ty: &Ty,
    unique_name: String,
    solver: &mut dyn SmtSolver,
) -> (bool, SymbolicVariable) {
    match smt_sort(ty) {
        Some(sort) => (
            false,
            SymbolicVariable::new(ty.clone(), sort, unique_name, solver),
        ),
        None => (
            true,
            SymbolicVariable::new(ty.clone(), Sort::Int, unique_name, solver),
        ),
    }
}

/// Constrain the variable's current value to its type's zero.
pub fn set_zero_value(var: &SymbolicVariable, solver: &mut dyn SmtSolver) {
    match var.sort() {
        Sort::Int => solver.add_assertion(&Term::eq(var.current_value(), Term::int(0))),
        Sort::Bool => solver.add_assertion(&Term::eq(var.current_value(), Term::BoolLit(false))),
        // No zero constraint for arrays or functions.
        _ => {}
    }
}

/// Constrain the variable's current value only by its sort bounds.
pub fn set_unknown_value(var: &SymbolicVariable, solver: &mut dyn SmtSolver) {
    set_unknown_term(&var.current_value(), var.ty(), solver);
}

/// Constrain an arbitrary term by the sort bounds of a source type.
pub fn set_unknown_term(term: &Term, ty: &Ty, solver: &mut dyn SmtSolver) {
    if let Some((min, max)) = ty.int_bounds() {
        solver.add_assertion(&Term::and(
            Term::ge(term.clone(), Term::IntLit(min)),
            Term::le(term.clone(), Term::IntLit(max)),
        ));
    }
    // Booleans and arrays need no bounds.
}

#[cfg(test)]
mod tests {
    use super::*;
    use veract_solver::CheckResult;

    /// Records declarations and assertions; answers are irrelevant here.
    #[derive(Default)]
    struct RecordingSolver {
        declarations: Vec<(String, Sort)>,
        assertions: Vec<String>,
    }

    impl SmtSolver for RecordingSolver {
        fn reset(&mut self) {
            self.declarations.clear();
            self.assertions.clear();
        }
        fn push(&mut self) {}
        fn pop(&mut self) {}
        fn declare(&mut self, name: &str, sort: &Sort) {
            self.declarations.push((name.to_string(), sort.clone()));
        }
        fn add_assertion(&mut self, term: &Term) {
            self.assertions.push(term.to_string());
        }
        fn check(&mut self, _expressions: &[Term]) -> (CheckResult, Vec<String>) {
            (CheckResult::Unknown, Vec::new())
        }
    }

    #[test]
    fn indices_start_at_zero_and_grow() {
        let mut solver = RecordingSolver::default();
        let (unsupported, mut var) =
            new_symbolic_variable(&Ty::Uint(256), "x_1".to_string(), &mut solver);
        assert!(!unsupported);
        assert_eq!(var.index(), 0);
        assert_eq!(var.current_value(), Term::Const("x_1_0".into()));

        let t = var.increase_index(&mut solver);
        assert_eq!(var.index(), 1);
        assert_eq!(t, Term::Const("x_1_1".into()));
        assert_eq!(
            solver.declarations,
            vec![
                ("x_1_0".to_string(), Sort::Int),
                ("x_1_1".to_string(), Sort::Int)
            ]
        );
    }

    #[test]
    fn rolled_back_index_is_never_reassigned() {
        let mut solver = RecordingSolver::default();
        let (_, mut var) = new_symbolic_variable(&Ty::Uint(8), "x_1".to_string(), &mut solver);
        var.increase_index(&mut solver); // index 1
        var.set_index(0);
        let t = var.increase_index(&mut solver);
        // The branch restarted from index 0 still gets a fresh index 2.
        assert_eq!(t, Term::Const("x_1_2".into()));
        assert_eq!(var.index(), 2);
    }

    #[test]
    #[should_panic(expected = "never assigned")]
    fn set_index_beyond_assigned_panics() {
        let mut solver = RecordingSolver::default();
        let (_, mut var) = new_symbolic_variable(&Ty::Bool, "b_1".to_string(), &mut solver);
        var.set_index(5);
    }

    #[test]
    fn sort_mapping() {
        assert_eq!(smt_sort(&Ty::Bool), Some(Sort::Bool));
        assert_eq!(smt_sort(&Ty::Int(8)), Some(Sort::Int));
        assert_eq!(smt_sort(&Ty::Address), Some(Sort::Int));
        assert_eq!(
            smt_sort(&Ty::mapping(Ty::Uint(256), Ty::Bool)),
            Some(Sort::array(Sort::Int, Sort::Bool))
        );
        assert_eq!(smt_sort(&Ty::Other("bytes".into())), None);

        let fn_ty = Ty::Function {
            params: vec![Ty::Uint(256), Ty::Bool],
            returns: vec![Ty::Uint(256)],
        };
        assert_eq!(
            smt_sort(&fn_ty),
            Some(Sort::function(vec![Sort::Int, Sort::Bool], Sort::Int))
        );
    }

    #[test]
    fn unsupported_type_falls_back_to_integer() {
        let mut solver = RecordingSolver::default();
        let (unsupported, var) =
            new_symbolic_variable(&Ty::Other("bytes".into()), "b_1".to_string(), &mut solver);
        assert!(unsupported);
        assert_eq!(var.sort(), &Sort::Int);
    }

    #[test]
    fn zero_value_constraints() {
        let mut solver = RecordingSolver::default();
        let (_, int_var) = new_symbolic_variable(&Ty::Uint(8), "x_1".to_string(), &mut solver);
        set_zero_value(&int_var, &mut solver);
        assert_eq!(solver.assertions.last().unwrap(), "(= x_1_0 0)");

        let (_, bool_var) = new_symbolic_variable(&Ty::Bool, "b_2".to_string(), &mut solver);
        set_zero_value(&bool_var, &mut solver);
        assert_eq!(solver.assertions.last().unwrap(), "(= b_2_0 false)");

        let count = solver.assertions.len();
        let (_, map_var) = new_symbolic_variable(
            &Ty::mapping(Ty::Uint(256), Ty::Uint(256)),
            "m_3".to_string(),
            &mut solver,
        );
        set_zero_value(&map_var, &mut solver);
        assert_eq!(solver.assertions.len(), count);
    }

    #[test]
    fn unknown_value_applies_type_bounds() {
        let mut solver = RecordingSolver::default();
        let (_, var) = new_symbolic_variable(&Ty::Int(8), "x_1".to_string(), &mut solver);
        set_unknown_value(&var, &mut solver);
        assert_eq!(
            solver.assertions.last().unwrap(),
            "(and (>= x_1_0 (- 128)) (<= x_1_0 127))"
        );

        let count = solver.assertions.len();
        let (_, bool_var) = new_symbolic_variable(&Ty::Bool, "b_2".to_string(), &mut solver);
        set_unknown_value(&bool_var, &mut solver);
        assert_eq!(solver.assertions.len(), count, "booleans get no bounds");
    }

    #[test]
    fn function_application() {
        let mut solver = RecordingSolver::default();
        let fn_ty = Ty::Function {
            params: vec![Ty::Uint(256)],
            returns: vec![Ty::Uint(256)],
        };
        let (_, var) = new_symbolic_variable(&fn_ty, "keccak256".to_string(), &mut solver);
        let app = var.apply(vec![Term::int(1)]);
        assert_eq!(app.to_string(), "(keccak256_0 1)");
    }
}
