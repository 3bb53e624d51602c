//! Portfolio of SMT backends with a consensus policy.

use veract_smtlib::{Sort, Term};

use crate::backend::SmtSolver;
use crate::config::BackendConfig;
use crate::oracle::{OracleSolver, QueryResponses};
use crate::process::ProcessSolver;
use crate::result::CheckResult;

/// An ordered collection of solver backends behind the [`SmtSolver`] front.
///
/// Mutating calls are multicast to every backend in registration order.
/// `check` answers are combined by consensus:
///
/// - all decisive (sat/unsat) answers agree → that answer;
/// - two decisive answers disagree → [`CheckResult::Conflicting`];
/// - no decisive answer, at least one unknown → [`CheckResult::Unknown`];
/// - only errors → [`CheckResult::Error`].
///
/// Model values come from the first backend that answered satisfiable.
pub struct Portfolio {
    backends: Vec<Box<dyn SmtSolver>>,
    native_backends: usize,
}

impl Portfolio {
    /// Build a portfolio over explicit backends.
    pub fn new(backends: Vec<Box<dyn SmtSolver>>) -> Self {
        Self {
            backends,
            native_backends: 0,
        }
    }

    /// Build the default portfolio: every auto-detected native solver, or
    /// the canned-response oracle when none is installed.
    pub fn with_default_backends(responses: QueryResponses) -> Self {
        let mut backends: Vec<Box<dyn SmtSolver>> = Vec::new();
        for config in BackendConfig::detect_available() {
            backends.push(Box::new(ProcessSolver::new(config)));
        }
        let native_backends = backends.len();
        if backends.is_empty() {
            backends.push(Box::new(OracleSolver::new(responses)));
        }
        Self {
            backends,
            native_backends,
        }
    }

    /// Number of native (process) backends installed by
    /// [`Portfolio::with_default_backends`].
    pub fn native_backends(&self) -> usize {
        self.native_backends
    }

    /// Number of backends in the portfolio.
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl SmtSolver for Portfolio {
    fn reset(&mut self) {
        for backend in &mut self.backends {
            backend.reset();
        }
    }

    fn push(&mut self) {
        for backend in &mut self.backends {
            backend.push();
        }
    }

    fn pop(&mut self) {
        for backend in &mut self.backends {
            backend.pop();
        }
    }

    fn declare(&mut self, name: &str, sort: &Sort) {
        for backend in &mut self.backends {
            backend.declare(name, sort);
        }
    }

    fn add_assertion(&mut self, term: &Term) {
        for backend in &mut self.backends {
            backend.add_assertion(term);
        }
    }

    fn check(&mut self, expressions: &[Term]) -> (CheckResult, Vec<String>) {
        let mut agreed: Option<CheckResult> = None;
        let mut values = Vec::new();
        let mut saw_unknown = false;

        for backend in &mut self.backends {
            let (result, backend_values) = backend.check(expressions);
            match result {
                CheckResult::Satisfiable | CheckResult::Unsatisfiable => match agreed {
                    None => {
                        if result == CheckResult::Satisfiable {
                            values = backend_values;
                        }
                        agreed = Some(result);
                    }
                    Some(previous) if previous != result => {
                        return (CheckResult::Conflicting, Vec::new());
                    }
                    Some(_) => {
                        if result == CheckResult::Satisfiable && values.is_empty() {
                            values = backend_values;
                        }
                    }
                },
                CheckResult::Unknown => saw_unknown = true,
                CheckResult::Error | CheckResult::Conflicting => {}
            }
        }

        match agreed {
            Some(CheckResult::Satisfiable) => (CheckResult::Satisfiable, values),
            Some(result) => (result, Vec::new()),
            None if saw_unknown => (CheckResult::Unknown, Vec::new()),
            None => (CheckResult::Error, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend stub with a fixed answer, for consensus tests.
    struct FixedSolver {
        result: CheckResult,
        values: Vec<String>,
    }

    impl FixedSolver {
        fn new(result: CheckResult) -> Self {
            Self {
                result,
                values: Vec::new(),
            }
        }

        fn sat_with(values: Vec<&str>) -> Self {
            Self {
                result: CheckResult::Satisfiable,
                values: values.into_iter().map(String::from).collect(),
            }
        }
    }

    impl SmtSolver for FixedSolver {
        fn reset(&mut self) {}
        fn push(&mut self) {}
        fn pop(&mut self) {}
        fn declare(&mut self, _name: &str, _sort: &Sort) {}
        fn add_assertion(&mut self, _term: &Term) {}
        fn check(&mut self, _expressions: &[Term]) -> (CheckResult, Vec<String>) {
            (self.result, self.values.clone())
        }
    }

    fn portfolio_of(results: Vec<CheckResult>) -> Portfolio {
        Portfolio::new(
            results
                .into_iter()
                .map(|r| Box::new(FixedSolver::new(r)) as Box<dyn SmtSolver>)
                .collect(),
        )
    }

    #[test]
    fn agreement_wins() {
        let mut p = portfolio_of(vec![CheckResult::Unsatisfiable, CheckResult::Unsatisfiable]);
        assert_eq!(p.check(&[]).0, CheckResult::Unsatisfiable);
    }

    #[test]
    fn disagreement_is_conflicting() {
        let mut p = portfolio_of(vec![CheckResult::Satisfiable, CheckResult::Unsatisfiable]);
        assert_eq!(p.check(&[]).0, CheckResult::Conflicting);
    }

    #[test]
    fn unknown_does_not_override_decisive() {
        let mut p = portfolio_of(vec![CheckResult::Unknown, CheckResult::Satisfiable]);
        assert_eq!(p.check(&[]).0, CheckResult::Satisfiable);
    }

    #[test]
    fn error_does_not_override_decisive() {
        let mut p = portfolio_of(vec![CheckResult::Error, CheckResult::Unsatisfiable]);
        assert_eq!(p.check(&[]).0, CheckResult::Unsatisfiable);
    }

    #[test]
    fn only_unknown_stays_unknown() {
        let mut p = portfolio_of(vec![CheckResult::Error, CheckResult::Unknown]);
        assert_eq!(p.check(&[]).0, CheckResult::Unknown);
    }

    #[test]
    fn all_errors_stay_error() {
        let mut p = portfolio_of(vec![CheckResult::Error, CheckResult::Error]);
        assert_eq!(p.check(&[]).0, CheckResult::Error);
    }

    #[test]
    fn model_comes_from_first_sat_backend() {
        let mut p = Portfolio::new(vec![
            Box::new(FixedSolver::new(CheckResult::Unknown)),
            Box::new(FixedSolver::sat_with(vec!["1", "2"])),
            Box::new(FixedSolver::sat_with(vec!["9", "9"])),
        ]);
        let (result, values) = p.check(&[]);
        assert_eq!(result, CheckResult::Satisfiable);
        assert_eq!(values, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn empty_portfolio_is_error() {
        let mut p = Portfolio::new(Vec::new());
        assert_eq!(p.check(&[]).0, CheckResult::Error);
    }
}
