/// Outcome of a satisfiability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    /// The assertion set has a model (the checked goal is reachable).
    Satisfiable,
    /// The assertion set has no model (the checked goal is proved away).
    Unsatisfiable,
    /// The solver could not decide (timeout, incomplete theory, no oracle
    /// response available).
    Unknown,
    /// Two backends of a portfolio disagreed between sat and unsat.
    Conflicting,
    /// The backend failed (process, transport or parse error).
    Error,
}

impl CheckResult {
    /// Returns `true` when the backend committed to sat or unsat.
    pub fn is_decisive(&self) -> bool {
        matches!(self, CheckResult::Satisfiable | CheckResult::Unsatisfiable)
    }
}
