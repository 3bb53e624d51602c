use std::fmt;
use std::path::PathBuf;

use crate::config::SolverKind;

/// Errors from solver interaction.
///
/// These never escape the checker: each backend maps them to
/// `CheckResult::Error` at its `check` boundary.
#[derive(Debug, PartialEq, Eq)]
pub enum SolverError {
    /// Solver binary not found at the specified path.
    NotFound(SolverKind, PathBuf),
    /// Process failed to start or crashed.
    Process(String),
    /// Failed to parse solver output.
    Parse(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::NotFound(kind, path) => {
                write!(f, "{kind} binary not found at: {}", path.display())
            }
            SolverError::Process(msg) => write!(f, "Solver process error: {msg}"),
            SolverError::Parse(msg) => write!(f, "Failed to parse solver output: {msg}"),
        }
    }
}

impl std::error::Error for SolverError {}
