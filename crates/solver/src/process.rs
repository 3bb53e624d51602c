use std::io::Write;
use std::process::{Command, Stdio};

use veract_smtlib::{Sort, Term};

use crate::backend::{AssertionStack, SmtSolver};
use crate::config::BackendConfig;
use crate::error::SolverError;
use crate::parser::parse_check_output;
use crate::result::CheckResult;

/// Command-line SMT solver backend.
///
/// Talks to any SMT-LIB2 compatible solver (Z3, CVC5, Yices) by rebuilding
/// the accumulated declarations and scoped assertions into one
/// self-contained script per query, spawning the solver and piping the
/// script through stdin. Incremental state lives on our side, so scope
/// bookkeeping works identically across solvers and across runs.
#[derive(Debug)]
pub struct ProcessSolver {
    config: BackendConfig,
    state: AssertionStack,
}

impl ProcessSolver {
    /// Create a new backend with the given configuration.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            state: AssertionStack::new(),
        }
    }

    /// Get a reference to the solver configuration.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Run one query text through the solver process.
    fn run_query(&self, query: &str) -> Result<(CheckResult, Vec<String>), SolverError> {
        self.config.ensure_binary()?;

        let solver_name = self.config.kind.to_string();
        let mut child = Command::new(&self.config.binary_path)
            .args(self.config.command_line())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SolverError::Process(format!("Failed to start {solver_name}: {e}")))?;

        {
            // Dropping stdin closes the pipe so the solver sees EOF.
            let mut stdin = child.stdin.take().ok_or_else(|| {
                SolverError::Process(format!("Failed to open {solver_name} stdin"))
            })?;
            stdin.write_all(query.as_bytes()).map_err(|e| {
                SolverError::Process(format!("Failed to write to {solver_name} stdin: {e}"))
            })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| SolverError::Process(format!("Failed to wait for {solver_name}: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if stderr.contains("timeout") || stdout.trim() == "timeout" {
            return Ok((CheckResult::Unknown, Vec::new()));
        }

        parse_check_output(&stdout, &stderr)
    }
}

impl SmtSolver for ProcessSolver {
    fn reset(&mut self) {
        self.state.reset();
    }

    fn push(&mut self) {
        self.state.push();
    }

    fn pop(&mut self) {
        self.state.pop();
    }

    fn declare(&mut self, name: &str, sort: &Sort) {
        self.state.declare(name, sort);
    }

    fn add_assertion(&mut self, term: &Term) {
        self.state.add_assertion(term);
    }

    fn check(&mut self, expressions: &[Term]) -> (CheckResult, Vec<String>) {
        let query = self.state.build_query(expressions);
        match self.run_query(&query) {
            Ok(answer) => answer,
            Err(_) => (CheckResult::Error, Vec::new()),
        }
    }
}
