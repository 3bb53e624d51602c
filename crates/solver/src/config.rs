//! Discovery and configuration of command-line SMT solver backends.
//!
//! Everything kind-specific lives in one static table, so supporting a new
//! solver means adding a row: its binary name, the arguments that make it
//! read SMT-LIB2 from stdin with model output, and how it spells a time
//! limit. Discovery walks the `PATH` environment directly.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::SolverError;

/// Supported SMT solver families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    Z3,
    Cvc5,
    Yices,
}

/// One table row describing a solver family.
struct SolverSpec {
    kind: SolverKind,
    display: &'static str,
    /// Binary name looked up on PATH.
    binary: &'static str,
    /// Accepted spellings in user-facing configuration.
    aliases: &'static [&'static str],
    /// Arguments for stdin mode with model production.
    base_args: &'static [&'static str],
    /// Flag prefix for the per-query time limit.
    timeout_flag: &'static str,
    /// The limit is given in seconds instead of milliseconds.
    timeout_in_seconds: bool,
}

/// Portfolio registration order.
const SOLVER_SPECS: [SolverSpec; 3] = [
    SolverSpec {
        kind: SolverKind::Z3,
        display: "Z3",
        binary: "z3",
        aliases: &["z3"],
        base_args: &["-in"],
        timeout_flag: "-t:",
        timeout_in_seconds: false,
    },
    SolverSpec {
        kind: SolverKind::Cvc5,
        display: "CVC5",
        binary: "cvc5",
        aliases: &["cvc5", "cvc"],
        base_args: &["--lang", "smt2", "--produce-models"],
        timeout_flag: "--tlimit=",
        timeout_in_seconds: false,
    },
    SolverSpec {
        kind: SolverKind::Yices,
        display: "Yices",
        binary: "yices-smt2",
        aliases: &["yices", "yices2", "yices-smt2"],
        base_args: &[],
        timeout_flag: "--timeout=",
        timeout_in_seconds: true,
    },
];

impl SolverKind {
    fn spec(&self) -> &'static SolverSpec {
        SOLVER_SPECS
            .iter()
            .find(|spec| spec.kind == *self)
            .expect("every solver kind has a table row")
    }

    /// Binary name looked up on PATH.
    pub fn binary_name(&self) -> &'static str {
        self.spec().binary
    }

    /// Walk the `PATH` environment for this solver's binary.
    pub fn locate(&self) -> Option<PathBuf> {
        let path = env::var_os("PATH")?;
        env::split_paths(&path)
            .map(|dir| dir.join(self.binary_name()))
            .find(|candidate| candidate.is_file())
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().display)
    }
}

impl std::str::FromStr for SolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        SOLVER_SPECS
            .iter()
            .find(|spec| spec.aliases.contains(&lower.as_str()))
            .map(|spec| spec.kind)
            .ok_or_else(|| format!("unknown solver {s:?}; expected one of z3, cvc5, yices"))
    }
}

/// Configuration of one command-line backend: which binary to run and how.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub kind: SolverKind,
    pub binary_path: PathBuf,
    /// Per-query time limit, rendered in the solver's own units.
    pub timeout: Option<Duration>,
    /// Extra arguments appended verbatim.
    pub extra_args: Vec<String>,
}

impl BackendConfig {
    pub fn new(kind: SolverKind, binary_path: PathBuf) -> Self {
        Self {
            kind,
            binary_path,
            timeout: None,
            extra_args: Vec::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Locate every installed solver, in portfolio registration order.
    pub fn detect_available() -> Vec<BackendConfig> {
        SOLVER_SPECS
            .iter()
            .filter_map(|spec| spec.kind.locate().map(|path| Self::new(spec.kind, path)))
            .collect()
    }

    /// The full argument list for one solver invocation.
    pub fn command_line(&self) -> Vec<String> {
        let spec = self.kind.spec();
        let mut args: Vec<String> = spec.base_args.iter().map(|a| a.to_string()).collect();
        if let Some(timeout) = self.timeout {
            let amount = if spec.timeout_in_seconds {
                timeout.as_secs()
            } else {
                timeout.as_millis() as u64
            };
            args.push(format!("{}{amount}", spec.timeout_flag));
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Fail early when the configured binary is gone.
    pub fn ensure_binary(&self) -> Result<(), SolverError> {
        if self.binary_path.is_file() {
            Ok(())
        } else {
            Err(SolverError::NotFound(self.kind, self.binary_path.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_table_row() {
        for kind in [SolverKind::Z3, SolverKind::Cvc5, SolverKind::Yices] {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn display_round_trips_through_parsing() {
        for spec in &SOLVER_SPECS {
            let rendered = spec.kind.to_string();
            assert_eq!(rendered.parse::<SolverKind>(), Ok(spec.kind));
        }
    }

    #[test]
    fn aliases_parse_to_their_kind() {
        assert_eq!("yices2".parse::<SolverKind>(), Ok(SolverKind::Yices));
        assert_eq!("yices-smt2".parse::<SolverKind>(), Ok(SolverKind::Yices));
        assert_eq!("cvc".parse::<SolverKind>(), Ok(SolverKind::Cvc5));
        assert_eq!("Z3".parse::<SolverKind>(), Ok(SolverKind::Z3));
    }

    #[test]
    fn unknown_solver_name_is_rejected() {
        let err = "boolector".parse::<SolverKind>().unwrap_err();
        assert!(err.contains("boolector"), "{err}");
    }

    #[test]
    fn command_line_without_timeout_is_the_base_args() {
        let config = BackendConfig::new(SolverKind::Cvc5, PathBuf::from("cvc5"));
        assert_eq!(
            config.command_line(),
            vec!["--lang", "smt2", "--produce-models"]
        );
        let config = BackendConfig::new(SolverKind::Yices, PathBuf::from("yices-smt2"));
        assert!(config.command_line().is_empty());
    }

    #[test]
    fn timeout_is_rendered_in_solver_units() {
        let timeout = Duration::from_millis(1500);
        let z3 = BackendConfig::new(SolverKind::Z3, PathBuf::from("z3")).with_timeout(timeout);
        assert_eq!(z3.command_line(), vec!["-in", "-t:1500"]);
        let cvc5 =
            BackendConfig::new(SolverKind::Cvc5, PathBuf::from("cvc5")).with_timeout(timeout);
        assert!(cvc5.command_line().contains(&"--tlimit=1500".to_string()));
        // Yices takes whole seconds; fractions are truncated.
        let yices = BackendConfig::new(SolverKind::Yices, PathBuf::from("yices-smt2"))
            .with_timeout(timeout);
        assert_eq!(yices.command_line(), vec!["--timeout=1"]);
    }

    #[test]
    fn extra_args_come_last() {
        let config = BackendConfig::new(SolverKind::Z3, PathBuf::from("z3"))
            .with_timeout(Duration::from_millis(100))
            .with_extra_args(vec!["-v:1".to_string()]);
        assert_eq!(config.command_line(), vec!["-in", "-t:100", "-v:1"]);
    }

    #[test]
    fn missing_binary_is_reported() {
        let config = BackendConfig::new(SolverKind::Z3, PathBuf::from("/nonexistent/z3"));
        assert_eq!(
            config.ensure_binary(),
            Err(SolverError::NotFound(
                SolverKind::Z3,
                PathBuf::from("/nonexistent/z3")
            ))
        );
    }
}
