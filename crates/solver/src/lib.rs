//! # veract-solver
//!
//! SMT solver interface for the veract assertion checker.
//!
//! The checker talks to a [`Portfolio`] of backends through the [`SmtSolver`]
//! trait: incremental `push`/`pop` scoping, assertion accumulation and
//! `check` with model generation. Three backends are provided:
//!
//! - [`ProcessSolver`] — spawns an SMT-LIB2 command-line solver (Z3, CVC5 or
//!   Yices) and replays the accumulated script per query;
//! - [`OracleSolver`] — answers from a prerecorded fingerprint → response
//!   map, for environments without a native solver;
//! - [`NullSolver`] — always answers unknown.
//!
//! ```no_run
//! use veract_smtlib::{Sort, Term};
//! use veract_solver::{Portfolio, QueryResponses, SmtSolver};
//!
//! let mut solver = Portfolio::with_default_backends(QueryResponses::new());
//! solver.declare("x", &Sort::Int);
//! solver.add_assertion(&Term::gt(Term::Const("x".into()), Term::int(0)));
//! let (result, _values) = solver.check(&[]);
//! println!("{result:?}");
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod oracle;
mod parser;
pub mod portfolio;
pub mod process;
pub mod result;

pub use backend::{NullSolver, SmtSolver};
pub use config::{BackendConfig, SolverKind};
pub use error::SolverError;
pub use oracle::{OracleSolver, QueryResponses};
pub use portfolio::Portfolio;
pub use process::ProcessSolver;
pub use result::CheckResult;
