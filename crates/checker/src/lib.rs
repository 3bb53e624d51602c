//! # veract-checker
//!
//! Symbolic assertion checker for a typed, contract-oriented imperative
//! source language.
//!
//! Given a typed AST produced by a front-end, [`Checker::analyze`] walks
//! each function body, builds first-order formulas over integers, booleans
//! and extensional arrays, and asks an SMT solver portfolio to prove that
//! `assert(...)` violations, integer overflow/underflow and division by
//! zero are unreachable. Satisfiable goals are reported as warnings with a
//! counter-example model; everything outside the modelled subset degrades
//! to an "unsupported" warning, never an error.
//!
//! ```
//! use veract_checker::ast::builder::AstBuilder;
//! use veract_checker::ast::{BinOp, SourceCache, Ty};
//! use veract_checker::{Checker, CollectingReporter};
//! use veract_solver::NullSolver;
//!
//! let mut b = AstBuilder::new();
//! let x = b.param("x", Ty::Uint(256));
//! let cond = {
//!     let xi = b.ident(&x);
//!     let zero = b.num(0, Ty::Uint(256));
//!     b.binary(BinOp::Ge, Ty::Uint(256), xi, zero)
//! };
//! let assertion = b.assert_call(cond);
//! let stmt = b.expr_stmt(assertion);
//! let body = b.block(vec![stmt]);
//! let f = b.function("f", vec![x], vec![], body);
//! let contract = b.contract("C", vec![], vec![f]);
//! let unit = b.unit(vec![contract]);
//!
//! let mut reporter = CollectingReporter::new();
//! let source = SourceCache::default();
//! let mut checker = Checker::with_solver(Box::new(NullSolver::new()), &mut reporter, &source);
//! checker.analyze(&unit);
//! ```

pub mod ast;
pub mod checker;
pub mod humanize;
pub mod reporter;
pub mod symbol;
pub mod usage;

pub use checker::Checker;
pub use reporter::{CollectingReporter, ConsoleReporter, ErrorReporter, SecondaryNote, Warning};
