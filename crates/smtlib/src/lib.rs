//! # veract-smtlib
//!
//! SMT-LIB2 model for the veract assertion checker.
//!
//! Provides the [`Sort`] and [`Term`] types used by the expression encoder,
//! the [`Command`]/[`Script`] types used by solver backends, and `Display`
//! implementations that produce valid SMT-LIB2 text.
//!
//! The term language is deliberately restricted to the theories the checker
//! uses: unbounded integers, booleans, extensional arrays and uninterpreted
//! functions.

pub mod command;
pub mod formatter;
pub mod script;
pub mod sort;
pub mod term;

pub use command::Command;
pub use script::Script;
pub use sort::Sort;
pub use term::Term;
