//! SMT-LIB2 text formatting.
//!
//! Implements `Display` for [`Sort`], [`Term`] and [`Command`], producing
//! valid SMT-LIB2 output that can be fed to solvers such as Z3 or CVC5.

use std::fmt;

use num_traits::Zero;

use crate::command::Command;
use crate::sort::Sort;
use crate::term::Term;

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

/// Whether `name` is a simple SMT-LIB symbol that needs no `|...|` quoting.
///
/// Symbols created from source-level names can contain characters such as
/// parentheses (`gasleft()_0`), which are only legal in quoted form.
fn is_simple_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        None => return false,
        Some(first) if first.is_ascii_digit() => return false,
        Some(first) if !is_symbol_char(first) => return false,
        Some(_) => {}
    }
    chars.all(is_symbol_char)
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "~!@$%^&*_-+=<>.?/".contains(c)
}

struct Symbol<'a>(&'a str);

impl fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_simple_symbol(self.0) {
            write!(f, "{}", self.0)
        } else {
            write!(f, "|{}|", self.0)
        }
    }
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Bool => write!(f, "Bool"),
            Sort::Int => write!(f, "Int"),
            Sort::Array(index, element) => write!(f, "(Array {index} {element})"),
            // Rendered only in diagnostics; declarations use `declare-fun`.
            Sort::Function(domain, codomain) => {
                write!(f, "(-> ")?;
                for d in domain {
                    write!(f, "{d} ")?;
                }
                write!(f, "{codomain})")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Term
// ---------------------------------------------------------------------------

/// Write a binary SMT-LIB operator: `(op lhs rhs)`.
fn fmt_binop(op: &str, lhs: &Term, rhs: &Term, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({op} {lhs} {rhs})")
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::BoolLit(true) => write!(f, "true"),
            Term::BoolLit(false) => write!(f, "false"),
            Term::IntLit(n) => {
                // SMT-LIB represents negative integers as `(- N)`
                if n < &Zero::zero() {
                    write!(f, "(- {})", -n)
                } else {
                    write!(f, "{n}")
                }
            }
            Term::Const(name) => write!(f, "{}", Symbol(name)),
            Term::Not(inner) => write!(f, "(not {inner})"),
            Term::And(a, b) => fmt_binop("and", a, b, f),
            Term::Or(a, b) => fmt_binop("or", a, b, f),
            Term::Implies(a, b) => fmt_binop("=>", a, b, f),
            Term::Eq(a, b) => fmt_binop("=", a, b, f),
            Term::Distinct(a, b) => fmt_binop("distinct", a, b, f),
            Term::Ite(cond, then, els) => write!(f, "(ite {cond} {then} {els})"),
            Term::Add(a, b) => fmt_binop("+", a, b, f),
            Term::Sub(a, b) => fmt_binop("-", a, b, f),
            Term::Mul(a, b) => fmt_binop("*", a, b, f),
            Term::Div(a, b) => fmt_binop("div", a, b, f),
            Term::Lt(a, b) => fmt_binop("<", a, b, f),
            Term::Le(a, b) => fmt_binop("<=", a, b, f),
            Term::Gt(a, b) => fmt_binop(">", a, b, f),
            Term::Ge(a, b) => fmt_binop(">=", a, b, f),
            Term::Select(array, index) => fmt_binop("select", array, index, f),
            Term::Store(array, index, value) => write!(f, "(store {array} {index} {value})"),
            Term::App(name, args) => {
                write!(f, "({}", Symbol(name))?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetLogic(logic) => write!(f, "(set-logic {logic})"),
            Command::SetOption(key, value) => write!(f, "(set-option :{key} {value})"),
            Command::DeclareConst(name, sort) => {
                write!(f, "(declare-const {} {sort})", Symbol(name))
            }
            Command::DeclareFun(name, params, ret) => {
                write!(f, "(declare-fun {} (", Symbol(name))?;
                for (i, s) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{s}")?;
                }
                write!(f, ") {ret})")
            }
            Command::Assert(term) => write!(f, "(assert {term})"),
            Command::CheckSat => write!(f, "(check-sat)"),
            Command::GetValue(terms) => {
                write!(f, "(get-value (")?;
                for (i, t) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{t}")?;
                }
                write!(f, "))")
            }
            Command::Push(n) => write!(f, "(push {n})"),
            Command::Pop(n) => write!(f, "(pop {n})"),
            Command::Comment(text) => write!(f, ";; {text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn sort_display() {
        assert_eq!(Sort::Bool.to_string(), "Bool");
        assert_eq!(Sort::Int.to_string(), "Int");
        assert_eq!(Sort::array(Sort::Int, Sort::Int).to_string(), "(Array Int Int)");
        assert_eq!(
            Sort::array(Sort::Int, Sort::array(Sort::Int, Sort::Bool)).to_string(),
            "(Array Int (Array Int Bool))"
        );
    }

    #[test]
    fn literal_display() {
        assert_eq!(Term::BoolLit(true).to_string(), "true");
        assert_eq!(Term::int(42).to_string(), "42");
        assert_eq!(Term::int(-5).to_string(), "(- 5)");
        assert_eq!(Term::int(0).to_string(), "0");
    }

    #[test]
    fn big_literal_display() {
        let max: BigInt = (BigInt::from(1) << 256) - 1;
        let rendered = Term::IntLit(max.clone()).to_string();
        assert_eq!(rendered, max.to_string());
    }

    #[test]
    fn boolean_ops_display() {
        let a = Term::Const("a".into());
        let b = Term::Const("b".into());
        assert_eq!(Term::and(a.clone(), b.clone()).to_string(), "(and a b)");
        assert_eq!(Term::or(a.clone(), b.clone()).to_string(), "(or a b)");
        assert_eq!(Term::implies(a.clone(), b.clone()).to_string(), "(=> a b)");
        assert_eq!(Term::not(a.clone()).to_string(), "(not a)");
        assert_eq!(Term::distinct(a, b).to_string(), "(distinct a b)");
    }

    #[test]
    fn arithmetic_display() {
        let x = Term::Const("x".into());
        assert_eq!(Term::add(x.clone(), Term::int(1)).to_string(), "(+ x 1)");
        assert_eq!(Term::div(x.clone(), Term::int(2)).to_string(), "(div x 2)");
        assert_eq!(Term::le(x.clone(), Term::int(9)).to_string(), "(<= x 9)");
        assert_eq!(
            Term::ite(Term::ge(x.clone(), Term::int(0)), x.clone(), Term::int(0)).to_string(),
            "(ite (>= x 0) x 0)"
        );
    }

    #[test]
    fn array_ops_display() {
        let m = Term::Const("m".into());
        assert_eq!(
            Term::select(m.clone(), Term::int(3)).to_string(),
            "(select m 3)"
        );
        assert_eq!(
            Term::store(m, Term::int(0), Term::int(42)).to_string(),
            "(store m 0 42)"
        );
    }

    #[test]
    fn quoted_symbols() {
        assert_eq!(Term::Const("gasleft()_0".into()).to_string(), "|gasleft()_0|");
        assert_eq!(Term::Const("msg.sender_0".into()).to_string(), "msg.sender_0");
        assert_eq!(
            Command::DeclareConst("gasleft()_1".into(), Sort::Int).to_string(),
            "(declare-const |gasleft()_1| Int)"
        );
    }

    #[test]
    fn command_display() {
        assert_eq!(
            Command::DeclareConst("x".into(), Sort::Int).to_string(),
            "(declare-const x Int)"
        );
        assert_eq!(
            Command::DeclareFun("f".into(), vec![Sort::Int, Sort::Int], Sort::Bool).to_string(),
            "(declare-fun f (Int Int) Bool)"
        );
        assert_eq!(
            Command::Assert(Term::eq(Term::Const("x".into()), Term::int(5))).to_string(),
            "(assert (= x 5))"
        );
        assert_eq!(Command::Push(1).to_string(), "(push 1)");
        assert_eq!(Command::Pop(1).to_string(), "(pop 1)");
        assert_eq!(
            Command::GetValue(vec![Term::Const("x".into()), Term::Const("y".into())]).to_string(),
            "(get-value (x y))"
        );
        assert_eq!(
            Command::SetOption("produce-models".into(), "true".into()).to_string(),
            "(set-option :produce-models true)"
        );
    }
}
