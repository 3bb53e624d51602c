//! Shared test backend: a solver that replays scripted answers and records
//! every operation for structural assertions.

// Each test binary uses a different subset of this module.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use veract_smtlib::{Sort, Term};
use veract_solver::{CheckResult, SmtSolver};

/// One scripted `check` answer.
#[derive(Debug, Clone)]
pub enum Answer {
    /// Satisfiable, with model value strings for the requested terms.
    Sat(Vec<&'static str>),
    Unsat,
    Unknown,
    Error,
}

/// Solver operations, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Reset,
    Push,
    Pop,
    Check,
}

/// Everything the scripted solver observed.
#[derive(Debug, Default)]
pub struct SolverLog {
    pub ops: Vec<Op>,
    /// Assertion text with the scope depth it was added at.
    pub assertions: Vec<(usize, String)>,
    pub declarations: Vec<String>,
    pub final_depth: usize,
}

impl SolverLog {
    pub fn checks(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::Check).count()
    }

    pub fn has_assertion(&self, text: &str) -> bool {
        self.assertions.iter().any(|(_, a)| a == text)
    }

    pub fn assertions_containing(&self, needle: &str) -> Vec<&(usize, String)> {
        self.assertions
            .iter()
            .filter(|(_, a)| a.contains(needle))
            .collect()
    }
}

/// Backend that pops one scripted answer per `check` call.
///
/// Panics on an unscripted `check`, so scenario tests double as an exact
/// trace of how many goals the checker emits.
pub struct ScriptedSolver {
    answers: VecDeque<Answer>,
    depth: usize,
    log: Rc<RefCell<SolverLog>>,
}

impl ScriptedSolver {
    pub fn new(answers: Vec<Answer>) -> (Self, Rc<RefCell<SolverLog>>) {
        let log = Rc::new(RefCell::new(SolverLog::default()));
        (
            Self {
                answers: answers.into(),
                depth: 0,
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl SmtSolver for ScriptedSolver {
    fn reset(&mut self) {
        self.depth = 0;
        let mut log = self.log.borrow_mut();
        log.ops.push(Op::Reset);
        log.final_depth = 0;
    }

    fn push(&mut self) {
        self.depth += 1;
        let mut log = self.log.borrow_mut();
        log.ops.push(Op::Push);
        log.final_depth = self.depth;
    }

    fn pop(&mut self) {
        assert!(self.depth > 0, "unmatched pop");
        self.depth -= 1;
        let mut log = self.log.borrow_mut();
        log.ops.push(Op::Pop);
        log.final_depth = self.depth;
    }

    fn declare(&mut self, name: &str, _sort: &Sort) {
        self.log.borrow_mut().declarations.push(name.to_string());
    }

    fn add_assertion(&mut self, term: &Term) {
        let depth = self.depth;
        self.log
            .borrow_mut()
            .assertions
            .push((depth, term.to_string()));
    }

    fn check(&mut self, _expressions: &[Term]) -> (CheckResult, Vec<String>) {
        self.log.borrow_mut().ops.push(Op::Check);
        match self.answers.pop_front() {
            Some(Answer::Sat(values)) => (
                CheckResult::Satisfiable,
                values.into_iter().map(String::from).collect(),
            ),
            Some(Answer::Unsat) => (CheckResult::Unsatisfiable, Vec::new()),
            Some(Answer::Unknown) => (CheckResult::Unknown, Vec::new()),
            Some(Answer::Error) => (CheckResult::Error, Vec::new()),
            None => panic!("unscripted check call"),
        }
    }
}
