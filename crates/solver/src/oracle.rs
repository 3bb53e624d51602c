//! File-based SMT oracle: answers queries from a prerecorded map.
//!
//! Queries are fingerprinted with SHA-256 over their SMT-LIB2 text. A build
//! without any native solver can still decide goals when the fingerprint →
//! response map (typically produced by an earlier run with a real solver)
//! is supplied as auxiliary input; unmatched queries are collected so they
//! can be exported and answered offline.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use veract_smtlib::{Sort, Term};

use crate::backend::{AssertionStack, SmtSolver};
use crate::parser::parse_check_output;
use crate::result::CheckResult;

/// Prerecorded query responses, keyed by query fingerprint.
///
/// A response is raw solver output text: the verdict line, and for `sat`
/// optionally a `get-value` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryResponses {
    responses: FxHashMap<String, String>,
}

impl QueryResponses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fingerprint → response map from JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Hex SHA-256 fingerprint of a query text.
    pub fn fingerprint(query: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(query.as_bytes());
        let digest = hasher.finalize();
        let mut out = String::with_capacity(64);
        for byte in digest {
            out.push_str(&format!("{byte:02x}"));
        }
        out
    }

    /// Record the response for a query.
    pub fn record(&mut self, query: &str, response: impl Into<String>) {
        self.responses
            .insert(Self::fingerprint(query), response.into());
    }

    pub fn get(&self, fingerprint: &str) -> Option<&str> {
        self.responses.get(fingerprint).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// Backend that replays prerecorded answers instead of running a solver.
#[derive(Debug, Clone, Default)]
pub struct OracleSolver {
    state: AssertionStack,
    responses: QueryResponses,
    unhandled: Vec<String>,
}

impl OracleSolver {
    pub fn new(responses: QueryResponses) -> Self {
        Self {
            state: AssertionStack::new(),
            responses,
            unhandled: Vec::new(),
        }
    }

    /// Queries no prerecorded response was available for, in order.
    pub fn unhandled_queries(&self) -> &[String] {
        &self.unhandled
    }
}

impl SmtSolver for OracleSolver {
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
        let fingerprint = QueryResponses::fingerprint(&query);
        match self.responses.get(&fingerprint) {
            Some(response) => match parse_check_output(response, "") {
                Ok(answer) => answer,
                Err(_) => (CheckResult::Error, Vec::new()),
            },
            None => {
                self.unhandled.push(query);
                (CheckResult::Unknown, Vec::new())
            }
        }
    }
}
