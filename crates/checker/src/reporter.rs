//! Abstract diagnostic sink.
//!
//! The checker only ever emits warnings: unsupported constructs, satisfiable
//! goals and solver faults all surface here. Rendering is the embedder's
//! business; a collecting sink and a colored terminal sink are provided.

use colored::Colorize;

use crate::ast::Loc;

/// Extra context attached to a warning: a counter-example table, a hint, or
/// a related source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryNote {
    pub message: String,
    pub loc: Option<Loc>,
}

impl SecondaryNote {
    pub fn new(message: impl Into<String>, loc: Option<Loc>) -> Self {
        Self {
            message: message.into(),
            loc,
        }
    }
}

/// One reported warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub loc: Option<Loc>,
    pub message: String,
    pub secondary: Vec<SecondaryNote>,
}

/// Sink for checker diagnostics.
pub trait ErrorReporter {
    fn warning(&mut self, loc: Option<Loc>, message: String, secondary: Vec<SecondaryNote>);
}

/// Reporter that stores warnings for later inspection.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    warnings: Vec<Warning>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Primary messages only, in emission order.
    pub fn messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.message.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}

impl ErrorReporter for CollectingReporter {
    fn warning(&mut self, loc: Option<Loc>, message: String, secondary: Vec<SecondaryNote>) {
        self.warnings.push(Warning {
            loc,
            message,
            secondary,
        });
    }
}

/// Reporter that prints colored warnings to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        ConsoleReporter
    }
}

impl ErrorReporter for ConsoleReporter {
    fn warning(&mut self, loc: Option<Loc>, message: String, secondary: Vec<SecondaryNote>) {
        match loc {
            Some(loc) => eprintln!(
                "{} [{}..{}]: {message}",
                "warning".yellow().bold(),
                loc.start,
                loc.end
            ),
            None => eprintln!("{}: {message}", "warning".yellow().bold()),
        }
        for note in secondary {
            for line in note.message.lines() {
                eprintln!("  {line}");
            }
        }
    }
}
