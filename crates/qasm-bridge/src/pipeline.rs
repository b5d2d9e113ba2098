//! Staged scan, parse and execute.
//!
//! Each stage only runs when the one before it reported no errors, so a
//! malformed program is never executed.

use qasm_lang::{Grammar, LexError, ParseError, Statement, parse, scan};
use tracing::{debug, instrument};

use crate::bridge::Bridge;
use crate::error::RuntimeError;
use crate::register::{Measurement, QuantumRegister};

/// Process exit status for a program that ran to completion.
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit status for lexical or syntax errors.
pub const EXIT_DATA_ERROR: i32 = 65;

/// Process exit status for a runtime error.
pub const EXIT_SOFTWARE_ERROR: i32 = 70;

/// Result of running a program through every stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every statement executed.
    Success { measurements: Vec<Measurement> },

    /// The front end found errors and nothing was executed.
    ///
    /// `parser` is empty when scanning already failed.
    Rejected {
        lexer: Vec<LexError>,
        parser: Vec<ParseError>,
    },

    /// Execution halted on a runtime error.
    Failed {
        errors: Vec<RuntimeError>,
        /// Measurements taken before the failure.
        measurements: Vec<Measurement>,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success { .. } => EXIT_SUCCESS,
            Outcome::Rejected { .. } => EXIT_DATA_ERROR,
            Outcome::Failed { .. } => EXIT_SOFTWARE_ERROR,
        }
    }

    /// Measurements taken, including those before a runtime failure.
    pub fn measurements(&self) -> &[Measurement] {
        match self {
            Outcome::Success { measurements } | Outcome::Failed { measurements, .. } => {
                measurements
            }
            Outcome::Rejected { .. } => &[],
        }
    }

    /// One rendered line per error, in the order they were found.
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            Outcome::Success { .. } => Vec::new(),
            Outcome::Rejected { lexer, parser } => lexer
                .iter()
                .map(ToString::to_string)
                .chain(parser.iter().map(ToString::to_string))
                .collect(),
            Outcome::Failed { errors, .. } => errors.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Scan and parse `source`, stopping at the first stage with errors.
///
/// On failure the returned [`Outcome`] is always [`Outcome::Rejected`]. No
/// register is needed, so callers can defer opening one until the program
/// is known to be well formed.
#[instrument(skip_all, fields(bytes = source.len()))]
pub fn front_end(source: &str, grammar: &Grammar) -> Result<Vec<Statement>, Outcome> {
    let scanned = scan(source);
    if scanned.has_errors() {
        debug!(errors = scanned.errors.len(), "Halting after scan");
        return Err(Outcome::Rejected {
            lexer: scanned.errors,
            parser: Vec::new(),
        });
    }

    let parsed = parse(scanned.tokens, grammar);
    if parsed.has_errors() {
        debug!(errors = parsed.errors.len(), "Halting after parse");
        return Err(Outcome::Rejected {
            lexer: Vec::new(),
            parser: parsed.errors,
        });
    }

    Ok(parsed.statements)
}

/// Execute already parsed statements against `register`.
pub fn execute<R: QuantumRegister>(statements: &[Statement], register: R) -> Outcome {
    let mut bridge = Bridge::new(register);
    let errors = bridge.execute(statements);
    let measurements = bridge.measurements().to_vec();

    if errors.is_empty() {
        Outcome::Success { measurements }
    } else {
        Outcome::Failed {
            errors,
            measurements,
        }
    }
}

/// Run `source` against `register`.
pub fn run<R: QuantumRegister>(source: &str, grammar: &Grammar, register: R) -> Outcome {
    match front_end(source, grammar) {
        Ok(statements) => execute(&statements, register),
        Err(rejected) => rejected,
    }
}
