//! Runtime errors raised while executing statements.

use std::fmt;

use qasm_lang::Token;
use thiserror::Error;

use crate::register::RegisterError;

/// The single fatal error that halts execution.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RuntimeError {
    /// A qubit operand outside `1..=qubits`.
    QubitOutOfRange { token: Token, qubits: u32 },

    /// A phase-shift angle operand without a numeric value.
    InvalidAngle { token: Token },

    /// The register rejected an operation.
    Register {
        /// Rendered form of the statement that failed.
        statement: String,
        #[source]
        source: RegisterError,
    },
}

impl RuntimeError {
    /// Source line of the failure, when it is tied to a token.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::QubitOutOfRange { token, .. } | Self::InvalidAngle { token } => {
                Some(token.line())
            }
            Self::Register { .. } => None,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QubitOutOfRange { token, qubits } => write!(
                f,
                "[RuntimeError] line {} at '{}': qubit index out of range (register has {} qubits)",
                token.line(),
                token.lexeme(),
                qubits
            ),
            Self::InvalidAngle { token } => write!(
                f,
                "[RuntimeError] line {} at '{}': angle operand is not a number",
                token.line(),
                token.lexeme()
            ),
            Self::Register { statement, source } => {
                write!(f, "[RuntimeError] in '{statement}': {source}")
            }
        }
    }
}
