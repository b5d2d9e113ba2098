//! Statement AST for the gate assembly dialect.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::{Token, TokenKind};

const SINGLE_QUBIT: &[TokenKind] = &[TokenKind::Qubit];
const PHASE_SHIFT: &[TokenKind] = &[TokenKind::Number, TokenKind::Qubit];
const NO_OPERANDS: &[TokenKind] = &[];

/// One parsed instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Pauli-X: `X q1`
    PauliX { qubit: Token },

    /// Pauli-Y: `Y q1`
    PauliY { qubit: Token },

    /// Pauli-Z: `Z q1`
    PauliZ { qubit: Token },

    /// Hadamard: `H q1`
    Hadamard { qubit: Token },

    /// Square root of NOT: `SqrtNOT q1`
    SqrtNot { qubit: Token },

    /// Phase shift by `phi` radians: `R 0.5, q1`
    PhaseShift { phi: Token, qubit: Token },

    /// Measure the whole register: `MEASURE`
    Measure,
}

impl Statement {
    /// Build a statement for `instruction` from its operand tokens in slot order.
    ///
    /// Returns `None` when the operands do not match the instruction's fields.
    pub fn from_operands(instruction: TokenKind, operands: Vec<Token>) -> Option<Self> {
        let mut operands = operands.into_iter();
        let statement = match instruction {
            TokenKind::PauliX => Statement::PauliX {
                qubit: operands.next()?,
            },
            TokenKind::PauliY => Statement::PauliY {
                qubit: operands.next()?,
            },
            TokenKind::PauliZ => Statement::PauliZ {
                qubit: operands.next()?,
            },
            TokenKind::Hadamard => Statement::Hadamard {
                qubit: operands.next()?,
            },
            TokenKind::SqrtNot => Statement::SqrtNot {
                qubit: operands.next()?,
            },
            TokenKind::PhaseShift => Statement::PhaseShift {
                phi: operands.next()?,
                qubit: operands.next()?,
            },
            TokenKind::Measure => Statement::Measure,
            TokenKind::Qubit | TokenKind::Number | TokenKind::Comma | TokenKind::Eof => {
                return None;
            }
        };

        if operands.next().is_some() {
            return None;
        }
        statement.is_well_formed().then_some(statement)
    }

    /// Operand kinds, in slot order, that `instruction` is built from.
    pub fn signature(instruction: TokenKind) -> Option<&'static [TokenKind]> {
        match instruction {
            TokenKind::PauliX
            | TokenKind::PauliY
            | TokenKind::PauliZ
            | TokenKind::Hadamard
            | TokenKind::SqrtNot => Some(SINGLE_QUBIT),
            TokenKind::PhaseShift => Some(PHASE_SHIFT),
            TokenKind::Measure => Some(NO_OPERANDS),
            TokenKind::Qubit | TokenKind::Number | TokenKind::Comma | TokenKind::Eof => None,
        }
    }

    /// The keyword kind this statement was parsed from.
    pub fn instruction(&self) -> TokenKind {
        match self {
            Statement::PauliX { .. } => TokenKind::PauliX,
            Statement::PauliY { .. } => TokenKind::PauliY,
            Statement::PauliZ { .. } => TokenKind::PauliZ,
            Statement::Hadamard { .. } => TokenKind::Hadamard,
            Statement::SqrtNot { .. } => TokenKind::SqrtNot,
            Statement::PhaseShift { .. } => TokenKind::PhaseShift,
            Statement::Measure => TokenKind::Measure,
        }
    }

    /// The qubit operand, if the statement has one.
    pub fn qubit(&self) -> Option<&Token> {
        match self {
            Statement::PauliX { qubit }
            | Statement::PauliY { qubit }
            | Statement::PauliZ { qubit }
            | Statement::Hadamard { qubit }
            | Statement::SqrtNot { qubit }
            | Statement::PhaseShift { qubit, .. } => Some(qubit),
            Statement::Measure => None,
        }
    }

    /// Dispatch to the visitor method for this variant.
    pub fn accept<V: StatementVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Statement::PauliX { qubit } => visitor.visit_pauli_x(qubit),
            Statement::PauliY { qubit } => visitor.visit_pauli_y(qubit),
            Statement::PauliZ { qubit } => visitor.visit_pauli_z(qubit),
            Statement::Hadamard { qubit } => visitor.visit_hadamard(qubit),
            Statement::SqrtNot { qubit } => visitor.visit_sqrt_not(qubit),
            Statement::PhaseShift { phi, qubit } => visitor.visit_phase_shift(phi, qubit),
            Statement::Measure => visitor.visit_measure(),
        }
    }

    fn is_well_formed(&self) -> bool {
        let qubit_ok = self
            .qubit()
            .is_none_or(|q| q.kind() == TokenKind::Qubit && q.qubit_index().is_some());
        let phi_ok = match self {
            Statement::PhaseShift { phi, .. } => {
                phi.kind() == TokenKind::Number && phi.number_value().is_some()
            }
            _ => true,
        };
        qubit_ok && phi_ok
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::PhaseShift { phi, qubit } => write!(f, "R {phi}, {qubit}"),
            Statement::Measure => write!(f, "MEASURE"),
            other => match other.qubit() {
                Some(qubit) => write!(f, "{} {qubit}", other.instruction()),
                None => write!(f, "{}", other.instruction()),
            },
        }
    }
}

/// Double-dispatch hook over [`Statement`] variants.
///
/// Adding a variant forces every visitor to handle it.
pub trait StatementVisitor {
    type Output;

    fn visit_pauli_x(&mut self, qubit: &Token) -> Self::Output;
    fn visit_pauli_y(&mut self, qubit: &Token) -> Self::Output;
    fn visit_pauli_z(&mut self, qubit: &Token) -> Self::Output;
    fn visit_hadamard(&mut self, qubit: &Token) -> Self::Output;
    fn visit_sqrt_not(&mut self, qubit: &Token) -> Self::Output;
    fn visit_phase_shift(&mut self, phi: &Token, qubit: &Token) -> Self::Output;
    fn visit_measure(&mut self) -> Self::Output;
}
