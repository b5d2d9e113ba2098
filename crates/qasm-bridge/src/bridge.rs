//! Statement interpreter.

use qasm_lang::{Statement, StatementVisitor, Token};
use tracing::{debug, info, instrument, warn};

use crate::error::RuntimeError;
use crate::register::{Measurement, QuantumRegister, RegisterError};

/// Why a single statement could not be executed.
///
/// Converted to a [`RuntimeError`] once the failing statement is known.
#[derive(Debug)]
pub enum Fault {
    OutOfRange(Token),
    NotANumber(Token),
    Register(RegisterError),
}

impl From<RegisterError> for Fault {
    fn from(err: RegisterError) -> Self {
        Fault::Register(err)
    }
}

/// Executes statements against an exclusively owned register.
pub struct Bridge<R: QuantumRegister> {
    register: R,
    measurements: Vec<Measurement>,
}

impl<R: QuantumRegister> Bridge<R> {
    pub fn new(register: R) -> Self {
        Self {
            register,
            measurements: Vec::new(),
        }
    }

    /// Execute `statements` in order, stopping at the first failure.
    ///
    /// The returned list is empty on success and holds exactly one error
    /// otherwise; statements after the failing one are never dispatched.
    #[instrument(skip_all, fields(statements = statements.len(), qubits = self.register.num_qubits()))]
    pub fn execute(&mut self, statements: &[Statement]) -> Vec<RuntimeError> {
        let result = statements.iter().try_for_each(|statement| {
            statement
                .accept(self)
                .map_err(|fault| self.runtime_error(statement, fault))
        });

        match result {
            Ok(()) => {
                debug!(measurements = self.measurements.len(), "Execution complete");
                Vec::new()
            }
            Err(error) => {
                warn!(%error, "Execution halted");
                vec![error]
            }
        }
    }

    /// Measurements taken so far, in program order.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn register(&self) -> &R {
        &self.register
    }

    pub fn into_register(self) -> R {
        self.register
    }

    fn runtime_error(&self, statement: &Statement, fault: Fault) -> RuntimeError {
        match fault {
            Fault::OutOfRange(token) => RuntimeError::QubitOutOfRange {
                token,
                qubits: self.register.num_qubits(),
            },
            Fault::NotANumber(token) => RuntimeError::InvalidAngle { token },
            Fault::Register(source) => RuntimeError::Register {
                statement: statement.to_string(),
                source,
            },
        }
    }

    /// Resolve a qubit operand to an index in `1..=n`.
    fn qubit(&self, token: &Token) -> Result<u32, Fault> {
        let n = self.register.num_qubits();
        match token.qubit_index() {
            Some(index) if (1..=n).contains(&index) => Ok(index),
            _ => Err(Fault::OutOfRange(token.clone())),
        }
    }
}

impl<R: QuantumRegister> StatementVisitor for Bridge<R> {
    type Output = Result<(), Fault>;

    fn visit_pauli_x(&mut self, qubit: &Token) -> Self::Output {
        let q = self.qubit(qubit)?;
        Ok(self.register.apply_x(q)?)
    }

    fn visit_pauli_y(&mut self, qubit: &Token) -> Self::Output {
        let q = self.qubit(qubit)?;
        Ok(self.register.apply_y(q)?)
    }

    fn visit_pauli_z(&mut self, qubit: &Token) -> Self::Output {
        let q = self.qubit(qubit)?;
        Ok(self.register.apply_z(q)?)
    }

    fn visit_hadamard(&mut self, qubit: &Token) -> Self::Output {
        let q = self.qubit(qubit)?;
        Ok(self.register.apply_hadamard(q)?)
    }

    fn visit_sqrt_not(&mut self, qubit: &Token) -> Self::Output {
        let q = self.qubit(qubit)?;
        Ok(self.register.apply_sqrt_not(q)?)
    }

    fn visit_phase_shift(&mut self, phi: &Token, qubit: &Token) -> Self::Output {
        let q = self.qubit(qubit)?;
        let angle = phi
            .number_value()
            .ok_or_else(|| Fault::NotANumber(phi.clone()))?;
        Ok(self.register.apply_phase_shift(q, angle)?)
    }

    fn visit_measure(&mut self) -> Self::Output {
        let measurement = self.register.measure()?;
        info!(result = %measurement, "Measured register");
        self.measurements.push(measurement);
        Ok(())
    }
}
