//! The quantum register contract the bridge executes against.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by a register implementation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RegisterError {
    /// Qubit index outside `1..=size`.
    #[error("Qubit {qubit} out of range for register of {size} qubits")]
    QubitOutOfRange { qubit: u32, size: u32 },

    /// A register needs at least one qubit.
    #[error("Register must have at least one qubit")]
    Empty,

    /// Requested size is beyond what the implementation can hold.
    #[error("Register of {requested} qubits exceeds maximum of {max}")]
    TooManyQubits { requested: u32, max: u32 },

    /// Phase angle is not a finite number.
    #[error("Invalid phase angle: {0}")]
    InvalidAngle(f64),

    /// Implementation-specific failure.
    #[error("Register failure: {0}")]
    Backend(String),
}

/// Result type for register operations.
pub type RegisterResult<T> = Result<T, RegisterError>;

/// Outcome of measuring the whole register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Measured value of each qubit, qubit 1 first.
    bits: Vec<bool>,
}

impl Measurement {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Build from a basis-state index where qubit `k` is bit `k - 1`.
    pub fn from_outcome(outcome: usize, num_qubits: u32) -> Self {
        let bits = (0..num_qubits).map(|k| outcome >> k & 1 == 1).collect();
        Self { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Measured value of a 1-indexed qubit.
    pub fn qubit(&self, qubit: u32) -> Option<bool> {
        let index = usize::try_from(qubit).ok()?.checked_sub(1)?;
        self.bits.get(index).copied()
    }

    /// Basis-state index, the inverse of [`Measurement::from_outcome`].
    pub fn outcome(&self) -> usize {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, bit)| **bit)
            .fold(0, |acc, (k, _)| acc | 1 << k)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", u8::from(*bit))?;
        }
        Ok(())
    }
}

/// A register of `num_qubits` qubits addressed `1..=num_qubits`.
///
/// Every operation takes `&mut self`: a register has exactly one owner for
/// the duration of a program run.
pub trait QuantumRegister {
    /// Number of qubits the register was opened with.
    fn num_qubits(&self) -> u32;

    /// Pauli-X on `qubit`.
    fn apply_x(&mut self, qubit: u32) -> RegisterResult<()>;

    /// Pauli-Y on `qubit`.
    fn apply_y(&mut self, qubit: u32) -> RegisterResult<()>;

    /// Pauli-Z on `qubit`.
    fn apply_z(&mut self, qubit: u32) -> RegisterResult<()>;

    /// Hadamard on `qubit`.
    fn apply_hadamard(&mut self, qubit: u32) -> RegisterResult<()>;

    /// Square root of NOT on `qubit`.
    fn apply_sqrt_not(&mut self, qubit: u32) -> RegisterResult<()>;

    /// Phase rotation by `phi` radians on `qubit`.
    fn apply_phase_shift(&mut self, qubit: u32, phi: f64) -> RegisterResult<()>;

    /// Sample and collapse the register.
    fn measure(&mut self) -> RegisterResult<Measurement>;
}

impl<R: QuantumRegister + ?Sized> QuantumRegister for &mut R {
    fn num_qubits(&self) -> u32 {
        (**self).num_qubits()
    }

    fn apply_x(&mut self, qubit: u32) -> RegisterResult<()> {
        (**self).apply_x(qubit)
    }

    fn apply_y(&mut self, qubit: u32) -> RegisterResult<()> {
        (**self).apply_y(qubit)
    }

    fn apply_z(&mut self, qubit: u32) -> RegisterResult<()> {
        (**self).apply_z(qubit)
    }

    fn apply_hadamard(&mut self, qubit: u32) -> RegisterResult<()> {
        (**self).apply_hadamard(qubit)
    }

    fn apply_sqrt_not(&mut self, qubit: u32) -> RegisterResult<()> {
        (**self).apply_sqrt_not(qubit)
    }

    fn apply_phase_shift(&mut self, qubit: u32, phi: f64) -> RegisterResult<()> {
        (**self).apply_phase_shift(qubit, phi)
    }

    fn measure(&mut self) -> RegisterResult<Measurement> {
        (**self).measure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_from_outcome() {
        // 0b011: qubits 1 and 2 set, qubit 3 clear
        let m = Measurement::from_outcome(0b011, 3);
        assert_eq!(m.bits(), &[true, true, false]);
        assert_eq!(m.to_string(), "110");
        assert_eq!(m.outcome(), 0b011);
    }

    #[test]
    fn test_measurement_qubit_lookup() {
        let m = Measurement::new(vec![false, true]);
        assert_eq!(m.qubit(1), Some(false));
        assert_eq!(m.qubit(2), Some(true));
        assert_eq!(m.qubit(0), None);
        assert_eq!(m.qubit(3), None);
    }
}
