//! [`QuantumRegister`] backed by a [`Statevector`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument, trace};

use qasm_bridge::{Measurement, QuantumRegister, RegisterError, RegisterResult};

use crate::statevector::Statevector;

/// Largest register the simulator will allocate (2^24 amplitudes, 256 MiB).
pub const MAX_QUBITS: u32 = 24;

/// Local statevector register.
///
/// Qubit `k` (1-indexed) is bit `k - 1` of the basis-state index.
pub struct StatevectorRegister {
    state: Statevector,
    num_qubits: u32,
    rng: StdRng,
}

impl StatevectorRegister {
    /// Open a register of `num_qubits` qubits in |0...0⟩.
    pub fn new(num_qubits: u32) -> RegisterResult<Self> {
        Self::with_rng(num_qubits, StdRng::from_entropy())
    }

    /// Open a register whose measurements are reproducible for `seed`.
    pub fn with_seed(num_qubits: u32, seed: u64) -> RegisterResult<Self> {
        Self::with_rng(num_qubits, StdRng::seed_from_u64(seed))
    }

    fn with_rng(num_qubits: u32, rng: StdRng) -> RegisterResult<Self> {
        if num_qubits == 0 {
            return Err(RegisterError::Empty);
        }
        if num_qubits > MAX_QUBITS {
            return Err(RegisterError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }

        debug!(
            qubits = num_qubits,
            amplitudes = 1_usize << num_qubits,
            "Allocated statevector"
        );
        Ok(Self {
            state: Statevector::new(num_qubits as usize),
            num_qubits,
            rng,
        })
    }

    /// Probability of each basis state, indexed like [`Measurement::outcome`].
    pub fn probabilities(&self) -> Vec<f64> {
        self.state.probabilities()
    }

    /// Map a 1-indexed qubit to its bit position.
    fn bit(&self, qubit: u32) -> RegisterResult<usize> {
        if qubit == 0 || qubit > self.num_qubits {
            return Err(RegisterError::QubitOutOfRange {
                qubit,
                size: self.num_qubits,
            });
        }
        Ok((qubit - 1) as usize)
    }
}

impl QuantumRegister for StatevectorRegister {
    fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    fn apply_x(&mut self, qubit: u32) -> RegisterResult<()> {
        let bit = self.bit(qubit)?;
        trace!(qubit, "X");
        self.state.apply_x(bit);
        Ok(())
    }

    fn apply_y(&mut self, qubit: u32) -> RegisterResult<()> {
        let bit = self.bit(qubit)?;
        trace!(qubit, "Y");
        self.state.apply_y(bit);
        Ok(())
    }

    fn apply_z(&mut self, qubit: u32) -> RegisterResult<()> {
        let bit = self.bit(qubit)?;
        trace!(qubit, "Z");
        self.state.apply_z(bit);
        Ok(())
    }

    fn apply_hadamard(&mut self, qubit: u32) -> RegisterResult<()> {
        let bit = self.bit(qubit)?;
        trace!(qubit, "H");
        self.state.apply_h(bit);
        Ok(())
    }

    fn apply_sqrt_not(&mut self, qubit: u32) -> RegisterResult<()> {
        let bit = self.bit(qubit)?;
        trace!(qubit, "SqrtNOT");
        self.state.apply_sqrt_not(bit);
        Ok(())
    }

    fn apply_phase_shift(&mut self, qubit: u32, phi: f64) -> RegisterResult<()> {
        let bit = self.bit(qubit)?;
        if !phi.is_finite() {
            return Err(RegisterError::InvalidAngle(phi));
        }
        trace!(qubit, phi, "R");
        self.state.apply_phase(bit, phi);
        Ok(())
    }

    #[instrument(skip(self), fields(qubits = self.num_qubits))]
    fn measure(&mut self) -> RegisterResult<Measurement> {
        let outcome = self.state.sample(&mut self.rng);
        self.state.collapse(outcome);

        let measurement = Measurement::from_outcome(outcome, self.num_qubits);
        debug!(outcome, bits = %measurement, "Collapsed statevector");
        Ok(measurement)
    }
}
