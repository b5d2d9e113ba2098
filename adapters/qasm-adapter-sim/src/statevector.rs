//! Statevector simulation engine.
//!
//! Qubits here are 0-indexed bit positions of the basis-state index.

use num_complex::Complex64;
use rand::Rng;

/// Amplitudes of an `n`-qubit pure state.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self { amplitudes }
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|amp| amp.norm_sqr()).collect()
    }

    pub fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    pub fn apply_y(&mut self, qubit: usize) {
        let i_val = Complex64::new(0.0, 1.0);
        self.apply_pairwise(qubit, |a, b| (-i_val * b, i_val * a));
    }

    pub fn apply_z(&mut self, qubit: usize) {
        self.apply_phase(qubit, std::f64::consts::PI);
    }

    pub fn apply_h(&mut self, qubit: usize) {
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        self.apply_pairwise(qubit, |a, b| (sqrt2_inv * (a + b), sqrt2_inv * (a - b)));
    }

    /// Square root of NOT: `½ [[1+i, 1-i], [1-i, 1+i]]`.
    pub fn apply_sqrt_not(&mut self, qubit: usize) {
        let p = Complex64::new(0.5, 0.5);
        let m = Complex64::new(0.5, -0.5);
        self.apply_pairwise(qubit, |a, b| (p * a + m * b, m * a + p * b));
    }

    /// Phase shift `diag(1, e^{iθ})`.
    pub fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    /// Apply a 2x2 update to every amplitude pair differing only in `qubit`.
    fn apply_pairwise(
        &mut self,
        qubit: usize,
        update: impl Fn(Complex64, Complex64) -> (Complex64, Complex64),
    ) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let (a, b) = update(self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = a;
                self.amplitudes[j] = b;
            }
        }
    }

    /// Sample a basis state from the amplitude distribution.
    pub fn sample(&self, rng: &mut impl Rng) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Rounding can leave the total slightly under 1.
        self.amplitudes
            .iter()
            .rposition(|amp| amp.norm_sqr() > 0.0)
            .unwrap_or(0)
    }

    /// Project onto basis state `outcome`.
    pub fn collapse(&mut self, outcome: usize) {
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp = if i == outcome {
                Complex64::new(1.0, 0.0)
            } else {
                Complex64::new(0.0, 0.0)
            };
        }
    }
}
