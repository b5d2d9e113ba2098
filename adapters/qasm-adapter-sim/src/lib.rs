//! Local statevector register for the QASM interpreter.
//!
//! Holds the full `2^n` amplitude vector, so results are exact up to the
//! randomness of measurement. Memory doubles with every qubit:
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 16 | ~1 MB |
//! | 20 | ~16 MB |
//! | 24 | ~256 MB |
//!
//! # Example
//!
//! ```rust
//! use qasm_adapter_sim::StatevectorRegister;
//! use qasm_bridge::QuantumRegister;
//!
//! let mut register = StatevectorRegister::with_seed(2, 7).unwrap();
//! register.apply_x(2).unwrap();
//! assert_eq!(register.measure().unwrap().to_string(), "01");
//! ```

mod register;
mod statevector;

pub use register::{MAX_QUBITS, StatevectorRegister};
