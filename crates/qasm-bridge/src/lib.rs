//! Execution of parsed QASM programs against a quantum register.
//!
//! The [`Bridge`] walks a statement list, checks every qubit operand against
//! the register size and forwards each gate to a [`QuantumRegister`]. The first
//! failure halts the run. [`pipeline::run`] chains scanning, parsing and
//! execution with the same stop-at-first-failing-stage rule.
//!
//! # Example
//!
//! ```rust,ignore
//! use qasm_bridge::pipeline;
//! use qasm_lang::Grammar;
//!
//! let grammar = Grammar::builtin()?;
//! let outcome = pipeline::run("H q1\nMEASURE\n", &grammar, register);
//! std::process::exit(outcome.exit_code());
//! ```

mod bridge;
mod error;
pub mod pipeline;
mod register;

pub use bridge::{Bridge, Fault};
pub use error::RuntimeError;
pub use pipeline::Outcome;
pub use register::{Measurement, QuantumRegister, RegisterError, RegisterResult};
