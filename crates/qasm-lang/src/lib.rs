//! Front end for the QASM gate assembly dialect.
//!
//! The dialect is one instruction per line, operands separated by commas and
//! `;` starting a line comment:
//!
//! ```text
//! ; Bell-ish preparation
//! H q1
//! R 0.785, q2
//! SqrtNOT q2
//! MEASURE
//! ```
//!
//! | Mnemonic | Statement | Operands |
//! |----------|-----------|----------|
//! | `X` | Pauli-X | `qN` |
//! | `Y` | Pauli-Y | `qN` |
//! | `Z` | Pauli-Z | `qN` |
//! | `H` | Hadamard | `qN` |
//! | `SqrtNOT` | square root of NOT | `qN` |
//! | `R` | phase shift | `phi, qN` |
//! | `MEASURE` | measure register | none |
//!
//! Scanning and parsing never abort on bad input: each stage returns what it
//! could build alongside the errors it collected.
//!
//! # Example
//!
//! ```rust
//! use qasm_lang::{Grammar, Statement, parse, scan};
//!
//! let scanned = scan("H q1\nMEASURE\n");
//! assert!(scanned.errors.is_empty());
//!
//! let grammar = Grammar::builtin().unwrap();
//! let parsed = parse(scanned.tokens, &grammar);
//! assert!(parsed.errors.is_empty());
//! assert_eq!(parsed.statements.len(), 2);
//! assert_eq!(parsed.statements[1], Statement::Measure);
//! ```

mod ast;
mod error;
mod grammar;
mod parser;
mod scanner;
mod token;

pub use ast::{Statement, StatementVisitor};
pub use error::{GrammarError, GrammarResult, LexError, LexErrorKind, ParseError};
pub use grammar::{Grammar, GrammarRule, GrammarSlot};
pub use parser::{ParseOutput, Parser, parse};
pub use scanner::{ScanOutput, Scanner, scan};
pub use token::{Literal, Token, TokenKind, keyword};
