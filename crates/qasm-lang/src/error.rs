//! Error types for scanning, grammar loading and parsing.

use std::fmt;

use thiserror::Error;

use crate::token::{Token, TokenKind};

/// What went wrong while scanning.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum LexErrorKind {
    /// The source contained no characters at all.
    #[error("source is empty")]
    EmptySource,

    /// A character that cannot start any token.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// A `q` marker not followed by a valid integer.
    #[error("invalid qubit index in '{0}'")]
    InvalidQubit(String),

    /// A numeric literal whose value is not a finite float.
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    /// A word that is not an instruction mnemonic.
    #[error("invalid instruction '{0}'")]
    InvalidInstruction(String),
}

/// A non-fatal lexical error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[LexerError] line {line}: {kind}")]
pub struct LexError {
    pub line: usize,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(line: usize, kind: LexErrorKind) -> Self {
        Self { line, kind }
    }
}

/// A non-fatal syntax error at a specific token.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl ParseError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        Self {
            token,
            message: message.into(),
        }
    }

    pub fn line(&self) -> usize {
        self.token.line()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.token.is_eof() {
            write!(
                f,
                "[ParseError] line {} at end: {}",
                self.token.line(),
                self.message
            )
        } else {
            write!(
                f,
                "[ParseError] line {} at '{}': {}",
                self.token.line(),
                self.token.lexeme(),
                self.message
            )
        }
    }
}

/// Fatal errors in the grammar table itself.
///
/// These describe a broken parser configuration, not a broken program.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GrammarError {
    /// The grammar file could not be read.
    #[error("Failed to read grammar from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The grammar document is not valid JSON or names unknown kinds.
    #[error("Malformed grammar: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A rule is keyed by something that is not a gate keyword.
    #[error("Grammar rule keyed by non-gate token kind {0:?}")]
    NotAnInstruction(TokenKind),

    /// The same gate keyword appears twice in the table.
    #[error("Grammar has more than one rule for instruction {0:?}")]
    DuplicateRule(TokenKind),

    /// A gate keyword has no rule.
    #[error("Grammar has no rule for instruction {0:?}")]
    MissingRule(TokenKind),

    /// A slot expects a token that can never follow a keyword.
    #[error("Rule for {instruction:?} expects {expected:?} in slot {slot}")]
    InvalidSlot {
        instruction: TokenKind,
        slot: usize,
        expected: TokenKind,
    },

    /// The operand slots do not line up with the instruction's fields.
    #[error("Rule for {instruction:?} has operands {found:?}, expected {expected:?}")]
    SignatureMismatch {
        instruction: TokenKind,
        expected: Vec<TokenKind>,
        found: Vec<TokenKind>,
    },
}

/// Result type for grammar loading.
pub type GrammarResult<T> = Result<T, GrammarError>;
