//! Token model for the gate assembly dialect.

use std::fmt;

use logos::Logos;
use serde::{Deserialize, Serialize};

/// Classification of a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Qubit reference: `q1`, `q2`, ...
    Qubit,
    /// Numeric literal: `3`, `0.5`.
    Number,
    /// Operand separator.
    Comma,
    /// End-of-input sentinel, always the last token.
    #[serde(rename = "EOF")]
    Eof,

    // Instruction keywords
    PauliX,
    PauliY,
    PauliZ,
    Hadamard,
    PhaseShift,
    SqrtNot,
    Measure,
}

impl TokenKind {
    /// All instruction keyword kinds.
    pub const INSTRUCTIONS: [TokenKind; 7] = [
        TokenKind::PauliX,
        TokenKind::PauliY,
        TokenKind::PauliZ,
        TokenKind::Hadamard,
        TokenKind::PhaseShift,
        TokenKind::SqrtNot,
        TokenKind::Measure,
    ];

    /// Whether this kind is an instruction keyword.
    pub fn is_instruction(self) -> bool {
        Self::INSTRUCTIONS.contains(&self)
    }

    /// Whether this kind can appear as an operand or separator after a keyword.
    pub fn is_operand(self) -> bool {
        matches!(self, TokenKind::Qubit | TokenKind::Number | TokenKind::Comma)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Qubit => write!(f, "qubit"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::PauliX => write!(f, "X"),
            TokenKind::PauliY => write!(f, "Y"),
            TokenKind::PauliZ => write!(f, "Z"),
            TokenKind::Hadamard => write!(f, "H"),
            TokenKind::PhaseShift => write!(f, "R"),
            TokenKind::SqrtNot => write!(f, "SqrtNOT"),
            TokenKind::Measure => write!(f, "MEASURE"),
        }
    }
}

/// Instruction mnemonics, matched against a complete alphanumeric word.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    #[token("X")]
    PauliX,

    #[token("Y")]
    PauliY,

    #[token("Z")]
    PauliZ,

    #[token("H")]
    Hadamard,

    #[token("R")]
    PhaseShift,

    #[token("SqrtNOT")]
    SqrtNot,

    #[token("MEASURE")]
    Measure,
}

impl From<Keyword> for TokenKind {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::PauliX => TokenKind::PauliX,
            Keyword::PauliY => TokenKind::PauliY,
            Keyword::PauliZ => TokenKind::PauliZ,
            Keyword::Hadamard => TokenKind::Hadamard,
            Keyword::PhaseShift => TokenKind::PhaseShift,
            Keyword::SqrtNot => TokenKind::SqrtNot,
            Keyword::Measure => TokenKind::Measure,
        }
    }
}

/// Look up an instruction keyword.
///
/// Returns `None` unless the whole word is a single mnemonic, so `XY` and
/// `MEASURED` are rejected.
pub fn keyword(word: &str) -> Option<TokenKind> {
    let mut lexer = Keyword::lexer(word);
    let keyword = lexer.next()?.ok()?;
    (lexer.span() == (0..word.len())).then(|| keyword.into())
}

/// Typed literal value carried by operand tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Qubit index as written (1-indexed).
    Integer(u32),
    /// Numeric operand.
    Float(f64),
}

/// A classified lexeme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    literal: Option<Literal>,
    line: usize,
}

impl Token {
    /// Create a token without a literal.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
        }
    }

    /// Create a token carrying a typed literal.
    pub fn with_literal(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: Literal,
        line: usize,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: Some(literal),
            line,
        }
    }

    /// Create a qubit reference token.
    pub fn qubit(index: u32, line: usize) -> Self {
        Self {
            kind: TokenKind::Qubit,
            lexeme: format!("q{index}"),
            literal: Some(Literal::Integer(index)),
            line,
        }
    }

    /// Create a numeric token from its lexeme and parsed value.
    pub fn number(lexeme: impl Into<String>, value: f64, line: usize) -> Self {
        Self {
            kind: TokenKind::Number,
            lexeme: lexeme.into(),
            literal: Some(Literal::Float(value)),
            line,
        }
    }

    /// Create the end-of-input sentinel.
    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn literal(&self) -> Option<Literal> {
        self.literal
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// The qubit index of a qubit token.
    pub fn qubit_index(&self) -> Option<u32> {
        match self.literal {
            Some(Literal::Integer(index)) => Some(index),
            _ => None,
        }
    }

    /// The value of a numeric token.
    pub fn number_value(&self) -> Option<f64> {
        match self.literal {
            Some(Literal::Float(value)) => Some(value),
            _ => None,
        }
    }

    /// Whether this is the end-of-input sentinel.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "end of input")
        } else {
            write!(f, "{}", self.lexeme)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(keyword("X"), Some(TokenKind::PauliX));
        assert_eq!(keyword("H"), Some(TokenKind::Hadamard));
        assert_eq!(keyword("R"), Some(TokenKind::PhaseShift));
        assert_eq!(keyword("SqrtNOT"), Some(TokenKind::SqrtNot));
        assert_eq!(keyword("MEASURE"), Some(TokenKind::Measure));
    }

    #[test]
    fn test_keyword_requires_whole_word() {
        assert_eq!(keyword("XY"), None);
        assert_eq!(keyword("MEASURED"), None);
        assert_eq!(keyword("sqrtnot"), None);
        assert_eq!(keyword("x"), None);
        assert_eq!(keyword(""), None);
    }

    #[test]
    fn test_literal_accessors() {
        let qubit = Token::qubit(3, 1);
        assert_eq!(qubit.kind(), TokenKind::Qubit);
        assert_eq!(qubit.lexeme(), "q3");
        assert_eq!(qubit.qubit_index(), Some(3));
        assert_eq!(qubit.number_value(), None);

        let number = Token::number("0.5", 0.5, 2);
        assert_eq!(number.number_value(), Some(0.5));
        assert_eq!(number.qubit_index(), None);
        assert_eq!(number.line(), 2);
    }

    #[test]
    fn test_instruction_kinds() {
        assert!(TokenKind::Measure.is_instruction());
        assert!(!TokenKind::Comma.is_instruction());
        assert!(TokenKind::Comma.is_operand());
        assert!(!TokenKind::Eof.is_operand());
    }
}
