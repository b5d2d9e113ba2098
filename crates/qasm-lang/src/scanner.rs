//! Scanner for the gate assembly dialect.
//!
//! A single left-to-right pass over the source with a `start` cursor at the
//! beginning of the current lexeme and a `current` cursor at the scan
//! position. Errors are collected and never stop the scan.

use tracing::{debug, instrument, trace};

use crate::error::{LexError, LexErrorKind};
use crate::token::{Literal, Token, TokenKind, keyword};

/// Tokens produced by a scan together with the lexical errors found.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Successfully scanned tokens, always terminated by exactly one `Eof`.
    pub tokens: Vec<Token>,
    /// Lexical errors in source order.
    pub errors: Vec<LexError>,
}

impl ScanOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Scan a source string into tokens.
#[instrument(skip_all, fields(len = source.len()))]
pub fn scan(source: &str) -> ScanOutput {
    let output = Scanner::new(source).scan_tokens();
    debug!(
        tokens = output.tokens.len(),
        errors = output.errors.len(),
        "Scan complete"
    );
    output
}

/// Scanner state.
pub struct Scanner<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
    start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `source`.
    pub fn new(source: &'a str) -> Self {
        let mut scanner = Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        };
        if source.is_empty() {
            scanner.error(LexErrorKind::EmptySource);
        }
        scanner
    }

    /// Consume the scanner, producing the token stream and collected errors.
    pub fn scan_tokens(mut self) -> ScanOutput {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.line));
        ScanOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn scan_token(&mut self) {
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\r' => {}
            '\n' => self.line += 1,
            ';' => {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
            }
            ',' => self.add_token(TokenKind::Comma, None),
            'q' => self.qubit(),
            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() => self.instruction(),
            other => self.error(LexErrorKind::UnexpectedCharacter(other)),
        }
    }

    /// `q` followed by the digits of a qubit index.
    fn qubit(&mut self) {
        self.advance_while(|c| c.is_ascii_digit());

        // `q` is ASCII, so `start + 1` is a char boundary.
        let digits = &self.lexeme()[1..];
        match digits.parse::<u32>() {
            Ok(index) => self.add_token(TokenKind::Qubit, Some(Literal::Integer(index))),
            Err(_) => self.error(LexErrorKind::InvalidQubit(self.lexeme().to_string())),
        }
    }

    /// `digits ['.' digits]`
    fn number(&mut self) {
        self.advance_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
        }

        match self.lexeme().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                self.add_token(TokenKind::Number, Some(Literal::Float(value)));
            }
            _ => self.error(LexErrorKind::InvalidNumber(self.lexeme().to_string())),
        }
    }

    /// Maximal alphanumeric run, looked up in the keyword table.
    fn instruction(&mut self) {
        self.advance_while(char::is_alphanumeric);

        let word = self.lexeme();
        match keyword(word) {
            Some(kind) => self.add_token(kind, None),
            None => self.error(LexErrorKind::InvalidInstruction(word.to_string())),
        }
    }

    fn add_token(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let lexeme = self.lexeme().to_string();
        let token = match literal {
            Some(literal) => Token::with_literal(kind, lexeme, literal, self.line),
            None => Token::new(kind, lexeme, self.line),
        };
        trace!(?token, "Scanned token");
        self.tokens.push(token);
    }

    fn error(&mut self, kind: LexErrorKind) {
        trace!(line = self.line, %kind, "Lexical error");
        self.errors.push(LexError::new(self.line, kind));
    }

    fn lexeme(&self) -> &'a str {
        let source: &'a str = self.source;
        &source[self.start..self.current]
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(output: &ScanOutput) -> Vec<TokenKind> {
        output.tokens.iter().map(Token::kind).collect()
    }

    #[test]
    fn test_gate_with_qubit() {
        let output = scan("H q1\nMEASURE\n");
        assert!(output.errors.is_empty());
        assert_eq!(
            kinds(&output),
            vec![
                TokenKind::Hadamard,
                TokenKind::Qubit,
                TokenKind::Measure,
                TokenKind::Eof
            ]
        );
        assert_eq!(output.tokens[1].qubit_index(), Some(1));
        assert_eq!(output.tokens[2].line(), 2);
        assert_eq!(output.tokens[3].line(), 3);
    }

    #[test]
    fn test_phase_shift_operands() {
        let output = scan("R 0.5, q3");
        assert!(output.errors.is_empty());
        assert_eq!(
            kinds(&output),
            vec![
                TokenKind::PhaseShift,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Qubit,
                TokenKind::Eof
            ]
        );
        assert_eq!(output.tokens[1].number_value(), Some(0.5));
        assert_eq!(output.tokens[1].lexeme(), "0.5");
        assert_eq!(output.tokens[3].qubit_index(), Some(3));
    }

    #[test]
    fn test_integer_number() {
        let output = scan("R 2, q1");
        assert_eq!(output.tokens[1].number_value(), Some(2.0));
    }

    #[test]
    fn test_trailing_dot_is_not_fraction() {
        // `3.` scans as the number 3 followed by an unexpected '.'
        let output = scan("3.");
        assert_eq!(kinds(&output), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, LexErrorKind::UnexpectedCharacter('.'));
    }

    #[test]
    fn test_comments_skipped() {
        let output = scan("; prepare\nX q1 ; flip\n;trailing");
        assert!(output.errors.is_empty());
        assert_eq!(
            kinds(&output),
            vec![TokenKind::PauliX, TokenKind::Qubit, TokenKind::Eof]
        );
        assert_eq!(output.tokens[0].line(), 2);
    }

    #[test]
    fn test_empty_source() {
        let output = scan("");
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, LexErrorKind::EmptySource);
        assert_eq!(kinds(&output), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_unexpected_character_recovers() {
        let output = scan("X q1 $ Y q2");
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, LexErrorKind::UnexpectedCharacter('$'));
        assert_eq!(
            kinds(&output),
            vec![
                TokenKind::PauliX,
                TokenKind::Qubit,
                TokenKind::PauliY,
                TokenKind::Qubit,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_bare_qubit_marker() {
        let output = scan("X q");
        assert_eq!(output.errors.len(), 1);
        assert_eq!(
            output.errors[0].kind,
            LexErrorKind::InvalidQubit("q".into())
        );
        assert_eq!(kinds(&output), vec![TokenKind::PauliX, TokenKind::Eof]);
    }

    #[test]
    fn test_qubit_index_overflow() {
        let output = scan("X q99999999999");
        assert_eq!(output.errors.len(), 1);
        assert!(matches!(output.errors[0].kind, LexErrorKind::InvalidQubit(_)));
    }

    #[test]
    fn test_number_overflow() {
        let digits = "9".repeat(400);
        let output = scan(&format!("R {digits}, q1"));

        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, LexErrorKind::InvalidNumber(digits));
        assert_eq!(
            kinds(&output),
            vec![
                TokenKind::PhaseShift,
                TokenKind::Comma,
                TokenKind::Qubit,
                TokenKind::Eof
            ]
        );
        assert!(
            output
                .tokens
                .iter()
                .all(|t| t.number_value().is_none_or(f64::is_finite))
        );
    }

    #[test]
    fn test_unknown_instruction() {
        let output = scan("CNOT q1, q2");
        assert_eq!(output.errors.len(), 1);
        assert_eq!(
            output.errors[0].kind,
            LexErrorKind::InvalidInstruction("CNOT".into())
        );
        assert_eq!(
            kinds(&output),
            vec![
                TokenKind::Qubit,
                TokenKind::Comma,
                TokenKind::Qubit,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_all_keywords() {
        let output = scan("X Y Z H R SqrtNOT MEASURE");
        assert!(output.errors.is_empty());
        assert_eq!(
            kinds(&output),
            vec![
                TokenKind::PauliX,
                TokenKind::PauliY,
                TokenKind::PauliZ,
                TokenKind::Hadamard,
                TokenKind::PhaseShift,
                TokenKind::SqrtNot,
                TokenKind::Measure,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_non_ascii_character() {
        let output = scan("H q1 → X q2");
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, LexErrorKind::UnexpectedCharacter('→'));
        assert_eq!(output.tokens.len(), 5);
    }
}
