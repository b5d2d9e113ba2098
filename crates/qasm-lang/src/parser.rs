//! Grammar-table-driven parser.
//!
//! Each statement starts with an instruction keyword. `MEASURE` is handled
//! structurally; every other keyword is followed by the slots of its
//! [`GrammarRule`]. A failed statement is dropped, one error is recorded and
//! the parser skips the rest of its line and any leftover operand tokens
//! before trying the next statement.

use tracing::{debug, instrument, trace, warn};

use crate::ast::Statement;
use crate::error::ParseError;
use crate::grammar::{Grammar, GrammarRule};
use crate::token::{Token, TokenKind};

/// Statements produced by a parse together with the syntax errors found.
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// Successfully parsed statements in program order.
    pub statements: Vec<Statement>,
    /// Syntax errors in source order.
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a token stream with the given grammar.
#[instrument(skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: Vec<Token>, grammar: &Grammar) -> ParseOutput {
    let output = Parser::new(tokens, grammar).parse();
    debug!(
        statements = output.statements.len(),
        errors = output.errors.len(),
        "Parse complete"
    );
    output
}

/// Parser state.
pub struct Parser<'g> {
    tokens: Vec<Token>,
    grammar: &'g Grammar,
    pos: usize,
    errors: Vec<ParseError>,
}

impl<'g> Parser<'g> {
    /// Create a parser over `tokens`.
    ///
    /// A missing end-of-input sentinel is supplied so the cursor never runs
    /// past the end.
    pub fn new(mut tokens: Vec<Token>, grammar: &'g Grammar) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let line = tokens.last().map_or(1, Token::line);
            tokens.push(Token::eof(line));
        }

        Self {
            tokens,
            grammar,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse every statement up to the sentinel.
    pub fn parse(mut self) -> ParseOutput {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            let start = self.pos;
            match self.parse_statement() {
                Ok(statement) => {
                    trace!(%statement, "Parsed statement");
                    statements.push(statement);
                }
                Err(error) => {
                    warn!(%error, "Dropping malformed statement");
                    self.errors.push(error);
                    self.synchronize(start);
                }
            }
        }

        ParseOutput {
            statements,
            errors: self.errors,
        }
    }

    /// Parse one statement starting at the current token.
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if self.consume_if(TokenKind::Measure) {
            return Ok(Statement::Measure);
        }

        let instruction = self.peek().kind();
        let grammar = self.grammar;
        match grammar.rule(instruction) {
            Some(rule) => {
                let keyword = self.advance();
                self.parse_instruction(keyword, rule)
            }
            None => Err(ParseError::new(self.peek().clone(), "unexpected token")),
        }
    }

    /// Run the slots of `rule`, collecting operand tokens in slot order.
    fn parse_instruction(
        &mut self,
        keyword: Token,
        rule: &GrammarRule,
    ) -> Result<Statement, ParseError> {
        let mut operands = Vec::with_capacity(rule.slots().len());

        for slot in rule.slots() {
            let token = self.expect(slot.expected, &slot.message)?;
            if !slot.is_separator() {
                operands.push(token);
            }
        }

        Statement::from_operands(keyword.kind(), operands).ok_or_else(|| {
            ParseError::new(keyword, "operands do not match the instruction signature")
        })
    }

    /// Skip the rest of a broken statement.
    ///
    /// Everything on the statement's first line is dropped, then any operand
    /// tokens that follow. The token at `start` is always consumed.
    fn synchronize(&mut self, start: usize) {
        let line = self.tokens[start].line();
        while !self.is_at_end()
            && (self.peek().line() == line || self.peek().kind().is_operand())
        {
            self.advance();
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(self.peek().clone(), message))
        }
    }

    fn consume_if(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind() == kind
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Return the current token and move past it; the sentinel is never passed.
    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }
}
