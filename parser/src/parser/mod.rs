//! Parser for expressions and reaction equations.
//!
//! This module is organized into submodules by parsing category:
//! - `expr`: Expression parsing (operators, literals, function calls)
//! - `equation`: Reaction equation parsing (stoichiometry, arrows)

mod equation;
mod expr;

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};

// ==================== PARSER STATE ====================

/// Parser state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a new parser from source text.
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }
}

// ==================== TOKEN HELPERS ====================

impl Parser {
    pub(crate) fn peek(&self) -> &Token {
        // The lexer always terminates the stream with Eof.
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.check(&TokenKind::Eof)
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            Err(ParseError::unexpected_token(
                token.span,
                kind.name(),
                token.kind.name(),
            ))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> ParseResult<(String, Span)> {
        match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok((name, span))
            }
            _ => {
                let token = self.peek();
                Err(ParseError::unexpected_token(
                    token.span,
                    "identifier",
                    token.kind.name(),
                ))
            }
        }
    }

    pub(crate) fn expect_end(&mut self) -> ParseResult<()> {
        if self.at_end() {
            Ok(())
        } else {
            let token = self.peek();
            Err(ParseError::unexpected_token(
                token.span,
                "end of input",
                token.kind.name(),
            ))
        }
    }

    pub(crate) fn span_from(&self, start: Span) -> Span {
        let end_token = if self.pos > 0 {
            &self.tokens[self.pos - 1]
        } else {
            self.peek()
        };
        Span::new(start.start, end_token.span.end, start.line, start.column)
    }
}

// ==================== PUBLIC API ====================

/// Parse a complete rate-law or rule expression.
pub fn parse_expr(input: &str) -> ParseResult<Expr> {
    let mut parser = Parser::new(input)?;
    if parser.at_end() {
        return Err(ParseError::unexpected_eof(parser.peek().span, "expression"));
    }
    let expr = parser.parse_expr()?;
    parser.expect_end()?;
    Ok(expr)
}

/// Parse a complete reaction equation.
pub fn parse_equation(input: &str) -> ParseResult<ReactionEquation> {
    let mut parser = Parser::new(input)?;
    let equation = parser.parse_equation()?;
    parser.expect_end()?;
    Ok(equation)
}

// ==================== TESTS ====================
