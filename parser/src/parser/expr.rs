//! Expression parsing.
//!
//! Precedence, loosest first: `+ -`, `* /`, unary `-`, `^` (right-associative).

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

impl Parser {
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = if self.check(&TokenKind::Plus) {
                BinaryOp::Add
            } else if self.check(&TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };

            let start = left.span();
            self.advance();
            let right = self.parse_multiplicative()?;
            let span = self.span_from(start);
            left = Expr::BinaryOp(op, Box::new(left), Box::new(right), span);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = if self.check(&TokenKind::Star) {
                BinaryOp::Mul
            } else if self.check(&TokenKind::Slash) {
                BinaryOp::Div
            } else {
                break;
            };

            let start = left.span();
            self.advance();
            let right = self.parse_unary()?;
            let span = self.span_from(start);
            left = Expr::BinaryOp(op, Box::new(left), Box::new(right), span);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        if self.check(&TokenKind::Minus) {
            let start = self.advance().span;
            let expr = self.parse_unary()?;
            let span = self.span_from(start);
            Ok(Expr::UnaryOp(UnaryOp::Neg, Box::new(expr), span))
        } else {
            self.parse_power()
        }
    }

    fn parse_power(&mut self) -> ParseResult<Expr> {
        let base = self.parse_primary()?;

        if self.check(&TokenKind::Caret) {
            let start = base.span();
            self.advance();
            // Right operand goes through unary so `a^-b` and `a^b^c` both parse.
            let exponent = self.parse_unary()?;
            let span = self.span_from(start);
            return Ok(Expr::BinaryOp(
                BinaryOp::Pow,
                Box::new(base),
                Box::new(exponent),
                span,
            ));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();

        match &token.kind {
            TokenKind::Int(_) | TokenKind::Float(_) => {
                self.advance();
                let value = token.kind.as_number().unwrap_or_default();
                Ok(Expr::Number(value, token.span))
            }

            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }

            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();

                if self.check(&TokenKind::LParen) {
                    self.advance();
                    let mut args = Vec::new();
                    if !self.check(&TokenKind::RParen) {
                        loop {
                            args.push(self.parse_expr()?);
                            if self.check(&TokenKind::Comma) {
                                self.advance();
                            } else {
                                break;
                            }
                        }
                    }
                    self.expect(&TokenKind::RParen)?;

                    let span = self.span_from(token.span);
                    Ok(Expr::FnCall(FnCall { name, args, span }))
                } else {
                    Ok(Expr::Var(name, token.span))
                }
            }

            _ => Err(ParseError::unexpected_token(
                token.span,
                "expression",
                token.kind.name(),
            )),
        }
    }
}
