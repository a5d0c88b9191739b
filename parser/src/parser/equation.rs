//! Reaction equation parsing.
//!
//! ```text
//! equation := side ('->' | '<=>') side
//! side     := (term ('+' term)*)?
//! term     := NUMBER? IDENT
//! ```

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

impl Parser {
    pub(crate) fn parse_equation(&mut self) -> ParseResult<ReactionEquation> {
        let start = self.peek().span;

        let reactants = self.parse_side()?;

        let reversible = if self.check(&TokenKind::RightArrow) {
            self.advance();
            false
        } else if self.check(&TokenKind::Reversible) {
            self.advance();
            true
        } else {
            let token = self.peek();
            return Err(ParseError::unexpected_token(
                token.span,
                "'->' or '<=>'",
                token.kind.name(),
            )
            .with_expected(vec!["'->'".to_string(), "'<=>'".to_string()]));
        };

        let products = self.parse_side()?;
        let span = self.span_from(start);

        Ok(ReactionEquation {
            reactants,
            products,
            reversible,
            span,
        })
    }

    fn parse_side(&mut self) -> ParseResult<Vec<StoichTerm>> {
        let mut terms = Vec::new();

        if !self.starts_term() {
            return Ok(terms);
        }

        loop {
            terms.push(self.parse_stoich_term()?);
            if self.check(&TokenKind::Plus) {
                self.advance();
            } else {
                break;
            }
        }

        Ok(terms)
    }

    fn starts_term(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident(_) | TokenKind::Int(_) | TokenKind::Float(_)
        )
    }

    fn parse_stoich_term(&mut self) -> ParseResult<StoichTerm> {
        let start = self.peek().span;

        let coefficient = match self.peek().kind.as_number() {
            Some(value) => {
                let span = self.advance().span;
                if !(value.is_finite() && value > 0.0) {
                    return Err(ParseError::invalid_coefficient(span, value));
                }
                value
            }
            None => 1.0,
        };

        let (species, _) = self.expect_ident()?;
        let span = self.span_from(start);

        Ok(StoichTerm {
            species,
            coefficient,
            span,
        })
    }
}
