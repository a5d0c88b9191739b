//! Unit expression parser.
//!
//! Grammar:
//!
//! ```text
//! expr     := power (('*' | '/') power)*
//! power    := atom ('^' exponent)?
//! atom     := IDENT | NUMBER | '(' expr ')'
//! exponent := ['+' | '-'] INT | '(' ['+' | '-'] INT ')'
//! ```
//!
//! `*` and `/` are left-associative, so `1/min/liter` is `(1/min)/liter`.

use crate::dimension::ReducedUnit;
use crate::error::{UnitError, UnitResult};

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Ident(String),
    Number(f64),
    Star,
    Slash,
    Caret,
    Plus,
    Minus,
    LParen,
    RParen,
    Eof,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == 'µ' || c == 'μ'
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

fn tokenize(input: &str) -> UnitResult<Vec<(Tok, usize)>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '*' | '.' | '·' => {
                chars.next();
                tokens.push((Tok::Star, pos));
            }
            '/' => {
                chars.next();
                tokens.push((Tok::Slash, pos));
            }
            '^' => {
                chars.next();
                tokens.push((Tok::Caret, pos));
            }
            '+' => {
                chars.next();
                tokens.push((Tok::Plus, pos));
            }
            '-' => {
                chars.next();
                tokens.push((Tok::Minus, pos));
            }
            '(' => {
                chars.next();
                tokens.push((Tok::LParen, pos));
            }
            ')' => {
                chars.next();
                tokens.push((Tok::RParen, pos));
            }
            c if c.is_ascii_digit() => {
                let mut text = String::new();
                while let Some(&(_, d)) = chars.peek() {
                    if d.is_ascii_digit() {
                        text.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = text
                    .parse::<f64>()
                    .map_err(|_| UnitError::parse(input, pos, format!("invalid number '{}'", text)))?;
                tokens.push((Tok::Number(value), pos));
            }
            c if is_ident_start(c) => {
                let mut text = String::new();
                while let Some(&(_, d)) = chars.peek() {
                    if is_ident_continue(d) {
                        text.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((Tok::Ident(text), pos));
            }
            other => {
                return Err(UnitError::parse(
                    input,
                    pos,
                    format!("unexpected character '{}'", other),
                ));
            }
        }
    }
    tokens.push((Tok::Eof, input.len()));
    Ok(tokens)
}

struct UnitParser<'a, F> {
    input: &'a str,
    tokens: Vec<(Tok, usize)>,
    pos: usize,
    lookup: F,
}

impl<'a, F> UnitParser<'a, F>
where
    F: Fn(&str) -> Option<ReducedUnit>,
{
    fn peek(&self) -> &Tok {
        &self.tokens[self.pos].0
    }

    fn offset(&self) -> usize {
        self.tokens[self.pos].1
    }

    fn advance(&mut self) -> Tok {
        let tok = self.tokens[self.pos].0.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn error(&self, message: impl Into<String>) -> UnitError {
        UnitError::parse(self.input, self.offset(), message)
    }

    fn out_of_range(&self) -> UnitError {
        self.error("exponent out of range")
    }

    fn parse_expr(&mut self) -> UnitResult<ReducedUnit> {
        let mut left = self.parse_power()?;
        loop {
            match self.peek() {
                Tok::Star => {
                    self.advance();
                    let right = self.parse_power()?;
                    left = left.checked_mul(&right).ok_or_else(|| self.out_of_range())?;
                }
                Tok::Slash => {
                    self.advance();
                    let right = self.parse_power()?;
                    left = left.checked_div(&right).ok_or_else(|| self.out_of_range())?;
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_power(&mut self) -> UnitResult<ReducedUnit> {
        let base = self.parse_atom()?;
        if matches!(self.peek(), Tok::Caret) {
            self.advance();
            let exponent = self.parse_exponent()?;
            return base.checked_powi(exponent).ok_or_else(|| self.out_of_range());
        }
        Ok(base)
    }

    fn parse_exponent(&mut self) -> UnitResult<i32> {
        let parenthesized = matches!(self.peek(), Tok::LParen);
        if parenthesized {
            self.advance();
        }
        let sign = match self.peek() {
            Tok::Minus => {
                self.advance();
                -1
            }
            Tok::Plus => {
                self.advance();
                1
            }
            _ => 1,
        };
        let value = match self.advance() {
            Tok::Number(n) if n.fract() == 0.0 && n.abs() <= i32::MAX as f64 => n as i32,
            _ => return Err(self.error("expected an integer exponent")),
        };
        if parenthesized {
            match self.advance() {
                Tok::RParen => {}
                _ => return Err(self.error("expected ')'")),
            }
        }
        Ok(sign * value)
    }

    fn parse_atom(&mut self) -> UnitResult<ReducedUnit> {
        match self.advance() {
            Tok::Ident(name) => {
                (self.lookup)(&name).ok_or_else(|| UnitError::undefined_base_unit(name))
            }
            Tok::Number(value) => Ok(ReducedUnit::dimensionless().scaled(value)),
            Tok::LParen => {
                let inner = self.parse_expr()?;
                match self.advance() {
                    Tok::RParen => Ok(inner),
                    _ => Err(self.error("expected ')'")),
                }
            }
            Tok::Eof => Err(self.error("unexpected end of unit expression")),
            other => Err(self.error(format!("unexpected token {:?}", other))),
        }
    }
}

/// Parse a unit expression, resolving identifiers with `lookup`.
pub fn parse_unit_expr<F>(input: &str, lookup: F) -> UnitResult<ReducedUnit>
where
    F: Fn(&str) -> Option<ReducedUnit>,
{
    let tokens = tokenize(input)?;
    let mut parser = UnitParser {
        input,
        tokens,
        pos: 0,
        lookup,
    };
    let unit = parser.parse_expr()?;
    if !matches!(parser.peek(), Tok::Eof) {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(unit)
}
