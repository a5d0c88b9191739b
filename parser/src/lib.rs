//! Kinetic Parser
//!
//! This crate provides parsing for the textual parts of a model declaration:
//! - Rate-law and rule expressions (arithmetic, exponentiation, function calls)
//! - Reaction equations (`2 A + B -> C`, `A <=> B`, `caf_cent ->`)
//! - Error handling with location information

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::*;
pub use error::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse_equation, parse_expr, Parser};
