//! Lexer (tokenizer) for expressions and reaction equations.

use crate::{ParseError, ParseResult, Span};

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Ident(String),
    Int(i64),
    Float(f64),

    // Symbols
    LParen,     // (
    RParen,     // )
    Comma,      // ,
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    Caret,      // ^
    RightArrow, // ->
    Reversible, // <=>

    // End of input
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Ident(_) => "identifier",
            TokenKind::Int(_) => "integer",
            TokenKind::Float(_) => "number",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Caret => "'^'",
            TokenKind::RightArrow => "'->'",
            TokenKind::Reversible => "'<=>'",
            TokenKind::Eof => "end of input",
        }
    }

    /// Numeric value of a literal token.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TokenKind::Int(n) => Some(*n as f64),
            TokenKind::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// A token with its span.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(pos: usize, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(pos, pos, line, column),
        }
    }
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize all input into a vector of tokens.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn current_span(&self) -> Span {
        Span::new(self.pos, self.pos, self.line, self.column)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Ok(Token::eof(self.pos, self.line, self.column));
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '^' => TokenKind::Caret,
            '-' => {
                if self.peek_char() == Some('>') {
                    self.next_char();
                    TokenKind::RightArrow
                } else {
                    TokenKind::Minus
                }
            }
            '<' => {
                if self.peek_char() == Some('=') {
                    self.next_char();
                    if self.peek_char() == Some('>') {
                        self.next_char();
                        TokenKind::Reversible
                    } else {
                        return Err(ParseError::new(
                            "expected '<=>'",
                            self.span_from(start, start_line, start_col),
                        ));
                    }
                } else {
                    return Err(ParseError::new(
                        "unexpected character '<'",
                        self.span_from(start, start_line, start_col),
                    ));
                }
            }
            '_' | 'a'..='z' | 'A'..='Z' => self.scan_ident(c),
            '0'..='9' | '.' => self.scan_number(c, start, start_line, start_col)?,
            _ => {
                return Err(ParseError::new(
                    format!("unexpected character '{}'", c),
                    self.span_from(start, start_line, start_col),
                ));
            }
        };

        Ok(Token::new(
            kind,
            self.span_from(start, start_line, start_col),
        ))
    }

    fn scan_ident(&mut self, first: char) -> TokenKind {
        let mut ident = String::new();
        ident.push(first);
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                ident.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        TokenKind::Ident(ident)
    }

    fn scan_number(
        &mut self,
        first: char,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut number = String::new();
        number.push(first);
        let mut has_decimal = first == '.';

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                number.push(c);
                self.next_char();
            } else if c == '.' && !has_decimal {
                has_decimal = true;
                number.push(c);
                self.next_char();
            } else {
                break;
            }
        }

        if number == "." {
            return Err(ParseError::new(
                "unexpected character '.'",
                self.span_from(start, start_line, start_col),
            ));
        }

        // Scientific notation
        let has_exponent = matches!(self.peek_char(), Some('e' | 'E'));
        if has_exponent {
            self.scan_exponent(&mut number)?;
        }

        if has_decimal || has_exponent {
            let value: f64 = number.parse().map_err(|_| {
                ParseError::new(
                    format!("invalid number literal '{}'", number),
                    self.span_from(start, start_line, start_col),
                )
            })?;
            Ok(TokenKind::Float(value))
        } else {
            let value: i64 = number.parse().map_err(|_| {
                ParseError::new(
                    format!("invalid integer literal '{}'", number),
                    self.span_from(start, start_line, start_col),
                )
            })?;
            Ok(TokenKind::Int(value))
        }
    }

    /// Scan the exponent part of a number (e.g., e10, E-5, e+3)
    fn scan_exponent(&mut self, number: &mut String) -> ParseResult<()> {
        if let Some(c) = self.next_char() {
            number.push(c);
        }

        if let Some(c) = self.peek_char() {
            if c == '+' || c == '-' {
                number.push(c);
                self.next_char();
            }
        }

        let mut has_digits = false;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                number.push(c);
                self.next_char();
                has_digits = true;
            } else {
                break;
            }
        }

        if !has_digits {
            return Err(ParseError::new(
                format!("invalid exponent in number literal '{}'", number),
                self.current_span(),
            ));
        }

        Ok(())
    }
}
