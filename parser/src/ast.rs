//! Syntax trees for expressions and reaction equations.

use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

// ==================== EXPRESSIONS ====================

/// An arithmetic expression as written in a rate law or assignment rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64, Span),
    /// Identifier reference, bound later by the resolver
    Var(String, Span),
    /// Binary operation
    BinaryOp(BinaryOp, Box<Expr>, Box<Expr>, Span),
    /// Unary operation
    UnaryOp(UnaryOp, Box<Expr>, Span),
    /// Function call
    FnCall(FnCall),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Number(_, span) => *span,
            Expr::Var(_, span) => *span,
            Expr::BinaryOp(_, _, _, span) => *span,
            Expr::UnaryOp(_, _, span) => *span,
            Expr::FnCall(fc) => fc.span,
        }
    }

    /// Every identifier in left-to-right source order, with repeats.
    pub fn identifiers(&self) -> Vec<(&str, Span)> {
        let mut out = Vec::new();
        self.collect_identifiers(&mut out);
        out
    }

    fn collect_identifiers<'a>(&'a self, out: &mut Vec<(&'a str, Span)>) {
        match self {
            Expr::Number(..) => {}
            Expr::Var(name, span) => out.push((name, *span)),
            Expr::BinaryOp(_, left, right, _) => {
                left.collect_identifiers(out);
                right.collect_identifiers(out);
            }
            Expr::UnaryOp(_, inner, _) => inner.collect_identifiers(out),
            Expr::FnCall(fc) => {
                for arg in &fc.args {
                    arg.collect_identifiers(out);
                }
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::BinaryOp(op, ..) => op.precedence(),
            Expr::UnaryOp(..) => 3,
            _ => 5,
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n, _) => write!(f, "{}", n),
            Expr::Var(name, _) => f.write_str(name),
            Expr::BinaryOp(op, left, right, _) => {
                let prec = op.precedence();
                let (left_parens, right_parens) = if *op == BinaryOp::Pow {
                    (left.precedence() <= prec, right.precedence() < prec)
                } else {
                    let strict_right = matches!(op, BinaryOp::Sub | BinaryOp::Div);
                    (
                        left.precedence() < prec,
                        right.precedence() < prec
                            || (strict_right && right.precedence() == prec),
                    )
                };
                write_operand(f, left, left_parens)?;
                if *op == BinaryOp::Pow {
                    write!(f, "{}", op)?;
                } else {
                    write!(f, " {} ", op)?;
                }
                write_operand(f, right, right_parens)
            }
            Expr::UnaryOp(UnaryOp::Neg, inner, _) => {
                f.write_str("-")?;
                write_operand(f, inner, inner.precedence() < 3)
            }
            Expr::FnCall(fc) => {
                write!(f, "{}(", fc.name)?;
                for (i, arg) in fc.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Right-associative exponentiation
    Pow,
}

impl BinaryOp {
    fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
            BinaryOp::Pow => 4,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Pow => write!(f, "^"),
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

/// Function call.
#[derive(Debug, Clone, PartialEq)]
pub struct FnCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub span: Span,
}

// ==================== REACTION EQUATIONS ====================

/// One side entry of a reaction equation.
#[derive(Debug, Clone, PartialEq)]
pub struct StoichTerm {
    pub species: String,
    pub coefficient: f64,
    pub span: Span,
}

/// A parsed reaction equation such as `2 A + B -> C`.
///
/// Either side may be empty: `caf_cent ->` is a sink, `-> A` a source.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionEquation {
    pub reactants: Vec<StoichTerm>,
    pub products: Vec<StoichTerm>,
    pub reversible: bool,
    pub span: Span,
}

impl ReactionEquation {
    /// Species identifiers on both sides, reactants first.
    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.reactants
            .iter()
            .chain(self.products.iter())
            .map(|t| t.species.as_str())
    }
}

fn write_side(f: &mut fmt::Formatter<'_>, side: &[StoichTerm]) -> fmt::Result {
    for (i, term) in side.iter().enumerate() {
        if i > 0 {
            f.write_str(" + ")?;
        }
        if term.coefficient != 1.0 {
            write!(f, "{} ", term.coefficient)?;
        }
        f.write_str(&term.species)?;
    }
    Ok(())
}

impl fmt::Display for ReactionEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_side(f, &self.reactants)?;
        let arrow = if self.reversible { "<=>" } else { "->" };
        match (self.reactants.is_empty(), self.products.is_empty()) {
            (true, true) => f.write_str(arrow),
            (true, false) => write!(f, "{} ", arrow),
            (false, true) => write!(f, " {}", arrow),
            (false, false) => write!(f, " {} ", arrow),
        }?;
        write_side(f, &self.products)
    }
}
