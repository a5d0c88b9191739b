//! Symbolic expressions with late-bound entity references.

use kinetic_core::{CompartmentId, ParameterId, ReactionId, SpeciesId};
use kinetic_parser::{BinaryOp, Span};
use std::fmt;

/// A resolved identifier: which entity an expression symbol denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolRef {
    /// Reaction-local parameter, by position in the reaction's list.
    LocalParameter(ReactionId, usize),
    Species(SpeciesId),
    Parameter(ParameterId),
    Compartment(CompartmentId),
}

/// Supplies current values for symbols during evaluation.
pub trait Environment {
    fn value(&self, symbol: SymbolRef) -> f64;
}

/// Allow-listed functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Min,
    Max,
    Exp,
    Ln,
    /// Natural log with one argument, `log(base, x)` with two.
    Log,
    Log10,
    Sqrt,
    Abs,
    Pow,
    Floor,
    Ceil,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "min" => Function::Min,
            "max" => Function::Max,
            "exp" => Function::Exp,
            "ln" => Function::Ln,
            "log" => Function::Log,
            "log10" => Function::Log10,
            "sqrt" => Function::Sqrt,
            "abs" => Function::Abs,
            "pow" => Function::Pow,
            "floor" => Function::Floor,
            "ceil" => Function::Ceil,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Function::Min => "min",
            Function::Max => "max",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Log => "log",
            Function::Log10 => "log10",
            Function::Sqrt => "sqrt",
            Function::Abs => "abs",
            Function::Pow => "pow",
            Function::Floor => "floor",
            Function::Ceil => "ceil",
        }
    }

    /// Accepted argument counts as (min, max); `None` means variadic.
    pub fn arity(&self) -> (usize, Option<usize>) {
        match self {
            Function::Min | Function::Max => (1, None),
            Function::Pow => (2, Some(2)),
            Function::Log => (1, Some(2)),
            _ => (1, Some(1)),
        }
    }

    pub fn accepts(&self, count: usize) -> bool {
        let (min, max) = self.arity();
        count >= min && max.map_or(true, |max| count <= max)
    }

    fn apply(&self, args: &[f64]) -> f64 {
        match self {
            Function::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
            Function::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Function::Exp => args[0].exp(),
            Function::Ln => args[0].ln(),
            Function::Log => match args {
                [x] => x.ln(),
                [base, x] => x.log(*base),
                _ => f64::NAN,
            },
            Function::Log10 => args[0].log10(),
            Function::Sqrt => args[0].sqrt(),
            Function::Abs => args[0].abs(),
            Function::Pow => args[0].powf(args[1]),
            Function::Floor => args[0].floor(),
            Function::Ceil => args[0].ceil(),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SymExpr {
    Number(f64, Span),
    Symbol(SymbolRef, Span),
    Binary(BinaryOp, Box<SymExpr>, Box<SymExpr>, Span),
    Neg(Box<SymExpr>, Span),
    Call(Function, Vec<SymExpr>, Span),
}

impl SymExpr {
    pub fn span(&self) -> Span {
        match self {
            SymExpr::Number(_, span)
            | SymExpr::Symbol(_, span)
            | SymExpr::Binary(_, _, _, span)
            | SymExpr::Neg(_, span)
            | SymExpr::Call(_, _, span) => *span,
        }
    }

    /// Evaluate against the current values supplied by `env`.
    pub fn evaluate(&self, env: &dyn Environment) -> f64 {
        match self {
            SymExpr::Number(n, _) => *n,
            SymExpr::Symbol(symbol, _) => env.value(*symbol),
            SymExpr::Binary(op, left, right, _) => {
                let l = left.evaluate(env);
                let r = right.evaluate(env);
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                    BinaryOp::Pow => l.powf(r),
                }
            }
            SymExpr::Neg(inner, _) => -inner.evaluate(env),
            SymExpr::Call(function, args, _) => {
                let values: Vec<f64> = args.iter().map(|a| a.evaluate(env)).collect();
                function.apply(&values)
            }
        }
    }

    /// Value of a symbol-free expression.
    pub fn constant_value(&self) -> Option<f64> {
        struct NoSymbols;
        impl Environment for NoSymbols {
            fn value(&self, _: SymbolRef) -> f64 {
                f64::NAN
            }
        }
        if self.symbols().is_empty() {
            Some(self.evaluate(&NoSymbols))
        } else {
            None
        }
    }

    /// Every symbol reference, left to right, with repeats.
    pub fn symbols(&self) -> Vec<SymbolRef> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut Vec<SymbolRef>) {
        match self {
            SymExpr::Number(..) => {}
            SymExpr::Symbol(symbol, _) => out.push(*symbol),
            SymExpr::Binary(_, left, right, _) => {
                left.collect_symbols(out);
                right.collect_symbols(out);
            }
            SymExpr::Neg(inner, _) => inner.collect_symbols(out),
            SymExpr::Call(_, args, _) => {
                for arg in args {
                    arg.collect_symbols(out);
                }
            }
        }
    }

    pub fn references(&self, symbol: SymbolRef) -> bool {
        self.symbols().contains(&symbol)
    }
}
