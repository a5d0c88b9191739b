//! Unit inference over resolved expressions.

use crate::error::UnitCheckError;
use crate::symexpr::{Function, SymExpr, SymbolRef};
use kinetic_parser::{BinaryOp, Span};
use kinetic_units::ReducedUnit;

/// Supplies the unit of each symbol's value.
pub trait SymbolUnits {
    /// `None` when the symbol has no declared unit.
    fn unit_of(&self, symbol: SymbolRef) -> Option<ReducedUnit>;
}

/// Infers the unit of an expression.
///
/// Literals are dimensionless. A symbol without a unit makes the result
/// undetermined (`None`) wherever it cannot be recovered from the other
/// operand of `+`, `-`, `min` or `max`.
pub struct UnitChecker<'a> {
    units: &'a dyn SymbolUnits,
}

type Inferred = Result<Option<ReducedUnit>, UnitCheckError>;

impl<'a> UnitChecker<'a> {
    pub fn new(units: &'a dyn SymbolUnits) -> Self {
        Self { units }
    }

    pub fn infer(&self, expr: &SymExpr) -> Inferred {
        match expr {
            SymExpr::Number(..) => Ok(Some(ReducedUnit::dimensionless())),
            SymExpr::Symbol(symbol, _) => Ok(self.units.unit_of(*symbol)),
            SymExpr::Neg(inner, _) => self.infer(inner),
            SymExpr::Binary(op, left, right, span) => {
                let l = self.infer(left)?;
                match op {
                    BinaryOp::Add | BinaryOp::Sub => {
                        let r = self.infer(right)?;
                        same_unit(&op.to_string(), l, r, *span)
                    }
                    BinaryOp::Mul => combine("*", l, self.infer(right)?, *span, |a, b| a.checked_mul(&b)),
                    BinaryOp::Div => combine("/", l, self.infer(right)?, *span, |a, b| a.checked_div(&b)),
                    BinaryOp::Pow => self.power(l, right, *span),
                }
            }
            SymExpr::Call(function, args, span) => self.call(*function, args, *span),
        }
    }

    fn call(&self, function: Function, args: &[SymExpr], span: Span) -> Inferred {
        match function {
            Function::Min | Function::Max => {
                let mut acc = None;
                for arg in args {
                    acc = same_unit(function.name(), acc, self.infer(arg)?, span)?;
                }
                Ok(acc)
            }
            Function::Exp | Function::Ln | Function::Log | Function::Log10 => {
                for arg in args {
                    if let Some(unit) = self.infer(arg)? {
                        if !unit.is_dimensionless() {
                            return Err(UnitCheckError::dimensioned_argument(
                                function.name(),
                                unit,
                                arg.span(),
                            ));
                        }
                    }
                }
                Ok(Some(ReducedUnit::dimensionless()))
            }
            Function::Sqrt => match self.infer(&args[0])? {
                Some(unit) => unit
                    .root(2)
                    .map(Some)
                    .ok_or_else(|| UnitCheckError::fractional(unit, 0.5, span)),
                None => Ok(None),
            },
            Function::Abs | Function::Floor | Function::Ceil => self.infer(&args[0]),
            Function::Pow => {
                let base = self.infer(&args[0])?;
                self.power(base, &args[1], span)
            }
        }
    }

    fn power(&self, base: Option<ReducedUnit>, exponent: &SymExpr, span: Span) -> Inferred {
        if let Some(unit) = self.infer(exponent)? {
            if !unit.is_dimensionless() {
                return Err(UnitCheckError::dimensioned_argument("^", unit, exponent.span()));
            }
        }
        let base = match base {
            Some(base) => base,
            None => return Ok(None),
        };
        if base.is_dimensionless() {
            return Ok(Some(ReducedUnit::dimensionless()));
        }
        let n = exponent
            .constant_value()
            .ok_or_else(|| UnitCheckError::non_constant_exponent(base, span))?;
        rational_power(&base, n, span).map(Some)
    }
}

/// Raise to `n` when `n` is p/q with small q and every exponent stays integral.
fn rational_power(base: &ReducedUnit, n: f64, span: Span) -> Result<ReducedUnit, UnitCheckError> {
    if !n.is_finite() {
        return Err(UnitCheckError::fractional(*base, n, span));
    }
    for q in 1..=4 {
        let p = (n * q as f64).round();
        if (n * q as f64 - p).abs() >= 1e-9 {
            continue;
        }
        if p.abs() > i32::MAX as f64 {
            return Err(UnitCheckError::out_of_range("^", span));
        }
        let raised = base
            .checked_powi(p as i32)
            .ok_or_else(|| UnitCheckError::out_of_range("^", span))?;
        if let Some(unit) = raised.root(q) {
            return Ok(unit);
        }
    }
    Err(UnitCheckError::fractional(*base, n, span))
}

fn combine(
    op: &str,
    left: Option<ReducedUnit>,
    right: Option<ReducedUnit>,
    span: Span,
    f: impl Fn(ReducedUnit, ReducedUnit) -> Option<ReducedUnit>,
) -> Inferred {
    match (left, right) {
        (Some(l), Some(r)) => f(l, r)
            .map(Some)
            .ok_or_else(|| UnitCheckError::out_of_range(op, span)),
        _ => Ok(None),
    }
}

fn same_unit(
    op: &str,
    left: Option<ReducedUnit>,
    right: Option<ReducedUnit>,
    span: Span,
) -> Inferred {
    match (left, right) {
        (Some(l), Some(r)) if !l.is_compatible_with(&r) => {
            Err(UnitCheckError::operands(op, l, r, span))
        }
        (Some(l), _) => Ok(Some(l)),
        (None, r) => Ok(r),
    }
}
