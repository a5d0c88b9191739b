//! Unit definitions as compositions of base units.

use crate::base::base_unit;
use crate::dimension::ReducedUnit;
use crate::error::{UnitError, UnitResult};

/// One factor of a unit composition.
///
/// The value of a term is `(multiplier × 10^scale × kind)^exponent`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTerm {
    /// Base unit symbol, e.g. `mole` or `litre`.
    pub kind: String,
    pub exponent: i32,
    pub scale: i32,
    pub multiplier: f64,
}

impl UnitTerm {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            exponent: 1,
            scale: 0,
            multiplier: 1.0,
        }
    }

    pub fn exponent(mut self, exponent: i32) -> Self {
        self.exponent = exponent;
        self
    }

    pub fn scale(mut self, scale: i32) -> Self {
        self.scale = scale;
        self
    }

    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Reduce against the base unit table.
    pub fn reduce(&self) -> UnitResult<ReducedUnit> {
        let base =
            base_unit(&self.kind).ok_or_else(|| UnitError::undefined_base_unit(&self.kind))?;
        let scaled = base.scaled(self.multiplier * 10f64.powi(self.scale));
        scaled
            .checked_powi(self.exponent)
            .ok_or_else(|| UnitError::parse(&self.kind, 0, "exponent out of range"))
    }
}

/// How a unit definition is written down.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitBody {
    /// Explicit composition of base-unit terms.
    Terms(Vec<UnitTerm>),
    /// A unit expression such as `mmole/min/liter`.
    Expr(String),
}

/// A named unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDefinition {
    pub id: String,
    /// Display symbol, e.g. `µg` for `mug`.
    pub symbol: Option<String>,
    pub body: UnitBody,
}

impl UnitDefinition {
    pub fn from_terms(id: impl Into<String>, terms: Vec<UnitTerm>) -> Self {
        Self {
            id: id.into(),
            symbol: None,
            body: UnitBody::Terms(terms),
        }
    }

    pub fn from_expr(id: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: None,
            body: UnitBody::Expr(expr.into()),
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// The symbol if given, otherwise the identifier.
    pub fn display_symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or(&self.id)
    }
}
