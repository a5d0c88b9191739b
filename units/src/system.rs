//! A model's unit system: named definitions over the base unit table.

use crate::base::base_unit;
use crate::definition::{UnitBody, UnitDefinition};
use crate::dimension::ReducedUnit;
use crate::error::{UnitError, UnitResult};
use crate::expr::parse_unit_expr;
use std::collections::HashMap;

/// Named unit definitions, reduced at definition time.
///
/// References resolve against defined identifiers first, then against the
/// base table (with SI prefixes), then as a unit expression.
#[derive(Debug, Clone, Default)]
pub struct UnitSystem {
    definitions: Vec<(UnitDefinition, ReducedUnit)>,
    by_id: HashMap<String, usize>,
}

impl UnitSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce a definition without registering it.
    pub fn reduce(&self, definition: &UnitDefinition) -> UnitResult<ReducedUnit> {
        match &definition.body {
            UnitBody::Terms(terms) => terms
                .iter()
                .try_fold(ReducedUnit::dimensionless(), |acc, term| {
                    acc.checked_mul(&term.reduce()?).ok_or_else(|| {
                        UnitError::parse(&definition.id, 0, "exponent out of range")
                    })
                }),
            UnitBody::Expr(expr) => self.parse(expr),
        }
    }

    /// Register a definition. Fails on an unknown base symbol or a duplicate id.
    pub fn define(&mut self, definition: UnitDefinition) -> UnitResult<ReducedUnit> {
        if self.by_id.contains_key(&definition.id) {
            return Err(UnitError::DuplicateUnit { id: definition.id });
        }
        let reduced = self.reduce(&definition)?;
        self.by_id
            .insert(definition.id.clone(), self.definitions.len());
        self.definitions.push((definition, reduced));
        Ok(reduced)
    }

    /// Register a unit written as an expression, e.g. `("mM", "mmole/liter")`.
    pub fn define_expr(&mut self, id: &str, expr: &str) -> UnitResult<ReducedUnit> {
        self.define(UnitDefinition::from_expr(id, expr))
    }

    pub fn get(&self, id: &str) -> Option<&UnitDefinition> {
        self.by_id.get(id).map(|&i| &self.definitions[i].0)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.definitions.iter().map(|(d, _)| d)
    }

    fn lookup(&self, symbol: &str) -> Option<ReducedUnit> {
        self.by_id
            .get(symbol)
            .map(|&i| self.definitions[i].1)
            .or_else(|| base_unit(symbol))
    }

    fn parse(&self, expr: &str) -> UnitResult<ReducedUnit> {
        parse_unit_expr(expr, |s| self.lookup(s))
    }

    /// Resolve a unit reference to its reduced form.
    pub fn resolve(&self, unit: &str) -> UnitResult<ReducedUnit> {
        match self.lookup(unit.trim()) {
            Some(reduced) => Ok(reduced),
            None => self.parse(unit),
        }
    }

    /// Dimension vector and SI factor of a unit reference.
    pub fn dimension_of(&self, unit: &str) -> UnitResult<ReducedUnit> {
        self.resolve(unit)
    }

    /// Whether two unit references have equal dimension vectors.
    pub fn are_compatible(&self, a: &str, b: &str) -> UnitResult<bool> {
        Ok(self.resolve(a)?.is_compatible_with(&self.resolve(b)?))
    }

    /// Factor converting a value in `from` to a value in `to`.
    pub fn convert_factor(&self, from: &str, to: &str) -> UnitResult<f64> {
        let a = self.resolve(from)?;
        let b = self.resolve(to)?;
        convert_factor(&a, &b).map_err(|_| UnitError::incompatible(from, to))
    }
}

/// Factor converting between two reduced units.
pub fn convert_factor(from: &ReducedUnit, to: &ReducedUnit) -> UnitResult<f64> {
    if !from.is_compatible_with(to) {
        return Err(UnitError::incompatible(from, to));
    }
    Ok(from.factor / to.factor)
}
