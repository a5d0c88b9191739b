//! The assembled ODE system.

use kinetic_analyzer::{SymExpr, SymbolRef};
use kinetic_core::{ReactionId, RuleId, SpeciesId};
use kinetic_parser::Expr;
use serde::Serialize;

/// A resolved rate law, one per reaction.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLaw {
    pub reaction: ReactionId,
    /// The parsed rate law as written.
    pub source: Expr,
    pub expression: SymExpr,
}

/// `coefficient × rate(reaction)` inside a derivative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OdeTerm {
    pub reaction: ReactionId,
    /// Net stoichiometric coefficient, negative for consumption.
    pub coefficient: f64,
}

/// `d[amount]/dt = Σ terms` for one species.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialEquation {
    pub species: SpeciesId,
    /// In reaction registration order. Empty means a zero derivative.
    pub terms: Vec<OdeTerm>,
    pub initial_amount: f64,
}

/// `target = expression` for one assignment rule.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgebraicEquation {
    pub rule: RuleId,
    pub target: SymbolRef,
    pub source: Expr,
    pub expression: SymExpr,
}

/// Differential and algebraic equations of a model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OdeSystem {
    /// Indexed by reaction key.
    pub rates: Vec<RateLaw>,
    /// In species registration order, skipping rule targets.
    pub differential: Vec<DifferentialEquation>,
    /// In rule registration order.
    pub algebraic: Vec<AlgebraicEquation>,
    /// Indices into `algebraic`, dependencies first.
    pub evaluation_order: Vec<usize>,
}

impl OdeSystem {
    pub fn rate(&self, reaction: ReactionId) -> Option<&RateLaw> {
        self.rates.get(reaction.index())
    }

    pub fn differential_for(&self, species: SpeciesId) -> Option<&DifferentialEquation> {
        self.differential.iter().find(|eq| eq.species == species)
    }

    pub fn algebraic_for(&self, target: SymbolRef) -> Option<&AlgebraicEquation> {
        self.algebraic.iter().find(|eq| eq.target == target)
    }

    /// Algebraic equations in evaluation order.
    pub fn ordered_algebraic(&self) -> impl Iterator<Item = &AlgebraicEquation> {
        self.evaluation_order.iter().map(move |&i| &self.algebraic[i])
    }

    /// Initial amounts, one per differential equation.
    pub fn initial_state(&self) -> Vec<f64> {
        self.differential.iter().map(|eq| eq.initial_amount).collect()
    }

    /// Total number of reaction terms across all derivatives.
    pub fn term_count(&self) -> usize {
        self.differential.iter().map(|eq| eq.terms.len()).sum()
    }
}
