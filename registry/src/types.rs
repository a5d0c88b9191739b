//! Model entity types.
//!
//! Every entity carries its textual identifier (`id`) and the dense index
//! assigned at registration (`key`). References between entities are by
//! identifier and are resolved during assembly.

use kinetic_core::{CompartmentId, ParameterId, ReactionId, RuleId, SpeciesId};
use kinetic_parser::ReactionEquation;

/// Compartment: a well-mixed region with a size.
#[derive(Debug, Clone, PartialEq)]
pub struct Compartment {
    pub key: CompartmentId,
    pub id: String,
    pub name: Option<String>,
    pub size: f64,
    /// Must reduce to a length, area or volume. Defaults to the model volume unit.
    pub unit: Option<String>,
    pub constant: bool,
}

/// How the initial quantity of a species is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialQuantity {
    Amount(f64),
    /// Converted to an amount with the compartment size at initialization.
    Concentration(f64),
}

/// Species: a pool of one chemical entity inside a compartment.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub key: SpeciesId,
    pub id: String,
    pub name: Option<String>,
    pub compartment: String,
    pub initial: Option<InitialQuantity>,
    /// Defaults to the model substance unit.
    pub substance_unit: Option<String>,
    /// When `true` the species symbol denotes its amount, otherwise its
    /// concentration (amount per compartment size).
    pub has_only_substance_units: bool,
    pub constant: bool,
}

/// Where a model-level parameter was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterOrigin {
    Model,
    /// Declared next to a reaction and promoted to model scope.
    Reaction(ReactionId),
}

/// Parameter: a named value visible to every expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub key: ParameterId,
    pub id: String,
    pub name: Option<String>,
    /// NaN when the value is only defined by an assignment rule.
    pub value: f64,
    pub unit: Option<String>,
    pub constant: bool,
    pub origin: ParameterOrigin,
}

impl Parameter {
    /// Non-constant with no value: needs exactly one assignment rule.
    pub fn is_derived(&self) -> bool {
        !self.constant && self.value.is_nan()
    }
}

/// Parameter visible only inside its reaction's rate law.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalParameter {
    pub id: String,
    pub value: f64,
    pub unit: Option<String>,
}

/// Assignment rule `target = expression`. Several rules may name one target;
/// assembly rejects that.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRule {
    pub key: RuleId,
    pub target: String,
    pub expression: String,
}

/// Reaction: a stoichiometric transformation with a rate law.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub key: ReactionId,
    pub id: String,
    pub name: Option<String>,
    pub equation: ReactionEquation,
    /// Rate-law expression, in extent per time.
    pub rate_law: String,
    pub local_parameters: Vec<LocalParameter>,
}

impl Reaction {
    pub fn local_parameter(&self, id: &str) -> Option<(usize, &LocalParameter)> {
        self.local_parameters
            .iter()
            .enumerate()
            .find(|(_, p)| p.id == id)
    }

    /// Net stoichiometry per species, in equation order.
    ///
    /// Reactant coefficients are negated; a species on both sides is summed.
    pub fn net_stoichiometry(&self) -> Vec<(&str, f64)> {
        let mut out: Vec<(&str, f64)> = Vec::new();
        let reactants = self
            .equation
            .reactants
            .iter()
            .map(|t| (t.species.as_str(), -t.coefficient));
        let products = self
            .equation
            .products
            .iter()
            .map(|t| (t.species.as_str(), t.coefficient));
        for (species, coefficient) in reactants.chain(products) {
            match out.iter_mut().find(|(s, _)| *s == species) {
                Some(entry) => entry.1 += coefficient,
                None => out.push((species, coefficient)),
            }
        }
        out
    }

    /// Drop a species from both sides of the equation.
    pub fn remove_species(&mut self, species: &str) {
        self.equation.reactants.retain(|t| t.species != species);
        self.equation.products.retain(|t| t.species != species);
    }

    pub fn involves(&self, species: &str) -> bool {
        self.equation.species().any(|s| s == species)
    }
}

/// Model-wide default and reference units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelUnits {
    pub time: Option<String>,
    pub extent: Option<String>,
    pub substance: Option<String>,
    pub length: Option<String>,
    pub area: Option<String>,
    pub volume: Option<String>,
}

impl ModelUnits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(mut self, unit: impl Into<String>) -> Self {
        self.time = Some(unit.into());
        self
    }

    pub fn extent(mut self, unit: impl Into<String>) -> Self {
        self.extent = Some(unit.into());
        self
    }

    pub fn substance(mut self, unit: impl Into<String>) -> Self {
        self.substance = Some(unit.into());
        self
    }

    pub fn length(mut self, unit: impl Into<String>) -> Self {
        self.length = Some(unit.into());
        self
    }

    pub fn area(mut self, unit: impl Into<String>) -> Self {
        self.area = Some(unit.into());
        self
    }

    pub fn volume(mut self, unit: impl Into<String>) -> Self {
        self.volume = Some(unit.into());
        self
    }
}
