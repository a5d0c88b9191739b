//! Late-bound values for right-hand-side evaluation.

use kinetic_analyzer::{Environment, SymbolRef};
use kinetic_core::{CompartmentId, ParameterId, SpeciesId};
use kinetic_registry::Registry;

/// Current values of every symbol a model expression can read.
///
/// Species are held as amounts, indexed by species key. Values are bound
/// when an expression is evaluated, so changing a parameter here changes
/// every rate law and rule that reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelState {
    pub(crate) amounts: Vec<f64>,
    pub(crate) sizes: Vec<f64>,
    pub(crate) parameters: Vec<f64>,
    /// Per reaction, in declaration order.
    pub(crate) locals: Vec<Vec<f64>>,
}

impl ModelState {
    pub(crate) fn initial(registry: &Registry, amounts: Vec<f64>) -> Self {
        Self {
            amounts,
            sizes: registry.compartments().iter().map(|c| c.size).collect(),
            parameters: registry.parameters().iter().map(|p| p.value).collect(),
            locals: registry
                .reactions()
                .iter()
                .map(|r| r.local_parameters.iter().map(|p| p.value).collect())
                .collect(),
        }
    }

    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    pub fn amount(&self, species: SpeciesId) -> f64 {
        self.amounts[species.index()]
    }

    pub fn set_amount(&mut self, species: SpeciesId, amount: f64) {
        self.amounts[species.index()] = amount;
    }

    pub fn size(&self, compartment: CompartmentId) -> f64 {
        self.sizes[compartment.index()]
    }

    pub fn set_size(&mut self, compartment: CompartmentId, size: f64) {
        self.sizes[compartment.index()] = size;
    }

    pub fn parameter(&self, parameter: ParameterId) -> f64 {
        self.parameters[parameter.index()]
    }

    pub fn set_parameter(&mut self, parameter: ParameterId, value: f64) {
        self.parameters[parameter.index()] = value;
    }
}

/// Reads a [`ModelState`] through the registry's symbol semantics.
pub(crate) struct StateView<'a> {
    pub registry: &'a Registry,
    /// Compartment key per species key.
    pub compartment_of: &'a [Option<usize>],
    pub state: &'a ModelState,
}

impl StateView<'_> {
    /// Amount per compartment size, unless the species is declared in
    /// substance units.
    fn species_value(&self, species: usize) -> f64 {
        let amount = self.state.amounts[species];
        if self.registry.all_species()[species].has_only_substance_units {
            return amount;
        }
        match self.compartment_of[species] {
            Some(c) => amount / self.state.sizes[c],
            None => amount,
        }
    }
}

impl Environment for StateView<'_> {
    fn value(&self, symbol: SymbolRef) -> f64 {
        match symbol {
            SymbolRef::LocalParameter(reaction, i) => self.state.locals[reaction.index()][i],
            SymbolRef::Species(key) => self.species_value(key.index()),
            SymbolRef::Parameter(key) => self.state.parameters[key.index()],
            SymbolRef::Compartment(key) => self.state.sizes[key.index()],
        }
    }
}
