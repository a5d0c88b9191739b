//! Assembled, validated and finalized models.

use crate::draft::Draft;
use crate::error::Rejected;
use crate::state::{ModelState, StateView};
use kinetic_analyzer::{Environment, SymbolRef};
use kinetic_compiler::{Assembly, OdeSystem, UnitTable};
use kinetic_constraint::validate;
use kinetic_core::{Namespace, Violations};
use kinetic_graph::ReactionGraph;
use kinetic_registry::{Registry, RegistryError, RegistryResult};

/// A model whose equations have been generated but not yet checked.
#[derive(Debug, Clone)]
pub struct Assembling {
    draft: Draft,
    assembly: Assembly,
}

impl Assembling {
    pub(crate) fn new(draft: Draft, assembly: Assembly) -> Self {
        Self { draft, assembly }
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    /// Run the whole-model consistency checks.
    pub fn validate(self) -> Result<Validated, Rejected> {
        match validate(&self.assembly, self.draft.options()) {
            Ok(warnings) => {
                tracing::info!(warnings = warnings.len(), "model validated");
                Ok(Validated {
                    assembly: self.assembly,
                    warnings,
                })
            }
            Err(err) => {
                let report = err.into_violations();
                tracing::info!(errors = report.errors().count(), "validation rejected");
                Err(Rejected::new(self.draft, report))
            }
        }
    }
}

/// A model that passed every check.
#[derive(Debug, Clone)]
pub struct Validated {
    assembly: Assembly,
    warnings: Violations,
}

impl Validated {
    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    pub fn warnings(&self) -> &Violations {
        &self.warnings
    }

    pub fn finalize(self) -> Finalized {
        let registry = &self.assembly.registry;
        let compartment_of = registry
            .all_species()
            .iter()
            .map(|s| registry.compartment_by_id(&s.compartment).map(|c| c.key.index()))
            .collect();
        let graph = ReactionGraph::from_assembly(&self.assembly);
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "model finalized"
        );
        Finalized {
            assembly: self.assembly,
            warnings: self.warnings,
            graph,
            compartment_of,
        }
    }
}

/// An immutable, checked model.
#[derive(Debug, Clone)]
pub struct Finalized {
    assembly: Assembly,
    warnings: Violations,
    graph: ReactionGraph,
    /// Compartment key per species key.
    compartment_of: Vec<Option<usize>>,
}

impl Finalized {
    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    pub fn registry(&self) -> &Registry {
        &self.assembly.registry
    }

    pub fn system(&self) -> &OdeSystem {
        &self.assembly.system
    }

    pub fn units(&self) -> &UnitTable {
        &self.assembly.units
    }

    pub fn warnings(&self) -> &Violations {
        &self.warnings
    }

    pub fn graph(&self) -> &ReactionGraph {
        &self.graph
    }

    // ==================== STATE ====================

    /// Declared values, with species at the initial amounts of their
    /// differential equations.
    ///
    /// Assignment rules are not applied; evaluation applies them. Species
    /// assigned by a rule start at zero.
    pub fn initial_state(&self) -> ModelState {
        let registry = self.registry();
        let mut amounts = vec![0.0; registry.all_species().len()];
        for equation in &self.system().differential {
            amounts[equation.species.index()] = equation.initial_amount;
        }
        ModelState::initial(registry, amounts)
    }

    /// Bind a model parameter by identifier.
    pub fn set_parameter(&self, state: &mut ModelState, id: &str, value: f64) -> RegistryResult<()> {
        let parameter = self
            .registry()
            .parameter_by_id(id)
            .ok_or_else(|| RegistryError::unknown(Namespace::Parameter, id))?;
        state.set_parameter(parameter.key, value);
        Ok(())
    }

    /// Bind a reaction-local parameter.
    pub fn set_local_parameter(
        &self,
        state: &mut ModelState,
        reaction: &str,
        id: &str,
        value: f64,
    ) -> RegistryResult<()> {
        let found = self
            .registry()
            .reaction_by_id(reaction)
            .ok_or_else(|| RegistryError::unknown(Namespace::Reaction, reaction))?;
        let (index, _) = found
            .local_parameter(id)
            .ok_or_else(|| RegistryError::unknown(Namespace::Parameter, id))?;
        state.locals[found.key.index()][index] = value;
        Ok(())
    }

    pub fn set_amount(&self, state: &mut ModelState, species: &str, amount: f64) -> RegistryResult<()> {
        let species = self
            .registry()
            .species_by_id(species)
            .ok_or_else(|| RegistryError::unknown(Namespace::Species, species))?;
        state.set_amount(species.key, amount);
        Ok(())
    }

    pub fn set_size(&self, state: &mut ModelState, compartment: &str, size: f64) -> RegistryResult<()> {
        let compartment = self
            .registry()
            .compartment_by_id(compartment)
            .ok_or_else(|| RegistryError::unknown(Namespace::Compartment, compartment))?;
        state.set_size(compartment.key, size);
        Ok(())
    }

    // ==================== EVALUATION ====================

    fn view<'s>(&'s self, state: &'s ModelState) -> StateView<'s> {
        StateView {
            registry: self.registry(),
            compartment_of: &self.compartment_of,
            state,
        }
    }

    /// Evaluate every assignment rule in dependency order, writing the
    /// results into `state`.
    pub fn apply_assignments(&self, state: &mut ModelState) {
        for equation in self.system().ordered_algebraic() {
            let value = equation.expression.evaluate(&self.view(state));
            match equation.target {
                SymbolRef::Parameter(key) => state.parameters[key.index()] = value,
                SymbolRef::Compartment(key) => state.sizes[key.index()] = value,
                SymbolRef::Species(key) => {
                    let i = key.index();
                    let species = &self.registry().all_species()[i];
                    state.amounts[i] = match self.compartment_of[i] {
                        Some(c) if !species.has_only_substance_units => value * state.sizes[c],
                        _ => value,
                    };
                }
                SymbolRef::LocalParameter(..) => {}
            }
        }
    }

    /// Rule target values, in rule registration order.
    pub fn assignments(&self, state: &ModelState) -> Vec<(String, f64)> {
        let mut scratch = state.clone();
        self.apply_assignments(&mut scratch);
        let view = self.view(&scratch);
        self.system()
            .algebraic
            .iter()
            .map(|eq| (self.registry().rule(eq.rule).target.clone(), view.value(eq.target)))
            .collect()
    }

    /// Reaction rates in extent per time, one per reaction.
    pub fn rates(&self, state: &ModelState) -> Vec<f64> {
        let mut scratch = state.clone();
        self.apply_assignments(&mut scratch);
        let view = self.view(&scratch);
        self.system()
            .rates
            .iter()
            .map(|rate| rate.expression.evaluate(&view))
            .collect()
    }

    /// Right-hand side of the differential equations, one value per
    /// equation in [`OdeSystem::differential`] order.
    pub fn derivatives(&self, state: &ModelState) -> Vec<f64> {
        let rates = self.rates(state);
        self.system()
            .differential
            .iter()
            .map(|eq| {
                eq.terms
                    .iter()
                    .map(|term| term.coefficient * rates[term.reaction.index()])
                    .sum()
            })
            .collect()
    }
}
