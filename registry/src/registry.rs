//! The Registry - immutable entity lookup.

use crate::error::{RegistryError, RegistryResult};
use crate::types::*;
use kinetic_core::{
    CompartmentId, EntityId, Namespace, ParameterId, ReactionId, RuleId, SpeciesId, UnitId,
};
use kinetic_units::UnitDefinition;
use std::collections::HashMap;

/// A borrowed entity of any namespace.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Unit(&'a UnitDefinition),
    Compartment(&'a Compartment),
    Species(&'a Species),
    Parameter(&'a Parameter),
    Reaction(&'a Reaction),
    Rule(&'a AssignmentRule),
}

/// The Registry provides lookup of every declared entity.
/// Entities are stored in registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub(crate) units: Vec<UnitDefinition>,
    pub(crate) compartments: Vec<Compartment>,
    pub(crate) species: Vec<Species>,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) rules: Vec<AssignmentRule>,
    pub(crate) reactions: Vec<Reaction>,
    pub(crate) model_units: ModelUnits,

    /// Identifier to index, per namespace.
    pub(crate) names: HashMap<Namespace, HashMap<String, u32>>,
}

impl Registry {
    pub(crate) fn index_of(&self, namespace: Namespace, id: &str) -> Option<u32> {
        self.names.get(&namespace).and_then(|m| m.get(id)).copied()
    }

    pub(crate) fn insert_name(&mut self, namespace: Namespace, id: &str, index: u32) {
        self.names
            .entry(namespace)
            .or_default()
            .insert(id.to_string(), index);
    }

    pub fn contains(&self, namespace: Namespace, id: &str) -> bool {
        self.index_of(namespace, id).is_some()
    }

    /// Resolve an identifier within one namespace.
    pub fn resolve(&self, id: &str, namespace: Namespace) -> RegistryResult<EntityId> {
        let index = self
            .index_of(namespace, id)
            .ok_or_else(|| RegistryError::unknown(namespace, id))?;
        Ok(match namespace {
            Namespace::Unit => EntityId::Unit(UnitId::new(index)),
            Namespace::Compartment => EntityId::Compartment(CompartmentId::new(index)),
            Namespace::Species => EntityId::Species(SpeciesId::new(index)),
            Namespace::Parameter => EntityId::Parameter(ParameterId::new(index)),
            Namespace::Reaction => EntityId::Reaction(ReactionId::new(index)),
            Namespace::Rule => EntityId::Rule(RuleId::new(index)),
        })
    }

    /// Resolve an identifier to the entity itself.
    pub fn get(&self, id: &str, namespace: Namespace) -> RegistryResult<EntityRef<'_>> {
        Ok(match self.resolve(id, namespace)? {
            EntityId::Unit(key) => EntityRef::Unit(&self.units[key.index()]),
            EntityId::Compartment(key) => EntityRef::Compartment(self.compartment(key)),
            EntityId::Species(key) => EntityRef::Species(self.species(key)),
            EntityId::Parameter(key) => EntityRef::Parameter(self.parameter(key)),
            EntityId::Reaction(key) => EntityRef::Reaction(self.reaction(key)),
            EntityId::Rule(key) => EntityRef::Rule(self.rule(key)),
        })
    }

    /// Symbolic namespaces that declare `id`, in lookup order.
    pub fn namespaces_of(&self, id: &str) -> Vec<Namespace> {
        Namespace::symbolic()
            .iter()
            .copied()
            .filter(|ns| self.contains(*ns, id))
            .collect()
    }

    // ==================== Model Units ====================

    pub fn model_units(&self) -> &ModelUnits {
        &self.model_units
    }

    // ==================== Units ====================

    pub fn units(&self) -> &[UnitDefinition] {
        &self.units
    }

    pub fn unit_by_id(&self, id: &str) -> Option<&UnitDefinition> {
        self.index_of(Namespace::Unit, id)
            .map(|i| &self.units[i as usize])
    }

    // ==================== Compartments ====================

    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }

    pub fn compartment(&self, key: CompartmentId) -> &Compartment {
        &self.compartments[key.index()]
    }

    pub fn compartment_by_id(&self, id: &str) -> Option<&Compartment> {
        self.index_of(Namespace::Compartment, id)
            .map(|i| &self.compartments[i as usize])
    }

    // ==================== Species ====================

    pub fn all_species(&self) -> &[Species] {
        &self.species
    }

    pub fn species(&self, key: SpeciesId) -> &Species {
        &self.species[key.index()]
    }

    pub fn species_by_id(&self, id: &str) -> Option<&Species> {
        self.index_of(Namespace::Species, id)
            .map(|i| &self.species[i as usize])
    }

    // ==================== Parameters ====================

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, key: ParameterId) -> &Parameter {
        &self.parameters[key.index()]
    }

    pub fn parameter_by_id(&self, id: &str) -> Option<&Parameter> {
        self.index_of(Namespace::Parameter, id)
            .map(|i| &self.parameters[i as usize])
    }

    // ==================== Rules ====================

    pub fn rules(&self) -> &[AssignmentRule] {
        &self.rules
    }

    pub fn rule(&self, key: RuleId) -> &AssignmentRule {
        &self.rules[key.index()]
    }

    /// The first assignment rule writing `target`, if any.
    pub fn rule_for(&self, target: &str) -> Option<&AssignmentRule> {
        self.index_of(Namespace::Rule, target)
            .map(|i| &self.rules[i as usize])
    }

    /// Every assignment rule writing `target`, in registration order.
    pub fn rules_for<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a AssignmentRule> + 'a {
        self.rules.iter().filter(move |r| r.target == target)
    }

    // ==================== Reactions ====================

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn reaction(&self, key: ReactionId) -> &Reaction {
        &self.reactions[key.index()]
    }

    pub fn reaction_by_id(&self, id: &str) -> Option<&Reaction> {
        self.index_of(Namespace::Reaction, id)
            .map(|i| &self.reactions[i as usize])
    }

    /// Reactions whose equation mentions `species`, in registration order.
    pub fn reactions_involving<'a>(
        &'a self,
        species: &'a str,
    ) -> impl Iterator<Item = &'a Reaction> + 'a {
        self.reactions.iter().filter(move |r| r.involves(species))
    }

    /// Total number of registered entities across namespaces.
    pub fn entity_count(&self) -> usize {
        self.units.len()
            + self.compartments.len()
            + self.species.len()
            + self.parameters.len()
            + self.rules.len()
            + self.reactions.len()
    }
}
