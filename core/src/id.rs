//! Identity types for model entities.
//!
//! Entity ids are dense indices assigned in registration order, so iterating a
//! namespace by id reproduces declaration order. Ids are only meaningful
//! relative to the registry that issued them.

use serde::Serialize;
use std::fmt;

/// Unique identifier for a compartment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CompartmentId(pub u32);

impl CompartmentId {
    /// Create a new CompartmentId from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Position in registration order.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CompartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Unique identifier for a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SpeciesId(pub u32);

impl SpeciesId {
    /// Create a new SpeciesId from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Position in registration order.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Unique identifier for a model-level parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ParameterId(pub u32);

impl ParameterId {
    /// Create a new ParameterId from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Position in registration order.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Unique identifier for a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ReactionId(pub u32);

impl ReactionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ReactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Unique identifier for an assignment rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RuleId(pub u32);

impl RuleId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

/// Unique identifier for a unit definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UnitId(pub u32);

impl UnitId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}

/// The independent identifier namespaces of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    Unit,
    Compartment,
    Species,
    Parameter,
    Reaction,
    Rule,
}

impl Namespace {
    pub fn name(&self) -> &'static str {
        match self {
            Namespace::Unit => "unit",
            Namespace::Compartment => "compartment",
            Namespace::Species => "species",
            Namespace::Parameter => "parameter",
            Namespace::Reaction => "reaction",
            Namespace::Rule => "rule",
        }
    }

    /// Namespaces whose identifiers may appear as symbols inside expressions.
    pub fn symbolic() -> &'static [Namespace] {
        &[
            Namespace::Compartment,
            Namespace::Species,
            Namespace::Parameter,
        ]
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unified identifier for any registered entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    Unit(UnitId),
    Compartment(CompartmentId),
    Species(SpeciesId),
    Parameter(ParameterId),
    Reaction(ReactionId),
    Rule(RuleId),
}

impl EntityId {
    /// The namespace this id belongs to.
    pub fn namespace(&self) -> Namespace {
        match self {
            EntityId::Unit(_) => Namespace::Unit,
            EntityId::Compartment(_) => Namespace::Compartment,
            EntityId::Species(_) => Namespace::Species,
            EntityId::Parameter(_) => Namespace::Parameter,
            EntityId::Reaction(_) => Namespace::Reaction,
            EntityId::Rule(_) => Namespace::Rule,
        }
    }

    pub fn as_species(&self) -> Option<SpeciesId> {
        match self {
            EntityId::Species(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<ParameterId> {
        match self {
            EntityId::Parameter(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_compartment(&self) -> Option<CompartmentId> {
        match self {
            EntityId::Compartment(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<CompartmentId> for EntityId {
    fn from(id: CompartmentId) -> Self {
        EntityId::Compartment(id)
    }
}

impl From<SpeciesId> for EntityId {
    fn from(id: SpeciesId) -> Self {
        EntityId::Species(id)
    }
}

impl From<ParameterId> for EntityId {
    fn from(id: ParameterId) -> Self {
        EntityId::Parameter(id)
    }
}

impl From<ReactionId> for EntityId {
    fn from(id: ReactionId) -> Self {
        EntityId::Reaction(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Unit(id) => write!(f, "{}", id),
            EntityId::Compartment(id) => write!(f, "{}", id),
            EntityId::Species(id) => write!(f, "{}", id),
            EntityId::Parameter(id) => write!(f, "{}", id),
            EntityId::Reaction(id) => write!(f, "{}", id),
            EntityId::Rule(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_id_equality() {
        let id1 = SpeciesId::new(1);
        let id2 = SpeciesId::new(1);
        let id3 = SpeciesId::new(2);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_entity_id_namespace() {
        let entity: EntityId = ParameterId::new(3).into();

        assert_eq!(entity.namespace(), Namespace::Parameter);
        assert_eq!(entity.as_parameter(), Some(ParameterId::new(3)));
        assert_eq!(entity.as_species(), None);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(CompartmentId::new(0).to_string(), "c0");
        assert_eq!(SpeciesId::new(4).to_string(), "s4");
        assert_eq!(EntityId::Reaction(ReactionId::new(2)).to_string(), "r2");
    }

    #[test]
    fn test_symbolic_namespaces_exclude_reactions() {
        assert!(!Namespace::symbolic().contains(&Namespace::Reaction));
        assert!(Namespace::symbolic().contains(&Namespace::Species));
    }
}
