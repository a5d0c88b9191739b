//! Kinetic Registry
//!
//! Entity storage for a model declaration. The builder registers units,
//! compartments, species, parameters, assignment rules and reactions, checking
//! identifiers and local entity shape as each entity is added. The registry it
//! produces is immutable and preserves registration order in every namespace.
//! Cross-references between entities are checked later, during assembly.

mod builder;
mod error;
mod registry;
mod types;

pub use builder::{
    CompartmentBuilder, ParameterBuilder, ReactionBuilder, RegistryBuilder, RuleBuilder,
    SpeciesBuilder, UnitBuilder,
};
pub use error::{RegistryError, RegistryResult};
pub use registry::{EntityRef, Registry};
pub use types::*;
