//! Kinetic Core Types
//!
//! This crate provides the foundational types shared by every stage of the
//! model compiler:
//! - Identity types (CompartmentId, SpeciesId, ParameterId, ReactionId, RuleId, UnitId)
//! - Namespaces and entity references
//! - Identifier shape validation
//! - The diagnostic vocabulary (ErrorKind, Severity, Subject)

mod diagnostic;
mod ident;
mod id;

pub use diagnostic::*;
pub use ident::*;
pub use id::*;
