//! Kinetic Unit Algebra
//!
//! Reduces unit definitions and unit expressions to dimension vectors over the
//! seven SI base dimensions plus an aggregate factor to SI. Two units are
//! compatible when their dimension vectors are equal; the factor only matters
//! for conversion.

mod base;
mod definition;
mod dimension;
mod error;
mod expr;
mod system;

pub use base::{base_unit, is_base_unit, BaseUnit, Prefix, PREFIXES};
pub use definition::{UnitBody, UnitDefinition, UnitTerm};
pub use dimension::{BaseDimension, Dimension, ReducedUnit};
pub use error::{UnitError, UnitResult};
pub use expr::parse_unit_expr;
pub use system::{convert_factor, UnitSystem};
