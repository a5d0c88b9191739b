//! Kinetic Analyzer
//!
//! Name resolution and unit inference for rate laws and rule expressions.
//! Parsed expressions are bound against a scope of registry entities and
//! turned into symbolic expressions that reference entities, never values.

mod error;
mod resolver;
mod scope;
mod symexpr;
mod units;

pub use error::{ResolveError, ResolveResult, UnitCheckError};
pub use resolver::Resolver;
pub use scope::Scope;
pub use symexpr::{Environment, Function, SymExpr, SymbolRef};
pub use units::{SymbolUnits, UnitChecker};
