//! Kinetic Compiler
//!
//! Assembles a registry into an ODE system.
//!
//! Responsibilities:
//! - Check cross-references between entities
//! - Reduce every unit reference
//! - Resolve rate laws and assignment rules
//! - Order rules for evaluation, rejecting cycles
//! - Build one differential equation per species and one algebraic
//!   equation per rule

mod compiler;
mod error;
mod order;
mod system;
mod unit_table;

pub use compiler::{assemble, Assembly, Compiler};
pub use error::{CompileError, CompileResult};
pub use order::rule_order;
pub use system::{AlgebraicEquation, DifferentialEquation, OdeSystem, OdeTerm, RateLaw};
pub use unit_table::{ResolvedModelUnits, UnitTable};
