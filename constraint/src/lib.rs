//! Kinetic Constraint
//!
//! Whole-model consistency checks run after assembly.
//!
//! Responsibilities:
//! - Check rate-law, rule and derivative units against the model units
//! - Detect identifiers shared across namespaces
//! - Report dead declarations
//! - Distinguish errors (reject) from warnings (report)

mod checker;
mod error;
mod options;

pub use checker::{validate, ConsistencyChecker};
pub use error::{ConstraintError, ConstraintResult};
pub use kinetic_core::{Severity, Violation, Violations};
pub use options::CheckOptions;
