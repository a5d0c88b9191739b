//! Kinetic Tests
//!
//! Scenario framework for integration tests. A scenario starts from a model
//! builder, then runs named steps. Each step optionally edits the draft, then
//! compiles a copy and checks the outcome against its assertion. Edits
//! accumulate across steps.

mod assertion;
mod error;
pub mod models;
mod runner;
mod scenario;

pub use assertion::{Assertion, AssertionBuilder};
pub use error::{ScenarioError, ScenarioResult};
pub use runner::{Outcome, Runner};
pub use scenario::{Scenario, Step};

pub mod prelude {
    pub use crate::models;
    pub use crate::{Assertion, AssertionBuilder, Outcome, Scenario, ScenarioError};
    pub use kinetic_core::{ErrorKind, Subject};
    pub use kinetic_model::{Draft, Finalized};
}
