//! Scenario definition and builder.

use kinetic_model::Draft;
use kinetic_registry::RegistryResult;

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::ScenarioResult;
use crate::runner::Runner;

/// Builds the starting draft of a scenario.
pub type ModelFn = Box<dyn Fn() -> RegistryResult<Draft>>;

/// Edits the draft before a step compiles it.
pub type EditFn = Box<dyn Fn(&mut Draft) -> RegistryResult<()>>;

/// A step in a scenario with its assertion.
pub struct Step {
    /// Step name (for reporting).
    pub name: String,
    /// Applied to the scenario's draft before compiling.
    pub edit: Option<EditFn>,
    /// Assertion to verify the outcome.
    pub assertion: Assertion,
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("edit", &self.edit.as_ref().map(|_| "<fn>"))
            .field("assertion", &self.assertion)
            .finish()
    }
}

/// A complete test scenario.
pub struct Scenario {
    /// Scenario name (for reporting).
    name: String,
    /// Builds the starting draft.
    model: Option<ModelFn>,
    /// Steps with assertions.
    steps: Vec<Step>,
}

impl Scenario {
    /// Create a new scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
            steps: Vec::new(),
        }
    }

    /// Set the model builder, e.g. [`crate::models::caffeine`].
    pub fn model<F>(mut self, model: F) -> Self
    where
        F: Fn() -> RegistryResult<Draft> + 'static,
    {
        self.model = Some(Box::new(model));
        self
    }

    /// Compile the current draft and check the outcome.
    pub fn step<F>(mut self, name: impl Into<String>, assertion_fn: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let assertion = assertion_fn(AssertionBuilder::new()).build();
        self.steps.push(Step {
            name: name.into(),
            edit: None,
            assertion,
        });
        self
    }

    /// Edit the draft, then compile it and check the outcome.
    ///
    /// The edit stays in place for later steps. A failing edit is checked
    /// as a registration failure and nothing is compiled.
    pub fn edit<E, F>(mut self, name: impl Into<String>, edit: E, assertion_fn: F) -> Self
    where
        E: Fn(&mut Draft) -> RegistryResult<()> + 'static,
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let assertion = assertion_fn(AssertionBuilder::new()).build();
        self.steps.push(Step {
            name: name.into(),
            edit: Some(Box::new(edit)),
            assertion,
        });
        self
    }

    /// Run the scenario and return the result.
    pub fn run(&self) -> ScenarioResult<()> {
        Runner::new(self).run()
    }

    /// Get the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn model_fn(&self) -> Option<&ModelFn> {
        self.model.as_ref()
    }

    /// Get the steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}
