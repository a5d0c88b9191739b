//! Scenario runner.

use std::fmt;

use kinetic_model::{Finalized, Rejected};
use kinetic_registry::RegistryError;

use crate::error::{ScenarioError, ScenarioResult};
use crate::scenario::Scenario;

/// What a step produced.
#[derive(Debug)]
pub enum Outcome {
    /// The edit itself was refused by the registry.
    RegistrationFailed(RegistryError),
    /// Assembly or validation failed.
    Rejected(Box<Rejected>),
    Finalized(Box<Finalized>),
}

impl Outcome {
    /// Failure message, if the step failed.
    pub fn failure(&self) -> Option<String> {
        match self {
            Outcome::RegistrationFailed(err) => Some(err.to_string()),
            Outcome::Rejected(rejected) => Some(rejected.to_string()),
            Outcome::Finalized(_) => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::RegistrationFailed(err) => write!(f, "registration failed: {}", err),
            Outcome::Rejected(rejected) => write!(f, "{}", rejected),
            Outcome::Finalized(model) => write!(
                f,
                "finalized with {} differential and {} algebraic equations",
                model.system().differential.len(),
                model.system().algebraic.len()
            ),
        }
    }
}

/// Runs a scenario against the model lifecycle.
pub struct Runner<'s> {
    scenario: &'s Scenario,
}

impl<'s> Runner<'s> {
    /// Create a new runner for a scenario.
    pub fn new(scenario: &'s Scenario) -> Self {
        Self { scenario }
    }

    /// Run the scenario.
    pub fn run(&self) -> ScenarioResult<()> {
        let name = self.scenario.name();

        // 1. Build the starting draft
        let model = self
            .scenario
            .model_fn()
            .ok_or_else(|| ScenarioError::missing_model(name))?;
        let mut draft = model().map_err(|e| ScenarioError::model_setup(name, e))?;

        // 2. Apply each edit, compile a copy, verify
        for step in self.scenario.steps() {
            let edited = match &step.edit {
                Some(edit) => edit(&mut draft),
                None => Ok(()),
            };
            let outcome = match edited {
                Err(err) => Outcome::RegistrationFailed(err),
                Ok(()) => match draft.clone().compile() {
                    Ok(model) => Outcome::Finalized(Box::new(model)),
                    Err(rejected) => Outcome::Rejected(Box::new(rejected)),
                },
            };
            step.assertion.verify(&step.name, &outcome)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::scenario::Scenario;
    use crate::ScenarioError;

    #[test]
    fn test_missing_model() {
        let scenario = Scenario::new("empty").step("compile", |a| a.no_errors());

        let err = scenario.run().unwrap_err();

        assert!(matches!(err, ScenarioError::MissingModel { .. }));
    }

    #[test]
    fn test_failed_assertion_names_step() {
        let scenario = Scenario::new("caffeine")
            .model(crate::models::caffeine)
            .step("count_odes", |a| a.odes(7));

        let err = scenario.run().unwrap_err();

        assert!(err.to_string().contains("count_odes"));
    }
}
