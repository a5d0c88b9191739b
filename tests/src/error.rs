//! Error types for the scenario framework.

use kinetic_registry::RegistryError;
use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The model builder failed.
    #[error("failed to build model for scenario '{scenario}': {source}")]
    ModelSetup {
        scenario: String,
        source: RegistryError,
    },

    /// No model builder was given.
    #[error("model not specified for scenario '{scenario}'")]
    MissingModel { scenario: String },

    /// Assertion failed.
    #[error("assertion failed for step '{step}': {message}")]
    AssertionFailed { step: String, message: String },
}

impl ScenarioError {
    pub fn model_setup(scenario: impl Into<String>, source: RegistryError) -> Self {
        Self::ModelSetup {
            scenario: scenario.into(),
            source,
        }
    }

    pub fn missing_model(scenario: impl Into<String>) -> Self {
        Self::MissingModel {
            scenario: scenario.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}
