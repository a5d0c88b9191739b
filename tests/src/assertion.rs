//! Assertion types and builders for verifying step outcomes.

use kinetic_core::{ErrorKind, Subject};
use kinetic_export::EquationListing;
use kinetic_model::Finalized;

use crate::error::{ScenarioError, ScenarioResult};
use crate::runner::Outcome;

/// A complete assertion for a step outcome.
#[derive(Default)]
pub struct Assertion {
    // Finalized model
    pub compiles: bool,
    pub odes: Option<usize>,
    pub assignments: Option<usize>,
    pub terms: Option<usize>,
    pub warnings: Option<usize>,
    pub derivatives: Option<Vec<f64>>,
    pub assignment_values: Vec<(String, f64)>,
    pub listing: Vec<String>,

    // Rejections
    pub rejected: Vec<(ErrorKind, Option<Subject>)>,
    pub errors: Option<usize>,
    pub registration: Option<Option<ErrorKind>>,

    // Failure message
    pub error: Option<String>,
    pub error_pattern: Option<String>,

    // Custom assertion function
    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&Finalized) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("compiles", &self.compiles)
            .field("odes", &self.odes)
            .field("assignments", &self.assignments)
            .field("terms", &self.terms)
            .field("warnings", &self.warnings)
            .field("derivatives", &self.derivatives)
            .field("rejected", &self.rejected)
            .field("errors", &self.errors)
            .field("registration", &self.registration)
            .field("error", &self.error)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    fn expects_failure(&self) -> bool {
        !self.rejected.is_empty() || self.errors.is_some() || self.registration.is_some()
    }

    fn expects_model(&self) -> bool {
        self.compiles
            || self.odes.is_some()
            || self.assignments.is_some()
            || self.terms.is_some()
            || self.warnings.is_some()
            || self.derivatives.is_some()
            || !self.assignment_values.is_empty()
            || !self.listing.is_empty()
            || self.custom.is_some()
    }

    /// Verify the assertion against an outcome.
    pub fn verify(&self, step: &str, outcome: &Outcome) -> ScenarioResult<()> {
        // Check failure messages first
        if let Some(ref expected) = self.error {
            match outcome.failure() {
                Some(msg) if msg.contains(expected.as_str()) => {}
                Some(msg) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error containing '{}', got: {}", expected, msg),
                    ))
                }
                None => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error containing '{}', but step succeeded", expected),
                    ))
                }
            }
        }

        if let Some(ref pattern) = self.error_pattern {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ScenarioError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            match outcome.failure() {
                Some(msg) if re.is_match(&msg) => {}
                Some(msg) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error matching '{}', got: {}", pattern, msg),
                    ))
                }
                None => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error matching '{}', but step succeeded", pattern),
                    ))
                }
            }
        }

        match outcome {
            Outcome::RegistrationFailed(err) => self.verify_registration(step, err.kind(), outcome),
            Outcome::Rejected(rejected) => self.verify_rejected(step, &rejected.report, outcome),
            Outcome::Finalized(model) => self.verify_model(step, model),
        }
    }

    fn verify_registration(
        &self,
        step: &str,
        kind: Option<ErrorKind>,
        outcome: &Outcome,
    ) -> ScenarioResult<()> {
        match self.registration {
            Some(Some(expected)) if kind != Some(expected) => Err(ScenarioError::assertion_failed(
                step,
                format!("expected registration error {}, got: {}", expected, outcome),
            )),
            Some(_) => Ok(()),
            None if self.error.is_some() || self.error_pattern.is_some() => Ok(()),
            None => Err(ScenarioError::assertion_failed(step, outcome.to_string())),
        }
    }

    fn verify_rejected(
        &self,
        step: &str,
        report: &kinetic_core::Violations,
        outcome: &Outcome,
    ) -> ScenarioResult<()> {
        if self.expects_model() || self.registration.is_some() {
            return Err(ScenarioError::assertion_failed(
                step,
                format!("step failed: {}", outcome),
            ));
        }
        if !self.expects_failure() && self.error.is_none() && self.error_pattern.is_none() {
            return Err(ScenarioError::assertion_failed(
                step,
                format!("unexpected rejection: {}", outcome),
            ));
        }

        for (kind, subject) in &self.rejected {
            let found = match subject {
                Some(subject) => report.contains(*kind, subject),
                None => report.errors().any(|v| v.kind == *kind),
            };
            if !found {
                let wanted = match subject {
                    Some(subject) => format!("{} on {}", kind, subject),
                    None => kind.to_string(),
                };
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} in report:\n{}", wanted, report),
                ));
            }
        }

        if let Some(expected) = self.errors {
            let actual = report.errors().count();
            if actual != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} errors, got {}:\n{}", expected, actual, report),
                ));
            }
        }

        Ok(())
    }

    fn verify_model(&self, step: &str, model: &Finalized) -> ScenarioResult<()> {
        // If we expect a failure but got success, that's a failure
        if self.expects_failure() || self.error.is_some() || self.error_pattern.is_some() {
            return Err(ScenarioError::assertion_failed(
                step,
                "expected failure, but step succeeded",
            ));
        }

        let system = model.system();
        check_count(step, "differential equations", self.odes, system.differential.len())?;
        check_count(step, "algebraic equations", self.assignments, system.algebraic.len())?;
        check_count(step, "reaction terms", self.terms, system.term_count())?;
        check_count(step, "warnings", self.warnings, model.warnings().len())?;

        if let Some(ref expected) = self.derivatives {
            let actual = model.derivatives(&model.initial_state());
            let matches = actual.len() == expected.len()
                && actual.iter().zip(expected).all(|(a, e)| approx_eq(*a, *e));
            if !matches {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "derivatives mismatch:\n  expected: {:?}\n  actual:   {:?}",
                        expected, actual
                    ),
                ));
            }
        }

        if !self.assignment_values.is_empty() {
            let actual = model.assignments(&model.initial_state());
            for (target, expected) in &self.assignment_values {
                match actual.iter().find(|(t, _)| t == target) {
                    Some((_, value)) if approx_eq(*value, *expected) => {}
                    Some((_, value)) => {
                        return Err(ScenarioError::assertion_failed(
                            step,
                            format!("expected {} = {}, got {}", target, expected, value),
                        ))
                    }
                    None => {
                        return Err(ScenarioError::assertion_failed(
                            step,
                            format!("no assignment rule for '{}'", target),
                        ))
                    }
                }
            }
        }

        if !self.listing.is_empty() {
            let listing = EquationListing::new().render(model).map_err(|e| {
                ScenarioError::assertion_failed(step, format!("listing failed: {}", e))
            })?;
            for line in &self.listing {
                if !listing.lines().any(|l| l == line) {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected listing line '{}' in:\n{}", line, listing),
                    ));
                }
            }
        }

        // Run custom assertion if present
        if let Some(ref custom) = self.custom {
            if !custom(model) {
                return Err(ScenarioError::assertion_failed(step, "custom assertion failed"));
            }
        }

        Ok(())
    }
}

/// Builder for creating assertions fluently.
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    /// Create a new assertion builder.
    pub fn new() -> Self {
        Self {
            assertion: Assertion::new(),
        }
    }

    /// Build the assertion.
    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ========== Finalized model ==========

    /// Expect the model to compile, with no errors.
    pub fn no_errors(mut self) -> Self {
        self.assertion.compiles = true;
        self
    }

    /// Expect N differential equations.
    pub fn odes(mut self, n: usize) -> Self {
        self.assertion.odes = Some(n);
        self
    }

    /// Expect N algebraic equations.
    pub fn assignments(mut self, n: usize) -> Self {
        self.assertion.assignments = Some(n);
        self
    }

    /// Expect N reaction terms across all derivatives.
    pub fn terms(mut self, n: usize) -> Self {
        self.assertion.terms = Some(n);
        self
    }

    /// Expect N warnings.
    pub fn warnings(mut self, n: usize) -> Self {
        self.assertion.warnings = Some(n);
        self
    }

    /// Expect these derivatives at the initial state.
    pub fn derivatives(mut self, values: &[f64]) -> Self {
        self.assertion.derivatives = Some(values.to_vec());
        self
    }

    /// Expect a rule target value at the initial state.
    pub fn assigned(mut self, target: impl Into<String>, value: f64) -> Self {
        self.assertion.assignment_values.push((target.into(), value));
        self
    }

    /// Expect a line in the equation listing.
    pub fn listing_line(mut self, line: impl Into<String>) -> Self {
        self.assertion.listing.push(line.into());
        self
    }

    // ========== Rejections ==========

    /// Expect a rejection containing this error on this subject.
    pub fn rejected_with(mut self, kind: ErrorKind, subject: Subject) -> Self {
        self.assertion.rejected.push((kind, Some(subject)));
        self
    }

    /// Expect a rejection containing this error on any subject.
    pub fn rejected_kind(mut self, kind: ErrorKind) -> Self {
        self.assertion.rejected.push((kind, None));
        self
    }

    /// Expect exactly N errors in the rejection report.
    pub fn errors(mut self, n: usize) -> Self {
        self.assertion.errors = Some(n);
        self
    }

    /// Expect the edit to be refused at registration.
    pub fn registration_error(mut self, kind: ErrorKind) -> Self {
        self.assertion.registration = Some(Some(kind));
        self
    }

    /// Expect the edit to be refused at registration, for any reason.
    pub fn registration_failed(mut self) -> Self {
        self.assertion.registration = Some(None);
        self
    }

    // ========== Error message ==========

    /// Expect the failure message to contain a string.
    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.assertion.error = Some(contains.into());
        self
    }

    /// Expect the failure message to match a regex pattern.
    pub fn error_matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.error_pattern = Some(pattern.into());
        self
    }

    // ========== Advanced ==========

    /// Custom assertion function.
    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Finalized) -> bool + Send + Sync + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}

impl Default for AssertionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions

fn check_count(step: &str, what: &str, expected: Option<usize>, actual: usize) -> ScenarioResult<()> {
    match expected {
        Some(expected) if expected != actual => Err(ScenarioError::assertion_failed(
            step,
            format!("expected {} {}, got {}", expected, what, actual),
        )),
        _ => Ok(()),
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
