//! Diagnostic vocabulary shared by every compilation stage.
//!
//! Local shape errors are raised immediately by the entity builders. Everything
//! that needs the whole model is collected into [`Violations`] so a rejected
//! model reports every problem at once.

use serde::Serialize;
use std::fmt;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DuplicateIdentifier,
    UnknownIdentifier,
    UnresolvedSymbol,
    UndefinedBaseUnit,
    IncompatibleUnits,
    AmbiguousDerivedQuantity,
    CyclicRule,
    AmbiguousIdentifier,
    ConflictingWrite,
    InvalidRuleTarget,
    UnknownFunction,
    InvalidExpression,
    DeadDeclaration,
    ShadowedIdentifier,
    /// A unit check was skipped because an operand has no unit.
    UndeterminedUnit,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::DuplicateIdentifier => "DuplicateIdentifier",
            ErrorKind::UnknownIdentifier => "UnknownIdentifier",
            ErrorKind::UnresolvedSymbol => "UnresolvedSymbol",
            ErrorKind::UndefinedBaseUnit => "UndefinedBaseUnit",
            ErrorKind::IncompatibleUnits => "IncompatibleUnits",
            ErrorKind::AmbiguousDerivedQuantity => "AmbiguousDerivedQuantity",
            ErrorKind::CyclicRule => "CyclicRule",
            ErrorKind::AmbiguousIdentifier => "AmbiguousIdentifier",
            ErrorKind::ConflictingWrite => "ConflictingWrite",
            ErrorKind::InvalidRuleTarget => "InvalidRuleTarget",
            ErrorKind::UnknownFunction => "UnknownFunction",
            ErrorKind::InvalidExpression => "InvalidExpression",
            ErrorKind::DeadDeclaration => "DeadDeclaration",
            ErrorKind::ShadowedIdentifier => "ShadowedIdentifier",
            ErrorKind::UndeterminedUnit => "UndeterminedUnit",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The model element a diagnostic is about, by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Subject {
    Unit(String),
    Compartment(String),
    Species(String),
    Parameter(String),
    Reaction(String),
    /// Assignment rules are keyed by their target identifier.
    Rule(String),
    Model,
}

impl Subject {
    pub fn rule(target: impl Into<String>) -> Self {
        Subject::Rule(target.into())
    }

    pub fn reaction(id: impl Into<String>) -> Self {
        Subject::Reaction(id.into())
    }

    pub fn species(id: impl Into<String>) -> Self {
        Subject::Species(id.into())
    }

    pub fn parameter(id: impl Into<String>) -> Self {
        Subject::Parameter(id.into())
    }

    pub fn compartment(id: impl Into<String>) -> Self {
        Subject::Compartment(id.into())
    }

    pub fn unit(id: impl Into<String>) -> Self {
        Subject::Unit(id.into())
    }

    /// The identifier of the subject, if it has one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Subject::Unit(id)
            | Subject::Compartment(id)
            | Subject::Species(id)
            | Subject::Parameter(id)
            | Subject::Reaction(id)
            | Subject::Rule(id) => Some(id),
            Subject::Model => None,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Unit(id) => write!(f, "unit '{}'", id),
            Subject::Compartment(id) => write!(f, "compartment '{}'", id),
            Subject::Species(id) => write!(f, "species '{}'", id),
            Subject::Parameter(id) => write!(f, "parameter '{}'", id),
            Subject::Reaction(id) => write!(f, "reaction '{}'", id),
            Subject::Rule(target) => write!(f, "rule for '{}'", target),
            Subject::Model => f.write_str("model"),
        }
    }
}

/// Severity of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks the lifecycle transition.
    Error,
    /// Reported, never blocking unless warnings are promoted.
    Warning,
}

/// A single whole-model diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub kind: ErrorKind,
    pub severity: Severity,
    pub subject: Subject,
    /// Human-readable message describing the violation.
    pub message: String,
}

impl Violation {
    pub fn new(
        kind: ErrorKind,
        severity: Severity,
        subject: Subject,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            subject,
            message: message.into(),
        }
    }

    /// Create an error-level violation.
    pub fn error(kind: ErrorKind, subject: Subject, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, subject, message)
    }

    /// Create a warning-level violation.
    pub fn warning(kind: ErrorKind, subject: Subject, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, subject, message)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}[{}] {}: {}", level, self.kind, self.subject, self.message)
    }
}

/// Collection of violations, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Check if there are any error-level violations.
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.is_error())
    }

    /// Check if there are only warnings.
    pub fn has_only_warnings(&self) -> bool {
        !self.violations.is_empty() && !self.has_errors()
    }

    pub fn all(&self) -> &[Violation] {
        &self.violations
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_warning())
    }

    /// Violations of one kind.
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Whether a violation of `kind` about `subject` was reported.
    pub fn contains(&self, kind: ErrorKind, subject: &Subject) -> bool {
        self.violations
            .iter()
            .any(|v| v.kind == kind && &v.subject == subject)
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn merge(&mut self, other: Violations) {
        self.violations.extend(other.violations);
    }

    /// Promote every warning to an error.
    pub fn promote_warnings(&mut self) {
        for v in &mut self.violations {
            v.severity = Severity::Error;
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl Extend<Violation> for Violations {
    fn extend<T: IntoIterator<Item = Violation>>(&mut self, iter: T) {
        self.violations.extend(iter);
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_creation() {
        // GIVEN/WHEN
        let violation = Violation::error(
            ErrorKind::IncompatibleUnits,
            Subject::rule("caf_plasma"),
            "right-hand side has unit min",
        );

        // THEN
        assert_eq!(violation.kind, ErrorKind::IncompatibleUnits);
        assert!(violation.is_error());
        assert_eq!(violation.subject.id(), Some("caf_plasma"));
    }

    #[test]
    fn test_violations_has_errors() {
        // GIVEN
        let mut violations = Violations::new();
        violations.push(Violation::warning(
            ErrorKind::DeadDeclaration,
            Subject::parameter("k_unused"),
            "never referenced",
        ));

        // THEN - only warnings
        assert!(!violations.has_errors());
        assert!(violations.has_only_warnings());

        // WHEN - add an error
        violations.push(Violation::error(
            ErrorKind::CyclicRule,
            Subject::rule("x"),
            "x -> x",
        ));

        // THEN
        assert!(violations.has_errors());
        assert!(violations.contains(ErrorKind::CyclicRule, &Subject::rule("x")));
        assert_eq!(violations.of_kind(ErrorKind::DeadDeclaration).count(), 1);
    }

    #[test]
    fn test_promote_warnings() {
        let mut violations = Violations::new();
        violations.push(Violation::warning(
            ErrorKind::ShadowedIdentifier,
            Subject::species("x"),
            "also a parameter",
        ));

        violations.promote_warnings();

        assert!(violations.has_errors());
        assert_eq!(violations.warnings().count(), 0);
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::error(
            ErrorKind::UnknownIdentifier,
            Subject::species("caf_gut"),
            "compartment 'Vgut' is not declared",
        );

        assert_eq!(
            violation.to_string(),
            "error[UnknownIdentifier] species 'caf_gut': compartment 'Vgut' is not declared"
        );
    }
}
