//! Consistency checking.

use crate::error::{ConstraintError, ConstraintResult};
use crate::options::CheckOptions;
use kinetic_analyzer::{SymExpr, SymbolRef, SymbolUnits, UnitChecker};
use kinetic_compiler::Assembly;
use kinetic_core::{ErrorKind, Namespace, Subject, Violation, Violations};
use kinetic_units::ReducedUnit;
use std::collections::{HashMap, HashSet};

/// Whole-model consistency checker.
///
/// Unit checks compare dimension vectors only. A scale difference between
/// compatible units is logged, never reported.
pub struct ConsistencyChecker<'a> {
    assembly: &'a Assembly,
    options: CheckOptions,
}

impl<'a> ConsistencyChecker<'a> {
    pub fn new(assembly: &'a Assembly) -> Self {
        Self::with_options(assembly, CheckOptions::default())
    }

    pub fn with_options(assembly: &'a Assembly, options: CheckOptions) -> Self {
        Self { assembly, options }
    }

    /// Run every check and collect all violations.
    pub fn check_all(&self) -> Violations {
        let mut violations = Violations::new();

        let rate_units = self.check_rate_units(&mut violations);
        self.check_rule_units(&mut violations);
        self.check_derivative_units(&rate_units, &mut violations);
        self.check_identifiers(&mut violations);
        if self.options.report_dead_declarations {
            self.check_dead_declarations(&mut violations);
        }

        if self.options.warnings_as_errors {
            violations.promote_warnings();
        }
        for warning in violations.warnings() {
            tracing::warn!(kind = %warning.kind, subject = %warning.subject, "{}", warning.message);
        }
        violations
    }

    /// Warning for a unit check that could not run.
    fn undetermined(&self, subject: Subject, expr: &SymExpr, what: &str) -> Violation {
        let registry = &self.assembly.registry;
        let mut unitless: Vec<&str> = Vec::new();
        for symbol in expr.symbols() {
            if self.assembly.units.unit_of(symbol).is_some() {
                continue;
            }
            let id = match symbol {
                SymbolRef::Species(key) => registry.species(key).id.as_str(),
                SymbolRef::Parameter(key) => registry.parameter(key).id.as_str(),
                SymbolRef::Compartment(key) => registry.compartment(key).id.as_str(),
                SymbolRef::LocalParameter(reaction, i) => {
                    registry.reaction(reaction).local_parameters[i].id.as_str()
                }
            };
            if !unitless.contains(&id) {
                unitless.push(id);
            }
        }
        Violation::warning(
            ErrorKind::UndeterminedUnit,
            subject,
            format!("{} unit not checked, no unit for: {}", what, unitless.join(", ")),
        )
    }

    fn infer(&self, expr: &SymExpr) -> Result<Option<ReducedUnit>, String> {
        UnitChecker::new(&self.assembly.units)
            .infer(expr)
            .map_err(|e| e.to_string())
    }

    // ==================== UNITS ====================

    /// Rate laws must be in extent per time. Returns each inferred rate unit.
    fn check_rate_units(&self, violations: &mut Violations) -> Vec<Option<ReducedUnit>> {
        let registry = &self.assembly.registry;
        let expected = self.assembly.units.rate_unit();
        if expected.is_none() {
            tracing::debug!("model extent or time unit missing, rate-law units not checked");
        }

        let mut inferred = Vec::with_capacity(self.assembly.system.rates.len());
        for rate in &self.assembly.system.rates {
            let reaction = registry.reaction(rate.reaction);
            let subject = Subject::reaction(&reaction.id);
            match self.infer(&rate.expression) {
                Err(message) => {
                    violations.push(Violation::error(ErrorKind::IncompatibleUnits, subject, message));
                    inferred.push(None);
                }
                Ok(unit) => {
                    if let (Some(unit), Some(expected)) = (unit, expected) {
                        compare(
                            violations,
                            subject,
                            unit,
                            expected,
                            "rate law",
                            "extent per time",
                        );
                    } else if expected.is_some() {
                        violations.push(self.undetermined(subject, &rate.expression, "rate law"));
                    }
                    inferred.push(unit);
                }
            }
        }
        inferred
    }

    /// A rule's right-hand side must match its target's unit.
    fn check_rule_units(&self, violations: &mut Violations) {
        let registry = &self.assembly.registry;
        for equation in &self.assembly.system.algebraic {
            let target = &registry.rule(equation.rule).target;
            let subject = Subject::rule(target);
            match self.infer(&equation.expression) {
                Err(message) => {
                    violations.push(Violation::error(ErrorKind::IncompatibleUnits, subject, message))
                }
                Ok(Some(unit)) => match self.assembly.units.unit_of(equation.target) {
                    Some(expected) => {
                        compare(violations, subject, unit, expected, "right-hand side", "target unit")
                    }
                    None => tracing::debug!(target = %target, "rule target has no unit"),
                },
                Ok(None) => {
                    violations.push(self.undetermined(subject, &equation.expression, "right-hand side"))
                }
            }
        }
    }

    /// Every derivative term must be in substance per time.
    fn check_derivative_units(&self, rate_units: &[Option<ReducedUnit>], violations: &mut Violations) {
        let registry = &self.assembly.registry;
        for equation in &self.assembly.system.differential {
            let species = registry.species(equation.species);
            let expected = match self.assembly.units.derivative_unit(species.key.index()) {
                Some(expected) => expected,
                None => {
                    tracing::debug!(species = %species.id, "derivative unit undetermined");
                    continue;
                }
            };
            for term in &equation.terms {
                let unit = rate_units.get(term.reaction.index()).copied().flatten();
                if let Some(unit) = unit {
                    if !unit.is_compatible_with(&expected) {
                        let reaction = registry.reaction(term.reaction);
                        violations.push(Violation::error(
                            ErrorKind::IncompatibleUnits,
                            Subject::species(&species.id),
                            format!(
                                "term from reaction '{}' has unit {}, derivative needs {}",
                                reaction.id, unit, expected
                            ),
                        ));
                    }
                }
            }
        }
    }

    // ==================== IDENTIFIERS ====================

    /// Identifiers written in expressions or as rule targets.
    fn referenced_names(&self) -> HashMap<&str, Subject> {
        let registry = &self.assembly.registry;
        let mut names = HashMap::new();
        for rate in &self.assembly.system.rates {
            let reaction = registry.reaction(rate.reaction);
            for (name, _) in rate.source.identifiers() {
                // locals shadow model symbols inside their own reaction
                if reaction.local_parameter(name).is_none() {
                    names
                        .entry(name)
                        .or_insert_with(|| Subject::reaction(&reaction.id));
                }
            }
        }
        for rule in registry.rules() {
            names
                .entry(rule.target.as_str())
                .or_insert_with(|| Subject::rule(&rule.target));
        }
        for equation in &self.assembly.system.algebraic {
            let target = &registry.rule(equation.rule).target;
            for (name, _) in equation.source.identifiers() {
                names.entry(name).or_insert_with(|| Subject::rule(target));
            }
        }
        names
    }

    fn check_identifiers(&self, violations: &mut Violations) {
        let registry = &self.assembly.registry;
        let referenced = self.referenced_names();

        let mut seen = HashSet::new();
        let declared = registry
            .compartments()
            .iter()
            .map(|c| c.id.as_str())
            .chain(registry.all_species().iter().map(|s| s.id.as_str()))
            .chain(registry.parameters().iter().map(|p| p.id.as_str()));

        for id in declared {
            if !seen.insert(id) {
                continue;
            }
            let namespaces = registry.namespaces_of(id);
            if namespaces.len() < 2 {
                continue;
            }
            let subject = subject_in(namespaces[0], id);
            let kinds: Vec<&str> = namespaces.iter().map(|ns| ns.name()).collect();
            match referenced.get(id) {
                Some(user) => violations.push(Violation::error(
                    ErrorKind::AmbiguousIdentifier,
                    subject,
                    format!(
                        "'{}' is declared as {} and referenced by {}",
                        id,
                        kinds.join(" and "),
                        user
                    ),
                )),
                None => violations.push(Violation::warning(
                    ErrorKind::ShadowedIdentifier,
                    subject,
                    format!("'{}' is declared as {}", id, kinds.join(" and ")),
                )),
            }
        }
    }

    fn check_dead_declarations(&self, violations: &mut Violations) {
        let registry = &self.assembly.registry;
        let system = &self.assembly.system;

        let mut used: HashSet<SymbolRef> = HashSet::new();
        for rate in &system.rates {
            used.extend(rate.expression.symbols());
        }
        for equation in &system.algebraic {
            used.insert(equation.target);
            used.extend(equation.expression.symbols());
        }
        for reaction in registry.reactions() {
            for species in reaction.equation.species() {
                if let Some(s) = registry.species_by_id(species) {
                    used.insert(SymbolRef::Species(s.key));
                }
            }
        }

        let mut found = Vec::new();
        for species in registry.all_species() {
            if used.contains(&SymbolRef::Species(species.key)) {
                if let Some(c) = registry.compartment_by_id(&species.compartment) {
                    used.insert(SymbolRef::Compartment(c.key));
                }
            } else {
                found.push(Subject::species(&species.id));
            }
        }
        for compartment in registry.compartments() {
            let holds_species = registry
                .all_species()
                .iter()
                .any(|s| s.compartment == compartment.id);
            if !holds_species && !used.contains(&SymbolRef::Compartment(compartment.key)) {
                found.push(Subject::compartment(&compartment.id));
            }
        }
        for parameter in registry.parameters() {
            if !used.contains(&SymbolRef::Parameter(parameter.key)) {
                found.push(Subject::parameter(&parameter.id));
            }
        }

        for subject in found {
            violations.push(Violation::warning(
                ErrorKind::DeadDeclaration,
                subject,
                "declared but never referenced",
            ));
        }
    }
}

fn subject_in(namespace: Namespace, id: &str) -> Subject {
    match namespace {
        Namespace::Compartment => Subject::compartment(id),
        Namespace::Species => Subject::species(id),
        Namespace::Parameter => Subject::parameter(id),
        Namespace::Unit => Subject::unit(id),
        Namespace::Reaction => Subject::reaction(id),
        Namespace::Rule => Subject::rule(id),
    }
}

fn compare(
    violations: &mut Violations,
    subject: Subject,
    actual: ReducedUnit,
    expected: ReducedUnit,
    what: &str,
    against: &str,
) {
    if !actual.is_compatible_with(&expected) {
        violations.push(Violation::error(
            ErrorKind::IncompatibleUnits,
            subject,
            format!("{} has unit {}, {} is {}", what, actual, against, expected),
        ));
    } else if !actual.is_equivalent_to(&expected) {
        tracing::debug!(
            subject = %subject,
            scale = actual.factor / expected.factor,
            "compatible units differ in scale"
        );
    }
}

/// Check an assembly, failing with the full report on any error.
///
/// On success, returns the warnings.
pub fn validate(assembly: &Assembly, options: CheckOptions) -> ConstraintResult<Violations> {
    let violations = ConsistencyChecker::with_options(assembly, options).check_all();
    if violations.has_errors() {
        Err(ConstraintError::Violated(violations))
    } else {
        Ok(violations)
    }
}
