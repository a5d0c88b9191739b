//! Main assembler implementation.

use crate::order::rule_order;
use crate::system::{AlgebraicEquation, DifferentialEquation, OdeSystem, OdeTerm, RateLaw};
use crate::unit_table::UnitTable;
use crate::{CompileError, CompileResult};
use kinetic_analyzer::{ResolveError, Resolver, Scope, SymExpr, SymbolRef};
use kinetic_core::{ErrorKind, Namespace, Subject, Violation, Violations};
use kinetic_parser::{parse_expr, Expr};
use kinetic_registry::{InitialQuantity, Registry};
use std::collections::{HashMap, HashSet};

/// A registry together with its assembled equations.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub registry: Registry,
    pub units: UnitTable,
    pub system: OdeSystem,
}

/// The Compiler assembles a registry into an ODE system.
///
/// Every whole-model error is collected; assembly fails only after all
/// checks have run.
pub struct Compiler {
    registry: Registry,
    violations: Violations,
}

impl Compiler {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            violations: Violations::new(),
        }
    }

    pub fn assemble(mut self) -> CompileResult<Assembly> {
        self.check_references();
        let units = UnitTable::build(&self.registry, &mut self.violations);

        let scope = Scope::for_model(&self.registry);
        let rates = self.resolve_rates();
        let rules = self.resolve_rules(&scope);

        self.check_rule_targets(&rules);
        self.check_constant_species();
        self.check_derived_quantities();
        let evaluation_order = self.order_rules(&rules);

        if self.violations.has_errors() {
            tracing::debug!(
                errors = self.violations.errors().count(),
                "assembly rejected"
            );
            return Err(CompileError::Rejected(self.violations));
        }

        let rule_targets: HashSet<SymbolRef> = rules.iter().flatten().map(|r| r.target).collect();
        let differential = self.differential_equations(&rule_targets);

        let system = OdeSystem {
            rates: rates.into_iter().flatten().collect(),
            differential,
            algebraic: rules.into_iter().flatten().collect(),
            evaluation_order,
        };

        Ok(Assembly {
            registry: self.registry,
            units,
            system,
        })
    }

    fn error(&mut self, kind: ErrorKind, subject: Subject, message: impl Into<String>) {
        self.violations.push(Violation::error(kind, subject, message));
    }

    fn resolve_error(&mut self, err: ResolveError, subject: Subject) {
        self.error(err.kind(), subject, err.to_string());
    }

    // ==================== CROSS-REFERENCES ====================

    fn check_references(&mut self) {
        let mut found = Vec::new();

        for species in self.registry.all_species() {
            if !self.registry.contains(Namespace::Compartment, &species.compartment) {
                found.push((
                    Subject::species(&species.id),
                    format!("compartment '{}' is not declared", species.compartment),
                ));
            }
        }

        for reaction in self.registry.reactions() {
            for species in reaction.equation.species() {
                if !self.registry.contains(Namespace::Species, species) {
                    found.push((
                        Subject::reaction(&reaction.id),
                        format!("species '{}' in equation is not declared", species),
                    ));
                }
            }
        }

        for rule in self.registry.rules() {
            if self.registry.namespaces_of(&rule.target).is_empty() {
                found.push((
                    Subject::rule(&rule.target),
                    format!("target '{}' is not a species, parameter or compartment", rule.target),
                ));
            }
        }

        for (subject, message) in found {
            self.error(ErrorKind::UnknownIdentifier, subject, message);
        }
    }

    // ==================== RESOLUTION ====================

    fn resolve_rates(&mut self) -> Vec<Option<RateLaw>> {
        let mut rates = Vec::with_capacity(self.registry.reactions().len());
        for i in 0..self.registry.reactions().len() {
            let reaction = &self.registry.reactions()[i];
            let scope = Scope::for_reaction(&self.registry, reaction);
            let (key, id) = (reaction.key, reaction.id.clone());
            let resolved = resolve(&scope, &reaction.rate_law);
            match resolved {
                Ok((source, expression)) => rates.push(Some(RateLaw {
                    reaction: key,
                    source,
                    expression,
                })),
                Err(err) => {
                    self.resolve_error(err, Subject::reaction(id));
                    rates.push(None);
                }
            }
        }
        rates
    }

    fn resolve_rules(&mut self, scope: &Scope) -> Vec<Option<AlgebraicEquation>> {
        let mut out = Vec::with_capacity(self.registry.rules().len());
        for i in 0..self.registry.rules().len() {
            let rule = &self.registry.rules()[i];
            let (key, target_id) = (rule.key, rule.target.clone());
            let target = scope.lookup(&rule.target);
            let resolved = resolve(scope, &rule.expression);
            match (target, resolved) {
                (Some(target), Ok((source, expression))) => out.push(Some(AlgebraicEquation {
                    rule: key,
                    target,
                    source,
                    expression,
                })),
                (_, Err(err)) => {
                    self.resolve_error(err, Subject::rule(target_id));
                    out.push(None);
                }
                // unknown target, already reported
                (None, Ok(_)) => out.push(None),
            }
        }
        out
    }

    // ==================== WRITE CONFLICTS ====================

    fn check_rule_targets(&mut self, rules: &[Option<AlgebraicEquation>]) {
        let mut found = Vec::new();
        for rule in rules.iter().flatten() {
            let target = &self.registry.rule(rule.rule).target;
            let subject = Subject::rule(target);
            let constant = match rule.target {
                SymbolRef::Parameter(key) => self.registry.parameter(key).constant,
                SymbolRef::Compartment(key) => self.registry.compartment(key).constant,
                SymbolRef::Species(key) => {
                    let species = self.registry.species(key);
                    for reaction in self.registry.reactions_involving(&species.id) {
                        found.push((
                            ErrorKind::ConflictingWrite,
                            subject.clone(),
                            format!("species '{}' is also written by reaction '{}'", species.id, reaction.id),
                        ));
                    }
                    species.constant
                }
                SymbolRef::LocalParameter(..) => false,
            };
            if constant {
                found.push((
                    ErrorKind::InvalidRuleTarget,
                    subject,
                    format!("'{}' is declared constant", target),
                ));
            }
        }
        for (kind, subject, message) in found {
            self.error(kind, subject, message);
        }
    }

    fn check_constant_species(&mut self) {
        let mut found = Vec::new();
        for reaction in self.registry.reactions() {
            for (species, coefficient) in reaction.net_stoichiometry() {
                let constant = self
                    .registry
                    .species_by_id(species)
                    .map_or(false, |s| s.constant);
                if constant && coefficient != 0.0 {
                    found.push((
                        Subject::reaction(&reaction.id),
                        format!("constant species '{}' would be changed", species),
                    ));
                }
            }
        }
        for (subject, message) in found {
            self.error(ErrorKind::ConflictingWrite, subject, message);
        }
    }

    fn check_derived_quantities(&mut self) {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for rule in self.registry.rules() {
            match counts.iter_mut().find(|(target, _)| *target == rule.target) {
                Some((_, n)) => *n += 1,
                None => counts.push((rule.target.as_str(), 1)),
            }
        }

        let mut found: Vec<(Subject, String)> = counts
            .iter()
            .filter(|(_, n)| *n > 1)
            .map(|(target, n)| {
                (
                    Subject::rule(*target),
                    format!("'{}' is assigned by {} rules, expected exactly one", target, n),
                )
            })
            .collect();
        found.extend(
            self.registry
                .parameters()
                .iter()
                .filter(|p| p.is_derived() && self.registry.rule_for(&p.id).is_none())
                .map(|p| {
                    (
                        Subject::parameter(&p.id),
                        "non-constant parameter without a value needs exactly one assignment rule"
                            .to_string(),
                    )
                }),
        );

        for (subject, message) in found {
            self.error(ErrorKind::AmbiguousDerivedQuantity, subject, message);
        }
    }

    // ==================== RULE ORDER ====================

    fn order_rules(&mut self, rules: &[Option<AlgebraicEquation>]) -> Vec<usize> {
        let resolved: Vec<&AlgebraicEquation> = rules.iter().flatten().collect();
        let by_target: HashMap<SymbolRef, usize> = resolved
            .iter()
            .enumerate()
            .map(|(i, r)| (r.target, i))
            .collect();
        let dependencies: Vec<Vec<usize>> = resolved
            .iter()
            .map(|r| {
                let mut reads = r.expression.symbols();
                // a concentration reads or writes its compartment size
                let sized: Vec<SymbolRef> = reads
                    .iter()
                    .chain(std::iter::once(&r.target))
                    .filter_map(|&s| self.size_of(s))
                    .collect();
                reads.extend(sized);
                let mut deps: Vec<usize> = reads
                    .into_iter()
                    .filter_map(|s| by_target.get(&s).copied())
                    .collect();
                deps.sort_unstable();
                deps.dedup();
                deps
            })
            .collect();

        match rule_order(&dependencies) {
            Ok(order) => order,
            Err(cycles) => {
                for cycle in cycles {
                    let targets: Vec<&str> = cycle
                        .iter()
                        .map(|&i| self.registry.rule(resolved[i].rule).target.as_str())
                        .collect();
                    let first = targets[0].to_string();
                    let path = format!("{} -> {}", targets.join(" -> "), first);
                    self.violations.push(Violation::error(
                        ErrorKind::CyclicRule,
                        Subject::rule(first),
                        format!("rule depends on itself: {}", path),
                    ));
                }
                Vec::new()
            }
        }
    }

    /// The compartment whose size scales `symbol`, for species not declared
    /// in substance units.
    fn size_of(&self, symbol: SymbolRef) -> Option<SymbolRef> {
        let SymbolRef::Species(key) = symbol else {
            return None;
        };
        let species = self.registry.species(key);
        if species.has_only_substance_units {
            return None;
        }
        self.registry
            .compartment_by_id(&species.compartment)
            .map(|c| SymbolRef::Compartment(c.key))
    }

    // ==================== EQUATIONS ====================

    fn differential_equations(&self, rule_targets: &HashSet<SymbolRef>) -> Vec<DifferentialEquation> {
        let mut equations = Vec::new();
        for species in self.registry.all_species() {
            if rule_targets.contains(&SymbolRef::Species(species.key)) {
                continue;
            }

            let terms: Vec<OdeTerm> = self
                .registry
                .reactions()
                .iter()
                .filter_map(|reaction| {
                    reaction
                        .net_stoichiometry()
                        .into_iter()
                        .find(|(s, c)| *s == species.id && *c != 0.0)
                        .map(|(_, coefficient)| OdeTerm {
                            reaction: reaction.key,
                            coefficient,
                        })
                })
                .collect();

            let initial_amount = match species.initial {
                Some(InitialQuantity::Amount(amount)) => amount,
                Some(InitialQuantity::Concentration(concentration)) => self
                    .registry
                    .compartment_by_id(&species.compartment)
                    .map_or(f64::NAN, |c| concentration * c.size),
                None => 0.0,
            };

            tracing::debug!(
                species = %species.id,
                terms = terms.len(),
                initial_amount,
                "assembled differential equation"
            );
            equations.push(DifferentialEquation {
                species: species.key,
                terms,
                initial_amount,
            });
        }
        equations
    }
}

fn resolve(scope: &Scope, text: &str) -> Result<(Expr, SymExpr), ResolveError> {
    let source = parse_expr(text)?;
    let expression = Resolver::new(scope).resolve(&source)?;
    Ok((source, expression))
}

/// Assemble a registry into an ODE system.
pub fn assemble(registry: Registry) -> CompileResult<Assembly> {
    Compiler::new(registry).assemble()
}
