//! RegistryBuilder for constructing an immutable Registry.

use crate::error::{RegistryError, RegistryResult};
use crate::registry::Registry;
use crate::types::*;
use kinetic_core::{
    validate_identifier, CompartmentId, Namespace, ParameterId, ReactionId, RuleId, SpeciesId,
    UnitId,
};
use kinetic_parser::parse_equation;
use kinetic_units::{UnitBody, UnitDefinition, UnitTerm};

/// Builder for constructing an immutable Registry.
///
/// Each `add_*` call returns an entity builder; `done()` checks the identifier
/// and the entity's local shape and registers it. Cross-references are not
/// checked here.
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

fn check_new(
    registry: &Registry,
    namespace: Namespace,
    id: &str,
) -> RegistryResult<()> {
    validate_identifier(id).map_err(|e| RegistryError::identifier(namespace, id, e))?;
    if registry.contains(namespace, id) {
        return Err(RegistryError::duplicate(namespace, id));
    }
    Ok(())
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model-wide units.
    pub fn set_model_units(&mut self, units: ModelUnits) -> &mut Self {
        self.registry.model_units = units;
        self
    }

    pub fn model_units_mut(&mut self) -> &mut ModelUnits {
        &mut self.registry.model_units
    }

    /// Add a unit definition.
    pub fn add_unit(&mut self, id: impl Into<String>) -> UnitBuilder<'_> {
        UnitBuilder {
            builder: self,
            id: id.into(),
            symbol: None,
            terms: Vec::new(),
            expr: None,
        }
    }

    /// Add a compartment.
    pub fn add_compartment(&mut self, id: impl Into<String>) -> CompartmentBuilder<'_> {
        CompartmentBuilder {
            builder: self,
            id: id.into(),
            name: None,
            size: 1.0,
            unit: None,
            constant: true,
        }
    }

    /// Add a species living in `compartment`.
    pub fn add_species(
        &mut self,
        id: impl Into<String>,
        compartment: impl Into<String>,
    ) -> SpeciesBuilder<'_> {
        SpeciesBuilder {
            builder: self,
            id: id.into(),
            compartment: compartment.into(),
            name: None,
            initial_amount: None,
            initial_concentration: None,
            substance_unit: None,
            has_only_substance_units: false,
            constant: false,
        }
    }

    /// Add a model-level parameter.
    pub fn add_parameter(&mut self, id: impl Into<String>, value: f64) -> ParameterBuilder<'_> {
        ParameterBuilder {
            builder: self,
            id: id.into(),
            name: None,
            value,
            unit: None,
            constant: true,
        }
    }

    /// Add an assignment rule `target = expression`.
    pub fn add_rule(
        &mut self,
        target: impl Into<String>,
        expression: impl Into<String>,
    ) -> RuleBuilder<'_> {
        RuleBuilder {
            builder: self,
            target: target.into(),
            expression: expression.into(),
        }
    }

    /// Add a reaction with its equation, e.g. `caf_gut -> caf_cent`.
    pub fn add_reaction(
        &mut self,
        id: impl Into<String>,
        equation: impl Into<String>,
    ) -> ReactionBuilder<'_> {
        ReactionBuilder {
            builder: self,
            id: id.into(),
            equation: equation.into(),
            name: None,
            rate_law: None,
            local_parameters: Vec::new(),
            parameters: Vec::new(),
        }
    }

    // ==================== Mutation ====================

    pub fn compartment_mut(&mut self, id: &str) -> Option<&mut Compartment> {
        let i = self.registry.index_of(Namespace::Compartment, id)?;
        self.registry.compartments.get_mut(i as usize)
    }

    pub fn species_mut(&mut self, id: &str) -> Option<&mut Species> {
        let i = self.registry.index_of(Namespace::Species, id)?;
        self.registry.species.get_mut(i as usize)
    }

    pub fn parameter_mut(&mut self, id: &str) -> Option<&mut Parameter> {
        let i = self.registry.index_of(Namespace::Parameter, id)?;
        self.registry.parameters.get_mut(i as usize)
    }

    pub fn reaction_mut(&mut self, id: &str) -> Option<&mut Reaction> {
        let i = self.registry.index_of(Namespace::Reaction, id)?;
        self.registry.reactions.get_mut(i as usize)
    }

    pub fn rule_mut(&mut self, target: &str) -> Option<&mut AssignmentRule> {
        let i = self.registry.index_of(Namespace::Rule, target)?;
        self.registry.rules.get_mut(i as usize)
    }

    /// Remove a species from every reaction equation.
    pub fn detach_species(&mut self, species: &str) {
        for reaction in &mut self.registry.reactions {
            reaction.remove_species(species);
        }
    }

    /// Read access to what has been registered so far.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Snapshot the registered entities as an immutable Registry.
    pub fn build(&self) -> Registry {
        self.registry.clone()
    }
}

/// Builder for a unit definition.
pub struct UnitBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: String,
    symbol: Option<String>,
    terms: Vec<UnitTerm>,
    expr: Option<String>,
}

impl<'a> UnitBuilder<'a> {
    /// Display symbol, e.g. `µg`.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Add a composition term.
    pub fn term(mut self, term: UnitTerm) -> Self {
        self.terms.push(term);
        self
    }

    /// Define the unit by an expression such as `mmole/min/liter`.
    pub fn expr(mut self, expr: impl Into<String>) -> Self {
        self.expr = Some(expr.into());
        self
    }

    /// Finish building this unit definition.
    pub fn done(self) -> RegistryResult<UnitId> {
        check_new(&self.builder.registry, Namespace::Unit, &self.id)?;

        let body = match (self.expr, self.terms.is_empty()) {
            (Some(expr), true) => UnitBody::Expr(expr),
            (None, false) => UnitBody::Terms(self.terms),
            (None, true) => {
                return Err(RegistryError::shape(
                    Namespace::Unit,
                    self.id,
                    "needs an expression or at least one term",
                ))
            }
            (Some(_), false) => {
                return Err(RegistryError::shape(
                    Namespace::Unit,
                    self.id,
                    "expression and terms are mutually exclusive",
                ))
            }
        };

        let registry = &mut self.builder.registry;
        let key = UnitId::new(registry.units.len() as u32);
        registry.insert_name(Namespace::Unit, &self.id, key.raw());
        registry.units.push(UnitDefinition {
            id: self.id,
            symbol: self.symbol,
            body,
        });
        Ok(key)
    }
}

/// Builder for a compartment.
pub struct CompartmentBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: String,
    name: Option<String>,
    size: f64,
    unit: Option<String>,
    constant: bool,
}

impl<'a> CompartmentBuilder<'a> {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn constant(mut self, constant: bool) -> Self {
        self.constant = constant;
        self
    }

    /// Finish building this compartment.
    pub fn done(self) -> RegistryResult<CompartmentId> {
        check_new(&self.builder.registry, Namespace::Compartment, &self.id)?;
        if self.size < 0.0 {
            return Err(RegistryError::shape(
                Namespace::Compartment,
                self.id,
                format!("size must not be negative, got {}", self.size),
            ));
        }

        let registry = &mut self.builder.registry;
        let key = CompartmentId::new(registry.compartments.len() as u32);
        registry.insert_name(Namespace::Compartment, &self.id, key.raw());
        registry.compartments.push(Compartment {
            key,
            id: self.id,
            name: self.name,
            size: self.size,
            unit: self.unit,
            constant: self.constant,
        });
        Ok(key)
    }
}

/// Builder for a species.
pub struct SpeciesBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: String,
    compartment: String,
    name: Option<String>,
    initial_amount: Option<f64>,
    initial_concentration: Option<f64>,
    substance_unit: Option<String>,
    has_only_substance_units: bool,
    constant: bool,
}

impl<'a> SpeciesBuilder<'a> {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn initial_amount(mut self, amount: f64) -> Self {
        self.initial_amount = Some(amount);
        self
    }

    pub fn initial_concentration(mut self, concentration: f64) -> Self {
        self.initial_concentration = Some(concentration);
        self
    }

    pub fn substance_unit(mut self, unit: impl Into<String>) -> Self {
        self.substance_unit = Some(unit.into());
        self
    }

    pub fn has_only_substance_units(mut self, only: bool) -> Self {
        self.has_only_substance_units = only;
        self
    }

    pub fn constant(mut self, constant: bool) -> Self {
        self.constant = constant;
        self
    }

    /// Finish building this species.
    pub fn done(self) -> RegistryResult<SpeciesId> {
        check_new(&self.builder.registry, Namespace::Species, &self.id)?;

        let initial = match (self.initial_amount, self.initial_concentration) {
            (Some(_), Some(_)) => {
                return Err(RegistryError::shape(
                    Namespace::Species,
                    self.id,
                    "initial amount and initial concentration are mutually exclusive",
                ))
            }
            (Some(amount), None) => Some(InitialQuantity::Amount(amount)),
            (None, Some(conc)) => Some(InitialQuantity::Concentration(conc)),
            (None, None) => None,
        };

        let registry = &mut self.builder.registry;
        let key = SpeciesId::new(registry.species.len() as u32);
        registry.insert_name(Namespace::Species, &self.id, key.raw());
        registry.species.push(Species {
            key,
            id: self.id,
            name: self.name,
            compartment: self.compartment,
            initial,
            substance_unit: self.substance_unit,
            has_only_substance_units: self.has_only_substance_units,
            constant: self.constant,
        });
        Ok(key)
    }
}

/// Builder for a model-level parameter.
pub struct ParameterBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: String,
    name: Option<String>,
    value: f64,
    unit: Option<String>,
    constant: bool,
}

impl<'a> ParameterBuilder<'a> {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn constant(mut self, constant: bool) -> Self {
        self.constant = constant;
        self
    }

    /// Finish building this parameter.
    pub fn done(self) -> RegistryResult<ParameterId> {
        check_new(&self.builder.registry, Namespace::Parameter, &self.id)?;
        Ok(push_parameter(
            &mut self.builder.registry,
            Parameter {
                key: ParameterId::new(0),
                id: self.id,
                name: self.name,
                value: self.value,
                unit: self.unit,
                constant: self.constant,
                origin: ParameterOrigin::Model,
            },
        ))
    }
}

fn push_parameter(registry: &mut Registry, mut parameter: Parameter) -> ParameterId {
    let key = ParameterId::new(registry.parameters.len() as u32);
    parameter.key = key;
    registry.insert_name(Namespace::Parameter, &parameter.id, key.raw());
    registry.parameters.push(parameter);
    key
}

/// Builder for an assignment rule.
pub struct RuleBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    target: String,
    expression: String,
}

impl<'a> RuleBuilder<'a> {
    /// Finish building this rule. Rules sharing a target are all kept; the
    /// assembler reports them as ambiguous.
    pub fn done(self) -> RegistryResult<RuleId> {
        if self.expression.trim().is_empty() {
            return Err(RegistryError::shape(
                Namespace::Rule,
                self.target,
                "expression must not be empty",
            ));
        }

        let registry = &mut self.builder.registry;
        let key = RuleId::new(registry.rules.len() as u32);
        if !registry.contains(Namespace::Rule, &self.target) {
            registry.insert_name(Namespace::Rule, &self.target, key.raw());
        }
        registry.rules.push(AssignmentRule {
            key,
            target: self.target,
            expression: self.expression,
        });
        Ok(key)
    }
}

/// Builder for a reaction.
pub struct ReactionBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: String,
    equation: String,
    name: Option<String>,
    rate_law: Option<String>,
    local_parameters: Vec<LocalParameter>,
    /// Declared with the reaction, registered in model scope.
    parameters: Vec<(String, f64, Option<String>)>,
}

impl<'a> ReactionBuilder<'a> {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Rate law in extent per time, e.g. `k_absorption * caf_gut`.
    pub fn rate_law(mut self, expression: impl Into<String>) -> Self {
        self.rate_law = Some(expression.into());
        self
    }

    /// Parameter visible only inside this reaction's rate law.
    pub fn local_parameter(
        mut self,
        id: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
    ) -> Self {
        self.local_parameters.push(LocalParameter {
            id: id.into(),
            value,
            unit: Some(unit.into()),
        });
        self
    }

    /// Parameter declared with this reaction and promoted to model scope.
    pub fn parameter(mut self, id: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        self.parameters.push((id.into(), value, Some(unit.into())));
        self
    }

    /// Finish building this reaction.
    ///
    /// Registration is all-or-nothing: promoted parameters are only added
    /// when the reaction itself is valid.
    pub fn done(self) -> RegistryResult<ReactionId> {
        let registry = &self.builder.registry;
        check_new(registry, Namespace::Reaction, &self.id)?;

        let equation = parse_equation(&self.equation).map_err(|e| {
            RegistryError::shape(
                Namespace::Reaction,
                &self.id,
                format!("invalid equation '{}': {}", self.equation, e.message),
            )
        })?;

        let rate_law = match self.rate_law {
            Some(r) if !r.trim().is_empty() => r,
            _ => {
                return Err(RegistryError::shape(
                    Namespace::Reaction,
                    self.id,
                    "missing rate law",
                ))
            }
        };

        for (i, local) in self.local_parameters.iter().enumerate() {
            validate_identifier(&local.id)
                .map_err(|e| RegistryError::identifier(Namespace::Reaction, &self.id, e))?;
            if self.local_parameters[..i].iter().any(|p| p.id == local.id) {
                return Err(RegistryError::shape(
                    Namespace::Reaction,
                    &self.id,
                    format!("local parameter '{}' declared twice", local.id),
                ));
            }
        }

        for (i, (id, _, _)) in self.parameters.iter().enumerate() {
            check_new(registry, Namespace::Parameter, id)?;
            if self.parameters[..i].iter().any(|(other, _, _)| other == id) {
                return Err(RegistryError::duplicate(Namespace::Parameter, id));
            }
        }

        let registry = &mut self.builder.registry;
        let key = ReactionId::new(registry.reactions.len() as u32);

        for (id, value, unit) in self.parameters {
            push_parameter(
                registry,
                Parameter {
                    key: ParameterId::new(0),
                    id,
                    name: None,
                    value,
                    unit,
                    constant: true,
                    origin: ParameterOrigin::Reaction(key),
                },
            );
        }

        registry.insert_name(Namespace::Reaction, &self.id, key.raw());
        registry.reactions.push(Reaction {
            key,
            id: self.id,
            name: self.name,
            equation,
            rate_law,
            local_parameters: self.local_parameters,
        });
        Ok(key)
    }
}
