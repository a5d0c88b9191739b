//! The editable model.

use crate::error::Rejected;
use crate::lifecycle::{Assembling, Finalized};
use kinetic_compiler::assemble;
use kinetic_constraint::CheckOptions;
use kinetic_registry::{
    CompartmentBuilder, ModelUnits, ParameterBuilder, ReactionBuilder, Registry,
    RegistryBuilder, RuleBuilder, SpeciesBuilder, UnitBuilder,
};

/// A model under construction.
///
/// Entity shape is checked as each entity is added; everything that needs
/// the whole model is checked by [`Draft::assemble`] and
/// [`Assembling::validate`].
#[derive(Debug, Clone, Default)]
pub struct Draft {
    builder: RegistryBuilder,
    options: CheckOptions,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_builder(builder: RegistryBuilder) -> Self {
        Self {
            builder,
            options: CheckOptions::default(),
        }
    }

    /// Options used by the validation step.
    pub fn check_options(mut self, options: CheckOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_check_options(&mut self, options: CheckOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> CheckOptions {
        self.options
    }

    pub fn set_model_units(&mut self, units: ModelUnits) -> &mut Self {
        self.builder.set_model_units(units);
        self
    }

    pub fn add_unit(&mut self, id: impl Into<String>) -> UnitBuilder<'_> {
        self.builder.add_unit(id)
    }

    pub fn add_compartment(&mut self, id: impl Into<String>) -> CompartmentBuilder<'_> {
        self.builder.add_compartment(id)
    }

    pub fn add_species(
        &mut self,
        id: impl Into<String>,
        compartment: impl Into<String>,
    ) -> SpeciesBuilder<'_> {
        self.builder.add_species(id, compartment)
    }

    pub fn add_parameter(&mut self, id: impl Into<String>, value: f64) -> ParameterBuilder<'_> {
        self.builder.add_parameter(id, value)
    }

    pub fn add_rule(
        &mut self,
        target: impl Into<String>,
        expression: impl Into<String>,
    ) -> RuleBuilder<'_> {
        self.builder.add_rule(target, expression)
    }

    pub fn add_reaction(
        &mut self,
        id: impl Into<String>,
        equation: impl Into<String>,
    ) -> ReactionBuilder<'_> {
        self.builder.add_reaction(id, equation)
    }

    /// Direct access for edits the `add_*` methods do not cover.
    pub fn builder_mut(&mut self) -> &mut RegistryBuilder {
        &mut self.builder
    }

    pub fn registry(&self) -> &Registry {
        self.builder.registry()
    }

    /// Resolve every expression and generate the equations.
    pub fn assemble(self) -> Result<Assembling, Rejected> {
        tracing::info!(
            entities = self.builder.registry().entity_count(),
            "assembling model"
        );
        match assemble(self.builder.build()) {
            Ok(assembly) => {
                tracing::info!(
                    differential = assembly.system.differential.len(),
                    algebraic = assembly.system.algebraic.len(),
                    "model assembled"
                );
                Ok(Assembling::new(self, assembly))
            }
            Err(err) => {
                let report = err.into_violations();
                tracing::info!(errors = report.errors().count(), "assembly rejected");
                Err(Rejected::new(self, report))
            }
        }
    }

    /// Assemble, validate and finalize in one step.
    pub fn compile(self) -> Result<Finalized, Rejected> {
        Ok(self.assemble()?.validate()?.finalize())
    }
}
