//! Reduced units of every declared entity.

use crate::error::unit_error_kind;
use kinetic_analyzer::{SymbolRef, SymbolUnits};
use kinetic_core::{ErrorKind, Subject, Violation, Violations};
use kinetic_registry::{InitialQuantity, Registry};
use kinetic_units::{ReducedUnit, UnitResult, UnitSystem};

/// Model units after reduction. `None` when undeclared or unresolvable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvedModelUnits {
    pub time: Option<ReducedUnit>,
    pub extent: Option<ReducedUnit>,
    pub substance: Option<ReducedUnit>,
    pub length: Option<ReducedUnit>,
    pub area: Option<ReducedUnit>,
    pub volume: Option<ReducedUnit>,
}

/// Units of compartments, species, parameters and local parameters,
/// indexed by entity key.
///
/// A species symbol inside an expression denotes its concentration unless
/// the species has only substance units.
#[derive(Debug, Clone, Default)]
pub struct UnitTable {
    system: UnitSystem,
    model: ResolvedModelUnits,
    compartments: Vec<Option<ReducedUnit>>,
    species_amounts: Vec<Option<ReducedUnit>>,
    species_symbols: Vec<Option<ReducedUnit>>,
    parameters: Vec<Option<ReducedUnit>>,
    locals: Vec<Vec<Option<ReducedUnit>>>,
}

struct Reducer<'a> {
    system: &'a UnitSystem,
    violations: &'a mut Violations,
}

impl Reducer<'_> {
    fn reduce(&mut self, unit: Option<&str>, subject: impl FnOnce() -> Subject) -> Option<ReducedUnit> {
        let unit = unit?;
        report(self.system.resolve(unit), unit, subject, self.violations)
    }
}

fn report(
    result: UnitResult<ReducedUnit>,
    unit: &str,
    subject: impl FnOnce() -> Subject,
    violations: &mut Violations,
) -> Option<ReducedUnit> {
    match result {
        Ok(reduced) => Some(reduced),
        Err(err) => {
            violations.push(Violation::error(
                unit_error_kind(&err),
                subject(),
                format!("unit '{}': {}", unit, err),
            ));
            None
        }
    }
}

impl UnitTable {
    /// Reduce every unit reference in the registry, reporting failures.
    pub fn build(registry: &Registry, violations: &mut Violations) -> Self {
        let mut system = UnitSystem::new();
        for definition in registry.units() {
            if let Err(err) = system.define(definition.clone()) {
                violations.push(Violation::error(
                    unit_error_kind(&err),
                    Subject::unit(&definition.id),
                    err.to_string(),
                ));
            }
        }

        let mut reducer = Reducer {
            system: &system,
            violations,
        };

        let declared = registry.model_units();
        let model = ResolvedModelUnits {
            time: reducer.reduce(declared.time.as_deref(), || Subject::Model),
            extent: reducer.reduce(declared.extent.as_deref(), || Subject::Model),
            substance: reducer.reduce(declared.substance.as_deref(), || Subject::Model),
            length: reducer.reduce(declared.length.as_deref(), || Subject::Model),
            area: reducer.reduce(declared.area.as_deref(), || Subject::Model),
            volume: reducer.reduce(declared.volume.as_deref(), || Subject::Model),
        };

        let mut compartments = Vec::with_capacity(registry.compartments().len());
        for compartment in registry.compartments() {
            let unit = match &compartment.unit {
                Some(unit) => reducer.reduce(Some(unit), || Subject::compartment(&compartment.id)),
                None => model.volume,
            };
            if let Some(u) = unit {
                if !u.dimension.is_spatial() {
                    reducer.violations.push(Violation::error(
                        ErrorKind::IncompatibleUnits,
                        Subject::compartment(&compartment.id),
                        format!("size unit {} is not a length, area or volume", u),
                    ));
                }
            }
            compartments.push(unit);
        }

        let mut species_amounts = Vec::with_capacity(registry.all_species().len());
        let mut species_symbols = Vec::with_capacity(registry.all_species().len());
        for species in registry.all_species() {
            let amount = match &species.substance_unit {
                Some(unit) => reducer.reduce(Some(unit), || Subject::species(&species.id)),
                None => model.substance,
            };
            let size = registry
                .compartment_by_id(&species.compartment)
                .and_then(|c| compartments[c.key.index()]);

            if let (Some(InitialQuantity::Concentration(_)), Some(size)) = (species.initial, size) {
                if !size.dimension.is_volume() {
                    reducer.violations.push(Violation::error(
                        ErrorKind::IncompatibleUnits,
                        Subject::species(&species.id),
                        format!(
                            "initial concentration needs a volume compartment, '{}' has unit {}",
                            species.compartment, size
                        ),
                    ));
                }
            }

            let symbol = if species.has_only_substance_units {
                amount
            } else {
                match (amount, size) {
                    (Some(a), Some(s)) => a.checked_div(&s),
                    _ => None,
                }
            };
            species_amounts.push(amount);
            species_symbols.push(symbol);
        }

        let parameters = registry
            .parameters()
            .iter()
            .map(|p| reducer.reduce(p.unit.as_deref(), || Subject::parameter(&p.id)))
            .collect();

        let mut locals = Vec::with_capacity(registry.reactions().len());
        for reaction in registry.reactions() {
            let mut units = Vec::with_capacity(reaction.local_parameters.len());
            for local in &reaction.local_parameters {
                units.push(reducer.reduce(local.unit.as_deref(), || Subject::reaction(&reaction.id)));
            }
            locals.push(units);
        }

        Self {
            system,
            model,
            compartments,
            species_amounts,
            species_symbols,
            parameters,
            locals,
        }
    }

    pub fn system(&self) -> &UnitSystem {
        &self.system
    }

    pub fn model(&self) -> &ResolvedModelUnits {
        &self.model
    }

    /// Unit of a species amount (its substance unit).
    pub fn species_amount(&self, index: usize) -> Option<ReducedUnit> {
        self.species_amounts.get(index).copied().flatten()
    }

    pub fn compartment(&self, index: usize) -> Option<ReducedUnit> {
        self.compartments.get(index).copied().flatten()
    }

    pub fn parameter(&self, index: usize) -> Option<ReducedUnit> {
        self.parameters.get(index).copied().flatten()
    }

    /// Unit a rate law is expected to have: model extent per model time.
    pub fn rate_unit(&self) -> Option<ReducedUnit> {
        self.model.extent?.checked_div(&self.model.time?)
    }

    /// Unit of a species derivative: substance per model time.
    pub fn derivative_unit(&self, species: usize) -> Option<ReducedUnit> {
        self.species_amount(species)?.checked_div(&self.model.time?)
    }
}

impl SymbolUnits for UnitTable {
    fn unit_of(&self, symbol: SymbolRef) -> Option<ReducedUnit> {
        match symbol {
            SymbolRef::LocalParameter(reaction, index) => self
                .locals
                .get(reaction.index())
                .and_then(|l| l.get(index))
                .copied()
                .flatten(),
            SymbolRef::Species(key) => self.species_symbols.get(key.index()).copied().flatten(),
            SymbolRef::Parameter(key) => self.parameter(key.index()),
            SymbolRef::Compartment(key) => self.compartment(key.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::SpeciesId;
    use kinetic_registry::{ModelUnits, RegistryBuilder};

    fn builder() -> RegistryBuilder {
        let mut builder = RegistryBuilder::new();
        builder.set_model_units(
            ModelUnits::new()
                .time("min")
                .extent("mmole")
                .substance("mmole")
                .volume("liter"),
        );
        builder.add_unit("mM").expr("mmole/liter").done().unwrap();
        builder.add_compartment("Vcent").unit("liter").done().unwrap();
        builder
    }

    #[test]
    fn test_species_symbol_is_concentration() {
        // GIVEN
        let mut builder = builder();
        builder.add_species("caf_cent", "Vcent").done().unwrap();
        builder
            .add_species("caf_amount", "Vcent")
            .has_only_substance_units(true)
            .done()
            .unwrap();
        let registry = builder.build();
        let mut violations = Violations::new();

        // WHEN
        let table = UnitTable::build(&registry, &mut violations);

        // THEN
        assert!(violations.is_empty());
        let mm = table.system().resolve("mM").unwrap();
        let conc = table.unit_of(SymbolRef::Species(SpeciesId::new(0))).unwrap();
        assert!(conc.is_equivalent_to(&mm));
        let amount = table.unit_of(SymbolRef::Species(SpeciesId::new(1))).unwrap();
        assert!(amount.is_compatible_with(&table.system().resolve("mole").unwrap()));
    }

    #[test]
    fn test_undefined_base_unit_is_reported() {
        // GIVEN
        let mut builder = builder();
        builder.add_parameter("k", 1.0).unit("furlong").done().unwrap();
        let registry = builder.build();
        let mut violations = Violations::new();

        // WHEN
        UnitTable::build(&registry, &mut violations);

        // THEN
        assert!(violations.contains(ErrorKind::UndefinedBaseUnit, &Subject::parameter("k")));
    }

    #[test]
    fn test_non_spatial_compartment() {
        let mut builder = builder();
        builder.add_compartment("Vbad").unit("min").done().unwrap();
        let registry = builder.build();
        let mut violations = Violations::new();

        UnitTable::build(&registry, &mut violations);

        assert!(violations.contains(ErrorKind::IncompatibleUnits, &Subject::compartment("Vbad")));
    }

    #[test]
    fn test_concentration_needs_volume_compartment() {
        let mut builder = builder();
        builder.add_compartment("membrane").unit("meter^2").done().unwrap();
        builder
            .add_species("x", "membrane")
            .initial_concentration(1.0)
            .done()
            .unwrap();
        let registry = builder.build();
        let mut violations = Violations::new();

        UnitTable::build(&registry, &mut violations);

        assert!(violations.contains(ErrorKind::IncompatibleUnits, &Subject::species("x")));
    }

    #[test]
    fn test_rate_and_derivative_units() {
        let mut builder = builder();
        builder.add_species("caf_cent", "Vcent").done().unwrap();
        let registry = builder.build();
        let mut violations = Violations::new();

        let table = UnitTable::build(&registry, &mut violations);

        let expected = table.system().resolve("mmole/min").unwrap();
        assert!(table.rate_unit().unwrap().is_equivalent_to(&expected));
        assert!(table.derivative_unit(0).unwrap().is_equivalent_to(&expected));
    }
}
