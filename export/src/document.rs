//! The interchange document.

use kinetic_graph::ReactionGraph;
use kinetic_model::Finalized;
use kinetic_registry::{InitialQuantity, ParameterOrigin};
use serde::Serialize;

/// Every declaration of a finalized model plus its generated equations.
#[derive(Debug, Clone, Serialize)]
pub struct ModelDocument {
    pub model_units: ModelUnitsData,
    pub units: Vec<UnitData>,
    pub compartments: Vec<CompartmentData>,
    pub species: Vec<SpeciesData>,
    pub parameters: Vec<ParameterData>,
    pub rules: Vec<RuleData>,
    pub reactions: Vec<ReactionData>,
    pub odes: Vec<OdeData>,
    pub graph: ReactionGraph,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelUnitsData {
    pub time: Option<String>,
    pub extent: Option<String>,
    pub substance: Option<String>,
    pub length: Option<String>,
    pub area: Option<String>,
    pub volume: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitData {
    pub id: String,
    pub symbol: Option<String>,
    /// Reduced form over SI base dimensions.
    pub reduced: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompartmentData {
    pub id: String,
    pub name: Option<String>,
    pub size: f64,
    pub unit: Option<String>,
    pub constant: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpeciesData {
    pub id: String,
    pub name: Option<String>,
    pub compartment: String,
    pub initial_amount: Option<f64>,
    pub initial_concentration: Option<f64>,
    pub substance_unit: Option<String>,
    pub has_only_substance_units: bool,
    pub constant: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterData {
    pub id: String,
    pub name: Option<String>,
    /// `None` for derived quantities.
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub constant: bool,
    /// Declaring reaction, for parameters declared next to one.
    pub reaction: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleData {
    pub target: String,
    pub expression: String,
    /// Position in evaluation order.
    pub order: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalParameterData {
    pub id: String,
    pub value: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionData {
    pub id: String,
    pub name: Option<String>,
    pub equation: String,
    pub reversible: bool,
    pub rate_law: String,
    pub local_parameters: Vec<LocalParameterData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TermData {
    pub reaction: String,
    pub coefficient: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OdeData {
    pub species: String,
    pub initial_amount: f64,
    pub terms: Vec<TermData>,
}

impl ModelDocument {
    pub fn from_model(model: &Finalized) -> Self {
        let registry = model.registry();
        let system = model.system();
        let model_units = registry.model_units();

        let units = registry
            .units()
            .iter()
            .map(|u| UnitData {
                id: u.id.clone(),
                symbol: u.symbol.clone(),
                reduced: model.units().system().resolve(&u.id).ok().map(|r| r.to_string()),
            })
            .collect();

        let compartments = registry
            .compartments()
            .iter()
            .map(|c| CompartmentData {
                id: c.id.clone(),
                name: c.name.clone(),
                size: c.size,
                unit: c.unit.clone(),
                constant: c.constant,
            })
            .collect();

        let species = registry
            .all_species()
            .iter()
            .map(|s| {
                let (initial_amount, initial_concentration) = match s.initial {
                    Some(InitialQuantity::Amount(a)) => (Some(a), None),
                    Some(InitialQuantity::Concentration(c)) => (None, Some(c)),
                    None => (None, None),
                };
                SpeciesData {
                    id: s.id.clone(),
                    name: s.name.clone(),
                    compartment: s.compartment.clone(),
                    initial_amount,
                    initial_concentration,
                    substance_unit: s.substance_unit.clone(),
                    has_only_substance_units: s.has_only_substance_units,
                    constant: s.constant,
                }
            })
            .collect();

        let parameters = registry
            .parameters()
            .iter()
            .map(|p| ParameterData {
                id: p.id.clone(),
                name: p.name.clone(),
                value: (!p.value.is_nan()).then_some(p.value),
                unit: p.unit.clone(),
                constant: p.constant,
                reaction: match p.origin {
                    ParameterOrigin::Model => None,
                    ParameterOrigin::Reaction(r) => Some(registry.reaction(r).id.clone()),
                },
            })
            .collect();

        let rules = system
            .algebraic
            .iter()
            .enumerate()
            .map(|(i, eq)| RuleData {
                target: registry.rule(eq.rule).target.clone(),
                expression: eq.source.to_string(),
                order: system
                    .evaluation_order
                    .iter()
                    .position(|&o| o == i)
                    .unwrap_or(i),
            })
            .collect();

        let reactions = registry
            .reactions()
            .iter()
            .map(|r| ReactionData {
                id: r.id.clone(),
                name: r.name.clone(),
                equation: r.equation.to_string(),
                reversible: r.equation.reversible,
                rate_law: r.rate_law.clone(),
                local_parameters: r
                    .local_parameters
                    .iter()
                    .map(|p| LocalParameterData {
                        id: p.id.clone(),
                        value: p.value,
                        unit: p.unit.clone(),
                    })
                    .collect(),
            })
            .collect();

        let odes = system
            .differential
            .iter()
            .map(|eq| OdeData {
                species: registry.species(eq.species).id.clone(),
                initial_amount: eq.initial_amount,
                terms: eq
                    .terms
                    .iter()
                    .map(|t| TermData {
                        reaction: registry.reaction(t.reaction).id.clone(),
                        coefficient: t.coefficient,
                    })
                    .collect(),
            })
            .collect();

        Self {
            model_units: ModelUnitsData {
                time: model_units.time.clone(),
                extent: model_units.extent.clone(),
                substance: model_units.substance.clone(),
                length: model_units.length.clone(),
                area: model_units.area.clone(),
                volume: model_units.volume.clone(),
            },
            units,
            compartments,
            species,
            parameters,
            rules,
            reactions,
            odes,
            graph: model.graph().clone(),
        }
    }
}
