//! Caffeine pharmacokinetics integration tests.

use kinetic_export::{EquationListing, Exporter, JsonExporter};
use kinetic_tests::prelude::*;
use pretty_assertions::assert_eq;

mod compilation {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("caffeine_compilation")
            .model(models::caffeine)
            .step("compile", |a| a.no_errors().odes(3).assignments(1).terms(7).warnings(0))
            .step("listing", |a| {
                a.listing_line("caf_plasma = caf_cent * Mr_caf * conc_conversion")
                    .listing_line("d caf_gut/dt = -ABSORPTION")
                    .listing_line("d caf_cent/dt = ABSORPTION - CLEARANCE - R1 + R2")
                    .listing_line("d caf_peri/dt = R1 - R2")
            })
            // 1 mmole in the gut, every rate constant 1 l/min
            .step("initial_derivatives", |a| a.derivatives(&[-1.0, 1.0, 0.0]).assigned("caf_plasma", 0.0))
    }

    #[test]
    fn test_caffeine_compiles_to_three_odes_and_one_rule() {
        scenario().run().unwrap();
    }
}

mod unit_mismatch {
    use super::*;

    fn set_conversion_unit(unit: &'static str) -> impl Fn(&mut Draft) -> kinetic_registry::RegistryResult<()> {
        move |draft: &mut Draft| {
            if let Some(p) = draft.builder_mut().parameter_mut("conc_conversion") {
                p.unit = Some(unit.to_string());
            }
            Ok(())
        }
    }

    pub fn scenario() -> Scenario {
        Scenario::new("caffeine_unit_mismatch")
            .model(models::caffeine)
            .edit("conversion_in_minutes", set_conversion_unit("min"), |a| {
                a.rejected_with(ErrorKind::IncompatibleUnits, Subject::rule("caf_plasma"))
                    .errors(1)
                    .error_matches(r"IncompatibleUnits.*caf_plasma")
            })
            .edit("conversion_restored", set_conversion_unit("ng_per_mug"), |a| a.no_errors())
    }

    #[test]
    fn test_time_unit_on_conversion_factor_is_rejected() {
        scenario().run().unwrap();
    }
}

mod unit_exponents {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("caffeine_unit_exponents")
            .model(models::caffeine)
            .edit(
                "overflowing_exponent",
                |draft: &mut Draft| {
                    if let Some(p) = draft.builder_mut().parameter_mut("Mr_caf") {
                        p.unit = Some("(m^2147483647)^2".into());
                    }
                    Ok(())
                },
                |a| {
                    a.rejected_with(ErrorKind::InvalidExpression, Subject::parameter("Mr_caf"))
                        .error("exponent out of range")
                },
            )
    }

    #[test]
    fn test_overflowing_unit_exponent_is_reported() {
        scenario().run().unwrap();
    }
}

mod rate_units {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("caffeine_rate_units")
            .model(models::caffeine)
            .edit(
                "first_order_constant",
                |draft: &mut Draft| {
                    if let Some(p) = draft.builder_mut().parameter_mut("CL") {
                        p.unit = Some("per_min".into());
                    }
                    Ok(())
                },
                |a| a.rejected_with(ErrorKind::IncompatibleUnits, Subject::reaction("CLEARANCE")),
            )
    }

    #[test]
    fn test_rate_law_in_concentration_per_time_is_rejected() {
        scenario().run().unwrap();
    }
}

#[test]
fn test_plasma_concentration_binds_late() {
    // GIVEN
    let model = models::caffeine().unwrap().compile().unwrap();
    let mut state = model.initial_state();

    // WHEN
    model.set_amount(&mut state, "caf_cent", 0.5).unwrap();
    model.set_parameter(&mut state, "Q", 2.0).unwrap();

    // THEN
    assert_eq!(
        model.assignments(&state),
        vec![("caf_plasma".to_string(), 50_000.0)]
    );
    // ABSORPTION = 1, CLEARANCE = 0.5, R1 = 1, R2 = 0
    assert_eq!(model.derivatives(&state), vec![-1.0, -0.5, 1.0]);
}

#[test]
fn test_exports() {
    let model = models::caffeine().unwrap().compile().unwrap();

    let json = JsonExporter::pretty().emit(&model).unwrap();
    let listing = EquationListing::new().emit(&model).unwrap();

    assert_eq!(json.media_type, "application/json");
    assert!(json.content.contains("\"caf_plasma\""));
    assert_eq!(listing.media_type, "text/plain");
    assert!(listing.content.starts_with("# rates\nABSORPTION = k_absorption * caf_gut\n"));
}

#[test]
fn test_reaction_graph() {
    let model = models::caffeine().unwrap().compile().unwrap();

    let graph = model.graph();

    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 4);
    let consumers: Vec<&str> = graph
        .consumers_of("caf_cent")
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(consumers, vec!["CLEARANCE", "R1"]);
}
