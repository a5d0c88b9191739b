//! Identifier uniqueness and sharing across namespaces.

use kinetic_registry::RegistryResult;
use kinetic_tests::prelude::*;

mod within_namespace {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("duplicates_within_namespace")
            .model(models::caffeine)
            .edit(
                "duplicate_species",
                |draft: &mut Draft| draft.add_species("caf_gut", "Vgut").done().map(|_| ()),
                |a| {
                    a.registration_error(ErrorKind::DuplicateIdentifier)
                        .error("Duplicate species identifier: caf_gut")
                },
            )
            .edit(
                "duplicate_promoted_parameter",
                |draft: &mut Draft| {
                    draft
                        .add_reaction("R3", "caf_peri ->")
                        .rate_law("Q * caf_peri")
                        .parameter("Q", 2.0, "l_per_min")
                        .done()
                        .map(|_| ())
                },
                |a| a.registration_error(ErrorKind::DuplicateIdentifier),
            )
            // the refused reaction left nothing behind
            .step("unchanged", |a| a.no_errors().odes(3).terms(7))
            .edit(
                "malformed_identifier",
                |draft: &mut Draft| draft.add_parameter("2fast", 1.0).done().map(|_| ()),
                |a| a.registration_failed().error_matches(r"^Invalid parameter '2fast'")
            )
            .edit(
                "amount_and_concentration",
                |draft: &mut Draft| {
                    draft
                        .add_species("caf_liver", "Vcent")
                        .initial_amount(1.0)
                        .initial_concentration(1.0)
                        .done()
                        .map(|_| ())
                },
                |a| a.registration_failed().error("mutually exclusive"),
            )
    }

    #[test]
    fn test_duplicates_are_refused_at_registration() {
        scenario().run().unwrap();
    }
}

mod across_namespaces {
    use super::*;

    fn unreferenced_twin(draft: &mut Draft) -> RegistryResult<()> {
        draft.add_parameter("Vperi", 2.0).unit("liter").done()?;
        draft.add_unit("Q").expr("1/min").done()?;
        Ok(())
    }

    fn referenced_twin(draft: &mut Draft) -> RegistryResult<()> {
        draft.add_parameter("caf_gut", 1.0).done()?;
        Ok(())
    }

    pub fn scenario() -> Scenario {
        Scenario::new("shared_identifiers")
            .model(models::caffeine)
            .edit("unreferenced_twin", unreferenced_twin, |a| {
                a.no_errors().assert_fn(|model| {
                    model
                        .warnings()
                        .contains(ErrorKind::ShadowedIdentifier, &Subject::compartment("Vperi"))
                })
            })
            .edit("referenced_twin", referenced_twin, |a| {
                a.rejected_with(ErrorKind::AmbiguousIdentifier, Subject::species("caf_gut"))
                    .errors(1)
            })
    }

    #[test]
    fn test_shared_identifiers_across_namespaces() {
        scenario().run().unwrap();
    }
}

mod local_parameters {
    use super::*;

    fn local_clearance(draft: &mut Draft) -> RegistryResult<()> {
        draft
            .add_reaction("ELIMINATION", "caf_peri ->")
            .rate_law("CL * caf_peri")
            .local_parameter("CL", 0.5, "l_per_min")
            .done()?;
        Ok(())
    }

    pub fn scenario() -> Scenario {
        Scenario::new("local_parameters")
            .model(models::caffeine)
            .edit("local_shadows_model_parameter", local_clearance, |a| {
                a.no_errors().terms(8).assert_fn(|model| {
                    let mut state = model.initial_state();
                    model.set_amount(&mut state, "caf_peri", 2.0).is_ok()
                        && model.set_local_parameter(&mut state, "ELIMINATION", "CL", 0.25).is_ok()
                        // R2 = 2, ELIMINATION = 0.25 * 2
                        && model.derivatives(&state)[2] == -2.5
                })
            })
    }

    #[test]
    fn test_local_parameter_shadows_model_parameter() {
        scenario().run().unwrap();
    }
}
