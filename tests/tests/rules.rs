//! Assignment rule and whole-model assembly checks.

use kinetic_registry::RegistryResult;
use kinetic_tests::prelude::*;

fn set_rule(target: &'static str, expression: &'static str) -> impl Fn(&mut Draft) -> RegistryResult<()> {
    move |draft: &mut Draft| {
        match draft.builder_mut().rule_mut(target) {
            Some(rule) => rule.expression = expression.to_string(),
            None => {
                draft.add_rule(target, expression).done()?;
            }
        }
        Ok(())
    }
}

mod cycles {
    use super::*;

    fn mutual(draft: &mut Draft) -> RegistryResult<()> {
        draft.add_parameter("a", f64::NAN).constant(false).done()?;
        draft.add_parameter("b", f64::NAN).constant(false).done()?;
        draft.add_rule("a", "b + 1").done()?;
        draft.add_rule("b", "a * 2").done()?;
        Ok(())
    }

    pub fn scenario() -> Scenario {
        Scenario::new("rule_cycles")
            .model(models::caffeine)
            .edit("self_reference", set_rule("caf_plasma", "caf_plasma * 2"), |a| {
                a.rejected_with(ErrorKind::CyclicRule, Subject::rule("caf_plasma"))
                    .error("caf_plasma -> caf_plasma")
            })
            .edit("restore", set_rule("caf_plasma", "caf_cent * Mr_caf * conc_conversion"), |a| {
                a.no_errors()
            })
            .edit("mutual_reference", mutual, |a| {
                a.rejected_with(ErrorKind::CyclicRule, Subject::rule("a"))
                    .errors(1)
                    .error("a -> b -> a")
            })
            .edit("break_cycle", set_rule("b", "Mr_caf * 2"), |a| {
                a.no_errors().assignments(3).assigned("a", 201.0).assigned("b", 200.0)
            })
    }

    #[test]
    fn test_cyclic_rules_are_rejected() {
        scenario().run().unwrap();
    }
}

mod targets {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("rule_targets")
            .model(models::caffeine)
            .edit("species_written_by_reactions", set_rule("caf_peri", "caf_cent"), |a| {
                a.rejected_with(ErrorKind::ConflictingWrite, Subject::rule("caf_peri"))
                    .errors(2)
            })
    }

    #[test]
    fn test_species_target_written_by_reaction() {
        scenario().run().unwrap();
    }

    pub fn constant_scenario() -> Scenario {
        Scenario::new("constant_target")
            .model(models::caffeine)
            .edit("constant_parameter", set_rule("Mr_caf", "194"), |a| {
                a.rejected_with(ErrorKind::InvalidRuleTarget, Subject::rule("Mr_caf"))
            })
    }

    #[test]
    fn test_constant_target() {
        constant_scenario().run().unwrap();
    }

    pub fn unknown_scenario() -> Scenario {
        Scenario::new("unknown_target")
            .model(models::caffeine)
            .edit("undeclared_target", set_rule("caf_liver", "caf_cent"), |a| {
                a.rejected_with(ErrorKind::UnknownIdentifier, Subject::rule("caf_liver"))
            })
    }

    #[test]
    fn test_unknown_target() {
        unknown_scenario().run().unwrap();
    }
}

mod derived_quantities {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("derived_quantities")
            .model(models::caffeine)
            .edit(
                "derived_without_rule",
                |draft: &mut Draft| {
                    draft.add_parameter("auc", f64::NAN).constant(false).done()?;
                    Ok(())
                },
                |a| a.rejected_with(ErrorKind::AmbiguousDerivedQuantity, Subject::parameter("auc")),
            )
            .edit("with_rule", set_rule("auc", "caf_cent"), |a| a.no_errors().assignments(2))
    }

    #[test]
    fn test_derived_quantity_needs_a_rule() {
        scenario().run().unwrap();
    }

    pub fn two_rules_scenario() -> Scenario {
        Scenario::new("derived_quantity_two_rules")
            .model(models::caffeine)
            .edit(
                "second_rule_for_plasma",
                |draft: &mut Draft| {
                    draft.add_rule("caf_plasma", "Mr_caf").done()?;
                    Ok(())
                },
                |a| {
                    a.rejected_with(ErrorKind::AmbiguousDerivedQuantity, Subject::rule("caf_plasma"))
                        .errors(1)
                        .error("assigned by 2 rules")
                },
            )
    }

    #[test]
    fn test_derived_quantity_with_two_rules() {
        two_rules_scenario().run().unwrap();
    }
}

mod collected_errors {
    use super::*;

    fn break_everything(draft: &mut Draft) -> RegistryResult<()> {
        draft.add_species("caf_liver", "Vliver").done()?;
        draft
            .add_reaction("METABOLISM", "caf_cent -> px")
            .rate_law("kmet * caf_cent")
            .done()?;
        Ok(())
    }

    pub fn scenario() -> Scenario {
        Scenario::new("collected_errors")
            .model(models::caffeine)
            .edit("three_independent_errors", break_everything, |a| {
                a.rejected_with(ErrorKind::UnknownIdentifier, Subject::species("caf_liver"))
                    .rejected_with(ErrorKind::UnknownIdentifier, Subject::reaction("METABOLISM"))
                    .rejected_with(ErrorKind::UnresolvedSymbol, Subject::reaction("METABOLISM"))
                    .errors(3)
            })
    }

    #[test]
    fn test_every_assembly_error_is_reported() {
        scenario().run().unwrap();
    }
}
