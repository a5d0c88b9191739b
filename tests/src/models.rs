//! Reference models.

use kinetic_model::Draft;
use kinetic_registry::{ModelUnits, RegistryResult};

/// Two-compartment caffeine pharmacokinetics.
///
/// Caffeine is absorbed from the gut into the central compartment, cleared
/// from there, and distributes to and from a peripheral compartment. The
/// plasma concentration in ng/ml is an assignment rule.
pub fn caffeine() -> RegistryResult<Draft> {
    let mut m = Draft::new();

    for (id, expr) in [
        ("mmole", "mmole"),
        ("min", "min"),
        ("mg", "mg"),
        ("per_min", "1/min"),
        ("per_min_l", "1/min/liter"),
        ("m2", "meter^2"),
        ("mM", "mmole/liter"),
        ("mmole_per_min", "mmole/min"),
        ("mmole_per_min_l", "mmole/min/liter"),
        ("g_per_mole", "g/mole"),
        ("l_per_min", "l/min"),
        ("l_per_min_mmole", "l/min/mmole"),
        ("ng_per_ml", "mg/ml"),
        ("ng_per_mug", "ng/µg"),
    ] {
        m.add_unit(id).expr(expr).done()?;
    }
    m.add_unit("mug").expr("µg").symbol("µg").done()?;

    m.set_model_units(
        ModelUnits::new()
            .time("min")
            .extent("mmole")
            .substance("mmole")
            .length("meter")
            .area("m2")
            .volume("liter"),
    );

    for (id, name) in [
        ("Vgut", "gut compartment"),
        ("Vperi", "peripheral compartment"),
        ("Vcent", "central compartment"),
    ] {
        m.add_compartment(id).name(name).size(1.0).unit("liter").done()?;
    }

    m.add_species("caf_gut", "Vgut")
        .name("caffeine gut")
        .initial_amount(1.0)
        .has_only_substance_units(false)
        .substance_unit("mmole")
        .done()?;
    m.add_species("caf_cent", "Vcent")
        .name("caffeine plasma")
        .initial_concentration(0.0)
        .substance_unit("mmole")
        .done()?;
    m.add_species("caf_peri", "Vperi")
        .name("caffeine peripheral")
        .initial_concentration(0.0)
        .substance_unit("mmole")
        .done()?;

    m.add_parameter("Mr_caf", 100.0)
        .name("molecular weight caffeine")
        .unit("g_per_mole")
        .done()?;
    m.add_parameter("conc_conversion", 1000.0)
        .name("conversion factor [µg/ml] -> [ng/ml]")
        .unit("ng_per_mug")
        .done()?;
    m.add_parameter("caf_plasma", f64::NAN)
        .name("caffeine plasma [ng/ml]")
        .unit("ng_per_ml")
        .constant(false)
        .done()?;

    m.add_rule("caf_plasma", "caf_cent * Mr_caf * conc_conversion")
        .done()?;

    m.add_reaction("ABSORPTION", "caf_gut -> caf_cent")
        .name("absorption caffeine")
        .rate_law("k_absorption * caf_gut")
        .parameter("k_absorption", 1.0, "l_per_min")
        .done()?;
    m.add_reaction("CLEARANCE", "caf_cent ->")
        .name("clearance caffeine")
        .rate_law("CL * caf_cent")
        .parameter("CL", 1.0, "l_per_min")
        .done()?;
    m.add_reaction("R1", "caf_cent -> caf_peri")
        .name("transport peripheral (R1)")
        .rate_law("Q * caf_cent")
        .parameter("Q", 1.0, "l_per_min")
        .done()?;
    m.add_reaction("R2", "caf_peri -> caf_cent")
        .name("transport central (R2)")
        .rate_law("Q * caf_peri")
        .done()?;

    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caffeine_builds() {
        let draft = caffeine().unwrap();

        let registry = draft.registry();

        assert_eq!(registry.units().len(), 15);
        assert_eq!(registry.compartments().len(), 3);
        assert_eq!(registry.all_species().len(), 3);
        // three declared plus three promoted from reactions
        assert_eq!(registry.parameters().len(), 6);
        assert_eq!(registry.reactions().len(), 4);
    }
}
