//! Structural properties of assembly.

use std::collections::BTreeSet;

use kinetic_model::Assembling;
use kinetic_tests::prelude::*;
use proptest::prelude::*;

const SPECIES: [&str; 3] = ["caf_gut", "caf_cent", "caf_peri"];

/// Every derivative term as `(species, reaction, coefficient)`.
fn terms(assembling: &Assembling) -> BTreeSet<(String, String, i64)> {
    let assembly = assembling.assembly();
    let registry = &assembly.registry;
    assembly
        .system
        .differential
        .iter()
        .flat_map(|eq| {
            eq.terms.iter().map(move |t| {
                (
                    registry.species(eq.species).id.clone(),
                    registry.reaction(t.reaction).id.clone(),
                    t.coefficient as i64,
                )
            })
        })
        .collect()
}

proptest! {
    #[test]
    fn detaching_species_drops_exactly_their_terms(mask in proptest::collection::vec(any::<bool>(), 3)) {
        // GIVEN
        let original = terms(&models::caffeine().unwrap().assemble().unwrap());
        let detached: Vec<&str> = SPECIES
            .iter()
            .zip(&mask)
            .filter(|(_, on)| **on)
            .map(|(s, _)| *s)
            .collect();

        // WHEN
        let mut draft = models::caffeine().unwrap();
        for species in &detached {
            draft.builder_mut().detach_species(species);
        }
        let reassembled = terms(&draft.assemble().unwrap());

        // THEN
        let expected: BTreeSet<_> = original
            .into_iter()
            .filter(|(species, _, _)| !detached.contains(&species.as_str()))
            .collect();
        prop_assert_eq!(reassembled, expected);
    }
}

#[test]
fn test_detached_species_keeps_an_empty_equation() {
    let mut draft = models::caffeine().unwrap();
    draft.builder_mut().detach_species("caf_peri");

    let model = draft.compile().unwrap();

    assert_eq!(model.system().differential.len(), 3);
    let peri = model.registry().species_by_id("caf_peri").unwrap().key;
    assert!(model.system().differential_for(peri).unwrap().terms.is_empty());
}
