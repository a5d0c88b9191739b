//! Plain-text equation listing.

use crate::{Exporter, ExportResult, SerializedDocument};
use kinetic_model::Finalized;
use std::fmt::Write;

/// Lists rate laws, assignments in evaluation order, and derivatives.
///
/// ```text
/// ABSORPTION = k_absorption * caf_gut
/// caf_plasma = caf_cent * Mr_caf * conc_conversion
/// d caf_gut/dt = -ABSORPTION
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EquationListing;

impl EquationListing {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, model: &Finalized) -> ExportResult<String> {
        let registry = model.registry();
        let system = model.system();
        let mut out = String::new();

        writeln!(out, "# rates")?;
        for rate in &system.rates {
            writeln!(out, "{} = {}", registry.reaction(rate.reaction).id, rate.source)?;
        }

        if !system.algebraic.is_empty() {
            writeln!(out, "# assignments")?;
            for eq in system.ordered_algebraic() {
                writeln!(out, "{} = {}", registry.rule(eq.rule).target, eq.source)?;
            }
        }

        writeln!(out, "# odes")?;
        for eq in &system.differential {
            write!(out, "d {}/dt = ", registry.species(eq.species).id)?;
            if eq.terms.is_empty() {
                out.push('0');
            }
            for (i, term) in eq.terms.iter().enumerate() {
                let reaction = &registry.reaction(term.reaction).id;
                let sign = match (i, term.coefficient < 0.0) {
                    (0, true) => "-",
                    (0, false) => "",
                    (_, true) => " - ",
                    (_, false) => " + ",
                };
                let magnitude = term.coefficient.abs();
                if magnitude == 1.0 {
                    write!(out, "{}{}", sign, reaction)?;
                } else {
                    write!(out, "{}{} * {}", sign, magnitude, reaction)?;
                }
            }
            out.push('\n');
        }

        Ok(out)
    }
}

impl Exporter for EquationListing {
    fn emit(&self, model: &Finalized) -> ExportResult<SerializedDocument> {
        Ok(SerializedDocument {
            media_type: "text/plain",
            content: self.render(model)?,
        })
    }
}
