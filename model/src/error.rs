//! Lifecycle failure.

use crate::draft::Draft;
use kinetic_core::Violations;
use thiserror::Error;

/// A failed lifecycle transition.
///
/// Carries the draft back unchanged, together with every diagnostic the
/// transition collected, so the caller can fix the draft and retry.
#[derive(Debug, Error)]
#[error("model rejected:\n{report}")]
pub struct Rejected {
    pub draft: Draft,
    pub report: Violations,
}

impl Rejected {
    pub fn new(draft: Draft, report: Violations) -> Self {
        Self { draft, report }
    }

    pub fn report(&self) -> &Violations {
        &self.report
    }

    pub fn into_draft(self) -> Draft {
        self.draft
    }
}
