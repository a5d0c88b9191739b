//! Kinetic Model
//!
//! The model lifecycle:
//! `Draft` → `Assembling` → `Validated` → `Finalized`.
//!
//! A draft accumulates entities. Assembly generates the equations,
//! validation runs the whole-model consistency checks, and a finalized
//! model is immutable and can be evaluated, exported or rendered. Any
//! failure hands the draft back together with every diagnostic.

mod draft;
mod error;
mod lifecycle;
mod state;

pub use draft::Draft;
pub use error::Rejected;
pub use lifecycle::{Assembling, Finalized, Validated};
pub use state::ModelState;
