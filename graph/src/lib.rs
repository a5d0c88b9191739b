//! Kinetic Graph
//!
//! The species/reaction graph handed to visualization consumers:
//! - Nodes: compartments and species
//! - Hyperedges: reactions, with reactants, products and modifiers
//! - Adjacency index: reactions consuming or producing a species
//!
//! Layout and drawing belong to the consumer, behind [`Renderer`].

mod graph;
mod index;

pub use graph::*;
pub use index::AdjacencyIndex;
