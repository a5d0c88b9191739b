//! Indexes for species/reaction lookups.

use std::collections::{BTreeSet, HashMap};

/// Adjacency index: species node -> reaction edges, split by role.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    /// Reactions where the species is a reactant
    consumed_by: HashMap<usize, BTreeSet<usize>>,
    /// Reactions where the species is a product
    produced_by: HashMap<usize, BTreeSet<usize>>,
    /// Reactions whose rate law reads the species without changing it
    modified_by: HashMap<usize, BTreeSet<usize>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge: usize, reactants: &[usize], products: &[usize], modifiers: &[usize]) {
        for &node in reactants {
            self.consumed_by.entry(node).or_default().insert(edge);
        }
        for &node in products {
            self.produced_by.entry(node).or_default().insert(edge);
        }
        for &node in modifiers {
            self.modified_by.entry(node).or_default().insert(edge);
        }
    }

    pub fn consumers(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.consumed_by
            .get(&node)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn producers(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.produced_by
            .get(&node)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn modifiers(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.modified_by
            .get(&node)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// All reactions touching a node, in edge order.
    pub fn all(&self, node: usize) -> Vec<usize> {
        let set: BTreeSet<usize> = self
            .consumers(node)
            .chain(self.producers(node))
            .chain(self.modifiers(node))
            .collect();
        set.into_iter().collect()
    }
}
