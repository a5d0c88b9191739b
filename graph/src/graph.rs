//! Species/reaction graph construction.

use crate::index::AdjacencyIndex;
use kinetic_analyzer::SymbolRef;
use kinetic_compiler::Assembly;
use kinetic_parser::StoichTerm;
use serde::Serialize;
use std::collections::HashMap;

/// A compartment or species node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Compartment {
        id: String,
        name: Option<String>,
        size: f64,
    },
    Species {
        id: String,
        name: Option<String>,
        /// Index of the compartment node.
        compartment: Option<usize>,
    },
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Compartment { id, .. } | Node::Species { id, .. } => id,
        }
    }

    pub fn is_species(&self) -> bool {
        matches!(self, Node::Species { .. })
    }
}

/// A species node taking part in a reaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    pub node: usize,
    pub coefficient: f64,
}

/// A reaction hyperedge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionEdge {
    pub id: String,
    pub name: Option<String>,
    pub reactants: Vec<Participant>,
    pub products: Vec<Participant>,
    /// Species read by the rate law but absent from the equation.
    pub modifiers: Vec<usize>,
    pub reversible: bool,
    pub rate_law: String,
}

/// Nodes and reaction hyperedges of a finalized model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReactionGraph {
    nodes: Vec<Node>,
    edges: Vec<ReactionEdge>,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
    #[serde(skip)]
    adjacency: AdjacencyIndex,
}

impl ReactionGraph {
    pub fn from_assembly(assembly: &Assembly) -> Self {
        let registry = &assembly.registry;
        let mut graph = Self::default();

        for compartment in registry.compartments() {
            graph.push_node(Node::Compartment {
                id: compartment.id.clone(),
                name: compartment.name.clone(),
                size: compartment.size,
            });
        }
        for species in registry.all_species() {
            let compartment = graph.by_id.get(&species.compartment).copied();
            graph.push_node(Node::Species {
                id: species.id.clone(),
                name: species.name.clone(),
                compartment,
            });
        }

        for reaction in registry.reactions() {
            let participants = |terms: &[StoichTerm]| -> Vec<Participant> {
                terms
                    .iter()
                    .filter_map(|t| {
                        graph.species_node(&t.species).map(|node| Participant {
                            node,
                            coefficient: t.coefficient,
                        })
                    })
                    .collect()
            };
            let reactants = participants(&reaction.equation.reactants);
            let products = participants(&reaction.equation.products);

            let mut modifiers = Vec::new();
            if let Some(rate) = assembly.system.rate(reaction.key) {
                for symbol in rate.expression.symbols() {
                    if let SymbolRef::Species(key) = symbol {
                        let species = registry.species(key);
                        if reaction.involves(&species.id) {
                            continue;
                        }
                        if let Some(node) = graph.species_node(&species.id) {
                            if !modifiers.contains(&node) {
                                modifiers.push(node);
                            }
                        }
                    }
                }
            }

            let edge = graph.edges.len();
            let reactant_nodes: Vec<usize> = reactants.iter().map(|p| p.node).collect();
            let product_nodes: Vec<usize> = products.iter().map(|p| p.node).collect();
            graph
                .adjacency
                .insert(edge, &reactant_nodes, &product_nodes, &modifiers);
            graph.edges.push(ReactionEdge {
                id: reaction.id.clone(),
                name: reaction.name.clone(),
                reactants,
                products,
                modifiers,
                reversible: reaction.equation.reversible,
                rate_law: reaction.rate_law.clone(),
            });
        }

        graph
    }

    fn push_node(&mut self, node: Node) {
        // a species sharing a compartment's identifier keeps its own node
        self.by_id
            .entry(node.id().to_string())
            .or_insert(self.nodes.len());
        self.nodes.push(node);
    }

    fn species_node(&self, id: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.is_species() && n.id() == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[ReactionEdge] {
        &self.edges
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.by_id.get(id).map(|&i| &self.nodes[i])
    }

    pub fn edge_by_id(&self, id: &str) -> Option<&ReactionEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Reactions consuming a species, in registration order.
    pub fn consumers_of(&self, species: &str) -> Vec<&ReactionEdge> {
        self.species_node(species)
            .map(|n| self.adjacency.consumers(n).map(|e| &self.edges[e]).collect())
            .unwrap_or_default()
    }

    /// Reactions producing a species, in registration order.
    pub fn producers_of(&self, species: &str) -> Vec<&ReactionEdge> {
        self.species_node(species)
            .map(|n| self.adjacency.producers(n).map(|e| &self.edges[e]).collect())
            .unwrap_or_default()
    }

    /// Species nodes inside a compartment.
    pub fn species_in(&self, compartment: &str) -> Vec<&Node> {
        let Some(&index) = self.by_id.get(compartment) else {
            return Vec::new();
        };
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Species { compartment: Some(c), .. } if *c == index))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// A visualization consumer. Layout and drawing are its concern.
pub trait Renderer {
    type Output;

    fn render(&self, graph: &ReactionGraph) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_compiler::assemble;
    use kinetic_registry::RegistryBuilder;
    use pretty_assertions::assert_eq;

    fn graph() -> ReactionGraph {
        let mut builder = RegistryBuilder::new();
        builder.add_compartment("Vgut").done().unwrap();
        builder.add_compartment("Vcent").done().unwrap();
        builder.add_species("caf_gut", "Vgut").initial_amount(1.0).done().unwrap();
        builder.add_species("caf_cent", "Vcent").done().unwrap();
        builder.add_species("enzyme", "Vcent").done().unwrap();
        builder
            .add_reaction("ABSORPTION", "caf_gut -> caf_cent")
            .rate_law("k * caf_gut * enzyme")
            .parameter("k", 1.0, "l/min")
            .done()
            .unwrap();
        builder
            .add_reaction("CLEARANCE", "caf_cent ->")
            .rate_law("k * caf_cent")
            .done()
            .unwrap();
        ReactionGraph::from_assembly(&assemble(builder.build()).unwrap())
    }

    #[test]
    fn test_nodes_and_edges() {
        // GIVEN / WHEN
        let graph = graph();

        // THEN
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 2);
        let absorption = graph.edge_by_id("ABSORPTION").unwrap();
        assert_eq!(absorption.reactants.len(), 1);
        assert_eq!(absorption.products.len(), 1);
        let clearance = graph.edge_by_id("CLEARANCE").unwrap();
        assert!(clearance.products.is_empty());
    }

    #[test]
    fn test_modifiers_come_from_rate_law() {
        let graph = graph();

        let absorption = graph.edge_by_id("ABSORPTION").unwrap();
        let modifiers: Vec<&str> = absorption
            .modifiers
            .iter()
            .map(|&n| graph.node(n).unwrap().id())
            .collect();

        assert_eq!(modifiers, vec!["enzyme"]);
    }

    #[test]
    fn test_adjacency_queries() {
        let graph = graph();

        let consumers: Vec<&str> = graph.consumers_of("caf_cent").iter().map(|e| e.id.as_str()).collect();
        let producers: Vec<&str> = graph.producers_of("caf_cent").iter().map(|e| e.id.as_str()).collect();

        assert_eq!(consumers, vec!["CLEARANCE"]);
        assert_eq!(producers, vec!["ABSORPTION"]);
        assert_eq!(graph.species_in("Vcent").len(), 2);
    }

    #[test]
    fn test_renderer() {
        struct EdgeList;
        impl Renderer for EdgeList {
            type Output = Vec<String>;
            fn render(&self, graph: &ReactionGraph) -> Vec<String> {
                graph.edges().iter().map(|e| e.id.clone()).collect()
            }
        }

        assert_eq!(EdgeList.render(&graph()), vec!["ABSORPTION", "CLEARANCE"]);
    }

    #[test]
    fn test_serializes_nodes_and_edges() {
        let json = serde_json::to_value(graph()).unwrap();

        assert_eq!(json["nodes"][0]["kind"], "compartment");
        assert_eq!(json["edges"][1]["id"], "CLEARANCE");
        assert!(json.get("by_id").is_none());
    }
}
