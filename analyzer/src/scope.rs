//! Symbol scope management.

use crate::symexpr::SymbolRef;
use kinetic_registry::{Reaction, Registry};
use std::collections::HashMap;

/// A stack of binding frames searched innermost first.
///
/// Model scope stacks compartments, then parameters, then species, so a
/// species shadows a parameter of the same identifier. Rate laws push one
/// more frame holding the reaction's local parameters.
#[derive(Debug, Clone)]
pub struct Scope {
    frames: Vec<HashMap<String, SymbolRef>>,
}

impl Scope {
    /// Create a new empty scope.
    pub fn new() -> Self {
        Self {
            frames: vec![HashMap::new()],
        }
    }

    /// Every model-level symbol: compartments, parameters, species.
    pub fn for_model(registry: &Registry) -> Self {
        let mut scope = Self::new();
        for compartment in registry.compartments() {
            scope.define(&compartment.id, SymbolRef::Compartment(compartment.key));
        }
        scope.push();
        for parameter in registry.parameters() {
            scope.define(&parameter.id, SymbolRef::Parameter(parameter.key));
        }
        scope.push();
        for species in registry.all_species() {
            scope.define(&species.id, SymbolRef::Species(species.key));
        }
        scope
    }

    /// Model scope plus the reaction's local parameters.
    pub fn for_reaction(registry: &Registry, reaction: &Reaction) -> Self {
        let mut scope = Self::for_model(registry);
        scope.push();
        for (index, local) in reaction.local_parameters.iter().enumerate() {
            scope.define(&local.id, SymbolRef::LocalParameter(reaction.key, index));
        }
        scope
    }

    /// Push a new scope frame.
    pub fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Pop the current scope frame.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Define a symbol in the current frame.
    /// Returns `false` if the name is already bound in that frame.
    pub fn define(&mut self, name: &str, symbol: SymbolRef) -> bool {
        match self.frames.last_mut() {
            Some(frame) if !frame.contains_key(name) => {
                frame.insert(name.to_string(), symbol);
                true
            }
            _ => false,
        }
    }

    /// Look up a name, searching from innermost to outermost frame.
    pub fn lookup(&self, name: &str) -> Option<SymbolRef> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).copied())
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of frames binding `name`; more than one means shadowing.
    pub fn bindings_of(&self, name: &str) -> usize {
        self.frames.iter().filter(|f| f.contains_key(name)).count()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
