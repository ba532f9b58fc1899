//! Binding maps from rule placeholders to concrete subterms

use crate::term::{Term, VarId};
use indexmap::IndexMap;

/// A binding map produced by matching
///
/// Backed by an `IndexMap` so iteration order is insertion order, which
/// keeps dispatch output deterministic. Entries are only ever appended;
/// a bound placeholder is compared against, never rebound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    map: IndexMap<VarId, Term>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings {
            map: IndexMap::new(),
        }
    }

    /// Term bound to a placeholder, if any
    pub fn get(&self, var: VarId) -> Option<&Term> {
        self.map.get(&var)
    }

    /// Bind a placeholder. Must not already be bound.
    pub fn insert(&mut self, var: VarId, term: Term) {
        debug_assert!(!self.map.contains_key(&var), "placeholder rebound");
        self.map.insert(var, term);
    }

    /// Bind or replace a placeholder. Used by the substitution directive,
    /// which deliberately overrides a premise binding with a fresh variable.
    pub fn rebind(&mut self, var: VarId, term: Term) {
        self.map.insert(var, term);
    }

    pub fn contains(&self, var: VarId) -> bool {
        self.map.contains_key(&var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VarId, &Term)> {
        self.map.iter()
    }
}
