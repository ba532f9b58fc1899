//! Symbol interning for atoms and variable names
//!
//! Term atoms and variable identifiers are stored as interned `u32` IDs:
//! O(1) comparison and hashing, `Copy` semantics, and compact terms. Each
//! symbol namespace has its own ID type so an atom ID can never be confused
//! with a variable ID. The interner is passed through the caller's context
//! rather than living in global state, which keeps the kernel safe for
//! concurrent dispatch.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// ID for an interned atom name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AtomId(pub(crate) u32);

/// ID for an interned variable name
///
/// IDs with the high bit set are *fresh* variables minted by a rule's
/// substitution directive; they never resolve to an interned name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub(crate) u32);

const FRESH_BIT: u32 = 1 << 31;

impl AtomId {
    /// Get the raw ID value
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl VarId {
    /// Get the raw ID value
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Mint the n-th fresh variable ID of a dispatch invocation
    pub fn fresh(n: u32) -> Self {
        VarId(FRESH_BIT | n)
    }

    /// Whether this ID was minted by a substitution directive
    pub fn is_fresh(self) -> bool {
        self.0 & FRESH_BIT != 0
    }

    /// Sequence number of a fresh ID
    pub fn fresh_index(self) -> u32 {
        self.0 & !FRESH_BIT
    }
}

/// Internal string arena for a single symbol namespace
#[derive(Debug, Clone, Default)]
struct StringArena {
    strings: Vec<String>,
    lookup: HashMap<String, u32>,
}

impl StringArena {
    fn new() -> Self {
        StringArena {
            strings: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }
        let id = self.strings.len() as u32;
        self.strings.push(name.to_string());
        self.lookup.insert(name.to_string(), id);
        id
    }

    fn resolve(&self, id: u32) -> &str {
        &self.strings[id as usize]
    }

    fn get(&self, name: &str) -> Option<u32> {
        self.lookup.get(name).copied()
    }

    fn len(&self) -> usize {
        self.strings.len()
    }
}

/// Symbol interner for NAL terms
///
/// Separate arenas for atom names and variable names. Cloning the interner
/// is cheap enough for snapshotting; IDs remain valid across clones.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    atoms: StringArena,
    variables: StringArena,
}

impl Interner {
    /// Create a new empty interner
    pub fn new() -> Self {
        Interner {
            atoms: StringArena::new(),
            variables: StringArena::new(),
        }
    }

    /// Intern an atom name, returning its ID (get-or-create)
    pub fn intern_atom(&mut self, name: &str) -> AtomId {
        AtomId(self.atoms.intern(name))
    }

    /// Resolve an atom ID to its name
    pub fn resolve_atom(&self, id: AtomId) -> &str {
        self.atoms.resolve(id.0)
    }

    /// Get the ID for an already-interned atom
    pub fn get_atom(&self, name: &str) -> Option<AtomId> {
        self.atoms.get(name).map(AtomId)
    }

    /// Number of interned atoms
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Intern a variable name, returning its ID (get-or-create)
    pub fn intern_variable(&mut self, name: &str) -> VarId {
        VarId(self.variables.intern(name))
    }

    /// Resolve a variable ID to its name; fresh IDs have no interned name
    pub fn resolve_variable(&self, id: VarId) -> Option<&str> {
        if id.is_fresh() {
            None
        } else {
            Some(self.variables.resolve(id.0))
        }
    }

    /// Get the ID for an already-interned variable
    pub fn get_variable(&self, name: &str) -> Option<VarId> {
        self.variables.get(name).map(VarId)
    }

    /// Number of interned variable names
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.0)
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fresh() {
            write!(f, "V_{}", self.fresh_index())
        } else {
            write!(f, "V{}", self.0)
        }
    }
}
