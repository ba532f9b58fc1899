//! The symbolic term model
//!
//! Atoms, variables, compound terms, and statements, plus the symbol
//! interner and the canonical term order.

pub mod interner;
#[allow(clippy::module_inception)]
pub mod term;

pub use interner::{AtomId, Interner, VarId};
pub use term::{Connector, Copula, Term, TermDisplay, VarKind, Variable};
