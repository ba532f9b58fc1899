//! Pattern matching and conclusion instantiation

pub mod bindings;
pub mod matcher;
pub mod subst;

pub use bindings::Bindings;
pub use matcher::{match_all, match_term, match_with};
pub use subst::{instantiate, renumber_fresh, substitute};
