//! Inference: rule dispatch and truth-bearing derivations

pub mod derivation;
pub mod engine;

pub use derivation::Derivation;
pub use engine::{Application, RuleEngine};
