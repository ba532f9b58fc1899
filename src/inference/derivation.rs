//! Derived conclusions with computed truth

use crate::rules::Strength;
use crate::term::{Interner, Term};
use crate::truth::TruthValue;
use std::fmt;

/// A single derived belief: conclusion term plus its computed truth value
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub term: Term,
    pub truth: TruthValue,
    /// Companion value for conclusions whose rule names a second truth
    /// function
    pub secondary: Option<TruthValue>,
    pub strength: Strength,
    /// Name of the table rule that produced this conclusion
    pub rule: String,
    /// Whether the premises were consumed in swapped order
    pub swapped: bool,
}

impl Derivation {
    /// Wrap with an interner for name-resolved display
    pub fn display<'a>(&'a self, interner: &'a Interner) -> DerivationDisplay<'a> {
        DerivationDisplay {
            derivation: self,
            interner,
        }
    }
}

pub struct DerivationDisplay<'a> {
    derivation: &'a Derivation,
    interner: &'a Interner,
}

impl fmt::Display for DerivationDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}]",
            self.derivation.term.display(self.interner),
            self.derivation.truth,
            self.derivation.rule
        )
    }
}
