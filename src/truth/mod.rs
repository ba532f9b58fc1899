//! Truth values and the tag-keyed truth calculus

pub mod functions;

use serde::{Deserialize, Serialize};
use std::fmt;

/// An uncertain truth value: frequency in `[0,1]`, confidence in `[0,1)`
///
/// Range policy: violations are a calculus defect, fatal in debug builds
/// (`debug_assert!`), clamped into range in release builds. Confidence is
/// clamped strictly below 1 — no belief is ever absolutely certain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruthValue {
    pub frequency: f32,
    pub confidence: f32,
}

impl TruthValue {
    /// Largest representable confidence
    pub const MAX_CONFIDENCE: f32 = 1.0 - 1.0e-6;

    pub fn new(frequency: f32, confidence: f32) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&frequency),
            "frequency out of range: {frequency}"
        );
        debug_assert!(
            (0.0..1.0).contains(&confidence),
            "confidence out of range: {confidence}"
        );
        Self {
            frequency: frequency.clamp(0.0, 1.0),
            confidence: confidence.clamp(0.0, Self::MAX_CONFIDENCE),
        }
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{:.2};{:.2}%", self.frequency, self.confidence)
    }
}

/// Tag naming a truth function in the rule table
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TruthTag {
    Deduction,
    Analogy,
    Resemblance,
    Abduction,
    Induction,
    Exemplification,
    Comparison,
    Intersection,
    Union,
    Difference,
    Combine,
    DecomposePpp,
    DecomposePnn,
    DecomposePnp,
    DecomposeNpp,
    DecomposeNnn,
    Conversion,
    Contraposition,
    Negation,
    StructuralDeduction,
    Revision,
}

impl TruthTag {
    /// Number of premise truth values the function consumes
    pub fn premise_count(self) -> usize {
        match self {
            TruthTag::Conversion
            | TruthTag::Contraposition
            | TruthTag::Negation
            | TruthTag::StructuralDeduction => 1,
            _ => 2,
        }
    }

    /// Tag name as written in the rule table (`:t/` prefix stripped)
    pub fn name(self) -> &'static str {
        match self {
            TruthTag::Deduction => "deduction",
            TruthTag::Analogy => "analogy",
            TruthTag::Resemblance => "resemblance",
            TruthTag::Abduction => "abduction",
            TruthTag::Induction => "induction",
            TruthTag::Exemplification => "exemplification",
            TruthTag::Comparison => "comparison",
            TruthTag::Intersection => "intersection",
            TruthTag::Union => "union",
            TruthTag::Difference => "difference",
            TruthTag::Combine => "combine",
            TruthTag::DecomposePpp => "decompose-ppp",
            TruthTag::DecomposePnn => "decompose-pnn",
            TruthTag::DecomposePnp => "decompose-pnp",
            TruthTag::DecomposeNpp => "decompose-npp",
            TruthTag::DecomposeNnn => "decompose-nnn",
            TruthTag::Conversion => "conversion",
            TruthTag::Contraposition => "contraposition",
            TruthTag::Negation => "negation",
            TruthTag::StructuralDeduction => "structural-deduction",
            TruthTag::Revision => "revision",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "deduction" => TruthTag::Deduction,
            "analogy" => TruthTag::Analogy,
            "resemblance" => TruthTag::Resemblance,
            "abduction" => TruthTag::Abduction,
            "induction" => TruthTag::Induction,
            "exemplification" => TruthTag::Exemplification,
            "comparison" => TruthTag::Comparison,
            "intersection" => TruthTag::Intersection,
            "union" => TruthTag::Union,
            "difference" => TruthTag::Difference,
            "combine" => TruthTag::Combine,
            "decompose-ppp" => TruthTag::DecomposePpp,
            "decompose-pnn" => TruthTag::DecomposePnn,
            "decompose-pnp" => TruthTag::DecomposePnp,
            "decompose-npp" => TruthTag::DecomposeNpp,
            "decompose-nnn" => TruthTag::DecomposeNnn,
            "conversion" => TruthTag::Conversion,
            "contraposition" => TruthTag::Contraposition,
            "negation" => TruthTag::Negation,
            "structural-deduction" => TruthTag::StructuralDeduction,
            "revision" => TruthTag::Revision,
            _ => return None,
        })
    }
}

impl fmt::Display for TruthTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Arity mismatch between a tag and the supplied premises
///
/// A validated rule table never produces this at runtime; it exists for the
/// public `compute` entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthArityError {
    pub tag: TruthTag,
    pub supplied: usize,
}

impl fmt::Display for TruthArityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "truth function {} takes {} premise(s), {} supplied",
            self.tag,
            self.tag.premise_count(),
            self.supplied
        )
    }
}

impl std::error::Error for TruthArityError {}

/// Compute the derived truth value for a tag
pub fn compute(
    tag: TruthTag,
    t1: TruthValue,
    t2: Option<TruthValue>,
) -> Result<TruthValue, TruthArityError> {
    let supplied = 1 + usize::from(t2.is_some());
    if supplied != tag.premise_count() {
        return Err(TruthArityError { tag, supplied });
    }
    Ok(match (tag, t2) {
        (TruthTag::Conversion, None) => functions::conversion(t1),
        (TruthTag::Contraposition, None) => functions::contraposition(t1),
        (TruthTag::Negation, None) => functions::negation(t1),
        (TruthTag::StructuralDeduction, None) => functions::structural_deduction(t1),
        (TruthTag::Deduction, Some(t2)) => functions::deduction(t1, t2),
        (TruthTag::Analogy, Some(t2)) => functions::analogy(t1, t2),
        (TruthTag::Resemblance, Some(t2)) => functions::resemblance(t1, t2),
        (TruthTag::Abduction, Some(t2)) => functions::abduction(t1, t2),
        (TruthTag::Induction, Some(t2)) => functions::induction(t1, t2),
        (TruthTag::Exemplification, Some(t2)) => functions::exemplification(t1, t2),
        (TruthTag::Comparison, Some(t2)) => functions::comparison(t1, t2),
        (TruthTag::Intersection, Some(t2)) => functions::intersection(t1, t2),
        (TruthTag::Union, Some(t2)) => functions::union(t1, t2),
        (TruthTag::Difference, Some(t2)) => functions::difference(t1, t2),
        (TruthTag::Combine, Some(t2)) => functions::combine(t1, t2),
        (TruthTag::DecomposePpp, Some(t2)) => functions::decompose_ppp(t1, t2),
        (TruthTag::DecomposePnn, Some(t2)) => functions::decompose_pnn(t1, t2),
        (TruthTag::DecomposePnp, Some(t2)) => functions::decompose_pnp(t1, t2),
        (TruthTag::DecomposeNpp, Some(t2)) => functions::decompose_npp(t1, t2),
        (TruthTag::DecomposeNnn, Some(t2)) => functions::decompose_nnn(t1, t2),
        (TruthTag::Revision, Some(t2)) => functions::revision(t1, t2),
        // Arity already checked above
        _ => unreachable!("arity checked"),
    })
}
