//! NAL truth functions
//!
//! All formulas are expressed over frequency/confidence pairs with the
//! global evidence constant `K = 1`. Weak (k-damped) functions convert an
//! evidential weight `w` back to confidence via `c = w / (w + K)`, so their
//! confidence stays strictly below the strong-evidence case for positive
//! weight.

use super::TruthValue;

/// Global evidence constant
pub const K: f32 = 1.0;

/// Reliability discount applied by structural (set-membership) inference
pub const STRUCTURAL_RELIANCE: f32 = 0.9;

fn and(values: &[f32]) -> f32 {
    values.iter().product()
}

fn or(values: &[f32]) -> f32 {
    1.0 - values.iter().map(|&v| 1.0 - v).product::<f32>()
}

fn not(x: f32) -> f32 {
    1.0 - x
}

fn safe_div(x: f32, y: f32) -> f32 {
    if y == 0.0 {
        0.0
    } else {
        x / y
    }
}

/// Confidence carried by an evidential weight
fn weight_to_confidence(w: f32) -> f32 {
    safe_div(w, w + K)
}

/// Evidential weight carried by a confidence
fn confidence_to_weight(c: f32) -> f32 {
    K * safe_div(c, not(c))
}

// === Strong two-premise functions ===

pub fn deduction(v1: TruthValue, v2: TruthValue) -> TruthValue {
    let f = and(&[v1.frequency, v2.frequency]);
    TruthValue::new(f, and(&[f, v1.confidence, v2.confidence]))
}

pub fn analogy(v1: TruthValue, v2: TruthValue) -> TruthValue {
    TruthValue::new(
        and(&[v1.frequency, v2.frequency]),
        and(&[v2.frequency, v1.confidence, v2.confidence]),
    )
}

pub fn resemblance(v1: TruthValue, v2: TruthValue) -> TruthValue {
    TruthValue::new(
        and(&[v1.frequency, v2.frequency]),
        and(&[or(&[v1.frequency, v2.frequency]), v1.confidence, v2.confidence]),
    )
}

// === Weak two-premise functions ===

pub fn abduction(v1: TruthValue, v2: TruthValue) -> TruthValue {
    let w = and(&[v1.frequency, v1.confidence, v2.confidence]);
    TruthValue::new(v2.frequency, weight_to_confidence(w))
}

pub fn induction(v1: TruthValue, v2: TruthValue) -> TruthValue {
    let w = and(&[v2.frequency, v1.confidence, v2.confidence]);
    TruthValue::new(v1.frequency, weight_to_confidence(w))
}

pub fn exemplification(v1: TruthValue, v2: TruthValue) -> TruthValue {
    let w = and(&[v1.frequency, v1.confidence, v2.frequency, v2.confidence]);
    TruthValue::new(1.0, weight_to_confidence(w))
}

pub fn comparison(v1: TruthValue, v2: TruthValue) -> TruthValue {
    let w = and(&[or(&[v1.frequency, v2.frequency]), v1.confidence, v2.confidence]);
    let f = safe_div(
        and(&[v1.frequency, v2.frequency, v1.confidence, v2.confidence]),
        w,
    );
    TruthValue::new(f, weight_to_confidence(w))
}

// === Compositional functions ===

pub fn intersection(v1: TruthValue, v2: TruthValue) -> TruthValue {
    TruthValue::new(
        and(&[v1.frequency, v2.frequency]),
        and(&[v1.confidence, v2.confidence]),
    )
}

pub fn union(v1: TruthValue, v2: TruthValue) -> TruthValue {
    TruthValue::new(
        or(&[v1.frequency, v2.frequency]),
        and(&[v1.confidence, v2.confidence]),
    )
}

pub fn difference(v1: TruthValue, v2: TruthValue) -> TruthValue {
    TruthValue::new(
        and(&[v1.frequency, not(v2.frequency)]),
        and(&[v1.confidence, v2.confidence]),
    )
}

/// Generic temporal combination; interval semantics are an extension point
pub fn combine(v1: TruthValue, v2: TruthValue) -> TruthValue {
    intersection(v1, v2)
}

// === Decomposition functions ===

pub fn decompose_ppp(v1: TruthValue, v2: TruthValue) -> TruthValue {
    let f = and(&[v1.frequency, v2.frequency]);
    TruthValue::new(f, and(&[f, v1.confidence, v2.confidence]))
}

pub fn decompose_pnn(v1: TruthValue, v2: TruthValue) -> TruthValue {
    let fn_ = and(&[v1.frequency, not(v2.frequency)]);
    TruthValue::new(not(fn_), and(&[not(fn_), v1.confidence, v2.confidence]))
}

pub fn decompose_pnp(v1: TruthValue, v2: TruthValue) -> TruthValue {
    let f = and(&[v1.frequency, not(v2.frequency)]);
    TruthValue::new(f, and(&[f, v1.confidence, v2.confidence]))
}

pub fn decompose_npp(v1: TruthValue, v2: TruthValue) -> TruthValue {
    let f = and(&[not(v1.frequency), v2.frequency]);
    TruthValue::new(f, and(&[f, v1.confidence, v2.confidence]))
}

pub fn decompose_nnn(v1: TruthValue, v2: TruthValue) -> TruthValue {
    let fn_ = and(&[not(v1.frequency), not(v2.frequency)]);
    TruthValue::new(not(fn_), and(&[fn_, v1.confidence, v2.confidence]))
}

// === Immediate functions ===

/// Converse of an asymmetric statement: only the premise's positive
/// evidence survives, dampened by K. Both coordinates collapse to the
/// evidence ratio, so the converse is strictly weaker on both axes
/// whenever the premise is less than certain.
pub fn conversion(v: TruthValue) -> TruthValue {
    let w = and(&[v.frequency, v.confidence]);
    let r = weight_to_confidence(w);
    TruthValue::new(r, r)
}

pub fn contraposition(v: TruthValue) -> TruthValue {
    let w = and(&[not(v.frequency), v.confidence]);
    TruthValue::new(0.0, weight_to_confidence(w))
}

/// Evidence-neutral flip; applying it twice restores the frequency exactly
pub fn negation(v: TruthValue) -> TruthValue {
    TruthValue::new(not(v.frequency), v.confidence)
}

pub fn structural_deduction(v: TruthValue) -> TruthValue {
    TruthValue::new(
        v.frequency,
        and(&[v.frequency, v.confidence, STRUCTURAL_RELIANCE]),
    )
}

// === Revision ===

/// Merge two truth values for the same statement from independent evidence.
/// Additive in the evidential-weight domain, hence commutative and
/// associative there.
pub fn revision(v1: TruthValue, v2: TruthValue) -> TruthValue {
    let w1 = confidence_to_weight(v1.confidence);
    let w2 = confidence_to_weight(v2.confidence);
    let w = w1 + w2;
    let f = safe_div(w1 * v1.frequency + w2 * v2.frequency, w);
    TruthValue::new(f, weight_to_confidence(w))
}
