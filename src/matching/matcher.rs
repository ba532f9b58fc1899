//! One-way structural matching of rule patterns against concrete terms
//!
//! A pattern variable matches any subterm; its first occurrence binds, and
//! every later occurrence must equal the bound value structurally. There is
//! no occurs check because binding is one-way: placeholders live only in
//! patterns, never in the concrete terms they bind.
//!
//! Commutative compounds and symmetric statements are matched
//! order-insensitively by backtracking over operand correspondences, and
//! every consistent correspondence is reported. A structural rule such as
//! component extraction from `(& S P)` therefore fires once per component
//! from a single table entry.

use super::Bindings;
use crate::term::Term;

/// First consistent binding of `pattern` against `term`, if any
pub fn match_term(pattern: &Term, term: &Term) -> Option<Bindings> {
    match_all(pattern, term).into_iter().next()
}

/// All consistent bindings of `pattern` against `term`, in deterministic
/// backtracking order, duplicates removed
pub fn match_all(pattern: &Term, term: &Term) -> Vec<Bindings> {
    match_with(pattern, term, Bindings::new())
}

/// All extensions of an existing binding map that also match `pattern`
/// against `term`. Used for the second premise of a mediate rule.
pub fn match_with(pattern: &Term, term: &Term, bindings: Bindings) -> Vec<Bindings> {
    let mut solutions = match_node(pattern, term, bindings);
    dedup(&mut solutions);
    solutions
}

fn dedup(solutions: &mut Vec<Bindings>) {
    let mut seen: Vec<Bindings> = Vec::with_capacity(solutions.len());
    solutions.retain(|s| {
        if seen.contains(s) {
            false
        } else {
            seen.push(s.clone());
            true
        }
    });
}

fn match_node(pattern: &Term, term: &Term, bindings: Bindings) -> Vec<Bindings> {
    match (pattern, term) {
        (Term::Variable(v), t) => {
            if let Some(bound) = bindings.get(v.id) {
                if bound == t {
                    vec![bindings]
                } else {
                    Vec::new()
                }
            } else {
                let mut extended = bindings;
                extended.insert(v.id, t.clone());
                vec![extended]
            }
        }
        (Term::Atom(a), Term::Atom(b)) if a == b => vec![bindings],
        (Term::Compound(c1, args1), Term::Compound(c2, args2))
            if c1 == c2 && args1.len() == args2.len() =>
        {
            if c1.is_commutative() {
                let mut out = Vec::new();
                let mut used = vec![false; args2.len()];
                match_any_order(args1, args2, &mut used, bindings, &mut out);
                out
            } else {
                match_in_order(args1, args2, bindings)
            }
        }
        (Term::Statement(c1, s1, p1), Term::Statement(c2, s2, p2)) if c1 == c2 => {
            let mut out = match_pair(s1, p1, s2, p2, bindings.clone());
            if c1.is_symmetric() {
                out.extend(match_pair(s1, p1, p2, s2, bindings));
            }
            out
        }
        _ => Vec::new(),
    }
}

fn match_pair(
    pa: &Term,
    pb: &Term,
    ta: &Term,
    tb: &Term,
    bindings: Bindings,
) -> Vec<Bindings> {
    match_node(pa, ta, bindings)
        .into_iter()
        .flat_map(|b| match_node(pb, tb, b))
        .collect()
}

fn match_in_order(pargs: &[Term], targs: &[Term], bindings: Bindings) -> Vec<Bindings> {
    let mut solutions = vec![bindings];
    for (p, t) in pargs.iter().zip(targs.iter()) {
        solutions = solutions
            .into_iter()
            .flat_map(|b| match_node(p, t, b))
            .collect();
        if solutions.is_empty() {
            break;
        }
    }
    solutions
}

fn match_any_order(
    pargs: &[Term],
    targs: &[Term],
    used: &mut Vec<bool>,
    bindings: Bindings,
    out: &mut Vec<Bindings>,
) {
    let Some(first) = pargs.first() else {
        out.push(bindings);
        return;
    };
    for i in 0..targs.len() {
        if used[i] {
            continue;
        }
        for extended in match_node(first, &targs[i], bindings.clone()) {
            used[i] = true;
            match_any_order(&pargs[1..], targs, used, extended, out);
            used[i] = false;
        }
    }
}
