//! Conclusion instantiation from binding maps

use super::Bindings;
use crate::term::{Term, VarId};
use indexmap::IndexMap;

/// Replace every bound placeholder in `template` by its binding
///
/// Bound values are inserted verbatim and never re-walked, so a variable
/// inside a bound subterm can never be captured by another placeholder.
/// Unbound variables are left in place; the rule-table validator guarantees
/// that none remain in a well-formed conclusion.
pub fn substitute(template: &Term, bindings: &Bindings) -> Term {
    match template {
        Term::Atom(_) => template.clone(),
        Term::Variable(v) => bindings
            .get(v.id)
            .cloned()
            .unwrap_or_else(|| template.clone()),
        Term::Compound(connector, components) => Term::Compound(
            *connector,
            components.iter().map(|c| substitute(c, bindings)).collect(),
        ),
        Term::Statement(copula, subject, predicate) => Term::Statement(
            *copula,
            Box::new(substitute(subject, bindings)),
            Box::new(substitute(predicate, bindings)),
        ),
    }
}

/// Instantiate a conclusion template: substitute, then re-canonicalize,
/// then renumber directive-introduced fresh variables
pub fn instantiate(template: &Term, bindings: &Bindings) -> Term {
    renumber_fresh(&substitute(template, bindings).canonicalize())
}

/// Renumber fresh variable IDs to a sequence starting at 0, in
/// first-occurrence order. Makes conclusions independent of how many fresh
/// variables earlier matches in the same dispatch minted.
pub fn renumber_fresh(term: &Term) -> Term {
    let mut mapping: IndexMap<VarId, VarId> = IndexMap::new();
    renumber(term, &mut mapping)
}

fn renumber(term: &Term, mapping: &mut IndexMap<VarId, VarId>) -> Term {
    match term {
        Term::Atom(_) => term.clone(),
        Term::Variable(v) => {
            if v.id.is_fresh() {
                let next = mapping.len() as u32;
                let new_id = *mapping.entry(v.id).or_insert_with(|| VarId::fresh(next));
                Term::variable(v.kind, new_id)
            } else {
                term.clone()
            }
        }
        Term::Compound(connector, components) => Term::Compound(
            *connector,
            components.iter().map(|c| renumber(c, mapping)).collect(),
        ),
        Term::Statement(copula, subject, predicate) => Term::Statement(
            *copula,
            Box::new(renumber(subject, mapping)),
            Box::new(renumber(predicate, mapping)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Copula, Interner, Term, VarKind};

    #[test]
    fn test_substitute_fills_bound_placeholders() {
        let mut interner = Interner::new();
        let s = interner.intern_variable("S");
        let p = interner.intern_variable("P");
        let robin = Term::atom(interner.intern_atom("robin"));
        let bird = Term::atom(interner.intern_atom("bird"));

        let template = Term::statement(
            Copula::Inheritance,
            Term::variable(VarKind::Independent, s),
            Term::variable(VarKind::Independent, p),
        );
        let mut b = Bindings::new();
        b.insert(s, robin.clone());
        b.insert(p, bird.clone());

        let result = substitute(&template, &b);
        assert_eq!(result, Term::statement(Copula::Inheritance, robin, bird));
    }

    #[test]
    fn test_instantiate_recanonicalizes() {
        let mut interner = Interner::new();
        let s = interner.intern_variable("S");
        let p = interner.intern_variable("P");
        // Template sorted by placeholder ID, bindings reverse the order
        let template = Term::statement(
            Copula::Similarity,
            Term::variable(VarKind::Independent, s),
            Term::variable(VarKind::Independent, p),
        );
        let z = Term::atom(interner.intern_atom("zebra"));
        let a = Term::atom(interner.intern_atom("ant"));
        let mut b = Bindings::new();
        b.insert(s, z.clone());
        b.insert(p, a.clone());

        let result = instantiate(&template, &b);
        assert_eq!(result, Term::statement(Copula::Similarity, z, a).canonicalize());
        assert_eq!(result, result.canonicalize());
    }

    #[test]
    fn test_no_capture_of_concrete_variables() {
        let mut interner = Interner::new();
        let s = interner.intern_variable("S");
        let p = interner.intern_variable("P");
        // The concrete value bound to S is itself the variable $P
        let concrete_var = Term::variable(VarKind::Independent, p);
        let bird = Term::atom(interner.intern_atom("bird"));

        let template = Term::statement(
            Copula::Inheritance,
            Term::variable(VarKind::Independent, s),
            Term::variable(VarKind::Independent, p),
        );
        let mut b = Bindings::new();
        b.insert(s, concrete_var.clone());
        b.insert(p, bird.clone());

        let result = substitute(&template, &b);
        // The inserted $P must not itself be substituted by P's binding
        assert_eq!(
            result,
            Term::statement(Copula::Inheritance, concrete_var, bird)
        );
    }

    #[test]
    fn test_renumber_fresh_normalizes() {
        let t = Term::statement(
            Copula::Inheritance,
            Term::variable(VarKind::Independent, VarId::fresh(7)),
            Term::variable(VarKind::Independent, VarId::fresh(7)),
        );
        let normalized = renumber_fresh(&t);
        let expected = Term::statement(
            Copula::Inheritance,
            Term::variable(VarKind::Independent, VarId::fresh(0)),
            Term::variable(VarKind::Independent, VarId::fresh(0)),
        );
        assert_eq!(normalized, expected);
    }
}
