//! Rule dispatch over one or two premises
//!
//! `apply_*` produce term-level conclusions (which rule fired, with which
//! tags); `derive_*` additionally compute truth values. The engine holds
//! only the validated table and is freely shareable across threads.

use crate::matching::{instantiate, match_all, match_with, Bindings};
use crate::rules::{Rule, RuleTable, Strength, TableError};
use crate::term::{Interner, Term, VarId};
use crate::truth::{compute, TruthTag, TruthValue};

use super::Derivation;

/// A term-level rule application, before truth is computed
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub term: Term,
    pub tag: TruthTag,
    pub secondary: Option<TruthTag>,
    pub strength: Strength,
    pub rule: String,
    /// Whether premise patterns were matched against the premises in
    /// swapped order. Determines truth-argument order in `derive_mediate`.
    pub swapped: bool,
}

/// The inference engine: a validated rule table plus dispatch
#[derive(Debug, Clone)]
pub struct RuleEngine {
    table: RuleTable,
}

impl RuleEngine {
    pub fn new(table: RuleTable) -> Self {
        RuleEngine { table }
    }

    /// Engine over the built-in table
    pub fn with_builtin(interner: &mut Interner) -> Result<Self, TableError> {
        Ok(RuleEngine {
            table: RuleTable::builtin(interner)?,
        })
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// All single-premise rule applications to a term
    pub fn apply_immediate(&self, premise: &Term) -> Vec<Application> {
        let premise = premise.canonicalize();
        let mut fresh = FreshCounter::new();
        let mut out = Vec::new();
        for rule in self.table.immediate_rules() {
            for bindings in match_all(&rule.premises[0], &premise) {
                self.conclude(rule, bindings, false, &mut fresh, &mut out);
            }
        }
        out
    }

    /// All two-premise rule applications, trying both premise assignments
    pub fn apply_mediate(&self, first: &Term, second: &Term) -> Vec<Application> {
        let first = first.canonicalize();
        let second = second.canonicalize();
        let mut fresh = FreshCounter::new();
        let mut out = Vec::new();
        for rule in self.table.mediate_rules() {
            for (a, b, swapped) in [(&first, &second, false), (&second, &first, true)] {
                for b1 in match_all(&rule.premises[0], a) {
                    for bindings in match_with(&rule.premises[1], b, b1) {
                        self.conclude(rule, bindings, swapped, &mut fresh, &mut out);
                    }
                }
            }
        }
        out
    }

    /// Immediate inference with truth computation
    pub fn derive_immediate(&self, premise: &Term, truth: TruthValue) -> Vec<Derivation> {
        let mut out = Vec::new();
        for app in self.apply_immediate(premise) {
            if let Some(d) = derive(app, truth, None) {
                push_derivation(&mut out, d);
            }
        }
        out
    }

    /// Mediate inference with truth computation
    ///
    /// Truth arguments follow pattern order: the value belonging to the
    /// premise that matched the rule's first pattern is passed first.
    pub fn derive_mediate(
        &self,
        first: (&Term, TruthValue),
        second: (&Term, TruthValue),
    ) -> Vec<Derivation> {
        let mut out = Vec::new();
        for app in self.apply_mediate(first.0, second.0) {
            let (t1, t2) = if app.swapped {
                (second.1, first.1)
            } else {
                (first.1, second.1)
            };
            if let Some(d) = derive(app, t1, Some(t2)) {
                push_derivation(&mut out, d);
            }
        }
        out
    }

    fn conclude(
        &self,
        rule: &Rule,
        bindings: Bindings,
        swapped: bool,
        fresh: &mut FreshCounter,
        out: &mut Vec<Application>,
    ) {
        if !preconditions_hold(rule, &bindings) {
            return;
        }
        let bindings = match &rule.intro {
            Some(directive) => {
                let mut rebound = bindings;
                rebound.rebind(
                    directive.placeholder,
                    Term::variable(directive.kind, fresh.next()),
                );
                rebound
            }
            None => bindings,
        };
        for conclusion in &rule.conclusions {
            let app = Application {
                term: instantiate(&conclusion.template, &bindings),
                tag: conclusion.tag,
                secondary: conclusion.secondary,
                strength: conclusion.strength,
                rule: rule.name.clone(),
                swapped,
            };
            if !out
                .iter()
                .any(|a| a.term == app.term && a.tag == app.tag && a.secondary == app.secondary)
            {
                out.push(app);
            }
        }
    }
}

/// Mints fresh variable IDs, one per directive application in a dispatch
struct FreshCounter {
    next: u32,
}

impl FreshCounter {
    fn new() -> Self {
        FreshCounter { next: 0 }
    }

    fn next(&mut self) -> VarId {
        let id = VarId::fresh(self.next);
        self.next += 1;
        id
    }
}

fn preconditions_hold(rule: &Rule, bindings: &Bindings) -> bool {
    rule.preconditions
        .iter()
        .all(|ineq| bindings.get(ineq.left) != bindings.get(ineq.right))
}

fn derive(app: Application, t1: TruthValue, t2: Option<TruthValue>) -> Option<Derivation> {
    let truth = compute(app.tag, t1, t2).ok()?;
    let secondary = match app.secondary {
        Some(tag) => Some(compute(tag, t1, t2).ok()?),
        None => None,
    };
    Some(Derivation {
        term: app.term,
        truth,
        secondary,
        strength: app.strength,
        rule: app.rule,
        swapped: app.swapped,
    })
}

fn push_derivation(out: &mut Vec<Derivation>, d: Derivation) {
    if !out
        .iter()
        .any(|e| e.term == d.term && e.truth == d.truth && e.secondary == d.secondary)
    {
        out.push(d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Connector, Copula, VarKind};

    fn engine(interner: &mut Interner) -> RuleEngine {
        RuleEngine::with_builtin(interner).unwrap()
    }

    fn inh(s: Term, p: Term) -> Term {
        Term::statement(Copula::Inheritance, s, p)
    }

    #[test]
    fn test_deduction_fires_on_chained_inheritance() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let robin = Term::atom(interner.intern_atom("robin"));
        let bird = Term::atom(interner.intern_atom("bird"));
        let animal = Term::atom(interner.intern_atom("animal"));

        let apps = engine.apply_mediate(
            &inh(bird.clone(), animal.clone()),
            &inh(robin.clone(), bird.clone()),
        );
        let expected = inh(robin, animal);
        let ded: Vec<&Application> = apps
            .iter()
            .filter(|a| a.tag == TruthTag::Deduction)
            .collect();
        assert_eq!(ded.len(), 1);
        assert_eq!(ded[0].term, expected);
        assert!(!ded[0].swapped);
        assert_eq!(ded[0].rule, "syllogism.1");
    }

    #[test]
    fn test_exemplification_uses_swapped_assignment() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let robin = Term::atom(interner.intern_atom("robin"));
        let bird = Term::atom(interner.intern_atom("bird"));
        let animal = Term::atom(interner.intern_atom("animal"));

        let apps = engine.apply_mediate(
            &inh(bird.clone(), animal.clone()),
            &inh(robin.clone(), bird),
        );
        let exe: Vec<&Application> = apps
            .iter()
            .filter(|a| a.tag == TruthTag::Exemplification)
            .collect();
        assert_eq!(exe.len(), 1);
        assert_eq!(exe[0].term, inh(animal, robin));
        assert!(exe[0].swapped);
    }

    #[test]
    fn test_precondition_suppresses_degenerate_conclusion() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let bird = Term::atom(interner.intern_atom("bird"));
        let animal = Term::atom(interner.intern_atom("animal"));

        // (bird --> animal) with (animal --> bird): deduction would conclude
        // (animal --> animal) and (bird --> bird); the :!= precondition
        // blocks both.
        let apps = engine.apply_mediate(
            &inh(bird.clone(), animal.clone()),
            &inh(animal.clone(), bird.clone()),
        );
        assert!(apps
            .iter()
            .filter(|a| a.tag == TruthTag::Deduction)
            .all(|a| a.term != inh(bird.clone(), bird.clone())
                && a.term != inh(animal.clone(), animal.clone())));
    }

    #[test]
    fn test_immediate_conversion() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let robin = Term::atom(interner.intern_atom("robin"));
        let bird = Term::atom(interner.intern_atom("bird"));
        let premise = inh(robin.clone(), bird.clone());

        let apps = engine.apply_immediate(&premise);
        assert!(apps
            .iter()
            .any(|a| a.tag == TruthTag::Conversion && a.term == inh(bird.clone(), robin.clone())));
        // negation is introduced only by reduction, never gratuitously
        assert!(apps.iter().all(|a| a.tag != TruthTag::Negation));
    }

    #[test]
    fn test_double_negation_reduces() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let robin = Term::atom(interner.intern_atom("robin"));
        let bird = Term::atom(interner.intern_atom("bird"));
        let premise = inh(robin, bird);

        let apps = engine.apply_immediate(&Term::negation(Term::negation(premise.clone())));
        let red = apps
            .iter()
            .find(|a| a.tag == TruthTag::Negation)
            .unwrap();
        assert_eq!(red.term, premise);
        // the source table declares the tag redundantly; both are preserved
        assert_eq!(red.secondary, Some(TruthTag::Negation));

        // a single negation is left alone
        let apps = engine.apply_immediate(&Term::negation(premise));
        assert!(apps.iter().all(|a| a.tag != TruthTag::Negation));
    }

    #[test]
    fn test_structural_extraction_fires_per_component() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let m = Term::atom(interner.intern_atom("m"));
        let a = Term::atom(interner.intern_atom("a"));
        let b = Term::atom(interner.intern_atom("b"));

        let both = Term::compound(Connector::ExtIntersection, vec![a.clone(), b.clone()]);
        let apps = engine.apply_immediate(&inh(m.clone(), both));
        let extracted: Vec<&Term> = apps
            .iter()
            .filter(|x| x.tag == TruthTag::StructuralDeduction)
            .map(|x| &x.term)
            .collect();
        assert!(extracted.contains(&&inh(m.clone(), a.clone())));
        assert!(extracted.contains(&&inh(m.clone(), b.clone())));

        // the predicate-side intensional intersection reduces the same way
        let joint = Term::compound(Connector::IntIntersection, vec![a.clone(), b.clone()]);
        let apps = engine.apply_immediate(&inh(m.clone(), joint));
        let extracted: Vec<&Term> = apps
            .iter()
            .filter(|x| x.tag == TruthTag::StructuralDeduction)
            .map(|x| &x.term)
            .collect();
        assert!(extracted.contains(&&inh(m.clone(), a)));
        assert!(extracted.contains(&&inh(m, b)));
    }

    #[test]
    fn test_converse_pair_yields_similarity() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let a = Term::atom(interner.intern_atom("a"));
        let b = Term::atom(interner.intern_atom("b"));

        let apps = engine.apply_mediate(&inh(a.clone(), b.clone()), &inh(b.clone(), a.clone()));
        let sim = Term::statement(Copula::Similarity, a.clone(), b.clone());
        assert!(apps
            .iter()
            .any(|x| x.tag == TruthTag::Intersection && x.term == sim));

        let fwd = Term::statement(Copula::Implication, a.clone(), b.clone());
        let back = Term::statement(Copula::Implication, b.clone(), a.clone());
        let apps = engine.apply_mediate(&fwd, &back);
        let equ = Term::statement(Copula::Equivalence, a, b);
        assert!(apps
            .iter()
            .any(|x| x.tag == TruthTag::Intersection && x.term == equ));
    }

    #[test]
    fn test_higher_order_comparison() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let m = Term::atom(interner.intern_atom("m"));
        let p = Term::atom(interner.intern_atom("p"));
        let s = Term::atom(interner.intern_atom("s"));

        let apps = engine.apply_mediate(
            &Term::statement(Copula::Implication, m.clone(), p.clone()),
            &Term::statement(Copula::Implication, m, s.clone()),
        );
        let equ = Term::statement(Copula::Equivalence, s, p);
        assert!(apps
            .iter()
            .any(|x| x.tag == TruthTag::Comparison && x.term == equ));
    }

    #[test]
    fn test_derive_mediate_deduction_truth() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let robin = Term::atom(interner.intern_atom("robin"));
        let bird = Term::atom(interner.intern_atom("bird"));
        let animal = Term::atom(interner.intern_atom("animal"));
        let t = TruthValue::new(1.0, 0.9);

        let derivations = engine.derive_mediate(
            (&inh(bird.clone(), animal.clone()), t),
            (&inh(robin.clone(), bird), t),
        );
        let ded = derivations
            .iter()
            .find(|d| d.rule == "syllogism.1")
            .unwrap();
        assert_eq!(ded.term, inh(robin, animal));
        assert!((ded.truth.frequency - 1.0).abs() < 1e-6);
        assert!((ded.truth.confidence - 0.81).abs() < 1e-6);
    }

    #[test]
    fn test_derive_mediate_revision() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let robin = Term::atom(interner.intern_atom("robin"));
        let bird = Term::atom(interner.intern_atom("bird"));
        let premise = inh(robin, bird);

        let t1 = TruthValue::new(1.0, 0.9);
        let t2 = TruthValue::new(0.0, 0.9);
        let derivations = engine.derive_mediate((&premise, t1), (&premise, t2));
        let rev = derivations
            .iter()
            .find(|d| d.rule == "revision.1")
            .unwrap();
        assert_eq!(rev.term, premise);
        assert!((rev.truth.frequency - 0.5).abs() < 1e-6);
        assert!(rev.truth.confidence > t1.confidence);
    }

    #[test]
    fn test_variable_intro_mints_fresh_variables() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let swan = Term::atom(interner.intern_atom("swan"));
        let bird = Term::atom(interner.intern_atom("bird"));
        let swimmer = Term::atom(interner.intern_atom("swimmer"));

        let apps = engine.apply_mediate(
            &inh(swan.clone(), bird.clone()),
            &inh(swan.clone(), swimmer.clone()),
        );
        let intro: Vec<&Application> = apps
            .iter()
            .filter(|a| a.rule.starts_with("variable-intro"))
            .collect();
        assert!(!intro.is_empty());
        for app in intro {
            // the common term swan was replaced by a fresh variable
            let fresh: Vec<_> = app
                .term
                .variables()
                .into_iter()
                .filter(|v| v.is_fresh())
                .collect();
            assert_eq!(fresh.len(), 1);
            // normalized to index 0 regardless of how many were minted
            assert_eq!(fresh[0], VarId::fresh(0));
        }
    }

    #[test]
    fn test_conditional_detachment() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let rain = Term::atom(interner.intern_atom("rain"));
        let wet = Term::atom(interner.intern_atom("wet"));
        let implication = Term::statement(Copula::Implication, rain.clone(), wet.clone());

        let apps = engine.apply_mediate(&implication, &rain);
        assert!(apps
            .iter()
            .any(|a| a.tag == TruthTag::Deduction && a.term == wet));

        let apps = engine.apply_mediate(&implication, &wet);
        assert!(apps
            .iter()
            .any(|a| a.tag == TruthTag::Abduction && a.term == rain));
    }

    #[test]
    fn test_symmetric_premise_duplicates_are_removed() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let a = Term::atom(interner.intern_atom("a"));
        let b = Term::atom(interner.intern_atom("b"));
        let c = Term::atom(interner.intern_atom("c"));

        // analogy with a similarity premise matches the symmetric statement
        // both ways; the conclusion set must not contain duplicates
        let sim = Term::statement(Copula::Similarity, a.clone(), b.clone());
        let st = inh(b, c);
        let apps = engine.apply_mediate(&st, &sim);
        let mut seen = Vec::new();
        for app in &apps {
            let key = (app.term.clone(), app.tag);
            assert!(!seen.contains(&key), "duplicate conclusion {key:?}");
            seen.push(key);
        }
    }

    #[test]
    fn test_fresh_variable_kind_matches_directive() {
        let mut interner = Interner::new();
        let engine = engine(&mut interner);
        let swan = Term::atom(interner.intern_atom("swan"));
        let bird = Term::atom(interner.intern_atom("bird"));
        let swimmer = Term::atom(interner.intern_atom("swimmer"));

        let apps = engine.apply_mediate(&inh(swan.clone(), bird), &inh(swan, swimmer));
        let app = apps
            .iter()
            .find(|a| a.rule.starts_with("variable-intro"))
            .unwrap();
        fn kinds(term: &Term, out: &mut Vec<VarKind>) {
            match term {
                Term::Variable(v) if v.id.is_fresh() => out.push(v.kind),
                Term::Compound(_, cs) => cs.iter().for_each(|c| kinds(c, out)),
                Term::Statement(_, s, p) => {
                    kinds(s, out);
                    kinds(p, out);
                }
                _ => {}
            }
        }
        let mut found = Vec::new();
        kinds(&app.term, &mut found);
        assert!(found.iter().all(|k| *k == VarKind::Query));
    }
}
