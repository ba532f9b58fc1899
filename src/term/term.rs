//! NAL terms: atoms, variables, compounds, statements
//!
//! Terms are immutable values. Commutative compounds and symmetric
//! statements are kept in canonical operand order so that structural
//! equality and the matcher are order-insensitive for them. The derived
//! `Ord` is the deterministic total term order used for canonicalization
//! and for the `:!=` precondition check.

use super::interner::{AtomId, Interner, VarId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a NAL term variable
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum VarKind {
    /// `$x` — universally scoped across a statement
    Independent,
    /// `#x` — existentially scoped to the statement it appears in
    Dependent,
    /// `?x` — introduced only by substitution directives, never stored
    Query,
}

impl VarKind {
    /// The prefix sigil used in the textual form
    pub fn sigil(self) -> char {
        match self {
            VarKind::Independent => '$',
            VarKind::Dependent => '#',
            VarKind::Query => '?',
        }
    }
}

/// A term variable: kind plus interned (or fresh) identifier
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Variable {
    pub kind: VarKind,
    pub id: VarId,
}

impl Variable {
    pub fn new(kind: VarKind, id: VarId) -> Self {
        Variable { kind, id }
    }
}

/// Statement copula
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Copula {
    /// `-->`
    Inheritance,
    /// `==>`
    Implication,
    /// `<->`
    Similarity,
    /// `<=>`
    Equivalence,
}

impl Copula {
    /// Symmetric copulas store (subject, predicate) in canonical order
    pub fn is_symmetric(self) -> bool {
        matches!(self, Copula::Similarity | Copula::Equivalence)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Copula::Inheritance => "-->",
            Copula::Implication => "==>",
            Copula::Similarity => "<->",
            Copula::Equivalence => "<=>",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "-->" => Some(Copula::Inheritance),
            "==>" => Some(Copula::Implication),
            "<->" => Some(Copula::Similarity),
            "<=>" => Some(Copula::Equivalence),
            _ => None,
        }
    }
}

/// Compound term connector
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Connector {
    /// `{}` extensional set
    ExtSet,
    /// `[]` intensional set
    IntSet,
    /// `*` product
    Product,
    /// `/` extensional image
    ExtImage,
    /// `\` intensional image
    IntImage,
    /// `&` extensional intersection
    ExtIntersection,
    /// `|` intensional intersection
    IntIntersection,
    /// `+` union
    Union,
    /// `-` extensional difference
    ExtDifference,
    /// `~` intensional difference
    IntDifference,
    /// `&&` conjunction
    Conjunction,
    /// `||` disjunction
    Disjunction,
    /// `--` negation
    Negation,
}

impl Connector {
    /// Commutative connectors store operands in canonical order
    pub fn is_commutative(self) -> bool {
        matches!(
            self,
            Connector::ExtSet
                | Connector::IntSet
                | Connector::ExtIntersection
                | Connector::IntIntersection
                | Connector::Union
                | Connector::Conjunction
                | Connector::Disjunction
        )
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Connector::ExtSet => "{}",
            Connector::IntSet => "[]",
            Connector::Product => "*",
            Connector::ExtImage => "/",
            Connector::IntImage => "\\",
            Connector::ExtIntersection => "&",
            Connector::IntIntersection => "|",
            Connector::Union => "+",
            Connector::ExtDifference => "-",
            Connector::IntDifference => "~",
            Connector::Conjunction => "&&",
            Connector::Disjunction => "||",
            Connector::Negation => "--",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "{}" => Some(Connector::ExtSet),
            "[]" => Some(Connector::IntSet),
            "*" => Some(Connector::Product),
            "/" => Some(Connector::ExtImage),
            "\\" => Some(Connector::IntImage),
            "&" => Some(Connector::ExtIntersection),
            "|" => Some(Connector::IntIntersection),
            "+" => Some(Connector::Union),
            "-" => Some(Connector::ExtDifference),
            "~" => Some(Connector::IntDifference),
            "&&" => Some(Connector::Conjunction),
            "||" => Some(Connector::Disjunction),
            "--" => Some(Connector::Negation),
            _ => None,
        }
    }
}

/// A NAL term
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Term {
    Atom(AtomId),
    Variable(Variable),
    Compound(Connector, Vec<Term>),
    Statement(Copula, Box<Term>, Box<Term>),
}

impl Term {
    pub fn atom(id: AtomId) -> Term {
        Term::Atom(id)
    }

    pub fn variable(kind: VarKind, id: VarId) -> Term {
        Term::Variable(Variable::new(kind, id))
    }

    /// Build a compound, sorting operands of commutative connectors
    pub fn compound(connector: Connector, mut components: Vec<Term>) -> Term {
        if connector.is_commutative() {
            components.sort();
        }
        Term::Compound(connector, components)
    }

    /// Build a statement, ordering operands of symmetric copulas
    pub fn statement(copula: Copula, subject: Term, predicate: Term) -> Term {
        if copula.is_symmetric() && predicate < subject {
            Term::Statement(copula, Box::new(predicate), Box::new(subject))
        } else {
            Term::Statement(copula, Box::new(subject), Box::new(predicate))
        }
    }

    pub fn negation(inner: Term) -> Term {
        Term::Compound(Connector::Negation, vec![inner])
    }

    /// Recursively re-establish canonical operand order
    ///
    /// Idempotent. Needed after substitution, which may change the relative
    /// order of operands already sorted in a template. Negation is never
    /// collapsed here; `--(--X)` stays structurally distinct from `X`.
    pub fn canonicalize(&self) -> Term {
        match self {
            Term::Atom(_) | Term::Variable(_) => self.clone(),
            Term::Compound(connector, components) => {
                let components = components.iter().map(Term::canonicalize).collect();
                Term::compound(*connector, components)
            }
            Term::Statement(copula, subject, predicate) => {
                Term::statement(*copula, subject.canonicalize(), predicate.canonicalize())
            }
        }
    }

    /// Collect the IDs of all variables in this term, in first-occurrence order
    pub fn collect_variables(&self, out: &mut Vec<VarId>) {
        match self {
            Term::Atom(_) => {}
            Term::Variable(v) => {
                if !out.contains(&v.id) {
                    out.push(v.id);
                }
            }
            Term::Compound(_, components) => {
                for c in components {
                    c.collect_variables(out);
                }
            }
            Term::Statement(_, subject, predicate) => {
                subject.collect_variables(out);
                predicate.collect_variables(out);
            }
        }
    }

    /// IDs of all variables in this term
    pub fn variables(&self) -> Vec<VarId> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    /// Wrap with an interner for name-resolved display
    pub fn display<'a>(&'a self, interner: &'a Interner) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            interner,
        }
    }
}

/// Display wrapper that resolves interned names
pub struct TermDisplay<'a> {
    term: &'a Term,
    interner: &'a Interner,
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.term {
            Term::Atom(id) => write!(f, "{}", self.interner.resolve_atom(*id)),
            Term::Variable(v) => match self.interner.resolve_variable(v.id) {
                Some(name) => write!(f, "{}{}", v.kind.sigil(), name),
                None => write!(f, "{}_{}", v.kind.sigil(), v.id.fresh_index()),
            },
            Term::Compound(connector, components) => {
                write!(f, "({}", connector.symbol())?;
                for c in components {
                    write!(f, " {}", c.display(self.interner))?;
                }
                write!(f, ")")
            }
            Term::Statement(copula, subject, predicate) => {
                write!(
                    f,
                    "({} {} {})",
                    subject.display(self.interner),
                    copula.symbol(),
                    predicate.display(self.interner)
                )
            }
        }
    }
}
