//! The declarative inference rule table
//!
//! Rules are data: premise patterns, conclusion templates tagged with truth
//! functions, optional inequality preconditions, and an optional variable
//! substitution directive. The table is parsed from an embedded s-expression
//! text and validated once at load time; after `RuleTable::load` succeeds,
//! dispatch never encounters a malformed rule.

pub mod parser;
pub mod table;

use std::fmt;

use crate::term::{Interner, Term, VarId, VarKind};
use crate::truth::TruthTag;

pub use parser::{parse_rules, parse_term};
pub use table::DEFAULT_RULES;

/// Whether a rule consumes one premise or two
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Immediate,
    Mediate,
}

impl RuleKind {
    pub fn premise_count(self) -> usize {
        match self {
            RuleKind::Immediate => 1,
            RuleKind::Mediate => 2,
        }
    }
}

/// Derivation strength marker carried on each conclusion
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Strength {
    Strong,
    Weak,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Strong => write!(f, "strong"),
            Strength::Weak => write!(f, "weak"),
        }
    }
}

/// `(:!= :X :Y)` — the terms bound to two placeholders must differ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inequality {
    pub left: VarId,
    pub right: VarId,
}

/// `:subst (:M $)` — rebind a placeholder to a fresh variable of the given
/// kind before instantiating the conclusions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstDirective {
    pub placeholder: VarId,
    pub kind: VarKind,
}

/// One conclusion of a rule: a template plus its truth recipe
#[derive(Debug, Clone, PartialEq)]
pub struct Conclusion {
    pub template: Term,
    pub tag: TruthTag,
    /// Second truth function for rules that also derive a companion value
    pub secondary: Option<TruthTag>,
    pub strength: Strength,
}

/// A single inference rule record
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: String,
    pub kind: RuleKind,
    pub premises: Vec<Term>,
    pub preconditions: Vec<Inequality>,
    pub intro: Option<SubstDirective>,
    pub conclusions: Vec<Conclusion>,
}

impl Rule {
    /// Placeholder IDs bound by the premise patterns
    fn premise_variables(&self) -> Vec<VarId> {
        let mut vars = Vec::new();
        for premise in &self.premises {
            premise.collect_variables(&mut vars);
        }
        vars
    }
}

/// Load-time rule table problem
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    Parse(String),
    UnknownTag(String),
    UnknownMarker(String),
    UnknownDirectiveKind(String),
    PremiseArity { rule: String, count: usize },
    TagArity { rule: String, tag: TruthTag },
    TooManyTags { rule: String },
    NoConclusions { rule: String },
    UnboundConclusionVar { rule: String },
    UnboundPrecondition { rule: String },
    UnboundDirective { rule: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Parse(msg) => write!(f, "rule table parse error: {msg}"),
            TableError::UnknownTag(tag) => write!(f, "unknown truth tag {tag}"),
            TableError::UnknownMarker(m) => write!(f, "unknown strength marker {m}"),
            TableError::UnknownDirectiveKind(k) => {
                write!(f, "unknown substitution variable kind {k}")
            }
            TableError::PremiseArity { rule, count } => {
                write!(f, "rule {rule}: {count} premises for its kind")
            }
            TableError::TagArity { rule, tag } => {
                write!(
                    f,
                    "rule {rule}: tag {tag} takes {} premise(s)",
                    tag.premise_count()
                )
            }
            TableError::TooManyTags { rule } => {
                write!(f, "rule {rule}: a conclusion carries more than two tags")
            }
            TableError::NoConclusions { rule } => {
                write!(f, "rule {rule}: no conclusions")
            }
            TableError::UnboundConclusionVar { rule } => {
                write!(f, "rule {rule}: conclusion uses a placeholder no premise binds")
            }
            TableError::UnboundPrecondition { rule } => {
                write!(f, "rule {rule}: precondition names a placeholder no premise binds")
            }
            TableError::UnboundDirective { rule } => {
                write!(f, "rule {rule}: substitution directive names an unbound placeholder")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// A validated, immutable rule table
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Parse and validate a rule table source
    pub fn load(src: &str, interner: &mut Interner) -> Result<Self, TableError> {
        let rules = parse_rules(src, interner)?;
        for rule in &rules {
            validate(rule)?;
        }
        Ok(RuleTable { rules })
    }

    /// The built-in table
    pub fn builtin(interner: &mut Interner) -> Result<Self, TableError> {
        Self::load(DEFAULT_RULES, interner)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn immediate_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules
            .iter()
            .filter(|r| r.kind == RuleKind::Immediate)
    }

    pub fn mediate_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.kind == RuleKind::Mediate)
    }
}

fn validate(rule: &Rule) -> Result<(), TableError> {
    if rule.premises.len() != rule.kind.premise_count() {
        return Err(TableError::PremiseArity {
            rule: rule.name.clone(),
            count: rule.premises.len(),
        });
    }

    let bound = rule.premise_variables();

    for ineq in &rule.preconditions {
        if !bound.contains(&ineq.left) || !bound.contains(&ineq.right) {
            return Err(TableError::UnboundPrecondition {
                rule: rule.name.clone(),
            });
        }
    }

    if let Some(directive) = &rule.intro {
        if !bound.contains(&directive.placeholder) {
            return Err(TableError::UnboundDirective {
                rule: rule.name.clone(),
            });
        }
    }

    for conclusion in &rule.conclusions {
        for var in conclusion.template.variables() {
            if !bound.contains(&var) {
                return Err(TableError::UnboundConclusionVar {
                    rule: rule.name.clone(),
                });
            }
        }
        for tag in std::iter::once(conclusion.tag).chain(conclusion.secondary) {
            if tag.premise_count() != rule.premises.len() {
                return Err(TableError::TagArity {
                    rule: rule.name.clone(),
                    tag,
                });
            }
        }
    }

    Ok(())
}
