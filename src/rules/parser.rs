//! S-expression parser for the rule table text
//!
//! The table is written in a small s-expression dialect:
//!
//! ```text
//! (define-mediate-rules syllogism
//!   ((:M --> :P) (:S --> :M) !- (((:S --> :P) (:t/deduction) :d/strong))
//!     :pre ((:!= :S :P))))
//! ```
//!
//! `:name` is a rule placeholder, `$x`/`#x`/`?x` are term variables,
//! statements are infix, other compounds are prefix. Every structural or
//! vocabulary problem is reported as a `TableError`; nothing panics.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, value},
    multi::many0,
    sequence::{delimited, pair, preceded},
    IResult, Parser,
};

use super::{Conclusion, Inequality, Rule, RuleKind, Strength, SubstDirective, TableError};
use crate::term::{Connector, Copula, Interner, Term, VarKind};
use crate::truth::TruthTag;

#[derive(Debug, Clone, PartialEq)]
enum Sexp {
    Atom(String),
    List(Vec<Sexp>),
}

fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')' && c != ';'
}

fn sexp_atom(input: &str) -> IResult<&str, Sexp> {
    map(take_while1(is_symbol_char), |s: &str| {
        Sexp::Atom(s.to_string())
    })
    .parse(input)
}

fn comment(input: &str) -> IResult<&str, ()> {
    value((), pair(char(';'), take_while(|c| c != '\n' && c != '\r'))).parse(input)
}

fn blank(input: &str) -> IResult<&str, ()> {
    let (input, _) = multispace0(input)?;
    let (input, _) = many0((comment, multispace0)).parse(input)?;
    Ok((input, ()))
}

fn sexp(input: &str) -> IResult<&str, Sexp> {
    let (input, _) = blank(input)?;
    alt((
        sexp_atom,
        map(
            delimited(char('('), many0(sexp), preceded(blank, char(')'))),
            Sexp::List,
        ),
    ))
    .parse(input)
}

fn sexp_file(input: &str) -> Result<Vec<Sexp>, TableError> {
    let (rest, forms) = many0(sexp)
        .parse(input)
        .map_err(|e| TableError::Parse(e.to_string()))?;
    let (rest, _) = blank(rest).map_err(|e: nom::Err<nom::error::Error<&str>>| {
        TableError::Parse(e.to_string())
    })?;
    if !rest.is_empty() {
        return Err(TableError::Parse(format!(
            "trailing input in rule table: {:?}",
            &rest[..rest.len().min(40)]
        )));
    }
    Ok(forms)
}

/// Parse a single term from its textual form (used by tests and callers
/// that construct premises textually)
pub fn parse_term(src: &str, interner: &mut Interner) -> Result<Term, TableError> {
    let (rest, form) = sexp(src).map_err(|e| TableError::Parse(e.to_string()))?;
    if !rest.trim().is_empty() {
        return Err(TableError::Parse(format!("trailing input after term: {rest:?}")));
    }
    term_from_sexp(&form, interner)
}

fn term_from_sexp(form: &Sexp, interner: &mut Interner) -> Result<Term, TableError> {
    match form {
        Sexp::Atom(s) => {
            if let Some(name) = s.strip_prefix(':') {
                if name.is_empty() {
                    return Err(TableError::Parse("empty placeholder name".into()));
                }
                Ok(Term::variable(
                    VarKind::Independent,
                    interner.intern_variable(name),
                ))
            } else if let Some(name) = s.strip_prefix('$') {
                variable_atom(name, VarKind::Independent, interner)
            } else if let Some(name) = s.strip_prefix('#') {
                variable_atom(name, VarKind::Dependent, interner)
            } else if let Some(name) = s.strip_prefix('?') {
                variable_atom(name, VarKind::Query, interner)
            } else {
                Ok(Term::atom(interner.intern_atom(s)))
            }
        }
        Sexp::List(items) => {
            match items.as_slice() {
                [] => return Err(TableError::Parse("empty term".into())),
                [single] => return term_from_sexp(single, interner),
                _ => {}
            }
            if let [subject, Sexp::Atom(op), predicate] = items.as_slice() {
                if let Some(copula) = Copula::from_symbol(op) {
                    return Ok(Term::statement(
                        copula,
                        term_from_sexp(subject, interner)?,
                        term_from_sexp(predicate, interner)?,
                    ));
                }
            }
            if let [Sexp::Atom(op), operands @ ..] = items.as_slice() {
                if let Some(connector) = Connector::from_symbol(op) {
                    let components = operands
                        .iter()
                        .map(|c| term_from_sexp(c, interner))
                        .collect::<Result<Vec<_>, _>>()?;
                    check_connector_arity(connector, components.len())?;
                    return Ok(Term::compound(connector, components));
                }
            }
            Err(TableError::Parse(format!("unrecognized term form: {form:?}")))
        }
    }
}

fn variable_atom(
    name: &str,
    kind: VarKind,
    interner: &mut Interner,
) -> Result<Term, TableError> {
    if name.is_empty() {
        return Err(TableError::Parse("empty variable name".into()));
    }
    Ok(Term::variable(kind, interner.intern_variable(name)))
}

fn check_connector_arity(connector: Connector, arity: usize) -> Result<(), TableError> {
    let ok = match connector {
        Connector::Negation => arity == 1,
        Connector::ExtSet | Connector::IntSet => arity >= 1,
        _ => arity >= 2,
    };
    if ok {
        Ok(())
    } else {
        Err(TableError::Parse(format!(
            "connector {} used with arity {arity}",
            connector.symbol()
        )))
    }
}

/// Parse a complete rule-table source into rule records
pub fn parse_rules(src: &str, interner: &mut Interner) -> Result<Vec<Rule>, TableError> {
    let mut rules = Vec::new();
    for form in sexp_file(src)? {
        let Sexp::List(items) = form else {
            return Err(TableError::Parse(format!("expected rule group, got {form:?}")));
        };
        let [Sexp::Atom(head), Sexp::Atom(group), entries @ ..] = items.as_slice() else {
            return Err(TableError::Parse("malformed rule group header".into()));
        };
        let kind = match head.as_str() {
            "define-immediate-rules" => RuleKind::Immediate,
            "define-mediate-rules" => RuleKind::Mediate,
            other => {
                return Err(TableError::Parse(format!("unknown group form: {other}")));
            }
        };
        for (idx, entry) in entries.iter().enumerate() {
            let name = format!("{}.{}", group, idx + 1);
            rules.push(rule_from_sexp(entry, kind, name, interner)?);
        }
    }
    Ok(rules)
}

fn rule_from_sexp(
    entry: &Sexp,
    kind: RuleKind,
    name: String,
    interner: &mut Interner,
) -> Result<Rule, TableError> {
    let Sexp::List(parts) = entry else {
        return Err(TableError::Parse(format!("rule {name} is not a list")));
    };
    let split = parts
        .iter()
        .position(|p| matches!(p, Sexp::Atom(s) if s == "!-"))
        .ok_or_else(|| TableError::Parse(format!("rule {name} has no !- separator")))?;

    let premises = parts[..split]
        .iter()
        .map(|p| term_from_sexp(p, interner))
        .collect::<Result<Vec<_>, _>>()?;

    let mut conclusions = Vec::new();
    let mut preconditions = Vec::new();
    let mut intro = None;

    let mut rest = parts[split + 1..].iter();
    while let Some(part) = rest.next() {
        match part {
            Sexp::Atom(key) if key == ":pre" => {
                let Some(Sexp::List(ineqs)) = rest.next() else {
                    return Err(TableError::Parse(format!(
                        "rule {name}: :pre needs a list of constraints"
                    )));
                };
                for ineq in ineqs {
                    preconditions.push(inequality_from_sexp(ineq, &name, interner)?);
                }
            }
            Sexp::Atom(key) if key == ":subst" => {
                let Some(Sexp::List(parts)) = rest.next() else {
                    return Err(TableError::Parse(format!(
                        "rule {name}: :subst needs (placeholder kind)"
                    )));
                };
                intro = Some(directive_from_sexp(parts, &name, interner)?);
            }
            Sexp::Atom(other) => {
                return Err(TableError::Parse(format!(
                    "rule {name}: unknown keyword {other}"
                )));
            }
            // the list after !- encloses all of the rule's conclusions
            Sexp::List(entries) => {
                for entry in entries {
                    conclusions.push(conclusion_from_sexp(entry, &name, interner)?);
                }
            }
        }
    }

    if conclusions.is_empty() {
        return Err(TableError::NoConclusions { rule: name });
    }

    Ok(Rule {
        name,
        kind,
        premises,
        preconditions,
        intro,
        conclusions,
    })
}

fn conclusion_from_sexp(
    form: &Sexp,
    rule: &str,
    interner: &mut Interner,
) -> Result<Conclusion, TableError> {
    let Sexp::List(parts) = form else {
        return Err(TableError::Parse(format!(
            "rule {rule}: conclusion is not a list"
        )));
    };
    let [template, Sexp::List(tags), Sexp::Atom(marker)] = parts.as_slice() else {
        return Err(TableError::Parse(format!(
            "rule {rule}: conclusion needs (template (tags) marker)"
        )));
    };

    let template = term_from_sexp(template, interner)?;

    let mut parsed_tags = Vec::new();
    for tag in tags {
        let Sexp::Atom(symbol) = tag else {
            return Err(TableError::Parse(format!("rule {rule}: tag is not a symbol")));
        };
        let stripped = symbol
            .strip_prefix(":t/")
            .ok_or_else(|| TableError::UnknownTag(symbol.clone()))?;
        parsed_tags
            .push(TruthTag::from_name(stripped).ok_or_else(|| TableError::UnknownTag(symbol.clone()))?);
    }
    let (tag, secondary) = match parsed_tags.as_slice() {
        [primary] => (*primary, None),
        [primary, secondary] => (*primary, Some(*secondary)),
        _ => {
            return Err(TableError::TooManyTags {
                rule: rule.to_string(),
            })
        }
    };

    let strength = match marker.as_str() {
        ":d/strong" => Strength::Strong,
        ":d/weak" => Strength::Weak,
        other => return Err(TableError::UnknownMarker(other.to_string())),
    };

    Ok(Conclusion {
        template,
        tag,
        secondary,
        strength,
    })
}

fn inequality_from_sexp(
    form: &Sexp,
    rule: &str,
    interner: &mut Interner,
) -> Result<Inequality, TableError> {
    let Sexp::List(parts) = form else {
        return Err(TableError::Parse(format!(
            "rule {rule}: precondition is not a list"
        )));
    };
    let [Sexp::Atom(op), Sexp::Atom(left), Sexp::Atom(right)] = parts.as_slice() else {
        return Err(TableError::Parse(format!(
            "rule {rule}: precondition needs (:!= :X :Y)"
        )));
    };
    if op != ":!=" {
        return Err(TableError::Parse(format!(
            "rule {rule}: unknown precondition {op}"
        )));
    }
    Ok(Inequality {
        left: placeholder_id(left, rule, interner)?,
        right: placeholder_id(right, rule, interner)?,
    })
}

fn directive_from_sexp(
    parts: &[Sexp],
    rule: &str,
    interner: &mut Interner,
) -> Result<SubstDirective, TableError> {
    let [Sexp::Atom(placeholder), Sexp::Atom(kind)] = parts else {
        return Err(TableError::Parse(format!(
            "rule {rule}: :subst needs (placeholder kind)"
        )));
    };
    let kind = match kind.as_str() {
        "$" => VarKind::Independent,
        "#" => VarKind::Dependent,
        "?" => VarKind::Query,
        other => return Err(TableError::UnknownDirectiveKind(other.to_string())),
    };
    Ok(SubstDirective {
        placeholder: placeholder_id(placeholder, rule, interner)?,
        kind,
    })
}

fn placeholder_id(
    symbol: &str,
    rule: &str,
    interner: &mut Interner,
) -> Result<crate::term::VarId, TableError> {
    let name = symbol.strip_prefix(':').ok_or_else(|| {
        TableError::Parse(format!("rule {rule}: expected placeholder, got {symbol}"))
    })?;
    Ok(interner.intern_variable(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_statement_term() {
        let mut interner = Interner::new();
        let t = parse_term("(robin --> bird)", &mut interner).unwrap();
        let robin = Term::atom(interner.get_atom("robin").unwrap());
        let bird = Term::atom(interner.get_atom("bird").unwrap());
        assert_eq!(t, Term::statement(Copula::Inheritance, robin, bird));
    }

    #[test]
    fn test_parse_placeholder_and_variables() {
        let mut interner = Interner::new();
        let t = parse_term("(:S --> $x)", &mut interner).unwrap();
        match t {
            Term::Statement(Copula::Inheritance, s, p) => {
                assert!(matches!(*s, Term::Variable(v) if v.kind == VarKind::Independent));
                assert!(matches!(*p, Term::Variable(v) if v.kind == VarKind::Independent));
            }
            other => panic!("unexpected term {other:?}"),
        }
        let q = parse_term("?x", &mut interner).unwrap();
        assert!(matches!(q, Term::Variable(v) if v.kind == VarKind::Query));
        let d = parse_term("#x", &mut interner).unwrap();
        assert!(matches!(d, Term::Variable(v) if v.kind == VarKind::Dependent));
    }

    #[test]
    fn test_parse_prefix_compound() {
        let mut interner = Interner::new();
        let t = parse_term("(& :S :P)", &mut interner).unwrap();
        assert!(matches!(t, Term::Compound(Connector::ExtIntersection, ref c) if c.len() == 2));

        let neg = parse_term("(-- (-- a))", &mut interner).unwrap();
        match neg {
            Term::Compound(Connector::Negation, inner) => {
                assert!(matches!(inner[0], Term::Compound(Connector::Negation, _)));
            }
            other => panic!("unexpected term {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_arity() {
        let mut interner = Interner::new();
        assert!(parse_term("(-- a b)", &mut interner).is_err());
        assert!(parse_term("(& a)", &mut interner).is_err());
    }

    #[test]
    fn test_parse_rule_with_sections() {
        let mut interner = Interner::new();
        let src = r#"
            ; a comment
            (define-mediate-rules demo
              ((:M --> :P) (:S --> :M) !- (((:S --> :P) (:t/deduction) :d/strong))
                :pre ((:!= :S :P))
                :subst (:M $)))
        "#;
        let rules = parse_rules(src, &mut interner).unwrap();
        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.name, "demo.1");
        assert_eq!(rule.kind, RuleKind::Mediate);
        assert_eq!(rule.premises.len(), 2);
        assert_eq!(rule.preconditions.len(), 1);
        assert!(rule.intro.is_some());
        assert_eq!(rule.conclusions.len(), 1);
        assert_eq!(rule.conclusions[0].tag, TruthTag::Deduction);
        assert_eq!(rule.conclusions[0].strength, Strength::Strong);
    }

    #[test]
    fn test_parse_enclosing_conclusion_list() {
        // all conclusions of a rule sit inside one list after !-
        let mut interner = Interner::new();
        let src = r#"
            (define-mediate-rules demo
              ((:M --> :P) (:M --> :S) !-
                (((:S --> :P) (:t/induction) :d/weak)
                 ((:S <-> :P) (:t/comparison) :d/weak))
                :pre ((:!= :S :P))))
        "#;
        let rules = parse_rules(src, &mut interner).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].conclusions.len(), 2);
        assert_eq!(rules[0].conclusions[0].tag, TruthTag::Induction);
        assert_eq!(rules[0].conclusions[1].tag, TruthTag::Comparison);
    }

    #[test]
    fn test_parse_rejects_unknown_tag() {
        let mut interner = Interner::new();
        let src = "(define-immediate-rules demo ((:A) !- ((:A (:t/telepathy) :d/strong))))";
        assert!(matches!(
            parse_rules(src, &mut interner),
            Err(TableError::UnknownTag(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_marker() {
        let mut interner = Interner::new();
        let src = "(define-immediate-rules demo ((:A) !- ((:A (:t/negation) :d/certain))))";
        assert!(matches!(
            parse_rules(src, &mut interner),
            Err(TableError::UnknownMarker(_))
        ));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let mut interner = Interner::new();
        let src = "(define-immediate-rules demo ((:A) ((:A (:t/negation) :d/strong))))";
        assert!(matches!(
            parse_rules(src, &mut interner),
            Err(TableError::Parse(_))
        ));
    }
}
