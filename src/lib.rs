//! Inference kernel for a Non-Axiomatic Reasoning System
//!
//! The kernel is the layer below attention and memory: given one or two
//! premise terms with truth values, it produces every conclusion the rule
//! table licenses. It has no control loop and keeps no state beyond the
//! interner and the validated table.
//!
//! - [`term`] — interned atoms and variables, compounds, statements, the
//!   canonical term order
//! - [`truth`] — `(frequency, confidence)` values and the tag-keyed truth
//!   calculus
//! - [`rules`] — the declarative rule table: parser, records, load-time
//!   validation
//! - [`matching`] — one-way structural matching and conclusion
//!   instantiation
//! - [`inference`] — the dispatcher that ties the above together
//!
//! ```
//! use nalcore::{Copula, Interner, RuleEngine, Term, TruthValue};
//!
//! let mut interner = Interner::new();
//! let engine = RuleEngine::with_builtin(&mut interner).unwrap();
//! let robin = Term::atom(interner.intern_atom("robin"));
//! let bird = Term::atom(interner.intern_atom("bird"));
//! let animal = Term::atom(interner.intern_atom("animal"));
//!
//! let t = TruthValue::new(1.0, 0.9);
//! let derived = engine.derive_mediate(
//!     (&Term::statement(Copula::Inheritance, bird.clone(), animal.clone()), t),
//!     (&Term::statement(Copula::Inheritance, robin.clone(), bird), t),
//! );
//! let deduction = Term::statement(Copula::Inheritance, robin, animal);
//! assert!(derived.iter().any(|d| d.term == deduction));
//! ```

pub mod inference;
pub mod matching;
pub mod rules;
pub mod term;
pub mod truth;

pub use inference::{Application, Derivation, RuleEngine};
pub use matching::{match_all, match_term, Bindings};
pub use rules::{Rule, RuleKind, RuleTable, Strength, TableError};
pub use term::{AtomId, Connector, Copula, Interner, Term, VarId, VarKind};
pub use truth::{compute as compute_truth, TruthTag, TruthValue};
