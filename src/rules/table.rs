//! The built-in rule table text
//!
//! Grouped roughly by NAL layer. `:name` placeholders match any subterm;
//! repeated placeholders must match equal subterms. Commutative compounds
//! and symmetric statements are matched in every operand order, so one
//! entry covers what would otherwise be positional twins.

pub const DEFAULT_RULES: &str = r#"
; ---- immediate rules (single premise) ----

(define-immediate-rules negation
  ((-- (-- :A)) !- ((:A (:t/negation :t/negation) :d/strong))))

(define-immediate-rules conversion
  ((:S --> :P) !- (((:P --> :S) (:t/conversion) :d/weak)))
  ((:S ==> :P) !- (((:P ==> :S) (:t/conversion) :d/weak))))

(define-immediate-rules contraposition
  ((:S ==> :P) !- ((((-- :P) ==> (-- :S)) (:t/contraposition) :d/weak))))

(define-immediate-rules structural
  ((:M --> (& :S :P)) !- (((:M --> :S) (:t/structural-deduction) :d/strong)))
  ((:M --> (| :S :P)) !- (((:M --> :S) (:t/structural-deduction) :d/strong)))
  (((| :S :P) --> :M) !- (((:S --> :M) (:t/structural-deduction) :d/strong)))
  ((:M --> (- :S :P)) !- (((:M --> :S) (:t/structural-deduction) :d/strong))))

(define-immediate-rules sets
  ((:S --> ({} :P)) !- (((:S <-> ({} :P)) (:t/structural-deduction) :d/strong)))
  ((([] :S) --> :P) !- (((([] :S) <-> :P) (:t/structural-deduction) :d/strong))))

; ---- first-order syllogisms ----

(define-mediate-rules syllogism
  ((:M --> :P) (:S --> :M) !- (((:S --> :P) (:t/deduction) :d/strong))
    :pre ((:!= :S :P)))
  ((:P --> :M) (:S --> :M) !- (((:S --> :P) (:t/abduction) :d/weak))
    :pre ((:!= :S :P)))
  ((:M --> :P) (:M --> :S) !- (((:S --> :P) (:t/induction) :d/weak))
    :pre ((:!= :S :P)))
  ((:P --> :M) (:M --> :S) !- (((:S --> :P) (:t/exemplification) :d/weak))
    :pre ((:!= :S :P))))

; ---- similarity ----

(define-mediate-rules similarity
  ((:S --> :P) (:P --> :S) !- (((:S <-> :P) (:t/intersection) :d/strong))
    :pre ((:!= :S :P)))
  ((:M --> :P) (:M --> :S) !- (((:S <-> :P) (:t/comparison) :d/weak))
    :pre ((:!= :S :P)))
  ((:P --> :M) (:S --> :M) !- (((:S <-> :P) (:t/comparison) :d/weak))
    :pre ((:!= :S :P)))
  ((:M --> :P) (:S <-> :M) !- (((:S --> :P) (:t/analogy) :d/strong))
    :pre ((:!= :S :P)))
  ((:P --> :M) (:S <-> :M) !- (((:P --> :S) (:t/analogy) :d/strong))
    :pre ((:!= :S :P)))
  ((:M <-> :P) (:S <-> :M) !- (((:S <-> :P) (:t/resemblance) :d/strong))
    :pre ((:!= :S :P))))

; ---- higher-order syllogisms ----

(define-mediate-rules implication
  ((:M ==> :P) (:S ==> :M) !- (((:S ==> :P) (:t/deduction) :d/strong))
    :pre ((:!= :S :P)))
  ((:P ==> :M) (:S ==> :M) !- (((:S ==> :P) (:t/abduction) :d/weak))
    :pre ((:!= :S :P)))
  ((:M ==> :P) (:M ==> :S) !- (((:S ==> :P) (:t/induction) :d/weak))
    :pre ((:!= :S :P)))
  ((:P ==> :M) (:M ==> :S) !- (((:S ==> :P) (:t/exemplification) :d/weak))
    :pre ((:!= :S :P)))
  ((:S ==> :P) (:P ==> :S) !- (((:S <=> :P) (:t/intersection) :d/strong))
    :pre ((:!= :S :P)))
  ((:M ==> :P) (:M ==> :S) !- (((:S <=> :P) (:t/comparison) :d/weak))
    :pre ((:!= :S :P)))
  ((:M ==> :P) (:S <=> :M) !- (((:S ==> :P) (:t/analogy) :d/strong))
    :pre ((:!= :S :P)))
  ((:M <=> :P) (:S <=> :M) !- (((:S <=> :P) (:t/resemblance) :d/strong))
    :pre ((:!= :S :P))))

; ---- conditional syllogisms ----

(define-mediate-rules conditional
  ((:S ==> :P) (:S) !- ((:P (:t/deduction) :d/strong)))
  ((:S ==> :P) (:P) !- ((:S (:t/abduction) :d/weak))))

; ---- variable introduction ----

(define-mediate-rules variable-intro
  ((:M --> :P) (:M --> :S) !-
    ((((:M --> :S) ==> (:M --> :P)) (:t/induction) :d/weak)
     (((:M --> :P) ==> (:M --> :S)) (:t/abduction) :d/weak)
     (((:M --> :S) <=> (:M --> :P)) (:t/comparison) :d/weak))
    :pre ((:!= :S :P))
    :subst (:M ?))
  ((:P --> :M) (:S --> :M) !-
    ((((:S --> :M) ==> (:P --> :M)) (:t/abduction) :d/weak)
     (((:P --> :M) ==> (:S --> :M)) (:t/induction) :d/weak)
     (((:S --> :M) <=> (:P --> :M)) (:t/comparison) :d/weak))
    :pre ((:!= :S :P))
    :subst (:M ?)))

; ---- composition ----

(define-mediate-rules composition
  ((:M --> :P) (:M --> :S) !-
    (((:M --> (& :P :S)) (:t/intersection) :d/strong)
     ((:M --> (| :P :S)) (:t/union) :d/strong)
     ((:M --> (- :P :S)) (:t/difference) :d/strong))
    :pre ((:!= :S :P)))
  ((:P --> :M) (:S --> :M) !-
    ((((| :P :S) --> :M) (:t/intersection) :d/strong)
     (((& :P :S) --> :M) (:t/union) :d/strong)
     (((~ :P :S) --> :M) (:t/difference) :d/strong))
    :pre ((:!= :S :P))))

; ---- decomposition ----

(define-mediate-rules decomposition
  ((:M --> (& :P :S)) (:M --> :P) !- (((:M --> :S) (:t/decompose-ppp) :d/strong))
    :pre ((:!= :S :P)))
  (((| :P :S) --> :M) (:P --> :M) !- (((:S --> :M) (:t/decompose-ppp) :d/strong))
    :pre ((:!= :S :P))))

(define-mediate-rules disjunction-reduction
  ((|| :P :S) (:S) !- ((:P (:t/decompose-pnn) :d/strong))
    :pre ((:!= :S :P))))

; ---- revision ----

(define-mediate-rules revision
  ((:A) (:A) !- ((:A (:t/revision) :d/strong))))

; ---- temporal succession ----

(define-mediate-rules succession
  ((:A) (:B) !- (((:A ==> :B) (:t/combine) :d/weak))
    :pre ((:!= :A :B))))
"#;
