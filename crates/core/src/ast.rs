//! Declarative entities and the Domain/Problem aggregates.
//!
//! Aggregates are built through `try_new` smart constructors that run the
//! full validation pipeline, so no invalid `Domain` or `Problem` is ever
//! observable. Once built they are immutable value objects: safe to clone,
//! serialize, and compare structurally.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PddlError;
use crate::formula::Formula;
use crate::requirements::Requirement;
use crate::term::{Constant, Term, Variable};
use crate::types::TypeHierarchy;
use crate::validate;

// ──────────────────────────────────────────────
// Predicates
// ──────────────────────────────────────────────

/// A predicate declaration or application: a name over ordered terms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Predicate {
    name: String,
    terms: Vec<Term>,
}

impl Predicate {
    pub fn new(name: impl Into<String>, terms: impl IntoIterator<Item = impl Into<Term>>) -> Self {
        Predicate {
            name: name.into(),
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    /// Declaration form with typed terms, e.g. `(p ?x - t ?y)`.
    pub fn typed_signature(&self) -> String {
        if self.terms.is_empty() {
            return format!("({})", self.name);
        }
        let terms: Vec<String> = self
            .terms
            .iter()
            .map(|t| match t {
                Term::Constant(c) => c.typed(),
                Term::Variable(v) => v.typed(),
            })
            .collect();
        format!("({} {})", self.name, terms.join(" "))
    }

    /// Structural form used in diagnostics.
    pub fn repr(&self) -> String {
        let terms: Vec<String> = self.terms.iter().map(Term::repr).collect();
        format!("Predicate({}, [{}])", self.name, terms.join(", "))
    }
}

/// Application form without type tags, e.g. `(p ?x a)`.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            write!(f, "({})", self.name)
        } else {
            let terms: Vec<String> = self.terms.iter().map(Term::to_string).collect();
            write!(f, "({} {})", self.name, terms.join(" "))
        }
    }
}

/// A predicate whose truth is defined by a formula rather than asserted
/// in state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DerivedPredicate {
    predicate: Predicate,
    condition: Formula,
}

impl DerivedPredicate {
    pub fn new(predicate: Predicate, condition: Formula) -> Self {
        DerivedPredicate {
            predicate,
            condition,
        }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn condition(&self) -> &Formula {
        &self.condition
    }
}

impl fmt::Display for DerivedPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(:derived {} {})",
            self.predicate.typed_signature(),
            self.condition
        )
    }
}

// ──────────────────────────────────────────────
// Actions
// ──────────────────────────────────────────────

/// An action schema: typed parameters, a precondition, and an effect.
/// Precondition and effect default to `True` when omitted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Action {
    name: String,
    parameters: Vec<Variable>,
    precondition: Formula,
    effect: Formula,
}

impl Action {
    pub fn new(name: impl Into<String>, parameters: impl IntoIterator<Item = Variable>) -> Self {
        Action {
            name: name.into(),
            parameters: parameters.into_iter().collect(),
            precondition: Formula::True,
            effect: Formula::True,
        }
    }

    pub fn with_precondition(mut self, precondition: Formula) -> Self {
        self.precondition = precondition;
        self
    }

    pub fn with_effect(mut self, effect: Formula) -> Self {
        self.effect = effect;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Variable] {
        &self.parameters
    }

    pub fn precondition(&self) -> &Formula {
        &self.precondition
    }

    pub fn effect(&self) -> &Formula {
        &self.effect
    }
}

// ──────────────────────────────────────────────
// Domain
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    name: String,
    requirements: BTreeSet<Requirement>,
    types: TypeHierarchy,
    constants: BTreeSet<Constant>,
    predicates: BTreeSet<Predicate>,
    derived_predicates: BTreeSet<DerivedPredicate>,
    actions: BTreeSet<Action>,
}

impl Domain {
    /// Build and validate a domain. Constants are supplied in declaration
    /// order so duplicate names are merged (identical tag sets) or
    /// rejected (conflicting tag sets) deterministically.
    pub fn try_new(
        name: impl Into<String>,
        requirements: impl IntoIterator<Item = Requirement>,
        types: TypeHierarchy,
        constants: impl IntoIterator<Item = Constant>,
        predicates: impl IntoIterator<Item = Predicate>,
        derived_predicates: impl IntoIterator<Item = DerivedPredicate>,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<Domain, PddlError> {
        let constants: Vec<Constant> = constants.into_iter().collect();
        let merged = validate::merge_terms(&constants)?;
        let domain = Domain {
            name: name.into(),
            requirements: requirements.into_iter().collect(),
            types,
            constants: merged,
            predicates: predicates.into_iter().collect(),
            derived_predicates: derived_predicates.into_iter().collect(),
            actions: actions.into_iter().collect(),
        };
        validate::validate_domain(&domain)?;
        Ok(domain)
    }

    /// A domain with the given name and nothing else.
    pub fn empty(name: impl Into<String>) -> Domain {
        Domain {
            name: name.into(),
            requirements: BTreeSet::new(),
            types: TypeHierarchy::default(),
            constants: BTreeSet::new(),
            predicates: BTreeSet::new(),
            derived_predicates: BTreeSet::new(),
            actions: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirements(&self) -> &BTreeSet<Requirement> {
        &self.requirements
    }

    pub fn types(&self) -> &TypeHierarchy {
        &self.types
    }

    pub fn constants(&self) -> &BTreeSet<Constant> {
        &self.constants
    }

    pub fn predicates(&self) -> &BTreeSet<Predicate> {
        &self.predicates
    }

    pub fn derived_predicates(&self) -> &BTreeSet<DerivedPredicate> {
        &self.derived_predicates
    }

    pub fn actions(&self) -> &BTreeSet<Action> {
        &self.actions
    }
}

// ──────────────────────────────────────────────
// Problem
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    name: String,
    domain_name: String,
    requirements: BTreeSet<Requirement>,
    objects: BTreeSet<Constant>,
    init: BTreeSet<Formula>,
    goal: Formula,
}

impl Problem {
    /// Build and validate a problem. Objects are merged/rejected like
    /// domain constants; type-tag availability against a concrete domain
    /// is checked separately by [`Problem::validate_against`].
    pub fn try_new(
        name: impl Into<String>,
        domain_name: impl Into<String>,
        requirements: impl IntoIterator<Item = Requirement>,
        objects: impl IntoIterator<Item = Constant>,
        init: impl IntoIterator<Item = Formula>,
        goal: Formula,
    ) -> Result<Problem, PddlError> {
        let objects: Vec<Constant> = objects.into_iter().collect();
        let merged = validate::merge_terms(&objects)?;
        let problem = Problem {
            name: name.into(),
            domain_name: domain_name.into(),
            requirements: requirements.into_iter().collect(),
            objects: merged,
            init: init.into_iter().collect(),
            goal,
        };
        validate::validate_problem(&problem)?;
        Ok(problem)
    }

    /// Check this problem's objects against the type hierarchy of the
    /// domain it names.
    pub fn validate_against(&self, domain: &Domain) -> Result<(), PddlError> {
        validate::validate_problem_against_domain(self, domain)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    pub fn requirements(&self) -> &BTreeSet<Requirement> {
        &self.requirements
    }

    pub fn objects(&self) -> &BTreeSet<Constant> {
        &self.objects
    }

    pub fn init(&self) -> &BTreeSet<Formula> {
        &self.init
    }

    pub fn goal(&self) -> &Formula {
        &self.goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{constants, variables};

    #[test]
    fn empty_domain_has_empty_collections() {
        let d = Domain::empty("empty_domain");
        assert_eq!(d.name(), "empty_domain");
        assert!(d.requirements().is_empty());
        assert!(d.constants().is_empty());
        assert!(d.predicates().is_empty());
        assert!(d.actions().is_empty());
    }

    #[test]
    fn build_simple_domain() {
        let cs = constants("a b c");
        let vs = variables("x y z");
        let p = Predicate::new("p", vs.iter().cloned().map(Term::Variable));
        let action = Action::new("action_1", vs)
            .with_precondition(Formula::Atomic(p.clone()))
            .with_effect(Formula::not(Formula::Atomic(p.clone())));
        let d = Domain::try_new(
            "simple_domain",
            [],
            TypeHierarchy::default(),
            cs,
            [p],
            [],
            [action],
        )
        .unwrap();
        assert_eq!(d.constants().len(), 3);
        assert_eq!(d.actions().len(), 1);
    }

    #[test]
    fn predicate_display_and_signature_differ() {
        let p = Predicate::new("on", [Variable::with_tag("x", "block")]);
        assert_eq!(p.to_string(), "(on ?x)");
        assert_eq!(p.typed_signature(), "(on ?x - block)");
        assert_eq!(p.arity(), 1);
    }

    #[test]
    fn nullary_predicate_renders_bare() {
        let p = Predicate::new("handempty", [] as [Term; 0]);
        assert_eq!(p.to_string(), "(handempty)");
        assert_eq!(p.typed_signature(), "(handempty)");
    }

    #[test]
    fn action_defaults_to_true_precondition_and_effect() {
        let a = Action::new("noop", []);
        assert_eq!(a.precondition(), &Formula::True);
        assert_eq!(a.effect(), &Formula::True);
    }

    #[test]
    fn derived_predicate_renders_with_typed_signature() {
        let p = Predicate::new("q", [Variable::with_tag("x", "t")]);
        let dp = DerivedPredicate::new(p.clone(), Formula::not(Formula::Atomic(p)));
        assert_eq!(dp.to_string(), "(:derived (q ?x - t) (not (q ?x)))");
    }
}
