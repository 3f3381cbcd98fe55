//! The logical formula AST.
//!
//! A closed sum type over boolean connectives, quantifiers, equality, and
//! atomic predicate applications. Formulas are immutable once built;
//! equality and hashing are structural. The smart constructors [`Formula::and`]
//! and [`Formula::or`] sort their operands by canonical string and drop
//! exact duplicates, so two formulas built from equal children in any
//! order are equal and serialize identically. No other simplification is
//! performed: `not (not p)` stays distinct from `p`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::Predicate;
use crate::term::{Term, Variable};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Formula {
    True,
    False,
    /// A predicate name applied to terms
    Atomic(Predicate),
    EqualTo(Term, Term),
    Not(Box<Formula>),
    /// Empty conjunctions are [`Formula::True`], so the operand list is
    /// never empty
    And(Operands),
    /// Empty disjunctions are [`Formula::False`], so the operand list is
    /// never empty
    Or(Operands),
    Imply(Box<Formula>, Box<Formula>),
    ForAll {
        variables: Vec<Variable>,
        body: Box<Formula>,
    },
    Exists {
        variables: Vec<Variable>,
        body: Box<Formula>,
    },
}

impl Formula {
    /// Conjunction. Zero operands collapse to `True`.
    pub fn and(operands: impl IntoIterator<Item = Formula>) -> Formula {
        match normalize(operands) {
            ops if ops.is_empty() => Formula::True,
            ops => Formula::And(Operands(ops)),
        }
    }

    /// Disjunction. Zero operands collapse to `False`.
    pub fn or(operands: impl IntoIterator<Item = Formula>) -> Formula {
        match normalize(operands) {
            ops if ops.is_empty() => Formula::False,
            ops => Formula::Or(Operands(ops)),
        }
    }

    pub fn not(operand: Formula) -> Formula {
        Formula::Not(Box::new(operand))
    }

    pub fn imply(antecedent: Formula, consequent: Formula) -> Formula {
        Formula::Imply(Box::new(antecedent), Box::new(consequent))
    }

    pub fn equal_to(left: impl Into<Term>, right: impl Into<Term>) -> Formula {
        Formula::EqualTo(left.into(), right.into())
    }

    pub fn forall(variables: impl IntoIterator<Item = Variable>, body: Formula) -> Formula {
        Formula::ForAll {
            variables: variables.into_iter().collect(),
            body: Box::new(body),
        }
    }

    pub fn exists(variables: impl IntoIterator<Item = Variable>, body: Formula) -> Formula {
        Formula::Exists {
            variables: variables.into_iter().collect(),
            body: Box::new(body),
        }
    }

    /// Whether the formula contains an equality anywhere. Drives the
    /// `:equality` requirement gate.
    pub fn uses_equality(&self) -> bool {
        match self {
            Formula::True | Formula::False | Formula::Atomic(_) => false,
            Formula::EqualTo(..) => true,
            Formula::Not(f) => f.uses_equality(),
            Formula::And(ops) | Formula::Or(ops) => ops.iter().any(Formula::uses_equality),
            Formula::Imply(a, b) => a.uses_equality() || b.uses_equality(),
            Formula::ForAll { body, .. } | Formula::Exists { body, .. } => body.uses_equality(),
        }
    }

    /// Visit every atomic predicate application in the formula.
    pub fn atomics(&self) -> Vec<&Predicate> {
        let mut out = Vec::new();
        self.collect_atomics(&mut out);
        out
    }

    fn collect_atomics<'a>(&'a self, out: &mut Vec<&'a Predicate>) {
        match self {
            Formula::True | Formula::False | Formula::EqualTo(..) => {}
            Formula::Atomic(p) => out.push(p),
            Formula::Not(f) => f.collect_atomics(out),
            Formula::And(ops) | Formula::Or(ops) => {
                for op in ops {
                    op.collect_atomics(out);
                }
            }
            Formula::Imply(a, b) => {
                a.collect_atomics(out);
                b.collect_atomics(out);
            }
            Formula::ForAll { body, .. } | Formula::Exists { body, .. } => {
                body.collect_atomics(out);
            }
        }
    }

    /// Visit every quantifier-bound variable in the formula, outermost
    /// first. These bindings can carry type tags, so the validator walks
    /// them the same way it walks declared parameters.
    pub fn quantified_variables(&self) -> Vec<&Variable> {
        let mut out = Vec::new();
        self.collect_quantified(&mut out);
        out
    }

    fn collect_quantified<'a>(&'a self, out: &mut Vec<&'a Variable>) {
        match self {
            Formula::True | Formula::False | Formula::Atomic(_) | Formula::EqualTo(..) => {}
            Formula::Not(f) => f.collect_quantified(out),
            Formula::And(ops) | Formula::Or(ops) => {
                for op in ops {
                    op.collect_quantified(out);
                }
            }
            Formula::Imply(a, b) => {
                a.collect_quantified(out);
                b.collect_quantified(out);
            }
            Formula::ForAll { variables, body } | Formula::Exists { variables, body } => {
                out.extend(variables.iter());
                body.collect_quantified(out);
            }
        }
    }
}

fn normalize(operands: impl IntoIterator<Item = Formula>) -> Vec<Formula> {
    let mut ops: Vec<Formula> = operands.into_iter().collect();
    ops.sort_by_cached_key(|f| f.to_string());
    ops.dedup();
    ops
}

/// The operand list of an `And`/`Or`. Only [`Formula::and`] and
/// [`Formula::or`] can build one, so the list is always sorted by
/// canonical string with exact duplicates removed and the set-based
/// equality invariant cannot be bypassed by constructing the variant
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Operands(Vec<Formula>);

impl Operands {
    pub fn as_slice(&self) -> &[Formula] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Formula> {
        self.0.iter()
    }
}

impl std::ops::Deref for Operands {
    type Target = [Formula];

    fn deref(&self) -> &[Formula] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Operands {
    type Item = &'a Formula;
    type IntoIter = std::slice::Iter<'a, Formula>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// Re-normalize on the way in so deserialized data obeys the same
// invariant as constructed data.
impl<'de> Deserialize<'de> for Operands {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let ops = Vec::<Formula>::deserialize(deserializer)?;
        Ok(Operands(normalize(ops)))
    }
}

impl From<Predicate> for Formula {
    fn from(p: Predicate) -> Self {
        Formula::Atomic(p)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The zero-operand connectives, so `and([]) == TRUE` holds in
            // text as well as structure
            Formula::True => write!(f, "(and )"),
            Formula::False => write!(f, "(or )"),
            Formula::Atomic(p) => p.fmt(f),
            Formula::EqualTo(a, b) => write!(f, "(= {} {})", a, b),
            Formula::Not(inner) => write!(f, "(not {})", inner),
            Formula::And(ops) => write!(f, "(and {})", join(ops)),
            Formula::Or(ops) => write!(f, "(or {})", join(ops)),
            Formula::Imply(a, b) => write!(f, "(imply {} {})", a, b),
            Formula::ForAll { variables, body } => {
                write!(f, "(forall ({}) {})", join_typed(variables), body)
            }
            Formula::Exists { variables, body } => {
                write!(f, "(exists ({}) {})", join_typed(variables), body)
            }
        }
    }
}

fn join(ops: &[Formula]) -> String {
    ops.iter()
        .map(Formula::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_typed(variables: &[Variable]) -> String {
    variables
        .iter()
        .map(Variable::typed)
        .collect::<Vec<_>>()
        .join(" ")
}
