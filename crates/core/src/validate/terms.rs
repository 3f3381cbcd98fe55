//! Term-level checks: duplicate-name merging and type-tag availability,
//! one pass per declaration context so diagnostics pinpoint the failing
//! declaration.

use std::collections::{BTreeMap, BTreeSet};

use crate::ast::{Domain, Predicate, Problem};
use crate::error::ValidationError;
use crate::formula::Formula;
use crate::term::Constant;
use crate::types::{TypeHierarchy, OBJECT_TYPE};

/// Merge a declaration-ordered term list into a set. Exact re-declarations
/// unify silently; a name re-declared with any different tag set (partial
/// overlap included) is a conflict.
pub(crate) fn merge_terms(terms: &[Constant]) -> Result<BTreeSet<Constant>, ValidationError> {
    let mut seen: BTreeMap<&str, &BTreeSet<String>> = BTreeMap::new();
    for c in terms {
        if let Some(prev) = seen.get(c.name()) {
            if *prev != c.type_tags() {
                return Err(ValidationError::DuplicateTerm {
                    name: c.name().to_owned(),
                    previous: prev.iter().cloned().collect(),
                    new: c.type_tags().iter().cloned().collect(),
                });
            }
        } else {
            seen.insert(c.name(), c.type_tags());
        }
    }
    Ok(terms.iter().cloned().collect())
}

fn check_tags(
    tags: &BTreeSet<String>,
    subject: String,
    available: &BTreeSet<String>,
) -> Result<(), ValidationError> {
    let bad: Vec<String> = tags
        .iter()
        .filter(|t| t.as_str() != OBJECT_TYPE && !available.contains(*t))
        .cloned()
        .collect();
    if bad.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::TypesNotAvailable {
            tags: bad,
            subject,
            available: available.iter().cloned().collect(),
        })
    }
}

/// Quantifier-bound variables carry type tags like declared parameters do.
fn check_bound_variables(
    formula: &Formula,
    available: &BTreeSet<String>,
) -> Result<(), ValidationError> {
    for variable in formula.quantified_variables() {
        check_tags(
            variable.type_tags(),
            format!("term {}", variable.repr()),
            available,
        )?;
    }
    Ok(())
}

fn check_predicate_terms(
    predicate: &Predicate,
    in_expression: bool,
    available: &BTreeSet<String>,
) -> Result<(), ValidationError> {
    for term in predicate.terms() {
        let subject = if in_expression {
            format!(
                "term {} in atomic expression {}",
                term.repr(),
                predicate.repr()
            )
        } else {
            format!("term {}", term.repr())
        };
        check_tags(term.type_tags(), subject, available)?;
    }
    Ok(())
}

pub(super) fn check_domain_type_tags(domain: &Domain) -> Result<(), ValidationError> {
    let available = domain.types().all_type_names();

    for constant in domain.constants() {
        check_tags(constant.type_tags(), "terms".to_owned(), &available)?;
    }

    for predicate in domain.predicates() {
        check_predicate_terms(predicate, false, &available)?;
    }

    for action in domain.actions() {
        for parameter in action.parameters() {
            check_tags(
                parameter.type_tags(),
                format!("term {}", parameter.repr()),
                &available,
            )?;
        }
        check_bound_variables(action.precondition(), &available)?;
        check_bound_variables(action.effect(), &available)?;
    }

    for derived in domain.derived_predicates() {
        check_predicate_terms(derived.predicate(), true, &available)?;
        for atom in derived.condition().atomics() {
            check_predicate_terms(atom, true, &available)?;
        }
        check_bound_variables(derived.condition(), &available)?;
    }

    Ok(())
}

pub(super) fn check_objects(
    problem: &Problem,
    types: &TypeHierarchy,
) -> Result<(), ValidationError> {
    let available = types.all_type_names();
    for object in problem.objects() {
        check_tags(object.type_tags(), "terms".to_owned(), &available)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Action;
    use crate::requirements::Requirement;
    use crate::term::Variable;
    use crate::Domain;

    fn t1_types() -> TypeHierarchy {
        [("my_type", None::<&str>)].into_iter().collect()
    }

    #[test]
    fn constant_with_undeclared_type_is_rejected() {
        let err = Domain::try_new(
            "test",
            [Requirement::Typing],
            t1_types(),
            [Constant::with_tag("a", "t1")],
            [],
            [],
            [],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "types ['t1'] of terms are not in available types {'my_type'}"
        );
    }

    #[test]
    fn predicate_term_error_names_the_term() {
        let x = Variable::with_tags("a", ["t1", "t2"]);
        let p = Predicate::new("p", [x]);
        let err = Domain::try_new(
            "test",
            [Requirement::Typing],
            t1_types(),
            [],
            [p],
            [],
            [],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "types ['t1', 't2'] of term Variable(a, type_tags=[t1, t2]) are not in available types {'my_type'}"
        );
    }

    #[test]
    fn action_parameter_error_names_the_term() {
        let x = Variable::with_tags("a", ["t1", "t2"]);
        let action = Action::new("p", [x]);
        let err = Domain::try_new(
            "test",
            [Requirement::Typing],
            t1_types(),
            [],
            [],
            [],
            [action],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "types ['t1', 't2'] of term Variable(a, type_tags=[t1, t2]) are not in available types {'my_type'}"
        );
    }

    #[test]
    fn quantifier_binding_with_undeclared_type_is_rejected() {
        use crate::formula::Formula;
        use crate::term::Term;

        let body = Formula::Atomic(Predicate::new("p", [Term::Variable(Variable::new("x"))]));
        let action = Action::new("a", []).with_precondition(Formula::forall(
            [Variable::with_tag("x", "ghost")],
            body,
        ));
        let err = Domain::try_new(
            "test",
            [Requirement::Typing],
            t1_types(),
            [],
            [Predicate::new("p", [Variable::new("x")])],
            [],
            [action],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "types ['ghost'] of term Variable(x, type_tags=[ghost]) are not in available types {'my_type'}"
        );
    }

    #[test]
    fn quantifier_binding_in_derived_condition_is_checked() {
        use crate::ast::DerivedPredicate;
        use crate::formula::Formula;
        use crate::term::Term;

        let q = Predicate::new("q", [Term::Variable(Variable::new("x"))]);
        let condition = Formula::exists(
            [Variable::with_tag("x", "ghost")],
            Formula::Atomic(q.clone()),
        );
        let dp = DerivedPredicate::new(Predicate::new("p", [] as [Term; 0]), condition);
        let err = Domain::try_new(
            "test",
            [Requirement::Typing, Requirement::DerivedPredicates],
            t1_types(),
            [],
            [q],
            [dp],
            [],
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("term Variable(x, type_tags=[ghost])"));
    }

    #[test]
    fn conflicting_duplicate_names_are_rejected() {
        let err = merge_terms(&[
            Constant::with_tag("a", "t1"),
            Constant::with_tag("a", "t2"),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Term a occurred twice with different type tags: previous type tags ['t1'], new type tags ['t2']"
        );
    }

    #[test]
    fn partial_tag_overlap_is_a_conflict() {
        let err = merge_terms(&[
            Constant::with_tags("a", ["t1", "t2"]),
            Constant::with_tags("a", ["t1", "t3"]),
        ])
        .unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateTerm { .. }));
    }

    #[test]
    fn exact_duplicates_unify_silently() {
        let merged = merge_terms(&[
            Constant::with_tag("a", "t1"),
            Constant::with_tag("a", "t1"),
        ])
        .unwrap();
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn object_tag_is_always_available() {
        let merged = check_tags(
            &[OBJECT_TYPE.to_owned()].into_iter().collect(),
            "terms".to_owned(),
            &BTreeSet::new(),
        );
        assert!(merged.is_ok());
    }
}
