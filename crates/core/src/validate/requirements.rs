//! Requirement gates: every used language feature must be licensed by its
//! capability flag. These run before any type check.

use crate::ast::{Domain, Problem};
use crate::error::ValidationError;
use crate::formula::Formula;
use crate::requirements::Requirement;
use crate::term::Term;

fn missing(feature: &str, flag: Requirement) -> ValidationError {
    ValidationError::MissingRequirement {
        feature: feature.to_owned(),
        flag: flag.as_str().to_owned(),
    }
}

fn terms_typed<'a>(terms: impl IntoIterator<Item = &'a Term>) -> bool {
    terms.into_iter().any(|t| !t.type_tags().is_empty())
}

/// Quantifier bindings inside a formula body can carry type tags too.
fn binds_typed(formula: &Formula) -> bool {
    formula
        .quantified_variables()
        .iter()
        .any(|v| !v.type_tags().is_empty())
}

pub(super) fn check_domain(domain: &Domain) -> Result<(), ValidationError> {
    let typing_used = !domain.types().is_empty()
        || domain.constants().iter().any(|c| !c.type_tags().is_empty())
        || domain.predicates().iter().any(|p| terms_typed(p.terms()))
        || domain
            .derived_predicates()
            .iter()
            .any(|dp| terms_typed(dp.predicate().terms()) || binds_typed(dp.condition()))
        || domain.actions().iter().any(|a| {
            a.parameters().iter().any(|v| !v.type_tags().is_empty())
                || binds_typed(a.precondition())
                || binds_typed(a.effect())
        });
    if typing_used && !domain.requirements().contains(&Requirement::Typing) {
        return Err(missing("typing", Requirement::Typing));
    }

    let equality_used = domain
        .actions()
        .iter()
        .any(|a| a.precondition().uses_equality() || a.effect().uses_equality())
        || domain
            .derived_predicates()
            .iter()
            .any(|dp| dp.condition().uses_equality());
    if equality_used && !domain.requirements().contains(&Requirement::Equality) {
        return Err(missing("equality", Requirement::Equality));
    }

    if !domain.derived_predicates().is_empty()
        && !domain
            .requirements()
            .contains(&Requirement::DerivedPredicates)
    {
        return Err(missing("derived predicates", Requirement::DerivedPredicates));
    }

    Ok(())
}

pub(super) fn check_problem(problem: &Problem) -> Result<(), ValidationError> {
    let typing_used = problem.objects().iter().any(|o| !o.type_tags().is_empty())
        || binds_typed(problem.goal())
        || problem.init().iter().any(binds_typed);
    if typing_used && !problem.requirements().contains(&Requirement::Typing) {
        return Err(missing("typing", Requirement::Typing));
    }

    let equality_used =
        problem.goal().uses_equality() || problem.init().iter().any(|f| f.uses_equality());
    if equality_used && !problem.requirements().contains(&Requirement::Equality) {
        return Err(missing("equality", Requirement::Equality));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Action, Predicate};
    use crate::formula::Formula;
    use crate::term::{Constant, Variable};
    use crate::types::TypeHierarchy;
    use crate::Domain;

    #[test]
    fn typed_constant_without_typing_flag_is_rejected() {
        let types: TypeHierarchy = [("t1", None::<&str>)].into_iter().collect();
        let err = Domain::try_new(
            "d",
            [],
            types,
            [Constant::with_tag("a", "t1")],
            [],
            [],
            [],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "feature 'typing' requires the ':typing' requirement flag"
        );
    }

    #[test]
    fn equality_in_precondition_needs_equality_flag() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let action = Action::new("a", [x.clone(), y.clone()])
            .with_precondition(Formula::equal_to(x, y));
        let err = Domain::try_new(
            "d",
            [],
            TypeHierarchy::default(),
            [],
            [],
            [],
            [action],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "feature 'equality' requires the ':equality' requirement flag"
        );
    }

    #[test]
    fn derived_predicates_need_their_flag() {
        let p = Predicate::new("p", [] as [crate::term::Term; 0]);
        let dp = crate::ast::DerivedPredicate::new(p, Formula::True);
        let err = Domain::try_new(
            "d",
            [],
            TypeHierarchy::default(),
            [],
            [],
            [dp],
            [],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "feature 'derived predicates' requires the ':derived-predicates' requirement flag"
        );
    }

    #[test]
    fn typed_quantifier_binding_without_typing_flag_is_rejected() {
        let body = Formula::Atomic(Predicate::new(
            "p",
            [crate::term::Term::Variable(Variable::new("x"))],
        ));
        let action = Action::new("a", []).with_precondition(Formula::forall(
            [Variable::with_tag("x", "ghost")],
            body,
        ));
        let err = Domain::try_new(
            "d",
            [],
            TypeHierarchy::default(),
            [],
            [Predicate::new("p", [Variable::new("x")])],
            [],
            [action],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "feature 'typing' requires the ':typing' requirement flag"
        );
    }

    #[test]
    fn declared_flags_license_their_features() {
        let types: TypeHierarchy = [("t1", None::<&str>)].into_iter().collect();
        let d = Domain::try_new(
            "d",
            [Requirement::Typing],
            types,
            [Constant::with_tag("a", "t1")],
            [],
            [],
            [],
        );
        assert!(d.is_ok());
    }
}
