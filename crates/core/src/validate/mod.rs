//! Semantic validation: requirement gates, type-hierarchy checks, and
//! type-tag resolution over fully-built entities.
//!
//! The checks are pure functions; the aggregate smart constructors invoke
//! them so that no invalid `Domain` or `Problem` is ever observable.
//! Ordering matters: requirement gates run first, then the hierarchy
//! checks (type-tag resolution needs an acyclic, rooted hierarchy), then
//! the per-context tag checks.

mod hierarchy;
mod requirements;
mod terms;

pub(crate) use terms::merge_terms;

use crate::ast::{Domain, Problem};
use crate::error::PddlError;

/// Run every domain-level check.
pub fn validate_domain(domain: &Domain) -> Result<(), PddlError> {
    requirements::check_domain(domain)?;
    hierarchy::check(domain.types())?;
    terms::check_domain_type_tags(domain)?;
    Ok(())
}

/// Run every problem-level check that does not need the domain.
pub fn validate_problem(problem: &Problem) -> Result<(), PddlError> {
    requirements::check_problem(problem)?;
    Ok(())
}

/// Check a problem's objects against the type hierarchy of a concrete
/// domain.
pub fn validate_problem_against_domain(
    problem: &Problem,
    domain: &Domain,
) -> Result<(), PddlError> {
    terms::check_objects(problem, domain.types())?;
    Ok(())
}
