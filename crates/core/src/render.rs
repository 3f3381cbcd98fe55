//! Canonical text rendering for validated domains and problems.
//!
//! Collections without inherent order print sorted by their canonical
//! string, so a given entity always renders identically regardless of
//! construction order, and re-parsing the output yields a structurally
//! equal entity.

use crate::ast::{Action, Domain, Problem};
use crate::formula::Formula;

const INDENT: &str = "    ";

pub fn render_domain(domain: &Domain) -> String {
    let mut body = String::new();

    push_sorted_section(
        &mut body,
        ":requirements",
        domain.requirements().iter().map(ToString::to_string),
    );

    if !domain.types().is_empty() {
        let entries: Vec<String> = domain
            .types()
            .iter()
            .map(|(ty, parent)| match parent {
                Some(p) => format!("{} - {}", ty, p),
                None => ty.to_owned(),
            })
            .collect();
        body.push_str(&format!("(:types {})\n", entries.join(" ")));
    }

    push_sorted_section(
        &mut body,
        ":constants",
        domain.constants().iter().map(|c| c.typed()),
    );
    push_sorted_section(
        &mut body,
        ":predicates",
        domain.predicates().iter().map(|p| p.typed_signature()),
    );

    let mut derived: Vec<String> = domain
        .derived_predicates()
        .iter()
        .map(ToString::to_string)
        .collect();
    derived.sort();
    for d in derived {
        body.push_str(&d);
        body.push('\n');
    }

    let mut actions: Vec<String> = domain.actions().iter().map(render_action).collect();
    actions.sort();
    for a in actions {
        body.push_str(&a);
        body.push('\n');
    }

    let result = format!("(define (domain {})\n{}\n)", domain.name(), indent(&body));
    remove_empty_lines(&result)
}

pub fn render_problem(problem: &Problem) -> String {
    let mut body = format!("(:domain {})\n", problem.domain_name());

    push_sorted_section(
        &mut body,
        ":requirements",
        problem.requirements().iter().map(ToString::to_string),
    );
    push_sorted_section(
        &mut body,
        ":objects",
        problem.objects().iter().map(|o| o.typed()),
    );
    push_sorted_section(
        &mut body,
        ":init",
        problem.init().iter().map(ToString::to_string),
    );

    if problem.goal() != &Formula::True {
        body.push_str(&format!("(:goal {})\n", problem.goal()));
    }

    let result = format!(
        "(define (problem {})\n{}\n)",
        problem.name(),
        indent(&body)
    );
    remove_empty_lines(&result)
}

fn render_action(action: &Action) -> String {
    let params: Vec<String> = action.parameters().iter().map(|v| v.typed()).collect();
    let mut s = format!("(:action {}\n", action.name());
    s.push_str(&format!("{}:parameters ({})\n", INDENT, params.join(" ")));
    if action.precondition() != &Formula::True {
        s.push_str(&format!(
            "{}:precondition {}\n",
            INDENT,
            action.precondition()
        ));
    }
    if action.effect() != &Formula::True {
        s.push_str(&format!("{}:effect {}\n", INDENT, action.effect()));
    }
    s.push(')');
    s
}

/// Append `(<keyword> i1 i2 ...)` with items sorted; empty collections
/// produce nothing.
fn push_sorted_section(out: &mut String, keyword: &str, items: impl Iterator<Item = String>) {
    let mut items: Vec<String> = items.collect();
    if items.is_empty() {
        return;
    }
    items.sort();
    out.push_str(&format!("({} {})\n", keyword, items.join(" ")));
}

fn indent(s: &str) -> String {
    s.lines()
        .map(|line| {
            if line.trim().is_empty() {
                line.to_owned()
            } else {
                format!("{}{}", INDENT, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn remove_empty_lines(s: &str) -> String {
    s.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Predicate;
    use crate::requirements::Requirement;
    use crate::term::{Constant, Term, Variable};
    use crate::types::TypeHierarchy;

    #[test]
    fn empty_domain_renders_header_only() {
        let d = Domain::empty("d");
        assert_eq!(render_domain(&d), "(define (domain d)\n)");
    }

    #[test]
    fn sections_render_sorted() {
        let types: TypeHierarchy = [("block", None::<&str>)].into_iter().collect();
        let d = Domain::try_new(
            "d",
            [Requirement::Typing, Requirement::Strips],
            types,
            [Constant::new("b"), Constant::with_tag("a", "block")],
            [
                Predicate::new("q", [] as [Term; 0]),
                Predicate::new("p", [Variable::with_tag("x", "block")]),
            ],
            [],
            [],
        )
        .unwrap();
        let text = render_domain(&d);
        assert_eq!(
            text,
            "(define (domain d)\n\
             \x20   (:requirements :strips :typing)\n\
             \x20   (:types block)\n\
             \x20   (:constants a - block b)\n\
             \x20   (:predicates (p ?x - block) (q))\n\
             )"
        );
    }

    #[test]
    fn type_parents_render_as_child_dash_parent() {
        let types: TypeHierarchy = [("car", Some("vehicle")), ("vehicle", None)]
            .into_iter()
            .collect();
        let d = Domain::try_new(
            "d",
            [Requirement::Typing],
            types,
            [],
            [],
            [],
            [],
        )
        .unwrap();
        assert!(render_domain(&d).contains("(:types car - vehicle vehicle)"));
    }

    #[test]
    fn action_omits_trivial_precondition() {
        let a = crate::ast::Action::new("noop", []);
        let rendered = render_action(&a);
        assert_eq!(rendered, "(:action noop\n    :parameters ()\n)");
    }

    #[test]
    fn true_goal_is_omitted() {
        let p = Problem::try_new("p", "d", [], [], [], Formula::True).unwrap();
        assert_eq!(
            render_problem(&p),
            "(define (problem p)\n    (:domain d)\n)"
        );
    }
}
