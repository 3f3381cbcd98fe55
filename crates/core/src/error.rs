//! Error types for parsing and validation.
//!
//! Every failure is a value: the lexer and parser produce [`SyntaxError`]s
//! carrying the offending position, the validator produces one of the
//! closed [`ValidationError`] kinds, and both unify under [`PddlError`]
//! at the library boundary. Identical invalid input always produces an
//! identical message.

use serde::Serialize;

/// Render a tag list as `'t1', 't2'` (sorted order is the caller's job).
fn quote_join(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("'{}'", s))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A lexing or parsing failure, positioned in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{file}:{line}:{column}: {message}")]
pub struct SyntaxError {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl SyntaxError {
    pub fn new(file: &str, line: u32, column: u32, message: impl Into<String>) -> Self {
        SyntaxError {
            file: file.to_owned(),
            line,
            column,
            message: message.into(),
        }
    }
}

/// A semantic check failure. The set of kinds is closed; each carries the
/// data its message is built from so callers can branch without string
/// matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum ValidationError {
    /// The parent-edge graph of the type hierarchy contains a cycle.
    /// `path` is the walk in declaration order, without the closing repeat.
    #[error("cycle detected in the type hierarchy: {}", .path.join(" -> "))]
    TypeHierarchyCycle { path: Vec<String> },

    /// `object` is the universal root and may never be declared a subtype.
    #[error("object must not have supertypes, but got 'object' is a subtype of '{parent}'")]
    ObjectSupertype { parent: String },

    /// A declared type references a parent that is neither declared nor `object`.
    #[error("parent type '{parent}' of type '{ty}' is not a declared type")]
    UndeclaredParentType { ty: String, parent: String },

    /// A term carries type tags outside the declared type set. `subject`
    /// pinpoints the failing declaration context.
    #[error("types [{}] of {subject} are not in available types {{{}}}", quote_join(.tags), quote_join(.available))]
    TypesNotAvailable {
        tags: Vec<String>,
        subject: String,
        available: Vec<String>,
    },

    /// The same term name was declared twice with conflicting type tags.
    #[error("Term {name} occurred twice with different type tags: previous type tags [{}], new type tags [{}]", quote_join(.previous), quote_join(.new))]
    DuplicateTerm {
        name: String,
        previous: Vec<String>,
        new: Vec<String>,
    },

    /// A language feature was used without its licensing requirement flag.
    #[error("feature '{feature}' requires the '{flag}' requirement flag")]
    MissingRequirement { feature: String, flag: String },
}

/// Library-level error: either the text was malformed or the resulting
/// structure failed a semantic check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum PddlError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl PddlError {
    /// Serialize to a stable JSON shape for machine-readable CLI output.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            PddlError::Syntax(e) => serde_json::json!({
                "kind": "syntax",
                "file": e.file,
                "line": e.line,
                "column": e.column,
                "message": e.message,
            }),
            PddlError::Validation(e) => serde_json::json!({
                "kind": "validation",
                "message": e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_display_includes_position() {
        let e = SyntaxError::new("dom.pddl", 3, 14, "unexpected token ')'");
        assert_eq!(e.to_string(), "dom.pddl:3:14: unexpected token ')'");
    }

    #[test]
    fn cycle_message_omits_closing_repeat() {
        let e = ValidationError::TypeHierarchyCycle {
            path: vec!["A".into(), "B".into(), "C".into()],
        };
        assert_eq!(
            e.to_string(),
            "cycle detected in the type hierarchy: A -> B -> C"
        );
    }

    #[test]
    fn types_not_available_message_quotes_tags() {
        let e = ValidationError::TypesNotAvailable {
            tags: vec!["t1".into()],
            subject: "terms".into(),
            available: vec!["my_type".into()],
        };
        assert_eq!(
            e.to_string(),
            "types ['t1'] of terms are not in available types {'my_type'}"
        );
    }

    #[test]
    fn duplicate_term_message_lists_both_tag_sets() {
        let e = ValidationError::DuplicateTerm {
            name: "a".into(),
            previous: vec!["t1".into()],
            new: vec!["t2".into()],
        };
        assert_eq!(
            e.to_string(),
            "Term a occurred twice with different type tags: previous type tags ['t1'], new type tags ['t2']"
        );
    }

    #[test]
    fn json_value_carries_syntax_position() {
        let e = PddlError::Syntax(SyntaxError::new("p.pddl", 1, 2, "boom"));
        let v = e.to_json_value();
        assert_eq!(v["kind"], "syntax");
        assert_eq!(v["line"], 1);
        assert_eq!(v["column"], 2);
    }
}
