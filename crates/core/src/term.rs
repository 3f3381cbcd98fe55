//! Terms: constants (concrete objects) and variables.
//!
//! A term with no type tags is implicitly of type `object`. Tag sets are
//! `BTreeSet`s so iteration and rendering are deterministic.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A domain- or problem-level object.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Constant {
    name: String,
    type_tags: BTreeSet<String>,
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant {
            name: name.into(),
            type_tags: BTreeSet::new(),
        }
    }

    pub fn with_tag(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::with_tags(name, [tag.into()])
    }

    pub fn with_tags(
        name: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Constant {
            name: name.into(),
            type_tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_tags(&self) -> &BTreeSet<String> {
        &self.type_tags
    }

    /// Structural form used in diagnostics, e.g. `Constant(a, type_tags=[t1])`.
    pub fn repr(&self) -> String {
        repr("Constant", &self.name, &self.type_tags)
    }

    /// Typed surface form for section rendering, e.g. `a - t1`.
    pub fn typed(&self) -> String {
        typed_form(&self.name, &self.type_tags)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A placeholder bound in action parameters or quantifiers. Renders with
/// the `?` sigil.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    type_tags: BTreeSet<String>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable {
            name: name.into(),
            type_tags: BTreeSet::new(),
        }
    }

    pub fn with_tag(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::with_tags(name, [tag.into()])
    }

    pub fn with_tags(
        name: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Variable {
            name: name.into(),
            type_tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_tags(&self) -> &BTreeSet<String> {
        &self.type_tags
    }

    pub fn repr(&self) -> String {
        repr("Variable", &self.name, &self.type_tags)
    }

    /// Typed surface form for parameter lists, e.g. `?x - (either t1 t2)`.
    pub fn typed(&self) -> String {
        typed_form(&format!("?{}", self.name), &self.type_tags)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

/// Either kind of term, as it appears in predicate signatures and
/// formula bodies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Constant(Constant),
    Variable(Variable),
}

impl Term {
    pub fn name(&self) -> &str {
        match self {
            Term::Constant(c) => c.name(),
            Term::Variable(v) => v.name(),
        }
    }

    pub fn type_tags(&self) -> &BTreeSet<String> {
        match self {
            Term::Constant(c) => c.type_tags(),
            Term::Variable(v) => v.type_tags(),
        }
    }

    pub fn repr(&self) -> String {
        match self {
            Term::Constant(c) => c.repr(),
            Term::Variable(v) => v.repr(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(c) => c.fmt(f),
            Term::Variable(v) => v.fmt(f),
        }
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Term::Constant(c)
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Variable(v)
    }
}

/// Typed surface form: `a`, `a - t`, or `a - (either t1 t2)`.
pub(crate) fn typed_form(base: &str, tags: &BTreeSet<String>) -> String {
    let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
    match tags.len() {
        0 => base.to_owned(),
        1 => format!("{} - {}", base, tags[0]),
        _ => format!("{} - (either {})", base, tags.join(" ")),
    }
}

fn repr(kind: &str, name: &str, tags: &BTreeSet<String>) -> String {
    if tags.is_empty() {
        format!("{}({})", kind, name)
    } else {
        let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
        format!("{}({}, type_tags=[{}])", kind, name, tags.join(", "))
    }
}

/// Build untyped constants from a whitespace-separated name list.
pub fn constants(names: &str) -> Vec<Constant> {
    names.split_whitespace().map(Constant::new).collect()
}

/// Build untyped variables from a whitespace-separated name list.
pub fn variables(names: &str) -> Vec<Variable> {
    names.split_whitespace().map(Variable::new).collect()
}
