//! The type hierarchy: type name -> optional parent name.
//!
//! `None` means a direct child of the implicit universal root
//! [`OBJECT_TYPE`]. Well-formedness (acyclicity, root invariance,
//! declared parents) is checked by the validator, not on construction.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// The implicit universal root type. Always available; never a subtype.
pub const OBJECT_TYPE: &str = "object";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeHierarchy {
    parents: BTreeMap<String, Option<String>>,
    /// First-occurrence declaration order of the type names. Drives
    /// diagnostic ordering only; equality is over the parent edges.
    order: Vec<String>,
}

/// Two hierarchies are equal when their parent edges are, regardless of
/// the order the types were declared in. Re-parsing canonical output
/// yields sorted declaration order, so the round-trip law needs this.
impl PartialEq for TypeHierarchy {
    fn eq(&self, other: &Self) -> bool {
        self.parents == other.parents
    }
}

impl Eq for TypeHierarchy {}

impl TypeHierarchy {
    pub fn new(parents: BTreeMap<String, Option<String>>) -> Self {
        let order = parents.keys().cloned().collect();
        TypeHierarchy { parents, order }
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn contains(&self, ty: &str) -> bool {
        self.parents.contains_key(ty)
    }

    /// Declared parent of `ty`: `Some(None)` means a root child,
    /// `None` means `ty` is not declared.
    pub fn parent(&self, ty: &str) -> Option<&Option<String>> {
        self.parents.get(ty)
    }

    /// Type names in the order they were declared.
    pub fn declaration_order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Entries sorted by type name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.parents
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Every name the hierarchy mentions: declared types plus referenced
    /// parents. This is the availability set for type-tag checks
    /// ([`OBJECT_TYPE`] is implicitly available on top of it).
    pub fn all_type_names(&self) -> BTreeSet<String> {
        let mut names: BTreeSet<String> = self.parents.keys().cloned().collect();
        names.extend(self.parents.values().flatten().cloned());
        names
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Option<V>)> for TypeHierarchy {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut hierarchy = TypeHierarchy::default();
        for (ty, parent) in iter {
            let ty = ty.into();
            if !hierarchy.parents.contains_key(&ty) {
                hierarchy.order.push(ty.clone());
            }
            hierarchy.parents.insert(ty, parent.map(Into::into));
        }
        hierarchy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_type_names_includes_referenced_parents() {
        let h: TypeHierarchy = [("car", Some("vehicle")), ("truck", Some("vehicle"))]
            .into_iter()
            .collect();
        let names = h.all_type_names();
        assert!(names.contains("car"));
        assert!(names.contains("vehicle"));
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn iter_is_sorted_by_type_name() {
        let h: TypeHierarchy = [("b", None::<&str>), ("a", None)].into_iter().collect();
        let keys: Vec<&str> = h.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn declaration_order_is_preserved() {
        let h: TypeHierarchy = [("b", None::<&str>), ("a", None), ("b", None)]
            .into_iter()
            .collect();
        let order: Vec<&str> = h.declaration_order().collect();
        assert_eq!(order, ["b", "a"]);
    }

    #[test]
    fn equality_ignores_declaration_order() {
        let h1: TypeHierarchy = [("b", None::<&str>), ("a", None)].into_iter().collect();
        let h2: TypeHierarchy = [("a", None::<&str>), ("b", None)].into_iter().collect();
        assert_eq!(h1, h2);
    }

    #[test]
    fn parent_distinguishes_root_children_from_undeclared() {
        let h: TypeHierarchy = [("a", None::<&str>)].into_iter().collect();
        assert_eq!(h.parent("a"), Some(&None));
        assert_eq!(h.parent("b"), None);
    }
}
