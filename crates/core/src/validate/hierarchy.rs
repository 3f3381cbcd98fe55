//! Type-hierarchy well-formedness: root invariance, acyclicity, and
//! declared parents.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{TypeHierarchy, OBJECT_TYPE};

pub(super) fn check(types: &TypeHierarchy) -> Result<(), ValidationError> {
    if let Some(Some(parent)) = types.parent(OBJECT_TYPE) {
        return Err(ValidationError::ObjectSupertype {
            parent: parent.clone(),
        });
    }

    check_acyclic(types)?;

    for (ty, parent) in types.iter() {
        if let Some(p) = parent {
            if p != OBJECT_TYPE && !types.contains(p) {
                return Err(ValidationError::UndeclaredParentType {
                    ty: ty.to_owned(),
                    parent: p.to_owned(),
                });
            }
        }
    }

    Ok(())
}

/// Iterative parent-walk from every declared type, in declaration order
/// so the reported cycle path follows the source. Types proven acyclic on
/// one walk are skipped on later walks, keeping the pass linear in
/// types + edges.
fn check_acyclic(types: &TypeHierarchy) -> Result<(), ValidationError> {
    let mut acyclic: HashSet<&str> = HashSet::new();

    for start in types.declaration_order() {
        if acyclic.contains(start) {
            continue;
        }
        let mut path: Vec<&str> = vec![start];
        let mut on_path: HashSet<&str> = HashSet::from([start]);
        let mut cur = start;
        while let Some(Some(parent)) = types.parent(cur) {
            if acyclic.contains(parent.as_str()) {
                break;
            }
            if on_path.contains(parent.as_str()) {
                return Err(ValidationError::TypeHierarchyCycle {
                    path: path.into_iter().map(str::to_owned).collect(),
                });
            }
            on_path.insert(parent);
            path.push(parent);
            cur = parent;
        }
        acyclic.extend(path);
    }

    Ok(())
}
