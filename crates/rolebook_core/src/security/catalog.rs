//! In-memory permission catalog.
//!
//! # Invariants
//! - Built once from the full permission list; immutable afterwards.
//! - Runtime permission changes are not observed until a new catalog is
//!   built and swapped in by its owner.

use crate::model::permission::Permission;
use std::collections::HashMap;

/// Snapshot of every known permission, indexed by name.
#[derive(Debug, Clone, Default)]
pub struct PermissionCatalog {
    ordered: Vec<Permission>,
    by_name: HashMap<String, Permission>,
}

impl PermissionCatalog {
    pub fn new(permissions: Vec<Permission>) -> Self {
        let by_name = permissions
            .iter()
            .map(|permission| (permission.name.clone(), permission.clone()))
            .collect();
        Self {
            ordered: permissions,
            by_name,
        }
    }

    pub fn resolve(&self, name: &str) -> Option<&Permission> {
        self.by_name.get(name)
    }

    /// Every permission in store order.
    pub fn all(&self) -> &[Permission] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
