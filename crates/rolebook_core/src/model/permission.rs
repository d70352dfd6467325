//! Permission entity.
//!
//! # Invariants
//! - `name` is unique in the store and acts as the authority token.
//! - Equality and hashing use `name` only, so set membership ignores `id`.

use super::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Permission name that expands to the whole permission catalog.
pub const ADMIN_PERMISSION: &str = "ROLE_ADMIN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    pub id: Option<EntityId>,
    pub name: String,
}

impl Permission {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.name == ADMIN_PERMISSION
    }
}

impl PartialEq for Permission {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Permission {}

impl Hash for Permission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
