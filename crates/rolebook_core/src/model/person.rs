//! Person entity.

use super::name::Name;
use super::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: Option<EntityId>,
    pub name: Name,
}

impl Person {
    /// Creates an unsaved person.
    pub fn new(name: Name) -> Self {
        Self { id: None, name }
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
