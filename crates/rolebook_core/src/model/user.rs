//! User entity and its transfer shape.
//!
//! # Invariants
//! - `User::password` always holds an encoded hash, never plaintext.
//! - `UserDto::password` carries plaintext on the way in and the stored hash
//!   on the way out; it is never serialized.

use super::permission::Permission;
use super::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Persistence model for an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Option<EntityId>,
    pub username: String,
    pub password: String,
    pub permissions: HashSet<Permission>,
}

/// Service-boundary shape of [`User`], carrying permission names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Option<EntityId>,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl UserDto {
    /// Creates an unsaved transfer object with plaintext `password`.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        permissions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            password: password.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }
}
