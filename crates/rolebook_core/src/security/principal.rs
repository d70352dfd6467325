//! Authenticated principal model.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Named capability token granted to a principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantedAuthority(String);

impl GrantedAuthority {
    pub fn new(authority: impl Into<String>) -> Self {
        Self(authority.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for GrantedAuthority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Principal assembled for authentication checks.
///
/// `password` is the stored encoded hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPrincipal {
    pub username: String,
    pub password: String,
    pub authorities: Vec<GrantedAuthority>,
}

impl UserPrincipal {
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities
            .iter()
            .any(|granted| granted.as_str() == authority)
    }
}
