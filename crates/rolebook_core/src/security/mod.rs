//! Credential encoding, authorities and the permission catalog.
//!
//! # Responsibility
//! - Encode and verify passwords through a one-way hash.
//! - Describe authenticated principals and their authority tokens.
//! - Hold the name→permission index used to resolve transfer objects.

pub mod catalog;
pub mod password;
pub mod principal;

pub use catalog::PermissionCatalog;
pub use password::{Argon2PasswordEncoder, EncodeError, PasswordEncoder};
pub use principal::{GrantedAuthority, UserPrincipal};
