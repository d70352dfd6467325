//! Entity and transfer models.
//!
//! # Responsibility
//! - Define the persistence records managed by the data-access layer.
//! - Define transfer shapes exchanged at the service boundary.
//!
//! # Invariants
//! - Identities are assigned by the store; a freshly constructed entity has
//!   `id == None` until it is created.

pub mod name;
pub mod permission;
pub mod person;
pub mod role;
pub mod user;

/// Store-assigned integer identity shared by every entity table.
pub type EntityId = i64;
