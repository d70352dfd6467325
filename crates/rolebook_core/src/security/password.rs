//! One-way password encoding.
//!
//! # Invariants
//! - `encode` never returns the plaintext.
//! - Each call salts independently, so encoding the same plaintext twice
//!   yields different strings; use `matches` to compare.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Password hashing contract used by the user service.
pub trait PasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, EncodeError>;
    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool;
}

/// Hashing backend failure.
#[derive(Debug)]
pub struct EncodeError(argon2::password_hash::Error);

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "password encoding failed: {}", self.0)
    }
}

impl Error for EncodeError {}

/// Argon2id encoder producing PHC strings.
#[derive(Default)]
pub struct Argon2PasswordEncoder {
    hasher: Argon2<'static>,
}

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, EncodeError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(EncodeError)?;
        Ok(hash.to_string())
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(encoded_password) else {
            return false;
        };
        self.hasher
            .verify_password(raw_password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{Argon2PasswordEncoder, PasswordEncoder};

    #[test]
    fn encoded_value_verifies_and_hides_plaintext() {
        let encoder = Argon2PasswordEncoder::new();
        let encoded = encoder.encode("s3cret").unwrap();

        assert!(!encoded.contains("s3cret"));
        assert!(encoder.matches("s3cret", &encoded));
        assert!(!encoder.matches("other", &encoded));
    }

    #[test]
    fn same_plaintext_encodes_differently() {
        let encoder = Argon2PasswordEncoder::new();
        let first = encoder.encode("s3cret").unwrap();
        let second = encoder.encode("s3cret").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_never_matches() {
        let encoder = Argon2PasswordEncoder::new();
        assert!(!encoder.matches("s3cret", "not-a-phc-string"));
    }
}
