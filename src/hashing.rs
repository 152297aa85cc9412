//! Credential hashing for the account store.
//!
//! `Argon2Hasher` is the default. `LegacyHasher` reproduces the old fast,
//! unsalted scheme so stores written by earlier versions can still be read;
//! it offers no protection against offline guessing.

use std::hash::{DefaultHasher, Hash, Hasher};

use argon2::password_hash::SaltString;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
};
use rand::rngs::OsRng;

use crate::domain::{Error, PasswordHasher};

const MEMORY_COST_KIB: u32 = 19 * 1024;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    fn config() -> Result<Argon2<'static>, argon2::Error> {
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, Error> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Self::config().map_err(|e| Error::Hashing(e.to_string()))?;
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return false;
        };
        match Self::config() {
            Ok(argon2) => argon2.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyHasher;

impl PasswordHasher for LegacyHasher {
    fn hash(&self, password: &str) -> Result<String, Error> {
        let mut hasher = DefaultHasher::new();
        password.hash(&mut hasher);
        Ok(hasher.finish().to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        self.hash(password).is_ok_and(|h| h == stored)
    }
}

#[cfg(test)]
mod tests {
    use super::{Argon2Hasher, LegacyHasher};
    use crate::domain::PasswordHasher;

    #[test]
    fn argon2_hashes_are_salted_and_verify() {
        let a = Argon2Hasher.hash("pw1").unwrap();
        let b = Argon2Hasher.hash("pw1").unwrap();
        assert_ne!(a, b);
        assert!(!a.chars().any(char::is_whitespace));
        assert!(Argon2Hasher.verify("pw1", &a));
        assert!(Argon2Hasher.verify("pw1", &b));
        assert!(!Argon2Hasher.verify("wrong", &a));
    }

    #[test]
    fn argon2_rejects_foreign_hashes() {
        let legacy = LegacyHasher.hash("pw1").unwrap();
        assert!(!Argon2Hasher.verify("pw1", &legacy));
    }

    #[test]
    fn legacy_hash_is_deterministic_digits() {
        let a = LegacyHasher.hash("pw1").unwrap();
        assert_eq!(a, LegacyHasher.hash("pw1").unwrap());
        assert!(a.chars().all(|c| c.is_ascii_digit()));
        assert!(LegacyHasher.verify("pw1", &a));
        assert!(!LegacyHasher.verify("pw2", &a));
    }
}
