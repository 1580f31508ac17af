//! bcrypt password hashing for account credentials.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::domain::{DomainError, DomainResult};

/// Hash a plaintext password for storage on a `User` record.
pub fn hash_password(password: &str) -> DomainResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| DomainError::Internal(format!("Password hashing failed: {}", e)))
}

/// Check a login attempt against a stored hash. A malformed stored
/// hash counts as a failed match, not an error, so login always
/// answers yes or no.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    verify(password, stored_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies_only_against_itself() {
        let hashed = hash_password("secret123").unwrap();

        assert_ne!(hashed, "secret123");
        assert!(verify_password("secret123", &hashed));
        assert!(!verify_password("secret124", &hashed));
    }

    #[test]
    fn malformed_stored_hash_fails_verification() {
        assert!(!verify_password("secret123", "not-a-bcrypt-hash"));
    }
}
