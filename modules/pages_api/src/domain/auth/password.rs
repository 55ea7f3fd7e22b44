//! One-way, salted password hashing.
//!
//! bcrypt embeds a random salt in every hash, so two hashes of the same
//! plaintext never compare equal; verification recovers the salt from the
//! stored blob and uses a constant-time comparison internally.

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String, bcrypt::BcryptError> {
    hash(plain, DEFAULT_COST)
}

/// Check a plaintext password against a stored hash blob.
///
/// A malformed blob fails closed: it verifies false instead of surfacing an
/// error that a caller could mistake for success.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    verify(plain, hashed).unwrap_or(false)
}
