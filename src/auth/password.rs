//! Password Hashing
//! Mission: One-way salted hashing of account credentials

use anyhow::{Context, Result};
use bcrypt::{hash, verify};

/// Fixed bcrypt work factor for all stored credentials.
pub const HASH_COST: u32 = 11;

/// Hash a plaintext password with a per-call random salt.
///
/// Callers must reject blank passwords before hashing; an empty string hashes
/// like any other input.
pub fn hash_password(plaintext: &str) -> Result<String> {
    hash(plaintext, HASH_COST).context("Failed to hash password")
}

/// Check a plaintext password against a stored digest.
pub fn verify_password(plaintext: &str, digest: &str) -> Result<bool> {
    verify(plaintext, digest).context("Failed to verify password")
}
