//! Cryptographic functions for the user directory
//!
//! Passwords are hashed with Argon2id over the password and a per-user salt.
//! The salt is stored next to the hash and never changes, so a hash can be
//! recomputed from (password, salt) and compared against the stored value.

use argon2::Argon2;
use base64ct::{Base64, Encoding};
use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroize;

use super::errors::UserError;
use crate::{
    Result,
    constants::{HASH_BYTES, SALT_BYTES},
};

/// Generate a fresh random salt (base64 encoded).
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut bytes);
    Base64::encode_string(&bytes)
}

/// Hash a password with the given salt using Argon2id
///
/// # Arguments
/// * `password` - The plaintext password
/// * `salt` - The user's salt (base64 encoded, from [`generate_salt`])
///
/// # Returns
/// The base64 encoded digest. The same inputs always produce the same output.
pub fn hash_password(password: impl AsRef<str>, salt: impl AsRef<str>) -> Result<String> {
    let salt = Base64::decode_vec(salt.as_ref()).map_err(|e| UserError::HashingFailed {
        reason: format!("Invalid salt encoding: {e}"),
    })?;

    let mut digest = [0u8; HASH_BYTES];
    Argon2::default()
        .hash_password_into(password.as_ref().as_bytes(), &salt, &mut digest)
        .map_err(|e| UserError::HashingFailed {
            reason: format!("Password hashing failed: {e}"),
        })?;

    let encoded = Base64::encode_string(&digest);
    digest.zeroize();
    Ok(encoded)
}

/// Verify a password against a stored hash and salt
///
/// # Returns
/// Ok(()) if the password is correct, `UserError::InvalidCredentials` otherwise
pub fn verify_password(
    password: impl AsRef<str>,
    salt: impl AsRef<str>,
    password_hash: impl AsRef<str>,
) -> Result<()> {
    let attempt = hash_password(password, salt)?;
    if constant_time_eq(attempt.as_bytes(), password_hash.as_ref().as_bytes()) {
        Ok(())
    } else {
        Err(UserError::InvalidCredentials.into())
    }
}

/// Constant-time byte comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
