//! Password Hashing and Verification
//!
//! Account passwords are stored as PBKDF2-HMAC-SHA256 digests:
//! - input is the password followed by the server-wide pepper
//! - salt is the user's hex salt string, taken as bytes
//! - 100 000 iterations, 256-bit output, lowercase hex
//!
//! Clear text is zeroized on drop and never printed.

use std::fmt;

use rand::Rng;
use sha2::Sha256;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, generate_salt};

// ============================================================================
// Constants
// ============================================================================

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derived key length in bytes (256 bits)
pub const DERIVED_KEY_LEN: usize = 32;

/// Upper bound on accepted password length (characters)
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Digits in a generated temporary password
pub const TEMP_PASSWORD_DIGITS: usize = 6;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// The minimum length is supplied by the caller because it differs per
/// endpoint (4 for sign-in, 6 for a new password).
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("hunter22".to_string(), 6).unwrap();
/// let salt = platform::crypto::generate_salt();
/// let hash = password.hash(&salt, "pepper");
/// assert!(password.verify(&salt, "pepper", &hash));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String, min_len: usize) -> Result<Self, PasswordPolicyError> {
        let password = Self(raw);

        if password.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = password.0.chars().count();
        if char_count < min_len {
            return Err(PasswordPolicyError::TooShort {
                min: min_len,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if password
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(password)
    }

    /// Fresh 6-digit temporary password handed out at registration.
    pub fn generate_temporary() -> Self {
        let mut rng = rand::rng();
        let digits: String = (0..TEMP_PASSWORD_DIGITS)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect();
        Self(digits)
    }

    /// Reveal the clear text (only for handing a generated password back once).
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn hash(&self, salt: &str, pepper: &str) -> String {
        hash_password(&self.0, salt, pepper)
    }

    pub fn verify(&self, salt: &str, pepper: &str, expected_hex: &str) -> bool {
        verify_password(&self.0, salt, pepper, expected_hex)
    }

    /// Hash under a newly generated salt; returns `(salt, hash)`.
    pub fn hash_with_new_salt(&self, pepper: &str) -> (String, String) {
        let salt = generate_salt();
        let hash = self.hash(&salt, pepper);
        (salt, hash)
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

// ============================================================================
// Free functions
// ============================================================================

fn derive(input: &[u8], salt: &[u8], iterations: u32) -> [u8; DERIVED_KEY_LEN] {
    let mut out = [0u8; DERIVED_KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(input, salt, iterations, &mut out);
    out
}

/// `hex(PBKDF2-HMAC-SHA256(password ‖ pepper, salt, 100_000, 32))`
pub fn hash_password(password: &str, salt: &str, pepper: &str) -> String {
    let mut input = Vec::with_capacity(password.len() + pepper.len());
    input.extend_from_slice(password.as_bytes());
    input.extend_from_slice(pepper.as_bytes());
    let derived = derive(&input, salt.as_bytes(), PBKDF2_ITERATIONS);
    input.zeroize();
    hex::encode(derived)
}

/// Recompute and compare in constant time.
pub fn verify_password(password: &str, salt: &str, pepper: &str, expected_hex: &str) -> bool {
    let candidate = hash_password(password, salt, pepper);
    constant_time_eq(candidate.as_bytes(), expected_hex.as_bytes())
}
