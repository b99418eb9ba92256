//! Cryptographic Utilities

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Bytes of randomness in a password salt.
pub const SALT_BYTES: usize = 16;
/// Bytes of randomness in a session token.
pub const TOKEN_BYTES: usize = 32;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}

/// Lowercase hex of `len` random bytes.
pub fn random_hex(len: usize) -> String {
    hex::encode(random_bytes(len))
}

/// Per-user password salt (16 random bytes, hex).
pub fn generate_salt() -> String {
    random_hex(SALT_BYTES)
}

/// Raw session token handed to the client (32 random bytes, hex).
pub fn generate_token() -> String {
    random_hex(TOKEN_BYTES)
}

/// Digest persisted in place of a session token: `hex(sha256(token ‖ secret))`.
pub fn hash_token(token: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_digest_of_concatenation() {
        assert_eq!(
            hash_token("hel", "lo"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_hash_token_depends_on_secret() {
        let token = generate_token();
        assert_ne!(hash_token(&token, "a"), hash_token(&token, "b"));
        assert_eq!(hash_token(&token, "a"), hash_token(&token, "a"));
    }

    #[test]
    fn test_generated_lengths() {
        assert_eq!(generate_salt().len(), 32);
        assert_eq!(generate_token().len(), 64);
        assert!(generate_token().bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_differ() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abcd", b"abcd"));
        assert!(!constant_time_eq(b"abcd", b"abce"));
        assert!(!constant_time_eq(b"abcd", b"abc"));
    }
}
