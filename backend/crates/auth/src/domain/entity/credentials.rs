//! Password Credentials
//!
//! Salted, peppered PBKDF2 digest stored next to the user row.

use platform::password::ClearTextPassword;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Hex salt; its UTF-8 bytes are the PBKDF2 salt.
    pub salt: String,
    /// Hex PBKDF2-HMAC-SHA256 output.
    pub hash: String,
}

impl Credentials {
    /// Hash `password` under a fresh salt.
    pub fn issue(password: &ClearTextPassword, pepper: &str) -> Self {
        let (salt, hash) = password.hash_with_new_salt(pepper);
        Self { salt, hash }
    }

    pub fn matches(&self, password: &ClearTextPassword, pepper: &str) -> bool {
        password.verify(&self.salt, pepper, &self.hash)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("salt", &self.salt)
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_match() {
        let password = ClearTextPassword::new("secret1".into(), 4).unwrap();
        let creds = Credentials::issue(&password, "pepper");
        assert_eq!(creds.salt.len(), 32);
        assert!(creds.matches(&password, "pepper"));
        assert!(!creds.matches(&password, "other-pepper"));

        let wrong = ClearTextPassword::new("secret2".into(), 4).unwrap();
        assert!(!creds.matches(&wrong, "pepper"));
    }

    #[test]
    fn test_fresh_salt_each_time() {
        let password = ClearTextPassword::new("secret1".into(), 4).unwrap();
        let a = Credentials::issue(&password, "pepper");
        let b = Credentials::issue(&password, "pepper");
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
    }
}
