//! Session Entity
//!
//! A server-side login session. The cookie holds a random token; only
//! `hash_token(token, secret)` is stored, so a leaked table cannot be
//! replayed as cookies.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{SessionId, UserId};

/// Session entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// A freshly issued session and the clear token for the cookie.
pub struct IssuedSession {
    pub session: Session,
    pub token: String,
}

impl Session {
    /// Issue a session valid for `ttl` from `now`.
    pub fn issue(user_id: UserId, ttl: Duration, secret: &str, now: DateTime<Utc>) -> IssuedSession {
        let token = platform::crypto::generate_token();
        let session = Self {
            id: SessionId::new(),
            user_id,
            token_hash: platform::crypto::hash_token(&token, secret),
            expires_at: now + ttl,
            created_at: now,
            last_seen_at: now,
        };
        IssuedSession { session, token }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_stores_only_hash() {
        let now = Utc::now();
        let issued = Session::issue(UserId::new(), Duration::days(45), "secret", now);
        assert_eq!(issued.token.len(), 64);
        assert_ne!(issued.session.token_hash, issued.token);
        assert_eq!(
            issued.session.token_hash,
            platform::crypto::hash_token(&issued.token, "secret")
        );
        assert_eq!(issued.session.expires_at, now + Duration::days(45));
    }
}
