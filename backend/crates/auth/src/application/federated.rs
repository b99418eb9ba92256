//! Federated Login Use Case
//!
//! Google sign-in is reserved but not implemented; both endpoints answer
//! 501 and only the message tells whether client settings exist.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

pub struct FederatedLoginUseCase {
    config: Arc<AuthConfig>,
}

impl FederatedLoginUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn start(&self) -> AuthResult<()> {
        if !self.config.federated.is_configured() {
            return Err(AuthError::FederatedNotConfigured);
        }
        Err(AuthError::FederatedNotImplemented)
    }

    pub fn callback(&self) -> AuthResult<()> {
        Err(AuthError::FederatedNotImplemented)
    }
}
