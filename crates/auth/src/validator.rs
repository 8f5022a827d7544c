//! The shared session validation capability.
//!
//! EdgeGate, RouteGuard and the local validation endpoint all hold the same
//! `Arc<dyn SessionValidator>`, built once from one [`AuthConfig`](crate::AuthConfig).
//! None of them reads the environment on its own.

use crate::{AuthorizationResult, Credentials, Identity, ValidationError};

/// Resolve request credentials into an identity.
///
/// Implementors only provide [`try_validate`](SessionValidator::try_validate).
/// Callers use [`validate`](SessionValidator::validate), which never fails:
/// every error is logged and collapsed to `Unauthorized`.
#[async_trait::async_trait]
pub trait SessionValidator: Send + Sync {
    /// Single attempt, no retries.
    async fn try_validate(&self, credentials: &Credentials) -> Result<Identity, ValidationError>;

    async fn validate(&self, credentials: &Credentials) -> AuthorizationResult {
        match self.try_validate(credentials).await {
            Ok(identity) => {
                tracing::debug!(user_id = %identity.id, "session validated");
                AuthorizationResult::Authorized(identity)
            }
            Err(ValidationError::MissingCredentials) => {
                tracing::debug!(reason = "missing_credentials", "session rejected");
                AuthorizationResult::Unauthorized
            }
            Err(e) => {
                tracing::warn!(reason = e.kind(), error = %e, "session rejected");
                AuthorizationResult::Unauthorized
            }
        }
    }
}

/// Development bypass: fabricates [`Identity::dev_user`] without any I/O.
///
/// Only constructed when the dev-mode flag is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct DevSessionValidator;

impl DevSessionValidator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl SessionValidator for DevSessionValidator {
    async fn try_validate(&self, _credentials: &Credentials) -> Result<Identity, ValidationError> {
        Ok(Identity::dev_user())
    }
}
