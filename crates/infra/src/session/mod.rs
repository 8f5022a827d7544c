//! Session validation adapters.
//!
//! [`session_validator`] is the single place that turns an [`AuthConfig`] into
//! the validator every gate shares, so the dev-mode flag cannot diverge
//! between call sites.

use std::sync::Arc;

use backstage_auth::{AuthConfig, DevSessionValidator, SessionValidator};

pub mod remote;

pub use remote::{RemoteSessionValidator, SessionClientError};

/// Build the process-wide session validator for a deployment.
pub fn session_validator(config: &AuthConfig) -> Result<Arc<dyn SessionValidator>, SessionClientError> {
    if config.dev_mode {
        tracing::warn!("auth dev bypass enabled; every request resolves to the dev user");
        return Ok(Arc::new(DevSessionValidator::new()));
    }

    Ok(Arc::new(RemoteSessionValidator::new(config)?))
}
