use std::sync::Arc;

use backstage_auth::{Identity, SessionValidator};

/// Shared handle to the process-wide session validator.
///
/// Inserted as a request extension; RouteGuard and the local validation
/// endpoint read it from there.
#[derive(Clone)]
pub struct AuthState {
    validator: Arc<dyn SessionValidator>,
}

impl AuthState {
    pub fn new(validator: Arc<dyn SessionValidator>) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &dyn SessionValidator {
        self.validator.as_ref()
    }
}

/// Identity resolved by EdgeGate for the current page load.
///
/// A rendering convenience only. API handlers must authorize through
/// [`Authenticated`](crate::guard::Authenticated), never through this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeIdentity(pub Identity);

