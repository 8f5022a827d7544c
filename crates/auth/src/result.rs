use crate::Identity;

/// Outcome of a session validation. Binary: there is no degraded state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationResult {
    Authorized(Identity),
    Unauthorized,
}

impl AuthorizationResult {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }
}
