use serde::{Deserialize, Serialize};

use crate::{AuthorizationResult, Identity};

/// Wire body of a session validation endpoint.
///
/// Both the remote auth service and this application's own
/// `/api/auth/validate` speak this shape:
/// `{ "authenticated": bool, "user"?: { id, email, name } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionStatus {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
}

impl SessionStatus {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: Identity) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }
}

impl From<AuthorizationResult> for SessionStatus {
    fn from(value: AuthorizationResult) -> Self {
        match value {
            AuthorizationResult::Authorized(identity) => Self::authenticated(identity),
            AuthorizationResult::Unauthorized => Self::anonymous(),
        }
    }
}
