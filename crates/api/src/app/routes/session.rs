use axum::{Extension, Json, http::HeaderMap};

use backstage_auth::{Identity, SessionStatus};

use crate::context::AuthState;
use crate::guard::Authenticated;
use crate::middleware::extract_credentials;

/// Local validation endpoint used by the client session context.
///
/// Public on purpose: it answers "who am I" with `authenticated: false`
/// rather than a 401, mirroring the remote service's shape.
pub async fn validate(
    Extension(auth): Extension<AuthState>,
    headers: HeaderMap,
) -> Json<SessionStatus> {
    let credentials = extract_credentials(&headers);
    Json(SessionStatus::from(auth.validator().validate(&credentials).await))
}

/// Current caller, as seen by RouteGuard.
pub async fn me(Authenticated(identity): Authenticated) -> Json<Identity> {
    Json(identity)
}
