//! RouteGuard: per-handler authorization for protected API endpoints.
//!
//! Every guarded handler re-validates the session itself. Headers or
//! extensions written by EdgeGate are never consulted here: they could have
//! been forwarded from the client by an intermediate hop.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
    response::Response,
};

use backstage_auth::{AuthorizationResult, Identity};

use crate::app::errors::unauthorized;
use crate::context::AuthState;
use crate::middleware::extract_credentials;

/// Validate the request's session, or produce the standard 401 response.
pub async fn guard(auth: &AuthState, headers: &HeaderMap) -> Result<Identity, Response> {
    let credentials = extract_credentials(headers);

    match auth.validator().validate(&credentials).await {
        AuthorizationResult::Authorized(identity) => Ok(identity),
        AuthorizationResult::Unauthorized => Err(unauthorized()),
    }
}

/// Extractor form of [`guard`].
///
/// Put it first in a handler's arguments: when validation fails the
/// rejection is returned and the handler body never runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated(pub Identity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(auth) = parts.extensions.get::<AuthState>().cloned() else {
            // Misconfigured router: deny rather than guess.
            tracing::error!("AuthState extension missing on guarded route");
            return Err(unauthorized());
        };

        guard(&auth, &parts.headers).await.map(Authenticated)
    }
}
