//! EdgeGate: session check in front of every non-public route.
//!
//! Browser navigations that fail validation are redirected to the auth
//! service's sign-in page with the original URL attached, so the user lands
//! back where they started after logging in.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Request, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use backstage_auth::{AuthConfig, AuthorizationResult, Credentials, Identity, SessionValidator};

use crate::config::AppConfig;
use crate::context::EdgeIdentity;

pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");
pub const USER_EMAIL_HEADER: HeaderName = HeaderName::from_static("x-user-email");
pub const USER_NAME_HEADER: HeaderName = HeaderName::from_static("x-user-name");

/// Prefixes served without any session check (framework/static assets).
const ASSET_PREFIXES: &[&str] = &["/_next", "/static"];

#[derive(Clone)]
pub struct EdgeState {
    validator: Arc<dyn SessionValidator>,
    auth: Arc<AuthConfig>,
    bypass: Arc<EdgeBypass>,
    public_origin: Option<Arc<str>>,
}

impl EdgeState {
    pub fn new(validator: Arc<dyn SessionValidator>, config: &AppConfig) -> Self {
        Self {
            validator,
            auth: Arc::new(config.auth.clone()),
            bypass: Arc::new(EdgeBypass::new(config.public_paths.clone())),
            public_origin: config.public_origin.as_deref().map(Arc::from),
        }
    }
}

/// Requests EdgeGate lets through unchecked.
#[derive(Debug, Clone, Default)]
pub struct EdgeBypass {
    public_paths: Vec<String>,
}

impl EdgeBypass {
    pub fn new(public_paths: Vec<String>) -> Self {
        Self { public_paths }
    }

    pub fn is_bypassed(&self, path: &str) -> bool {
        ASSET_PREFIXES
            .iter()
            .any(|prefix| matches_prefix(path, prefix))
            || path.contains('.')
            || self.public_paths.iter().any(|p| matches_prefix(path, p))
    }
}

/// `prefix` itself or anything below it (`/api/auth` matches `/api/auth/x`, not `/api/authz`).
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub async fn edge_gate(
    State(state): State<EdgeState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    if state.bypass.is_bypassed(req.uri().path()) {
        return next.run(req).await;
    }

    // Identity headers are only ever produced here; drop any a client sent.
    strip_identity_headers(req.headers_mut());

    let credentials = extract_credentials(req.headers());

    match state.validator.validate(&credentials).await {
        AuthorizationResult::Unauthorized => {
            let original = original_url(&req, state.public_origin.as_deref());
            tracing::info!(path = %req.uri().path(), "unauthenticated page load; redirecting to sign-in");
            Redirect::temporary(&state.auth.sign_in_url(&original)).into_response()
        }
        AuthorizationResult::Authorized(identity) => {
            req.extensions_mut().insert(EdgeIdentity(identity.clone()));
            let mut res = next.run(req).await;
            attach_identity_headers(res.headers_mut(), &identity);
            res
        }
    }
}

/// Raw `Cookie` header, or empty credentials when absent/unreadable.
pub fn extract_credentials(headers: &HeaderMap) -> Credentials {
    let cookies: Vec<&str> = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    // HTTP/2 clients may split cookies across several header lines.
    Credentials::new(cookies.join("; "))
}

/// URL the visitor asked for, used as the post-login bounce target.
fn original_url(req: &Request<axum::body::Body>, public_origin: Option<&str>) -> String {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    match public_origin {
        Some(origin) => format!("{origin}{path_and_query}"),
        None => {
            let host = req
                .headers()
                .get(header::HOST)
                .and_then(|v| v.to_str().ok())
                .or_else(|| req.uri().authority().map(|a| a.as_str()))
                .unwrap_or("localhost");
            format!("http://{host}{path_and_query}")
        }
    }
}

fn strip_identity_headers(headers: &mut HeaderMap) {
    for name in [USER_ID_HEADER, USER_EMAIL_HEADER, USER_NAME_HEADER] {
        headers.remove(name);
    }
}

fn attach_identity_headers(headers: &mut HeaderMap, identity: &Identity) {
    for (name, value) in [
        (USER_ID_HEADER, identity.id.as_str()),
        (USER_EMAIL_HEADER, identity.email.as_str()),
        (USER_NAME_HEADER, identity.name.as_str()),
    ] {
        match HeaderValue::from_str(value) {
            Ok(v) => {
                headers.insert(name, v);
            }
            Err(_) => tracing::debug!(header = %name, "identity value not representable as header; skipped"),
        }
    }
}
