use axum::{Router, routing::get};

pub mod pages;
pub mod session;
pub mod system;

/// Pages (behind EdgeGate) and API endpoints (behind RouteGuard).
pub fn router() -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/dashboard", get(pages::dashboard))
        .route("/api/auth/validate", get(session::validate))
        .route("/api/me", get(session::me))
}
