//! HTTP application wiring (Axum router + gate layers).
//!
//! - `routes/`: handlers, one file per area
//! - `errors.rs`: consistent error bodies

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use backstage_auth::SessionValidator;

use crate::config::AppConfig;
use crate::context::AuthState;
use crate::middleware::{self, EdgeState};

pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// `validator` is the one instance shared by EdgeGate, RouteGuard and the
/// local validation endpoint.
pub fn build_app(config: &AppConfig, validator: Arc<dyn SessionValidator>) -> Router {
    let auth_state = AuthState::new(validator.clone());
    let edge_state = EdgeState::new(validator, config);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .fallback(errors::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    edge_state,
                    middleware::edge_gate,
                ))
                .layer(Extension(auth_state)),
        )
}
