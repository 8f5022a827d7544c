//! HTTP API: server wiring, EdgeGate, RouteGuard.

pub mod app;
pub mod config;
pub mod context;
pub mod guard;
pub mod middleware;
