//! `backstage-auth`: session validation boundary (fail-closed).
//!
//! This crate is intentionally decoupled from HTTP frameworks and transports.
//! The remote validator lives in `backstage-infra`; the gates that turn an
//! [`AuthorizationResult`] into a redirect or a 401 live in `backstage-api`.

pub mod config;
pub mod credentials;
pub mod error;
pub mod identity;
pub mod result;
pub mod status;
pub mod validator;

pub use config::{AuthConfig, ConfigError, Deployment};
pub use credentials::Credentials;
pub use error::ValidationError;
pub use identity::Identity;
pub use result::AuthorizationResult;
pub use status::SessionStatus;
pub use validator::{DevSessionValidator, SessionValidator};
