//! Infrastructure layer: adapters to external services.

pub mod session;

pub use session::{RemoteSessionValidator, SessionClientError, session_validator};
