//! `backstage-client`
//!
//! **Responsibility:** client-side view of the current session.
//!
//! This crate provides:
//! - [`ClientSessionContext`]: one validation at mount, cached identity, logout
//! - [`HttpSessionApi`]: transport to the app's validate endpoint and the
//!   auth service's sign-out
//!
//! The server stays the authority: every protected API call is re-checked
//! there regardless of what this context believes.

pub mod api;
pub mod context;
pub mod navigation;

pub use api::{ClientError, HttpSessionApi, SessionApi};
pub use context::{ClientSessionContext, SessionView};
pub use navigation::Navigator;
