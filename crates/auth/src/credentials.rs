/// Raw `Cookie` header value extracted from an inbound request.
///
/// Opaque to this crate: it is never parsed, only forwarded verbatim to the
/// auth service. A request without a cookie header yields empty credentials.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    pub fn new(cookie_header: impl Into<String>) -> Self {
        Self(cookie_header.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

// Cookie values are session secrets; keep them out of logs.
impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Credentials")
            .field(&format_args!("<{} bytes>", self.0.len()))
            .finish()
    }
}

impl From<&str> for Credentials {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Credentials {
    fn from(value: String) -> Self {
        Self(value)
    }
}
