//! Server configuration (environment-driven, read once in `main`).

use backstage_auth::{AuthConfig, ConfigError, Deployment};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PUBLIC_PATHS: &[&str] = &["/api/auth", "/health"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Origin (`scheme://host[:port]`) used to rebuild the URL a visitor asked
    /// for when sending them to sign in. Falls back to the `Host` header.
    pub public_origin: Option<String>,
    /// Path prefixes EdgeGate never checks.
    pub public_paths: Vec<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            public_origin: None,
            public_paths: DEFAULT_PUBLIC_PATHS.iter().map(|p| p.to_string()).collect(),
            auth,
        }
    }

    pub fn with_public_origin(mut self, origin: impl Into<String>) -> Self {
        self.public_origin = Some(origin.into().trim_end_matches('/').to_string());
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth = AuthConfig::from_lookup(&lookup)?;

        let bind_addr = lookup("BIND_ADDR")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        if bind_addr.is_empty() {
            return Err(ConfigError::Empty("BIND_ADDR"));
        }

        let public_origin = match lookup("PUBLIC_ORIGIN") {
            Some(raw) if !raw.trim().is_empty() => {
                let origin = raw.trim().trim_end_matches('/');
                if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                    return Err(ConfigError::InvalidUrl {
                        name: "PUBLIC_ORIGIN",
                        value: raw,
                    });
                }
                Some(origin.to_string())
            }
            _ => None,
        };

        let public_paths = match lookup("EDGE_PUBLIC_PATHS") {
            Some(raw) => parse_path_list(&raw),
            None => DEFAULT_PUBLIC_PATHS.iter().map(|p| p.to_string()).collect(),
        };

        Ok(Self {
            bind_addr,
            public_origin,
            public_paths,
            auth,
        })
    }

    /// Whether sign-in redirect targets are built from the client's `Host` header.
    pub fn trusts_host_header(&self) -> bool {
        self.public_origin.is_none()
    }

    pub fn log_summary(&self) {
        self.auth.log_summary();
        tracing::info!(
            bind_addr = %self.bind_addr,
            public_origin = self.public_origin.as_deref(),
            public_paths = ?self.public_paths,
            "server configuration loaded"
        );
        if self.trusts_host_header() && self.auth.deployment == Deployment::Production {
            tracing::warn!("PUBLIC_ORIGIN is unset in production; sign-in redirects echo the Host header");
        }
    }
}

fn parse_path_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|p| p.trim().trim_end_matches('/'))
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.starts_with('/') {
                p.to_string()
            } else {
                format!("/{p}")
            }
        })
        .collect()
}
