//! Auth configuration, read once at startup and passed explicitly.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_AUTH_SERVER_URL: &str = "http://localhost:4000";
pub const DEFAULT_VALIDATE_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Deployment kind from `NODE_ENV`.
///
/// Informational only: it never toggles the dev bypass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deployment {
    #[default]
    Development,
    Production,
    Test,
}

impl Deployment {
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{name} must be an absolute http(s) URL, got '{value}'")]
    InvalidUrl { name: &'static str, value: String },

    #[error("{name} must be a whole number of milliseconds, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Base URL of the remote auth service, without trailing slash.
    pub auth_server_url: String,
    pub dev_mode: bool,
    /// `None` means the outbound validation call may wait indefinitely.
    pub validate_timeout: Option<Duration>,
    pub deployment: Deployment,
}

impl AuthConfig {
    pub fn new(auth_server_url: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            auth_server_url: normalize_base_url("AUTH_SERVER_URL", auth_server_url.into())?,
            dev_mode: false,
            validate_timeout: Some(DEFAULT_VALIDATE_TIMEOUT),
            deployment: Deployment::default(),
        })
    }

    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    pub fn with_validate_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.validate_timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_server_url = lookup("AUTH_SERVER_URL")
            .unwrap_or_else(|| DEFAULT_AUTH_SERVER_URL.to_string());

        // Only the literal "true" enables the bypass.
        let dev_mode = lookup("AUTH_DEV_MODE")
            .or_else(|| lookup("NEXT_PUBLIC_AUTH_DEV_MODE"))
            .is_some_and(|v| v.trim() == "true");

        let validate_timeout = match lookup("AUTH_VALIDATE_TIMEOUT_MS") {
            None => Some(DEFAULT_VALIDATE_TIMEOUT),
            Some(raw) => {
                let ms: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                    name: "AUTH_VALIDATE_TIMEOUT_MS",
                    value: raw.clone(),
                })?;
                (ms > 0).then(|| Duration::from_millis(ms))
            }
        };

        let deployment = lookup("NODE_ENV")
            .map(|v| Deployment::parse(&v))
            .unwrap_or_default();

        Ok(Self {
            auth_server_url: normalize_base_url("AUTH_SERVER_URL", auth_server_url)?,
            dev_mode,
            validate_timeout,
            deployment,
        })
    }

    /// Remote session validation endpoint.
    pub fn validate_url(&self) -> String {
        format!("{}/api/auth/validate", self.auth_server_url)
    }

    /// Remote sign-out endpoint.
    pub fn sign_out_url(&self) -> String {
        format!("{}/api/auth/sign-out", self.auth_server_url)
    }

    /// Browser sign-in page that bounces back to `original_url` after login.
    pub fn sign_in_url(&self, original_url: &str) -> String {
        format!(
            "{}/sign-in?redirect={}",
            self.auth_server_url,
            urlencoding::encode(original_url)
        )
    }

    /// Log the effective auth configuration once at startup.
    pub fn log_summary(&self) {
        tracing::info!(
            auth_server = %self.auth_server_url,
            dev_mode = self.dev_mode,
            timeout_ms = self.validate_timeout.map(|t| t.as_millis() as u64),
            deployment = ?self.deployment,
            "auth configuration loaded"
        );
        if self.dev_mode && self.deployment == Deployment::Production {
            tracing::warn!("auth dev bypass is enabled in a production deployment");
        }
    }
}

fn normalize_base_url(name: &'static str, raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::Empty(name));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl {
            name,
            value: raw,
        });
    }
    Ok(trimmed.to_string())
}
