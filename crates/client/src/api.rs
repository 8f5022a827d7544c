//! Session transport used by [`ClientSessionContext`](crate::ClientSessionContext).

use backstage_auth::{AuthConfig, Credentials, SessionStatus};
use reqwest::header;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0})")]
    Api(u16),
    #[error("parse error: {0}")]
    Parse(String),
}

#[async_trait::async_trait]
pub trait SessionApi: Send + Sync {
    /// Ask the application's own validation endpoint who we are.
    async fn fetch_session(&self) -> Result<SessionStatus, ClientError>;

    /// End the session at the remote auth service.
    async fn sign_out(&self) -> Result<(), ClientError>;
}

/// [`SessionApi`] over HTTP.
///
/// A browser sends cookies on its own; here the session cookie is carried
/// explicitly and attached to both calls.
#[derive(Debug, Clone)]
pub struct HttpSessionApi {
    http: reqwest::Client,
    validate_url: String,
    sign_out_url: String,
    credentials: Credentials,
}

impl HttpSessionApi {
    pub fn new(app_url: &str, auth: &AuthConfig, credentials: Credentials) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = auth.validate_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http,
            validate_url: format!("{}/api/auth/validate", app_url.trim_end_matches('/')),
            sign_out_url: auth.sign_out_url(),
            credentials,
        })
    }

    fn with_cookie(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.credentials.is_empty() {
            req
        } else {
            req.header(header::COOKIE, self.credentials.as_str())
        }
    }
}

#[async_trait::async_trait]
impl SessionApi for HttpSessionApi {
    async fn fetch_session(&self) -> Result<SessionStatus, ClientError> {
        let resp = self
            .with_cookie(self.http.get(&self.validate_url))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ClientError::Api(resp.status().as_u16()));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        let resp = self
            .with_cookie(self.http.post(&self.sign_out_url))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ClientError::Api(resp.status().as_u16()));
        }
        Ok(())
    }
}
