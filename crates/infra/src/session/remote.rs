//! Remote session validation over HTTP.
//!
//! `GET {AUTH_SERVER}/api/auth/validate` with the inbound `Cookie` header
//! forwarded verbatim. Only a 2xx response whose JSON body says
//! `authenticated: true` and carries a `user` resolves to an identity.

use backstage_auth::{
    AuthConfig, Credentials, Identity, SessionStatus, SessionValidator, ValidationError,
};
use reqwest::header;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionClientError {
    #[error("failed to initialize auth http client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct RemoteSessionValidator {
    http: reqwest::Client,
    validate_url: String,
}

impl RemoteSessionValidator {
    pub fn new(config: &AuthConfig) -> Result<Self, SessionClientError> {
        // A 3xx from the auth service is a rejection, never something to follow.
        let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = config.validate_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            validate_url: config.validate_url(),
        })
    }
}

#[async_trait::async_trait]
impl SessionValidator for RemoteSessionValidator {
    async fn try_validate(&self, credentials: &Credentials) -> Result<Identity, ValidationError> {
        if credentials.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }

        let resp = self
            .http
            .get(&self.validate_url)
            .header(header::COOKIE, credentials.as_str())
            .send()
            .await
            .map_err(|e| ValidationError::RemoteUnreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ValidationError::RemoteRejected {
                status: status.as_u16(),
            });
        }

        // Read the body first so a decode failure is not mistaken for a transport one.
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ValidationError::RemoteUnreachable(e.to_string()))?;

        let body: SessionStatus = serde_json::from_slice(&bytes)
            .map_err(|e| ValidationError::MalformedResponse(e.to_string()))?;

        if !body.authenticated {
            return Err(ValidationError::RemoteRejected {
                status: status.as_u16(),
            });
        }

        body.user.ok_or_else(|| {
            ValidationError::MalformedResponse("authenticated response without user".to_string())
        })
    }
}
