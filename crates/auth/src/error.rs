use thiserror::Error;

/// Why a validation attempt did not produce an identity.
///
/// Diagnostic only: every variant collapses to
/// [`AuthorizationResult::Unauthorized`](crate::AuthorizationResult) before it
/// reaches a gate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("auth service unreachable: {0}")]
    RemoteUnreachable(String),

    #[error("auth service rejected the session (status {status})")]
    RemoteRejected { status: u16 },

    #[error("malformed auth service response: {0}")]
    MalformedResponse(String),

    #[error("no session cookie on request")]
    MissingCredentials,
}

impl ValidationError {
    /// Stable short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RemoteUnreachable(_) => "remote_unreachable",
            Self::RemoteRejected { .. } => "remote_rejected",
            Self::MalformedResponse(_) => "malformed_response",
            Self::MissingCredentials => "missing_credentials",
        }
    }
}
