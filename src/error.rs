//! Error types for the Seva portal client.
//!
//! `ApiError` is what a single backend exchange can end in; `PortalError`
//! is the unified type for portal operations that also touch the session
//! store or decode payloads.

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::NormalizedError;
use crate::session::Role;

/// Outcome of a failed API call.
///
/// `AuthRequired` and `SessionRejected` have already redirected to the login
/// page by the time the caller sees them; they are meant to be propagated with
/// `?` rather than shown to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The call needed a credential and none was stored. Nothing was sent.
    #[error("Authentication required")]
    AuthRequired,

    /// The backend rejected the stored credential. The session was cleared.
    #[error("Session rejected by server")]
    SessionRejected,

    /// The backend answered with a handled error payload.
    #[error("{error}")]
    Failed {
        status: StatusCode,
        error: NormalizedError,
    },

    /// Network failure or a response that could not be parsed.
    #[error("{0}")]
    Transport(NormalizedError),
}

impl ApiError {
    /// Whether this failure already navigated away to the login page.
    pub fn is_redirect(&self) -> bool {
        matches!(self, ApiError::AuthRequired | ApiError::SessionRejected)
    }

    /// The user-facing error, if this failure carries one.
    pub fn normalized(&self) -> Option<&NormalizedError> {
        match self {
            ApiError::Failed { error, .. } | ApiError::Transport(error) => Some(error),
            ApiError::AuthRequired | ApiError::SessionRejected => None,
        }
    }

    /// HTTP status of a handled backend failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Failed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Why the session guard refused a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardRejection {
    #[error("No credential stored")]
    MissingToken,

    #[error("Role mismatch: expected {expected}, found {}", .found.as_deref().unwrap_or("none"))]
    RoleMismatch {
        expected: Role,
        found: Option<String>,
    },
}

/// Session store persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Unified error type for portal operations.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Guard(#[from] GuardRejection),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl PortalError {
    /// Whether the failure already redirected to the login page.
    pub fn is_redirect(&self) -> bool {
        match self {
            PortalError::Api(e) => e.is_redirect(),
            PortalError::Guard(_) => true,
            _ => false,
        }
    }
}

/// Result type alias for portal operations.
pub type PortalResult<T> = Result<T, PortalError>;
