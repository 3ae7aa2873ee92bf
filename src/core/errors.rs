use std::path::PathBuf;

use serde::Serialize;

/// Category of a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Transport failure: DNS, connection refused, TLS, timeout.
    Network,
    /// The service answered with a non-2xx status.
    Status,
    /// The body was not the JSON shape we expected.
    Decode,
}

/// Uniform error returned by every remote-call wrapper.
///
/// Expected failure paths (bad key, service down, odd payload) travel as
/// values of this type instead of panics, so callers can decide whether a
/// failure is fatal or merely marks one account as broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Prefix the message with the operation that failed, keeping the kind.
    pub fn context(self, operation: &str) -> Self {
        Self {
            kind: self.kind,
            message: format!("{operation}: {}", self.message),
        }
    }
}

/// Result alias for remote calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// All domain errors for cdnwatch.
#[derive(Debug, thiserror::Error)]
pub enum CdnwatchError {
    #[error(
        "API key '{id}' not found\n\n  \
         Run 'cdnwatch keys list' to see the stored keys and their ids."
    )]
    CredentialNotFound { id: String },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(
        "API key was rejected: {reason}\n\n  \
         Check the key in the GCore control panel,\n  \
         or pass --no-verify to store it without testing."
    )]
    KeyRejected { reason: String },

    #[error("Invalid input: {detail}")]
    InvalidInput { detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "Key store error in {path}: {detail}\n\n  \
         The file must contain a JSON array of key records.\n  \
         Fix or remove the file, then add your keys again."
    )]
    StoreError { path: PathBuf, detail: String },

    #[error("Failed to render JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CdnwatchError>;
