//! Error types for playlist-bridge.
//!
//! [`TransferError`] is what a transfer run hands back to its caller. The
//! catalogs report [`CatalogError`], which the transfer maps onto the
//! caller-facing taxonomy depending on where in the run it happened.

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::Provider;

/// Failures a transfer run surfaces to its caller.
#[derive(Error, Debug)]
pub enum TransferError {
    /// Bad or missing input. Never retried.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// A credential is absent or was rejected by its catalog.
    #[error("{provider} not authenticated: {message}")]
    Authentication { provider: Provider, message: String },

    /// The source playlist could not be resolved.
    #[error("Playlist not found: {0}")]
    NotFound(String),

    /// A catalog call failed unexpectedly.
    #[error("{provider} request failed: {message}")]
    ExternalService { provider: Provider, message: String },
}

impl TransferError {
    pub fn authentication(provider: Provider, message: impl Into<String>) -> Self {
        TransferError::Authentication {
            provider,
            message: message.into(),
        }
    }

    pub fn external(provider: Provider, err: CatalogError) -> Self {
        TransferError::ExternalService {
            provider,
            message: err.to_string(),
        }
    }
}

/// Failures reported by a source or destination catalog call.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("credential rejected ({0})")]
    Unauthorized(StatusCode),

    #[error("resource not found ({0})")]
    NotFound(StatusCode),

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),

    /// The catalog answered but did not apply the change.
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Failures during an OAuth code exchange or token refresh.
#[derive(Error, Debug)]
pub enum OAuthError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("token endpoint unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token request rejected: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {message}")]
    Invalid { key: &'static str, message: String },
}
