#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the reloc bundle tools
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone for easier handling.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod launch;
pub mod patch;
pub mod resolve;

// Re-export all error types at the root
pub use config::ConfigError;
pub use launch::LaunchError;
pub use patch::PatchError;
pub use resolve::ResolveError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("patch error: {0}")]
    Patch(#[from] PatchError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("launch error: {0}")]
    Launch(#[from] LaunchError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the failure points at a packaging defect rather than the environment
    #[must_use]
    pub fn is_packaging_defect(&self) -> bool {
        matches!(
            self,
            Error::Patch(PatchError::ReplacementTooLong { .. } | PatchError::EmptyPattern { .. })
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(ConfigError::ParseError {
            message: err.to_string(),
        })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {err}"))
    }
}

/// Result type alias for reloc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Resolve(err) => err.user_message(),
            Error::Patch(err) => err.user_message(),
            Error::Config(err) => err.user_message(),
            Error::Launch(err) => err.user_message(),
            Error::Internal(_) => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Resolve(err) => err.user_hint(),
            Error::Patch(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Launch(err) => err.user_hint(),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Resolve(err) => err.is_retryable(),
            Error::Patch(err) => err.is_retryable(),
            Error::Config(err) => err.is_retryable(),
            Error::Launch(err) => err.is_retryable(),
            Error::Internal(_) => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Resolve(err) => err.user_code(),
            Error::Patch(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Launch(err) => err.user_code(),
            Error::Internal(_) => Some("error.internal"),
        }
    }
}
