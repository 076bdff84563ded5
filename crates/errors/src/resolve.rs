//! Bundle-root resolution error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("cannot determine own executable path via {mechanism}: {message}")]
    SelfPathUnavailable { mechanism: String, message: String },

    #[error("executable path is not absolute: {path}")]
    RelativePath { path: String },

    #[error("cannot ascend {levels} level(s) from {path}")]
    NoParent { path: String, levels: usize },

    #[error("path exceeds {limit} bytes: {path}")]
    PathTooLong { path: String, limit: usize },
}

impl UserFacingError for ResolveError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::SelfPathUnavailable { .. } => {
                Some("Run the tool from inside an installed bundle on a supported platform.")
            }
            Self::RelativePath { .. } => Some("Pass an absolute executable path."),
            Self::NoParent { .. } => {
                Some("The executable is not inside the expected bundle directory layout.")
            }
            Self::PathTooLong { .. } => Some("Install the bundle under a shorter directory."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::SelfPathUnavailable { .. } => "resolve.self_path_unavailable",
            Self::RelativePath { .. } => "resolve.relative_path",
            Self::NoParent { .. } => "resolve.no_parent",
            Self::PathTooLong { .. } => "resolve.path_too_long",
        };
        Some(code)
    }
}
