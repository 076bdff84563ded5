//! Placeholder patching error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum PatchError {
    #[error("cannot open {path} for reading: {message}")]
    CannotOpenSource { path: String, message: String },

    #[error("cannot open temporary file in {dir} for writing: {message}")]
    CannotOpenDestination { dir: String, message: String },

    #[error(
        "replacement for {path} is {replacement_len} bytes but the reserved field is {pattern_len} bytes"
    )]
    ReplacementTooLong {
        path: String,
        replacement_len: usize,
        pattern_len: usize,
    },

    #[error("empty placeholder pattern for {path}")]
    EmptyPattern { path: String },

    #[error("failed writing patched content for {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("failed to carry permissions over to {path}: {message}")]
    PermissionsFailed { path: String, message: String },

    #[error("failed to publish patched file {path}: {message}")]
    PublishFailed { path: String, message: String },
}

impl UserFacingError for PatchError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::CannotOpenSource { .. } => {
                Some("Check that the bundle was extracted completely and is readable.")
            }
            Self::CannotOpenDestination { .. } | Self::PublishFailed { .. } => {
                Some("The bundle directory must be writable while relocating.")
            }
            Self::ReplacementTooLong { .. } => {
                Some("Install path is longer than the width reserved at build time; rebuild the bundle with a wider placeholder or install to a shorter path.")
            }
            Self::EmptyPattern { .. } => Some("The placeholder table is broken; rebuild the tool."),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::CannotOpenSource { .. } => "patch.cannot_open_source",
            Self::CannotOpenDestination { .. } => "patch.cannot_open_destination",
            Self::ReplacementTooLong { .. } => "patch.replacement_too_long",
            Self::EmptyPattern { .. } => "patch.empty_pattern",
            Self::WriteFailed { .. } => "patch.write_failed",
            Self::PermissionsFailed { .. } => "patch.permissions_failed",
            Self::PublishFailed { .. } => "patch.publish_failed",
        };
        Some(code)
    }
}
