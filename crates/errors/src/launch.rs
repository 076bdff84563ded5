//! Launch driver error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum LaunchError {
    #[error("exec failed calling {program}: {message}")]
    ExecFailed { program: String, message: String },
}

impl UserFacingError for LaunchError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ExecFailed { .. } => {
                Some("Make sure the bundle is complete and `relocate` has been run after installing it.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::ExecFailed { .. } => Some("launch.exec_failed"),
        }
    }
}
