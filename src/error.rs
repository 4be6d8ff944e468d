use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("authorization failed: {message}")]
    UpstreamAuth {
        status: Option<u16>,
        message: String,
    },
    #[error("helpdesk error: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("notification error: {0}")]
    Notification(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// Status code reported by the remote side, when the failure came from one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            AppError::UpstreamAuth { status, .. } | AppError::Upstream { status, .. } => *status,
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
