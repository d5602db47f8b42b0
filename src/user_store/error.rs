use std::time::Duration;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("user {0} not found")]
    NotFound(String),
    #[error("Missing fields for add_user: {}", .0.join(", "))]
    MissingField(Vec<String>),
    #[error("User storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

/// Coarse outcome class, enough for a transport layer to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Invalid,
    Internal,
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::MissingField(_) => ErrorKind::Invalid,
            UserError::Storage(_)
            | UserError::ActorCommunicationError(_)
            | UserError::Timeout(_) => ErrorKind::Internal,
        }
    }
}
