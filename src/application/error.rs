//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{DomainError, GroupKind};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("unknown group: {name} ({kind})")]
    UnknownGroup { name: String, kind: GroupKind },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
