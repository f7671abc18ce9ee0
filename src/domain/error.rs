//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::GroupKind;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("group not found: {name} ({kind})")]
    GroupNotFound { name: String, kind: GroupKind },

    #[error("duplicate group name: {name} ({kind})")]
    DuplicateName { name: String, kind: GroupKind },

    #[error("cycle detected in group hierarchy: {0}")]
    CycleDetected(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
