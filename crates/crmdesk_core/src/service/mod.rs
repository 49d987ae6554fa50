//! Core use-case services.
//!
//! # Responsibility
//! - Validate caller input before it reaches a store.
//! - Expose entity-specific queries on top of the generic store.
//! - Keep view layers decoupled from store internals.
//!
//! # Invariants
//! - A rejected request never mutates a store.
//! - Services share stores through `Arc`; they hold no state of their own.

pub mod activity_service;
pub mod contact_service;
pub mod deal_service;
pub mod lead_service;
pub mod task_service;

use crate::model::validation::ModelValidationError;
use crate::model::RecordId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error surfaced to callers of the service layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Input failed caller-side validation; nothing was written.
    Validation(ModelValidationError),
    /// Target record does not exist.
    NotFound { kind: &'static str, id: RecordId },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ModelValidationError> for ServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
        }
    }
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
