//! Use cases invoked by the HTTP routes.
//!
//! Services are plain functions generic over the repository traits they
//! need, so they run against [`crate::repository::DieselRepository`] in
//! production and against mockall doubles in tests.

use thiserror::Error;

use crate::auth::AuthError;
use crate::repository::errors::{ConstraintKind, RepositoryError};

pub mod auth;
pub mod brand;
pub mod customer;
pub mod employee;
pub mod entity;
pub mod transaction;
pub mod vehicle;

pub use entity::Page;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidParameter(String),

    #[error("invalid sort by: {0}")]
    InvalidSort(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound("record not found".to_string()),
            RepositoryError::ValidationError(message) => ServiceError::Validation(message),
            RepositoryError::ConstraintViolation { kind, detail } => {
                log::warn!("Write refused by {kind} constraint: {detail}");
                match kind {
                    ConstraintKind::Unique => {
                        ServiceError::Conflict("record already exists".to_string())
                    }
                    ConstraintKind::ForeignKey => ServiceError::Conflict(
                        "record references a missing or in-use record".to_string(),
                    ),
                    ConstraintKind::NotNull | ConstraintKind::Check => {
                        ServiceError::Validation("value rejected by storage".to_string())
                    }
                }
            }
            other => ServiceError::Storage(other.to_string()),
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken(_) => {
                ServiceError::Unauthorized(err.to_string())
            }
            other => ServiceError::Storage(other.to_string()),
        }
    }
}
