//! Request payloads accepted by the HTTP routes.
//!
//! Forms are plain serde structs validated with `validator`; each converts
//! into the matching domain draft through `TryFrom`.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::pagination::PagingError;

pub mod auth;
pub mod brand;
pub mod customer;
pub mod employee;
pub mod query;
pub mod transaction;
pub mod vehicle;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Paging(#[from] PagingError),

    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),

    #[error("invalid vehicle payload: {0}")]
    InvalidJson(String),

    #[error("invalid file name: {0}")]
    InvalidFileName(String),
}
