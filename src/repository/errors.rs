//! Failures raised by the storage layer.

use std::fmt::{Display, Formatter};

use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No live row matched.
    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    DatabaseError(String),

    /// Rejected input: bad filter or order, stored value out of range, short stock.
    #[error("{0}")]
    ValidationError(String),

    #[error("connection error: {0}")]
    ConnectionError(String),

    /// A database constraint refused the write. `detail` is the raw driver message.
    #[error("{kind} constraint failed: {detail}")]
    ConstraintViolation {
        kind: ConstraintKind,
        detail: String,
    },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl ConstraintKind {
    fn of(kind: &DatabaseErrorKind) -> Option<Self> {
        match kind {
            DatabaseErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
            DatabaseErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
            DatabaseErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
            DatabaseErrorKind::CheckViolation => Some(ConstraintKind::Check),
            _ => None,
        }
    }
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ConstraintKind::Unique => "unique",
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::NotNull => "not null",
            ConstraintKind::Check => "check",
        })
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,

            DieselError::DatabaseError(kind, info) => match ConstraintKind::of(&kind) {
                Some(kind) => RepositoryError::ConstraintViolation {
                    kind,
                    detail: info.message().to_string(),
                },
                None => RepositoryError::DatabaseError(info.message().to_string()),
            },

            DieselError::SerializationError(e)
            | DieselError::DeserializationError(e)
            | DieselError::QueryBuilderError(e) => {
                RepositoryError::ValidationError(format!("invalid value: {e}"))
            }

            DieselError::RollbackTransaction
            | DieselError::AlreadyInTransaction
            | DieselError::NotInTransaction
            | DieselError::BrokenTransactionManager => {
                RepositoryError::DatabaseError(format!("transaction failure: {err}"))
            }

            other => RepositoryError::Unexpected(other.to_string()),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}
