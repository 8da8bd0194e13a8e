//! Conversions from domain constraint failures into layer errors.
//!
//! Kept outside of `domain` so value objects stay free of repository and
//! service dependencies.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::pagination::PagingError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<PagingError> for ServiceError {
    fn from(val: PagingError) -> Self {
        match val {
            PagingError::InvalidParameter(message) => ServiceError::InvalidParameter(message),
            PagingError::InvalidSort(sort) => ServiceError::InvalidSort(sort),
        }
    }
}

impl From<PagingError> for RepositoryError {
    fn from(val: PagingError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        match val {
            FormError::Paging(err) => err.into(),
            other => ServiceError::Validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_errors_keep_their_kind() {
        let err: ServiceError = PagingError::InvalidSort("ABC".to_string()).into();
        assert!(matches!(err, ServiceError::InvalidSort(ref sort) if sort == "ABC"));
        assert_eq!(err.to_string(), "invalid sort by: ABC");

        let err: ServiceError =
            PagingError::InvalidParameter("Invalid page number".to_string()).into();
        assert!(matches!(err, ServiceError::InvalidParameter(_)));
    }

    #[test]
    fn constraint_errors_become_validation() {
        let err: ServiceError = TypeConstraintError::InvalidEmail.into();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err: RepositoryError = TypeConstraintError::NonPositiveId.into();
        assert!(matches!(err, RepositoryError::ValidationError(_)));
    }
}
