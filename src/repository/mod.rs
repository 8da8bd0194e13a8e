//! Storage contracts and their Diesel implementation.
//!
//! Every entity is read and written through the same pair of generic traits,
//! [`EntityReader`] and [`EntityWriter`], implemented once per entity by
//! [`DieselRepository`]. A handful of narrower traits cover lookups that only
//! make sense for some entities.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::Entity;
use crate::domain::brand::Brand;
use crate::domain::employee::{Employee, EmployeeDetails};
use crate::domain::transaction::{NewTransaction, Transaction, TransactionDetails};
use crate::domain::types::{BrandName, Email, EmployeeId, PhoneNumber, UserCredentialId, UserName};
use crate::domain::user::{CredentialDraft, UserCredential};
use crate::pagination::{PagingError, RequestQueryParams, SortDirection};
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Applies `order` to a boxed query, resolving the column by its public name.
///
/// Unknown names fail with [`RepositoryError::ValidationError`]. Rows with equal
/// sort keys are ordered by `id` ascending so pages never overlap.
macro_rules! order_by {
    ($query:expr, $id:expr, $order:expr, $sort:expr, { $($name:literal => $column:expr),+ $(,)? }) => {
        match $order {
            $(
                $name => match $sort {
                    $crate::pagination::SortDirection::Asc => {
                        Ok($query.order($column.asc()).then_order_by($id.asc()))
                    }
                    $crate::pagination::SortDirection::Desc => {
                        Ok($query.order($column.desc()).then_order_by($id.asc()))
                    }
                },
            )+
            other => Err($crate::repository::errors::RepositoryError::ValidationError(format!(
                "unknown order column: {other}"
            ))),
        }
    };
}

pub mod brand;
pub mod customer;
pub mod employee;
pub mod errors;
pub mod file;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod transaction;
pub mod user;
pub mod vehicle;

pub use file::LocalFileStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows preceding `page`.
    pub fn offset(&self) -> i64 {
        let skipped = self.page.saturating_sub(1).saturating_mul(self.per_page);
        i64::try_from(skipped).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// Storage-facing list request.
///
/// Only constructible with a checked [`SortDirection`], so an invalid sort
/// token never reaches a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: BTreeMap<String, String>,
    pub pagination: Pagination,
    pub order_by: String,
    pub sort: SortDirection,
}

impl ListQuery {
    pub fn new(order_by: impl Into<String>, sort: SortDirection) -> Self {
        Self {
            filter: BTreeMap::new(),
            pagination: Pagination {
                page: crate::pagination::DEFAULT_PAGE,
                per_page: crate::pagination::DEFAULT_LIMIT,
            },
            order_by: order_by.into(),
            sort,
        }
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination { page, per_page };
        self
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(crate::pagination::DEFAULT_ORDER, SortDirection::Asc)
    }
}

impl TryFrom<&RequestQueryParams> for ListQuery {
    type Error = PagingError;

    fn try_from(params: &RequestQueryParams) -> Result<Self, Self::Error> {
        let sort = params.query.sort_direction()?;
        Ok(Self {
            filter: params.filter.clone(),
            pagination: Pagination {
                page: params.pagination.page,
                per_page: params.pagination.limit,
            },
            order_by: params.query.order.clone(),
            sort,
        })
    }
}

/// Parses a raw filter value for a typed column.
pub(crate) fn parse_filter<T: std::str::FromStr>(field: &str, value: &str) -> RepositoryResult<T> {
    value.trim().parse().map_err(|_| {
        RepositoryError::ValidationError(format!("invalid value for {field}: {value}"))
    })
}

/// Parses `true`/`false` and `1`/`0` filter values.
pub(crate) fn parse_bool_filter(field: &str, value: &str) -> RepositoryResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(RepositoryError::ValidationError(format!(
            "invalid value for {field}: {value}"
        ))),
    }
}

pub(crate) fn unknown_filter(field: &str) -> RepositoryError {
    RepositoryError::ValidationError(format!("unknown filter field: {field}"))
}

/// Read access shared by every entity.
pub trait EntityReader<T: Entity> {
    /// Returns the live row with `id`, if any.
    fn get(&self, id: T::Id) -> RepositoryResult<Option<T>>;
    /// Returns the total number of rows matching the filter and the requested page.
    fn list(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<T>)>;
}

/// Write access shared by every entity.
pub trait EntityWriter<T: Entity> {
    /// Inserts a draft without id or updates the live row it names.
    ///
    /// Updating a missing row fails with [`RepositoryError::NotFound`].
    fn save(&self, draft: &T::Draft) -> RepositoryResult<T>;
    /// Soft deletes the live row with `id`.
    fn delete(&self, id: T::Id) -> RepositoryResult<()>;
}

pub trait BrandReader {
    fn get_brand_by_name(&self, name: &BrandName) -> RepositoryResult<Option<Brand>>;
}

/// Lookups over the unique contact fields of a person.
pub trait ContactReader<T: Entity> {
    fn get_by_email(&self, email: &Email) -> RepositoryResult<Option<T>>;
    fn get_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<Option<T>>;
}

pub trait EmployeeReader {
    fn list_employees_by_manager(&self, manager_id: EmployeeId) -> RepositoryResult<Vec<Employee>>;
    /// Embeds the live manager of each employee, keeping the input order.
    fn with_managers(&self, employees: Vec<Employee>) -> RepositoryResult<Vec<EmployeeDetails>>;
}

pub trait CredentialReader {
    fn get_credential_by_id(&self, id: UserCredentialId)
    -> RepositoryResult<Option<UserCredential>>;
    fn get_credential_by_user_name(
        &self,
        user_name: &UserName,
    ) -> RepositoryResult<Option<UserCredential>>;
}

pub trait CredentialWriter {
    fn save_credential(&self, draft: &CredentialDraft) -> RepositoryResult<UserCredential>;
    fn set_credential_active(
        &self,
        id: UserCredentialId,
        is_active: bool,
    ) -> RepositoryResult<UserCredential>;
}

pub trait TransactionReader {
    /// Embeds the live vehicle, customer and employee of each sale, keeping
    /// the input order.
    fn with_parties(
        &self,
        transactions: Vec<Transaction>,
    ) -> RepositoryResult<Vec<TransactionDetails>>;
}

pub trait TransactionWriter {
    /// Inserts the sale and decrements the vehicle stock atomically.
    ///
    /// Fails with [`RepositoryError::NotFound`] when a referenced row is missing
    /// and with [`RepositoryError::ValidationError`] when stock is short.
    fn register_transaction(&self, new_transaction: &NewTransaction)
    -> RepositoryResult<Transaction>;
}

/// Storage of uploaded files.
pub trait FileStore {
    /// Copies `source` into the store under a fresh `<uuid>.<extension>` name.
    fn store(&self, source: &Path, extension: &str) -> RepositoryResult<String>;
    /// Location of a stored file.
    fn path_of(&self, file_name: &str) -> PathBuf;
    /// Deletes a stored file.
    fn remove(&self, file_name: &str) -> RepositoryResult<()>;
}

/// Diesel-backed repository shared by all handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::RequestQueryParams;

    #[test]
    fn offset_skips_previous_pages() {
        let pagination = Pagination {
            page: 3,
            per_page: 5,
        };
        assert_eq!(pagination.offset(), 10);
        assert_eq!(pagination.limit(), 5);
    }

    #[test]
    fn list_query_requires_valid_sort() {
        let params = RequestQueryParams::parse(None, None, None, Some("ABC")).unwrap();
        assert_eq!(
            ListQuery::try_from(&params),
            Err(PagingError::InvalidSort("ABC".to_string()))
        );

        let params = RequestQueryParams::parse(Some("2"), Some("10"), Some("name"), Some("desc"))
            .unwrap()
            .with_filter(BTreeMap::from([("color".to_string(), "red".to_string())]));
        let query = ListQuery::try_from(&params).unwrap();
        assert_eq!(query.sort, SortDirection::Desc);
        assert_eq!(query.order_by, "name");
        assert_eq!(query.pagination.offset(), 10);
        assert_eq!(query.filter.get("color").map(String::as_str), Some("red"));
    }

    #[test]
    fn bool_filters_accept_words_and_digits() {
        assert!(parse_bool_filter("is_automatic", "TRUE").unwrap());
        assert!(!parse_bool_filter("is_automatic", "0").unwrap());
        assert!(parse_bool_filter("is_automatic", "maybe").is_err());
    }
}
