//! Paging engine shared by every list endpoint.
//!
//! Raw query-string values are turned into an immutable [`RequestQueryParams`]
//! once per request. The value is then passed down by reference: services check
//! the sort token, repositories slice the filtered set, and [`Paging`] is
//! computed from the total number of rows matching the filter.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 5;
pub const DEFAULT_ORDER: &str = "id";
pub const DEFAULT_SORT: &str = "ASC";

/// Errors raised while validating list parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PagingError {
    /// `page` or `limit` is not a positive integer.
    #[error("{0}")]
    InvalidParameter(String),
    /// `sort` is not one of the allowed directions.
    #[error("invalid sort by: {0}")]
    InvalidSort(String),
}

/// Ordering direction accepted by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = PagingError;

    /// Matches `ASC`/`DESC` ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ASC") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("DESC") {
            Ok(SortDirection::Desc)
        } else {
            Err(PagingError::InvalidSort(s.to_string()))
        }
    }
}

/// Ordering part of a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Column identifier, resolved by the storage layer.
    pub order: String,
    /// Raw sort token, validated by [`QueryParams::sort_direction`].
    pub sort: String,
}

impl QueryParams {
    /// Returns `true` when the sort token is in the allow-list.
    pub fn is_sort_valid(&self) -> bool {
        self.sort_direction().is_ok()
    }

    pub fn sort_direction(&self) -> Result<SortDirection, PagingError> {
        self.sort.parse()
    }
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER.to_string(),
            sort: DEFAULT_SORT.to_string(),
        }
    }
}

/// Window part of a list request. Both values are at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParam {
    pub page: usize,
    pub limit: usize,
}

impl Default for PaginationParam {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Validated parameters of a single list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestQueryParams {
    pub query: QueryParams,
    pub pagination: PaginationParam,
    /// Field name to required value.
    pub filter: BTreeMap<String, String>,
}

impl RequestQueryParams {
    /// Validates raw request values, applying defaults for absent ones.
    ///
    /// `sort` is not inspected here; see [`QueryParams::sort_direction`].
    pub fn parse(
        page: Option<&str>,
        limit: Option<&str>,
        order: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self, PagingError> {
        let page = parse_positive(page, DEFAULT_PAGE, "Invalid page number")?;
        let limit = parse_positive(limit, DEFAULT_LIMIT, "Invalid limit value")?;

        let order = order
            .filter(|o| !o.is_empty())
            .unwrap_or(DEFAULT_ORDER)
            .to_string();
        let sort = sort.unwrap_or(DEFAULT_SORT).to_string();

        Ok(Self {
            query: QueryParams { order, sort },
            pagination: PaginationParam { page, limit },
            filter: BTreeMap::new(),
        })
    }

    pub fn with_filter(mut self, filter: BTreeMap<String, String>) -> Self {
        self.filter = filter;
        self
    }
}

fn parse_positive(value: Option<&str>, default: usize, message: &str) -> Result<usize, PagingError> {
    let Some(raw) = value else {
        return Ok(default);
    };

    match raw.parse::<i64>() {
        Ok(parsed) if parsed > 0 => {
            usize::try_from(parsed).map_err(|_| PagingError::InvalidParameter(message.to_string()))
        }
        _ => Err(PagingError::InvalidParameter(message.to_string())),
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page: usize,
    pub rows_per_page: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

impl Paging {
    /// Computes metadata for `page` given the filtered row count.
    ///
    /// `page` is echoed as is; a page past the end is not an error.
    pub fn new(page: usize, rows_per_page: usize, total_rows: usize) -> Self {
        let total_pages = if rows_per_page == 0 {
            0
        } else {
            total_rows.div_ceil(rows_per_page)
        };

        Self {
            page,
            rows_per_page,
            total_rows,
            total_pages,
        }
    }
}
