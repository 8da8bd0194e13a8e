//! JSON envelopes returned by every endpoint.

use actix_web::http::StatusCode;
use serde::Serialize;

use crate::pagination::Paging;
use crate::services::Page;

/// Outcome header of a response; also the whole body of an error.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Status {
    pub code: u16,
    pub description: String,
}

impl Status {
    pub fn new(code: StatusCode, description: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            description: description.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::OK, "OK")
    }
}

#[derive(Debug, Serialize)]
pub struct SingleResponse<T> {
    pub status: Status,
    pub data: T,
}

impl<T> SingleResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: Status::ok(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PagedResponse<T> {
    pub status: Status,
    pub data: Vec<T>,
    pub paging: Paging,
}

impl<T> From<Page<T>> for PagedResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            status: Status::ok(),
            data: page.items,
            paging: page.paging,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub status: Status,
    pub file_name: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub code: u16,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub code: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn paged_envelope_shape() {
        let page = Page {
            items: vec!["a", "b"],
            paging: Paging::new(1, 2, 3),
        };
        let value = serde_json::to_value(PagedResponse::from(page)).unwrap();
        assert_eq!(
            value,
            json!({
                "status": {"code": 200, "description": "OK"},
                "data": ["a", "b"],
                "paging": {"page": 1, "rowsPerPage": 2, "totalRows": 3, "totalPages": 2},
            })
        );
    }

    #[test]
    fn file_envelope_uses_camel_case() {
        let value = serde_json::to_value(FileResponse {
            status: Status::ok(),
            file_name: "x.png".to_string(),
        })
        .unwrap();
        assert_eq!(value["fileName"], "x.png");
    }
}
