//! HTTP handlers and the mapping of service failures to JSON error bodies.

use actix_web::error::{InternalError, PathError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};

use crate::dto::response::Status;
use crate::services::ServiceError;

pub mod auth;
pub mod brand;
pub mod customer;
pub mod employee;
pub mod transaction;
pub mod vehicle;

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidParameter(_)
            | ServiceError::InvalidSort(_)
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let description = match self {
            ServiceError::Storage(message) => {
                log::error!("Request failed on storage: {message}");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(status).json(Status::new(status, description))
    }
}

fn bad_request<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Display + std::fmt::Debug + 'static,
{
    let body = Status::new(StatusCode::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// An unparsable `{<entity>_id}` segment reads as a missing record.
fn unknown_path_id(err: PathError, req: &HttpRequest) -> actix_web::Error {
    let description = req
        .match_info()
        .iter()
        .find_map(|(name, value)| {
            name.strip_suffix("_id")
                .map(|entity| format!("{entity} with ID {value} not found"))
        })
        .unwrap_or_else(|| err.to_string());
    let body = Status::new(StatusCode::NOT_FOUND, description);
    InternalError::from_response(err, HttpResponse::NotFound().json(body)).into()
}

/// Registers every endpoint together with JSON error bodies for malformed
/// payloads, query strings and path identifiers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _| bad_request(err)))
        .app_data(web::PathConfig::default().error_handler(unknown_path_id))
        .service(auth::login)
        .service(auth::register)
        .service(auth::activation)
        .service(brand::list_brands)
        .service(brand::get_brand)
        .service(brand::save_brand)
        .service(brand::delete_brand)
        .service(vehicle::list_vehicles)
        .service(vehicle::get_vehicle_image)
        .service(vehicle::get_vehicle)
        .service(vehicle::upload_vehicle)
        .service(vehicle::update_vehicle)
        .service(vehicle::delete_vehicle)
        .service(customer::list_customers)
        .service(customer::find_customer_by_email)
        .service(customer::find_customer_by_phone)
        .service(customer::get_customer)
        .service(customer::save_customer)
        .service(customer::delete_customer)
        .service(employee::list_employees)
        .service(employee::list_by_manager)
        .service(employee::find_employee_by_email)
        .service(employee::find_employee_by_phone)
        .service(employee::get_employee)
        .service(employee::save_employee)
        .service(employee::delete_employee)
        .service(transaction::list_transactions)
        .service(transaction::get_transaction)
        .service(transaction::register_transaction);
}
