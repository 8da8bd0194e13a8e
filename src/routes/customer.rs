use actix_web::{HttpResponse, delete, get, route, web};

use crate::auth::AuthenticatedUser;
use crate::dto::response::{PagedResponse, SingleResponse};
use crate::forms::customer::SaveCustomerForm;
use crate::forms::query::ListQueryForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, customer as customer_service};

#[get("/customers")]
pub async fn list_customers(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryForm>,
) -> Result<HttpResponse, ServiceError> {
    let page = customer_service::list_customers(repo.get_ref(), query.into_inner())?;
    Ok(HttpResponse::Ok().json(PagedResponse::from(page)))
}

#[get("/customers/{customer_id}")]
pub async fn get_customer(
    _user: AuthenticatedUser,
    customer_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let customer = customer_service::get_customer(repo.get_ref(), customer_id.into_inner())?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(customer)))
}

#[get("/customers/email/{email}")]
pub async fn find_customer_by_email(
    _user: AuthenticatedUser,
    email: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let customer = customer_service::find_customer_by_email(repo.get_ref(), &email)?
        .ok_or_else(|| ServiceError::NotFound(format!("customer with email {email} not found")))?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(customer)))
}

#[get("/customers/phone/{phone}")]
pub async fn find_customer_by_phone(
    _user: AuthenticatedUser,
    phone: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let customer = customer_service::find_customer_by_phone(repo.get_ref(), &phone)?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("customer with phone number {phone} not found"))
        })?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(customer)))
}

#[route("/customers", method = "POST", method = "PUT")]
pub async fn save_customer(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<SaveCustomerForm>,
) -> Result<HttpResponse, ServiceError> {
    let customer =
        customer_service::save_customer(repo.get_ref(), form, &server_config.default_password)?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(customer)))
}

#[delete("/customers/{customer_id}")]
pub async fn delete_customer(
    _user: AuthenticatedUser,
    customer_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    customer_service::delete_customer(repo.get_ref(), customer_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
