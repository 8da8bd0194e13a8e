use actix_web::{HttpResponse, delete, get, route, web};

use crate::auth::AuthenticatedUser;
use crate::dto::response::{PagedResponse, SingleResponse};
use crate::forms::employee::SaveEmployeeForm;
use crate::forms::query::ListQueryForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, employee as employee_service};

#[get("/employees")]
pub async fn list_employees(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryForm>,
) -> Result<HttpResponse, ServiceError> {
    let page = employee_service::list_employees(repo.get_ref(), query.into_inner())?;
    Ok(HttpResponse::Ok().json(PagedResponse::from(page)))
}

#[get("/employees/{employee_id}")]
pub async fn get_employee(
    _user: AuthenticatedUser,
    employee_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let employee = employee_service::get_employee(repo.get_ref(), employee_id.into_inner())?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(employee)))
}

#[get("/employees/manager/{manager_id}")]
pub async fn list_by_manager(
    _user: AuthenticatedUser,
    manager_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let reports = employee_service::list_by_manager(repo.get_ref(), manager_id.into_inner())?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(reports)))
}

#[get("/employees/email/{email}")]
pub async fn find_employee_by_email(
    _user: AuthenticatedUser,
    email: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let employee = employee_service::find_employee_by_email(repo.get_ref(), &email)?
        .ok_or_else(|| ServiceError::NotFound(format!("employee with email {email} not found")))?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(employee)))
}

#[get("/employees/phone/{phone}")]
pub async fn find_employee_by_phone(
    _user: AuthenticatedUser,
    phone: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let employee = employee_service::find_employee_by_phone(repo.get_ref(), &phone)?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("employee with phone number {phone} not found"))
        })?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(employee)))
}

#[route("/employees", method = "POST", method = "PUT")]
pub async fn save_employee(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<SaveEmployeeForm>,
) -> Result<HttpResponse, ServiceError> {
    let employee =
        employee_service::save_employee(repo.get_ref(), form, &server_config.default_password)?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(employee)))
}

#[delete("/employees/{employee_id}")]
pub async fn delete_employee(
    _user: AuthenticatedUser,
    employee_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    employee_service::delete_employee(repo.get_ref(), employee_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
