use actix_web::{HttpResponse, delete, get, route, web};

use crate::auth::AuthenticatedUser;
use crate::dto::response::{PagedResponse, SingleResponse};
use crate::forms::brand::SaveBrandForm;
use crate::forms::query::ListQueryForm;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, brand as brand_service};

#[get("/brands")]
pub async fn list_brands(
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryForm>,
) -> Result<HttpResponse, ServiceError> {
    let page = brand_service::list_brands(repo.get_ref(), query.into_inner())?;
    Ok(HttpResponse::Ok().json(PagedResponse::from(page)))
}

#[get("/brands/{brand_id}")]
pub async fn get_brand(
    brand_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let brand = brand_service::get_brand(repo.get_ref(), brand_id.into_inner())?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(brand)))
}

#[route("/brands", method = "POST", method = "PUT")]
pub async fn save_brand(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SaveBrandForm>,
) -> Result<HttpResponse, ServiceError> {
    let brand = brand_service::save_brand(repo.get_ref(), form)?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(brand)))
}

#[delete("/brands/{brand_id}")]
pub async fn delete_brand(
    _user: AuthenticatedUser,
    brand_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    brand_service::delete_brand(repo.get_ref(), brand_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
