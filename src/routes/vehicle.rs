use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::response::{FileResponse, PagedResponse, SingleResponse, Status};
use crate::forms::query::ListQueryForm;
use crate::forms::vehicle::{SaveVehicleForm, UploadVehicleForm, VehicleUpload};
use crate::repository::{DieselRepository, LocalFileStore};
use crate::services::{ServiceError, vehicle as vehicle_service};

#[get("/vehicles")]
pub async fn list_vehicles(
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryForm>,
) -> Result<HttpResponse, ServiceError> {
    let page = vehicle_service::list_vehicles(repo.get_ref(), query.into_inner())?;
    Ok(HttpResponse::Ok().json(PagedResponse::from(page)))
}

#[get("/vehicles/{vehicle_id}")]
pub async fn get_vehicle(
    vehicle_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let vehicle = vehicle_service::get_vehicle(repo.get_ref(), vehicle_id.into_inner())?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(vehicle)))
}

#[get("/vehicles/image/{vehicle_id}")]
pub async fn get_vehicle_image(
    _user: AuthenticatedUser,
    vehicle_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalFileStore>,
) -> Result<HttpResponse, ServiceError> {
    let file_name = vehicle_service::get_vehicle_image(
        repo.get_ref(),
        store.get_ref(),
        vehicle_id.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(FileResponse {
        status: Status::ok(),
        file_name,
    }))
}

/// Creates or updates a vehicle together with its picture.
#[post("/vehicles")]
pub async fn upload_vehicle(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalFileStore>,
    MultipartForm(form): MultipartForm<UploadVehicleForm>,
) -> Result<HttpResponse, ServiceError> {
    let upload = VehicleUpload::try_from(&form)?;
    let vehicle = vehicle_service::upload_vehicle(repo.get_ref(), store.get_ref(), upload)?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(vehicle)))
}

#[put("/vehicles")]
pub async fn update_vehicle(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SaveVehicleForm>,
) -> Result<HttpResponse, ServiceError> {
    let vehicle = vehicle_service::save_vehicle(repo.get_ref(), form)?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(vehicle)))
}

#[delete("/vehicles/{vehicle_id}")]
pub async fn delete_vehicle(
    _user: AuthenticatedUser,
    vehicle_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    vehicle_service::delete_vehicle(repo.get_ref(), vehicle_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
