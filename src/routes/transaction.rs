use actix_web::{HttpResponse, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::dto::response::{PagedResponse, SingleResponse};
use crate::forms::query::ListQueryForm;
use crate::forms::transaction::RegisterTransactionForm;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, transaction as transaction_service};

#[get("/transactions")]
pub async fn list_transactions(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryForm>,
) -> Result<HttpResponse, ServiceError> {
    let page = transaction_service::list_transactions(repo.get_ref(), query.into_inner())?;
    Ok(HttpResponse::Ok().json(PagedResponse::from(page)))
}

#[get("/transactions/{transaction_id}")]
pub async fn get_transaction(
    _user: AuthenticatedUser,
    transaction_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let transaction =
        transaction_service::get_transaction(repo.get_ref(), transaction_id.into_inner())?;
    Ok(HttpResponse::Ok().json(SingleResponse::ok(transaction)))
}

#[post("/transactions")]
pub async fn register_transaction(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RegisterTransactionForm>,
) -> Result<HttpResponse, ServiceError> {
    let transaction = transaction_service::register_transaction(repo.get_ref(), form)?;
    log::info!(
        "Transaction {} registered by {}",
        transaction.id,
        user.user_name
    );
    Ok(HttpResponse::Ok().json(SingleResponse::ok(transaction)))
}
