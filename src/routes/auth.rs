use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, web};

use crate::auth::TokenService;
use crate::dto::response::{MessageResponse, TokenResponse};
use crate::forms::auth::{ActivationForm, LoginForm, RegisterForm};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, auth as auth_service};

#[post("/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    tokens: web::Data<TokenService>,
    web::Json(form): web::Json<LoginForm>,
) -> Result<HttpResponse, ServiceError> {
    let token = auth_service::login(repo.get_ref(), tokens.get_ref(), form)?;
    Ok(HttpResponse::Created().json(TokenResponse {
        code: StatusCode::CREATED.as_u16(),
        token,
    }))
}

#[post("/register")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RegisterForm>,
) -> Result<HttpResponse, ServiceError> {
    let credential = auth_service::register(repo.get_ref(), form)?;
    Ok(HttpResponse::Created().json(MessageResponse {
        code: StatusCode::CREATED.as_u16(),
        message: format!("{} has been registered.", credential.user_name),
    }))
}

#[post("/activation")]
pub async fn activation(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ActivationForm>,
) -> Result<HttpResponse, ServiceError> {
    let credential = auth_service::toggle_activation(repo.get_ref(), form)?;
    let state = if credential.is_active {
        "activated"
    } else {
        "disabled"
    };
    Ok(HttpResponse::Created().json(MessageResponse {
        code: StatusCode::CREATED.as_u16(),
        message: format!("{} has been {state}.", credential.user_name),
    }))
}
