use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, HttpResponse, get, test, web};
use chrono::Utc;
use dealership::auth::{AuthenticatedUser, TokenService};
use dealership::domain::types::{UserCredentialId, UserName};
use dealership::domain::user::UserCredential;
use serde_json::Value;

#[get("/me")]
async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().body(user.user_name.to_string())
}

fn credential() -> UserCredential {
    let now = Utc::now().naive_utc();
    UserCredential {
        id: UserCredentialId::new(3).unwrap(),
        user_name: UserName::new("cashier").unwrap(),
        password: String::new(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

#[actix_web::test]
async fn test_valid_bearer_token_identifies_user() {
    let tokens = TokenService::new("secret", 5);
    let token = tokens.issue(&credential()).unwrap();
    let app = test::init_service(App::new().app_data(web::Data::new(tokens)).service(me)).await;

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "cashier");
}

#[actix_web::test]
async fn test_missing_header_is_unauthorized() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(TokenService::new("secret", 5)))
            .service(me),
    )
    .await;

    for header in [None, Some("Basic abc"), Some("Bearer ")] {
        let mut req = test::TestRequest::get().uri("/me");
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["description"], "missing bearer token");
    }
}

#[actix_web::test]
async fn test_expired_token_is_unauthorized() {
    let token = TokenService::new("secret", -5).issue(&credential()).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(TokenService::new("secret", 5)))
            .service(me),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_missing_token_service_is_server_error() {
    let app = test::init_service(App::new().service(me)).await;

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header((AUTHORIZATION, "Bearer abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
