use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

use crate::auth::TokenService;
use crate::db::{establish_connection_pool, run_migrations};
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, LocalFileStore};

pub mod auth;
pub mod db;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;
    run_migrations(&pool)?;

    std::fs::create_dir_all(&server_config.upload_dir)?;

    let repo = DieselRepository::new(pool);
    let tokens = TokenService::new(
        &server_config.secret,
        server_config.token_lifetime_minutes,
    );
    let store = LocalFileStore::new(&server_config.upload_dir);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
