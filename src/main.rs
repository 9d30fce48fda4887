use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use portfolio::api::jwt::JwtService;
use portfolio::api::routes::api_routes;
use portfolio::api::services::health::{health_check, AppStartTime};
use portfolio::config::AppConfig;
use portfolio::storage::SeaOrmStorage;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let storage = Arc::new(
        SeaOrmStorage::new(&config.database_url)
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?,
    );
    info!("Using storage backend: {}", storage.backend_name());

    let jwt = Arc::new(JwtService::from_secret(&config.jwt_secret));

    let bind_address = config.bind_address();
    info!("Starting server at http://{}", bind_address);

    let cors_origin = config.cors_origin.clone();
    HttpServer::new(move || {
        let cors = if cors_origin.is_empty() {
            Cors::default()
        } else {
            Cors::default()
                .allowed_origin(&cors_origin)
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(jwt.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .service(api_routes())
            .route("/health", web::get().to(health_check))
    })
    .bind(bind_address)?
    .run()
    .await
}
