mod api;
mod form;
mod models;
mod services;
mod storage;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use services::user_service::UserStore;
use std::env;
use tokio::sync::Mutex;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3002".to_string());
    let snapshot_path = env::var("SNAPSHOT_PATH").unwrap_or_else(|_| "users.json".to_string());
    let remote_url = env::var("REMOTE_USERS_URL")
        .unwrap_or_else(|_| services::remote_service::DEFAULT_USERS_URL.to_string());

    log::info!("🚀 Starting User Service...");
    log::info!("💾 Snapshot: {}", snapshot_path);

    // Build the store around the file-backed snapshot
    let storage = storage::SnapshotFile::new(&snapshot_path);
    let mut store = UserStore::new(Box::new(storage));

    // Load the snapshot; fall back to the one-time remote fetch when none
    // exists. The fetched list is adopted in memory only; the first
    // mutation persists it.
    match store.load_snapshot() {
        Ok(true) => {
            log::info!("✅ Snapshot loaded: {} users", store.users().len());
        }
        Ok(false) => {
            match services::remote_service::fetch_users(&remote_url).await {
                Ok(users) => {
                    log::info!("✅ Seeded {} users from remote source", users.len());
                    store.adopt(users);
                }
                Err(e) => {
                    // Surfaced once; the session continues with an empty
                    // collection and no retry
                    log::error!("❌ Error fetching users: {}", e);
                }
            }
        }
        Err(e) => {
            log::error!("❌ Error loading snapshot: {}", e);
        }
    }

    let store_data = web::Data::new(Mutex::new(store));

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Users: collection CRUD
            .service(
                web::scope("/api/v1/users")
                    .route("", web::get().to(api::users::list_users))
                    .route("", web::post().to(api::users::create_user))
                    .route("/{id}", web::get().to(api::users::get_user))
                    .route("/{id}", web::patch().to(api::users::update_user))
                    .route("/{id}", web::delete().to(api::users::delete_user)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
