use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use account_gateway::accounts::handlers::{
    delete_account, get_all_users, log_out, profile, sign_in, sign_up,
};
use account_gateway::{health_check, AppError, AppState, Settings};
use dotenv::dotenv;
use std::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[actix_web::main]
async fn main() -> account_gateway::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    // Load configuration
    let config = Settings::new()?;
    info!("Configuration loaded successfully");

    info!(
        "Starting server at {}:{}",
        config.server.host, config.server.port
    );
    info!(
        "Orchestrating user-store at {}:{} and token-service at {}:{}",
        config.user_store.host,
        config.user_store.port,
        config.token_service.host,
        config.token_service.port
    );

    // Initialize application state
    let state = web::Data::new(AppState::new(config.clone())?);

    // Create and bind TCP listener
    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;
    let workers = config.server.workers as usize;

    // Start HTTP server
    HttpServer::new(move || {
        let cors = if config.cors.enabled {
            if config.cors.allow_any_origin {
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(config.cors.max_age as usize)
            } else {
                Cors::default()
                    .allowed_origin("http://localhost:8080")
                    .allowed_origin("http://127.0.0.1:8080")
                    .allowed_methods(vec!["GET", "POST", "DELETE"])
                    .allowed_headers(vec!["Authorization", "Content-Type"])
                    .max_age(config.cors.max_age as usize)
            }
        } else {
            // CORS disabled - use most restrictive settings
            Cors::default()
        };

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .route("/health", web::get().to(health_check))
            .route("/signup", web::post().to(sign_up))
            .route("/signin", web::post().to(sign_in))
            .route("/logout", web::post().to(log_out))
            .route("/users", web::get().to(get_all_users))
            .route("/profile", web::post().to(profile))
            .route("/profile", web::delete().to(delete_account))
    })
    .listen(listener)?
    .workers(workers)
    .run()
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(())
}
