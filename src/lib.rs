pub mod accounts;
pub mod backend;
pub mod config;
pub mod error;

use std::sync::Arc;
use actix_web::HttpResponse;

pub use error::{AppError, ServiceError};
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use accounts::{AccountService, Accounts};
pub use backend::{BackendClient, User};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub accounts: Arc<dyn Accounts>,
}

impl AppState {
    pub fn new(config: Settings) -> Result<Self> {
        let client = BackendClient::new()?;

        let accounts = AccountService::new(
            client,
            config.user_store.base_url()?,
            config.token_service.base_url()?,
            config.auth.secret.clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            accounts: Arc::new(accounts),
        })
    }
}
