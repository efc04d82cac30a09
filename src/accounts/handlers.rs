use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn sign_up(
    req: web::Json<SignUpRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received signup request for username: {}", req.username);
    match state
        .accounts
        .sign_up(&req.username, &req.password, &req.email)
        .await
    {
        Ok(token) => {
            info!("Signup successful for username: {}", req.username);
            Ok(HttpResponse::Created().json(TokenResponse { token }))
        }
        Err(e) => {
            error!("Signup failed for username {}: {}", req.username, e);
            Err(e.into())
        }
    }
}

pub async fn sign_in(
    req: web::Json<SignInRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received signin request for username: {}", req.username);
    match state.accounts.sign_in(&req.username, &req.password).await {
        Ok(token) => {
            info!("Signin successful for username: {}", req.username);
            Ok(HttpResponse::Ok().json(TokenResponse { token }))
        }
        Err(e) => {
            error!("Signin failed for username {}: {}", req.username, e);
            Err(e.into())
        }
    }
}

pub async fn log_out(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = bearer_token(&req)?;

    state.accounts.log_out(token).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Successfully logged out"
    })))
}

pub async fn get_all_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = state.accounts.get_all_users().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "users": users })))
}

pub async fn profile(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = bearer_token(&req)?;

    let user = state.accounts.profile(token).await?;

    Ok(HttpResponse::Ok().json(user))
}

pub async fn delete_account(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = bearer_token(&req)?;

    state.accounts.delete_account(token).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Account deleted"
    })))
}

/// Pulls the bearer token out of the Authorization header. Rejection here
/// happens before any downstream call is issued.
fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("No authorization token provided".into()))
}
