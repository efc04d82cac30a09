use thiserror::Error;
use actix_web::{ResponseError, HttpResponse, http::StatusCode};
use serde_json::json;

/// Failures produced while orchestrating calls against the two backends.
///
/// `WebServer` covers every downstream-origin fault: the backend was
/// unreachable, the call timed out, the body could not be decoded, or the
/// backend answered with a populated `err` field. `TokenNotValid` is raised
/// only when the token-service explicitly reports a token as not valid.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("error from web server: {0}")]
    WebServer(String),

    #[error("token not valid")]
    TokenNotValid,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Account service error: {0}")]
    ServiceError(#[from] ServiceError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = self.to_string();
        let response = json!({
            "error": {
                "status": status.as_u16(),
                "message": message
            }
        });
        HttpResponse::build(status).json(response)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ServiceError(e) => match e {
                ServiceError::TokenNotValid => StatusCode::UNAUTHORIZED,
                ServiceError::WebServer(_) => StatusCode::BAD_GATEWAY,
            },
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_conversion() {
        // Test IO error conversion
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::InternalError(_)));

        // Test config error conversion
        let config_err = config::ConfigError::NotFound(String::from("key not found"));
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::ConfigError(_)));

        // Test service error conversion
        let svc_err = ServiceError::TokenNotValid;
        let app_err: AppError = svc_err.into();
        assert!(matches!(app_err, AppError::ServiceError(ServiceError::TokenNotValid)));
    }

    #[test]
    fn test_error_status_codes() {
        let err = AppError::ServiceError(ServiceError::TokenNotValid);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = AppError::ServiceError(ServiceError::WebServer("connection refused".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);

        let err = AppError::Unauthorized("no token".into());
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = AppError::ConfigError("bad port".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display() {
        let err = ServiceError::WebServer("user not found".to_string());
        assert_eq!(err.to_string(), "error from web server: user not found");

        let err = ServiceError::TokenNotValid;
        assert_eq!(err.to_string(), "token not valid");

        let err = AppError::ServiceError(ServiceError::WebServer("boom".into()));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_downstream_message_is_preserved() {
        // The original backend message must survive wrapping so callers can
        // distinguish causes without inspecting call structure.
        let err = AppError::ServiceError(ServiceError::WebServer(
            "username already exists".into(),
        ));
        assert!(err.to_string().contains("username already exists"));
    }
}
