use std::time::Duration;

use reqwest::{Client, Method};
use serde::Serialize;
use url::Url;

use crate::backend::contracts::BackendReply;
use crate::error::ServiceError;

/// Bound on any single downstream call, connect through body decode.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Thin typed wrapper over a shared `reqwest::Client`.
///
/// One call, one decoded reply. HTTP status codes are deliberately not
/// inspected: the backends express failure through the `err` field of an
/// otherwise well-formed body, which callers check via
/// [`BackendReply::into_checked`]. Everything that prevents a decoded reply
/// from existing at all (unreachable backend, timeout, malformed body)
/// becomes a `WebServer` error here.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
}

impl BackendClient {
    pub fn new() -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::WebServer(e.to_string()))?;

        Ok(Self { http })
    }

    /// Serializes `body` as JSON, issues the call, and decodes the typed
    /// reply.
    pub async fn send<B, R>(&self, method: Method, url: Url, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + ?Sized,
        R: BackendReply,
    {
        let response = self
            .http
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::WebServer(e.to_string()))?;

        response
            .json::<R>()
            .await
            .map_err(|e| ServiceError::WebServer(e.to_string()))
    }

    /// Variant for calls that carry no request body (the user listing).
    pub async fn send_empty<R>(&self, method: Method, url: Url) -> Result<R, ServiceError>
    where
        R: BackendReply,
    {
        let response = self
            .http
            .request(method, url)
            .send()
            .await
            .map_err(|e| ServiceError::WebServer(e.to_string()))?;

        response
            .json::<R>()
            .await
            .map_err(|e| ServiceError::WebServer(e.to_string()))
    }
}
