//! Request and response shapes exchanged with the user-store and the
//! token-service. The set is fixed: both backends answer application-level
//! failures through an `err` field rather than HTTP status codes, so every
//! response shape implements [`BackendReply`] and gets the same
//! populated-error check.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// User record as the user-store reports it. The password travels verbatim;
/// this service never hashes or inspects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
}

// --- request bodies ---

#[derive(Debug, Serialize)]
pub struct NewUserRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UsernameRequest<'a> {
    pub username: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CredentialsRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UserIdRequest {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub token: &'a str,
}

/// Token mint request; the shared secret authorizes the call.
#[derive(Debug, Serialize)]
pub struct GenerateTokenRequest<'a> {
    pub id: i64,
    pub username: &'a str,
    pub email: &'a str,
    pub secret: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ExtractTokenRequest<'a> {
    pub token: &'a str,
    pub secret: &'a str,
}

// --- response bodies ---

#[derive(Debug, Default, Deserialize)]
pub struct AckReply {
    #[serde(default)]
    pub err: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserIdReply {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub err: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserReply {
    #[serde(default)]
    pub user: User,
    #[serde(default)]
    pub err: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserListReply {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub err: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TokenReply {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TokenCheckReply {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub err: String,
}

/// Identity claims the token-service extracts from a token.
#[derive(Debug, Default, Deserialize)]
pub struct IdentityReply {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub err: String,
}

/// Closed set of backend response shapes.
///
/// A decoded response is only half the story: a backend that answered the
/// HTTP call can still report failure through its `err` field, and that
/// field must be checked before any payload field is trusted.
/// `into_checked` is that check, shared by every call site.
pub trait BackendReply: DeserializeOwned {
    /// Application-level failure reported by the backend, if any.
    fn err(&self) -> Option<&str>;

    /// Promotes a populated `err` field into a `WebServer` failure.
    fn into_checked(self) -> Result<Self, ServiceError>
    where
        Self: Sized,
    {
        match self.err() {
            Some(msg) => Err(ServiceError::WebServer(msg.to_string())),
            None => Ok(self),
        }
    }
}

fn non_empty(err: &str) -> Option<&str> {
    if err.is_empty() {
        None
    } else {
        Some(err)
    }
}

impl BackendReply for AckReply {
    fn err(&self) -> Option<&str> {
        non_empty(&self.err)
    }
}

impl BackendReply for UserIdReply {
    fn err(&self) -> Option<&str> {
        non_empty(&self.err)
    }
}

impl BackendReply for UserReply {
    fn err(&self) -> Option<&str> {
        non_empty(&self.err)
    }
}

impl BackendReply for UserListReply {
    fn err(&self) -> Option<&str> {
        non_empty(&self.err)
    }
}

impl BackendReply for TokenReply {
    // The mint response carries no error field; failures surface at the
    // transport level or on the follow-up activation call.
    fn err(&self) -> Option<&str> {
        None
    }
}

impl BackendReply for TokenCheckReply {
    fn err(&self) -> Option<&str> {
        non_empty(&self.err)
    }
}

impl BackendReply for IdentityReply {
    fn err(&self) -> Option<&str> {
        non_empty(&self.err)
    }
}
