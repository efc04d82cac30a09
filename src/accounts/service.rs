use async_trait::async_trait;
use reqwest::Method;
use url::Url;

use crate::backend::client::BackendClient;
use crate::backend::contracts::{
    AckReply, BackendReply, CredentialsRequest, ExtractTokenRequest, GenerateTokenRequest,
    IdentityReply, NewUserRequest, TokenCheckReply, TokenReply, TokenRequest, User, UserIdReply,
    UserIdRequest, UserListReply, UserReply, UsernameRequest,
};
use crate::error::ServiceError;

/// The six account operations the gateway exposes upward.
///
/// Implementations perform no local persistence; each operation is a fixed
/// sequence of backend calls where every step's output feeds the next.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    async fn sign_up(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<String, ServiceError>;

    async fn sign_in(&self, username: &str, password: &str) -> Result<String, ServiceError>;

    async fn log_out(&self, token: &str) -> Result<(), ServiceError>;

    async fn get_all_users(&self) -> Result<Vec<User>, ServiceError>;

    async fn profile(&self, token: &str) -> Result<User, ServiceError>;

    async fn delete_account(&self, token: &str) -> Result<(), ServiceError>;
}

/// Sequences calls against the two backends.
///
/// Holds no per-call state: base URLs, the shared secret, and the HTTP
/// client are fixed at construction, so one instance serves concurrent
/// operations without locking. A failed step aborts the remaining steps of
/// its operation; steps already applied downstream are not compensated.
pub struct AccountService {
    client: BackendClient,
    user_store: Url,
    token_service: Url,
    secret: String,
}

impl AccountService {
    pub fn new(
        client: BackendClient,
        user_store: Url,
        token_service: Url,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            user_store,
            token_service,
            secret: secret.into(),
        }
    }

    fn user_store_url(&self, path: &str) -> Result<Url, ServiceError> {
        self.user_store
            .join(path)
            .map_err(|e| ServiceError::WebServer(e.to_string()))
    }

    fn token_service_url(&self, path: &str) -> Result<Url, ServiceError> {
        self.token_service
            .join(path)
            .map_err(|e| ServiceError::WebServer(e.to_string()))
    }

    /// Asks the token-service whether `token` is currently valid. Gatekeeper
    /// for every token-bearing operation: an explicit `false` is a business
    /// refusal, not an infrastructure fault, and maps to `TokenNotValid`.
    async fn check_token(&self, token: &str) -> Result<(), ServiceError> {
        let check: TokenCheckReply = self
            .client
            .send::<_, TokenCheckReply>(
                Method::POST,
                self.token_service_url("/check")?,
                &TokenRequest { token },
            )
            .await?
            .into_checked()?;

        if !check.valid {
            return Err(ServiceError::TokenNotValid);
        }

        Ok(())
    }

    /// Decodes the identity claims behind `token`. Only called after
    /// `check_token` has passed.
    async fn extract_identity(&self, token: &str) -> Result<IdentityReply, ServiceError> {
        self.client
            .send::<_, IdentityReply>(
                Method::POST,
                self.token_service_url("/extract")?,
                &ExtractTokenRequest {
                    token,
                    secret: &self.secret,
                },
            )
            .await?
            .into_checked()
    }

    /// Mints a token for the given identity and registers it as active.
    /// Shared tail of sign-up and sign-in.
    async fn issue_token(
        &self,
        id: i64,
        username: &str,
        email: &str,
    ) -> Result<String, ServiceError> {
        let minted: TokenReply = self
            .client
            .send::<_, TokenReply>(
                Method::POST,
                self.token_service_url("/generate")?,
                &GenerateTokenRequest {
                    id,
                    username,
                    email,
                    secret: &self.secret,
                },
            )
            .await?
            .into_checked()?;

        let _: AckReply = self
            .client
            .send::<_, AckReply>(
                Method::POST,
                self.token_service_url("/token")?,
                &TokenRequest {
                    token: &minted.token,
                },
            )
            .await?
            .into_checked()?;

        Ok(minted.token)
    }
}

#[async_trait]
impl Accounts for AccountService {
    async fn sign_up(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<String, ServiceError> {
        let _: AckReply = self
            .client
            .send::<_, AckReply>(
                Method::POST,
                self.user_store_url("/user")?,
                &NewUserRequest {
                    username,
                    password,
                    email,
                },
            )
            .await?
            .into_checked()?;

        // The user-store assigns the id; fetch it back by username.
        let created: UserIdReply = self
            .client
            .send::<_, UserIdReply>(
                Method::GET,
                self.user_store_url("/id/username")?,
                &UsernameRequest { username },
            )
            .await?
            .into_checked()?;

        self.issue_token(created.id, username, email).await
    }

    async fn sign_in(&self, username: &str, password: &str) -> Result<String, ServiceError> {
        let found: UserReply = self
            .client
            .send::<_, UserReply>(
                Method::GET,
                self.user_store_url("/user/username_password")?,
                &CredentialsRequest { username, password },
            )
            .await?
            .into_checked()?;

        // Token claims come from the stored record, not from caller input.
        self.issue_token(found.user.id, &found.user.username, &found.user.email)
            .await
    }

    async fn log_out(&self, token: &str) -> Result<(), ServiceError> {
        self.check_token(token).await?;

        let _: AckReply = self
            .client
            .send::<_, AckReply>(
                Method::DELETE,
                self.token_service_url("/token")?,
                &TokenRequest { token },
            )
            .await?
            .into_checked()?;

        Ok(())
    }

    async fn get_all_users(&self) -> Result<Vec<User>, ServiceError> {
        let listing: UserListReply = self
            .client
            .send_empty::<UserListReply>(Method::GET, self.user_store_url("/users")?)
            .await?
            .into_checked()?;

        Ok(listing.users)
    }

    async fn profile(&self, token: &str) -> Result<User, ServiceError> {
        self.check_token(token).await?;

        let identity = self.extract_identity(token).await?;

        let found: UserReply = self
            .client
            .send::<_, UserReply>(
                Method::GET,
                self.user_store_url("/user/id")?,
                &UserIdRequest { id: identity.id },
            )
            .await?
            .into_checked()?;

        Ok(found.user)
    }

    async fn delete_account(&self, token: &str) -> Result<(), ServiceError> {
        self.check_token(token).await?;

        let identity = self.extract_identity(token).await?;

        let _: AckReply = self
            .client
            .send::<_, AckReply>(
                Method::DELETE,
                self.user_store_url("/user")?,
                &UserIdRequest { id: identity.id },
            )
            .await?
            .into_checked()?;

        Ok(())
    }
}
