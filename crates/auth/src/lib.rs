//! Monity Auth client for Rust
//!
//! This crate provides session management for the Monity expense-tracking
//! API: login, register, profile updates, logout, and the session check that
//! gates navigation. The bearer token and cached user profile are persisted
//! through the [`SecureStore`] seam as one logical record.

mod session;
mod store;
mod types;

use std::sync::Arc;

use log::{debug, warn};
use reqwest::{Client, StatusCode};
use thiserror::Error;

pub use session::{Session, SessionState};
pub use store::{MemoryStore, SecureStore, StoreError, TOKEN_KEY, USER_KEY};
pub use types::{ProfileUpdate, User};

use types::{AuthResponse, ErrorBody, ProfileResponse};

/// Error type for session and authentication operations
#[derive(Error, Debug)]
pub enum AuthError {
    /// A required field was empty; caught locally, no request was made
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// The server understood the request and refused it
    #[error("authentication rejected: {0}")]
    Rejected(String),

    /// Transport failure: no connectivity, timeout, TLS failure
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a body outside the wire contract
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The secure store failed while persisting the session
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// No stored session where one is required
    #[error("missing session")]
    MissingSession,
}

impl AuthError {
    /// Network-class failure: a transport error or a response the client
    /// could not interpret. Retryable with the same input.
    pub fn is_network(&self) -> bool {
        matches!(self, AuthError::Transport(_) | AuthError::Malformed(_))
    }

    /// The server rejected the credentials or the update
    pub fn is_rejection(&self) -> bool {
        matches!(self, AuthError::Rejected(_))
    }
}

/// Client for the Monity auth and profile endpoints.
///
/// Stateless between calls: every operation reads or writes the persisted
/// session record through the store, so repeated session checks against
/// unchanged storage return the same result.
pub struct AuthClient {
    /// Base URL of the API deployment
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Durable storage for the token/user record
    store: Arc<dyn SecureStore>,
}

impl AuthClient {
    /// Create a new auth client against `url`, persisting sessions to `store`
    pub fn new(url: &str, client: Client, store: Arc<dyn SecureStore>) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            client,
            store,
        }
    }

    fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/api/auth{}", self.url, path)
    }

    fn profile_endpoint(&self) -> String {
        format!("{}/api/user/profile", self.url)
    }

    /// Read the persisted session state.
    ///
    /// Never fails: a store read error and an absent or blank token both read
    /// as [`SessionState::Unauthenticated`]. Called on app launch and whenever
    /// a gated screen regains focus.
    pub async fn check_session(&self) -> SessionState {
        let token = match self.store.get(TOKEN_KEY).await {
            Ok(token) => token,
            Err(err) => {
                warn!("session check: store read failed: {}", err);
                return SessionState::Unauthenticated;
            }
        };

        match token {
            Some(token) if !token.trim().is_empty() => {
                SessionState::Authenticated(self.cached_user().await)
            }
            _ => SessionState::Unauthenticated,
        }
    }

    /// The cached profile snapshot, if one is stored and parseable
    pub async fn cached_user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY).await.ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!("cached user blob is unreadable: {}", err);
                None
            }
        }
    }

    /// The stored bearer token, if any; blanks and store errors read as `None`
    pub async fn token(&self) -> Option<String> {
        self.store
            .get(TOKEN_KEY)
            .await
            .ok()
            .flatten()
            .filter(|token| !token.trim().is_empty())
    }

    /// Log in with username and password.
    ///
    /// On success the returned session is already persisted. Empty fields are
    /// rejected locally before any request is made.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::Validation("username"));
        }
        if password.is_empty() {
            return Err(AuthError::Validation("password"));
        }

        let payload = serde_json::json!({
            "username": username,
            "password": password,
        });
        self.authenticate(&self.auth_endpoint("/login"), &payload)
            .await
    }

    /// Register a new account; `email` is required in addition to the login fields
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::Validation("username"));
        }
        if email.trim().is_empty() {
            return Err(AuthError::Validation("email"));
        }
        if password.is_empty() {
            return Err(AuthError::Validation("password"));
        }

        let payload = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        self.authenticate(&self.auth_endpoint("/register"), &payload)
            .await
    }

    async fn authenticate(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<Session, AuthError> {
        debug!("POST {}", url);
        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(rejection(status, &body, "Invalid credentials"));
        }

        let auth: AuthResponse = serde_json::from_str(&body)?;
        let session = Session {
            token: auth.token,
            user: auth.user,
        };
        self.persist_session(&session).await?;
        Ok(session)
    }

    /// Persist the token/user pair as one logical record.
    ///
    /// The user blob is written first and the token last, so a failure between
    /// the two writes never reads back as a live session: the session check
    /// keys off the token alone.
    async fn persist_session(&self, session: &Session) -> Result<(), AuthError> {
        match &session.user {
            Some(user) => {
                self.store
                    .set(USER_KEY, &serde_json::to_string(user)?)
                    .await?
            }
            None => self.store.remove(USER_KEY).await?,
        }
        self.store.set(TOKEN_KEY, &session.token).await?;
        Ok(())
    }

    /// Clear the persisted session.
    ///
    /// Always succeeds locally: the token is removed first (a failed second
    /// delete still reads as logged out) and store errors are logged rather
    /// than surfaced. No remote revoke call is made.
    pub async fn logout(&self) {
        if let Err(err) = self.store.remove(TOKEN_KEY).await {
            warn!("logout: failed to remove token: {}", err);
        }
        if let Err(err) = self.store.remove(USER_KEY).await {
            warn!("logout: failed to remove user blob: {}", err);
        }
    }

    /// Update the profile on the server.
    ///
    /// On success the cached snapshot is overwritten with the server's
    /// returned canonical user object, never the local patch. Requires a
    /// stored token; returns [`AuthError::MissingSession`] without touching
    /// the network when logged out.
    pub async fn update_profile(&self, patch: &ProfileUpdate) -> Result<User, AuthError> {
        let token = self.token().await.ok_or(AuthError::MissingSession)?;

        let url = self.profile_endpoint();
        debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .bearer_auth(&token)
            .json(patch)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(rejection(status, &body, "Update failed"));
        }

        let profile: ProfileResponse = serde_json::from_str(&body)?;
        self.store
            .set(USER_KEY, &serde_json::to_string(&profile.user)?)
            .await?;
        Ok(profile.user)
    }
}

/// Classify a non-2xx response: a parseable `{error|message}` body is a
/// server rejection carrying its message; anything else is network-class
fn rejection(status: StatusCode, body: &str, fallback: &str) -> AuthError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error_body) => AuthError::Rejected(error_body.message_or(fallback)),
        Err(err) => {
            warn!("unparseable error body (status {}): {}", status, err);
            AuthError::Malformed(err)
        }
    }
}
