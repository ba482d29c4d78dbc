//! Monity Rust Client Library
//!
//! A Rust client for the Monity expense-tracking API, providing session
//! management (login, register, logout, session checks), access to the
//! remote transaction store, and the pure aggregation views (recency
//! ordering, month filtering, income/expense summaries) that the mobile
//! screens render.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use monity_rust::{aggregate, MemoryStore, Monity};
//!
//! # async fn run() -> Result<(), monity_rust::Error> {
//! let monity = Monity::new(
//!     "https://monity-api.onrender.com",
//!     Arc::new(MemoryStore::new()),
//! )?;
//!
//! monity.auth().login("ada", "hunter2").await?;
//!
//! let transactions = monity.expenses().await?.fetch_all().await?;
//! let summary = aggregate::summarize(&transactions);
//! println!("balance: {}", summary.balance);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;

use std::sync::Arc;

use reqwest::Client;
use url::Url;

pub use crate::config::ClientOptions;
pub use crate::error::Error;

pub use monity_rust_auth as auth;
pub use monity_rust_expenses as expenses;

pub use monity_rust_auth::{
    AuthClient, AuthError, MemoryStore, ProfileUpdate, SecureStore, Session, SessionState,
    StoreError, User,
};
pub use monity_rust_expenses::aggregate;
pub use monity_rust_expenses::export;
pub use monity_rust_expenses::refresh;
pub use monity_rust_expenses::{
    ExpenseError, ExpensesClient, NewExpense, Transaction, TransactionKind,
};

/// The main entry point for the Monity Rust client
pub struct Monity {
    /// The base URL of the Monity API deployment
    pub url: String,

    /// HTTP client shared by every service client
    pub http_client: Client,

    /// Session manager owning the persisted token/user record
    auth: AuthClient,

    /// Client options
    pub options: ClientOptions,
}

impl Monity {
    /// Create a new Monity client.
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the API deployment
    /// * `store` - Durable secure storage for the session record
    pub fn new(url: &str, store: Arc<dyn SecureStore>) -> Result<Self, Error> {
        Self::new_with_options(url, store, ClientOptions::default())
    }

    /// Create a new Monity client with custom options
    pub fn new_with_options(
        url: &str,
        store: Arc<dyn SecureStore>,
        options: ClientOptions,
    ) -> Result<Self, Error> {
        let parsed = Url::parse(url)?;
        let base = parsed.as_str().trim_end_matches('/').to_string();

        let mut builder = Client::builder().user_agent(options.user_agent.as_str());
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let auth = AuthClient::new(&base, http_client.clone(), store);

        Ok(Self {
            url: base,
            http_client,
            auth,
            options,
        })
    }

    /// Create a client from the `MONITY_API_URL` environment variable
    pub fn from_env(store: Arc<dyn SecureStore>) -> Result<Self, Error> {
        let url = std::env::var("MONITY_API_URL").map_err(|_| {
            Error::Config("MONITY_API_URL environment variable not found".to_string())
        })?;
        Self::new(&url, store)
    }

    /// The session manager
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// A transaction store client wired with the current session's token.
    ///
    /// The token is read at acquisition time, so a client obtained after a
    /// login or logout reflects the new session. Returns
    /// [`Error::MissingSession`] without touching the network when logged
    /// out.
    pub async fn expenses(&self) -> Result<ExpensesClient, Error> {
        let token = self.auth.token().await.ok_or(Error::MissingSession)?;
        Ok(ExpensesClient::new(
            &self.url,
            &token,
            self.http_client.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_urls() {
        let result = Monity::new("not a url", Arc::new(MemoryStore::new()));
        assert!(matches!(result, Err(Error::Url(_))));
    }

    #[test]
    fn expenses_requires_a_session() {
        tokio_test::block_on(async {
            let monity =
                Monity::new("http://localhost:0", Arc::new(MemoryStore::new())).unwrap();
            let result = monity.expenses().await;
            assert!(matches!(result, Err(Error::MissingSession)));
        });
    }
}
