//! Monity transaction store client for Rust
//!
//! This crate covers the `/api/expensive` endpoints and everything derived
//! from their data:
//!
//! - [`ExpensesClient`] fetches, creates, and deletes transactions
//! - [`aggregate`] computes the sorted, filtered, and summarized views
//! - [`refresh`] arbitrates overlapping refreshes (last writer wins)
//! - [`export`] renders the CSV handed to the platform share sheet

pub mod aggregate;
pub mod export;
pub mod refresh;
mod types;

use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

pub use types::{NewExpense, Transaction, TransactionKind};

/// Error type for transaction store operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// A required field was empty; caught locally, no request was made
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// The server understood the request and refused it
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Transport failure: no connectivity, timeout, TLS failure
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a body outside the wire contract
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ExpenseError {
    /// Network-class failure; retryable with the same input
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ExpenseError::Transport(_) | ExpenseError::Malformed(_)
        )
    }

    /// The server rejected the operation
    pub fn is_rejection(&self) -> bool {
        matches!(self, ExpenseError::Rejected(_))
    }
}

/// Client for the Monity transaction store.
///
/// The bearer token is fixed at construction; acquire a fresh client after
/// the session changes. Mutations never patch local state — callers re-fetch
/// the full collection afterwards so derived views stay consistent with the
/// server.
pub struct ExpensesClient {
    /// Base URL of the API deployment
    url: String,

    /// Bearer token for the authenticated user
    token: String,

    /// HTTP client used for requests
    client: Client,
}

impl ExpensesClient {
    /// Create a new client against `url`, authenticating with `token`
    pub fn new(url: &str, token: &str, client: Client) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/expensive{}", self.url, path)
    }

    /// Fetch the full transaction collection.
    ///
    /// A 2xx payload that is not a JSON array coerces to the empty
    /// collection, and elements that do not parse are dropped; see
    /// [`aggregate::from_payload`].
    pub async fn fetch_all(&self) -> Result<Vec<Transaction>, ExpenseError> {
        let url = self.endpoint("/all");
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(rejection(status, &body, "Could not load transactions"));
        }

        let payload: serde_json::Value = serde_json::from_str(&body)?;
        Ok(aggregate::from_payload(&payload))
    }

    /// Create a transaction and return the server's record.
    ///
    /// The local optimistic copy is not to be trusted: callers re-fetch the
    /// collection to pick up the server-assigned id and creation time.
    pub async fn add(&self, expense: &NewExpense) -> Result<Transaction, ExpenseError> {
        if expense.title.trim().is_empty() {
            return Err(ExpenseError::Validation("title"));
        }

        let url = self.endpoint("/add");
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&expense.to_payload())
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(rejection(status, &body, "Failed to save transaction"));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Delete a transaction by id and return the server's message
    pub async fn delete(&self, id: &str) -> Result<String, ExpenseError> {
        let url = self.endpoint(&format!("/delete/{}", id));
        debug!("DELETE {}", url);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(rejection(status, &body, "Delete failed"));
        }

        let reply: DeleteResponse = serde_json::from_str(&body)?;
        Ok(reply.message)
    }
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    #[serde(default)]
    message: String,
}

/// Error body shape shared by the expense endpoints
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Classify a non-2xx response: a parseable `{message|error}` body is a
/// server rejection carrying its message; anything else is network-class
fn rejection(status: StatusCode, body: &str, fallback: &str) -> ExpenseError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error_body) => ExpenseError::Rejected(
            error_body
                .message
                .or(error_body.error)
                .unwrap_or_else(|| fallback.to_string()),
        ),
        Err(err) => {
            warn!("unparseable error body (status {}): {}", status, err);
            ExpenseError::Malformed(err)
        }
    }
}
