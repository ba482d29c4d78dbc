//! Error handling for the Monity client

use thiserror::Error;

use monity_rust_auth::AuthError;
use monity_rust_expenses::ExpenseError;

/// Unified error type for the Monity client facade
#[derive(Error, Debug)]
pub enum Error {
    /// Session and authentication errors
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Transaction store errors
    #[error("expense error: {0}")]
    Expense(#[from] ExpenseError),

    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Base URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An operation that needs a session ran while logged out
    #[error("missing session")]
    MissingSession,
}
