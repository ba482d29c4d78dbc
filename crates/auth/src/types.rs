//! Wire types for the Monity auth endpoints

use serde::{Deserialize, Serialize};

/// Cached profile snapshot, mirroring the server's user object.
///
/// Every field is optional; unknown server fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Avatar image URL or data URI
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Partial profile update for `PUT /api/user/profile`.
///
/// `None` fields are omitted from the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Successful login/register payload
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Canonical user wrapper returned by the profile endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileResponse {
    pub user: User,
}

/// Error body shape shared by the auth endpoints; non-2xx responses carry
/// their message under either key
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The server-supplied message, preferring `error`, falling back to
    /// `fallback` when the body carries neither key
    pub(crate) fn message_or(self, fallback: &str) -> String {
        self.error
            .or(self.message)
            .unwrap_or_else(|| fallback.to_string())
    }
}
