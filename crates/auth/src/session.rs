//! Session state used to gate navigation

use serde::{Deserialize, Serialize};

use crate::types::User;

/// An authenticated session: the bearer token plus the cached profile snapshot.
///
/// Created by a successful login or register call, persisted as one logical
/// record, and destroyed by logout. The two halves are never written or
/// cleared independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer credential issued by the auth service
    pub token: String,

    /// Profile snapshot returned alongside the token, if any
    pub user: Option<User>,
}

/// Result of a session check
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// A non-empty token is stored; the cached profile may still be absent
    Authenticated(Option<User>),

    /// No usable token is stored
    Unauthenticated,
}

impl SessionState {
    /// Whether the app should treat the user as logged in
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}
