//! Configuration options for the Monity client

use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("monity-rust/", env!("CARGO_PKG_VERSION"));

/// Configuration options for the Monity client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Timeout applied to every request; `None` leaves the transport default
    pub request_timeout: Option<Duration>,

    /// The `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, value: &str) -> Self {
        self.user_agent = value.to_string();
        self
    }
}
