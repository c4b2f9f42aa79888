use std::fmt;
use std::time::Duration;

/// Default header name for the authorization token.
pub const DEFAULT_AUTHORIZATION_HEADER: &str = "X-Auth-User";

/// Default header name for the authentication token.
pub const DEFAULT_AUTHENTICATION_HEADER: &str = "X-Auth-Token";

/// Connection settings for a [`Judge0Client`](crate::Judge0Client).
///
/// Plain in-process data: nothing here is read from files or the
/// environment. Both tokens are optional; an open instance needs neither.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `https://judge0.example.com`.
    pub base_url: String,

    /// Header name the authorization token is sent under.
    pub authorization_header: String,

    /// Authorization token, if the instance requires one.
    pub authorization_token: Option<String>,

    /// Header name the authentication token is sent under.
    pub authentication_header: String,

    /// Authentication token, if the instance requires one.
    pub authentication_token: Option<String>,

    /// Total per-request timeout, enforced by the transport. `None` leaves
    /// requests unbounded; `wait=true` submissions in particular can run
    /// long.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration for the given base URL with default header
    /// names, no tokens and no timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            authorization_header: DEFAULT_AUTHORIZATION_HEADER.to_string(),
            authorization_token: None,
            authentication_header: DEFAULT_AUTHENTICATION_HEADER.to_string(),
            authentication_token: None,
            timeout: None,
        }
    }

    pub fn with_authorization_token(mut self, token: impl Into<String>) -> Self {
        self.authorization_token = Some(token.into());
        self
    }

    pub fn with_authorization_header(mut self, header: impl Into<String>) -> Self {
        self.authorization_header = header.into();
        self
    }

    pub fn with_authentication_token(mut self, token: impl Into<String>) -> Self {
        self.authentication_token = Some(token.into());
        self
    }

    pub fn with_authentication_header(mut self, header: impl Into<String>) -> Self {
        self.authentication_header = header.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// Tokens never end up in logs: Debug shows whether they are set, not what
// they are.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("authorization_header", &self.authorization_header)
            .field(
                "authorization_token",
                &self.authorization_token.as_ref().map(|_| "<redacted>"),
            )
            .field("authentication_header", &self.authentication_header)
            .field(
                "authentication_token",
                &self.authentication_token.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}
