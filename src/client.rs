use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use crate::{config::ClientConfig, error::Error, submissions::SubmissionsEndpoint, Result};

/// Client for a Judge0 instance.
///
/// Owns the transport configuration: base address, content type and auth
/// headers are fixed at construction and never mutated per call, so one
/// client can serve any number of concurrent calls.
pub struct Judge0Client {
    http: reqwest::Client,
    base_url: String,

    /// The submission endpoints.
    pub submissions: SubmissionsEndpoint,
}

impl Judge0Client {
    /// Creates a client from the given configuration.
    ///
    /// Fails with [`Error::Configuration`] when a configured header name or
    /// token cannot form a valid HTTP header, and with
    /// [`Error::HttpClient`] when the transport cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.authorization_token {
            let (name, value) = auth_header(&config.authorization_header, token)?;
            headers.insert(name, value);
        }
        if let Some(token) = &config.authentication_token {
            let (name, value) = auth_header(&config.authentication_header, token)?;
            headers.insert(name, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let submissions = SubmissionsEndpoint::new(http.clone(), &base_url);

        Ok(Self {
            http,
            base_url,
            submissions,
        })
    }

    /// Checks whether the service is reachable and answering.
    ///
    /// A liveness check, not a diagnostic: error responses and transport
    /// faults both come back as `false`.
    pub async fn ping(&self) -> bool {
        match self.http.get(&self.base_url).send().await {
            Ok(response) => match response.error_for_status() {
                Ok(_) => true,
                Err(error) => {
                    debug!("ping got an error response: {}", error);
                    false
                }
            },
            Err(error) => {
                debug!("ping failed: {}", error);
                false
            }
        }
    }
}

/// Builds one auth header pair. The value is marked sensitive so the token
/// stays out of transport debug output; configuration errors never echo it
/// either.
fn auth_header(name: &str, token: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| Error::Configuration(format!("invalid auth header name: {}", name)))?;
    let mut header_value = HeaderValue::from_str(token).map_err(|_| {
        Error::Configuration(format!(
            "token for header {} contains invalid characters",
            name
        ))
    })?;
    header_value.set_sensitive(true);
    Ok((header_name, header_value))
}
