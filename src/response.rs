use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Result;

/// The outcome of a call the service actually answered.
///
/// A non-2xx answer is a normal, expected outcome of talking to the service
/// (invalid language id, unknown token, quota exceeded) and lands in
/// [`ClientResponse::Failure`] instead of an [`Err`]. `Err` is reserved for
/// defects: unreachable host, timeouts, a 2xx body that does not parse.
///
/// Exactly one arm holds data; consumers match exhaustively:
///
/// ```
/// use judge0_client::ClientResponse;
///
/// let response: ClientResponse<u32> = ClientResponse::Success(42);
/// match response {
///     ClientResponse::Success(value) => assert_eq!(value, 42),
///     ClientResponse::Failure(error) => panic!("unexpected: {}", error),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ClientResponse<T> {
    /// The service accepted the call; carries the parsed value.
    Success(T),
    /// The service answered with an error status; carries the raw response.
    Failure(ErrorResponse),
}

impl<T> ClientResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ClientResponse::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ClientResponse::Failure(_))
    }

    /// Returns the success value, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            ClientResponse::Success(value) => Some(value),
            ClientResponse::Failure(_) => None,
        }
    }

    /// Returns the error response, if any.
    pub fn failure(&self) -> Option<&ErrorResponse> {
        match self {
            ClientResponse::Success(_) => None,
            ClientResponse::Failure(error) => Some(error),
        }
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            ClientResponse::Success(value) => Some(value),
            ClientResponse::Failure(_) => None,
        }
    }

    pub fn into_failure(self) -> Option<ErrorResponse> {
        match self {
            ClientResponse::Success(_) => None,
            ClientResponse::Failure(error) => Some(error),
        }
    }

    /// Applies `f` to the success value, leaving a failure untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ClientResponse<U> {
        match self {
            ClientResponse::Success(value) => ClientResponse::Success(f(value)),
            ClientResponse::Failure(error) => ClientResponse::Failure(error),
        }
    }

    /// Bridges into a plain [`Result`](std::result::Result) so callers that
    /// treat a service rejection as fatal can use `?` on it.
    pub fn into_result(self) -> std::result::Result<T, ErrorResponse> {
        match self {
            ClientResponse::Success(value) => Ok(value),
            ClientResponse::Failure(error) => Err(error),
        }
    }
}

/// An error answer from the service, kept raw for caller inspection.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("API error: {status} - {body}")]
pub struct ErrorResponse {
    /// HTTP status code of the answer.
    pub status: u16,
    /// Raw response body. The service reports errors as JSON; this layer
    /// does not interpret it.
    pub body: String,
}

impl ErrorResponse {
    /// Reads status and body out of an error response. Failing to read the
    /// body is a transport fault, not part of the expected outcome.
    pub(crate) async fn from_response(response: reqwest::Response) -> Result<Self> {
        Ok(Self {
            status: response.status().as_u16(),
            body: response.text().await?,
        })
    }

    /// Parses the body as JSON, on demand.
    pub fn json(&self) -> std::result::Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
