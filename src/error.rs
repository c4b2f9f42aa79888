use thiserror::Error;

/// Unexpected failures: broken preconditions and transport faults.
///
/// Expected remote failures (a non-2xx answer from the service) are not
/// errors; they are the [`Failure`](crate::ClientResponse::Failure) arm of
/// [`ClientResponse`](crate::ClientResponse).
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Response field is not valid Base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Decoded response field is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
