//! # Judge0 Client
//!
//! An async client library for the [Judge0](https://judge0.com) code
//! execution service: submit source code with execution parameters, then
//! fetch the results (stdout, stderr, exit status, timing, memory) by
//! token.
//!
//! ## Features
//!
//! - Typed submission parameters and results, converted explicitly to and
//!   from the service's wire format
//! - Optional Base64 transport for binary-unsafe source code and outputs
//! - Expected service rejections wrapped as values instead of errors
//! - Configurable authorization/authentication headers with redacted tokens
//!
//! ## Example
//!
//! ```rust,no_run
//! use judge0_client::{ClientConfig, ClientResponse, CreateSubmission, Judge0Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://judge0.example.com")
//!         .with_authentication_token("your-token");
//!     let client = Judge0Client::new(config)?;
//!
//!     // Submit a program...
//!     let submission = CreateSubmission::new("print(40 + 2)", 71).with_cpu_time_limit(2.0);
//!     let created = match client.submissions.create(submission, false, false).await? {
//!         ClientResponse::Success(created) => created,
//!         ClientResponse::Failure(error) => return Err(error.into()),
//!     };
//!
//!     // ...and poll its token until the service reports a terminal status.
//!     match client.submissions.get(&created.token, false, None).await? {
//!         ClientResponse::Success(result) => {
//!             println!("status: {:?}", result.status);
//!             println!("stdout: {:?}", result.stdout);
//!         }
//!         ClientResponse::Failure(error) => eprintln!("lookup failed: {}", error),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Two failure classes are kept apart by type:
//!
//! - A non-2xx answer from the service is an *expected* outcome and comes
//!   back as [`ClientResponse::Failure`] carrying the raw status and body.
//! - Transport faults, timeouts and undecodable success bodies are
//!   *defects* and come back as [`Error`] through the outer `Result`.
//!
//! [`Judge0Client::ping`] is the one exception: it collapses both classes
//! into `false`, which is all a liveness check needs.
//!
//! ## Security Considerations
//!
//! Auth tokens are sent on every request but never logged: header values
//! are marked sensitive and [`ClientConfig`]'s `Debug` output redacts them.
//! Submitted source code is not logged either.

mod client;
mod config;
mod error;
mod response;
mod submissions;
mod types;

pub use client::Judge0Client;
pub use config::{ClientConfig, DEFAULT_AUTHENTICATION_HEADER, DEFAULT_AUTHORIZATION_HEADER};
pub use error::Error;
pub use response::{ClientResponse, ErrorResponse};
pub use submissions::SubmissionsEndpoint;
pub use types::*;

/// Result type for client operations. The error arm is for defects;
/// expected service rejections live in [`ClientResponse::Failure`].
pub type Result<T> = std::result::Result<T, Error>;
