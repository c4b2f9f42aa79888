use tracing::debug;

use crate::{
    response::{ClientResponse, ErrorResponse},
    types::{CreateSubmission, Submission, SubmissionRequest, SubmissionResponse},
    Result,
};

/// Submission operations, bound to `{base_url}/submissions`.
///
/// Holds the shared transport set up by
/// [`Judge0Client`](crate::Judge0Client); nothing here is mutated per call,
/// so any number of operations may run concurrently.
pub struct SubmissionsEndpoint {
    http: reqwest::Client,
    endpoint: String,
}

impl SubmissionsEndpoint {
    pub(crate) fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/submissions", base_url.trim_end_matches('/')),
        }
    }

    /// Creates a new submission. The created submission waits in the queue
    /// to be processed; on success the returned value carries the token to
    /// poll with.
    ///
    /// With `base64_encoded` the source code, stdin and expected output are
    /// Base64-encoded before transmission, which makes them binary-safe.
    ///
    /// `wait = true` asks the service to answer only once processing has
    /// finished. The service documentation advises against it (it holds a
    /// connection open per submission), but this layer does not prevent it.
    ///
    /// A non-2xx answer is returned as [`ClientResponse::Failure`];
    /// transport faults and undecodable success bodies are `Err`.
    pub async fn create(
        &self,
        submission: CreateSubmission,
        base64_encoded: bool,
        wait: bool,
    ) -> Result<ClientResponse<Submission>> {
        let query = [
            ("wait", bool_param(wait)),
            ("base64_encoded", bool_param(base64_encoded)),
        ];

        let submission = if base64_encoded {
            submission.encode_base64()
        } else {
            submission
        };
        let request = SubmissionRequest::from(submission);

        debug!(
            "creating submission for language {} (wait={})",
            request.language_id, wait
        );

        let response = self
            .http
            .post(&self.endpoint)
            .query(&query)
            .json(&request)
            .send()
            .await?;

        if response.status().is_success() {
            let wire: SubmissionResponse = response.json().await?;
            Ok(ClientResponse::Success(Submission::from(wire)))
        } else {
            let error = ErrorResponse::from_response(response).await?;
            debug!("submission rejected with status {}", error.status);
            Ok(ClientResponse::Failure(error))
        }
    }

    /// Fetches a submission by token.
    ///
    /// `base64_encoded` must match the encoding the caller asked the service
    /// for: when set, `stdout`, `stderr`, `compile_output` and `message` are
    /// Base64-decoded after conversion. `fields` optionally narrows the
    /// response to a comma-separated list of field names; the service treats
    /// an absent and an empty list identically.
    ///
    /// Repeated calls are how processing progress is observed: the service
    /// moves each submission from queued through processing to one terminal
    /// status, and this layer never polls on its own.
    pub async fn get(
        &self,
        token: &str,
        base64_encoded: bool,
        fields: Option<&str>,
    ) -> Result<ClientResponse<Submission>> {
        let query = [
            ("base64_encoded", bool_param(base64_encoded)),
            ("fields", fields.unwrap_or("")),
        ];

        debug!("fetching submission {}", token);

        let response = self
            .http
            .get(format!("{}/{}", self.endpoint, token))
            .query(&query)
            .send()
            .await?;

        if response.status().is_success() {
            let wire: SubmissionResponse = response.json().await?;
            let submission = Submission::from(wire);
            let submission = if base64_encoded {
                submission.decode_base64()?
            } else {
                submission
            };
            Ok(ClientResponse::Success(submission))
        } else {
            let error = ErrorResponse::from_response(response).await?;
            debug!(
                "fetching submission {} rejected with status {}",
                token, error.status
            );
            Ok(ClientResponse::Failure(error))
        }
    }
}

/// The service contract wants string-typed query values, not booleans.
fn bool_param(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientConfig, Error, Judge0Client};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String) -> Judge0Client {
        Judge0Client::new(ClientConfig::new(base_url)).unwrap()
    }

    #[tokio::test]
    async fn test_create_sends_the_wire_body_and_query_parameters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/submissions"))
            .and(query_param("wait", "false"))
            .and(query_param("base64_encoded", "false"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({
                "source_code": "print(1)",
                "language_id": 71,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "token": "abc123",
                "created_at": "2024-01-01T00:00:00Z",
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let response = client
            .submissions
            .create(CreateSubmission::new("print(1)", 71), false, false)
            .await
            .unwrap();

        let submission = response.into_success().unwrap();
        assert_eq!(submission.token, "abc123");
        assert_eq!(
            submission.created_at.as_deref(),
            Some("2024-01-01T00:00:00Z")
        );
        assert_eq!(submission.status, None);
        assert_eq!(submission.stdout, None);
    }

    #[tokio::test]
    async fn test_create_encodes_the_body_when_base64_is_requested() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/submissions"))
            .and(query_param("wait", "false"))
            .and(query_param("base64_encoded", "true"))
            .and(body_json(json!({
                "source_code": "cHJpbnQoMSk=",
                "language_id": 71,
                "stdin": "NSA3Cg==",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "token": "abc123",
                "created_at": "2024-01-01T00:00:00Z",
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let submission = CreateSubmission::new("print(1)", 71).with_stdin("5 7\n");
        let response = client
            .submissions
            .create(submission, true, false)
            .await
            .unwrap();

        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_create_forwards_the_wait_flag() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/submissions"))
            .and(query_param("wait", "true"))
            .and(query_param("base64_encoded", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "abc123",
                "created_at": "2024-01-01T00:00:00Z",
                "finished_at": "2024-01-01T00:00:02Z",
                "status": {"id": 3, "description": "Accepted"},
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let response = client
            .submissions
            .create(CreateSubmission::new("print(1)", 71), false, true)
            .await
            .unwrap();

        let submission = response.into_success().unwrap();
        assert_eq!(submission.status.map(|s| s.id), Some(3));
    }

    #[tokio::test]
    async fn test_create_wraps_rejections_instead_of_failing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/submissions"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(json!({"error": "language_id is invalid"})),
            )
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let response = client
            .submissions
            .create(CreateSubmission::new("print(1)", 9999), false, false)
            .await
            .unwrap();

        let error = response.into_failure().unwrap();
        assert_eq!(error.status, 422);
        assert!(error.body.contains("language_id is invalid"));
    }

    #[tokio::test]
    async fn test_create_propagates_transport_faults() {
        // Port 1 is unbindable without privileges, so nothing answers.
        let client = test_client("http://127.0.0.1:1".to_string());
        let result = client
            .submissions
            .create(CreateSubmission::new("print(1)", 71), false, false)
            .await;

        assert!(matches!(result, Err(Error::HttpClient(_))));
    }

    #[tokio::test]
    async fn test_create_errors_when_a_success_body_does_not_parse() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/submissions"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"unexpected": "shape"})),
            )
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let result = client
            .submissions
            .create(CreateSubmission::new("print(1)", 71), false, false)
            .await;

        assert!(matches!(result, Err(Error::HttpClient(_))));
    }

    #[tokio::test]
    async fn test_get_maps_the_wire_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/submissions/abc123"))
            .and(query_param("base64_encoded", "false"))
            .and(query_param("fields", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "abc123",
                "created_at": "2024-01-01T00:00:00Z",
                "finished_at": "2024-01-01T00:00:02Z",
                "stdout": "hello\n",
                "time": "0.002",
                "memory": "376",
                "status": {"id": 3, "description": "Accepted"},
                "status_id": 3,
                "language_id": 71,
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let response = client.submissions.get("abc123", false, None).await.unwrap();

        let submission = response.into_success().unwrap();
        assert_eq!(submission.stdout.as_deref(), Some("hello\n"));
        assert_eq!(
            submission.status,
            Some(crate::SubmissionStatus {
                id: 3,
                description: "Accepted".to_string(),
            })
        );
        assert_eq!(submission.memory.as_deref(), Some("376"));
    }

    #[tokio::test]
    async fn test_get_decodes_outputs_when_base64_was_requested() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/submissions/abc123"))
            .and(query_param("base64_encoded", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "abc123",
                "created_at": "2024-01-01T00:00:00Z",
                "stdout": "aGVsbG8K",
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let response = client.submissions.get("abc123", true, None).await.unwrap();

        let submission = response.into_success().unwrap();
        assert_eq!(submission.stdout.as_deref(), Some("hello\n"));
    }

    #[tokio::test]
    async fn test_get_passes_the_fields_list_through() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/submissions/abc123"))
            .and(query_param("fields", "stdout,status,token,created_at"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "abc123",
                "created_at": "2024-01-01T00:00:00Z",
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let response = client
            .submissions
            .get("abc123", false, Some("stdout,status,token,created_at"))
            .await
            .unwrap();

        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_get_wraps_unknown_tokens_as_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/submissions/bad-token"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})),
            )
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let result = client.submissions.get("bad-token", false, None).await;

        // The 404 is an expected outcome, not an Err.
        let error = result.unwrap().into_failure().unwrap();
        assert_eq!(error.status, 404);
        assert!(error.body.contains("not found"));
    }

    #[tokio::test]
    async fn test_get_propagates_transport_faults() {
        let client = test_client("http://127.0.0.1:1".to_string());
        let result = client.submissions.get("abc123", false, None).await;

        assert!(matches!(result, Err(Error::HttpClient(_))));
    }
}
