use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::Result;

/// A program to be executed by the service.
///
/// Only `source_code` and `language_id` are required. Every other parameter
/// is optional and transmitted only when set; defaults for anything left out
/// come from the service's configuration, not from this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSubmission {
    /// Program's source code.
    pub source_code: String,
    /// Identifier of the language to compile/run the program as.
    pub language_id: u32,
    /// Compiler flags, for compiled languages.
    pub compiler_options: Option<String>,
    /// Command line arguments passed to the program.
    pub command_line_arguments: Option<String>,
    /// Input fed to the program on standard input.
    pub stdin: Option<String>,
    /// Output to compare stdout against when grading.
    pub expected_output: Option<String>,
    /// Runtime limit in seconds. Depends on service configuration.
    pub cpu_time_limit: Option<f64>,
    /// Extra time in seconds before a program over the limit is killed.
    pub cpu_extra_time: Option<f64>,
    /// Wall-clock limit in seconds.
    pub wall_time_limit: Option<f64>,
    /// Address space limit in kilobytes.
    pub memory_limit: Option<u32>,
    /// Process stack limit in kilobytes.
    pub stack_limit: Option<u32>,
    /// Cap on the number of processes and/or threads the program may create.
    pub max_processes_and_or_threads: Option<u32>,
    /// When true, `cpu_time_limit` applies per process and thread.
    pub enable_per_process_and_thread_time_limit: Option<bool>,
    /// When true, `memory_limit` applies per process and thread.
    pub enable_per_process_and_thread_memory_limit: Option<bool>,
    /// Limit in kilobytes on files the program creates or modifies.
    pub max_file_size: Option<u32>,
    /// When true, standard error is redirected to standard output.
    pub redirect_stderr_to_stdout: Option<bool>,
    /// When true, the program gets network access.
    pub enable_network: Option<bool>,
    /// Run the program this many times and average time and memory.
    pub number_of_runs: Option<u32>,
    /// Additional files as a Base64-encoded archive; required for
    /// multi-file programs.
    pub additional_files: Option<String>,
    /// URL the service issues a PUT request to once processing finishes.
    pub callback_url: Option<String>,
}

impl CreateSubmission {
    /// Creates a submission with the required fields set and every optional
    /// execution parameter left to the service's defaults.
    pub fn new(source_code: impl Into<String>, language_id: u32) -> Self {
        Self {
            source_code: source_code.into(),
            language_id,
            compiler_options: None,
            command_line_arguments: None,
            stdin: None,
            expected_output: None,
            cpu_time_limit: None,
            cpu_extra_time: None,
            wall_time_limit: None,
            memory_limit: None,
            stack_limit: None,
            max_processes_and_or_threads: None,
            enable_per_process_and_thread_time_limit: None,
            enable_per_process_and_thread_memory_limit: None,
            max_file_size: None,
            redirect_stderr_to_stdout: None,
            enable_network: None,
            number_of_runs: None,
            additional_files: None,
            callback_url: None,
        }
    }

    pub fn with_compiler_options(mut self, compiler_options: impl Into<String>) -> Self {
        self.compiler_options = Some(compiler_options.into());
        self
    }

    pub fn with_command_line_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.command_line_arguments = Some(arguments.into());
        self
    }

    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }

    pub fn with_expected_output(mut self, expected_output: impl Into<String>) -> Self {
        self.expected_output = Some(expected_output.into());
        self
    }

    pub fn with_cpu_time_limit(mut self, seconds: f64) -> Self {
        self.cpu_time_limit = Some(seconds);
        self
    }

    pub fn with_cpu_extra_time(mut self, seconds: f64) -> Self {
        self.cpu_extra_time = Some(seconds);
        self
    }

    pub fn with_wall_time_limit(mut self, seconds: f64) -> Self {
        self.wall_time_limit = Some(seconds);
        self
    }

    pub fn with_memory_limit(mut self, kilobytes: u32) -> Self {
        self.memory_limit = Some(kilobytes);
        self
    }

    pub fn with_stack_limit(mut self, kilobytes: u32) -> Self {
        self.stack_limit = Some(kilobytes);
        self
    }

    pub fn with_max_processes_and_or_threads(mut self, count: u32) -> Self {
        self.max_processes_and_or_threads = Some(count);
        self
    }

    pub fn with_enable_per_process_and_thread_time_limit(mut self, enable: bool) -> Self {
        self.enable_per_process_and_thread_time_limit = Some(enable);
        self
    }

    pub fn with_enable_per_process_and_thread_memory_limit(mut self, enable: bool) -> Self {
        self.enable_per_process_and_thread_memory_limit = Some(enable);
        self
    }

    pub fn with_max_file_size(mut self, kilobytes: u32) -> Self {
        self.max_file_size = Some(kilobytes);
        self
    }

    pub fn with_redirect_stderr_to_stdout(mut self, enable: bool) -> Self {
        self.redirect_stderr_to_stdout = Some(enable);
        self
    }

    pub fn with_enable_network(mut self, enable: bool) -> Self {
        self.enable_network = Some(enable);
        self
    }

    pub fn with_number_of_runs(mut self, runs: u32) -> Self {
        self.number_of_runs = Some(runs);
        self
    }

    pub fn with_additional_files(mut self, files: impl Into<String>) -> Self {
        self.additional_files = Some(files.into());
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Returns the submission with `source_code` Base64-encoded, along with
    /// `stdin` and `expected_output` when present. Absent fields stay absent
    /// and every other field passes through unchanged.
    ///
    /// Pairs with the `base64_encoded` flag on
    /// [`create`](crate::SubmissionsEndpoint::create); the service cannot
    /// tell encoded text from plain text on its own.
    pub fn encode_base64(mut self) -> Self {
        self.source_code = STANDARD.encode(&self.source_code);
        self.stdin = self.stdin.map(|stdin| STANDARD.encode(stdin));
        self.expected_output = self
            .expected_output
            .map(|expected| STANDARD.encode(expected));
        self
    }
}

/// A submission as reported by the service.
///
/// Right after creation only `token` (and possibly a queued/processing
/// `status`) is populated; the execution results fill in once the service
/// finishes processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Opaque token identifying this submission.
    pub token: String,
    /// Standard output of the program.
    pub stdout: Option<String>,
    /// Standard error of the program.
    pub stderr: Option<String>,
    /// Compiler output, for compiled languages.
    pub compile_output: Option<String>,
    /// Status message from the service or its sandbox.
    pub message: Option<String>,
    /// The program's exit code.
    pub exit_code: Option<String>,
    /// Signal the program received before exiting, if any.
    pub exit_signal: Option<String>,
    /// Processing status.
    pub status: Option<SubmissionStatus>,
    /// When the submission was created.
    pub created_at: Option<String>,
    /// When processing finished. Absent while queued or processing.
    pub finished_at: Option<String>,
    /// Program run time in seconds.
    pub time: Option<String>,
    /// Program wall time in seconds.
    pub wall_time: Option<String>,
    /// Memory used by the program in kilobytes.
    pub memory: Option<String>,
    /// Identifier of the language the program ran as.
    pub language_id: Option<u32>,
    /// Numeric status identifier, redundant with `status.id`.
    pub status_id: Option<u32>,
}

impl Submission {
    /// Returns the submission with `stdout`, `stderr`, `compile_output` and
    /// `message` Base64-decoded when present; absent fields stay absent.
    /// ASCII whitespace is stripped before decoding, so line-wrapped values
    /// decode cleanly.
    ///
    /// Only meaningful when the submission was fetched with
    /// `base64_encoded = true`: the data itself does not say whether it is
    /// encoded, so the flag from the original request is authoritative.
    /// Fields that fail to decode are a defect, not an expected outcome.
    pub fn decode_base64(mut self) -> Result<Self> {
        self.stdout = decode_field(self.stdout)?;
        self.stderr = decode_field(self.stderr)?;
        self.compile_output = decode_field(self.compile_output)?;
        self.message = decode_field(self.message)?;
        Ok(self)
    }
}

/// Processing status of a submission.
///
/// The service walks each submission through Queued and Processing into one
/// terminal state (Accepted, Wrong Answer, a limit or runtime error, ...).
/// This layer only ever observes the current state; polling is the caller's
/// business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStatus {
    /// Numeric status identifier.
    pub id: u32,
    /// Human-readable description of the state.
    pub description: String,
}

/// Request body for submission creation, in the service's wire naming.
///
/// Built from a [`CreateSubmission`] immediately before the transport call
/// and dropped right after. Optional fields are skipped entirely when unset
/// so the service applies its defaults instead of seeing nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub source_code: String,
    pub language_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_line_arguments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_time_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_extra_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_time_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes_and_or_threads: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_per_process_and_thread_time_limit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_per_process_and_thread_memory_limit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_stderr_to_stdout: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_network: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_runs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_files: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// Response body for submission calls, in the service's wire naming.
///
/// `created_at` is part of the service contract on every submission;
/// `finished_at` and the execution results appear only once processing is
/// done. As transient as [`SubmissionRequest`]: parsed off the transport and
/// converted right away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub token: String,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub message: Option<String>,
    pub exit_code: Option<String>,
    pub exit_signal: Option<String>,
    pub status: Option<SubmissionStatus>,
    pub created_at: String,
    pub finished_at: Option<String>,
    pub time: Option<String>,
    pub wall_time: Option<String>,
    pub memory: Option<String>,
    pub language_id: Option<u32>,
    pub status_id: Option<u32>,
}

impl From<CreateSubmission> for SubmissionRequest {
    fn from(submission: CreateSubmission) -> Self {
        Self {
            source_code: submission.source_code,
            language_id: submission.language_id,
            compiler_options: submission.compiler_options,
            command_line_arguments: submission.command_line_arguments,
            stdin: submission.stdin,
            expected_output: submission.expected_output,
            cpu_time_limit: submission.cpu_time_limit,
            cpu_extra_time: submission.cpu_extra_time,
            wall_time_limit: submission.wall_time_limit,
            memory_limit: submission.memory_limit,
            stack_limit: submission.stack_limit,
            max_processes_and_or_threads: submission.max_processes_and_or_threads,
            enable_per_process_and_thread_time_limit: submission
                .enable_per_process_and_thread_time_limit,
            enable_per_process_and_thread_memory_limit: submission
                .enable_per_process_and_thread_memory_limit,
            max_file_size: submission.max_file_size,
            redirect_stderr_to_stdout: submission.redirect_stderr_to_stdout,
            enable_network: submission.enable_network,
            number_of_runs: submission.number_of_runs,
            additional_files: submission.additional_files,
            callback_url: submission.callback_url,
        }
    }
}

impl From<SubmissionResponse> for Submission {
    fn from(response: SubmissionResponse) -> Self {
        Self {
            token: response.token,
            stdout: response.stdout,
            stderr: response.stderr,
            compile_output: response.compile_output,
            message: response.message,
            exit_code: response.exit_code,
            exit_signal: response.exit_signal,
            status: response.status,
            created_at: Some(response.created_at),
            finished_at: response.finished_at,
            time: response.time,
            wall_time: response.wall_time,
            memory: response.memory,
            language_id: response.language_id,
            status_id: response.status_id,
        }
    }
}

fn decode_field(field: Option<String>) -> Result<Option<String>> {
    match field {
        Some(encoded) => {
            // The service line-wraps long Base64 values; ASCII whitespace is
            // framing, not payload.
            let compact: Vec<u8> = encoded
                .bytes()
                .filter(|byte| !byte.is_ascii_whitespace())
                .collect();
            Ok(Some(String::from_utf8(STANDARD.decode(compact)?)?))
        }
        None => Ok(None),
    }
}
