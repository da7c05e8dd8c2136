//! Error types for Jira submission.

use reqwest::StatusCode;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur when creating a Jira issue.
#[derive(Debug, Error)]
pub enum JiraError {
    /// Request failed before a response arrived (network, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Jira rejected the payload; carries the structured error list when
    /// the response body had one, the raw body otherwise.
    #[error("Jira rejected the request ({status}): {}", .messages.join("; "))]
    Rejected {
        status: StatusCode,
        messages: Vec<String>,
        field_errors: BTreeMap<String, String>,
    },

    /// A success response whose body could not be interpreted.
    #[error("Unexpected response from Jira: {0}")]
    InvalidResponse(String),

    /// Client-side configuration problem (e.g. HTTP client construction).
    #[error("Invalid Jira client configuration: {0}")]
    Config(String),
}
