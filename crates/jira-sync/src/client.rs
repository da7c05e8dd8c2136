//! REST client for Jira issue creation.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use tracing::{debug, error, info, instrument};

use crate::config::JiraConfig;
use crate::error::JiraError;
use crate::models::{CreateIssueRequest, CreatedIssue, JiraErrorBody};

/// Jira REST API client.
///
/// Holds the connection settings it was constructed with; it never reads
/// process environment. Credentials are applied per request as basic
/// auth and are kept out of every log line.
#[derive(Clone)]
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl JiraClient {
    /// Create a new client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &JiraConfig) -> Result<Self, JiraError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| JiraError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            email: config.email.clone(),
            api_token: config.api_token.clone(),
        })
    }

    /// Create an issue and return its identifiers.
    ///
    /// # Errors
    ///
    /// Transport failures surface as [`JiraError::Http`] unchanged; a
    /// rejection is parsed into its structured error list, logged in
    /// detail, and returned as [`JiraError::Rejected`]. No retries.
    #[instrument(skip(self, request), fields(
        project = %request.fields.project.key,
        issue_type = %request.fields.issuetype.name,
    ))]
    pub async fn create_issue(
        &self,
        request: &CreateIssueRequest,
    ) -> Result<CreatedIssue, JiraError> {
        let url = format!("{}/rest/api/3/issue", self.base_url);

        debug!(url = %url, "Submitting issue to Jira");

        let response = match self
            .client
            .post(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Failed to reach Jira");
                return Err(JiraError::Http(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::rejection(status, &body));
        }

        let body = response.text().await?;
        let created: CreatedIssue = serde_json::from_str(&body)
            .map_err(|e| JiraError::InvalidResponse(format!("{e}: {body}")))?;

        info!(key = %created.key, id = %created.id, "Created Jira issue");

        Ok(created)
    }

    /// Browse URL for an issue key.
    #[must_use]
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{key}", self.base_url)
    }

    /// Turn a non-success response into a domain error, preferring Jira's
    /// structured error list and keeping the raw body otherwise.
    fn rejection(status: reqwest::StatusCode, body: &str) -> JiraError {
        let parsed = serde_json::from_str::<JiraErrorBody>(body).unwrap_or_default();

        let (messages, field_errors) = if parsed.is_empty() {
            let raw = body.trim();
            let messages = if raw.is_empty() {
                Vec::new()
            } else {
                vec![raw.to_string()]
            };
            (messages, std::collections::BTreeMap::new())
        } else {
            (parsed.error_messages, parsed.errors)
        };

        error!(
            status = %status,
            messages = ?messages,
            field_errors = ?field_errors,
            "Jira rejected the issue payload"
        );

        JiraError::Rejected {
            status,
            messages,
            field_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn client() -> JiraClient {
        JiraClient::new(&JiraConfig::new(
            "https://example.atlassian.net/",
            "bot@example.com",
            "token",
            "PROJ",
        ))
        .unwrap()
    }

    #[test]
    fn browse_url_joins_base_and_key() {
        assert_eq!(
            client().browse_url("PROJ-7"),
            "https://example.atlassian.net/browse/PROJ-7"
        );
    }

    #[test]
    fn rejection_prefers_structured_errors() {
        let err = JiraClient::rejection(
            StatusCode::BAD_REQUEST,
            r#"{"errorMessages": ["Project is required"], "errors": {"summary": "Summary must be set"}}"#,
        );

        let JiraError::Rejected {
            status,
            messages,
            field_errors,
        } = err
        else {
            panic!("expected rejection");
        };
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(messages, vec!["Project is required"]);
        assert_eq!(
            field_errors.get("summary"),
            Some(&"Summary must be set".to_string())
        );
    }

    #[test]
    fn rejection_keeps_raw_body_when_unstructured() {
        let err = JiraClient::rejection(StatusCode::BAD_GATEWAY, "upstream proxy error\n");

        let JiraError::Rejected {
            messages,
            field_errors,
            ..
        } = err
        else {
            panic!("expected rejection");
        };
        assert_eq!(messages, vec!["upstream proxy error"]);
        assert!(field_errors.is_empty());
    }

    #[test]
    fn rejection_tolerates_empty_body() {
        let err = JiraClient::rejection(StatusCode::UNAUTHORIZED, "");

        let JiraError::Rejected { messages, .. } = err else {
            panic!("expected rejection");
        };
        assert!(messages.is_empty());
    }
}
