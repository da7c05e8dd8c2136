//! Entity definitions for GitHub issues and Jira wire types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::adf::AdfDocument;

/// GitHub issue as read from the source repository.
#[derive(Debug, Clone, Default)]
pub struct GithubIssue {
    /// Issue title
    pub title: String,
    /// Free-form body text, newline-delimited paragraphs
    pub body: String,
    /// Label names in GitHub order; earlier labels win classification ties
    pub labels: Vec<String>,
}

/// Jira priority level assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Highest,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Jira priority name as it appears in the create-issue payload.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Highest => "Highest",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of classifying a GitHub issue against a mapping configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Mapped Jira issue type name
    pub issue_type: String,
    /// Derived priority level
    pub priority: Priority,
    /// Component tags in vocabulary order; empty when no platform area matched
    pub components: Vec<String>,
    /// Input labels echoed for audit
    pub labels: Vec<String>,
}

/// Name wrapper used by Jira for issue type, priority, and component
/// references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    pub name: String,
}

impl NameRef {
    /// Wrap a name for the Jira payload.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Project reference by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub key: String,
}

/// Field set of a create-issue request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIssueFields {
    pub project: ProjectRef,
    pub summary: String,
    pub issuetype: NameRef,
    pub description: AdfDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<NameRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<NameRef>,
}

/// Create-issue request body for `POST /rest/api/3/issue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIssueRequest {
    pub fields: CreateIssueFields,
}

/// Response returned by Jira on successful issue creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    /// Numeric issue ID
    pub id: String,
    /// Issue key (e.g. "PROJ-123")
    pub key: String,
    /// REST URL of the created issue
    #[serde(rename = "self")]
    pub self_url: String,
}

/// Structured error body returned by Jira when a payload is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraErrorBody {
    /// Request-level error messages
    #[serde(default)]
    pub error_messages: Vec<String>,
    /// Field name to validation message
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl JiraErrorBody {
    /// True when the body carries no structured errors at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.error_messages.is_empty() && self.errors.is_empty()
    }
}
