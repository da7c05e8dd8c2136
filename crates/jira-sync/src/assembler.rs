//! Assembly of the Jira submission payload from classification output and
//! GitHub issue metadata.

use serde_json::Value;

use crate::adf::{self, AdfDocument, AdfNode, Mark, TextNode};
use crate::models::{
    ClassificationResult, CreateIssueFields, CreateIssueRequest, NameRef, Priority, ProjectRef,
};

/// Description input accepted by [`assemble_submission`].
///
/// The three-way fallback is explicit: plain text is rendered line by
/// line, a valid document passes through untouched, and anything else is
/// stringified before rendering. Resolution never fails.
#[derive(Debug, Clone)]
pub enum DescriptionSource {
    /// No description supplied.
    Absent,
    /// Plain text, one paragraph per non-empty line.
    Text(String),
    /// An already-built document, used as-is when valid.
    Document(AdfDocument),
    /// Arbitrary JSON, stringified before rendering.
    Other(Value),
}

impl DescriptionSource {
    /// Resolve into a renderable document.
    #[must_use]
    pub fn resolve(self) -> AdfDocument {
        match self {
            Self::Absent => AdfDocument::empty(),
            Self::Text(text) => adf::from_plain_text(&text),
            Self::Document(doc) if doc.is_valid() => doc,
            Self::Document(doc) => match serde_json::to_value(&doc) {
                Ok(value) => adf::from_plain_text(&render_value(&value)),
                Err(_) => AdfDocument::empty(),
            },
            Self::Other(value) => adf::from_plain_text(&render_value(&value)),
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render the GitHub provenance header for a synced issue.
///
/// Block order is fixed: source link, author, timestamp, a rule, then the
/// classification echo (labels, issue type, priority, each emphasized)
/// and finally the issue body behind a second rule when it has
/// non-whitespace content.
#[must_use]
pub fn render_github_metadata(
    url: &str,
    author: &str,
    created_at: &str,
    body: &str,
    classification: Option<&ClassificationResult>,
) -> AdfDocument {
    let mut blocks = vec![
        AdfNode::Paragraph {
            content: vec![
                TextNode::plain("Original GitHub Issue: "),
                TextNode::marked(url, vec![Mark::link(url)]),
            ],
        },
        AdfNode::paragraph_text(format!("Created by: {author}")),
        AdfNode::paragraph_text(format!("Created at: {created_at}")),
        AdfNode::Rule,
    ];

    if let Some(classification) = classification {
        if !classification.labels.is_empty() {
            blocks.push(emphasized(format!(
                "GitHub Labels: {}",
                classification.labels.join(", ")
            )));
        }
        blocks.push(emphasized(format!(
            "Mapped to Issue Type: {}",
            classification.issue_type
        )));
        blocks.push(emphasized(format!("Priority: {}", classification.priority)));
    }

    if !body.trim().is_empty() {
        blocks.push(AdfNode::Rule);
        blocks.extend(adf::from_plain_text(body).content);
    }

    AdfDocument::with_content(blocks)
}

fn emphasized(text: String) -> AdfNode {
    AdfNode::Paragraph {
        content: vec![TextNode::marked(text, vec![Mark::Em])],
    }
}

/// Build the create-issue request for the Jira REST API.
///
/// `priority` and `components` become Jira name wrappers; empty
/// components are omitted from the wire form entirely.
#[must_use]
pub fn assemble_submission(
    project_key: &str,
    issue_type: &str,
    summary: &str,
    description: DescriptionSource,
    priority: Option<Priority>,
    components: &[String],
) -> CreateIssueRequest {
    CreateIssueRequest {
        fields: CreateIssueFields {
            project: ProjectRef {
                key: project_key.to_string(),
            },
            summary: summary.to_string(),
            issuetype: NameRef::new(issue_type),
            description: description.resolve(),
            priority: priority.map(|p| NameRef::new(p.as_str())),
            components: components.iter().map(NameRef::new).collect(),
        },
    }
}
