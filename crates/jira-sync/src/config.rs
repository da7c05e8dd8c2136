//! Mapping and connection configuration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// Issue type used when the mapping file cannot be loaded at all. This is
/// deliberately distinct from a loaded config's `default_issue_type`,
/// which answers for empty or unmatched label lists.
const FALLBACK_ISSUE_TYPE: &str = "Task";

/// Declarative label-to-issue-type mapping table.
///
/// File shape:
///
/// ```json
/// {
///   "mappings": {"Bug Report": "Bug"},
///   "defaultIssueType": "Task"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingConfig {
    /// Label name to Jira issue type name; keys unique, lookup exact.
    #[serde(default)]
    pub mappings: BTreeMap<String, String>,
    /// Issue type when no label matches.
    pub default_issue_type: String,
}

impl MappingConfig {
    /// Compiled-in table used when no mapping file is supplied.
    #[must_use]
    pub fn builtin() -> Self {
        let mappings = BTreeMap::from([
            ("Bug Report".to_string(), "Bug Report".to_string()),
            ("Feature Request".to_string(), "Feature Request".to_string()),
            ("Question".to_string(), "Question".to_string()),
        ]);

        Self {
            mappings,
            default_issue_type: "Task".to_string(),
        }
    }

    /// Hardcoded fallback for a missing or unparsable mapping file.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            mappings: BTreeMap::new(),
            default_issue_type: FALLBACK_ISSUE_TYPE.to_string(),
        }
    }

    /// Read and parse a mapping file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// declares an empty `defaultIssueType`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping config {}", path.display()))?;

        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse mapping config {}", path.display()))?;

        if config.default_issue_type.is_empty() {
            bail!(
                "Mapping config {} declares an empty defaultIssueType",
                path.display()
            );
        }

        Ok(config)
    }

    /// Load a mapping file, degrading to [`MappingConfig::fallback`] when
    /// it is missing or corrupt. The failure is logged, never propagated.
    /// With no path at all, the compiled-in table is used.
    #[must_use]
    pub fn load_or_fallback(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not load mapping config, falling back to default issue type"
                );
                Self::fallback()
            }
        }
    }
}

/// Connection settings for the Jira REST API.
///
/// Constructed at the CLI boundary from flags and environment; the
/// classifier and builders never read process environment themselves.
#[derive(Clone)]
pub struct JiraConfig {
    /// Instance base URL, e.g. `https://example.atlassian.net`.
    pub base_url: String,
    /// Account email for basic auth.
    pub email: String,
    /// API token paired with the email. Never logged.
    pub api_token: String,
    /// Project key new issues are created under.
    pub project_key: String,
}

impl JiraConfig {
    /// Create connection settings, normalizing the base URL.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
        project_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            email: email.into(),
            api_token: api_token.into(),
            project_key: project_key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_parses_flat_json_shape() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"mappings": {{"Bug Report": "Bug"}}, "defaultIssueType": "Story"}}"#
        )
        .unwrap();

        let config = MappingConfig::load(file.path()).unwrap();
        assert_eq!(config.mappings.get("Bug Report"), Some(&"Bug".to_string()));
        assert_eq!(config.default_issue_type, "Story");
    }

    #[test]
    fn load_rejects_empty_default_issue_type() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mappings": {{}}, "defaultIssueType": ""}}"#).unwrap();

        assert!(MappingConfig::load(file.path()).is_err());
    }

    #[test]
    fn load_or_fallback_degrades_on_missing_file() {
        let config = MappingConfig::load_or_fallback(Some(Path::new("/nonexistent/mapping.json")));
        assert_eq!(config, MappingConfig::fallback());
        assert_eq!(config.default_issue_type, "Task");
        assert!(config.mappings.is_empty());
    }

    #[test]
    fn load_or_fallback_degrades_on_corrupt_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let config = MappingConfig::load_or_fallback(Some(file.path()));
        assert_eq!(config, MappingConfig::fallback());
    }

    #[test]
    fn load_or_fallback_honors_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"mappings": {{"Incident": "Bug"}}, "defaultIssueType": "Chore"}}"#
        )
        .unwrap();

        let config = MappingConfig::load_or_fallback(Some(file.path()));
        assert_eq!(config.default_issue_type, "Chore");
    }

    #[test]
    fn no_path_uses_builtin_table() {
        let config = MappingConfig::load_or_fallback(None);
        assert_eq!(config, MappingConfig::builtin());
        assert_eq!(
            config.mappings.get("Bug Report"),
            Some(&"Bug Report".to_string())
        );
    }

    #[test]
    fn jira_config_trims_trailing_slash() {
        let config = JiraConfig::new("https://example.atlassian.net/", "a@b.c", "tok", "PROJ");
        assert_eq!(config.base_url, "https://example.atlassian.net");
    }
}
