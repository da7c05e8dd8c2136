//! Rule-based classification of GitHub issues into Jira fields.
//!
//! All functions here are pure over the issue text and a parsed
//! [`MappingConfig`]; loading the config (and degrading on failure)
//! happens at the boundary in [`crate::config`].

use crate::config::MappingConfig;
use crate::models::{ClassificationResult, GithubIssue, Priority};

/// Platform area tags recognized as standalone lines in an issue body.
pub const COMPONENT_VOCABULARY: &[&str] = &["REELS", "ALPHA", "TRINITY", "AI HUB"];

/// Map issue labels to a Jira issue type.
///
/// Labels are scanned in their given order and the first one present in
/// the mapping table wins; later labels never override it. An empty or
/// unmatched label list yields the config's default issue type.
#[must_use]
pub fn map_issue_type(labels: &[String], config: &MappingConfig) -> String {
    labels
        .iter()
        .find_map(|label| config.mappings.get(label))
        .cloned()
        .unwrap_or_else(|| config.default_issue_type.clone())
}

/// Derive a priority from issue title and body.
///
/// Case-insensitive substring rules, first match wins:
/// 1. body has "high - production system" or "production down" → Highest
/// 2. body has "medium - a non-critical feature" → Medium
/// 3. body has "low - minor issue" or "cosmetic" → Low
/// 4. title or body has "urgent" or "critical" → High
/// 5. otherwise → Medium
///
/// Rules 2 and 5 both land on Medium through different conditions; rule 2
/// matches the issue-template urgency phrase and shields it from the
/// keyword scan in rule 4.
#[must_use]
pub fn map_priority(title: &str, body: &str) -> Priority {
    let title = title.to_lowercase();
    let body = body.to_lowercase();

    if body.contains("high - production system") || body.contains("production down") {
        return Priority::Highest;
    }

    if body.contains("medium - a non-critical feature") {
        return Priority::Medium;
    }

    if body.contains("low - minor issue") || body.contains("cosmetic") {
        return Priority::Low;
    }

    if title.contains("urgent")
        || title.contains("critical")
        || body.contains("urgent")
        || body.contains("critical")
    {
        return Priority::High;
    }

    Priority::Medium
}

/// Extract platform components from an issue body.
///
/// A tag matches only when some line of the body, after trimming
/// surrounding whitespace, equals the tag case-insensitively. A tag
/// embedded mid-sentence does not count. Results keep vocabulary order.
#[must_use]
pub fn extract_components(body: &str) -> Vec<String> {
    COMPONENT_VOCABULARY
        .iter()
        .filter(|tag| {
            body.lines()
                .any(|line| line.trim().eq_ignore_ascii_case(tag))
        })
        .map(|tag| (*tag).to_string())
        .collect()
}

/// Classify a GitHub issue against a mapping configuration.
#[must_use]
pub fn classify(issue: &GithubIssue, config: &MappingConfig) -> ClassificationResult {
    ClassificationResult {
        issue_type: map_issue_type(&issue.labels, config),
        priority: map_priority(&issue.title, &issue.body),
        components: extract_components(&issue.body),
        labels: issue.labels.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn config_with(mappings: &[(&str, &str)], default: &str) -> MappingConfig {
        MappingConfig {
            mappings: mappings
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<BTreeMap<_, _>>(),
            default_issue_type: default.to_string(),
        }
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn first_matching_label_wins() {
        let config = config_with(&[("Bug Report", "Bug"), ("Feature Request", "Story")], "Task");

        let result = map_issue_type(&labels(&["Bug Report", "Feature Request"]), &config);
        assert_eq!(result, "Bug");

        let result = map_issue_type(&labels(&["Feature Request", "Bug Report"]), &config);
        assert_eq!(result, "Story");
    }

    #[test]
    fn unknown_labels_are_skipped_not_fatal() {
        let config = config_with(&[("Bug Report", "Bug")], "Task");
        let result = map_issue_type(&labels(&["Unknown Label", "Bug Report"]), &config);
        assert_eq!(result, "Bug");
    }

    #[test]
    fn empty_or_unmatched_labels_use_config_default() {
        let config = config_with(&[("Bug Report", "Bug")], "Chore");
        assert_eq!(map_issue_type(&[], &config), "Chore");
        assert_eq!(map_issue_type(&labels(&["nonsense"]), &config), "Chore");
    }

    #[test]
    fn load_failure_fallback_is_distinct_from_config_default() {
        // A failed load answers "Task" via the fallback table; a loaded
        // config answers its own default for the same empty label list.
        let fallback = MappingConfig::fallback();
        assert_eq!(map_issue_type(&[], &fallback), "Task");

        let loaded = config_with(&[], "Story");
        assert_eq!(map_issue_type(&[], &loaded), "Story");
    }

    #[test]
    fn priority_production_phrases_map_to_highest() {
        assert_eq!(
            map_priority("", "High - Production system is down, users cannot log in"),
            Priority::Highest
        );
        assert_eq!(
            map_priority("", "The whole production down since 9am"),
            Priority::Highest
        );
    }

    #[test]
    fn priority_template_medium_phrase_matches() {
        assert_eq!(
            map_priority("", "Medium - A non-critical feature is broken"),
            Priority::Medium
        );
    }

    #[test]
    fn priority_low_phrases_map_to_low() {
        assert_eq!(
            map_priority("", "Low - Minor issue or cosmetic bug."),
            Priority::Low
        );
        assert_eq!(map_priority("", "purely cosmetic glitch"), Priority::Low);
    }

    #[test]
    fn priority_urgency_keywords_map_to_high() {
        assert_eq!(map_priority("URGENT: checkout broken", ""), Priority::High);
        assert_eq!(map_priority("", "this is critical for us"), Priority::High);
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(map_priority("", "generic text"), Priority::Medium);
        assert_eq!(map_priority("", ""), Priority::Medium);
    }

    #[test]
    fn priority_rule_order_beats_keyword_scan() {
        // "critical" also appears, but the low-rule fires first.
        assert_eq!(
            map_priority("", "Low - Minor issue, not critical"),
            Priority::Low
        );
    }

    #[test]
    fn components_match_standalone_lines_only() {
        assert_eq!(
            extract_components("Steps to reproduce\nREELS\nmore text"),
            vec!["REELS"]
        );
        assert!(extract_components("my REELS thing is broken").is_empty());
    }

    #[test]
    fn components_ignore_case_and_surrounding_whitespace() {
        assert_eq!(extract_components("  reels  \n"), vec!["REELS"]);
        assert_eq!(extract_components("ai hub\n"), vec!["AI HUB"]);
    }

    #[test]
    fn components_keep_vocabulary_order() {
        let body = "TRINITY\nREELS\n";
        assert_eq!(extract_components(body), vec!["REELS", "TRINITY"]);
    }

    #[test]
    fn components_empty_when_nothing_matches() {
        assert!(extract_components("nothing here").is_empty());
        assert!(extract_components("").is_empty());
    }

    #[test]
    fn classify_composes_all_three_mappings() {
        let issue = GithubIssue {
            title: "Production system down - REELS not loading".to_string(),
            body: "Urgency / Impact\nHigh - Production system is down for all users\nREELS"
                .to_string(),
            labels: labels(&["Bug Report"]),
        };

        let result = classify(&issue, &MappingConfig::builtin());

        assert_eq!(result.issue_type, "Bug Report");
        assert_eq!(result.priority, Priority::Highest);
        assert_eq!(result.components, vec!["REELS"]);
        assert_eq!(result.labels, vec!["Bug Report"]);
    }
}
