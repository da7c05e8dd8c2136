//! jira-sync - CLI for syncing GitHub issues into Jira tickets.
//!
//! # Environment Variables
//!
//! - `JIRA_BASE_URL` - Jira instance URL (e.g. `https://example.atlassian.net`)
//! - `JIRA_EMAIL` - Account email for basic auth
//! - `JIRA_API_TOKEN` - API token paired with the email
//! - `JIRA_PROJECT_KEY` - Project key new issues are created under
//!
//! # Examples
//!
//! ```bash
//! # Map a label list to an issue type
//! jira-sync classify '["Bug Report"]'
//!
//! # Same, against a custom mapping file
//! jira-sync classify '["Incident"]' --mapping ./mapping.json
//!
//! # Create a ticket from a GitHub issue
//! jira-sync create \
//!     --summary "Production system down - REELS not loading" \
//!     --description "High - Production system is down" \
//!     --github-url https://github.com/acme/app/issues/42 \
//!     --author octocat \
//!     --labels '["Bug Report"]'
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jira_sync::assembler::{assemble_submission, render_github_metadata, DescriptionSource};
use jira_sync::classifier::{classify, map_issue_type};
use jira_sync::config::{JiraConfig, MappingConfig};
use jira_sync::models::GithubIssue;
use jira_sync::JiraClient;

/// Sync GitHub issues into Jira tickets.
#[derive(Parser)]
#[command(name = "jira-sync")]
#[command(about = "Sync GitHub issues into Jira tickets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a JSON array of GitHub labels to a Jira issue type
    Classify {
        /// Labels as a JSON array, e.g. '["Bug Report"]'
        labels: String,

        /// Path to a mapping config file (JSON)
        #[arg(long)]
        mapping: Option<PathBuf>,
    },

    /// Create a Jira ticket from a GitHub issue
    Create {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Issue summary (ticket title)
        #[arg(long)]
        summary: String,

        /// Override the classified issue type
        #[arg(long)]
        issue_type: Option<String>,

        /// Issue body text
        #[arg(long, default_value = "")]
        description: String,

        /// URL of the source GitHub issue; when set, the ticket body is
        /// rendered as a provenance header ahead of the description
        #[arg(long)]
        github_url: Option<String>,

        /// GitHub author login
        #[arg(long, default_value = "unknown")]
        author: String,

        /// Issue creation timestamp (defaults to now)
        #[arg(long)]
        created_at: Option<String>,

        /// GitHub labels as a JSON array
        #[arg(long, default_value = "[]")]
        labels: String,

        /// Path to a mapping config file (JSON)
        #[arg(long)]
        mapping: Option<PathBuf>,
    },
}

/// Jira connection settings.
#[derive(Args)]
struct ConnectionArgs {
    /// Jira instance base URL
    #[arg(long, env = "JIRA_BASE_URL")]
    base_url: String,

    /// Account email for basic auth
    #[arg(long, env = "JIRA_EMAIL")]
    email: String,

    /// API token (or set `JIRA_API_TOKEN`)
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    api_token: String,

    /// Project key new issues are created under
    #[arg(long, env = "JIRA_PROJECT_KEY")]
    project: String,
}

fn parse_labels(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw)
        .with_context(|| format!("Labels argument is not a JSON array of strings: {raw}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("jira_sync=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { labels, mapping } => {
            let labels = parse_labels(&labels)?;
            let config = MappingConfig::load_or_fallback(mapping.as_deref());

            println!("{}", map_issue_type(&labels, &config));
        }
        Commands::Create {
            connection,
            summary,
            issue_type,
            description,
            github_url,
            author,
            created_at,
            labels,
            mapping,
        } => {
            let labels = parse_labels(&labels)?;
            let config = MappingConfig::load_or_fallback(mapping.as_deref());

            let issue = GithubIssue {
                title: summary.clone(),
                body: description.clone(),
                labels,
            };
            let classification = classify(&issue, &config);
            let issue_type = issue_type.unwrap_or_else(|| classification.issue_type.clone());

            let source = match &github_url {
                Some(url) => {
                    let created_at = created_at.unwrap_or_else(|| Utc::now().to_rfc3339());
                    DescriptionSource::Document(render_github_metadata(
                        url,
                        &author,
                        &created_at,
                        &description,
                        Some(&classification),
                    ))
                }
                None if description.is_empty() => DescriptionSource::Absent,
                None => DescriptionSource::Text(description.clone()),
            };

            let request = assemble_submission(
                &connection.project,
                &issue_type,
                &summary,
                source,
                Some(classification.priority),
                &classification.components,
            );

            info!(
                issue_type = %issue_type,
                priority = %classification.priority,
                components = ?classification.components,
                "Submitting classified issue"
            );

            let jira = JiraConfig::new(
                connection.base_url,
                connection.email,
                connection.api_token,
                connection.project,
            );
            let client = JiraClient::new(&jira)?;

            let created = client
                .create_issue(&request)
                .await
                .context("Failed to create Jira issue")?;

            println!("Created {}: {}", created.key, client.browse_url(&created.key));
        }
    }

    Ok(())
}
