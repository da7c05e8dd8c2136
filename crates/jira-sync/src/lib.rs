//! GitHub issue intake for Jira.
//!
//! This crate provides:
//! - Rule-based classification of GitHub issue labels and text into Jira
//!   issue type, priority, and components
//! - ADF (Atlassian Document Format) document construction and validation
//! - Assembly of create-issue payloads from classification output and
//!   issue metadata
//! - REST client for issue creation

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adf;
pub mod assembler;
pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use adf::AdfDocument;
pub use classifier::classify;
pub use client::JiraClient;
pub use config::{JiraConfig, MappingConfig};
pub use error::JiraError;
pub use models::*;
