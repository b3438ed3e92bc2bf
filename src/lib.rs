// nos-config-collector - Network device configuration collector
// Copyright (c) 2025 nos-config-collector Contributors
// Licensed under the MIT License

//! # nos-config-collector
//!
//! An HTTP service that collects network device configurations into a git
//! repository, one pull request per submission.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Anonymizing** configurations (passwords, IPv4 addresses, caller-supplied words)
//! - **Storing** each submission as `configurations/<nos>/<hash>.conf` on branch `add/<hash>`
//! - **Publishing** the pushed branch as a GitHub pull request
//! - **Serving** the submission form and JSON endpoints
//!
//! ## Architecture
//!
//! The crate follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - HTTP routes, request validation and error responses
//! - [`core`] - Submission workflow
//! - [`adapters`] - External integrations (git working copy, GitHub API)
//! - [`anonymization`] - Redaction engine
//! - [`domain`] - Core domain types and models
//! - [`config`] - Settings resolution from the environment
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nos_config_collector::config::{load_config, LoadOptions};
//! use nos_config_collector::server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config(&LoadOptions::default())?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     server::serve(&config, shutdown_rx).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Content Naming
//!
//! Storage names derive from the SHA-256 of the content, so resubmitting the
//! same text is detected as a duplicate across restarts:
//!
//! ```rust
//! use nos_config_collector::domain::ContentHash;
//!
//! let hash = ContentHash::of("");
//! assert_eq!(
//!     hash.as_str(),
//!     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
//! );
//! assert_eq!(hash.branch_name(), format!("add/{}", hash.as_str()));
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::CollectorError`]; the HTTP layer maps it to
//! status codes in [`server::ApiError`].

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;
