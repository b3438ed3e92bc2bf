//! External system integrations for the collector.
//!
//! This module provides adapters for the two systems a submission touches:
//!
//! - [`git`] - Local working copy of the configuration collection
//! - [`github`] - Pull request creation on the hosting service
//!
//! # Design Pattern
//!
//! Each adapter exposes a small capability trait
//! ([`ConfigurationStore`](git::ConfigurationStore),
//! [`ReviewRequestPublisher`](github::ReviewRequestPublisher)) so the
//! submission workflow can be exercised with doubles.
//!
//! # Git Adapter
//!
//! ```rust,no_run
//! use nos_config_collector::adapters::git::{ConfigurationStore, GitCollection, StoreOutcome};
//! use nos_config_collector::config::{secret_string, RepositoryConfig};
//! use nos_config_collector::domain::Submission;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let collection = GitCollection::new(
//!     RepositoryConfig {
//!         config_directory: "/var/lib/ncc/collection".into(),
//!         url: "https://github.com/acme/configs.git".to_string(),
//!         base_branch: "main".to_string(),
//!         author_name: "nos-config-collector".to_string(),
//!         author_email: "nos-config-collector@localhost".to_string(),
//!     },
//!     secret_string("ghp_example".to_string()),
//! );
//!
//! match collection.store(Submission::new("hostname edge-1")).await? {
//!     StoreOutcome::Stored(stored) => println!("pushed {}", stored.branch),
//!     StoreOutcome::AlreadyExists { branch } => println!("{branch} exists"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod git;
pub mod github;
