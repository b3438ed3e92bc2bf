//! Core business logic for the collector.
//!
//! # Modules
//!
//! - [`collector`] - Submission workflow: store, push, open pull request
//!
//! # Submission Workflow
//!
//! 1. **Store**: write `configurations/<nos>/<hash>.conf` on branch `add/<hash>`
//! 2. **Push**: publish the branch to `origin`
//! 3. **Publish**: open a pull request against the base branch
//!
//! A branch that already exists short-circuits the workflow as a duplicate.
//!
//! # Example
//!
//! ```rust,no_run
//! use nos_config_collector::config::{load_config, LoadOptions};
//! use nos_config_collector::core::collector::SubmissionWorkflow;
//! use nos_config_collector::domain::Submission;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(&LoadOptions::default())?;
//! let workflow = SubmissionWorkflow::from_config(&config)?;
//!
//! let outcome = workflow.submit(Submission::new("hostname edge-1")).await?;
//! println!("{}", outcome.branch());
//! # Ok(())
//! # }
//! ```

pub mod collector;
