//! Git collection adapter
//!
//! Maintains a local clone of the configuration collection. Each accepted
//! submission becomes one commit on its own `add/<hash>` branch, created from
//! the freshly fetched base branch and pushed to `origin`.

pub mod auth;
pub mod collection;
pub mod working_copy;

pub use auth::{authenticated_url, redacted_url};
pub use collection::{ConfigurationStore, GitCollection};
pub use working_copy::{StoreOutcome, WorkingCopy, ORIGIN};
