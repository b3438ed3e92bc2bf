//! Submission domain model

use super::ids::{ContentHash, NosCategory};
use std::path::PathBuf;

/// Directory inside the collection that holds all stored configurations
pub const CONFIGURATIONS_DIR: &str = "configurations";

/// A configuration file submitted for storage
///
/// Exists only for the duration of one request.
///
/// # Examples
///
/// ```
/// use nos_config_collector::domain::{NosCategory, Submission};
///
/// let submission = Submission::new("hostname edge-1")
///     .with_author(Some("Jane Doe".to_string()))
///     .with_nos(NosCategory::new("cisco_ios").unwrap());
///
/// assert!(submission
///     .relative_path()
///     .starts_with("configurations/cisco_ios"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    content: String,
    author: Option<String>,
    email: Option<String>,
    nos: NosCategory,
}

impl Submission {
    /// Creates a submission in the `other` category without authorship
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: None,
            email: None,
            nos: NosCategory::other(),
        }
    }

    /// Sets the author display name
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    /// Sets the author email address
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    /// Sets the device OS category
    pub fn with_nos(mut self, nos: NosCategory) -> Self {
        self.nos = nos;
        self
    }

    /// Raw configuration content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Author name, if one was supplied and is not blank
    pub fn author(&self) -> Option<&str> {
        non_blank(self.author.as_deref())
    }

    /// Author email, if one was supplied and is not blank
    pub fn email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    /// Device OS category
    pub fn nos(&self) -> &NosCategory {
        &self.nos
    }

    /// Content hash naming the stored file and the branch
    pub fn hash(&self) -> ContentHash {
        ContentHash::of(&self.content)
    }

    /// Path of the stored file relative to the collection root
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(CONFIGURATIONS_DIR)
            .join(self.nos.as_str())
            .join(self.hash().file_name())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A submission that has been committed and pushed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredConfiguration {
    /// Content hash
    pub hash: ContentHash,
    /// Pushed branch name (`add/<hash>`)
    pub branch: String,
    /// File path relative to the collection root
    pub relative_path: PathBuf,
    /// Id of the commit that added the file
    pub commit_id: String,
}
