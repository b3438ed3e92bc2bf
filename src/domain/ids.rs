//! Domain identifier types with validation
//!
//! Newtype wrappers for the names the collector derives from a submission.
//! Each type guarantees that its value is safe to use as a path component or
//! git reference name.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Catch-all device OS category
pub const OTHER_NOS: &str = "other";

/// Maximum length of a device OS category name
const MAX_NOS_LEN: usize = 64;

/// Device / network OS category used to namespace stored configurations
///
/// A category is a single path component made of ASCII letters, digits,
/// `.`, `_` and `-`. `.` and `..` are rejected.
///
/// # Examples
///
/// ```
/// use nos_config_collector::domain::ids::NosCategory;
///
/// let nos = NosCategory::new("cisco_ios").unwrap();
/// assert_eq!(nos.as_str(), "cisco_ios");
/// assert!(NosCategory::new("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NosCategory(String);

impl NosCategory {
    /// Creates a new category, validating its format
    pub fn new(nos: impl Into<String>) -> Result<Self, String> {
        let nos = nos.into();
        if nos.trim().is_empty() {
            return Err("NOS category cannot be empty".to_string());
        }
        if nos.len() > MAX_NOS_LEN {
            return Err(format!(
                "NOS category must be at most {MAX_NOS_LEN} characters, got {}",
                nos.len()
            ));
        }
        if nos == "." || nos == ".." {
            return Err(format!("Invalid NOS category: {nos}"));
        }
        if let Some(c) = nos
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(format!(
                "Invalid character '{c}' in NOS category '{nos}'. Allowed: letters, digits, '.', '_', '-'"
            ));
        }
        Ok(Self(nos))
    }

    /// The catch-all `other` category
    pub fn other() -> Self {
        Self(OTHER_NOS.to_string())
    }

    /// Returns the category as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NosCategory {
    fn default() -> Self {
        Self::other()
    }
}

impl fmt::Display for NosCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NosCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for NosCategory {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NosCategory> for String {
    fn from(nos: NosCategory) -> Self {
        nos.0
    }
}

impl AsRef<str> for NosCategory {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Content hash used to name stored files and submission branches
///
/// Lower-case hex SHA-256 of the UTF-8 bytes of the configuration content.
/// The value is stable across processes and platforms.
///
/// # Examples
///
/// ```
/// use nos_config_collector::domain::ids::ContentHash;
///
/// let hash = ContentHash::of("");
/// assert_eq!(
///     hash.as_str(),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(String);

impl ContentHash {
    /// Computes the hash of `content`
    pub fn of(content: &str) -> Self {
        Self(format!("{:x}", Sha256::digest(content.as_bytes())))
    }

    /// Returns the hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the branch a submission with this hash is committed to
    pub fn branch_name(&self) -> String {
        format!("add/{}", self.0)
    }

    /// File name of the stored configuration
    pub fn file_name(&self) -> String {
        format!("{}.conf", self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
