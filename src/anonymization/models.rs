//! Sensitive token data models

use serde::{Deserialize, Serialize};

/// Kind of sensitive token found in a configuration line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenCategory {
    /// Password, secret, community string or key material
    Password,
    /// IPv4 address
    IpAddress,
    /// Caller-supplied sensitive word
    SensitiveWord,
}

impl TokenCategory {
    /// Prefix used for generated replacement tokens
    pub fn label(&self) -> &'static str {
        match self {
            Self::Password => "PWD",
            Self::IpAddress => "IP",
            Self::SensitiveWord => "ANON",
        }
    }
}

/// A sensitive token detected within a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveToken {
    /// Token category
    pub category: TokenCategory,
    /// Original text of the token
    pub value: String,
    /// Byte offset of the first character within the line
    pub start: usize,
    /// Byte offset one past the last character within the line
    pub end: usize,
}

impl SensitiveToken {
    /// Create a token spanning `start..end` of `line`
    pub fn from_span(category: TokenCategory, line: &str, start: usize, end: usize) -> Self {
        Self {
            category,
            value: line[start..end].to_string(),
            start,
            end,
        }
    }

    /// Whether two tokens share at least one byte
    pub fn overlaps(&self, other: &SensitiveToken) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the token in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the token is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
