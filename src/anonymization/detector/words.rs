//! Caller-supplied sensitive word detector

use super::TokenDetector;
use crate::anonymization::models::{SensitiveToken, TokenCategory};
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

/// Detects case-insensitive occurrences of a fixed word list
///
/// Longer words win when two words overlap at the same position.
pub struct SensitiveWordDetector {
    regex: Option<Regex>,
    words: Vec<String>,
}

impl SensitiveWordDetector {
    /// Build a detector for `words`; blank entries are ignored
    pub fn new<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        let mut words: Vec<String> = words
            .iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        words.dedup();

        let regex = if words.is_empty() {
            None
        } else {
            let alternation = words
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                RegexBuilder::new(&alternation)
                    .case_insensitive(true)
                    .build()
                    .context("Failed to compile sensitive word pattern")?,
            )
        };

        Ok(Self { regex, words })
    }

    /// The effective (trimmed, de-duplicated) word list
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Whether `text` still contains any of the words
    pub fn is_present_in(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|r| r.is_match(text))
    }
}

impl TokenDetector for SensitiveWordDetector {
    fn detect(&self, line: &str) -> Result<Vec<SensitiveToken>> {
        let Some(regex) = &self.regex else {
            return Ok(Vec::new());
        };

        Ok(regex
            .find_iter(line)
            .map(|m| {
                SensitiveToken::from_span(TokenCategory::SensitiveWord, line, m.start(), m.end())
            })
            .collect())
    }
}
