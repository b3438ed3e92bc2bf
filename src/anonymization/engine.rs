//! Main anonymization engine
//!
//! This module provides the [`AnonymizationEngine`] that runs the detectors
//! over each line of a configuration and replaces what they find.
//!
//! # Architecture
//!
//! - **Detectors** find passwords, IPv4 addresses and caller-supplied words
//! - **Anonymizers** produce deterministic replacements for each token
//! - The engine resolves overlaps and rewrites the line
//!
//! # Examples
//!
//! ```
//! use nos_config_collector::anonymization::{AnonymizationConfig, AnonymizationEngine};
//!
//! # fn example() -> anyhow::Result<()> {
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//!
//! let content = "hostname acme-edge-1\nenable secret 5 $1$abc$xyz";
//! let anonymized = engine.anonymize_configuration(content, &["acme".to_string()])?;
//!
//! assert!(!anonymized.to_lowercase().contains("acme"));
//! assert!(!anonymized.contains("$1$abc$xyz"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::anonymization::{
    anonymizer::{ipv4::PrefixPreservingIpv4, salted::SaltedTokenStrategy, Anonymizer},
    config::AnonymizationConfig,
    detector::{
        ipv4::Ipv4Detector, password::PasswordDetector, words::SensitiveWordDetector,
        TokenDetector,
    },
    models::{SensitiveToken, TokenCategory},
    Redactor,
};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Substituted when the caller supplies no usable sensitive words; the
/// underlying rules treat an empty list as invalid input.
pub const SENTINEL_WORD: &str = "verylongstringthathopefullydoesn'tappearintheconfig";

/// Upper bound on re-scans for sensitive words formed across replacement boundaries
const MAX_WORD_PASSES: usize = 4;

/// Main anonymization engine
///
/// Stateless apart from its configuration; share it across tasks with `Arc`.
pub struct AnonymizationEngine {
    config: AnonymizationConfig,
    detectors: Vec<Arc<dyn TokenDetector>>,
    ip_strategy: PrefixPreservingIpv4,
}

impl AnonymizationEngine {
    /// Create a new anonymization engine
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a built-in pattern
    /// fails to compile.
    pub fn new(config: AnonymizationConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid anonymization configuration")?;

        let mut detectors: Vec<Arc<dyn TokenDetector>> = Vec::new();
        if config.anon_pwd {
            detectors.push(Arc::new(PasswordDetector::new()?));
        }
        if config.anon_ip {
            detectors.push(Arc::new(Ipv4Detector::new()?));
        }

        let ip_strategy = PrefixPreservingIpv4::new(config.salt.as_bytes());

        Ok(Self {
            config,
            detectors,
            ip_strategy,
        })
    }

    /// Anonymize a whole configuration
    ///
    /// `content` is split into lines and the anonymized lines are joined with
    /// `\n`. Blank sensitive words are discarded; when none remain the
    /// [`SENTINEL_WORD`] is used.
    pub fn anonymize_configuration(
        &self,
        content: &str,
        sensitive_words: &[String],
    ) -> Result<String> {
        let words = effective_sensitive_words(sensitive_words);
        let word_detector = SensitiveWordDetector::new(&words)?;
        let lines: Vec<&str> = content.lines().collect();

        let anonymized = self.anonymize_lines(&lines, &word_detector)?;
        Ok(anonymized.join("\n"))
    }

    /// Anonymize each line independently
    pub fn anonymize_lines(
        &self,
        lines: &[&str],
        word_detector: &SensitiveWordDetector,
    ) -> Result<Vec<String>> {
        let token_strategy = SaltedTokenStrategy::new(self.config.salt.as_str())
            .with_forbidden_words(word_detector.words());

        lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                self.anonymize_line(line, word_detector, &token_strategy)
                    .with_context(|| format!("Failed to anonymize line {}", idx + 1))
            })
            .collect()
    }

    fn anonymize_line(
        &self,
        line: &str,
        word_detector: &SensitiveWordDetector,
        token_strategy: &SaltedTokenStrategy,
    ) -> Result<String> {
        let mut tokens = word_detector.detect(line)?;
        for detector in &self.detectors {
            tokens.extend(detector.detect(line)?);
        }

        let mut result = self.replace_tokens(line, tokens, token_strategy)?;

        // A replacement can complete a sensitive word together with its neighbours
        let mut passes = 0;
        while word_detector.is_present_in(&result) {
            passes += 1;
            if passes > MAX_WORD_PASSES {
                anyhow::bail!("Sensitive word still present after {MAX_WORD_PASSES} passes");
            }
            let tokens = word_detector.detect(&result)?;
            result = self.replace_tokens(&result, tokens, token_strategy)?;
        }

        Ok(result)
    }

    /// Replace non-overlapping tokens; earlier and then longer tokens win
    fn replace_tokens(
        &self,
        line: &str,
        mut tokens: Vec<SensitiveToken>,
        token_strategy: &SaltedTokenStrategy,
    ) -> Result<String> {
        if tokens.is_empty() {
            return Ok(line.to_string());
        }

        tokens.sort_by(|a, b| a.start.cmp(&b.start).then(b.len().cmp(&a.len())));

        let mut output = String::with_capacity(line.len());
        let mut cursor = 0;
        for token in tokens {
            if token.start < cursor {
                continue;
            }
            output.push_str(&line[cursor..token.start]);
            output.push_str(&self.replacement(&token, token_strategy)?);
            cursor = token.end;
        }
        output.push_str(&line[cursor..]);

        Ok(output)
    }

    fn replacement(
        &self,
        token: &SensitiveToken,
        token_strategy: &SaltedTokenStrategy,
    ) -> Result<String> {
        match token.category {
            TokenCategory::IpAddress => self.ip_strategy.anonymize(token),
            TokenCategory::Password if self.config.is_reserved(&token.value) => {
                Ok(token.value.clone())
            }
            TokenCategory::Password | TokenCategory::SensitiveWord => {
                token_strategy.anonymize(token)
            }
        }
    }
}

impl Redactor for AnonymizationEngine {
    fn redact(&self, content: &str, sensitive_words: &[String]) -> Result<String> {
        self.anonymize_configuration(content, sensitive_words)
    }
}

/// Drop blank words and fall back to the sentinel when nothing remains
pub fn effective_sensitive_words(words: &[String]) -> Vec<String> {
    let words: Vec<String> = words
        .iter()
        .filter(|w| !w.trim().is_empty())
        .cloned()
        .collect();
    if words.is_empty() {
        vec![SENTINEL_WORD.to_string()]
    } else {
        words
    }
}
