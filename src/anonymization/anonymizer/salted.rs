//! Salted hash token strategy

use super::Anonymizer;
use crate::anonymization::models::{SensitiveToken, TokenCategory};
use anyhow::Result;
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest
const TOKEN_HEX_LEN: usize = 8;

/// Attempts at finding a token that does not itself contain a forbidden word
const MAX_ATTEMPTS: u32 = 64;

/// Characters for tokens when forbidden words rule out hex digests
const FALLBACK_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Replaces tokens with `LABEL_<hex>` derived from a salted SHA-256
///
/// Identical values map to identical tokens, so references between lines of
/// one configuration stay consistent after anonymization.
pub struct SaltedTokenStrategy {
    salt: String,
    forbidden: Vec<String>,
}

impl SaltedTokenStrategy {
    /// Create a strategy with the given salt
    pub fn new(salt: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            forbidden: Vec::new(),
        }
    }

    /// Words that must never appear in a generated token (compared case-insensitively)
    pub fn with_forbidden_words(mut self, words: &[String]) -> Self {
        self.forbidden = words.iter().map(|w| w.to_lowercase()).collect();
        self
    }

    fn token_for(
        &self,
        category: TokenCategory,
        value: &str,
        attempt: u32,
        labelled: bool,
    ) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update([0u8]);
        hasher.update(category.label().as_bytes());
        hasher.update([0u8]);
        hasher.update(value.as_bytes());
        hasher.update(attempt.to_be_bytes());
        let digest = format!("{:x}", hasher.finalize());
        if labelled {
            format!("{}_{}", category.label(), &digest[..TOKEN_HEX_LEN])
        } else {
            digest[..TOKEN_HEX_LEN].to_string()
        }
    }

    /// Digest spelled with `alphabet` instead of hex
    fn spelled_token(&self, value: &str, attempt: u32, alphabet: &[char]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update([0u8]);
        hasher.update(value.as_bytes());
        hasher.update(attempt.to_be_bytes());
        hasher
            .finalize()
            .iter()
            .take(TOKEN_HEX_LEN)
            .map(|b| alphabet[usize::from(*b) % alphabet.len()])
            .collect()
    }

    fn is_clean(&self, token: &str) -> bool {
        let lower = token.to_lowercase();
        !self.forbidden.iter().any(|w| lower.contains(w.as_str()))
    }
}

impl Anonymizer for SaltedTokenStrategy {
    fn anonymize(&self, token: &SensitiveToken) -> Result<String> {
        // A forbidden word may collide with the label itself; fall back to bare hex
        for labelled in [true, false] {
            for attempt in 0..MAX_ATTEMPTS {
                let candidate = self.token_for(token.category, &token.value, attempt, labelled);
                if self.is_clean(&candidate) {
                    return Ok(candidate);
                }
            }
        }

        // Words may cover every hex digit; spell the digest with what is left
        let alphabet: Vec<char> = FALLBACK_ALPHABET
            .chars()
            .filter(|c| self.is_clean(c.encode_utf8(&mut [0; 4])))
            .collect();
        if !alphabet.is_empty() {
            for attempt in 0..MAX_ATTEMPTS {
                let candidate = self.spelled_token(&token.value, attempt, &alphabet);
                if self.is_clean(&candidate) {
                    return Ok(candidate);
                }
            }
        }

        anyhow::bail!(
            "Could not generate a {} token free of sensitive words",
            token.category.label()
        )
    }
}
