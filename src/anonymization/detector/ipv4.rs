//! IPv4 address detector

use super::TokenDetector;
use crate::anonymization::models::{SensitiveToken, TokenCategory};
use anyhow::{Context, Result};
use regex::Regex;
use std::net::Ipv4Addr;

const IPV4_PATTERN: &str =
    r"\b(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\b";

/// Detects IPv4 addresses, skipping netmasks and wildcard masks
pub struct Ipv4Detector {
    regex: Regex,
}

impl Ipv4Detector {
    /// Create a new detector
    pub fn new() -> Result<Self> {
        let regex = Regex::new(IPV4_PATTERN).context("Invalid IPv4 pattern")?;
        Ok(Self { regex })
    }
}

/// Whether an address is a contiguous netmask (`255.255.255.0`) or wildcard
/// mask (`0.0.0.255`). Covers `0.0.0.0` and `255.255.255.255`.
pub fn is_mask(addr: Ipv4Addr) -> bool {
    let bits = u32::from(addr);
    let contiguous = |v: u32| v.leading_ones() + v.trailing_zeros() == 32;
    contiguous(bits) || contiguous(!bits)
}

impl TokenDetector for Ipv4Detector {
    fn detect(&self, line: &str) -> Result<Vec<SensitiveToken>> {
        let mut tokens = Vec::new();

        for matched in self.regex.find_iter(line) {
            // Part of a longer dotted sequence such as an OID or version string
            let before = line[..matched.start()].chars().next_back();
            let after = line[matched.end()..].chars().next();
            if before == Some('.') || after == Some('.') {
                continue;
            }

            let addr: Ipv4Addr = matched
                .as_str()
                .parse()
                .with_context(|| format!("Matched invalid IPv4 address: {}", matched.as_str()))?;
            if is_mask(addr) {
                continue;
            }

            tokens.push(SensitiveToken::from_span(
                TokenCategory::IpAddress,
                line,
                matched.start(),
                matched.end(),
            ));
        }

        Ok(tokens)
    }
}
