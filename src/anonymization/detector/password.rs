//! Regex-based password and secret detector

use super::TokenDetector;
use crate::anonymization::models::{SensitiveToken, TokenCategory};
use anyhow::{Context, Result};
use regex::Regex;

/// Patterns whose `secret` group holds key material.
///
/// An optional encryption level (`7`, `5`, `sha256`, ...) before the value is
/// kept as is.
const PASSWORD_PATTERNS: &[&str] = &[
    // username admin password 0 foo / enable secret 5 $1$... / password 7 0822455D0A16
    r#"(?i)\b(?:password|passwd|secret)\s+(?:(?:[0-9]|sha256|sha512)\s+)?(?P<secret>"[^"]*"|\S+)"#,
    // Juniper style quoted hashes
    r#"(?i)\b(?:encrypted-password|authentication-key|pre-shared-key|key-string)\s+(?:[0-9]\s+)?(?P<secret>"[^"]*"|\S+)"#,
    // snmp-server community public RO
    r#"(?i)\bsnmp-server\s+community\s+(?P<secret>\S+)"#,
    // snmp { community public; }
    r#"(?i)^\s*community\s+(?P<secret>"[^"]*"|[^\s;]+)"#,
    // tacacs-server key 7 ... / radius-server host 10.0.0.1 key cisco
    r#"(?i)\b(?:tacacs-server|radius-server)\s+(?:host\s+\S+\s+(?:\S+\s+)*?)?key\s+(?:[0-9]\s+)?(?P<secret>\S+)"#,
    // ip ospf message-digest-key 1 md5 secret
    r#"(?i)\bmd5\s+(?:[0-9]\s+)?(?P<secret>\S+)"#,
];

/// Detects passwords, secrets and keys on common device configuration lines
pub struct PasswordDetector {
    patterns: Vec<Regex>,
}

impl PasswordDetector {
    /// Create a detector with the built-in patterns
    pub fn new() -> Result<Self> {
        let patterns = PASSWORD_PATTERNS
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("Invalid password pattern: {p}")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }
}

impl TokenDetector for PasswordDetector {
    fn detect(&self, line: &str) -> Result<Vec<SensitiveToken>> {
        let mut tokens: Vec<SensitiveToken> = Vec::new();

        for pattern in &self.patterns {
            for capture in pattern.captures_iter(line) {
                let Some(secret) = capture.name("secret") else {
                    continue;
                };
                let (mut start, mut end) = (secret.start(), secret.end());

                // Keep the quotes, replace what is between them
                let text = secret.as_str();
                if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
                    start += 1;
                    end -= 1;
                }
                if start == end {
                    continue;
                }

                let token = SensitiveToken::from_span(TokenCategory::Password, line, start, end);
                if !tokens.iter().any(|t| t.overlaps(&token)) {
                    tokens.push(token);
                }
            }
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn secrets(line: &str) -> Vec<String> {
        PasswordDetector::new()
            .unwrap()
            .detect(line)
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test_case("enable secret 5 $1$mERr$hx5rVt7rPNoS4wqbXKX7m0", "$1$mERr$hx5rVt7rPNoS4wqbXKX7m0" ; "enable secret with level")]
    #[test_case("username admin privilege 15 password 0 hunter2", "hunter2" ; "username password")]
    #[test_case(" password 7 0822455D0A16", "0822455D0A16" ; "line password")]
    #[test_case("snmp-server community public RO", "public" ; "snmp community")]
    #[test_case("tacacs-server key 7 045802150C2E", "045802150C2E" ; "tacacs key")]
    #[test_case("    encrypted-password \"$6$abc$def\";", "$6$abc$def" ; "junos quoted hash")]
    #[test_case(" ip ospf message-digest-key 1 md5 s3cr3t", "s3cr3t" ; "ospf md5")]
    fn test_detects_secret(line: &str, expected: &str) {
        assert_eq!(secrets(line), vec![expected.to_string()]);
    }

    #[test_case("hostname test-device" ; "hostname")]
    #[test_case("service password-encryption" ; "service keyword")]
    #[test_case("interface GigabitEthernet0/1" ; "interface")]
    fn test_no_secret(line: &str) {
        assert!(secrets(line).is_empty());
    }
}
