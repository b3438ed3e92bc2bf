//! Prefix-preserving IPv4 strategy

use super::Anonymizer;
use crate::anonymization::models::SensitiveToken;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::net::Ipv4Addr;

/// Maps IPv4 addresses so that two inputs sharing an n-bit prefix produce
/// outputs sharing an n-bit prefix
///
/// Bit `i` of the output is bit `i` of the input flipped by a salted
/// pseudo-random function of the first `i` input bits.
pub struct PrefixPreservingIpv4 {
    salt: Vec<u8>,
}

impl PrefixPreservingIpv4 {
    /// Create a mapping keyed by `salt`
    pub fn new(salt: impl AsRef<[u8]>) -> Self {
        Self {
            salt: salt.as_ref().to_vec(),
        }
    }

    /// Map a single address
    pub fn map(&self, addr: Ipv4Addr) -> Ipv4Addr {
        let input = u32::from(addr);
        let mut output = 0u32;

        for i in 0..32u32 {
            // First `i` bits of the input, left aligned
            let prefix = if i == 0 { 0 } else { input & (u32::MAX << (32 - i)) };
            let bit = (input >> (31 - i)) & 1;
            output |= (bit ^ self.flip(i, prefix)) << (31 - i);
        }

        Ipv4Addr::from(output)
    }

    fn flip(&self, position: u32, prefix: u32) -> u32 {
        let mut hasher = Sha256::new();
        hasher.update(&self.salt);
        hasher.update(position.to_be_bytes());
        hasher.update(prefix.to_be_bytes());
        u32::from(hasher.finalize()[0] & 1)
    }
}

impl Anonymizer for PrefixPreservingIpv4 {
    fn anonymize(&self, token: &SensitiveToken) -> Result<String> {
        let addr: Ipv4Addr = token
            .value
            .parse()
            .with_context(|| format!("Not an IPv4 address: {}", token.value))?;
        Ok(self.map(addr).to_string())
    }
}
