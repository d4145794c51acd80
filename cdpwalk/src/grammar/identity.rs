//! Identity grammar.

use log::debug;
use regex::Regex;

/// Hostname and domain of one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub hostname: String,
    pub domain: String,
}

/// Extracts hostname and domain-name from a configuration dump.
///
/// Config dumps are append-ordered, so when a value appears more than once
/// the last line is authoritative. A missing domain-name falls back to the
/// configured default; a missing hostname means the device cannot be
/// identified at all.
#[derive(Debug, Clone)]
pub struct IdentityGrammar {
    hostname: Regex,
    domain: Regex,
}

impl IdentityGrammar {
    pub fn new() -> Self {
        Self {
            hostname: Regex::new(r"(?m)^\bhostname[\s\r]+(.*)$")
                .expect("hostname pattern is valid"),
            domain: Regex::new(r"(?m)^ip[\s\r]domain-name[\s\r]+(.*)$")
                .expect("domain-name pattern is valid"),
        }
    }

    /// Parse a config dump. Returns `None` when no hostname line is present.
    pub fn parse(&self, output: &str, default_domain: &str) -> Option<DeviceIdentity> {
        let hostname = self
            .hostname
            .captures_iter(output)
            .last()
            .map(|caps| caps[1].trim().to_string())?;

        let domain = match self.domain.captures_iter(output).last() {
            Some(caps) => caps[1].trim().to_string(),
            None => {
                debug!("{hostname}: no domain-name line, using default domain");
                default_domain.to_string()
            }
        };

        Some(DeviceIdentity { hostname, domain })
    }
}

impl Default for IdentityGrammar {
    fn default() -> Self {
        Self::new()
    }
}
