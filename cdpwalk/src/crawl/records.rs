//! Device records and crawl outputs.

use std::time::Duration;

use crate::grammar::{DeviceIdentity, InterfaceRecord};

/// Everything recorded for one distinct device, keyed by hostname.
#[derive(Debug, Clone)]
pub struct DeviceRecords {
    /// Management address the device was resolved through.
    pub address: String,
    pub hostname: String,
    pub domain: String,
    pub interfaces: Vec<InterfaceRecord>,
}

impl DeviceRecords {
    pub fn new(
        address: impl Into<String>,
        identity: DeviceIdentity,
        interfaces: Vec<InterfaceRecord>,
    ) -> Self {
        Self {
            address: address.into(),
            hostname: identity.hostname,
            domain: identity.domain,
            interfaces,
        }
    }

    /// `hostname.domain`
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.hostname, self.domain)
    }

    /// One `name<TAB>address` line per interface: the name part is
    /// `hostname-<short interface>.domain`, lowercased.
    pub fn matched_lines(&self) -> Vec<String> {
        self.interfaces
            .iter()
            .map(|interface| {
                let name = format!(
                    "{}-{}.{}",
                    self.hostname,
                    interface.short_name(),
                    self.domain
                );
                format!("{}\t{}", name.to_lowercase(), interface.ip)
            })
            .collect()
    }
}

/// Final outputs of one crawl.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The address the crawl started from.
    pub seed: String,

    /// Final frontier membership in discovery order, reachable or not.
    pub addresses: Vec<String>,

    /// One entry per distinct hostname, ordered by the discovery order of
    /// the address that resolved it.
    pub devices: Vec<DeviceRecords>,

    /// Addresses successfully expanded.
    pub expanded: usize,

    /// Addresses that could not be expanded.
    pub failed: usize,

    /// Wall-clock duration of the whole crawl.
    pub elapsed: Duration,
}

impl CrawlReport {
    /// Device FQDNs in first-discovery order.
    pub fn fqdns(&self) -> Vec<String> {
        self.devices.iter().map(DeviceRecords::fqdn).collect()
    }

    /// All name-to-address record lines, grouped by device in discovery
    /// order.
    pub fn matched_records(&self) -> Vec<String> {
        self.devices
            .iter()
            .flat_map(DeviceRecords::matched_lines)
            .collect()
    }
}
