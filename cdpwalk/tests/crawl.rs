//! End-to-end crawl tests over an in-memory session gateway.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use cdpwalk::crawl::{CrawlEngine, CrawlOptions};
use cdpwalk::error::{Result, TransportError};
use cdpwalk::transport::{SessionChannel, SessionGateway};

/// Canned command output for one fake device.
#[derive(Clone, Default)]
struct FakeDevice {
    neighbors: String,
    details: String,
    identity: String,
    interfaces: String,
}

struct FakeGateway {
    devices: HashMap<String, FakeDevice>,
}

impl FakeGateway {
    fn new(devices: Vec<(&str, FakeDevice)>) -> Arc<Self> {
        Arc::new(Self {
            devices: devices
                .into_iter()
                .map(|(address, device)| (address.to_string(), device))
                .collect(),
        })
    }
}

#[async_trait]
impl SessionGateway for FakeGateway {
    async fn open(&self, address: &str) -> Result<Box<dyn SessionChannel>> {
        match self.devices.get(address) {
            Some(device) => Ok(Box::new(FakeChannel {
                device: device.clone(),
            })),
            None => Err(TransportError::Disconnected.into()),
        }
    }
}

struct FakeChannel {
    device: FakeDevice,
}

#[async_trait]
impl SessionChannel for FakeChannel {
    async fn run_once(&mut self, command: &str) -> Result<String> {
        if command.starts_with("show cdp neighbors") {
            Ok(self.device.neighbors.clone())
        } else {
            assert!(command.starts_with("show ip interface brief"));
            Ok(self.device.interfaces.clone())
        }
    }

    async fn run_script(&mut self, commands: &[String], terminator: &str) -> Result<String> {
        assert_eq!(terminator, "exit");
        if commands.iter().any(|c| c.contains("detail")) {
            Ok(self.device.details.clone())
        } else {
            Ok(self.device.identity.clone())
        }
    }

    async fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

fn neighbor_table(rows: &[(&str, &str)]) -> String {
    let mut out = String::from(
        "Capability Codes: R - Router, T - Trans Bridge, B - Source Route Bridge\n\
         \n\
         Device ID        Local Intrfce     Holdtme    Capability  Platform  Port ID\n",
    );
    for (device, interface) in rows {
        out.push_str(&format!(
            "{device:<17}{interface:<18}150            S I   WS-C3750  Gig 1/1\n"
        ));
    }
    out
}

fn detail_output(ips: &[&str]) -> String {
    ips.iter()
        .map(|ip| format!("  IP address: {ip}\n"))
        .collect()
}

fn identity_output(hostname: &str, domain: Option<&str>) -> String {
    let mut out = format!("hostname {hostname}\n");
    if let Some(domain) = domain {
        out.push_str(&format!("ip domain-name {domain}\n"));
    }
    out
}

fn interface_table(rows: &[(&str, &str)]) -> String {
    let mut out = String::from(
        "Interface              IP-Address      OK? Method Status                Protocol\n",
    );
    for (name, ip) in rows {
        out.push_str(&format!(
            "{name:<23}{ip:<16}YES NVRAM  up                    up\n"
        ));
    }
    out
}

fn engine(gateway: Arc<FakeGateway>, pool_capacity: usize) -> CrawlEngine {
    CrawlEngine::new(
        gateway,
        CrawlOptions {
            default_domain: "corp.example".to_string(),
            pool_capacity,
        },
    )
}

#[tokio::test]
async fn test_single_device_without_neighbors() {
    let gateway = FakeGateway::new(vec![(
        "10.0.0.1",
        FakeDevice {
            neighbors: neighbor_table(&[]),
            identity: identity_output("core-1", Some("lab.example")),
            interfaces: interface_table(&[
                ("GigabitEthernet0/1", "10.0.0.1"),
                ("Loopback0", "10.255.0.1"),
            ]),
            ..FakeDevice::default()
        },
    )]);

    let report = engine(gateway, 4).run("10.0.0.1").await.unwrap();

    assert_eq!(report.addresses, vec!["10.0.0.1"]);
    assert_eq!(report.expanded, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(report.fqdns(), vec!["core-1.lab.example"]);
    assert_eq!(
        report.matched_records(),
        vec![
            "core-1-gi0_1.lab.example\t10.0.0.1",
            "core-1-lo0.lab.example\t10.255.0.1",
        ]
    );
}

#[tokio::test]
async fn test_two_hop_discovery_with_cycle() {
    let gateway = FakeGateway::new(vec![
        (
            "10.0.0.1",
            FakeDevice {
                neighbors: neighbor_table(&[("edge-2.lab", "Gig 0/9")]),
                details: detail_output(&["10.0.0.2"]),
                identity: identity_output("core-1", Some("lab.example")),
                interfaces: interface_table(&[("GigabitEthernet0/1", "10.0.0.1")]),
            },
        ),
        (
            "10.0.0.2",
            FakeDevice {
                // Points back at the seed; the frontier must not grow.
                neighbors: neighbor_table(&[("core-1.lab", "Ten 1/0/1")]),
                details: detail_output(&["10.0.0.1"]),
                identity: identity_output("edge-2", None),
                interfaces: interface_table(&[("TenGigabitEthernet1/0/1", "10.0.0.2")]),
            },
        ),
    ]);

    let report = engine(gateway, 4).run("10.0.0.1").await.unwrap();

    assert_eq!(report.addresses, vec!["10.0.0.1", "10.0.0.2"]);
    assert_eq!(report.expanded, 2);
    assert_eq!(report.failed, 0);
    // edge-2 reported no domain-name and falls back to the default.
    assert_eq!(
        report.fqdns(),
        vec!["core-1.lab.example", "edge-2.corp.example"]
    );
    assert_eq!(
        report.matched_records(),
        vec![
            "core-1-gi0_1.lab.example\t10.0.0.1",
            "edge-2-te1_0_1.corp.example\t10.0.0.2",
        ]
    );
}

#[tokio::test]
async fn test_unreachable_peer_does_not_stop_the_crawl() {
    let gateway = FakeGateway::new(vec![(
        "10.0.0.1",
        FakeDevice {
            neighbors: neighbor_table(&[("ghost-9.lab", "Gig 0/2")]),
            details: detail_output(&["10.0.0.9"]),
            identity: identity_output("core-1", Some("lab.example")),
            interfaces: interface_table(&[("GigabitEthernet0/1", "10.0.0.1")]),
        },
    )]);

    let report = engine(gateway, 4).run("10.0.0.1").await.unwrap();

    // The unreachable peer stays in the discovered set but resolves nothing.
    assert_eq!(report.addresses, vec!["10.0.0.1", "10.0.0.9"]);
    assert_eq!(report.expanded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.fqdns(), vec!["core-1.lab.example"]);
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_report() {
    let gateway = FakeGateway::new(vec![]);

    let report = engine(gateway, 4).run("10.0.0.1").await.unwrap();

    assert_eq!(report.addresses, vec!["10.0.0.1"]);
    assert_eq!(report.expanded, 0);
    assert_eq!(report.failed, 1);
    assert!(report.devices.is_empty());
    assert!(report.matched_records().is_empty());
}

#[tokio::test]
async fn test_duplicate_hostname_resolved_once() {
    // Two management addresses reach the same logical device; only the
    // first in discovery order contributes records.
    let shared = FakeDevice {
        neighbors: neighbor_table(&[("peer.lab", "Vla 100")]),
        details: detail_output(&["10.0.0.2"]),
        identity: identity_output("core-1", Some("lab.example")),
        interfaces: interface_table(&[("Vlan100", "10.100.0.1")]),
    };
    let mut second = shared.clone();
    second.details = detail_output(&["10.0.0.1"]);

    let gateway = FakeGateway::new(vec![("10.0.0.1", shared), ("10.0.0.2", second)]);

    // Pool capacity of one keeps resolution order deterministic.
    let report = engine(gateway, 1).run("10.0.0.1").await.unwrap();

    assert_eq!(report.addresses, vec!["10.0.0.1", "10.0.0.2"]);
    assert_eq!(report.devices.len(), 1);
    assert_eq!(report.devices[0].address, "10.0.0.1");
    assert_eq!(report.fqdns(), vec!["core-1.lab.example"]);
    assert_eq!(
        report.matched_records(),
        vec!["core-1-vl100.lab.example\t10.100.0.1"]
    );
}

#[tokio::test]
async fn test_seed_whitespace_trimmed() {
    let gateway = FakeGateway::new(vec![(
        "10.0.0.1",
        FakeDevice {
            neighbors: neighbor_table(&[]),
            identity: identity_output("core-1", Some("lab.example")),
            interfaces: interface_table(&[]),
            ..FakeDevice::default()
        },
    )]);

    let report = engine(gateway, 4).run(" 10.0.0.1\n").await.unwrap();
    assert_eq!(report.addresses, vec!["10.0.0.1"]);
}

#[tokio::test]
async fn test_empty_seed_rejected() {
    let gateway = FakeGateway::new(vec![]);
    assert!(engine(gateway, 4).run("   ").await.is_err());
}
