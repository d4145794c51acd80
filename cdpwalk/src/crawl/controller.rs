//! Frontier controller: the generational breadth-first crawl.
//!
//! Expansion runs as a synchronous generational BFS: while any address is
//! pending, a batch of at most the pool capacity is handed to concurrent
//! workers, and the next batch is not selected until the whole generation
//! has resolved. This bounds the number of simultaneously open SSH sessions
//! to the pool capacity and keeps the termination argument simple: the
//! cursor only moves forward over a set that only grows.
//!
//! After expansion converges, each successfully expanded address is resolved
//! to a device (identity plus interface table) in bounded batches as well,
//! deduplicated by hostname.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::{debug, info, warn};
use tokio::task::JoinSet;

use super::frontier::{AddressState, Frontier};
use super::records::{CrawlReport, DeviceRecords};
use crate::error::{CrawlError, Result};
use crate::grammar::{DetailGrammar, IdentityGrammar, InterfaceGrammar, NeighborGrammar};
use crate::transport::{SessionChannel, SessionGateway};

const NEIGHBOR_LIST_CMD: &str = "show cdp neighbors";
const IDENTITY_CMDS: [&str; 2] = ["show run | i hostname", "show run | i domain-name"];
const INTERFACE_TABLE_CMD: &str = "show ip interface brief | exclude unassigned";
const SESSION_EXIT: &str = "exit";

fn detail_command(interface: &str) -> String {
    format!("show cdp neighbors {interface} detail | include IP")
}

/// Settings the crawl engine needs beyond the transport.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Domain used when a device reports no domain-name.
    pub default_domain: String,

    /// Batch size for expansion and resolution generations.
    pub pool_capacity: usize,
}

/// Crawls a network of devices breadth-first from one seed address.
pub struct CrawlEngine {
    gateway: Arc<dyn SessionGateway>,
    options: CrawlOptions,
    neighbors: NeighborGrammar,
    details: DetailGrammar,
    identity: IdentityGrammar,
    interfaces: InterfaceGrammar,
}

impl CrawlEngine {
    pub fn new(gateway: Arc<dyn SessionGateway>, options: CrawlOptions) -> Self {
        Self {
            gateway,
            options,
            neighbors: NeighborGrammar::new(),
            details: DetailGrammar::new(),
            identity: IdentityGrammar::new(),
            interfaces: InterfaceGrammar::new(),
        }
    }

    /// Run the full crawl: expand the frontier until no address is pending,
    /// then resolve every reachable device.
    ///
    /// No per-device failure is fatal; the report covers whatever subset of
    /// the network was reachable.
    pub async fn run(&self, seed: impl Into<String>) -> Result<CrawlReport> {
        let seed = seed.into().trim().to_string();
        if seed.is_empty() {
            return Err(CrawlError::SeedMissing.into());
        }

        let started = Instant::now();
        info!("starting crawl from {seed}");

        let frontier = Arc::new(Mutex::new(Frontier::seeded(seed.clone())));
        self.expand_all(&frontier).await;

        let devices = self.resolve_all(&frontier).await;

        let (addresses, expanded, failed) = {
            let frontier = frontier.lock().unwrap();
            let (expanded, failed) = frontier.outcome_counts();
            (frontier.addresses(), expanded, failed)
        };
        info!(
            "crawl finished: {} address(es), {} device(s), {} unreachable",
            addresses.len(),
            devices.len(),
            failed
        );

        Ok(CrawlReport {
            seed,
            addresses,
            devices,
            expanded,
            failed,
            elapsed: started.elapsed(),
        })
    }

    /// Expand generation after generation until nothing is pending.
    async fn expand_all(&self, frontier: &Arc<Mutex<Frontier>>) {
        loop {
            let batch = frontier
                .lock()
                .unwrap()
                .take_batch(self.options.pool_capacity);
            if batch.is_empty() {
                break;
            }
            debug!("expanding a generation of {} address(es)", batch.len());

            let mut workers = JoinSet::new();
            for (index, address) in batch {
                let gateway = Arc::clone(&self.gateway);
                let frontier = Arc::clone(frontier);
                let neighbors = self.neighbors.clone();
                let details = self.details.clone();
                workers.spawn(async move {
                    match expand_address(gateway.as_ref(), &neighbors, &details, &address).await {
                        Ok(candidates) => {
                            let mut frontier = frontier.lock().unwrap();
                            let mut fresh = 0;
                            for candidate in candidates {
                                if frontier.insert(candidate) {
                                    fresh += 1;
                                }
                            }
                            frontier.mark(index, AddressState::Expanded);
                            drop(frontier);
                            debug!("{address}: {fresh} new neighbor address(es)");
                        }
                        Err(err) => {
                            warn!("expansion failed for {address}: {err}");
                            frontier.lock().unwrap().mark(index, AddressState::ExpandFailed);
                        }
                    }
                });
            }
            while workers.join_next().await.is_some() {}
        }
    }

    /// Resolve every expanded address in bounded batches, deduplicating by
    /// hostname. Results are reassembled in frontier order so the output
    /// ordering does not depend on completion order.
    async fn resolve_all(&self, frontier: &Arc<Mutex<Frontier>>) -> Vec<DeviceRecords> {
        let addresses = frontier.lock().unwrap().resolvable();
        let seen_hostnames = Arc::new(Mutex::new(HashSet::new()));
        let mut devices: Vec<Option<DeviceRecords>> = Vec::with_capacity(addresses.len());

        for batch in addresses.chunks(self.options.pool_capacity.max(1)) {
            let mut workers = JoinSet::new();
            for (offset, address) in batch.iter().cloned().enumerate() {
                let gateway = Arc::clone(&self.gateway);
                let identity = self.identity.clone();
                let interfaces = self.interfaces.clone();
                let seen = Arc::clone(&seen_hostnames);
                let default_domain = self.options.default_domain.clone();
                workers.spawn(async move {
                    let device = match resolve_address(
                        gateway.as_ref(),
                        &identity,
                        &interfaces,
                        &seen,
                        &default_domain,
                        &address,
                    )
                    .await
                    {
                        Ok(device) => device,
                        Err(err) => {
                            warn!("resolution failed for {address}: {err}");
                            None
                        }
                    };
                    (offset, device)
                });
            }

            let mut results: Vec<Option<DeviceRecords>> = vec![None; batch.len()];
            while let Some(joined) = workers.join_next().await {
                if let Ok((offset, device)) = joined {
                    results[offset] = device;
                }
            }
            devices.extend(results);
        }

        devices.into_iter().flatten().collect()
    }
}

/// Query one device for its neighbors and return candidate peer addresses.
///
/// The neighbor listing runs as a one-shot command; the per-interface detail
/// queries share one interactive shell. An error on either pass discards any
/// partial result for this address.
async fn expand_address(
    gateway: &dyn SessionGateway,
    neighbors: &NeighborGrammar,
    details: &DetailGrammar,
    address: &str,
) -> Result<Vec<String>> {
    let channel = gateway.open(address).await?;
    let listing = run_once_closing(channel, NEIGHBOR_LIST_CMD).await?;

    let refs = neighbors.parse(&listing);
    if refs.is_empty() {
        return Ok(Vec::new());
    }

    let commands: Vec<String> = refs.iter().map(|r| detail_command(r)).collect();
    let channel = gateway.open(address).await?;
    let detail_output = run_script_closing(channel, &commands).await?;

    Ok(details.parse(&detail_output))
}

/// Resolve one address to a device. Returns `Ok(None)` when the hostname was
/// already claimed by another address, meaning a duplicate device to skip.
async fn resolve_address(
    gateway: &dyn SessionGateway,
    identity_grammar: &IdentityGrammar,
    interface_grammar: &InterfaceGrammar,
    seen_hostnames: &Mutex<HashSet<String>>,
    default_domain: &str,
    address: &str,
) -> Result<Option<DeviceRecords>> {
    let channel = gateway.open(address).await?;
    let commands: Vec<String> = IDENTITY_CMDS.iter().map(|c| c.to_string()).collect();
    let config_dump = run_script_closing(channel, &commands).await?;

    let identity = identity_grammar
        .parse(&config_dump, default_domain)
        .ok_or_else(|| CrawlError::IdentityUnresolved {
            address: address.to_string(),
        })?;

    {
        let mut seen = seen_hostnames.lock().unwrap();
        if !seen.insert(identity.hostname.clone()) {
            info!(
                "{address}: hostname {} already recorded, skipping",
                identity.hostname
            );
            return Ok(None);
        }
    }

    let channel = gateway.open(address).await?;
    let table = run_once_closing(channel, INTERFACE_TABLE_CMD).await?;
    let interfaces = interface_grammar.parse(&table);

    info!(
        "{address}: resolved {} with {} interface(s)",
        identity.hostname,
        interfaces.len()
    );
    Ok(Some(DeviceRecords::new(address, identity, interfaces)))
}

/// Run one command and close the channel whatever the outcome.
async fn run_once_closing(mut channel: Box<dyn SessionChannel>, command: &str) -> Result<String> {
    let result = channel.run_once(command).await;
    if let Err(err) = channel.close().await {
        debug!("channel close failed: {err}");
    }
    result
}

/// Run a command script and close the channel whatever the outcome.
async fn run_script_closing(
    mut channel: Box<dyn SessionChannel>,
    commands: &[String],
) -> Result<String> {
    let result = channel.run_script(commands, SESSION_EXIT).await;
    if let Err(err) = channel.close().await {
        debug!("channel close failed: {err}");
    }
    result
}
