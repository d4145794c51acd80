//! Discovery frontier: the growing set of device addresses driving the crawl.

use indexmap::IndexSet;

/// Expansion state of one frontier address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressState {
    /// Discovered, not yet queried for neighbors.
    Pending,
    /// Handed to a worker in the current generation.
    Expanding,
    /// Neighbor query completed.
    Expanded,
    /// No channel or no output. Terminal; the address is never retried.
    ExpandFailed,
}

/// Insertion-ordered set of discovered addresses with per-address expansion
/// state.
///
/// Addresses are opaque strings compared exactly as devices report them;
/// nothing is normalized. The set only grows and the scan cursor only moves
/// forward, so every address is expanded at most once. Callers serialize all
/// access through one lock: the membership check and the append in
/// [`Frontier::insert`] must be a single atomic step.
#[derive(Debug, Default)]
pub struct Frontier {
    addresses: IndexSet<String>,
    states: Vec<AddressState>,
    cursor: usize,
}

impl Frontier {
    /// Create a frontier holding just the seed address.
    pub fn seeded(seed: impl Into<String>) -> Self {
        let mut frontier = Self::default();
        frontier.insert(seed.into());
        frontier
    }

    /// Insert an address unless it has been seen before. Returns whether the
    /// address was new.
    pub fn insert(&mut self, address: String) -> bool {
        let inserted = self.addresses.insert(address);
        if inserted {
            self.states.push(AddressState::Pending);
        }
        inserted
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(address)
    }

    /// Hand out the next generation: up to `limit` pending addresses, marked
    /// `Expanding`. Workers report their outcome back by index.
    pub fn take_batch(&mut self, limit: usize) -> Vec<(usize, String)> {
        let end = self.addresses.len().min(self.cursor + limit.max(1));
        let batch: Vec<(usize, String)> = (self.cursor..end)
            .map(|index| (index, self.addresses[index].clone()))
            .collect();
        for (index, _) in &batch {
            self.states[*index] = AddressState::Expanding;
        }
        self.cursor = end;
        batch
    }

    /// Record the outcome of one expansion.
    pub fn mark(&mut self, index: usize, state: AddressState) {
        self.states[index] = state;
    }

    /// All addresses in discovery order.
    pub fn addresses(&self) -> Vec<String> {
        self.addresses.iter().cloned().collect()
    }

    /// Addresses whose expansion succeeded, in discovery order.
    pub fn resolvable(&self) -> Vec<String> {
        self.addresses
            .iter()
            .zip(&self.states)
            .filter(|(_, state)| **state == AddressState::Expanded)
            .map(|(address, _)| address.clone())
            .collect()
    }

    /// `(expanded, failed)` counts over all addresses.
    pub fn outcome_counts(&self) -> (usize, usize) {
        let expanded = self
            .states
            .iter()
            .filter(|s| **s == AddressState::Expanded)
            .count();
        let failed = self
            .states
            .iter()
            .filter(|s| **s == AddressState::ExpandFailed)
            .count();
        (expanded, failed)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
