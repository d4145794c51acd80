//! Neighbor-detail grammar.

/// Extracts peer addresses from batched
/// `show cdp neighbors <interface> detail | include IP` output.
///
/// Every line carrying the `IP address:` marker yields the trailing value as
/// a candidate peer address. Candidates are reported as-is; deciding which
/// of them are new is the frontier's job, not the grammar's.
#[derive(Debug, Clone, Default)]
pub struct DetailGrammar;

const MARKER: &str = "IP address:";

impl DetailGrammar {
    pub fn new() -> Self {
        Self
    }

    /// Parse one detail batch into candidate peer addresses, in line order.
    pub fn parse(&self, output: &str) -> Vec<String> {
        output
            .lines()
            .filter_map(|line| {
                let at = line.find(MARKER)?;
                let value = line[at + MARKER.len()..].trim();
                (!value.is_empty()).then(|| value.to_string())
            })
            .collect()
    }
}
