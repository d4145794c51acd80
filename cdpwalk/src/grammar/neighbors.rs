//! Neighbor-list grammar.

use regex::Regex;

/// Extracts local interface identifiers from `show cdp neighbors` output.
///
/// A line matches only if the local-interface field, starting at column 17,
/// begins with one of the recognized prefixes (ten-gig, gigabit, loopback,
/// VLAN). The field is fixed-width; trailing whitespace is trimmed off the
/// extracted identifier. Anything else on the line is ignored.
#[derive(Debug, Clone)]
pub struct NeighborGrammar {
    line: Regex,
}

impl NeighborGrammar {
    pub fn new() -> Self {
        // 17 columns of device-id, then the interface field: a recognized
        // three-character prefix plus 15 more columns.
        let line = Regex::new(r"(?m)^.{17}(\b(?:Ten|Gig|Loo|Vla).{15})")
            .expect("neighbor line pattern is valid");
        Self { line }
    }

    /// Parse one neighbor listing into interface identifiers, in line order.
    pub fn parse(&self, output: &str) -> Vec<String> {
        self.line
            .captures_iter(output)
            .map(|caps| caps[1].trim().to_string())
            .collect()
    }
}

impl Default for NeighborGrammar {
    fn default() -> Self {
        Self::new()
    }
}
