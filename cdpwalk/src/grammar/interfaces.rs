//! Interface-table grammar.

use regex::Regex;

/// One row of `show ip interface brief | exclude unassigned` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    /// First two characters of the reported interface name, e.g. `Gi`.
    pub abbrev: String,

    /// Trailing slot/port numerals, e.g. `1/1` for GigabitEthernet1/1.
    pub suffix: String,

    /// Address assigned to the interface.
    pub ip: String,
}

impl InterfaceRecord {
    /// Abbreviated DNS-ready name: `GigabitEthernet1/1` becomes `gi1_1`.
    pub fn short_name(&self) -> String {
        format!("{}{}", self.abbrev, self.suffix)
            .to_lowercase()
            .replace('/', "_")
    }
}

/// Extracts interface records from the interface summary table.
///
/// A line matches only when a 23-column interface-name field starting with
/// one of `G T V L F` is immediately followed by a 16-column IP field; both
/// fields are trimmed. Lines of any other shape are skipped.
#[derive(Debug, Clone)]
pub struct InterfaceGrammar {
    line: Regex,
}

impl InterfaceGrammar {
    pub fn new() -> Self {
        let line = Regex::new(r"(?m)^([GTVLF].{22})(.{16})")
            .expect("interface line pattern is valid");
        Self { line }
    }

    /// Parse one interface table into records, in line order.
    pub fn parse(&self, output: &str) -> Vec<InterfaceRecord> {
        self.line
            .captures_iter(output)
            .map(|caps| {
                let name = caps[1].trim();
                let ip = caps[2].trim();
                InterfaceRecord {
                    abbrev: name[..2].to_string(),
                    suffix: numeric_suffix(name),
                    ip: ip.to_string(),
                }
            })
            .collect()
    }
}

impl Default for InterfaceGrammar {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk the interface name from the end, collecting digits and `/` until the
/// first other character, and return the run in reading order.
fn numeric_suffix(name: &str) -> String {
    let tail: Vec<char> = name
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit() || *c == '/')
        .collect();
    tail.into_iter().rev().collect()
}
