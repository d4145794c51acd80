//! Text-extraction grammars for device CLI output.
//!
//! Vendor tables are fixed-width without reliable delimiters, so the
//! grammars match on column positions instead of splitting on whitespace.
//! Each grammar is pure: raw command output in, structured records out. An
//! output with no matching lines yields an empty result, never an error, as
//! a device may simply have nothing to report.
//!
//! Keeping the rules behind these small types means a vendor variant with a
//! different table layout can swap in without touching the crawl.

mod detail;
mod identity;
mod interfaces;
mod neighbors;

pub use detail::DetailGrammar;
pub use identity::{DeviceIdentity, IdentityGrammar};
pub use interfaces::{InterfaceGrammar, InterfaceRecord};
pub use neighbors::NeighborGrammar;
