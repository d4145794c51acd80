//! Breadth-first topology discovery.
//!
//! [`Frontier`] holds the growing, insertion-ordered set of discovered
//! addresses; [`CrawlEngine`] drives expansion and resolution over it and
//! assembles a [`CrawlReport`].

mod controller;
mod frontier;
mod records;

pub use controller::{CrawlEngine, CrawlOptions};
pub use frontier::{AddressState, Frontier};
pub use records::{CrawlReport, DeviceRecords};
