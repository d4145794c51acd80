//! # cdpwalk
//!
//! Async CDP topology crawler for Cisco IOS networks.
//!
//! Starting from one seed address, cdpwalk queries each reachable device for
//! its directly connected CDP neighbors and follows them breadth-first until
//! no new addresses remain. Every distinct device is then resolved to a
//! hostname, domain, and interface-to-IP table, producing normalized name
//! records suitable for DNS and inventory seeding.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use cdpwalk::{CrawlEngine, CrawlOptions, CrawlerConfig, SshGateway};
//!
//! #[tokio::main]
//! async fn main() -> cdpwalk::Result<()> {
//!     let config = CrawlerConfig::load("cdpwalk.json")?;
//!     config.validate()?;
//!
//!     let options = CrawlOptions {
//!         default_domain: config.default_domain.clone(),
//!         pool_capacity: config.pool_capacity,
//!     };
//!     let engine = CrawlEngine::new(Arc::new(SshGateway::new(config)), options);
//!
//!     let report = engine.run("10.0.0.1").await?;
//!     for line in report.matched_records() {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawl;
pub mod error;
pub mod grammar;
pub mod report;
pub mod transport;

// Re-export main types for convenience
pub use config::CrawlerConfig;
pub use crawl::{CrawlEngine, CrawlOptions, CrawlReport, DeviceRecords};
pub use error::{Error, Result};
pub use transport::{SessionChannel, SessionGateway, SshGateway};
