//! cdpwalk binary: crawl a network from a seed address and write the
//! discovered address, FQDN, and DNS record lists.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::info;

use cdpwalk::config::{self, CrawlerConfig};
use cdpwalk::crawl::{CrawlEngine, CrawlOptions};
use cdpwalk::error::CrawlError;
use cdpwalk::transport::SshGateway;
use cdpwalk::{Result, report};

/// CDP topology crawler for Cisco IOS networks.
#[derive(Parser)]
#[command(name = "cdpwalk", version, about)]
struct Cli {
    /// Seed address to start the crawl from.
    seed: Option<String>,

    /// Read the seed address from the first line of this file instead.
    #[arg(long, conflicts_with = "seed")]
    seed_file: Option<PathBuf>,

    /// Path to the crawler configuration file.
    #[arg(short, long, default_value = "cdpwalk.json")]
    config: PathBuf,

    /// Directory the result lists are written to.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let config = CrawlerConfig::load(&cli.config)?;
    config.validate()?;

    let seed = match (cli.seed, cli.seed_file) {
        (Some(seed), _) => seed,
        (None, Some(path)) => config::read_seed_file(path)?,
        (None, None) => return Err(CrawlError::SeedMissing.into()),
    };

    let options = CrawlOptions {
        default_domain: config.default_domain.clone(),
        pool_capacity: config.pool_capacity,
    };
    let gateway = Arc::new(SshGateway::new(config));
    let engine = CrawlEngine::new(gateway, options);

    let crawl_report = engine.run(seed).await?;
    info!(
        "{} address(es) found, {} device(s) resolved, {} unreachable, {:.2?} elapsed",
        crawl_report.addresses.len(),
        crawl_report.devices.len(),
        crawl_report.failed,
        crawl_report.elapsed
    );

    for path in report::write_reports(&crawl_report, &cli.output_dir)? {
        info!("wrote {}", path.display());
    }
    Ok(())
}
