//! Result file writing.
//!
//! Three flat lists per crawl, one entry per line: every discovered address,
//! every device FQDN, and the DNS seeding records.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::crawl::CrawlReport;
use crate::error::Result;

/// Write the crawl's output lists into `dir`, named after the seed address.
/// Returns the paths written.
pub fn write_reports(report: &CrawlReport, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let ips_path = dir.join(format!("found_ips_{}.txt", report.seed));
    write_lines(&ips_path, &report.addresses)?;

    let fqdn_path = dir.join(format!("fqdn_{}.txt", report.seed));
    write_lines(&fqdn_path, &report.fqdns())?;

    let dns_path = dir.join(format!("dns_{}.txt", report.seed));
    write_lines(&dns_path, &report.matched_records())?;

    Ok(vec![ips_path, fqdn_path, dns_path])
}

fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_writes_one_file_per_list() {
        let report = CrawlReport {
            seed: "10.0.0.1".to_string(),
            addresses: vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()],
            devices: vec![],
            expanded: 2,
            failed: 0,
            elapsed: Duration::from_secs(1),
        };

        let dir = std::env::temp_dir().join("cdpwalk-report-test");
        let paths = write_reports(&report, &dir).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with("found_ips_10.0.0.1.txt"));

        let ips = fs::read_to_string(&paths[0]).unwrap();
        assert_eq!(ips, "10.0.0.1\n10.0.0.2\n");
        let fqdns = fs::read_to_string(&paths[1]).unwrap();
        assert_eq!(fqdns, "");

        fs::remove_dir_all(&dir).unwrap();
    }
}
