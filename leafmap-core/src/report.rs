// Output files and run summary rendering

use crate::correlate::{Correlation, ResolvedHost, UnresolvedHost};
use crate::error::{CoreError, Result};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Written in place of a hostname when reverse DNS gave nothing.
pub const NO_HOSTNAME: &str = "unresolved";

/// Outcome of one write pass, for the run summary.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    pub hosts_file: PathBuf,
    pub noip_file: PathBuf,
    pub resolved_written: usize,
    pub resolved_skipped: usize,
    pub unresolved_written: usize,
    pub unresolved_skipped: usize,
}

pub fn resolved_line(host: &ResolvedHost) -> String {
    format!(
        "{} {}",
        host.ip,
        host.hostname.as_deref().unwrap_or(NO_HOSTNAME)
    )
}

pub fn unresolved_line(host: &UnresolvedHost) -> String {
    format!("{} {} {}", host.mac, host.vlan, host.interface)
}

/// Append the classified hosts to the two per-switch files.
///
/// Resolved entries are sorted by IP before writing (IPv4 ahead of IPv6 via
/// `IpAddr` ordering). Lines already present in a file are skipped, so
/// repeated runs against an unchanged switch do not grow the files.
pub fn write_inventory(
    directory: &Path,
    switch_hostname: &str,
    correlation: &Correlation,
) -> Result<WriteSummary> {
    fs::create_dir_all(directory).map_err(|e| CoreError::Io {
        source: e,
        context: format!("Failed to create output directory {:?}", directory),
    })?;

    let hosts_file = directory.join(format!("{switch_hostname}-hosts.txt"));
    let noip_file = directory.join(format!("{switch_hostname}-noip.txt"));

    let mut resolved = correlation.resolved.clone();
    resolved.sort_by_key(|host| host.ip);
    let resolved_lines: Vec<String> = resolved.iter().map(resolved_line).collect();
    let (resolved_written, resolved_skipped) = append_unique(&hosts_file, &resolved_lines)?;

    let unresolved_lines: Vec<String> =
        correlation.unresolved.iter().map(unresolved_line).collect();
    let (unresolved_written, unresolved_skipped) = append_unique(&noip_file, &unresolved_lines)?;

    info!(
        "Wrote {} host line(s) to {:?}, {} unresolved line(s) to {:?}",
        resolved_written, hosts_file, unresolved_written, noip_file
    );

    Ok(WriteSummary {
        hosts_file,
        noip_file,
        resolved_written,
        resolved_skipped,
        unresolved_written,
        unresolved_skipped,
    })
}

/// Append lines not already present in the file. Returns (written, skipped).
fn append_unique(path: &Path, lines: &[String]) -> Result<(usize, usize)> {
    let existing: HashSet<String> = match fs::read_to_string(path) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
        Err(e) => {
            return Err(CoreError::Io {
                source: e,
                context: format!("Failed to read existing output file {:?}", path),
            });
        }
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CoreError::Io {
            source: e,
            context: format!("Failed to open output file {:?}", path),
        })?;

    let mut written = 0;
    let mut skipped = 0;
    let mut seen = existing;
    for line in lines {
        if seen.contains(line) {
            skipped += 1;
            continue;
        }
        writeln!(file, "{line}").map_err(|e| CoreError::Io {
            source: e,
            context: format!("Failed to append to output file {:?}", path),
        })?;
        seen.insert(line.clone());
        written += 1;
    }

    Ok((written, skipped))
}

/// Generate a plain-text run summary.
pub fn render_summary(
    switch_hostname: &str,
    correlation: &Correlation,
    summary: &WriteSummary,
) -> String {
    let mut report = String::new();

    report.push_str("────────────────────────────────────────────────────────\n");
    report.push_str(&format!("Host inventory for {}\n", switch_hostname));
    report.push_str("────────────────────────────────────────────────────────\n");

    let with_hostname = correlation
        .resolved
        .iter()
        .filter(|h| h.hostname.is_some())
        .count();

    report.push_str(&format!(
        "  Resolved hosts:   {} ({} with hostname)\n",
        correlation.resolved.len(),
        with_hostname
    ));
    report.push_str(&format!(
        "  Unresolved MACs:  {}\n",
        correlation.unresolved.len()
    ));
    report.push_str(&format!(
        "  {} -> {} new, {} already present\n",
        summary.hosts_file.display(),
        summary.resolved_written,
        summary.resolved_skipped
    ));
    report.push_str(&format!(
        "  {} -> {} new, {} already present\n",
        summary.noip_file.display(),
        summary.unresolved_written,
        summary.unresolved_skipped
    ));

    report
}
