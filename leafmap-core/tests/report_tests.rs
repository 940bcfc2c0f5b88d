use leafmap_core::correlate::{Correlation, ResolvedHost, UnresolvedHost};
use leafmap_core::mac::MacAddr;
use leafmap_core::report::{render_summary, write_inventory};
use std::fs;
use tempfile::tempdir;

fn resolved(ip: &str, mac: &str, hostname: Option<&str>) -> ResolvedHost {
    ResolvedHost {
        mac: MacAddr::parse(mac).unwrap(),
        ip: ip.parse().unwrap(),
        hostname: hostname.map(str::to_string),
    }
}

fn unresolved(mac: &str, vlan: u16, interface: &str) -> UnresolvedHost {
    UnresolvedHost {
        mac: MacAddr::parse(mac).unwrap(),
        vlan,
        interface: interface.to_string(),
    }
}

fn sample_correlation() -> Correlation {
    Correlation {
        resolved: vec![
            resolved("10.0.0.20", "00:11:22:33:44:55", Some("db1.example.net")),
            resolved("10.0.0.5", "00:11:22:33:44:66", None),
            resolved("fe80::1", "00:11:22:33:44:55", Some("db1.example.net")),
        ],
        unresolved: vec![unresolved("00:11:22:33:44:77", 300, "Ethernet12")],
    }
}

#[test]
fn writes_both_files_with_expected_formats() {
    let dir = tempdir().unwrap();

    let summary = write_inventory(dir.path(), "leaf1", &sample_correlation()).unwrap();

    assert_eq!(summary.hosts_file, dir.path().join("leaf1-hosts.txt"));
    assert_eq!(summary.noip_file, dir.path().join("leaf1-noip.txt"));

    let hosts = fs::read_to_string(&summary.hosts_file).unwrap();
    let lines: Vec<&str> = hosts.lines().collect();
    // Sorted by IP, IPv4 ahead of IPv6, placeholder for missing hostname.
    assert_eq!(
        lines,
        vec![
            "10.0.0.5 unresolved",
            "10.0.0.20 db1.example.net",
            "fe80::1 db1.example.net",
        ]
    );

    let noip = fs::read_to_string(&summary.noip_file).unwrap();
    assert_eq!(noip, "00:11:22:33:44:77 300 Ethernet12\n");
}

#[test]
fn repeated_runs_do_not_duplicate_lines() {
    let dir = tempdir().unwrap();
    let correlation = sample_correlation();

    let first = write_inventory(dir.path(), "leaf1", &correlation).unwrap();
    assert_eq!(first.resolved_written, 3);
    assert_eq!(first.resolved_skipped, 0);

    let second = write_inventory(dir.path(), "leaf1", &correlation).unwrap();
    assert_eq!(second.resolved_written, 0);
    assert_eq!(second.resolved_skipped, 3);
    assert_eq!(second.unresolved_written, 0);
    assert_eq!(second.unresolved_skipped, 1);

    let hosts = fs::read_to_string(&second.hosts_file).unwrap();
    assert_eq!(hosts.lines().count(), 3);
}

#[test]
fn new_observations_still_append() {
    let dir = tempdir().unwrap();
    let mut correlation = sample_correlation();

    write_inventory(dir.path(), "leaf1", &correlation).unwrap();

    correlation
        .resolved
        .push(resolved("10.0.0.30", "00:11:22:33:44:88", Some("app3")));
    let summary = write_inventory(dir.path(), "leaf1", &correlation).unwrap();

    assert_eq!(summary.resolved_written, 1);
    let hosts = fs::read_to_string(&summary.hosts_file).unwrap();
    assert!(hosts.contains("10.0.0.30 app3"));
    assert_eq!(hosts.lines().count(), 4);
}

#[test]
fn creates_missing_output_directory() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("inventory").join("leaves");

    let summary = write_inventory(&nested, "leaf2", &sample_correlation()).unwrap();
    assert!(summary.hosts_file.exists());
    assert!(summary.noip_file.exists());
}

#[test]
fn summary_reports_counts_and_paths() {
    let dir = tempdir().unwrap();
    let correlation = sample_correlation();
    let summary = write_inventory(dir.path(), "leaf1", &correlation).unwrap();

    let rendered = render_summary("leaf1", &correlation, &summary);

    assert!(rendered.contains("Host inventory for leaf1"));
    assert!(rendered.contains("Resolved hosts:   3 (2 with hostname)"));
    assert!(rendered.contains("Unresolved MACs:  1"));
    assert!(rendered.contains("3 new, 0 already present"));
}
