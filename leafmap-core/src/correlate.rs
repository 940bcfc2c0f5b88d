//! Joins the MAC address table against the ARP table to classify every
//! learned end-host MAC as resolved (has an IP) or unresolved.

use crate::error::{CoreError, Result};
use crate::mac::MacAddr;
use leafmap_eapi::{ArpEntry, EntryType, MacTableEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;
use tracing::debug;

/// Which MAC-table rows count as end-host facing. This is environment
/// policy, not topology inference: VXLAN flood interfaces and router-facing
/// ports carry MACs that belong to other switches' hosts.
#[derive(Debug, Clone)]
pub struct InterfaceFilter {
    excluded_prefixes: Vec<String>,
    include_static: bool,
}

impl InterfaceFilter {
    pub fn new(excluded_prefixes: Vec<String>, include_static: bool) -> Self {
        Self {
            excluded_prefixes,
            include_static,
        }
    }

    pub fn permits(&self, entry: &MacTableEntry) -> bool {
        if entry.entry_type == EntryType::Static && !self.include_static {
            return false;
        }
        !self
            .excluded_prefixes
            .iter()
            .any(|prefix| entry.interface.starts_with(prefix.as_str()))
    }
}

impl Default for InterfaceFilter {
    fn default() -> Self {
        Self {
            excluded_prefixes: vec!["Vxlan".to_string(), "Router".to_string()],
            include_static: false,
        }
    }
}

/// An end-host MAC with a known IP, hostname filled in later by the
/// resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedHost {
    pub mac: MacAddr,
    pub ip: IpAddr,
    pub hostname: Option<String>,
}

/// An end-host MAC with no matching ARP entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedHost {
    pub mac: MacAddr,
    pub vlan: u16,
    pub interface: String,
}

#[derive(Debug, Clone, Default)]
pub struct Correlation {
    pub resolved: Vec<ResolvedHost>,
    pub unresolved: Vec<UnresolvedHost>,
}

impl Correlation {
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty() && self.unresolved.is_empty()
    }
}

/// Classify every filtered MAC-table entry against the ARP table.
///
/// Each permitted entry lands in exactly one of the two output sequences,
/// except a MAC with several ARP matches (multi-IP host, stale entries),
/// which produces one `ResolvedHost` per distinct IP. Output order follows
/// MAC-table order; multiple IPs for one MAC follow ARP-table order. Pure
/// function of its inputs; the only failure is a malformed MAC string.
pub fn correlate(
    mac_table: &[MacTableEntry],
    arp_table: &[ArpEntry],
    filter: &InterfaceFilter,
) -> Result<Correlation> {
    let mut arp_index: HashMap<MacAddr, Vec<IpAddr>> = HashMap::new();
    for neighbor in arp_table {
        let mac = MacAddr::parse(&neighbor.hw_address).map_err(|source| CoreError::MacFormat {
            table: "ARP",
            interface: neighbor.interface.clone(),
            source,
        })?;
        let ips = arp_index.entry(mac).or_default();
        // Stale ARP can repeat an (IP, MAC) pair across VLAN interfaces.
        if !ips.contains(&neighbor.address) {
            ips.push(neighbor.address);
        }
    }

    let mut correlation = Correlation::default();
    let mut permitted = 0usize;
    for entry in mac_table {
        if !filter.permits(entry) {
            debug!(
                "Skipping MAC table entry on {} (filtered interface or static entry)",
                entry.interface
            );
            continue;
        }

        permitted += 1;
        let mac = MacAddr::parse(&entry.mac_address).map_err(|source| CoreError::MacFormat {
            table: "MAC address",
            interface: entry.interface.clone(),
            source,
        })?;

        match arp_index.get(&mac) {
            Some(ips) => {
                for ip in ips {
                    correlation.resolved.push(ResolvedHost {
                        mac,
                        ip: *ip,
                        hostname: None,
                    });
                }
            }
            None => correlation.unresolved.push(UnresolvedHost {
                mac,
                vlan: entry.vlan_id,
                interface: entry.interface.clone(),
            }),
        }
    }

    debug!(
        "Correlated {} of {} MAC table entrie(s): {} resolved, {} unresolved",
        permitted,
        mac_table.len(),
        correlation.resolved.len(),
        correlation.unresolved.len()
    );
    Ok(correlation)
}
