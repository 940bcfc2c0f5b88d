//! Typed views over the eAPI JSON bodies consumed by this crate.
//!
//! MAC addresses are kept as the raw strings the switch emitted; the ARP and
//! MAC-table outputs do not use the same delimiter style, so normalization is
//! left to the caller.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// JSON-RPC 2.0 request envelope for `runCmds`.
#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: RunCmdsParams<'a>,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RunCmdsParams<'a> {
    pub version: u32,
    pub cmds: &'a [&'a str],
    pub format: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcResponse {
    pub result: Option<Vec<serde_json::Value>>,
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Body of `show ip arp`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowIpArp {
    #[serde(default)]
    pub ip_v4_neighbors: Vec<ArpEntry>,
}

/// One neighbor from the switch ARP table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArpEntry {
    pub address: IpAddr,
    /// Raw MAC string as emitted by the switch.
    pub hw_address: String,
    pub interface: String,
    #[serde(default)]
    pub age: Option<u64>,
}

/// Body of `show mac address-table`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowMacAddressTable {
    pub unicast_table: UnicastTable,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnicastTable {
    #[serde(default)]
    pub table_entries: Vec<MacTableEntry>,
}

/// One learned entry from the switch MAC address table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacTableEntry {
    /// Raw MAC string as emitted by the switch.
    pub mac_address: String,
    pub vlan_id: u16,
    pub interface: String,
    pub entry_type: EntryType,
}

/// How the switch learned a MAC-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryType {
    #[serde(alias = "learnedDynamic", alias = "configuredDynamic")]
    Dynamic,
    #[serde(alias = "learnedStatic", alias = "configuredStatic")]
    Static,
}

/// Body of `show hostname`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowHostname {
    pub hostname: String,
    #[serde(default)]
    pub fqdn: Option<String>,
}
