use crate::error::{EapiError, Result};
use crate::response::{
    ArpEntry, JsonRpcRequest, JsonRpcResponse, MacTableEntry, RunCmdsParams, ShowHostname,
    ShowIpArp, ShowMacAddressTable,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Protocol for the eAPI session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Http,
    #[default]
    Https,
}

impl Transport {
    pub fn scheme(&self) -> &'static str {
        match self {
            Transport::Http => "http",
            Transport::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Transport::Http => 80,
            Transport::Https => 443,
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// Connection settings for one switch.
#[derive(Debug, Clone)]
pub struct EapiOptions {
    pub host: String,
    pub username: String,
    pub password: String,
    pub transport: Transport,
    pub port: Option<u16>,
    pub timeout_secs: u64,
    pub verify_tls: bool,
}

impl EapiOptions {
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            transport: Transport::default(),
            port: None,
            timeout_secs: 10,
            verify_tls: true,
        }
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_tls_verification(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }
}

/// Read-only eAPI client. Issues `runCmds` JSON-RPC calls against the
/// switch's `/command-api` endpoint with HTTP basic auth.
pub struct EapiClient {
    http: Client,
    endpoint: Url,
    host: String,
    username: String,
    password: String,
}

impl EapiClient {
    pub fn new(options: &EapiOptions) -> Result<Self> {
        let port = options.port.unwrap_or_else(|| options.transport.default_port());
        let raw = format!(
            "{}://{}:{}/command-api",
            options.transport.scheme(),
            options.host,
            port
        );
        let endpoint = Url::parse(&raw).map_err(|e| EapiError::InvalidEndpoint(format!("{raw}: {e}")))?;

        // Leaf switches in the field almost always run a self-signed cert,
        // so TLS verification is an opt-out.
        let http = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(options.timeout_secs.div_ceil(2)))
            .danger_accept_invalid_certs(!options.verify_tls)
            .build()?;

        Ok(Self {
            http,
            endpoint,
            host: options.host.clone(),
            username: options.username.clone(),
            password: options.password.clone(),
        })
    }

    /// Run a batch of CLI commands, returning one JSON body per command.
    pub async fn run_cmds(&self, cmds: &[&str]) -> Result<Vec<serde_json::Value>> {
        debug!("Running {} command(s) against {}", cmds.len(), self.host);

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: "runCmds",
            params: RunCmdsParams {
                version: 1,
                cmds,
                format: "json",
            },
            id: format!("leafmap-{}", std::process::id()),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .basic_auth(&self.username, Some(&self.password))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(EapiError::AuthFailed {
                host: self.host.clone(),
                status: status.as_u16(),
            });
        }
        let response = response.error_for_status()?;

        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| EapiError::UnexpectedResponse(format!("malformed JSON-RPC body: {e}")))?;

        if let Some(error) = body.error {
            return Err(EapiError::Command {
                code: error.code,
                message: error.message,
            });
        }

        let results = body
            .result
            .ok_or_else(|| EapiError::UnexpectedResponse("missing result array".to_string()))?;

        if results.len() != cmds.len() {
            return Err(EapiError::UnexpectedResponse(format!(
                "expected {} result(s), got {}",
                cmds.len(),
                results.len()
            )));
        }

        Ok(results)
    }

    /// Fetch the switch ARP table.
    pub async fn show_ip_arp(&self) -> Result<Vec<ArpEntry>> {
        let mut results = self.run_cmds(&["show ip arp"]).await?;
        let body: ShowIpArp = serde_json::from_value(results.remove(0))
            .map_err(|e| EapiError::UnexpectedResponse(format!("show ip arp: {e}")))?;

        info!(
            "Fetched {} ARP neighbor(s) from {}",
            body.ip_v4_neighbors.len(),
            self.host
        );
        Ok(body.ip_v4_neighbors)
    }

    /// Fetch the unicast MAC address table.
    pub async fn show_mac_address_table(&self) -> Result<Vec<MacTableEntry>> {
        let mut results = self.run_cmds(&["show mac address-table"]).await?;
        let body: ShowMacAddressTable = serde_json::from_value(results.remove(0))
            .map_err(|e| EapiError::UnexpectedResponse(format!("show mac address-table: {e}")))?;

        let entries = body.unicast_table.table_entries;
        info!("Fetched {} MAC table entrie(s) from {}", entries.len(), self.host);
        Ok(entries)
    }

    /// Fetch the switch's configured hostname.
    pub async fn show_hostname(&self) -> Result<String> {
        let mut results = self.run_cmds(&["show hostname"]).await?;
        let body: ShowHostname = serde_json::from_value(results.remove(0))
            .map_err(|e| EapiError::UnexpectedResponse(format!("show hostname: {e}")))?;
        Ok(body.hostname)
    }
}
