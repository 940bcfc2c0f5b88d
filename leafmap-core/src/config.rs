//! Configuration management for Leafmap.
//!
//! Everything the run needs up front lives here: which switch to query, how
//! to authenticate, which interfaces count as end-host facing, and where the
//! output files go. Credentials are never stored in the file itself; the
//! config names an environment variable holding the password.

use crate::error::{CoreError, Result};
use leafmap_eapi::{EapiOptions, Transport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub switch: SwitchConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Target switch and eAPI session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchConfig {
    pub hostname: String,
    pub username: String,
    /// Name of the environment variable holding the eAPI password.
    #[serde(default = "default_password_env")]
    pub password_env: String,
    #[serde(default)]
    pub transport: Transport,
    /// Defaults to the transport's standard port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_true")]
    pub verify_tls: bool,
}

/// End-host interface policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// MAC-table rows on interfaces with these prefixes are not end hosts.
    pub excluded_interface_prefixes: Vec<String>,
    pub include_static: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            excluded_interface_prefixes: vec!["Vxlan".to_string(), "Router".to_string()],
            include_static: false,
        }
    }
}

/// Reverse DNS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub enabled: bool,
    pub timeout_secs: u64,
    pub workers: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: 2,
            workers: 8,
        }
    }
}

/// Output file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

fn default_password_env() -> String {
    "LEAFMAP_PASSWORD".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Minimal configuration for running without a config file.
    pub fn for_switch(hostname: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            switch: SwitchConfig {
                hostname: hostname.into(),
                username: username.into(),
                password_env: default_password_env(),
                transport: Transport::default(),
                port: None,
                timeout_secs: default_request_timeout(),
                verify_tls: true,
            },
            filter: FilterConfig::default(),
            resolver: ResolverConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Apply environment variable overrides
    /// Environment variables in format: LEAFMAP_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("LEAFMAP_")
                && config_key.contains("__")
                && let Err(e) = self.set_value_from_env(config_key, &value)
            {
                tracing::warn!("Failed to apply env override {}: {}", key, e);
            }
        }
    }

    /// Apply one override, `path` in `SECTION__KEY` form (the env variable
    /// name with the `LEAFMAP_` prefix stripped). Every key in the config
    /// file has an arm here; an unknown key is an error so a typo in a
    /// variable name does not vanish silently.
    pub fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "SWITCH__HOSTNAME" => {
                self.switch.hostname = value.to_string();
            }
            "SWITCH__USERNAME" => {
                self.switch.username = value.to_string();
            }
            "SWITCH__PASSWORD_ENV" => {
                self.switch.password_env = value.to_string();
            }
            "SWITCH__TRANSPORT" => {
                self.switch.transport = parse_transport(value)?;
            }
            "SWITCH__PORT" => {
                self.switch.port = Some(parse_config_value(path, value)?);
            }
            "SWITCH__TIMEOUT_SECS" => {
                self.switch.timeout_secs = parse_config_value(path, value)?;
            }
            "SWITCH__VERIFY_TLS" => {
                self.switch.verify_tls = parse_config_value(path, value)?;
            }
            "FILTER__EXCLUDED_INTERFACE_PREFIXES" => {
                // Comma-separated list, e.g. "Vxlan,Router,Peer".
                self.filter.excluded_interface_prefixes = value
                    .split(',')
                    .map(str::trim)
                    .filter(|prefix| !prefix.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "FILTER__INCLUDE_STATIC" => {
                self.filter.include_static = parse_config_value(path, value)?;
            }
            "RESOLVER__ENABLED" => {
                self.resolver.enabled = parse_config_value(path, value)?;
            }
            "RESOLVER__TIMEOUT_SECS" => {
                self.resolver.timeout_secs = parse_config_value(path, value)?;
            }
            "RESOLVER__WORKERS" => {
                self.resolver.workers = parse_config_value(path, value)?;
            }
            "OUTPUT__DIRECTORY" => {
                self.output.directory = PathBuf::from(value);
            }
            _ => {
                return Err(CoreError::InvalidConfigValue {
                    path: path.to_string(),
                    message: "unknown configuration key".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.switch.hostname.trim().is_empty() {
            return Err(CoreError::InvalidConfigValue {
                path: "switch.hostname".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.switch.username.trim().is_empty() {
            return Err(CoreError::InvalidConfigValue {
                path: "switch.username".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.switch.timeout_secs == 0 {
            return Err(CoreError::InvalidConfigValue {
                path: "switch.timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.resolver.enabled && self.resolver.timeout_secs == 0 {
            return Err(CoreError::InvalidConfigValue {
                path: "resolver.timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.resolver.workers == 0 {
            return Err(CoreError::InvalidConfigValue {
                path: "resolver.workers".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Read the eAPI password from the configured environment variable.
    pub fn password(&self) -> Result<String> {
        match std::env::var(&self.switch.password_env) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ => Err(CoreError::MissingCredential {
                env: self.switch.password_env.clone(),
            }),
        }
    }

    /// Assemble eAPI connection settings from this config.
    pub fn eapi_options(&self) -> Result<EapiOptions> {
        let mut options = EapiOptions::new(
            self.switch.hostname.clone(),
            self.switch.username.clone(),
            self.password()?,
        )
        .with_transport(self.switch.transport)
        .with_timeout(self.switch.timeout_secs)
        .with_tls_verification(self.switch.verify_tls);

        if let Some(port) = self.switch.port {
            options = options.with_port(port);
        }
        Ok(options)
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CoreError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("leafmap").join("config.toml"))
    }
}

pub fn parse_transport(value: &str) -> Result<Transport> {
    match value.to_lowercase().as_str() {
        "http" => Ok(Transport::Http),
        "https" => Ok(Transport::Https),
        other => Err(CoreError::InvalidConfigValue {
            path: "switch.transport".to_string(),
            message: format!("unknown transport '{}', expected http or https", other),
        }),
    }
}

fn parse_config_value<T: std::str::FromStr>(path: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| CoreError::InvalidConfigValue {
        path: path.to_string(),
        message: format!(
            "Cannot parse '{}' as {}",
            value,
            std::any::type_name::<T>()
        ),
    })
}

impl From<&FilterConfig> for crate::correlate::InterfaceFilter {
    fn from(config: &FilterConfig) -> Self {
        Self::new(
            config.excluded_interface_prefixes.clone(),
            config.include_static,
        )
    }
}
