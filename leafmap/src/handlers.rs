use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use leafmap_core::config::{Config, parse_transport};
use leafmap_core::correlate::{Correlation, InterfaceFilter, correlate};
use leafmap_core::report::{WriteSummary, write_inventory};
use leafmap_core::resolve::HostnameResolver;
use leafmap_eapi::EapiClient;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Command-line overrides, extracted from clap matches so the pipeline
/// functions stay testable without an argument parser.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub config: Option<String>,
    pub switch: Option<String>,
    pub username: Option<String>,
    pub transport: Option<String>,
    pub port: Option<u16>,
    pub output_dir: Option<String>,
    pub workers: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub no_resolve: bool,
    pub quiet: bool,
}

impl CliOverrides {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config: matches.get_one::<String>("config").cloned(),
            switch: matches.get_one::<String>("switch").cloned(),
            username: matches.get_one::<String>("username").cloned(),
            transport: matches.get_one::<String>("transport").cloned(),
            port: matches.get_one::<u16>("port").copied(),
            output_dir: matches.get_one::<String>("output-dir").cloned(),
            workers: matches.get_one::<usize>("workers").copied(),
            timeout_secs: matches.get_one::<u64>("timeout").copied(),
            no_resolve: matches.get_flag("no-resolve"),
            quiet: matches.get_flag("quiet"),
        }
    }
}

/// Expand `~` in a user-supplied path
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Assemble the run configuration from config file plus CLI overrides.
///
/// An explicit `--config` path must exist. Without one, the default config
/// file is used if present; otherwise `--switch` and `--username` are enough
/// to run with built-in defaults.
pub fn load_run_config(overrides: &CliOverrides) -> Result<Config> {
    let mut config = if let Some(raw) = &overrides.config {
        let path = expand_path(raw);
        Config::load(&path).with_context(|| format!("cannot load config {}", path.display()))?
    } else {
        let default = Config::default_path()?;
        if default.exists() {
            Config::load(&default)
                .with_context(|| format!("cannot load config {}", default.display()))?
        } else if let (Some(switch), Some(username)) = (&overrides.switch, &overrides.username) {
            Config::for_switch(switch, username)
        } else {
            bail!(
                "no config file at {} - either create one or pass --switch and --username",
                default.display()
            );
        }
    };

    apply_overrides(&mut config, overrides)?;
    config.validate()?;
    Ok(config)
}

/// Fold CLI flags into the loaded configuration.
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(switch) = &overrides.switch {
        config.switch.hostname = switch.clone();
    }
    if let Some(username) = &overrides.username {
        config.switch.username = username.clone();
    }
    if let Some(transport) = &overrides.transport {
        config.switch.transport = parse_transport(transport)?;
    }
    if let Some(port) = overrides.port {
        config.switch.port = Some(port);
    }
    if let Some(dir) = &overrides.output_dir {
        config.output.directory = expand_path(dir);
    }
    if let Some(workers) = overrides.workers {
        config.resolver.workers = workers;
    }
    if let Some(timeout) = overrides.timeout_secs {
        config.resolver.timeout_secs = timeout;
    }
    if overrides.no_resolve {
        config.resolver.enabled = false;
    }
    Ok(())
}

/// Result of one inventory run.
#[derive(Debug)]
pub struct RunOutcome {
    pub switch_hostname: String,
    pub correlation: Correlation,
    pub summary: WriteSummary,
}

/// The whole pipeline: collect, correlate, resolve, write.
pub async fn run_inventory(config: &Config, quiet: bool) -> Result<RunOutcome> {
    let options = config.eapi_options()?;
    let client = EapiClient::new(&options)
        .with_context(|| format!("cannot reach eAPI on {}", config.switch.hostname))?;

    let spinner = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Querying {}...", config.switch.hostname));
        Some(pb)
    };

    let switch_hostname = client
        .show_hostname()
        .await
        .with_context(|| format!("querying {}", config.switch.hostname))?;
    let mac_table = client
        .show_mac_address_table()
        .await
        .with_context(|| format!("querying {}", switch_hostname))?;
    let arp_table = client
        .show_ip_arp()
        .await
        .with_context(|| format!("querying {}", switch_hostname))?;

    if let Some(pb) = spinner {
        pb.finish_with_message(format!(
            "Collected {} MAC table and {} ARP entries from {}",
            mac_table.len(),
            arp_table.len(),
            switch_hostname
        ));
    }

    let filter = InterfaceFilter::from(&config.filter);
    let mut correlation = correlate(&mac_table, &arp_table, &filter)?;
    info!(
        "{}: {} resolved, {} unresolved",
        switch_hostname,
        correlation.resolved.len(),
        correlation.unresolved.len()
    );

    if config.resolver.enabled && !correlation.resolved.is_empty() {
        let resolver =
            HostnameResolver::from_system_conf(Duration::from_secs(config.resolver.timeout_secs))?;
        correlation.resolved = resolver
            .resolve_all(correlation.resolved, config.resolver.workers, !quiet)
            .await;
    }

    let summary = write_inventory(&config.output.directory, &switch_hostname, &correlation)?;

    Ok(RunOutcome {
        switch_hostname,
        correlation,
        summary,
    })
}
