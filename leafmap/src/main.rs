use clap;
use colored::Colorize;
use commands::command_argument_builder;
use leafmap::handlers::{CliOverrides, load_run_config, run_inventory};
use leafmap_core::report::render_summary;
use tracing_subscriber;

mod commands;

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();
    let overrides = CliOverrides::from_matches(&matches);
    let quiet = overrides.quiet;

    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let config = match load_run_config(&overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    match run_inventory(&config, quiet).await {
        Ok(outcome) => {
            if !quiet {
                println!();
                print!(
                    "{}",
                    render_summary(
                        &outcome.switch_hostname,
                        &outcome.correlation,
                        &outcome.summary
                    )
                );
                println!(
                    "{} Inventory complete ({})",
                    "✓".green().bold(),
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
