use crate::CLAP_STYLING;
use clap::arg;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("leafmap")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("leafmap")
        .styles(CLAP_STYLING)
        .about(
            "Builds an end-host inventory (IP + hostname) from one Arista leaf \
            switch by correlating its MAC address table against its ARP table.",
        )
        .arg(
            arg!(-c --"config" <PATH>)
                .required(false)
                .help("Path to the config file (default: ~/.config/leafmap/config.toml)"),
        )
        .arg(
            arg!(-s --"switch" <HOST>)
                .required(false)
                .help("Switch to query, overriding the config file"),
        )
        .arg(
            arg!(-u --"username" <NAME>)
                .required(false)
                .help("eAPI username, overriding the config file"),
        )
        .arg(
            arg!(--"transport" <PROTO>)
                .required(false)
                .help("eAPI transport protocol")
                .value_parser(["http", "https"]),
        )
        .arg(
            arg!(--"port" <PORT>)
                .required(false)
                .help("eAPI port (default: the transport's standard port)")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            arg!(-o --"output-dir" <PATH>)
                .required(false)
                .help("Directory for the per-switch output files"),
        )
        .arg(
            arg!(-w --"workers" <NUM>)
                .required(false)
                .help("Concurrent reverse DNS lookups")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Per-lookup reverse DNS timeout in seconds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--"no-resolve")
                .required(false)
                .help("Skip reverse DNS lookups entirely")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(arg!(-q --"quiet" "Suppress progress output and the run summary").required(false))
}
