use leafmap_core::config::Config;
use leafmap_core::error::CoreError;
use leafmap_eapi::Transport;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_minimal_config_with_defaults() {
    let file = write_config(
        r#"
[switch]
hostname = "leaf1.example.net"
username = "netops"
"#,
    );

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.switch.hostname, "leaf1.example.net");
    assert_eq!(config.switch.password_env, "LEAFMAP_PASSWORD");
    assert_eq!(config.switch.transport, Transport::Https);
    assert!(config.switch.verify_tls);
    assert!(config.resolver.enabled);
    assert_eq!(config.resolver.workers, 8);
    assert_eq!(
        config.filter.excluded_interface_prefixes,
        vec!["Vxlan".to_string(), "Router".to_string()]
    );
    assert!(!config.filter.include_static);
}

#[test]
fn loads_full_config() {
    let file = write_config(
        r#"
[switch]
hostname = "leaf9"
username = "ops"
password_env = "SWITCH_PW"
transport = "http"
port = 8080
verify_tls = false

[filter]
excluded_interface_prefixes = ["Vxlan", "Router", "Port-Channel2000"]
include_static = true

[resolver]
enabled = false
timeout_secs = 5
workers = 2

[output]
directory = "/var/lib/leafmap"
"#,
    );

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.switch.transport, Transport::Http);
    assert_eq!(config.switch.port, Some(8080));
    assert!(!config.switch.verify_tls);
    assert!(config.filter.include_static);
    assert!(!config.resolver.enabled);
    assert_eq!(config.output.directory.to_str(), Some("/var/lib/leafmap"));
}

#[test]
fn missing_file_is_a_distinct_error() {
    let err = Config::load(std::path::Path::new("/nonexistent/leafmap.toml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn rejects_empty_hostname() {
    let file = write_config(
        r#"
[switch]
hostname = ""
username = "ops"
"#,
    );

    let err = Config::load(file.path()).unwrap_err();
    match err {
        CoreError::InvalidConfigValue { path, .. } => assert_eq!(path, "switch.hostname"),
        other => panic!("expected InvalidConfigValue, got {other:?}"),
    }
}

#[test]
fn rejects_zero_resolver_workers() {
    let file = write_config(
        r#"
[switch]
hostname = "leaf1"
username = "ops"

[resolver]
enabled = true
timeout_secs = 2
workers = 0
"#,
    );

    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfigValue { .. }));
}

#[test]
fn rejects_unknown_transport() {
    let file = write_config(
        r#"
[switch]
hostname = "leaf1"
username = "ops"
transport = "telnet"
"#,
    );

    assert!(matches!(
        Config::load(file.path()).unwrap_err(),
        CoreError::Toml(_)
    ));
}

#[test]
fn env_overrides_apply_on_load() {
    let file = write_config(
        r#"
[switch]
hostname = "leaf1"
username = "ops"
"#,
    );

    // set_var is unsafe in edition 2024. Other tests in this binary run in
    // parallel, so only touch a key none of them assert on.
    unsafe {
        std::env::set_var("LEAFMAP_RESOLVER__TIMEOUT_SECS", "7");
    }
    let config = Config::load(file.path());
    unsafe {
        std::env::remove_var("LEAFMAP_RESOLVER__TIMEOUT_SECS");
    }

    assert_eq!(config.unwrap().resolver.timeout_secs, 7);
}

// Driven through the single-key setter rather than real env variables:
// tests in this binary run in parallel, and several of them assert on
// port and the filter section.
#[test]
fn every_config_key_has_an_env_override_arm() {
    let mut config = Config::for_switch("leaf1", "ops");

    config.set_value_from_env("SWITCH__PORT", "8443").unwrap();
    config.set_value_from_env("SWITCH__TIMEOUT_SECS", "30").unwrap();
    config
        .set_value_from_env("FILTER__INCLUDE_STATIC", "true")
        .unwrap();
    config
        .set_value_from_env("FILTER__EXCLUDED_INTERFACE_PREFIXES", "Vxlan, Peer")
        .unwrap();

    assert_eq!(config.switch.port, Some(8443));
    assert_eq!(config.switch.timeout_secs, 30);
    assert!(config.filter.include_static);
    assert_eq!(
        config.filter.excluded_interface_prefixes,
        vec!["Vxlan".to_string(), "Peer".to_string()]
    );
}

#[test]
fn unknown_env_override_key_is_an_error() {
    let mut config = Config::for_switch("leaf1", "ops");

    let err = config.set_value_from_env("SWITCH__BOGUS", "1").unwrap_err();
    match err {
        CoreError::InvalidConfigValue { path, .. } => assert_eq!(path, "SWITCH__BOGUS"),
        other => panic!("expected InvalidConfigValue, got {other:?}"),
    }
}

#[test]
fn unparseable_env_override_value_is_an_error() {
    let mut config = Config::for_switch("leaf1", "ops");

    assert!(matches!(
        config.set_value_from_env("SWITCH__PORT", "not-a-port").unwrap_err(),
        CoreError::InvalidConfigValue { .. }
    ));
}

#[test]
fn password_comes_from_named_env_var() {
    let mut config = Config::for_switch("leaf1", "ops");
    config.switch.password_env = "LEAFMAP_TEST_PW_93A1".to_string();

    assert!(matches!(
        config.password().unwrap_err(),
        CoreError::MissingCredential { .. }
    ));

    unsafe {
        std::env::set_var("LEAFMAP_TEST_PW_93A1", "hunter2");
    }
    let password = config.password();
    unsafe {
        std::env::remove_var("LEAFMAP_TEST_PW_93A1");
    }
    assert_eq!(password.unwrap(), "hunter2");
}

#[test]
fn eapi_options_reflect_switch_section() {
    let mut config = Config::for_switch("leaf1", "ops");
    config.switch.password_env = "LEAFMAP_TEST_PW_93A2".to_string();
    config.switch.port = Some(8443);
    config.switch.verify_tls = false;

    unsafe {
        std::env::set_var("LEAFMAP_TEST_PW_93A2", "secret");
    }
    let options = config.eapi_options();
    unsafe {
        std::env::remove_var("LEAFMAP_TEST_PW_93A2");
    }

    let options = options.unwrap();
    assert_eq!(options.host, "leaf1");
    assert_eq!(options.username, "ops");
    assert_eq!(options.password, "secret");
    assert_eq!(options.port, Some(8443));
    assert!(!options.verify_tls);
}
