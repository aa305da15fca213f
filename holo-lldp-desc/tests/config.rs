//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::path::PathBuf;
use std::time::Duration;

use holo_lldp_desc::Error;
use holo_lldp_desc::apply::WriteMode;
use holo_lldp_desc::config::{
    Config, Logging, LoggingFileRotation, LoggingFmtStyle,
};
use holo_lldp_desc::reconcile::DescriptionFormat;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[test]
fn test_defaults() {
    let config = Config::parse("test.toml", "").unwrap();
    assert_eq!(config.reconcile.format, DescriptionFormat::PortId);
    assert_eq!(config.apply.write_mode, WriteMode::Sequential);
    assert!(!config.client.tls.enabled);
    assert!(config.logging.stderr.enabled);
    assert!(!config.logging.file.enabled);

    let client_config =
        config.client.client_config("10.0.0.1:6030", "admin", "admin");
    assert_eq!(client_config.uri(), "http://10.0.0.1:6030");
    assert_eq!(client_config.connect_timeout, Duration::from_secs(10));
    assert_eq!(client_config.timeout, None);
}

#[test]
fn test_full() {
    let config_str = r#"
        [client]
        connect_timeout = 3
        timeout = 30

        [client.tls]
        enabled = true
        ca_certificate = "/etc/ssl/certs/lab-ca.pem"
        domain_name = "leaf1.lab"

        [reconcile]
        format = "local-interface"

        [apply]
        write_mode = "batched"

        [logging.stderr]
        enabled = false

        [logging.file]
        enabled = true
        dir = "/tmp"
        name = "lldp-desc.log"
        rotation = "daily"
        style = "json"
    "#;
    let config = Config::parse("test.toml", config_str).unwrap();
    assert_eq!(config.reconcile.format, DescriptionFormat::LocalInterface);
    assert_eq!(config.apply.write_mode, WriteMode::Batched);
    assert!(!config.logging.stderr.enabled);
    assert!(config.logging.file.enabled);
    assert_eq!(config.logging.file.rotation, LoggingFileRotation::Daily);
    assert_eq!(config.logging.file.fmt.style, LoggingFmtStyle::Json);

    let client_config =
        config.client.client_config("leaf1:6030", "admin", "pw");
    assert_eq!(client_config.uri(), "https://leaf1:6030");
    assert_eq!(client_config.connect_timeout, Duration::from_secs(3));
    assert_eq!(client_config.timeout, Some(Duration::from_secs(30)));
    assert_eq!(
        client_config.tls.ca_certificate,
        Some(PathBuf::from("/etc/ssl/certs/lab-ca.pem"))
    );
    assert_eq!(client_config.tls.domain_name.as_deref(), Some("leaf1.lab"));
}

#[test]
fn test_explicit_scheme_kept() {
    let config = Config::default();
    let client_config =
        config.client.client_config("https://leaf1:6030", "admin", "pw");
    assert_eq!(client_config.uri(), "https://leaf1:6030");
}

#[test]
fn test_unknown_field() {
    let result = Config::parse("test.toml", "[apply]\nretries = 3\n");
    match result {
        Err(Error::ConfigParse(path, _)) => assert_eq!(path, "test.toml"),
        result => panic!("unexpected result: {:?}", result),
    }
}

#[test]
fn test_invalid_format() {
    let result =
        Config::parse("test.toml", "[reconcile]\nformat = \"fancy\"\n");
    assert!(matches!(result, Err(Error::ConfigParse(..))));
}

#[test]
fn test_missing_explicit_file() {
    let result = Config::load(Some("/nonexistent/holo-lldp-desc.toml"));
    assert!(matches!(result, Err(Error::ConfigRead(..))));
}

#[test]
fn test_default_log_filter() {
    // Only this tool's crates are enabled, never a global level.
    assert!(
        Logging::DFLT_FILTER
            .split(',')
            .all(|directive| directive.contains('='))
    );

    let filter = EnvFilter::try_new(Logging::DFLT_FILTER).unwrap();
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    let filter = filter.to_string();
    assert!(filter.contains("holo_lldp_desc=info"));
    assert!(filter.contains("holo_gnmi=info"));
}
