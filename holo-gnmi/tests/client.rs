//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::path::PathBuf;
use std::time::Duration;

use holo_gnmi::{ClientConfig, Error, GnmiClient};

//
// Helper functions.
//

fn config(address: &str, username: &str, password: &str) -> ClientConfig {
    let mut config = ClientConfig::new(address, username, password);
    config.connect_timeout = Duration::from_secs(2);
    config
}

//
// Tests.
//

#[test]
fn test_connect_refused() {
    // Nothing listens on the TCP port 1 of the loopback address.
    let config = config("127.0.0.1:1", "admin", "admin");
    let error = GnmiClient::connect(&config).unwrap_err();
    assert!(matches!(error, Error::Connect(..)));
    assert_eq!(error.to_string(), "failed to connect to gNMI target");
}

#[test]
fn test_connect_invalid_address() {
    let config = config("not a uri", "admin", "admin");
    let error = GnmiClient::connect(&config).unwrap_err();
    match error {
        Error::InvalidAddress(address, _) => assert_eq!(address, "not a uri"),
        error => panic!("unexpected error: {}", error),
    }
}

#[test]
fn test_connect_invalid_username() {
    // Credentials are checked before the address is even parsed.
    let config = config("not a uri", "adm\nin", "admin");
    let error = GnmiClient::connect(&config).unwrap_err();
    assert!(matches!(error, Error::InvalidCredentials));
}

#[test]
fn test_connect_invalid_password() {
    let config = config("127.0.0.1:1", "admin", "pass\nword");
    let error = GnmiClient::connect(&config).unwrap_err();
    assert!(matches!(error, Error::InvalidCredentials));
}

#[test]
fn test_connect_missing_ca_certificate() {
    let ca_certificate = PathBuf::from("/nonexistent/holo-gnmi/ca.pem");
    let mut config = config("127.0.0.1:1", "admin", "admin");
    config.tls.enabled = true;
    config.tls.ca_certificate = Some(ca_certificate.clone());
    let error = GnmiClient::connect(&config).unwrap_err();
    match error {
        Error::TlsCertificate(path, _) => assert_eq!(path, ca_certificate),
        error => panic!("unexpected error: {}", error),
    }
}
