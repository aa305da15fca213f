//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use holo_gnmi::error::with_source;
use tracing::{error, error_span};

// Errors that abort a run.
#[derive(Debug)]
pub enum Error {
    // Configuration
    ConfigRead(String, std::io::Error),
    ConfigParse(String, toml::de::Error),
    // gNMI session
    Connect(holo_gnmi::Error),
    // Neighbor fetch
    Read(holo_gnmi::Error),
    LocalInterfaceNotFound(String),
    Decode(String, serde_json::Error),
    // Description writes
    Write(String, holo_gnmi::Error),
    BatchWrite(holo_gnmi::Error),
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::ConfigRead(path, error) => {
                error!(%path, error = %with_source(error), "{}", self);
            }
            Error::ConfigParse(path, error) => {
                error!(%path, error = %error, "{}", self);
            }
            Error::Connect(error) | Error::Read(error) => {
                error.log();
                error!("{}", self);
            }
            Error::LocalInterfaceNotFound(path) => {
                error!(%path, "{}", self);
            }
            Error::Decode(payload, error) => {
                error!(%payload, %error, "{}", self);
            }
            Error::Write(interface, error) => {
                error_span!("interface", name = %interface).in_scope(|| {
                    error.log();
                    error!("{}", self);
                });
            }
            Error::BatchWrite(error) => {
                error.log();
                error!("{}", self);
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ConfigRead(path, ..) => {
                write!(f, "failed to read configuration file {}", path)
            }
            Error::ConfigParse(path, ..) => {
                write!(f, "failed to parse configuration file {}", path)
            }
            Error::Connect(..) => {
                write!(f, "failed to create gNMI session")
            }
            Error::Read(..) => {
                write!(f, "failed to get LLDP neighbors from target")
            }
            Error::LocalInterfaceNotFound(path) => {
                write!(f, "local interface name not found in path {}", path)
            }
            Error::Decode(payload, ..) => {
                write!(f, "failed to unmarshal LLDP neighbor: {}", payload)
            }
            Error::Write(interface, ..) => {
                write!(
                    f,
                    "failed to set description of interface {}",
                    interface
                )
            }
            Error::BatchWrite(..) => {
                write!(f, "failed to set interface descriptions")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConfigRead(_, error) => Some(error),
            Error::ConfigParse(_, error) => Some(error),
            Error::Connect(error) | Error::Read(error) => Some(error),
            Error::Decode(_, error) => Some(error),
            Error::Write(_, error) => Some(error),
            Error::BatchWrite(error) => Some(error),
            Error::LocalInterfaceNotFound(..) => None,
        }
    }
}
