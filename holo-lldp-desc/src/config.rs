//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![allow(clippy::derivable_impls)]

use std::time::Duration;

use holo_gnmi::ClientConfig;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::apply::WriteMode;
use crate::error::Error;
use crate::reconcile::DescriptionFormat;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub client: Client,
    pub reconcile: Reconcile,
    pub apply: Apply,
    pub logging: Logging,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Client {
    pub connect_timeout: u64,
    pub timeout: Option<u64>,
    pub tls: Tls,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tls {
    pub enabled: bool,
    pub ca_certificate: Option<String>,
    pub domain_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Reconcile {
    pub format: DescriptionFormat,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Apply {
    pub write_mode: WriteMode,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Logging {
    pub stderr: LoggingStderr,
    pub file: LoggingFile,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingStderr {
    pub enabled: bool,
    #[serde(flatten)]
    pub fmt: LoggingFmt,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingFile {
    pub enabled: bool,
    pub dir: String,
    pub name: String,
    pub rotation: LoggingFileRotation,
    #[serde(flatten)]
    pub fmt: LoggingFmt,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingFmt {
    pub style: LoggingFmtStyle,
    pub colors: bool,
    pub show_thread_id: bool,
    pub show_source: bool,
}

#[derive(Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LoggingFileRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

#[derive(Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LoggingFmtStyle {
    Compact,
    Full,
    Json,
    Pretty,
}

// ===== impl Config =====

impl Config {
    pub const DFLT_FILEPATH: &'static str = "/etc/holo-lldp-desc.toml";

    // Loads the configuration file.
    //
    // A missing default file is not an error; an explicitly given one is.
    pub fn load(config_file: Option<&str>) -> Result<Config, Error> {
        let path = config_file.unwrap_or(Config::DFLT_FILEPATH);
        match std::fs::read_to_string(path) {
            Ok(config_str) => Config::parse(path, &config_str),
            Err(error) if config_file.is_some() => {
                Err(Error::ConfigRead(path.to_owned(), error))
            }
            Err(_) => Ok(Config::default()),
        }
    }

    pub fn parse(path: &str, config_str: &str) -> Result<Config, Error> {
        toml::from_str(config_str)
            .map_err(|error| Error::ConfigParse(path.to_owned(), error))
    }
}

// ===== impl Logging =====

impl Logging {
    pub const DFLT_FILTER: &'static str = "holo_lldp_desc=info,holo_gnmi=info";

    // Builds the event filter from RUST_LOG, falling back to the default
    // directives when it's unset or invalid.
    pub fn env_filter() -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Logging::DFLT_FILTER))
    }
}

// ===== impl Client =====

impl Client {
    pub fn client_config(
        &self,
        address: &str,
        username: &str,
        password: &str,
    ) -> ClientConfig {
        let mut config = ClientConfig::new(address, username, password);
        config.connect_timeout = Duration::from_secs(self.connect_timeout);
        config.timeout = self.timeout.map(Duration::from_secs);
        config.tls = holo_gnmi::Tls {
            enabled: self.tls.enabled,
            ca_certificate: self.tls.ca_certificate.as_ref().map(Into::into),
            domain_name: self.tls.domain_name.clone(),
        };
        config
    }
}

impl Default for Client {
    fn default() -> Client {
        Client {
            connect_timeout: ClientConfig::DFLT_CONNECT_TIMEOUT.as_secs(),
            timeout: None,
            tls: Default::default(),
        }
    }
}

// ===== impl LoggingStderr =====

impl Default for LoggingStderr {
    fn default() -> LoggingStderr {
        LoggingStderr {
            enabled: true,
            fmt: LoggingFmt {
                style: LoggingFmtStyle::Compact,
                ..Default::default()
            },
        }
    }
}

// ===== impl LoggingFile =====

impl Default for LoggingFile {
    fn default() -> LoggingFile {
        LoggingFile {
            enabled: false,
            dir: "/var/log".to_owned(),
            name: "holo-lldp-desc.log".to_owned(),
            rotation: Default::default(),
            fmt: Default::default(),
        }
    }
}

// ===== impl LoggingFmt =====

impl Default for LoggingFmt {
    fn default() -> LoggingFmt {
        LoggingFmt {
            style: LoggingFmtStyle::Full,
            colors: false,
            show_thread_id: false,
            show_source: false,
        }
    }
}
