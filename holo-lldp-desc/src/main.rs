//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use clap::{App, Arg, value_t};
use holo_gnmi::error::with_source;
use holo_gnmi::{Client, GnmiClient};
use holo_lldp_desc::apply::{self, WriteMode};
use holo_lldp_desc::config::{
    self, Config, LoggingFileRotation, LoggingFmtStyle,
};
use holo_lldp_desc::reconcile::{self, DescriptionFormat};
use holo_lldp_desc::{Error, neighbor};
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

fn init_tracing(config: &config::Logging) {
    // Enable logging to a file.
    let file = config.file.enabled.then(|| {
        let file_appender = match config.file.rotation {
            LoggingFileRotation::Never => {
                rolling::never(&config.file.dir, &config.file.name)
            }
            LoggingFileRotation::Hourly => {
                rolling::hourly(&config.file.dir, &config.file.name)
            }
            LoggingFileRotation::Daily => {
                rolling::daily(&config.file.dir, &config.file.name)
            }
        };

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(file_appender)
            .with_target(false)
            .with_thread_ids(config.file.fmt.show_thread_id)
            .with_file(config.file.fmt.show_source)
            .with_line_number(config.file.fmt.show_source)
            .with_ansi(config.file.fmt.colors);
        match config.file.fmt.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        }
    });

    // Enable logging to stderr. Stdout is reserved for results.
    let stderr = config.stderr.enabled.then(|| {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(config.stderr.fmt.show_thread_id)
            .with_file(config.stderr.fmt.show_source)
            .with_line_number(config.stderr.fmt.show_source)
            .with_ansi(config.stderr.fmt.colors);
        match config.stderr.fmt.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        }
    });

    let env_filter = config::Logging::env_filter();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file)
        .with(stderr)
        .init();
}

fn build_version() -> String {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    match rustc_tools_util::get_version_info!().commit_hash {
        Some(hash) => format!("{VERSION} ({hash})"),
        None => VERSION.to_owned(),
    }
}

fn run(
    config: &Config,
    address: &str,
    username: &str,
    password: &str,
) -> Result<(), Error> {
    let client_config =
        config.client.client_config(address, username, password);
    let mut client =
        GnmiClient::connect(&client_config).map_err(Error::Connect)?;
    info!(address = %client_config.uri(), "connected");

    let observations = neighbor::fetch(&mut client)?;
    let updates = reconcile::reconcile(&observations, config.reconcile.format);
    apply::apply_all(
        &mut client,
        &updates,
        config.apply.write_mode,
        |applied, confirmation| {
            for update in applied {
                println!("{}: {}", update.interface, update.description);
            }
            println!("{}", confirmation);
        },
    )?;

    client.close();
    Ok(())
}

// ===== main =====

fn main() {
    // Parse command-line parameters.
    let version = build_version();
    let matches = App::new("Holo LLDP interface descriptions")
        .version(version.as_str())
        .about("Sets interface descriptions from LLDP neighbors using gNMI")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("file")
                .help("Specify an alternative configuration file."),
        )
        .arg(
            Arg::with_name("format")
                .long("format")
                .value_name("format")
                .possible_values(&["port-id", "local-interface"])
                .help("What follows the neighbor's system name."),
        )
        .arg(
            Arg::with_name("write-mode")
                .long("write-mode")
                .value_name("mode")
                .possible_values(&["sequential", "batched"])
                .help("One Set per interface or a single batched Set."),
        )
        .arg(
            Arg::with_name("tls")
                .long("tls")
                .help("Use TLS to connect to the target."),
        )
        .arg(
            Arg::with_name("ca-cert")
                .long("ca-cert")
                .value_name("file")
                .requires("tls")
                .help("CA certificate used to verify the target."),
        )
        .arg(
            Arg::with_name("address")
                .required(true)
                .help("gNMI target address (host:port)"),
        )
        .arg(Arg::with_name("username").required(true).help("Username"))
        .arg(Arg::with_name("password").required(true).help("Password"))
        .get_matches();

    // Read configuration file.
    let mut config = match Config::load(matches.value_of("config")) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{}", with_source(&error));
            std::process::exit(1);
        }
    };

    // Command-line parameters take precedence over the configuration file.
    if matches.is_present("format") {
        config.reconcile.format =
            value_t!(matches, "format", DescriptionFormat)
                .unwrap_or_else(|error| error.exit());
    }
    if matches.is_present("write-mode") {
        config.apply.write_mode = value_t!(matches, "write-mode", WriteMode)
            .unwrap_or_else(|error| error.exit());
    }
    if matches.is_present("tls") {
        config.client.tls.enabled = true;
    }
    if let Some(path) = matches.value_of("ca-cert") {
        config.client.tls.ca_certificate = Some(path.to_owned());
    }

    // Initialize tracing.
    init_tracing(&config.logging);

    // Required arguments are enforced by clap.
    let address = matches.value_of("address").unwrap_or_default();
    let username = matches.value_of("username").unwrap_or_default();
    let password = matches.value_of("password").unwrap_or_default();

    if let Err(error) = run(&config, address, username, password) {
        error.log();
        eprintln!("{}", with_source(&error));
        std::process::exit(1);
    }
}
