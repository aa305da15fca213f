//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Minimal blocking gNMI client.
//!
//! Only the Get and Set RPCs are exposed, which is all that is needed to
//! read operational state from a device and push configuration changes back.

#![warn(rust_2018_idioms)]

pub mod client;
pub mod error;
pub mod path;
pub mod value;

pub mod proto {
    #![allow(clippy::all)]
    tonic::include_proto!("gnmi");
}

pub use client::{Client, ClientConfig, GetEntry, GnmiClient, SetUpdate, Tls};
pub use error::Error;
pub use path::PathError;
pub use proto::Encoding;
