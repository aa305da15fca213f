//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Derives interface descriptions from LLDP neighbor state.
//!
//! The neighbor table is read from a device over gNMI, grouped by local
//! interface, and every interface gets a description naming the device
//! connected to it.

#![warn(rust_2018_idioms)]

pub mod apply;
pub mod config;
pub mod error;
pub mod neighbor;
pub mod reconcile;

pub use error::Error;
