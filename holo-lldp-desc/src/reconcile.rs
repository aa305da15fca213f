//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::str::FromStr;

use derive_new::new;
use holo_gnmi::{Encoding, SetUpdate};
use itertools::Itertools;
use serde::Deserialize;

use crate::neighbor::ObservedNeighbor;

// Description of an interface with more than one LLDP neighbor.
pub const MULTIPLE_CONNECTIONS: &str = "to:multiple connections";

// What follows the neighbor's system name in single-neighbor descriptions.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptionFormat {
    // "to:<system-name> <neighbor port-id>"
    #[default]
    PortId,
    // "to:<system-name> <local interface>"
    LocalInterface,
}

// Pending write of an interface description leaf.
#[derive(Clone, Debug, Eq, PartialEq, new)]
pub struct DescriptionUpdate {
    pub interface: String,
    pub path: String,
    pub description: String,
}

// ===== impl DescriptionFormat =====

impl DescriptionFormat {
    fn describe(&self, obs: &ObservedNeighbor) -> String {
        let discriminator = match self {
            DescriptionFormat::PortId => &obs.neighbor.port_id,
            DescriptionFormat::LocalInterface => &obs.local_interface,
        };
        format!("to:{} {}", obs.neighbor.system_name, discriminator)
    }
}

impl FromStr for DescriptionFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "port-id" => Ok(DescriptionFormat::PortId),
            "local-interface" => Ok(DescriptionFormat::LocalInterface),
            _ => Err(format!("unknown description format '{}'", s)),
        }
    }
}

// ===== impl DescriptionUpdate =====

impl DescriptionUpdate {
    // Configuration leaf holding the description of the given interface. The
    // interface name is used verbatim.
    pub fn target_path(interface: &str) -> String {
        format!("/interfaces/interface[name={}]/config/description", interface)
    }

    pub fn to_set_update(&self) -> SetUpdate {
        SetUpdate::new(
            self.path.clone(),
            self.description.clone(),
            Encoding::JsonIetf,
        )
    }
}

// ===== global functions =====

// Computes one description update per local interface, in the order the
// interfaces first appear in the input.
pub fn reconcile(
    observations: &[ObservedNeighbor],
    format: DescriptionFormat,
) -> Vec<DescriptionUpdate> {
    let groups = observations
        .iter()
        .into_group_map_by(|obs| obs.local_interface.as_str());

    observations
        .iter()
        .map(|obs| obs.local_interface.as_str())
        .unique()
        .map(|interface| {
            let description = match groups[&interface].as_slice() {
                [obs] => format.describe(obs),
                _ => MULTIPLE_CONNECTIONS.to_owned(),
            };
            DescriptionUpdate::new(
                interface.to_owned(),
                DescriptionUpdate::target_path(interface),
                description,
            )
        })
        .collect()
}
