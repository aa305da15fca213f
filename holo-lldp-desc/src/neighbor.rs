//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use derive_new::new;
use holo_gnmi::{Client, Encoding, GetEntry};
use serde::Deserialize;
use tracing::{debug, debug_span, info};

use crate::error::Error;

// LLDP neighbor state subtree.
pub const NEIGHBOR_STATE_PATH: &str =
    "/lldp/interfaces/interface/neighbors/neighbor/state";

// Path element and key identifying the local interface of a neighbor entry.
const LOCAL_IF_ELEM: &str = "interface";
const LOCAL_IF_KEY: &str = "name";

// LLDP neighbor state, as advertised by the remote system.
//
// All values are kept as received.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct NeighborRecord {
    #[serde(rename = "openconfig-lldp:chassis-id")]
    pub chassis_id: String,
    #[serde(rename = "openconfig-lldp:chassis-id-type")]
    pub chassis_id_type: String,
    #[serde(rename = "openconfig-lldp:id")]
    pub id: String,
    #[serde(rename = "arista-lldp-augments:last-update-time")]
    pub last_update_time: String,
    #[serde(rename = "openconfig-lldp:management-address")]
    pub management_address: String,
    #[serde(rename = "openconfig-lldp:management-address-type")]
    pub management_address_type: String,
    #[serde(rename = "openconfig-lldp:port-description")]
    pub port_description: Option<String>,
    #[serde(rename = "openconfig-lldp:port-id")]
    pub port_id: String,
    #[serde(rename = "openconfig-lldp:port-id-type")]
    pub port_id_type: String,
    #[serde(rename = "arista-lldp-augments:registration-time")]
    pub registration_time: String,
    #[serde(rename = "openconfig-lldp:system-description")]
    pub system_description: String,
    #[serde(rename = "openconfig-lldp:system-name")]
    pub system_name: String,
}

// LLDP neighbor paired with the local interface it was seen on.
#[derive(Clone, Debug, Eq, PartialEq, new)]
pub struct ObservedNeighbor {
    pub local_interface: String,
    pub neighbor: NeighborRecord,
}

// ===== impl ObservedNeighbor =====

impl ObservedNeighbor {
    pub fn decode(entry: &GetEntry) -> Result<ObservedNeighbor, Error> {
        let local_interface = entry
            .path
            .key(LOCAL_IF_ELEM, LOCAL_IF_KEY)
            .ok_or_else(|| {
                Error::LocalInterfaceNotFound(entry.path.to_string())
            })?
            .to_owned();

        let neighbor = serde_json::from_slice::<NeighborRecord>(&entry.payload)
            .map_err(|error| {
                let payload = String::from_utf8_lossy(&entry.payload);
                Error::Decode(payload.into_owned(), error)
            })?;

        Ok(ObservedNeighbor::new(local_interface, neighbor))
    }
}

// ===== global functions =====

// Reads the LLDP neighbor table.
//
// A single undecodable entry fails the whole fetch.
pub fn fetch(client: &mut dyn Client) -> Result<Vec<ObservedNeighbor>, Error> {
    let entries = client
        .get(NEIGHBOR_STATE_PATH, Encoding::JsonIetf)
        .map_err(Error::Read)?;

    let observations = entries
        .iter()
        .map(ObservedNeighbor::decode)
        .collect::<Result<Vec<_>, _>>()?;

    debug_span!("fetch").in_scope(|| {
        for obs in &observations {
            debug!(
                interface = %obs.local_interface,
                system_name = %obs.neighbor.system_name,
                port_id = %obs.neighbor.port_id,
                "LLDP neighbor"
            );
        }
    });
    info!(count = observations.len(), "fetched LLDP neighbors");

    Ok(observations)
}
