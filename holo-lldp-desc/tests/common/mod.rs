//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![allow(dead_code)]

use std::collections::VecDeque;

use holo_gnmi::proto::Path;
use holo_gnmi::{Client, Encoding, Error, GetEntry, SetUpdate};
use holo_lldp_desc::neighbor::{NeighborRecord, ObservedNeighbor};
use serde_json::json;

// In-memory gNMI target.
#[derive(Debug, Default)]
pub struct FakeClient {
    pub entries: Vec<GetEntry>,
    pub get_error: Option<tonic::Status>,
    // Outcome of each Set request, in order. Requests beyond the queued
    // outcomes succeed.
    pub set_errors: VecDeque<Option<tonic::Status>>,
    pub get_requests: Vec<(String, Encoding)>,
    pub set_requests: Vec<Vec<SetUpdate>>,
}

// ===== impl FakeClient =====

impl FakeClient {
    pub fn with_entries(entries: Vec<GetEntry>) -> FakeClient {
        FakeClient {
            entries,
            ..Default::default()
        }
    }
}

impl Client for FakeClient {
    fn get(
        &mut self,
        path: &str,
        encoding: Encoding,
    ) -> Result<Vec<GetEntry>, Error> {
        self.get_requests.push((path.to_owned(), encoding));
        if let Some(status) = self.get_error.take() {
            return Err(Error::Rpc(status));
        }
        Ok(self.entries.clone())
    }

    fn set(&mut self, updates: &[SetUpdate]) -> Result<String, Error> {
        self.set_requests.push(updates.to_vec());
        if let Some(Some(status)) = self.set_errors.pop_front() {
            return Err(Error::Rpc(status));
        }
        Ok(format!("set #{}", self.set_requests.len()))
    }
}

//
// Helper functions.
//

pub fn neighbor_json(system_name: &str, port_id: &str) -> serde_json::Value {
    json!({
        "openconfig-lldp:chassis-id": "00:1c:73:aa:bb:cc",
        "openconfig-lldp:chassis-id-type": "MAC_ADDRESS",
        "openconfig-lldp:id": "1",
        "arista-lldp-augments:last-update-time": "1700000100",
        "openconfig-lldp:management-address": "192.0.2.1",
        "openconfig-lldp:management-address-type": "ipV4",
        "openconfig-lldp:port-id": port_id,
        "openconfig-lldp:port-id-type": "INTERFACE_NAME",
        "arista-lldp-augments:registration-time": "1700000000",
        "openconfig-lldp:system-description": "Arista Networks EOS",
        "openconfig-lldp:system-name": system_name,
    })
}

pub fn neighbor_path(local_interface: &str) -> Path {
    format!(
        "/lldp/interfaces/interface[name={}]/neighbors/neighbor[id=1]/state",
        local_interface
    )
    .parse()
    .unwrap()
}

pub fn neighbor_entry(
    local_interface: &str,
    system_name: &str,
    port_id: &str,
) -> GetEntry {
    GetEntry {
        path: neighbor_path(local_interface),
        payload: serde_json::to_vec(&neighbor_json(system_name, port_id))
            .unwrap(),
    }
}

pub fn neighbor(system_name: &str, port_id: &str) -> NeighborRecord {
    serde_json::from_value(neighbor_json(system_name, port_id)).unwrap()
}

pub fn observed(
    local_interface: &str,
    system_name: &str,
    port_id: &str,
) -> ObservedNeighbor {
    ObservedNeighbor::new(
        local_interface.to_owned(),
        neighbor(system_name, port_id),
    )
}
