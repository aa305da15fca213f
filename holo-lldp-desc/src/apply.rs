//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::str::FromStr;

use holo_gnmi::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Error;
use crate::reconcile::DescriptionUpdate;

// How description updates are grouped into Set transactions.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    // One Set per interface. The first failure stops the remaining writes;
    // writes already done stay applied.
    #[default]
    Sequential,
    // A single Set carrying every update, applied all-or-nothing.
    Batched,
}

// ===== impl WriteMode =====

impl FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(WriteMode::Sequential),
            "batched" => Ok(WriteMode::Batched),
            _ => Err(format!("unknown write mode '{}'", s)),
        }
    }
}

// ===== global functions =====

// Writes a single interface description.
pub fn apply(
    client: &mut dyn Client,
    update: &DescriptionUpdate,
) -> Result<String, Error> {
    debug!(
        interface = %update.interface,
        description = %update.description,
        "setting description"
    );
    client
        .set(&[update.to_set_update()])
        .map_err(|error| Error::Write(update.interface.clone(), error))
}

// Writes all interface descriptions.
//
// `on_applied` is invoked after every successful Set transaction with the
// updates it carried and the target's confirmation.
pub fn apply_all<F>(
    client: &mut dyn Client,
    updates: &[DescriptionUpdate],
    mode: WriteMode,
    mut on_applied: F,
) -> Result<(), Error>
where
    F: FnMut(&[DescriptionUpdate], &str),
{
    if updates.is_empty() {
        info!("no LLDP neighbors, nothing to update");
        return Ok(());
    }

    match mode {
        WriteMode::Sequential => {
            for update in updates {
                let confirmation = apply(client, update)?;
                on_applied(std::slice::from_ref(update), &confirmation);
            }
        }
        WriteMode::Batched => {
            let set_updates = updates
                .iter()
                .map(DescriptionUpdate::to_set_update)
                .collect::<Vec<_>>();
            debug!(count = set_updates.len(), "setting descriptions");
            let confirmation =
                client.set(&set_updates).map_err(Error::BatchWrite)?;
            on_applied(updates, &confirmation);
        }
    }
    info!(count = updates.len(), ?mode, "interface descriptions updated");

    Ok(())
}
