//! This module defines types related to Spec.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::{
    fork::{Fork, ForkParameters, Version},
    slot::{
        compute_epoch_at_slot, compute_start_slot_at_epoch, compute_sync_committee_period,
        compute_sync_committee_period_at_slot,
    },
};

/// The spec type, returned from the beacon api.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Spec {
    /// The number of seconds per slot.
    #[serde_as(as = "DisplayFromStr")]
    pub seconds_per_slot: u64,
    /// The number of slots per epoch.
    #[serde_as(as = "DisplayFromStr")]
    pub slots_per_epoch: u64,
    /// The number of epochs per sync committee period.
    #[serde_as(as = "DisplayFromStr")]
    pub epochs_per_sync_committee_period: u64,

    /// The size of the sync committee.
    #[serde_as(as = "DisplayFromStr")]
    pub sync_committee_size: u64,

    // Fork Parameters
    /// The genesis fork version.
    pub genesis_fork_version: Version,
    /// The genesis slot.
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default)]
    pub genesis_slot: u64,
    /// The altair fork version.
    pub altair_fork_version: Version,
    /// The altair fork epoch.
    #[serde_as(as = "DisplayFromStr")]
    pub altair_fork_epoch: u64,
    /// The bellatrix fork version.
    pub bellatrix_fork_version: Version,
    /// The bellatrix fork epoch.
    #[serde_as(as = "DisplayFromStr")]
    pub bellatrix_fork_epoch: u64,
    /// The capella fork version.
    pub capella_fork_version: Version,
    /// The capella fork epoch.
    #[serde_as(as = "DisplayFromStr")]
    pub capella_fork_epoch: u64,
    /// The deneb fork version.
    pub deneb_fork_version: Version,
    /// The deneb fork epoch.
    #[serde_as(as = "DisplayFromStr")]
    pub deneb_fork_epoch: u64,
    /// The electra fork version.
    pub electra_fork_version: Version,
    /// The electra fork epoch.
    #[serde_as(as = "DisplayFromStr")]
    pub electra_fork_epoch: u64,
}

impl Spec {
    /// The mainnet preset and fork schedule.
    #[must_use]
    pub const fn mainnet() -> Self {
        Self {
            seconds_per_slot: 12,
            slots_per_epoch: 32,
            epochs_per_sync_committee_period: 256,
            sync_committee_size: 512,
            genesis_fork_version: Version::new([0, 0, 0, 0]),
            genesis_slot: 0,
            altair_fork_version: Version::new([1, 0, 0, 0]),
            altair_fork_epoch: 74_240,
            bellatrix_fork_version: Version::new([2, 0, 0, 0]),
            bellatrix_fork_epoch: 144_896,
            capella_fork_version: Version::new([3, 0, 0, 0]),
            capella_fork_epoch: 194_048,
            deneb_fork_version: Version::new([4, 0, 0, 0]),
            deneb_fork_epoch: 269_568,
            electra_fork_version: Version::new([5, 0, 0, 0]),
            electra_fork_epoch: 364_032,
        }
    }

    /// Returns the epoch containing `slot`.
    #[must_use]
    pub const fn epoch_at_slot(&self, slot: u64) -> u64 {
        compute_epoch_at_slot(self.slots_per_epoch, slot)
    }

    /// Returns the first slot of `epoch`, or `None` if it does not fit in a slot number.
    #[must_use]
    pub const fn start_slot_at_epoch(&self, epoch: u64) -> Option<u64> {
        compute_start_slot_at_epoch(self.slots_per_epoch, epoch)
    }

    /// Returns the sync committee period containing `slot`.
    #[must_use]
    pub const fn period_at_slot(&self, slot: u64) -> u64 {
        compute_sync_committee_period_at_slot(
            self.slots_per_epoch,
            self.epochs_per_sync_committee_period,
            slot,
        )
    }

    /// Returns the sync committee period containing `epoch`.
    #[must_use]
    pub const fn period_at_epoch(&self, epoch: u64) -> u64 {
        compute_sync_committee_period(self.epochs_per_sync_committee_period, epoch)
    }

    /// Returns [`ForkParameters`] based on the spec.
    #[must_use]
    pub const fn to_fork_parameters(&self) -> ForkParameters {
        ForkParameters {
            genesis_fork_version: self.genesis_fork_version,
            genesis_slot: self.genesis_slot,
            altair: Fork {
                version: self.altair_fork_version,
                epoch: self.altair_fork_epoch,
            },
            bellatrix: Fork {
                version: self.bellatrix_fork_version,
                epoch: self.bellatrix_fork_epoch,
            },
            capella: Fork {
                version: self.capella_fork_version,
                epoch: self.capella_fork_epoch,
            },
            deneb: Fork {
                version: self.deneb_fork_version,
                epoch: self.deneb_fork_epoch,
            },
            electra: Fork {
                version: self.electra_fork_version,
                epoch: self.electra_fork_epoch,
            },
        }
    }
}
