//! This module defines the sync committee update record and the requests that derive it.

use alloy_primitives::B256;
use ethereum_types::consensus::{
    bls::{BlsPublicKey, BlsSignature},
    merkle::{Field, GindexTable},
    sync_committee::SyncCommittee,
};
use serde::{Deserialize, Serialize};
use tree_hash::TreeHash;

use crate::{error::UpdateProverError, gindex::from_gindex, merkle::validate_merkle_branch};

/// A sync committee update as consumed by the relay contract.
///
/// Every branch is in leaf to root order.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecord {
    /// The aggregated sync committee signature over the latest block root
    pub signature: BlsSignature,
    /// Which committee members signed, aligned with `sync_committee`
    pub participants: Vec<bool>,
    /// The root of the latest (attested) header
    pub latest_block_root: B256,
    /// The signing domain of the sync committee signature
    pub signing_domain: B256,
    /// The state root of the latest header
    pub state_root: B256,
    /// Branch of `state_root` against `latest_block_root`
    pub state_root_branch: Vec<B256>,
    /// The slot of the latest header
    pub latest_slot: u64,
    /// Branch of `latest_slot` against `latest_block_root`
    pub latest_slot_branch: Vec<B256>,
    /// The root of the finalized header
    pub finalized_block_root: B256,
    /// Branch of `finalized_block_root` against `state_root`
    pub finalizing_branch: Vec<B256>,
    /// The slot of the finalized header
    pub finalized_slot: u64,
    /// Branch of `finalized_slot` against `finalized_block_root`
    pub finalized_slot_branch: Vec<B256>,
    /// The state root of the finalized header
    pub finalized_state_root: B256,
    /// Branch of `finalized_state_root` against `finalized_block_root`
    pub finalized_state_root_branch: Vec<B256>,
    /// The public keys of the sync committee
    pub sync_committee: Vec<BlsPublicKey>,
    /// The aggregate public key of the sync committee
    pub sync_committee_aggregate: BlsPublicKey,
    /// Branch of the sync committee root against `finalized_state_root`
    pub sync_committee_branch: Vec<B256>,
}

impl UpdateRecord {
    /// Returns the root of the sync committee carried by the record.
    #[must_use]
    pub fn sync_committee_root(&self) -> B256 {
        SyncCommittee {
            pubkeys: self.sync_committee.clone(),
            aggregate_pubkey: self.sync_committee_aggregate,
        }
        .tree_hash_root()
    }

    /// Validates every branch of the record against the roots it carries.
    /// # Errors
    /// Returns the first branch that does not verify.
    pub fn validate_branches(&self, gindices: &GindexTable) -> Result<(), UpdateProverError> {
        let checks = [
            (
                Field::StateRoot,
                self.state_root,
                &self.state_root_branch,
                self.latest_block_root,
            ),
            (
                Field::Slot,
                self.latest_slot.tree_hash_root(),
                &self.latest_slot_branch,
                self.latest_block_root,
            ),
            (
                Field::FinalizedRoot,
                self.finalized_block_root,
                &self.finalizing_branch,
                self.state_root,
            ),
            (
                Field::StateRoot,
                self.finalized_state_root,
                &self.finalized_state_root_branch,
                self.finalized_block_root,
            ),
            (
                Field::Slot,
                self.finalized_slot.tree_hash_root(),
                &self.finalized_slot_branch,
                self.finalized_block_root,
            ),
            (
                Field::NextSyncCommittee,
                self.sync_committee_root(),
                &self.sync_committee_branch,
                self.finalized_state_root,
            ),
        ];

        for (field, leaf, branch, root) in checks {
            let (depth, index) = from_gindex(gindices.gindex(field))?;
            validate_merkle_branch(field, leaf, branch, depth, index, root)?;
        }

        Ok(())
    }
}

/// Derive the update signed in a sync committee period.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub struct PeriodUpdate {
    /// The sync committee period
    pub period: u64,
}

/// Derive the update that finalizes an epoch.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub struct EpochUpdate {
    /// The epoch to finalize
    pub epoch: u64,
}

/// Selects how an update is derived.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum UpdateRequest {
    /// From the committee updates of a period and the one before it
    Period(PeriodUpdate),
    /// From the headers and state proofs around an epoch
    Epoch(EpochUpdate),
}
