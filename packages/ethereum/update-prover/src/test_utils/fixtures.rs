//! Synthetic chains for the two update strategies.
//!
//! The chains use the mainnet slot and epoch lengths: the finalized header is at slot 1280
//! (epoch 40) and the latest header one (period) or two (epoch) epochs later. The period numbers
//! the committee updates are served under are synthetic; with mainnet lengths every one of these
//! slots lies in period 0.

use alloy_primitives::{Bytes, B256};
use ethereum_types::consensus::{
    beacon_block::Body,
    bls::{BlsPublicKey, BlsSignature},
    committee_update::CommitteeUpdate,
    header::BeaconBlockHeader,
    merkle::{Field, GindexTable},
    spec::Spec,
    sync_committee::{SyncAggregate, SyncCommittee},
};

use super::{MockBeaconApi, SyntheticState};
use crate::config::UpdateProverConfig;

/// The genesis validators root of every synthetic chain
pub const GENESIS_VALIDATORS_ROOT: B256 = B256::repeat_byte(0x4b);

/// The size of synthetic sync committees
pub const SYNC_COMMITTEE_SIZE: u8 = 16;

/// A chain serving the committee updates of periods 5 and 6.
pub struct PeriodChain {
    /// The beacon node
    pub api: MockBeaconApi,
    /// The prover config
    pub config: UpdateProverConfig,
    /// The committee update of period 5
    pub previous: CommitteeUpdate,
    /// The committee update of period 6
    pub current: CommitteeUpdate,
}

/// A chain in which epoch 40 is finalized by the header at slot 1344.
pub struct EpochChain {
    /// The beacon node
    pub api: MockBeaconApi,
    /// The prover config
    pub config: UpdateProverConfig,
    /// The next sync committee of the finalized state
    pub committee: SyncCommittee,
    /// The committee update of the finalized period
    pub committee_update: CommitteeUpdate,
    /// The body of the latest block
    pub body: Body,
    /// The finalized header
    pub finalized_header: BeaconBlockHeader,
    /// The root of the finalized header
    pub finalized_block_root: B256,
    /// The state root of the finalized header
    pub finalized_state_root: B256,
    /// The state root of the latest header
    pub latest_state_root: B256,
}

/// Returns a sync committee whose keys are derived from `seed`.
#[must_use]
pub fn committee(seed: u8) -> SyncCommittee {
    SyncCommittee {
        pubkeys: (0..SYNC_COMMITTEE_SIZE)
            .map(|i| {
                let mut pubkey = BlsPublicKey::repeat_byte(seed);
                pubkey.0[47] = i;
                pubkey
            })
            .collect(),
        aggregate_pubkey: BlsPublicKey::repeat_byte(seed.wrapping_add(0x80)),
    }
}

/// Returns a header at `slot` committing to `state_root`.
#[must_use]
pub fn header(slot: u64, state_root: B256) -> BeaconBlockHeader {
    BeaconBlockHeader {
        slot,
        proposer_index: slot % 97,
        parent_root: B256::left_padding_from(&slot.to_be_bytes()),
        state_root,
        body_root: B256::repeat_byte(0xb0),
    }
}

/// The period chain in which both finalized headers share one state.
///
/// The carried committee then verifies against the finalized state root of the update.
/// # Panics
/// Panics if a synthetic proof cannot be built
#[must_use]
pub fn period_chain(gindices: GindexTable) -> PeriodChain {
    build_period_chain(gindices, true)
}

/// The period chain in which each finalized header has its own state.
///
/// The carried committee then does not verify against the finalized state root of the update.
/// # Panics
/// Panics if a synthetic proof cannot be built
#[must_use]
pub fn period_chain_with_distinct_states(gindices: GindexTable) -> PeriodChain {
    build_period_chain(gindices, false)
}

fn config(gindices: GindexTable) -> UpdateProverConfig {
    UpdateProverConfig {
        gindices,
        ..UpdateProverConfig::new(Spec::mainnet())
    }
}

fn build_period_chain(gindices: GindexTable, share_state: bool) -> PeriodChain {
    let mut api = MockBeaconApi::new(gindices, GENESIS_VALIDATORS_ROOT);

    let previous_state = SyntheticState::new(gindices, 5).with_next_sync_committee(&committee(6));
    let current_state = if share_state {
        previous_state.clone()
    } else {
        SyntheticState::new(gindices, 6).with_next_sync_committee(&committee(7))
    };

    let previous_header = header(1024, previous_state.root());
    let finalized_header = header(1280, current_state.root());
    let finalized_block_root = api.insert_header(finalized_header.clone());

    let latest_state =
        SyntheticState::new(gindices, 7).with_finalized_checkpoint(40, finalized_block_root);
    let latest_header = header(1312, latest_state.root());
    api.insert_header(latest_header.clone());

    let previous = CommitteeUpdate {
        header: previous_header,
        next_sync_committee: committee(6),
        next_sync_committee_branch: previous_state
            .tree()
            .single_proof(gindices.next_sync_committee)
            .unwrap()
            .branch,
        finality_header: header(1056, B256::repeat_byte(0x56)),
        finality_branch: vec![B256::ZERO; gindices.depth(Field::FinalizedRoot)],
        sync_committee_bits: Bytes::from(vec![0xff, 0xff]),
        sync_committee_signature: BlsSignature::repeat_byte(0x55),
    };
    let current = CommitteeUpdate {
        header: finalized_header,
        next_sync_committee: committee(7),
        next_sync_committee_branch: current_state
            .tree()
            .single_proof(gindices.next_sync_committee)
            .unwrap()
            .branch,
        finality_header: latest_header,
        finality_branch: latest_state
            .tree()
            .single_proof(gindices.finalized_root)
            .unwrap()
            .branch,
        sync_committee_bits: Bytes::from(vec![0xff, 0x0f]),
        sync_committee_signature: BlsSignature::repeat_byte(0x66),
    };
    api.insert_committee_update(5, previous.clone());
    api.insert_committee_update(6, current.clone());

    PeriodChain {
        api,
        config: config(gindices),
        previous,
        current,
    }
}

/// The epoch chain with the finalized header at the start of epoch 40.
/// # Panics
/// Panics if a synthetic proof cannot be built
#[must_use]
pub fn epoch_chain(gindices: GindexTable) -> EpochChain {
    epoch_chain_finalizing_slot(gindices, 1280)
}

/// The epoch chain with the finalized checkpoint block at `finalized_slot`.
/// # Panics
/// Panics if a synthetic proof cannot be built
#[must_use]
pub fn epoch_chain_finalizing_slot(gindices: GindexTable, finalized_slot: u64) -> EpochChain {
    let mut api = MockBeaconApi::new(gindices, GENESIS_VALIDATORS_ROOT);
    let committee = committee(9);

    let finalized_state = SyntheticState::new(gindices, 0x20).with_next_sync_committee(&committee);
    let next_sync_committee_branch = finalized_state
        .tree()
        .single_proof(gindices.next_sync_committee)
        .unwrap()
        .branch;
    let finalized_state_root = api.insert_state(finalized_state);
    let finalized_header = header(finalized_slot, finalized_state_root);
    let finalized_block_root = api.insert_header(finalized_header.clone());

    let latest_state =
        SyntheticState::new(gindices, 0x21).with_finalized_checkpoint(40, finalized_block_root);
    let finality_branch = latest_state
        .tree()
        .single_proof(gindices.finalized_root)
        .unwrap()
        .branch;
    let latest_state_root = api.insert_state(latest_state);
    let latest_header = header(1344, latest_state_root);
    let latest_block_root = api.insert_header(latest_header.clone());

    let body = Body {
        sync_aggregate: SyncAggregate {
            sync_committee_bits: Bytes::from(vec![0b0000_1011, 0xff]),
            sync_committee_signature: BlsSignature::repeat_byte(0x99),
        },
    };
    api.insert_body(latest_block_root, body.clone());

    let committee_update = CommitteeUpdate {
        header: finalized_header.clone(),
        next_sync_committee: committee.clone(),
        next_sync_committee_branch,
        finality_header: latest_header,
        finality_branch,
        sync_committee_bits: body.sync_aggregate.sync_committee_bits.clone(),
        sync_committee_signature: body.sync_aggregate.sync_committee_signature,
    };
    api.insert_committee_update(0, committee_update.clone());

    EpochChain {
        api,
        config: config(gindices),
        committee,
        committee_update,
        body,
        finalized_header,
        finalized_block_root,
        finalized_state_root,
        latest_state_root,
    }
}
