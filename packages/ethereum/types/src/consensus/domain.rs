//! This module defines signing domains and how they are derived.

use alloy_primitives::{hex, FixedBytes, B256};
use serde::{Deserialize, Serialize};

use super::fork::Version;

/// The 4-byte domain type prefixed to every signing domain
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
#[serde(transparent)]
pub struct DomainType(pub FixedBytes<4>);

#[allow(missing_docs)]
impl DomainType {
    pub const BEACON_PROPOSER: Self = Self(FixedBytes(hex!("00000000")));
    pub const BEACON_ATTESTER: Self = Self(FixedBytes(hex!("01000000")));
    pub const RANDAO: Self = Self(FixedBytes(hex!("02000000")));
    pub const DEPOSIT: Self = Self(FixedBytes(hex!("03000000")));
    pub const VOLUNTARY_EXIT: Self = Self(FixedBytes(hex!("04000000")));
    pub const SELECTION_PROOF: Self = Self(FixedBytes(hex!("05000000")));
    pub const AGGREGATE_AND_PROOF: Self = Self(FixedBytes(hex!("06000000")));
    pub const SYNC_COMMITTEE: Self = Self(FixedBytes(hex!("07000000")));
    pub const SYNC_COMMITTEE_SELECTION_PROOF: Self = Self(FixedBytes(hex!("08000000")));
    pub const CONTRIBUTION_AND_PROOF: Self = Self(FixedBytes(hex!("09000000")));
    pub const BLS_TO_EXECUTION_CHANGE: Self = Self(FixedBytes(hex!("0A000000")));
    pub const APPLICATION_MASK: Self = Self(FixedBytes(hex!("00000001")));
}

/// Return the 32-byte fork data root for the `current_version` and `genesis_validators_root`.
///
/// `ForkData` is a two field container, so the root is the hash of the right-padded version
/// chunk and the genesis validators root.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/phase0/beacon-chain.md#compute_fork_data_root)
#[must_use]
pub fn compute_fork_data_root(current_version: Version, genesis_validators_root: B256) -> B256 {
    let mut fork_data = [0u8; 64];
    fork_data[..4].copy_from_slice(current_version.as_slice());
    fork_data[32..].copy_from_slice(genesis_validators_root.as_slice());
    tree_hash::merkle_root(&fork_data, 2)
}

/// Return the domain for the `domain_type`, `fork_version` and `genesis_validators_root`.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/phase0/beacon-chain.md#compute_domain)
#[must_use]
pub fn compute_domain(
    domain_type: DomainType,
    fork_version: Version,
    genesis_validators_root: B256,
) -> B256 {
    let fork_data_root = compute_fork_data_root(fork_version, genesis_validators_root);

    let mut domain = [0; 32];
    domain[..4].copy_from_slice(domain_type.0.as_slice());
    domain[4..].copy_from_slice(&fork_data_root[..28]);

    FixedBytes(domain)
}
