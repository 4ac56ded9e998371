//! This module defines types related to the sync committee.

use alloy_primitives::{Bytes, B256};
use serde::{Deserialize, Serialize};
use tree_hash::{PackedEncoding, TreeHash, TreeHashType};

use super::bls::{bls_public_key_tree_hash_root, BlsPublicKey, BlsSignature};

/// The sync committee data
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct SyncCommittee {
    /// The public keys of the sync committee, in committee order
    pub pubkeys: Vec<BlsPublicKey>,
    /// The aggregate public key of the sync committee
    pub aggregate_pubkey: BlsPublicKey,
}

// `SyncCommittee` is the container `{ pubkeys: Vector[BLSPubkey, SYNC_COMMITTEE_SIZE], aggregate_pubkey: BLSPubkey }`.
// The vector length is taken from `pubkeys`, which the beacon node always serves at full size.
impl TreeHash for SyncCommittee {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Container
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("Struct should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Struct should never be packed.")
    }

    fn tree_hash_root(&self) -> B256 {
        let pubkey_roots = self
            .pubkeys
            .iter()
            .flat_map(|pubkey| bls_public_key_tree_hash_root(pubkey).0)
            .collect::<Vec<u8>>();
        let pubkeys_root = tree_hash::merkle_root(&pubkey_roots, self.pubkeys.len());
        let aggregate_pubkey_root = bls_public_key_tree_hash_root(&self.aggregate_pubkey);

        let mut container = [0u8; 64];
        container[..32].copy_from_slice(pubkeys_root.as_slice());
        container[32..].copy_from_slice(aggregate_pubkey_root.as_slice());
        tree_hash::merkle_root(&container, 2)
    }
}

/// The sync committee aggregate
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct SyncAggregate {
    /// The bits representing the sync committee's participation.
    pub sync_committee_bits: Bytes,
    /// The aggregated signature of the sync committee.
    pub sync_committee_signature: BlsSignature,
}

impl SyncAggregate {
    /// Returns the participation bitvector as one boolean per committee member, in committee order.
    ///
    /// Bit `i` lives in byte `i / 8` at position `i % 8` (SSZ `Bitvector` layout).
    #[must_use]
    pub fn participation(&self) -> Vec<bool> {
        participation_from_bits(&self.sync_committee_bits)
    }

    /// Returns the number of bits that are set to `true`.
    #[must_use]
    pub fn num_sync_committee_participants(&self) -> usize {
        self.sync_committee_bits
            .iter()
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }
}

/// Decodes an SSZ `Bitvector` into one boolean per bit.
#[must_use]
pub fn participation_from_bits(bits: &[u8]) -> Vec<bool> {
    bits.iter()
        .flat_map(|byte| (0..8).map(move |i| (byte >> i) & 1 == 1))
        .collect()
}
