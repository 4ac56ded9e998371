//! This module defines the record served by the light client committee updates endpoint.

use alloy_primitives::{Bytes, B256};
use serde::{Deserialize, Serialize};

use super::{bls::BlsSignature, header::BeaconBlockHeader, sync_committee::SyncCommittee};

/// A sync committee update for one period, as returned by
/// `/eth/v1/lightclient/committee_updates`.
///
/// `header` is the finalized header whose state carries `next_sync_committee`, and
/// `finality_header` is the attested header whose state proves the finalized checkpoint.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct CommitteeUpdate {
    /// The finalized header
    pub header: BeaconBlockHeader,
    /// The sync committee of the next period
    pub next_sync_committee: SyncCommittee,
    /// Branch of `next_sync_committee` against `header.state_root`
    pub next_sync_committee_branch: Vec<B256>,
    /// The attested header
    pub finality_header: BeaconBlockHeader,
    /// Branch of the root of `header` against `finality_header.state_root`
    pub finality_branch: Vec<B256>,
    /// The participation bits of the sync committee signature
    pub sync_committee_bits: Bytes,
    /// The aggregated signature of the sync committee
    pub sync_committee_signature: BlsSignature,
}

#[cfg(test)]
mod test {
    use super::CommitteeUpdate;

    #[test]
    fn test_deserialize_committee_update() {
        let zero = format!("0x{}", "00".repeat(32));
        let header = serde_json::json!({
            "slot": "1280",
            "proposer_index": "1",
            "parent_root": zero,
            "state_root": zero,
            "body_root": zero,
        });
        let json = serde_json::json!({
            "header": header,
            "next_sync_committee": {
                "pubkeys": [format!("0x{}", "aa".repeat(48))],
                "aggregate_pubkey": format!("0x{}", "bb".repeat(48)),
            },
            "next_sync_committee_branch": [zero, zero, zero, zero, zero],
            "finality_header": header,
            "finality_branch": [zero, zero, zero, zero, zero, zero],
            "sync_committee_bits": "0xff",
            "sync_committee_signature": format!("0x{}", "cc".repeat(96)),
        });

        let update: CommitteeUpdate = serde_json::from_value(json).unwrap();
        assert_eq!(update.header.slot, 1280);
        assert_eq!(update.next_sync_committee.pubkeys.len(), 1);
        assert_eq!(update.next_sync_committee_branch.len(), 5);
        assert_eq!(update.finality_branch.len(), 6);
    }
}
