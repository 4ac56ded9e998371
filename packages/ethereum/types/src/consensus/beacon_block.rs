//! This module defines types related to beacon's block api endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use alloy_primitives::B256;

use super::{bls::BlsSignature, sync_committee::SyncAggregate};

/// A beacon block
#[serde_as]
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BeaconBlock {
    /// The beacon block message
    pub message: BeaconBlockMessage,
    /// The beacon block signature
    pub signature: BlsSignature,
}

/// A beacon block message
#[serde_as]
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BeaconBlockMessage {
    /// The beacon block slot
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
    /// The beacon block proposer index
    #[serde_as(as = "DisplayFromStr")]
    pub proposer_index: u64,
    /// The beacon block parent root
    pub parent_root: B256,
    /// The beacon block state root
    pub state_root: B256,
    /// The beacon block body
    pub body: Body,
}

/// The body of a beacon block
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// The sync aggregate of the beacon block
    pub sync_aggregate: SyncAggregate,
    // Values not represented in this type:
    // - randao_reveal
    // - eth1_data
    // - graffiti
    // - proposer_slashings
    // - attester_slashings
    // - attestations
    // - deposits
    // - voluntary_exits
    // - execution_payload
    // - bls_to_execution_changes
    // - blob_kzg_commitments
    // - execution_requests
}

#[cfg(test)]
mod test {
    use super::BeaconBlock;

    #[test]
    fn test_deserialize_block_ignores_unrepresented_body_fields() {
        let json = serde_json::json!({
            "message": {
                "slot": "1313",
                "proposer_index": "7",
                "parent_root": "0x75d7411cb01daad167713b5a9b7219670f0e500653cbbcd45cfe1bfe04222459",
                "state_root": "0x0000000000000000000000000000000000000000000000000000000000000001",
                "body": {
                    "graffiti": "0x00",
                    "sync_aggregate": {
                        "sync_committee_bits": "0x0f",
                        "sync_committee_signature": format!("0x{}", "ab".repeat(96)),
                    }
                }
            },
            "signature": format!("0x{}", "cd".repeat(96)),
        });

        let block: BeaconBlock = serde_json::from_value(json).unwrap();
        assert_eq!(block.message.slot, 1313);
        assert_eq!(block.message.proposer_index, 7);
        assert_eq!(
            block.message.body.sync_aggregate.participation(),
            vec![true, true, true, true, false, false, false, false]
        );
    }
}
