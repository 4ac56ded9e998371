//! This module defines the beacon block header and the beacon api header response.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use tree_hash_derive::TreeHash;

use super::bls::BlsSignature;

/// The beacon block header
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default, TreeHash)]
pub struct BeaconBlockHeader {
    /// The slot to which this block corresponds
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
    /// The index of validator in validator registry
    #[serde_as(as = "DisplayFromStr")]
    pub proposer_index: u64,
    /// The signing merkle root of the parent `BeaconBlock`
    pub parent_root: B256,
    /// The tree hash merkle root of the `BeaconState` for the `BeaconBlock`
    pub state_root: B256,
    /// The tree hash merkle root of the `BeaconBlockBody` for the `BeaconBlock`
    pub body_root: B256,
}

/// A beacon block header together with the proposer signature
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct SignedBeaconBlockHeader {
    /// The header
    pub message: BeaconBlockHeader,
    /// The proposer signature over the header
    pub signature: BlsSignature,
}

/// The data returned by `/eth/v1/beacon/headers/{block_id}`
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct BeaconBlockHeaderResponse {
    /// The block root
    pub root: B256,
    /// Whether the block is part of the canonical chain
    pub canonical: bool,
    /// The signed header
    pub header: SignedBeaconBlockHeader,
}

#[cfg(test)]
mod test {
    use alloy_primitives::{b256, B256};
    use tree_hash::TreeHash;

    use super::{BeaconBlockHeader, BeaconBlockHeaderResponse};

    #[test]
    fn test_deserialize_header_response() {
        let json = serde_json::json!({
            "root": "0x0000000000000000000000000000000000000000000000000000000000000002",
            "canonical": true,
            "header": {
                "message": {
                    "slot": "1313",
                    "proposer_index": "7",
                    "parent_root": "0x75d7411cb01daad167713b5a9b7219670f0e500653cbbcd45cfe1bfe04222459",
                    "state_root": "0x0000000000000000000000000000000000000000000000000000000000000001",
                    "body_root": "0x0000000000000000000000000000000000000000000000000000000000000003"
                },
                "signature": format!("0x{}", "cd".repeat(96)),
            }
        });

        let response: BeaconBlockHeaderResponse = serde_json::from_value(json).unwrap();
        assert!(response.canonical);
        assert_eq!(response.header.message.slot, 1313);
        assert_eq!(response.header.message.state_root, B256::with_last_byte(1));
    }

    #[test]
    fn test_default_header_root() {
        // hash_tree_root of an all zero `BeaconBlockHeader`, three levels of zero hashes
        assert_eq!(
            BeaconBlockHeader::default().tree_hash_root(),
            b256!("c78009fdf07fc56a11f122370658a353aaa542ed63e44c4bc15ff4cd105ab33c")
        );
    }
}
