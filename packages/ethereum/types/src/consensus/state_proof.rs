//! This module defines the wire format of partial beacon state proofs.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

/// A partial merkle tree over the beacon state, as returned by the light client proof endpoint.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StateProof {
    /// A multiproof in tree offset encoding.
    ///
    /// A subtree is either a single leaf (no offsets) or `[n] ++ left.offsets ++ right.offsets`
    /// where `n` is the number of leaves in the left subtree. Leaves are in left to right order.
    TreeOffset {
        /// The subtree split points
        offsets: Vec<u16>,
        /// The known nodes of the partial tree
        leaves: Vec<B256>,
    },
    /// A proof of a single node
    Single {
        /// The generalized index of `leaf`
        #[serde_as(as = "DisplayFromStr")]
        gindex: u64,
        /// The proved node
        leaf: B256,
        /// The sibling hashes from `leaf` up to the root
        witnesses: Vec<B256>,
    },
}
