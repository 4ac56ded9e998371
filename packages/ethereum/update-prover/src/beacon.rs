//! The beacon node queries the prover depends on.

use std::fmt;

use alloy_primitives::B256;
use async_trait::async_trait;
use ethereum_apis::beacon_api::{client::BeaconApiClient, error::BeaconApiClientError};
use ethereum_types::consensus::{
    beacon_block::Body, committee_update::CommitteeUpdate, header::BeaconBlockHeader,
    state_proof::StateProof,
};

/// Identifies a block on the beacon node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
    /// The canonical head
    Head,
    /// The canonical block at a slot
    Slot(u64),
    /// A block by its root
    Root(B256),
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head => f.write_str("head"),
            Self::Slot(slot) => write!(f, "{slot}"),
            Self::Root(root) => write!(f, "{root}"),
        }
    }
}

/// Read-only access to a beacon node.
#[async_trait]
pub trait BeaconApi: Send + Sync {
    /// Returns the header of a block.
    async fn header(&self, block_id: BlockId) -> Result<BeaconBlockHeader, BeaconApiClientError>;

    /// Returns the root of a block.
    async fn block_root(&self, block_id: BlockId) -> Result<B256, BeaconApiClientError>;

    /// Returns the genesis validators root of the chain.
    async fn genesis_validators_root(&self) -> Result<B256, BeaconApiClientError>;

    /// Returns the committee updates of the periods `from..=to`, in period order.
    async fn committee_updates(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<CommitteeUpdate>, BeaconApiClientError>;

    /// Returns a partial tree of the beacon state with root `state_root` covering every path in
    /// `paths`.
    async fn state_proof(
        &self,
        state_root: B256,
        paths: &[&[&str]],
    ) -> Result<StateProof, BeaconApiClientError>;

    /// Returns the body of a block.
    async fn block_body(&self, block_id: BlockId) -> Result<Body, BeaconApiClientError>;
}

#[async_trait]
impl BeaconApi for BeaconApiClient {
    async fn header(&self, block_id: BlockId) -> Result<BeaconBlockHeader, BeaconApiClientError> {
        Ok(self.header(&block_id.to_string()).await?.header.message)
    }

    async fn block_root(&self, block_id: BlockId) -> Result<B256, BeaconApiClientError> {
        self.beacon_block_root(&block_id.to_string()).await
    }

    async fn genesis_validators_root(&self) -> Result<B256, BeaconApiClientError> {
        Ok(self.genesis().await?.data.genesis_validators_root)
    }

    async fn committee_updates(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<CommitteeUpdate>, BeaconApiClientError> {
        self.committee_updates(from, to).await
    }

    async fn state_proof(
        &self,
        state_root: B256,
        paths: &[&[&str]],
    ) -> Result<StateProof, BeaconApiClientError> {
        self.state_proof(&state_root.to_string(), paths).await
    }

    async fn block_body(&self, block_id: BlockId) -> Result<Body, BeaconApiClientError> {
        Ok(self.beacon_block(&block_id.to_string()).await?.message.body)
    }
}
