//! An in-memory beacon chain for testing the prover.

use std::collections::{BTreeMap, HashMap};

use alloy_primitives::B256;
use async_trait::async_trait;
use ethereum_apis::beacon_api::error::{ApiErrorBody, BeaconApiClientError};
use ethereum_types::consensus::{
    beacon_block::Body,
    committee_update::CommitteeUpdate,
    header::BeaconBlockHeader,
    merkle::{floorlog2, Field, GindexTable},
    state_proof::StateProof,
    sync_committee::SyncCommittee,
};
use tree_hash::TreeHash;

use crate::{
    beacon::{BeaconApi, BlockId},
    error::UpdateProverError,
    proof::ProofNode,
};

pub mod fixtures;

/// Flips the first byte of `branch[i]`.
pub fn corrupt(branch: &mut [B256], i: usize) {
    branch[i].0[0] ^= 0xff;
}

/// Keeps the paths from `node` (at `gindex`) down to every target, collapsing every other
/// subtree into its root.
#[must_use]
pub fn prune(node: &ProofNode, gindex: u64, targets: &[u64]) -> ProofNode {
    let is_below = |target: &u64| {
        *target > gindex && *target >> (target.ilog2() - gindex.ilog2()) == gindex
    };

    match node {
        ProofNode::Branch(left, right)
            if !targets.contains(&gindex) && targets.iter().any(is_below) =>
        {
            ProofNode::branch(
                prune(left, 2 * gindex, targets),
                prune(right, 2 * gindex + 1, targets),
            )
        }
        _ => ProofNode::Leaf(node.root()),
    }
}

/// A beacon state reduced to the fields the prover reads.
///
/// Every other field holds a filler root derived from the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticState {
    gindices: GindexTable,
    fields: Vec<B256>,
    finalized_epoch: u64,
    finalized_root: B256,
}

impl SyntheticState {
    /// Creates a state laid out according to `gindices`.
    #[must_use]
    pub fn new(gindices: GindexTable, seed: u8) -> Self {
        let width = 1 << floorlog2(gindices.next_sync_committee);
        let fields = (0..=u8::MAX)
            .take(width)
            .map(|i| B256::left_padding_from(&[seed, 0xff, i]))
            .collect();

        Self {
            gindices,
            fields,
            finalized_epoch: 0,
            finalized_root: B256::ZERO,
        }
    }

    /// Sets the finalized checkpoint.
    #[must_use]
    pub const fn with_finalized_checkpoint(mut self, epoch: u64, root: B256) -> Self {
        self.finalized_epoch = epoch;
        self.finalized_root = root;
        self
    }

    /// Sets the next sync committee.
    #[must_use]
    pub fn with_next_sync_committee(mut self, sync_committee: &SyncCommittee) -> Self {
        let i = self.field_index(self.gindices.next_sync_committee);
        self.fields[i] = sync_committee.tree_hash_root();
        self
    }

    /// Returns the full tree of the state.
    #[must_use]
    pub fn tree(&self) -> ProofNode {
        let mut nodes = self
            .fields
            .iter()
            .copied()
            .map(ProofNode::Leaf)
            .collect::<Vec<_>>();

        let epoch = ProofNode::Leaf(self.finalized_epoch.tree_hash_root());
        let root = ProofNode::Leaf(self.finalized_root);
        let checkpoint = if self.gindices.finalized_root % 2 == 1 {
            ProofNode::branch(epoch, root)
        } else {
            ProofNode::branch(root, epoch)
        };
        let i = self.field_index(self.gindices.finalized_root / 2);
        nodes[i] = checkpoint;

        ProofNode::from_nodes(nodes)
    }

    /// Returns the state root.
    #[must_use]
    pub fn root(&self) -> B256 {
        self.tree().root()
    }

    /// Returns the partial tree covering `gindices`.
    /// # Errors
    /// Returns an error if the tree cannot be encoded.
    pub fn proof(&self, gindices: &[u64]) -> Result<StateProof, UpdateProverError> {
        prune(&self.tree(), 1, gindices).to_tree_offset_proof()
    }

    fn field_index(&self, gindex: u64) -> usize {
        let width = self.fields.len();
        usize::try_from(gindex).unwrap_or(usize::MAX) - width
    }
}

/// An in-memory [`BeaconApi`].
#[derive(Debug, Clone, Default)]
pub struct MockBeaconApi {
    gindices: GindexTable,
    genesis_validators_root: B256,
    headers: HashMap<B256, BeaconBlockHeader>,
    canonical: BTreeMap<u64, B256>,
    bodies: HashMap<B256, Body>,
    states: HashMap<B256, SyntheticState>,
    committee_updates: BTreeMap<u64, CommitteeUpdate>,
}

impl MockBeaconApi {
    /// Creates an empty chain whose states are laid out according to `gindices`.
    #[must_use]
    pub fn new(gindices: GindexTable, genesis_validators_root: B256) -> Self {
        Self {
            gindices,
            genesis_validators_root,
            ..Default::default()
        }
    }

    /// Adds a canonical header, returning its root.
    pub fn insert_header(&mut self, header: BeaconBlockHeader) -> B256 {
        let root = header.tree_hash_root();
        self.canonical.insert(header.slot, root);
        self.headers.insert(root, header);
        root
    }

    /// Serves `header` for `root`, whatever the header hashes to.
    pub fn insert_header_at(&mut self, root: B256, header: BeaconBlockHeader) {
        self.headers.insert(root, header);
    }

    /// Serves `root` as the canonical block at `slot`.
    pub fn insert_block_root(&mut self, slot: u64, root: B256) {
        self.canonical.insert(slot, root);
    }

    /// Adds the body of the block with root `root`.
    pub fn insert_body(&mut self, root: B256, body: Body) {
        self.bodies.insert(root, body);
    }

    /// Adds a state, returning its root.
    pub fn insert_state(&mut self, state: SyntheticState) -> B256 {
        let root = state.root();
        self.states.insert(root, state);
        root
    }

    /// Serves `state` for `root`, whatever the state hashes to.
    pub fn insert_state_at(&mut self, root: B256, state: SyntheticState) {
        self.states.insert(root, state);
    }

    /// Returns the state served for `root`.
    #[must_use]
    pub fn state(&self, root: B256) -> Option<&SyntheticState> {
        self.states.get(&root)
    }

    /// Sets the committee update of `period`.
    pub fn insert_committee_update(&mut self, period: u64, update: CommitteeUpdate) {
        self.committee_updates.insert(period, update);
    }

    /// Removes the committee update of `period`.
    pub fn remove_committee_update(&mut self, period: u64) {
        self.committee_updates.remove(&period);
    }

    fn resolve(&self, block_id: BlockId) -> Result<B256, BeaconApiClientError> {
        match block_id {
            BlockId::Head => self.canonical.values().next_back().copied(),
            BlockId::Slot(slot) => self.canonical.get(&slot).copied(),
            BlockId::Root(root) => Some(root),
        }
        .ok_or_else(|| not_found(format!("block {block_id}")))
    }
}

fn not_found(message: String) -> BeaconApiClientError {
    BeaconApiClientError::NotFound(ApiErrorBody {
        code: 404,
        error: None,
        message,
    })
}

#[async_trait]
impl BeaconApi for MockBeaconApi {
    async fn header(&self, block_id: BlockId) -> Result<BeaconBlockHeader, BeaconApiClientError> {
        let root = self.resolve(block_id)?;
        self.headers
            .get(&root)
            .cloned()
            .ok_or_else(|| not_found(format!("header {block_id}")))
    }

    async fn block_root(&self, block_id: BlockId) -> Result<B256, BeaconApiClientError> {
        self.resolve(block_id)
    }

    async fn genesis_validators_root(&self) -> Result<B256, BeaconApiClientError> {
        Ok(self.genesis_validators_root)
    }

    async fn committee_updates(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<CommitteeUpdate>, BeaconApiClientError> {
        Ok((from..=to)
            .map_while(|period| self.committee_updates.get(&period).cloned())
            .collect())
    }

    async fn state_proof(
        &self,
        state_root: B256,
        paths: &[&[&str]],
    ) -> Result<StateProof, BeaconApiClientError> {
        let state = self
            .states
            .get(&state_root)
            .ok_or_else(|| not_found(format!("state {state_root}")))?;

        let gindices = paths
            .iter()
            .map(|path| {
                [Field::FinalizedRoot, Field::NextSyncCommittee]
                    .into_iter()
                    .find(|field| field.state_path() == Some(*path))
                    .map(|field| self.gindices.gindex(field))
                    .ok_or_else(|| not_found(format!("path {path:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        state.proof(&gindices).map_err(|err| {
            BeaconApiClientError::Internal(ApiErrorBody {
                code: 500,
                error: None,
                message: err.to_string(),
            })
        })
    }

    async fn block_body(&self, block_id: BlockId) -> Result<Body, BeaconApiClientError> {
        let root = self.resolve(block_id)?;
        self.bodies
            .get(&root)
            .cloned()
            .ok_or_else(|| not_found(format!("block {block_id}")))
    }
}

#[cfg(test)]
mod test {
    use ethereum_types::consensus::merkle::{Field, GindexTable};

    use super::{fixtures::committee, MockBeaconApi, SyntheticState};
    use crate::{
        beacon::BeaconApi,
        proof::ProofNode,
        prover::validate_field,
    };

    #[tokio::test]
    async fn test_mock_state_proofs_verify() {
        let table = GindexTable::ALTAIR;
        let state = SyntheticState::new(table, 1).with_next_sync_committee(&committee(1));
        let mut api = MockBeaconApi::new(table, alloy_primitives::B256::ZERO);
        let state_root = api.insert_state(state);

        let proof = api
            .state_proof(
                state_root,
                &[
                    Field::FinalizedRoot.state_path().unwrap(),
                    Field::NextSyncCommittee.state_path().unwrap(),
                ],
            )
            .await
            .unwrap();
        let tree = ProofNode::try_from(proof).unwrap();
        assert_eq!(tree.root(), state_root);

        for field in [Field::FinalizedRoot, Field::NextSyncCommittee] {
            let gindex = table.gindex(field);
            let proof = tree.single_proof(gindex).unwrap();
            validate_field(field, gindex, &proof, state_root).unwrap();
        }
    }
}
