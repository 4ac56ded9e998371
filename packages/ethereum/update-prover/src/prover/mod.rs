//! The update assembler.
//!
//! [`UpdateProver`] derives an [`UpdateRecord`] through one of the [`DeriveUpdate`] strategies.
//! A record is only returned once every branch it carries has been validated.

use alloy_primitives::B256;
use async_trait::async_trait;
use ethereum_types::consensus::{
    domain::compute_domain, header::BeaconBlockHeader, merkle::Field,
};
use tracing::debug;
use tree_hash::TreeHash;

use crate::{
    beacon::{BeaconApi, BlockId},
    config::UpdateProverConfig,
    error::UpdateProverError,
    gindex::from_gindex,
    merkle::validate_merkle_branch,
    proof::{header_proof, MerkleProof, ProofNode},
    update::{PeriodUpdate, UpdateRecord, UpdateRequest},
};

pub mod epoch;
pub mod period;

/// A way of deriving an [`UpdateRecord`].
#[async_trait]
pub trait DeriveUpdate {
    /// Derives and validates the update.
    /// # Errors
    /// Returns an error if the beacon node cannot serve the data or any check fails.
    async fn derive_update<A: BeaconApi>(
        &self,
        prover: &UpdateProver<A>,
    ) -> Result<UpdateRecord, UpdateProverError>;
}

/// Derives sync committee updates from a beacon node.
#[allow(clippy::module_name_repetitions)]
pub struct UpdateProver<A> {
    api: A,
    config: UpdateProverConfig,
}

/// The header fields proved against a block root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderProofs {
    /// The block root
    pub block_root: B256,
    /// The slot of the header
    pub slot: u64,
    /// The state root of the header
    pub state_root: B256,
    /// Branch of the slot against `block_root`
    pub slot_branch: Vec<B256>,
    /// Branch of the state root against `block_root`
    pub state_root_branch: Vec<B256>,
}

impl<A: BeaconApi> UpdateProver<A> {
    /// Creates a prover querying `api`.
    pub const fn new(api: A, config: UpdateProverConfig) -> Self {
        Self { api, config }
    }

    /// Returns the beacon node the prover queries.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Returns the config of the prover.
    pub const fn config(&self) -> &UpdateProverConfig {
        &self.config
    }

    /// Derives the update selected by `request`.
    /// # Errors
    /// Returns an error if the beacon node cannot serve the data or any check fails.
    pub async fn derive_update(
        &self,
        request: &UpdateRequest,
    ) -> Result<UpdateRecord, UpdateProverError> {
        match request {
            UpdateRequest::Period(update) => update.derive_update(self).await,
            UpdateRequest::Epoch(update) => update.derive_update(self).await,
        }
    }

    /// Derives the update of the sync committee period containing `epoch`.
    /// # Errors
    /// Returns an error if the beacon node cannot serve the data or any check fails.
    pub async fn committee_update_for_epoch(
        &self,
        epoch: u64,
    ) -> Result<UpdateRecord, UpdateProverError> {
        let period = self.config.spec.period_at_epoch(epoch);
        debug!(epoch, period, "committee update for epoch");

        self.derive_update(&UpdateRequest::Period(PeriodUpdate { period }))
            .await
    }

    /// Returns the sync committee period of the head of the chain.
    /// # Errors
    /// Returns an error if the head header cannot be fetched.
    pub async fn latest_sync_committee_period(&self) -> Result<u64, UpdateProverError> {
        let head = self.api.header(BlockId::Head).await?;
        Ok(self.config.spec.period_at_slot(head.slot))
    }

    /// Returns the sync committee signing domain at `slot`.
    #[must_use]
    pub fn signing_domain(&self, slot: u64, genesis_validators_root: B256) -> B256 {
        let spec = &self.config.spec;
        let fork_version = spec
            .to_fork_parameters()
            .compute_fork_version(spec.epoch_at_slot(slot));

        compute_domain(
            self.config.sync_committee_domain_type,
            fork_version,
            genesis_validators_root,
        )
    }

    /// Extracts the slot and state root branches of `header` and validates them against `block_root`.
    /// # Errors
    /// Returns an error if either branch does not lead to `block_root`.
    pub fn prove_header(
        &self,
        header: &BeaconBlockHeader,
        block_root: B256,
    ) -> Result<HeaderProofs, UpdateProverError> {
        let gindices = &self.config.gindices;

        let state_root = header_proof(header, gindices.state_root)?;
        validate_field(Field::StateRoot, gindices.state_root, &state_root, block_root)?;

        let slot = header_proof(header, gindices.slot)?;
        validate_field(Field::Slot, gindices.slot, &slot, block_root)?;

        debug!(slot = header.slot, %block_root, state_root = %header.state_root, "header proved");

        Ok(HeaderProofs {
            block_root,
            slot: header.slot,
            state_root: header.state_root,
            slot_branch: slot.branch,
            state_root_branch: state_root.branch,
        })
    }

    /// Fetches a state proof of `field` from the state with root `state_root` and validates the
    /// extracted branch against it.
    /// # Errors
    /// Returns an error if the proof cannot be fetched, decoded or validated.
    pub async fn prove_state_field(
        &self,
        state_root: B256,
        field: Field,
    ) -> Result<MerkleProof, UpdateProverError> {
        let gindex = self.config.gindices.gindex(field);
        let path = field
            .state_path()
            .ok_or(UpdateProverError::UnresolvableGindex { gindex })?;

        let state_proof = self
            .api
            .state_proof(state_root, &[path])
            .await?;
        let proof = ProofNode::try_from(state_proof)?.single_proof(gindex)?;
        validate_field(field, gindex, &proof, state_root)?;

        debug!(%field, %state_root, leaf = %proof.leaf, "state field proved");

        Ok(proof)
    }
}

/// Validates `proof` as the branch of `field` at `gindex` under `root`.
/// # Errors
/// Returns an error if the branch does not lead to `root`.
pub fn validate_field(
    field: Field,
    gindex: u64,
    proof: &MerkleProof,
    root: B256,
) -> Result<(), UpdateProverError> {
    let (depth, index) = from_gindex(gindex)?;
    validate_merkle_branch(field, proof.leaf, &proof.branch, depth, index, root)
}

/// Returns the root of `header`.
#[must_use]
pub fn block_root(header: &BeaconBlockHeader) -> B256 {
    header.tree_hash_root()
}

#[cfg(test)]
mod test {
    use ethereum_types::consensus::{merkle::GindexTable, spec::Spec};

    use super::UpdateProver;
    use crate::{
        config::UpdateProverConfig,
        error::UpdateProverError,
        test_utils::{fixtures, MockBeaconApi},
        update::{PeriodUpdate, UpdateRequest},
    };

    #[tokio::test]
    async fn test_latest_sync_committee_period() {
        let chain = fixtures::period_chain(GindexTable::ALTAIR);
        let prover = UpdateProver::new(chain.api, chain.config);

        // head is the latest header at slot 1312
        assert_eq!(prover.latest_sync_committee_period().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_committee_update_for_epoch_uses_period_of_epoch() {
        let prover = UpdateProver::new(
            MockBeaconApi::default(),
            UpdateProverConfig::new(Spec::mainnet()),
        );

        // epoch 1536 is in period 6, which needs the updates of periods 5 and 6
        let err = prover.committee_update_for_epoch(1536).await.unwrap_err();
        assert!(matches!(
            err,
            UpdateProverError::MissingCommitteeUpdate { period: 5 }
        ));

        let err = prover
            .derive_update(&UpdateRequest::Period(PeriodUpdate { period: 0 }))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UpdateProverError::MissingCommitteeUpdate { period: 0 }
        ));
    }

    #[test]
    fn test_signing_domain_uses_fork_at_slot() {
        let spec = Spec::mainnet();
        let prover = UpdateProver::new(
            MockBeaconApi::default(),
            UpdateProverConfig::new(spec.clone()),
        );
        let genesis_validators_root = alloy_primitives::B256::repeat_byte(0x4b);

        let deneb_start = spec.start_slot_at_epoch(spec.deneb_fork_epoch).unwrap();
        let electra_start = spec.start_slot_at_epoch(spec.electra_fork_epoch).unwrap();

        assert_eq!(
            prover.signing_domain(deneb_start, genesis_validators_root),
            prover.signing_domain(electra_start - 1, genesis_validators_root)
        );
        assert_ne!(
            prover.signing_domain(electra_start - 1, genesis_validators_root),
            prover.signing_domain(electra_start, genesis_validators_root)
        );
        assert_eq!(
            &prover.signing_domain(electra_start, genesis_validators_root)[..4],
            &[7, 0, 0, 0]
        );
    }
}
