//! Derives the update that finalizes an epoch from headers and state proofs.

use async_trait::async_trait;
use ethereum_types::consensus::merkle::Field;
use tracing::{debug, info};
use tree_hash::TreeHash;

use super::{block_root, DeriveUpdate, UpdateProver};
use crate::{
    beacon::{BeaconApi, BlockId},
    error::UpdateProverError,
    update::{EpochUpdate, UpdateRecord},
};

#[async_trait]
impl DeriveUpdate for EpochUpdate {
    /// The latest header is looked up `finality_delay_epochs` after the start of the epoch and
    /// its state proves the finalized checkpoint. The sync committee is proved from the
    /// finalized state and must match the committee update of its period.
    #[tracing::instrument(skip_all, fields(epoch = self.epoch))]
    async fn derive_update<A: BeaconApi>(
        &self,
        prover: &UpdateProver<A>,
    ) -> Result<UpdateRecord, UpdateProverError> {
        let config = prover.config();
        let spec = &config.spec;

        let epoch = self.epoch;
        let finalized_slot = spec
            .start_slot_at_epoch(epoch)
            .ok_or(UpdateProverError::SlotOverflow { epoch })?;
        let latest_slot = config
            .finality_delay_epochs
            .checked_mul(spec.slots_per_epoch)
            .and_then(|delay| finalized_slot.checked_add(delay))
            .ok_or(UpdateProverError::SlotOverflow { epoch })?;

        info!(finalized_slot, latest_slot, "deriving epoch update");

        let (latest_header, genesis_validators_root) = futures::try_join!(
            prover.api().header(BlockId::Slot(latest_slot)),
            prover.api().genesis_validators_root(),
        )?;
        let latest = prover.prove_header(&latest_header, block_root(&latest_header))?;

        let finalizing = prover
            .prove_state_field(latest.state_root, Field::FinalizedRoot)
            .await?;
        let finalized_block_root = finalizing.leaf;

        let (finalized_header, body) = futures::try_join!(
            prover.api().header(BlockId::Root(finalized_block_root)),
            prover.api().block_body(BlockId::Root(latest.block_root)),
        )?;
        ensure!(
            finalized_header.slot == finalized_slot,
            UpdateProverError::UnexpectedFinalizedSlot {
                expected: finalized_slot,
                found: finalized_header.slot,
            }
        );
        let finalized = prover.prove_header(&finalized_header, finalized_block_root)?;

        let period = spec.period_at_slot(finalized_slot);
        let (sync_committee_proof, committee_updates) = futures::try_join!(
            prover.prove_state_field(finalized.state_root, Field::NextSyncCommittee),
            async {
                prover
                    .api()
                    .committee_updates(period, period)
                    .await
                    .map_err(UpdateProverError::from)
            },
        )?;
        let sync_committee = committee_updates
            .into_iter()
            .next()
            .ok_or(UpdateProverError::MissingCommitteeUpdate { period })?
            .next_sync_committee;

        let served = sync_committee.tree_hash_root();
        ensure!(
            served == sync_committee_proof.leaf,
            UpdateProverError::SyncCommitteeRootMismatch {
                period,
                proved: sync_committee_proof.leaf,
                served,
            }
        );

        debug!(
            %finalized_block_root,
            sync_committee_root = %served,
            participants = body.sync_aggregate.num_sync_committee_participants(),
            "epoch update proved"
        );

        let record = UpdateRecord {
            signature: body.sync_aggregate.sync_committee_signature,
            participants: body.sync_aggregate.participation(),
            latest_block_root: latest.block_root,
            signing_domain: prover.signing_domain(latest.slot, genesis_validators_root),
            state_root: latest.state_root,
            state_root_branch: latest.state_root_branch,
            latest_slot: latest.slot,
            latest_slot_branch: latest.slot_branch,
            finalized_block_root,
            finalizing_branch: finalizing.branch,
            finalized_slot: finalized.slot,
            finalized_slot_branch: finalized.slot_branch,
            finalized_state_root: finalized.state_root,
            finalized_state_root_branch: finalized.state_root_branch,
            sync_committee: sync_committee.pubkeys,
            sync_committee_aggregate: sync_committee.aggregate_pubkey,
            sync_committee_branch: sync_committee_proof.branch,
        };
        record.validate_branches(&config.gindices)?;

        info!(
            latest_slot = record.latest_slot,
            finalized_slot = record.finalized_slot,
            "derived epoch update"
        );

        Ok(record)
    }
}
