//! Derives an update from the committee updates of a sync committee period.

use async_trait::async_trait;
use ethereum_types::consensus::{merkle::Field, sync_committee::participation_from_bits};
use tracing::{debug, info};
use tree_hash::TreeHash;

use super::{block_root, validate_field, DeriveUpdate, UpdateProver};
use crate::{
    beacon::{BeaconApi, BlockId},
    error::UpdateProverError,
    proof::MerkleProof,
    update::{PeriodUpdate, UpdateRecord},
};

#[async_trait]
impl DeriveUpdate for PeriodUpdate {
    /// The committee update of `period` provides the headers, its attested header being the
    /// latest header and its finalized header the finalized one. The signing committee is the
    /// next sync committee of the previous period, proved against the finalized state root.
    #[tracing::instrument(skip_all, fields(period = self.period))]
    async fn derive_update<A: BeaconApi>(
        &self,
        prover: &UpdateProver<A>,
    ) -> Result<UpdateRecord, UpdateProverError> {
        let period = self.period;
        let previous_period = period
            .checked_sub(1)
            .ok_or(UpdateProverError::MissingCommitteeUpdate { period })?;
        let gindices = &prover.config().gindices;

        info!("deriving committee update");

        let (committee_updates, genesis_validators_root) = futures::try_join!(
            prover.api().committee_updates(previous_period, period),
            prover.api().genesis_validators_root(),
        )?;
        let mut committee_updates = committee_updates.into_iter();
        let previous = committee_updates
            .next()
            .ok_or(UpdateProverError::MissingCommitteeUpdate {
                period: previous_period,
            })?;
        let current = committee_updates
            .next()
            .ok_or(UpdateProverError::MissingCommitteeUpdate { period })?;

        let latest_header = &current.finality_header;
        let latest = prover.prove_header(latest_header, block_root(latest_header))?;

        let finalized_header = &current.header;
        let finalized_block_root = prover
            .api()
            .block_root(BlockId::Slot(finalized_header.slot))
            .await?;
        let finalized = prover.prove_header(finalized_header, finalized_block_root)?;

        let finalizing = MerkleProof {
            leaf: finalized_block_root,
            branch: current.finality_branch,
        };
        validate_field(
            Field::FinalizedRoot,
            gindices.finalized_root,
            &finalizing,
            latest.state_root,
        )?;

        let sync_committee = previous.next_sync_committee;
        let sync_committee_proof = MerkleProof {
            leaf: sync_committee.tree_hash_root(),
            branch: previous.next_sync_committee_branch,
        };
        validate_field(
            Field::NextSyncCommittee,
            gindices.next_sync_committee,
            &sync_committee_proof,
            finalized.state_root,
        )?;

        debug!(
            latest_slot = latest.slot,
            finalized_slot = finalized.slot,
            sync_committee_root = %sync_committee_proof.leaf,
            "committee update proved"
        );

        let record = UpdateRecord {
            signature: current.sync_committee_signature,
            participants: participation_from_bits(&current.sync_committee_bits),
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
        record.validate_branches(gindices)?;

        info!(
            latest_slot = record.latest_slot,
            finalized_slot = record.finalized_slot,
            "derived committee update"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod test {
    use alloy_primitives::B256;
    use ethereum_types::consensus::merkle::{Field, GindexTable, NEXT_SYNC_COMMITTEE_GINDEX};
    use rstest::rstest;
    use tree_hash::TreeHash;

    use crate::{
        error::UpdateProverError,
        gindex::from_gindex,
        merkle::is_valid_merkle_branch,
        prover::{block_root, UpdateProver},
        test_utils::{corrupt, fixtures},
        update::{PeriodUpdate, UpdateRequest},
    };

    const REQUEST: UpdateRequest = UpdateRequest::Period(PeriodUpdate { period: 6 });

    #[tokio::test]
    async fn test_period_update_end_to_end() {
        let chain = fixtures::period_chain(GindexTable::ALTAIR);
        let expected_branch = chain.previous.next_sync_committee_branch.clone();
        let expected_root = chain.previous.next_sync_committee.tree_hash_root();
        let prover = UpdateProver::new(chain.api, chain.config);

        let record = prover.derive_update(&REQUEST).await.unwrap();

        assert_eq!(record.finalized_slot, 1280);
        assert_eq!(record.latest_slot, 1312);
        assert_eq!(record.sync_committee_branch, expected_branch);

        let (depth, index) = from_gindex(NEXT_SYNC_COMMITTEE_GINDEX).unwrap();
        assert!(is_valid_merkle_branch(
            expected_root,
            &record.sync_committee_branch,
            depth,
            index,
            record.finalized_state_root
        ));
        record.validate_branches(&GindexTable::ALTAIR).unwrap();
    }

    #[tokio::test]
    async fn test_period_update_carries_previous_next_sync_committee() {
        let chain = fixtures::period_chain(GindexTable::ALTAIR);
        let previous = chain.previous.next_sync_committee.clone();
        let current = chain.current.next_sync_committee.clone();
        assert_ne!(previous, current);
        let prover = UpdateProver::new(chain.api, chain.config);

        let record = prover.derive_update(&REQUEST).await.unwrap();

        assert_eq!(record.sync_committee, previous.pubkeys);
        assert_eq!(record.sync_committee_aggregate, previous.aggregate_pubkey);
        assert_ne!(record.sync_committee, current.pubkeys);
    }

    #[tokio::test]
    async fn test_period_update_headers_and_signature() {
        let chain = fixtures::period_chain(GindexTable::ALTAIR);
        let latest_root = block_root(&chain.current.finality_header);
        let finalized_root = block_root(&chain.current.header);
        let signature = chain.current.sync_committee_signature;
        let prover = UpdateProver::new(chain.api, chain.config);

        let record = prover.derive_update(&REQUEST).await.unwrap();

        assert_eq!(record.latest_block_root, latest_root);
        assert_eq!(record.finalized_block_root, finalized_root);
        assert_eq!(record.signature, signature);
        assert_eq!(record.participants.len(), 16);
        assert_eq!(record.participants.iter().filter(|p| **p).count(), 12);
        assert_eq!(
            record.signing_domain,
            prover.signing_domain(1312, fixtures::GENESIS_VALIDATORS_ROOT)
        );
    }

    #[tokio::test]
    async fn test_period_update_with_electra_table() {
        let chain = fixtures::period_chain(GindexTable::ELECTRA);
        let prover = UpdateProver::new(chain.api, chain.config);

        let record = prover.derive_update(&REQUEST).await.unwrap();
        assert_eq!(record.finalizing_branch.len(), 7);
        assert_eq!(record.sync_committee_branch.len(), 6);
    }

    #[tokio::test]
    async fn test_period_update_rejects_committee_outside_finalized_state() {
        // the carried committee only verifies against the previous finalized state
        let chain = fixtures::period_chain_with_distinct_states(GindexTable::ALTAIR);
        let prover = UpdateProver::new(chain.api, chain.config);

        let err = prover.derive_update(&REQUEST).await.unwrap_err();
        assert!(
            matches!(
                err,
                UpdateProverError::InvalidMerkleBranch {
                    field: Field::NextSyncCommittee,
                    ..
                }
            ),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn test_record_sync_committee_branch_is_validated() {
        let chain = fixtures::period_chain(GindexTable::ALTAIR);
        let prover = UpdateProver::new(chain.api, chain.config);

        let mut record = prover.derive_update(&REQUEST).await.unwrap();
        record.validate_branches(&GindexTable::ALTAIR).unwrap();

        corrupt(&mut record.sync_committee_branch, 3);
        let err = record.validate_branches(&GindexTable::ALTAIR).unwrap_err();
        assert!(matches!(
            err,
            UpdateProverError::InvalidMerkleBranch {
                field: Field::NextSyncCommittee,
                ..
            }
        ));
    }

    #[rstest]
    #[case::finality_branch(Field::FinalizedRoot)]
    #[case::sync_committee_branch(Field::NextSyncCommittee)]
    #[tokio::test]
    async fn test_period_update_fails_closed_on_corrupt_branch(#[case] field: Field) {
        let mut chain = fixtures::period_chain(GindexTable::ALTAIR);
        match field {
            Field::FinalizedRoot => corrupt(&mut chain.current.finality_branch, 2),
            _ => corrupt(&mut chain.previous.next_sync_committee_branch, 0),
        }
        chain.api.insert_committee_update(5, chain.previous.clone());
        chain.api.insert_committee_update(6, chain.current.clone());
        let prover = UpdateProver::new(chain.api, chain.config);

        let err = prover.derive_update(&REQUEST).await.unwrap_err();
        assert!(
            matches!(err, UpdateProverError::InvalidMerkleBranch { field: f, .. } if f == field),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn test_period_update_fails_closed_on_wrong_finalized_root() {
        let mut chain = fixtures::period_chain(GindexTable::ALTAIR);
        // the node reports another block at the finalized slot
        chain.api.insert_block_root(1280, B256::repeat_byte(0x13));
        let prover = UpdateProver::new(chain.api, chain.config);

        let err = prover.derive_update(&REQUEST).await.unwrap_err();
        assert!(matches!(
            err,
            UpdateProverError::InvalidMerkleBranch {
                field: Field::StateRoot,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_period_update_rejects_short_branch() {
        let mut chain = fixtures::period_chain(GindexTable::ALTAIR);
        chain.current.finality_branch.pop();
        chain.api.insert_committee_update(6, chain.current.clone());
        let prover = UpdateProver::new(chain.api, chain.config);

        let err = prover.derive_update(&REQUEST).await.unwrap_err();
        assert!(matches!(
            err,
            UpdateProverError::BranchDepthMismatch {
                field: Field::FinalizedRoot,
                expected: 6,
                found: 5,
            }
        ));
    }

    #[tokio::test]
    async fn test_period_update_missing_current_period() {
        let mut chain = fixtures::period_chain(GindexTable::ALTAIR);
        chain.api.remove_committee_update(6);
        let prover = UpdateProver::new(chain.api, chain.config);

        let err = prover.derive_update(&REQUEST).await.unwrap_err();
        assert!(matches!(
            err,
            UpdateProverError::MissingCommitteeUpdate { period: 6 }
        ));
    }
}
