//! This module provides the slot, epoch and sync committee period arithmetic.

/// Returns the epoch at a given `slot`.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/phase0/beacon-chain.md#compute_epoch_at_slot)
#[must_use]
pub const fn compute_epoch_at_slot(slots_per_epoch: u64, slot: u64) -> u64 {
    slot / slots_per_epoch
}

/// Returns the first slot of `epoch`, or `None` if it does not fit in a slot number.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/phase0/beacon-chain.md#compute_start_slot_at_epoch)
#[must_use]
pub const fn compute_start_slot_at_epoch(slots_per_epoch: u64, epoch: u64) -> Option<u64> {
    epoch.checked_mul(slots_per_epoch)
}

/// Returns the sync committee period at a given `epoch`.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/validator.md#sync-committee)
#[must_use]
pub const fn compute_sync_committee_period(
    epochs_per_sync_committee_period: u64,
    epoch: u64,
) -> u64 {
    epoch / epochs_per_sync_committee_period
}

/// Returns the sync committee period at a given `slot`.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/light-client/sync-protocol.md#compute_sync_committee_period_at_slot)
#[must_use]
pub const fn compute_sync_committee_period_at_slot(
    slots_per_epoch: u64,
    epochs_per_sync_committee_period: u64,
    slot: u64,
) -> u64 {
    compute_sync_committee_period(
        epochs_per_sync_committee_period,
        compute_epoch_at_slot(slots_per_epoch, slot),
    )
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::{
        compute_epoch_at_slot, compute_start_slot_at_epoch, compute_sync_committee_period,
        compute_sync_committee_period_at_slot,
    };

    const SLOTS_PER_EPOCH: u64 = 8;
    const EPOCHS_PER_PERIOD: u64 = 8;

    #[rstest]
    #[case(0, 0)]
    #[case(63, 0)]
    #[case(64, 1)]
    #[case(1280, 20)]
    #[case(1312, 20)]
    #[case(1343, 20)]
    #[case(1344, 21)]
    fn test_period_at_slot(#[case] slot: u64, #[case] period: u64) {
        assert_eq!(
            compute_sync_committee_period_at_slot(SLOTS_PER_EPOCH, EPOCHS_PER_PERIOD, slot),
            period
        );
    }

    #[test]
    fn test_period_round_trips_through_epochs() {
        for slot in 0..(SLOTS_PER_EPOCH * EPOCHS_PER_PERIOD * 4) {
            let period =
                compute_sync_committee_period_at_slot(SLOTS_PER_EPOCH, EPOCHS_PER_PERIOD, slot);
            let first_slot = period * EPOCHS_PER_PERIOD * SLOTS_PER_EPOCH;
            let epoch = compute_epoch_at_slot(SLOTS_PER_EPOCH, first_slot);

            assert_eq!(compute_sync_committee_period(EPOCHS_PER_PERIOD, epoch), period);
        }
    }

    #[test]
    fn test_start_slot_is_inverse_of_epoch() {
        for epoch in 0..100 {
            let slot = compute_start_slot_at_epoch(SLOTS_PER_EPOCH, epoch).unwrap();
            assert_eq!(compute_epoch_at_slot(SLOTS_PER_EPOCH, slot), epoch);
            assert_eq!(compute_epoch_at_slot(SLOTS_PER_EPOCH, slot + SLOTS_PER_EPOCH - 1), epoch);
        }
    }

    #[rstest]
    #[case(u64::MAX / SLOTS_PER_EPOCH, Some(u64::MAX / SLOTS_PER_EPOCH * SLOTS_PER_EPOCH))]
    #[case(u64::MAX / SLOTS_PER_EPOCH + 1, None)]
    #[case(u64::MAX, None)]
    fn test_start_slot_overflow(#[case] epoch: u64, #[case] slot: Option<u64>) {
        assert_eq!(compute_start_slot_at_epoch(SLOTS_PER_EPOCH, epoch), slot);
    }
}
