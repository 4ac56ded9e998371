//! This module defines the generalized indices of the beacon block header and beacon state
//! fields that sync committee updates prove.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `get_generalized_index(BeaconBlockHeader, 'slot')` (= 8)
pub const SLOT_GINDEX: u64 = 8;
/// `get_generalized_index(BeaconBlockHeader, 'state_root')` (= 11)
pub const STATE_ROOT_GINDEX: u64 = 11;

// https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/light-client/sync-protocol.md#constants
/// `get_generalized_index(BeaconState, 'finalized_checkpoint', 'root')` (= 105)
pub const FINALIZED_ROOT_GINDEX: u64 = 105;
/// `get_generalized_index(BeaconState, 'next_sync_committee')` (= 55)
pub const NEXT_SYNC_COMMITTEE_GINDEX: u64 = 55;

// https://github.com/ethereum/consensus-specs/blob/dev/specs/electra/light-client/sync-protocol.md#new-constants
/// `get_generalized_index(BeaconState, 'finalized_checkpoint', 'root')` (= 169)
pub const FINALIZED_ROOT_GINDEX_ELECTRA: u64 = 169;
/// `get_generalized_index(BeaconState, 'next_sync_committee')` (= 87)
pub const NEXT_SYNC_COMMITTEE_GINDEX_ELECTRA: u64 = 87;

/// Convenience function safely to call [`u64::ilog2`] and convert the result into a usize.
#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
#[must_use]
pub const fn floorlog2(n: u64) -> usize {
    // conversion is safe since usize is either 32 or 64 bits as per cfg above
    n.ilog2() as usize
}

/// A field proved by a sync committee update.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// `BeaconBlockHeader.slot`
    Slot,
    /// `BeaconBlockHeader.state_root`
    StateRoot,
    /// `BeaconState.finalized_checkpoint.root`
    FinalizedRoot,
    /// `BeaconState.next_sync_committee`
    NextSyncCommittee,
}

impl Field {
    /// Returns the path of the field inside the beacon state, as accepted by state proof
    /// endpoints, or `None` for header fields.
    #[must_use]
    pub const fn state_path(self) -> Option<&'static [&'static str]> {
        match self {
            Self::FinalizedRoot => Some(&["finalized_checkpoint", "root"]),
            Self::NextSyncCommittee => Some(&["next_sync_committee"]),
            Self::Slot | Self::StateRoot => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Slot => "slot",
            Self::StateRoot => "state_root",
            Self::FinalizedRoot => "finalized_root",
            Self::NextSyncCommittee => "next_sync_committee",
        };
        f.write_str(name)
    }
}

/// The generalized indices of every [`Field`] for one version of the header and state schema.
///
/// A schema upgrade swaps the table, it never changes how proofs are extracted.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub struct GindexTable {
    /// Gindex of [`Field::Slot`] in the block header
    pub slot: u64,
    /// Gindex of [`Field::StateRoot`] in the block header
    pub state_root: u64,
    /// Gindex of [`Field::FinalizedRoot`] in the beacon state
    pub finalized_root: u64,
    /// Gindex of [`Field::NextSyncCommittee`] in the beacon state
    pub next_sync_committee: u64,
}

impl GindexTable {
    /// The table for the altair through deneb beacon state.
    pub const ALTAIR: Self = Self {
        slot: SLOT_GINDEX,
        state_root: STATE_ROOT_GINDEX,
        finalized_root: FINALIZED_ROOT_GINDEX,
        next_sync_committee: NEXT_SYNC_COMMITTEE_GINDEX,
    };

    /// The table for the electra beacon state.
    pub const ELECTRA: Self = Self {
        slot: SLOT_GINDEX,
        state_root: STATE_ROOT_GINDEX,
        finalized_root: FINALIZED_ROOT_GINDEX_ELECTRA,
        next_sync_committee: NEXT_SYNC_COMMITTEE_GINDEX_ELECTRA,
    };

    /// Returns the generalized index of `field`.
    #[must_use]
    pub const fn gindex(&self, field: Field) -> u64 {
        match field {
            Field::Slot => self.slot,
            Field::StateRoot => self.state_root,
            Field::FinalizedRoot => self.finalized_root,
            Field::NextSyncCommittee => self.next_sync_committee,
        }
    }

    /// Returns the expected branch length for `field`.
    #[must_use]
    pub const fn depth(&self, field: Field) -> usize {
        floorlog2(self.gindex(field))
    }
}

impl Default for GindexTable {
    fn default() -> Self {
        Self::ALTAIR
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::{Field, GindexTable};

    #[rstest]
    #[case(Field::Slot, 3)]
    #[case(Field::StateRoot, 3)]
    #[case(Field::FinalizedRoot, 6)]
    #[case(Field::NextSyncCommittee, 5)]
    fn test_altair_depths(#[case] field: Field, #[case] depth: usize) {
        assert_eq!(GindexTable::ALTAIR.depth(field), depth);
    }

    #[rstest]
    #[case(Field::FinalizedRoot, 7)]
    #[case(Field::NextSyncCommittee, 6)]
    fn test_electra_depths(#[case] field: Field, #[case] depth: usize) {
        assert_eq!(GindexTable::ELECTRA.depth(field), depth);
    }

    #[test]
    fn test_table_deserializes_from_json() {
        let json = serde_json::json!({
            "slot": 8,
            "state_root": 11,
            "finalized_root": 169,
            "next_sync_committee": 87
        });
        let table: GindexTable = serde_json::from_value(json).unwrap();
        assert_eq!(table, GindexTable::ELECTRA);
    }

    #[test]
    fn test_only_state_fields_have_paths() {
        assert_eq!(Field::Slot.state_path(), None);
        assert_eq!(
            Field::FinalizedRoot.state_path(),
            Some(&["finalized_checkpoint", "root"][..])
        );
        assert_eq!(
            Field::NextSyncCommittee.state_path(),
            Some(&["next_sync_committee"][..])
        );
    }
}
