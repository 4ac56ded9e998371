//! This module defines [`UpdateProverError`].

use alloy_primitives::B256;
use ethereum_apis::beacon_api::error::BeaconApiClientError;
use ethereum_types::consensus::merkle::Field;

/// Error types for deriving sync committee updates
#[derive(thiserror::Error, Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum UpdateProverError {
    /// The beacon node could not be queried
    #[error("beacon api error: {0}")]
    BeaconApi(#[from] BeaconApiClientError),

    /// The beacon node has no committee update for a period
    #[error("no committee update for period {period}")]
    MissingCommitteeUpdate {
        /// The requested period
        period: u64,
    },

    /// A generalized index must be at least 1
    #[error("generalized index {gindex} is out of range")]
    GindexOutOfRange {
        /// The generalized index
        gindex: u64,
    },

    /// The generalized index is not covered by the partial tree
    #[error("generalized index {gindex} cannot be resolved in the proof tree")]
    UnresolvableGindex {
        /// The generalized index
        gindex: u64,
    },

    /// A branch does not have one node per tree level
    #[error("invalid {field} branch length, expected {expected} but found {found}")]
    BranchDepthMismatch {
        /// The proved field
        field: Field,
        /// Expected length
        expected: usize,
        /// Found length
        found: usize,
    },

    /// The state proof returned by the beacon node is malformed
    #[error("invalid state proof: {0}")]
    InvalidStateProof(&'static str),

    /// A merkle branch does not prove its leaf against its root
    #[error("invalid {field} branch: {source}")]
    InvalidMerkleBranch {
        /// The proved field
        field: Field,
        /// Branch details
        source: Box<InvalidMerkleBranch>, // boxed to decrease enum size
    },

    /// The sync committee proved from the state differs from the committee update served for its period
    #[error("sync committee root mismatch for period {period}, proved {proved} but committee update has {served}")]
    SyncCommitteeRootMismatch {
        /// The sync committee period
        period: u64,
        /// The root proved from the finalized state
        proved: B256,
        /// The root of the committee from the committee update
        served: B256,
    },

    /// The finalized checkpoint block is not at the start of the requested epoch
    #[error("finalized header is at slot {found} but expected slot {expected}")]
    UnexpectedFinalizedSlot {
        /// The first slot of the requested epoch
        expected: u64,
        /// The slot of the finalized header
        found: u64,
    },

    /// The slots an epoch update reads do not fit in a slot number
    #[error("slots of epoch {epoch} overflow")]
    SlotOverflow {
        /// The requested epoch
        epoch: u64,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
#[error("invalid merkle branch \
    (leaf: {leaf}, branch: [{branch}], \
    depth: {depth}, index: {index}, root: {root}, found: {found})",
    branch = .branch.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
)]
/// Error details for invalid Merkle branch verification
pub struct InvalidMerkleBranch {
    /// Leaf hash
    pub leaf: B256,
    /// Branch hashes
    pub branch: Vec<B256>,
    /// Tree depth
    pub depth: usize,
    /// Leaf index
    pub index: u64,
    /// Expected root hash
    pub root: B256,
    /// Computed root hash
    pub found: B256,
}

impl UpdateProverError {
    /// Constructs an [`UpdateProverError::InvalidMerkleBranch`] variant.
    #[must_use]
    pub fn invalid_merkle_branch(field: Field, details: InvalidMerkleBranch) -> Self {
        Self::InvalidMerkleBranch {
            field,
            source: Box::new(details),
        }
    }
}
