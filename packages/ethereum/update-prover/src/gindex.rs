//! Generalized index arithmetic.

use ethereum_types::consensus::merkle::floorlog2;

use crate::error::UpdateProverError;

/// Returns the index of a generalized index among the nodes at its depth.
///
/// See: <https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/light-client/sync-protocol.md#get_subtree_index>
#[must_use]
pub const fn get_subtree_index(gindex: u64) -> u64 {
    gindex % 2_u64.pow(gindex.ilog2())
}

/// Splits a generalized index into its depth and its index at that depth.
///
/// `gindex = 2^depth + index`, so the root (`gindex = 1`) is `(0, 0)`.
/// # Errors
/// Returns an error if `gindex` is 0.
pub fn from_gindex(gindex: u64) -> Result<(usize, u64), UpdateProverError> {
    ensure!(gindex >= 1, UpdateProverError::GindexOutOfRange { gindex });
    Ok((floorlog2(gindex), get_subtree_index(gindex)))
}
