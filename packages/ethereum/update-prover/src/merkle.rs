//! Merkle branch verification.

use alloy_primitives::B256;
use ethereum_types::consensus::merkle::Field;
use sha2::{Digest, Sha256};

use crate::error::{InvalidMerkleBranch, UpdateProverError};

/// Returns `sha256(left || right)`.
#[must_use]
pub fn hash_pair(left: &B256, right: &B256) -> B256 {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);

    B256::from_slice(&hasher.finalize()[..])
}

/// Folds `branch` into `leaf`, returning the root it implies, or `None` if `branch` does not
/// have exactly `depth` nodes.
#[must_use]
pub fn compute_merkle_root(leaf: B256, branch: &[B256], depth: usize, index: u64) -> Option<B256> {
    if branch.len() != depth {
        return None;
    }

    Some(
        branch
            .iter()
            .enumerate()
            .fold(leaf, |value, (i, branch_node)| {
                if (index >> i) & 1 == 1 {
                    hash_pair(branch_node, &value)
                } else {
                    hash_pair(&value, branch_node)
                }
            }),
    )
}

/// Checks that `branch` proves `leaf` at `index` of the level `depth` of the tree rooted at `root`.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/phase0/beacon-chain.md#is_valid_merkle_branch)
#[must_use]
pub fn is_valid_merkle_branch(
    leaf: B256,
    branch: &[B256],
    depth: usize,
    index: u64,
    root: B256,
) -> bool {
    compute_merkle_root(leaf, branch, depth, index) == Some(root)
}

/// Validates the branch of `field`, returning a descriptive error if it does not hold.
/// # Errors
/// Returns [`UpdateProverError::BranchDepthMismatch`] if the branch length is not `depth`, and
/// [`UpdateProverError::InvalidMerkleBranch`] if the branch does not lead to `root`.
pub fn validate_merkle_branch(
    field: Field,
    leaf: B256,
    branch: &[B256],
    depth: usize,
    index: u64,
    root: B256,
) -> Result<(), UpdateProverError> {
    let found = compute_merkle_root(leaf, branch, depth, index).ok_or(
        UpdateProverError::BranchDepthMismatch {
            field,
            expected: depth,
            found: branch.len(),
        },
    )?;

    ensure!(
        found == root,
        UpdateProverError::invalid_merkle_branch(
            field,
            InvalidMerkleBranch {
                leaf,
                branch: branch.to_vec(),
                depth,
                index,
                root,
                found,
            },
        )
    );

    Ok(())
}
