//! Partial merkle trees and the extraction of single branches from them.

use alloy_primitives::B256;
use ethereum_types::consensus::{header::BeaconBlockHeader, state_proof::StateProof};
use tree_hash::TreeHash;

use crate::{error::UpdateProverError, gindex::from_gindex, merkle::hash_pair};

/// A leaf value together with its sibling hashes in leaf to root order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
    /// The proved node
    pub leaf: B256,
    /// The sibling hashes from `leaf` up to the root
    pub branch: Vec<B256>,
}

/// A binary merkle tree of which only some nodes are known.
///
/// A [`ProofNode::Leaf`] holds the root of a subtree whose content is not expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofNode {
    /// A node known only by its hash
    Leaf(B256),
    /// An expanded node
    Branch(Box<ProofNode>, Box<ProofNode>),
}

impl ProofNode {
    /// Builds a branch node from its children.
    #[must_use]
    pub fn branch(left: Self, right: Self) -> Self {
        Self::Branch(Box::new(left), Box::new(right))
    }

    /// Merkleizes `nodes` as the bottom level of a tree, padding with zero leaves up to the
    /// next power of two.
    #[must_use]
    pub fn from_nodes(nodes: Vec<Self>) -> Self {
        let width = nodes.len().max(1).next_power_of_two();
        let mut level = nodes;
        level.resize(width, Self::Leaf(B256::ZERO));

        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len() / 2);
            let mut nodes = level.into_iter();
            while let (Some(left), Some(right)) = (nodes.next(), nodes.next()) {
                next.push(Self::branch(left, right));
            }
            level = next;
        }

        level.pop().unwrap_or(Self::Leaf(B256::ZERO))
    }

    /// Decodes a tree offset proof.
    ///
    /// The first offset is the number of leaves in the left subtree, followed by the offsets
    /// of the left subtree and then those of the right subtree.
    /// # Errors
    /// Returns an error if the offsets do not describe a binary tree over `leaves`.
    pub fn from_subtrees(offsets: &[u16], leaves: &[B256]) -> Result<Self, UpdateProverError> {
        ensure!(
            !leaves.is_empty(),
            UpdateProverError::InvalidStateProof("subtree without leaves")
        );
        ensure!(
            offsets.len() + 1 == leaves.len(),
            UpdateProverError::InvalidStateProof("offsets do not match leaves")
        );

        let Some((&pivot, _)) = offsets.split_first() else {
            return Ok(Self::Leaf(leaves[0]));
        };
        let pivot = usize::from(pivot);
        ensure!(
            pivot > 0 && pivot < leaves.len(),
            UpdateProverError::InvalidStateProof("offset out of range")
        );

        Ok(Self::branch(
            Self::from_subtrees(&offsets[1..pivot], &leaves[..pivot])?,
            Self::from_subtrees(&offsets[pivot..], &leaves[pivot..])?,
        ))
    }

    /// Builds the path from `leaf` up to the root, with `witnesses` in leaf to root order.
    /// # Errors
    /// Returns an error if the number of witnesses is not the depth of `gindex`.
    pub fn from_single_proof(
        gindex: u64,
        leaf: B256,
        witnesses: &[B256],
    ) -> Result<Self, UpdateProverError> {
        let (depth, index) = from_gindex(gindex)?;
        ensure!(
            witnesses.len() == depth,
            UpdateProverError::InvalidStateProof("witness count does not match gindex depth")
        );

        Ok(witnesses
            .iter()
            .enumerate()
            .fold(Self::Leaf(leaf), |node, (i, witness)| {
                if (index >> i) & 1 == 1 {
                    Self::branch(Self::Leaf(*witness), node)
                } else {
                    Self::branch(node, Self::Leaf(*witness))
                }
            }))
    }

    /// Returns the hash of this node.
    #[must_use]
    pub fn root(&self) -> B256 {
        match self {
            Self::Leaf(root) => *root,
            Self::Branch(left, right) => hash_pair(&left.root(), &right.root()),
        }
    }

    /// Returns the node at `gindex` (relative to this node) with its branch.
    /// # Errors
    /// Returns an error if the path to `gindex` leaves the known part of the tree.
    pub fn single_proof(&self, gindex: u64) -> Result<MerkleProof, UpdateProverError> {
        let (depth, index) = from_gindex(gindex)?;

        let mut node = self;
        let mut branch = Vec::with_capacity(depth);
        for level in (0..depth).rev() {
            let Self::Branch(left, right) = node else {
                return Err(UpdateProverError::UnresolvableGindex { gindex });
            };
            if (index >> level) & 1 == 1 {
                branch.push(left.root());
                node = right;
            } else {
                branch.push(right.root());
                node = left;
            }
        }
        branch.reverse();

        Ok(MerkleProof {
            leaf: node.root(),
            branch,
        })
    }

    /// Encodes the tree as a tree offset proof.
    /// # Errors
    /// Returns an error if a left subtree has more leaves than an offset can hold.
    pub fn to_tree_offset_proof(&self) -> Result<StateProof, UpdateProverError> {
        let mut offsets = Vec::new();
        let mut leaves = Vec::new();
        self.write_tree_offsets(&mut offsets, &mut leaves)?;

        Ok(StateProof::TreeOffset { offsets, leaves })
    }

    fn write_tree_offsets(
        &self,
        offsets: &mut Vec<u16>,
        leaves: &mut Vec<B256>,
    ) -> Result<(), UpdateProverError> {
        match self {
            Self::Leaf(leaf) => leaves.push(*leaf),
            Self::Branch(left, right) => {
                let mut left_offsets = Vec::new();
                let mut left_leaves = Vec::new();
                left.write_tree_offsets(&mut left_offsets, &mut left_leaves)?;

                offsets.push(u16::try_from(left_leaves.len()).map_err(|_| {
                    UpdateProverError::InvalidStateProof("subtree too large for offset")
                })?);
                offsets.append(&mut left_offsets);
                leaves.append(&mut left_leaves);

                right.write_tree_offsets(offsets, leaves)?;
            }
        }
        Ok(())
    }
}

impl TryFrom<StateProof> for ProofNode {
    type Error = UpdateProverError;

    fn try_from(proof: StateProof) -> Result<Self, Self::Error> {
        match proof {
            StateProof::TreeOffset { offsets, leaves } => Self::from_subtrees(&offsets, &leaves),
            StateProof::Single {
                gindex,
                leaf,
                witnesses,
            } => Self::from_single_proof(gindex, leaf, &witnesses),
        }
    }
}

/// Returns the tree of a [`BeaconBlockHeader`], one leaf per field.
#[must_use]
pub fn header_tree(header: &BeaconBlockHeader) -> ProofNode {
    ProofNode::from_nodes(
        [
            header.slot.tree_hash_root(),
            header.proposer_index.tree_hash_root(),
            header.parent_root,
            header.state_root,
            header.body_root,
        ]
        .into_iter()
        .map(ProofNode::Leaf)
        .collect(),
    )
}

/// Extracts the proof of the header field at `gindex`.
/// # Errors
/// Returns an error if `gindex` is not a node of the header tree.
pub fn header_proof(
    header: &BeaconBlockHeader,
    gindex: u64,
) -> Result<MerkleProof, UpdateProverError> {
    header_tree(header).single_proof(gindex)
}
