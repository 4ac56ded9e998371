//! This module defines the BLS key and signature types carried through the update prover.
//!
//! The prover never verifies signatures itself, it only moves them from the beacon node to the
//! update record.

use alloy_primitives::{FixedBytes, B256};

/// The length of a compressed BLS public key.
pub const BLS_PUBLIC_KEY_BYTES_LEN: usize = 48;

/// The length of a compressed BLS signature.
pub const BLS_SIGNATURE_BYTES_LEN: usize = 96;

/// A compressed BLS public key
pub type BlsPublicKey = FixedBytes<BLS_PUBLIC_KEY_BYTES_LEN>;

/// A compressed BLS signature
pub type BlsSignature = FixedBytes<BLS_SIGNATURE_BYTES_LEN>;

/// Returns the hash tree root of a public key, merkleized as `Bytes48` (two chunks).
#[must_use]
pub fn bls_public_key_tree_hash_root(public_key: &BlsPublicKey) -> B256 {
    tree_hash::merkle_root(public_key.as_slice(), 0)
}

#[cfg(test)]
mod test {
    use super::{bls_public_key_tree_hash_root, BlsPublicKey};

    #[test]
    fn test_public_key_root_covers_second_chunk() {
        let public_key = BlsPublicKey::repeat_byte(0xaa);
        let mut tail_changed = public_key;
        tail_changed[47] = 0xab;

        assert_ne!(
            bls_public_key_tree_hash_root(&public_key),
            bls_public_key_tree_hash_root(&tail_changed)
        );
    }
}
