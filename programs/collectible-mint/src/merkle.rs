use crate::constants::MAX_PROOF_DEPTH;
use anchor_lang::prelude::*;
use sha3::{Digest, Keccak256};

// ============================================================================
// ALLOW-LIST MEMBERSHIP PROOFS
// ============================================================================
//
// Leaf:     keccak256(address bytes)          (32 bytes, no separators)
// Node:     keccak256(min(a, b) || max(a, b)) (byte-wise comparison)
//
// Sorting each pair makes proofs independent of which side a sibling sits on.
// The off-chain builder in `allow_list_tree` must apply the same rules.
//
// ============================================================================

pub const DIGEST_LEN: usize = 32;

/// Leaf digest for an allow-list member
pub fn hash_leaf(address: &Pubkey) -> [u8; 32] {
    Keccak256::digest(address.as_ref()).into()
}

/// Parent digest of two children, order-independent
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(lo);
    hasher.update(hi);
    hasher.finalize().into()
}

/// Returns true if `leaf` folds up to `root` through `proof`
pub fn verify(leaf: &[u8; 32], proof: &[[u8; 32]], root: &[u8; 32]) -> bool {
    if proof.len() > MAX_PROOF_DEPTH {
        return false;
    }

    let computed = proof
        .iter()
        .fold(*leaf, |current, sibling| hash_pair(&current, sibling));
    computed == *root
}

/// Like [`verify`], for a proof packed as concatenated 32-byte digests.
///
/// A length that is not a multiple of the digest width is rejected.
pub fn verify_packed(leaf: &[u8; 32], proof: &[u8], root: &[u8; 32]) -> bool {
    match unpack_proof(proof) {
        Some(siblings) => verify(leaf, &siblings, root),
        None => false,
    }
}

fn unpack_proof(bytes: &[u8]) -> Option<Vec<[u8; 32]>> {
    if bytes.len() % DIGEST_LEN != 0 {
        return None;
    }

    bytes
        .chunks_exact(DIGEST_LEN)
        .map(|chunk| chunk.try_into().ok())
        .collect()
}
