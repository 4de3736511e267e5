use anchor_lang::solana_program::hash::hashv;
use anchor_lang::prelude::*;

/// Verifies a sorted-pair merkle proof of `leaf` against `root`
pub fn verify(proof: Vec<[u8; 32]>, root: [u8; 32], leaf: [u8; 32]) -> bool {
    let mut computed_hash = leaf;
    for proof_element in proof.into_iter() {
        if computed_hash <= proof_element {
            // Hash(current computed hash + current element of the proof)
            computed_hash = hashv(&[&computed_hash, &proof_element]).to_bytes();
        } else {
            // Hash(current element of the proof + current computed hash)
            computed_hash = hashv(&[&proof_element, &computed_hash]).to_bytes();
        }
    }
    // Check if the computed hash (root) is equal to the provided root
    computed_hash == root
}

/// Allowlist entry for `minter`
pub fn allowlist_leaf(minter: &Pubkey) -> [u8; 32] {
    hashv(&[minter.as_ref()]).to_bytes()
}
