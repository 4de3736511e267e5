use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::{hash, hashv};
use crate::constants::*;
use crate::state::OffchainClaim;

fn word_u64(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

fn word_i64(value: i64) -> [u8; 32] {
    let mut word = if value < 0 { [0xffu8; 32] } else { [0u8; 32] };
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Binds signatures to this program, the platform account and the collection
pub fn claim_domain_separator(program_id: &Pubkey, platform: &Pubkey, collection: &Pubkey) -> [u8; 32] {
    hashv(&[
        hash(CLAIM_DOMAIN_TYPE.as_bytes()).as_ref(),
        hash(CLAIM_DOMAIN_NAME.as_bytes()).as_ref(),
        hash(CLAIM_DOMAIN_VERSION.as_bytes()).as_ref(),
        program_id.as_ref(),
        platform.as_ref(),
        collection.as_ref(),
    ])
    .to_bytes()
}

/**
 * Typed-data hashing of off-chain claims
 *
 * Every field is written as one 32-byte word in the order of `CLAIM_TYPE`:
 * keys as their raw bytes, unsigned integers big-endian and left-padded with
 * zeros, signed integers big-endian and sign-extended, a missing edition id as
 * `EDITION_SENTINEL`. Claims naming the sentinel itself are rejected before they
 * get here. Clients must reproduce this byte for byte.
 *
 * digest = H(0x19 0x01 || domain_separator || H(CLAIM_TYPE_HASH || words...))
 */
pub fn claim_struct_hash(claim: &OffchainClaim) -> [u8; 32] {
    let type_hash = hash(CLAIM_TYPE.as_bytes());
    let edition_id = claim.edition_id.unwrap_or(EDITION_SENTINEL);

    hashv(&[
        type_hash.as_ref(),
        claim.currency.as_ref(),
        claim.collection.as_ref(),
        claim.claimer.as_ref(),
        claim.payment_recipient.as_ref(),
        &word_u64(claim.price_per_token),
        &word_u64(claim.num_tokens_to_mint as u64),
        &word_u64(claim.max_claimable_via_vector as u64),
        &word_u64(claim.max_claimable_per_user as u64),
        &word_u64(edition_id),
        &word_i64(claim.claim_expiry_timestamp),
        &claim.claim_nonce,
        &claim.offchain_vector_id,
    ])
    .to_bytes()
}

/// The message an authorized signer signs for `claim`
pub fn claim_digest(program_id: &Pubkey, platform: &Pubkey, claim: &OffchainClaim) -> [u8; 32] {
    let domain = claim_domain_separator(program_id, platform, &claim.collection);
    let struct_hash = claim_struct_hash(claim);
    hashv(&[&[0x19, 0x01], &domain, &struct_hash]).to_bytes()
}
