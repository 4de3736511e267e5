use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;
use crate::constants::*;
use crate::error::*;
use crate::mechanics::{MechanicKind, MintCall};

/**
 * Mechanic vector metadata
 *
 * Routes mints for one (collection, edition, mechanic, seed) combination to the
 * mechanic that prices and gates them.
 *
 * Derivation: ["mechanic_vector", key]
 *
 * Lifecycle:
 * 1. Created once by the collection owner through register_mechanic_vector
 * 2. Only the paused flag changes afterwards
 * 3. Never closed
 */
#[account]
#[derive(Debug)]
pub struct MechanicVectorMetadata {
    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Composite key, see `mechanic_vector_key`
    pub key: [u8; 32],

    /// Collection minted from
    pub collection: Pubkey,

    /// Edition minted from, `EDITION_SENTINEL` for collection-wide sales
    pub edition_id: u64,

    /// Mechanic address
    pub mechanic: Pubkey,

    /// Mechanic resolved from `mechanic` at registration
    pub mechanic_kind: MechanicKind,

    pub is_edition_based: bool,

    /// Buyers pick token ids instead of a count
    pub is_choose: bool,

    pub paused: bool,
}

impl MechanicVectorMetadata {
    /// Calculate the space required for this account
    pub const LEN: usize = 8 + // discriminator
        1 +  // bump
        32 + // key
        32 + // collection
        8 +  // edition_id
        32 + // mechanic
        1 +  // mechanic_kind
        1 +  // is_edition_based
        1 +  // is_choose
        1;   // paused

    pub fn edition(&self) -> Option<u64> {
        self.is_edition_based.then_some(self.edition_id)
    }

    /**
     * Gates a mint call before it reaches the mechanic
     *
     * The vector must not be paused, the call shape must match the vector's
     * count/choose mode, at least one token must be asked for and the payment
     * must cover the platform fee.
     */
    pub fn check_call(&self, call: &MintCall, payment: u64, mint_fee: u64) -> Result<()> {
        require!(!self.paused, MintManagerError::MechanicPaused);
        require!(
            self.is_choose == call.is_choose(),
            MintManagerError::InvalidMechanic
        );
        require!(call.num_tokens() > 0, MintManagerError::InvalidMint);
        require!(payment >= mint_fee, MintManagerError::MintFeeTooLow);
        Ok(())
    }
}

/// Registration input for a mechanic vector
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MechanicVectorConfig {
    pub edition_id: Option<u64>,
    pub mechanic: Pubkey,
    pub is_choose: bool,
    /// Caller-chosen, lets one collection run several vectors on one mechanic
    pub seed: u64,
}

impl MechanicVectorConfig {
    /// The sentinel stands for "no edition" in the key and cannot name one
    pub fn validate(&self) -> Result<()> {
        require!(
            self.edition_id != Some(EDITION_SENTINEL),
            MintManagerError::InvalidVectorConfig
        );
        Ok(())
    }
}

/// H(collection || edition id or sentinel (u64 BE) || mechanic || seed (u64 BE))
pub fn mechanic_vector_key(
    collection: &Pubkey,
    edition_id: Option<u64>,
    mechanic: &Pubkey,
    seed: u64,
) -> [u8; 32] {
    let edition_id = edition_id.unwrap_or(EDITION_SENTINEL);
    hashv(&[
        collection.as_ref(),
        &edition_id.to_be_bytes(),
        mechanic.as_ref(),
        &seed.to_be_bytes(),
    ])
    .to_bytes()
}
