use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/**
 * Off-chain claim
 *
 * A mint authorization produced and signed by a platform claim signer. Never
 * stored: the program only persists the nonce and the running counters of the
 * off-chain vector the claim belongs to.
 */
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct OffchainClaim {
    /// Payment currency, `Pubkey::default()` for native lamports
    pub currency: Pubkey,
    /// Collection the claim mints from
    pub collection: Pubkey,
    /// Only this key may settle the claim
    pub claimer: Pubkey,
    /// Receives the sale price
    pub payment_recipient: Pubkey,
    pub price_per_token: u64,
    pub num_tokens_to_mint: u32,
    /// Cap over all claims of the off-chain vector, 0 for unlimited
    pub max_claimable_via_vector: u32,
    /// Cap per claimer over the off-chain vector, 0 for unlimited
    pub max_claimable_per_user: u32,
    pub edition_id: Option<u64>,
    /// Opaque id grouping claims that share caps and nonce space
    pub offchain_vector_id: [u8; 32],
    /// Single use within `offchain_vector_id`
    pub claim_nonce: [u8; 32],
    pub claim_expiry_timestamp: i64,
}

/// Ed25519 signature over the claim digest, with the key that produced it
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClaimSignature {
    pub signer: Pubkey,
    pub signature: [u8; 64],
}

/// Why a claim is not currently settleable
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimRejection {
    InvalidSignature,
    UnauthorizedSigner,
    ClaimerMismatch,
    UnsupportedCurrency,
    ZeroTokens,
    InvalidEdition,
    Expired,
    NonceUsed,
    VectorCapExceeded,
    UserCapExceeded,
}

/// Transaction-level facts a claim is checked against
#[derive(Clone, Copy, Debug)]
pub struct ClaimEnvironment {
    pub claimer: Pubkey,
    pub now: i64,
    /// The signature was checked by the Ed25519 precompile over the claim digest
    pub signature_verified: bool,
    pub signer_authorized: bool,
}

/// Persisted usage of the claim's off-chain vector
#[derive(Clone, Copy, Debug, Default)]
pub struct ClaimUsage {
    pub nonce_used: bool,
    pub vector_claimed: u32,
    pub user_claimed: u32,
}

impl OffchainClaim {
    /// The single predicate behind both `verify_claim` and `gated_mint`
    pub fn check(
        &self,
        env: &ClaimEnvironment,
        usage: &ClaimUsage,
    ) -> std::result::Result<(), ClaimRejection> {
        if !env.signature_verified {
            return Err(ClaimRejection::InvalidSignature);
        }
        if !env.signer_authorized {
            return Err(ClaimRejection::UnauthorizedSigner);
        }
        if env.claimer != self.claimer {
            return Err(ClaimRejection::ClaimerMismatch);
        }
        if self.currency != Pubkey::default() {
            return Err(ClaimRejection::UnsupportedCurrency);
        }
        if self.num_tokens_to_mint == 0 {
            return Err(ClaimRejection::ZeroTokens);
        }
        // Signed as the sentinel word, indistinguishable from no edition
        if self.edition_id == Some(EDITION_SENTINEL) {
            return Err(ClaimRejection::InvalidEdition);
        }
        if env.now > self.claim_expiry_timestamp {
            return Err(ClaimRejection::Expired);
        }
        if usage.nonce_used {
            return Err(ClaimRejection::NonceUsed);
        }
        if exceeds_cap(usage.vector_claimed, self.num_tokens_to_mint, self.max_claimable_via_vector) {
            return Err(ClaimRejection::VectorCapExceeded);
        }
        if exceeds_cap(usage.user_claimed, self.num_tokens_to_mint, self.max_claimable_per_user) {
            return Err(ClaimRejection::UserCapExceeded);
        }
        Ok(())
    }

    /**
     * Consumes the claim: re-runs `check` against the ledger accounts, then marks
     * the nonce used and bumps both counters. Nothing is written on rejection.
     *
     * Returns the sale price owed for the claim.
     */
    pub fn settle(
        &self,
        env: &ClaimEnvironment,
        nonce: &mut ClaimNonce,
        vector_claims: &mut OffchainVectorClaims,
        user_claims: &mut OffchainUserClaims,
    ) -> Result<u64> {
        let usage = ClaimUsage {
            nonce_used: nonce.used,
            vector_claimed: vector_claims.num_claimed,
            user_claimed: user_claims.num_claimed,
        };
        if let Err(reason) = self.check(env, &usage) {
            msg!("Claim rejected: {:?}", reason);
            return err!(MintManagerError::InvalidClaim);
        }

        let price = self
            .price_per_token
            .checked_mul(self.num_tokens_to_mint as u64)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        let vector_claimed = vector_claims
            .num_claimed
            .checked_add(self.num_tokens_to_mint)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        let user_claimed = user_claims
            .num_claimed
            .checked_add(self.num_tokens_to_mint)
            .ok_or(MintManagerError::ArithmeticOverflow)?;

        nonce.used = true;
        vector_claims.num_claimed = vector_claimed;
        user_claims.num_claimed = user_claimed;
        Ok(price)
    }
}

fn exceeds_cap(claimed: u32, requested: u32, cap: u32) -> bool {
    if cap == 0 {
        return false;
    }
    match claimed.checked_add(requested) {
        Some(total) => total > cap,
        None => true,
    }
}

/// Consumed nonce marker
/// Derivation: ["claim_nonce", offchain_vector_id, claim_nonce]
#[account]
#[derive(Default, Debug)]
pub struct ClaimNonce {
    pub used: bool,
}

impl ClaimNonce {
    pub const LEN: usize = 8 + std::mem::size_of::<ClaimNonce>();
}

/// Tokens claimed through an off-chain vector, by everyone
/// Derivation: ["offchain_vector", offchain_vector_id]
#[account]
#[derive(Default, Debug)]
pub struct OffchainVectorClaims {
    pub num_claimed: u32,
}

impl OffchainVectorClaims {
    pub const LEN: usize = 8 + std::mem::size_of::<OffchainVectorClaims>();
}

/// Tokens claimed through an off-chain vector by one claimer
/// Derivation: ["offchain_user", offchain_vector_id, claimer]
#[account]
#[derive(Default, Debug)]
pub struct OffchainUserClaims {
    pub num_claimed: u32,
}

impl OffchainUserClaims {
    pub const LEN: usize = 8 + std::mem::size_of::<OffchainUserClaims>();
}
