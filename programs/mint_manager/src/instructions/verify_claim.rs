use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions as sysvar_instructions;
use crate::constants::*;
use crate::state::*;
use crate::utils::{claim_digest, load_if_initialized, preceding_ed25519_verifies};

/**
 * Account context for checking an off-chain claim without settling it
 *
 * The ledger accounts may not exist yet; a missing account reads as an unused
 * nonce and zero claimed.
 */
#[derive(Accounts)]
#[instruction(claim: OffchainClaim)]
pub struct VerifyClaim<'info> {
    /// The platform config holding the claim signer set
    #[account(
        seeds = [PLATFORM_SEED.as_bytes()],
        bump = platform.bump
    )]
    pub platform: Account<'info, PlatformConfig>,

    /// CHECK: PDA ["claim_nonce", offchain_vector_id, claim_nonce], possibly empty
    #[account(
        seeds = [
            CLAIM_NONCE_SEED.as_bytes(),
            claim.offchain_vector_id.as_ref(),
            claim.claim_nonce.as_ref()
        ],
        bump
    )]
    pub claim_nonce: UncheckedAccount<'info>,

    /// CHECK: PDA ["offchain_vector", offchain_vector_id], possibly empty
    #[account(
        seeds = [OFFCHAIN_VECTOR_SEED.as_bytes(), claim.offchain_vector_id.as_ref()],
        bump
    )]
    pub vector_claims: UncheckedAccount<'info>,

    /// CHECK: PDA ["offchain_user", offchain_vector_id, claimer], possibly empty
    #[account(
        seeds = [
            OFFCHAIN_USER_SEED.as_bytes(),
            claim.offchain_vector_id.as_ref(),
            claim.claimer.as_ref()
        ],
        bump
    )]
    pub user_claims: UncheckedAccount<'info>,

    /// CHECK: the instructions sysvar
    #[account(address = sysvar_instructions::ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,
}

/**
 * Reports whether `claim` could be settled by `claimer` right now
 *
 * Never fails on an unsettleable claim: every rejection reason maps to `false`.
 * The instruction right before this one must be the Ed25519 precompile check of
 * the signature over the claim digest.
 */
pub fn handle_verify_claim(
    ctx: Context<VerifyClaim>,
    claim: OffchainClaim,
    signature: ClaimSignature,
    claimer: Pubkey,
) -> Result<bool> {
    let platform = &ctx.accounts.platform;
    let digest = claim_digest(&crate::ID, &platform.key(), &claim);

    let env = ClaimEnvironment {
        claimer,
        now: Clock::get()?.unix_timestamp,
        signature_verified: preceding_ed25519_verifies(
            &ctx.accounts.instructions_sysvar,
            &signature.signer,
            &digest,
            &signature.signature,
        )?,
        signer_authorized: platform.is_claim_signer(&signature.signer),
    };

    let usage = ClaimUsage {
        nonce_used: load_if_initialized::<ClaimNonce>(&ctx.accounts.claim_nonce)?
            .map_or(false, |nonce| nonce.used),
        vector_claimed: load_if_initialized::<OffchainVectorClaims>(&ctx.accounts.vector_claims)?
            .map_or(0, |claims| claims.num_claimed),
        user_claimed: load_if_initialized::<OffchainUserClaims>(&ctx.accounts.user_claims)?
            .map_or(0, |claims| claims.num_claimed),
    };

    match claim.check(&env, &usage) {
        Ok(()) => Ok(true),
        Err(reason) => {
            msg!("Claim not settleable: {:?}", reason);
            Ok(false)
        }
    }
}
