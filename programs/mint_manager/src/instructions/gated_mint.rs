use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions as sysvar_instructions;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::{claim_digest, preceding_ed25519_verifies, transfer_lamports, CollectionMint};

/**
 * Account context for settling an off-chain claim
 *
 * Consumes the claim nonce, bumps the off-chain vector counters, takes the
 * payment and mints. The instruction right before this one must be the Ed25519
 * precompile check of the claim signature.
 *
 * Access Control: The claimer named in the claim
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(claim: OffchainClaim)]
pub struct GatedMint<'info> {
    /// The platform config holding the claim signer set
    #[account(
        seeds = [PLATFORM_SEED.as_bytes()],
        bump = platform.bump
    )]
    pub platform: Account<'info, PlatformConfig>,

    /// Nonce record, scoped to the off-chain vector
    /// - Derived from: ["claim_nonce", offchain_vector_id, claim_nonce]
    #[account(
        init_if_needed,
        payer = claimer,
        space = ClaimNonce::LEN,
        seeds = [
            CLAIM_NONCE_SEED.as_bytes(),
            claim.offchain_vector_id.as_ref(),
            claim.claim_nonce.as_ref()
        ],
        bump
    )]
    pub claim_nonce: Account<'info, ClaimNonce>,

    /// Tokens claimed through the off-chain vector
    /// - Derived from: ["offchain_vector", offchain_vector_id]
    #[account(
        init_if_needed,
        payer = claimer,
        space = OffchainVectorClaims::LEN,
        seeds = [OFFCHAIN_VECTOR_SEED.as_bytes(), claim.offchain_vector_id.as_ref()],
        bump
    )]
    pub vector_claims: Account<'info, OffchainVectorClaims>,

    /// Tokens claimed through the off-chain vector by this claimer
    /// - Derived from: ["offchain_user", offchain_vector_id, claimer]
    #[account(
        init_if_needed,
        payer = claimer,
        space = OffchainUserClaims::LEN,
        seeds = [
            OFFCHAIN_USER_SEED.as_bytes(),
            claim.offchain_vector_id.as_ref(),
            claimer.key().as_ref()
        ],
        bump
    )]
    pub user_claims: Account<'info, OffchainUserClaims>,

    /// Claimer, pays the sale price, the platform fee and the ledger rent
    #[account(mut)]
    pub claimer: Signer<'info>,

    /// CHECK: pinned to the claim's payment recipient
    #[account(mut, address = claim.payment_recipient @ MintManagerError::InvalidClaim)]
    pub payment_recipient: UncheckedAccount<'info>,

    /// CHECK: pinned to the platform fee recipient
    #[account(mut, address = platform.fee_recipient @ MintManagerError::InvalidPlatformConfig)]
    pub fee_recipient: UncheckedAccount<'info>,

    /// CHECK: pinned to the claim's collection
    #[account(mut, address = claim.collection @ MintManagerError::InvalidCollection)]
    pub collection: UncheckedAccount<'info>,

    /// CHECK: must own `collection`, checked before the CPI
    pub collection_program: UncheckedAccount<'info>,

    /// CHECK: PDA signing the mint CPI
    #[account(
        seeds = [MINT_AUTHORITY_SEED.as_bytes()],
        bump = platform.mint_authority_bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    /// CHECK: only receives the minted tokens
    pub recipient: UncheckedAccount<'info>,

    /// CHECK: the instructions sysvar
    #[account(address = sysvar_instructions::ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,

    /// System program for payments and account creation
    pub system_program: Program<'info, System>,
}

/**
 * Settles an off-chain claim and mints
 *
 * @param ctx - The account context
 * @param claim - The signed claim
 * @param signature - Signer and signature, also checked by the preceding Ed25519 instruction
 * @param payment - Lamports the claimer pays; must equal price * n + fee * n
 * @param token_ids - Ids to mint for choose-style collections, one per token
 *
 * The checks are the ones verify_claim runs; any failure is InvalidClaim.
 */
pub fn handle_gated_mint<'info>(
    ctx: Context<'_, '_, 'info, 'info, GatedMint<'info>>,
    claim: OffchainClaim,
    signature: ClaimSignature,
    payment: u64,
    token_ids: Option<Vec<u64>>,
) -> Result<()> {
    // ===== VALIDATION PHASE =====

    if let Some(token_ids) = &token_ids {
        require!(
            token_ids.len() == claim.num_tokens_to_mint as usize,
            MintManagerError::InvalidMint
        );
    }

    let platform = &ctx.accounts.platform;
    let digest = claim_digest(&crate::ID, &platform.key(), &claim);
    let env = ClaimEnvironment {
        claimer: ctx.accounts.claimer.key(),
        now: Clock::get()?.unix_timestamp,
        signature_verified: preceding_ed25519_verifies(
            &ctx.accounts.instructions_sysvar,
            &signature.signer,
            &digest,
            &signature.signature,
        )?,
        signer_authorized: platform.is_claim_signer(&signature.signer),
    };

    // ===== EFFECTS PHASE =====

    let sale_amount = claim.settle(
        &env,
        &mut ctx.accounts.claim_nonce,
        &mut ctx.accounts.vector_claims,
        &mut ctx.accounts.user_claims,
    )?;

    let mint_fee = platform.mint_fee(claim.num_tokens_to_mint)?;
    let amount_due = sale_amount
        .checked_add(mint_fee)
        .ok_or(MintManagerError::ArithmeticOverflow)?;
    require!(payment == amount_due, MintManagerError::InvalidPaymentAmount);

    // ===== INTERACTIONS PHASE =====

    transfer_lamports(
        ctx.accounts.claimer.to_account_info(),
        ctx.accounts.payment_recipient.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        sale_amount,
    )?;
    transfer_lamports(
        ctx.accounts.claimer.to_account_info(),
        ctx.accounts.fee_recipient.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        mint_fee,
    )?;

    let collection_mint = CollectionMint {
        collection_program: &ctx.accounts.collection_program.to_account_info(),
        collection: &ctx.accounts.collection.to_account_info(),
        mint_authority: &ctx.accounts.mint_authority.to_account_info(),
        mint_authority_bump: platform.mint_authority_bump,
        recipient: &ctx.accounts.recipient.to_account_info(),
        remaining_accounts: ctx.remaining_accounts,
    };
    match &token_ids {
        Some(token_ids) => collection_mint.mint_chosen(claim.edition_id, token_ids)?,
        None => {
            collection_mint.mint_amount(claim.edition_id, claim.num_tokens_to_mint)?;
        }
    }

    emit_cpi!(OffchainClaimSettled {
        offchain_vector_id: claim.offchain_vector_id,
        claim_nonce: claim.claim_nonce,
        claimer: ctx.accounts.claimer.key(),
        recipient: ctx.accounts.recipient.key(),
        collection: claim.collection,
        num_tokens: claim.num_tokens_to_mint,
        sale_amount,
        mint_fee,
    });

    Ok(())
}
