use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::{allowlist_leaf, transfer_lamports, verify, CollectionMint};

/**
 * Account context for minting through an abridged vector
 *
 * The minter pays the sale price to the vector's payment recipient and the
 * platform fee to the fee recipient, then the collection mints to `recipient`.
 * Any remaining accounts are forwarded to the collection program.
 *
 * Access Control: Anyone, subject to the vector's schedule, caps and allowlist
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(vector_id: u64)]
pub struct VectorMint<'info> {
    /// The platform config
    #[account(
        seeds = [PLATFORM_SEED.as_bytes()],
        bump = platform.bump
    )]
    pub platform: Account<'info, PlatformConfig>,

    /// The vector minted through
    /// - Derived from: ["vector", vector_id]
    #[account(
        mut,
        seeds = [VECTOR_SEED.as_bytes(), vector_id.to_le_bytes().as_ref()],
        bump = vector.bump
    )]
    pub vector: Account<'info, AbridgedVector>,

    /// Claims of this minter on the vector
    /// - Derived from: ["vector_user", vector_id, minter]
    #[account(
        init_if_needed,
        payer = minter,
        space = VectorUserClaims::LEN,
        seeds = [
            VECTOR_USER_SEED.as_bytes(),
            vector_id.to_le_bytes().as_ref(),
            minter.key().as_ref()
        ],
        bump
    )]
    pub user_claims: Account<'info, VectorUserClaims>,

    /// Buyer, pays the sale price and the platform fee
    #[account(mut)]
    pub minter: Signer<'info>,

    /// CHECK: pinned to the vector's payment recipient
    #[account(mut, address = vector.payment_recipient @ MintManagerError::InvalidVectorConfig)]
    pub payment_recipient: UncheckedAccount<'info>,

    /// CHECK: pinned to the platform fee recipient
    #[account(mut, address = platform.fee_recipient @ MintManagerError::InvalidPlatformConfig)]
    pub fee_recipient: UncheckedAccount<'info>,

    /// CHECK: pinned to the vector's collection
    #[account(mut, address = vector.collection @ MintManagerError::InvalidCollection)]
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

    /// System program for payments and account creation
    pub system_program: Program<'info, System>,
}

/**
 * Mints `num_tokens` through an abridged vector
 *
 * @param ctx - The account context
 * @param vector_id - Id of the vector
 * @param num_tokens - Number of tokens to mint
 * @param payment - Lamports the minter pays; must equal price * n + fee * n
 * @param proof - Allowlist proof of hash(minter), empty when no allowlist is set
 * @returns the first token id minted by the collection
 *
 * Validation Process:
 * 1. Allowlist proof, when the vector has an allowlist
 * 2. Schedule, pause flag and caps (checked and recorded together)
 * 3. Exact payment
 */
pub fn handle_vector_mint<'info>(
    ctx: Context<'_, '_, 'info, 'info, VectorMint<'info>>,
    vector_id: u64,
    num_tokens: u32,
    payment: u64,
    proof: Vec<[u8; 32]>,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let vector = &mut ctx.accounts.vector;
    let user_claims = &mut ctx.accounts.user_claims;

    // ===== VALIDATION PHASE =====

    if vector.has_allowlist() {
        require!(
            verify(proof, vector.allowlist_root, allowlist_leaf(&ctx.accounts.minter.key())),
            MintManagerError::AllowlistInvalid
        );
    }

    // ===== EFFECTS PHASE =====

    let sale_amount = vector.record_claim(now, num_tokens, user_claims.num_claimed)?;
    user_claims.num_claimed = user_claims
        .num_claimed
        .checked_add(num_tokens)
        .ok_or(MintManagerError::ArithmeticOverflow)?;

    let mint_fee = ctx.accounts.platform.mint_fee(num_tokens)?;
    let amount_due = sale_amount
        .checked_add(mint_fee)
        .ok_or(MintManagerError::ArithmeticOverflow)?;
    require!(payment == amount_due, MintManagerError::InvalidPaymentAmount);

    let edition_id = vector.edition();
    let total_claimed = vector.total_claimed;

    // ===== INTERACTIONS PHASE =====

    transfer_lamports(
        ctx.accounts.minter.to_account_info(),
        ctx.accounts.payment_recipient.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        sale_amount,
    )?;
    transfer_lamports(
        ctx.accounts.minter.to_account_info(),
        ctx.accounts.fee_recipient.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        mint_fee,
    )?;

    let first_token_id = CollectionMint {
        collection_program: &ctx.accounts.collection_program.to_account_info(),
        collection: &ctx.accounts.collection.to_account_info(),
        mint_authority: &ctx.accounts.mint_authority.to_account_info(),
        mint_authority_bump: ctx.accounts.platform.mint_authority_bump,
        recipient: &ctx.accounts.recipient.to_account_info(),
        remaining_accounts: ctx.remaining_accounts,
    }
    .mint_amount(edition_id, num_tokens)?;

    emit_cpi!(VectorMinted {
        vector_id,
        minter: ctx.accounts.minter.key(),
        recipient: ctx.accounts.recipient.key(),
        num_tokens,
        first_token_id,
        sale_amount,
        mint_fee,
        total_claimed,
    });

    Ok(first_token_id)
}
