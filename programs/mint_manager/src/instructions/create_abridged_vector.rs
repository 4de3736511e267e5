use anchor_lang::prelude::*;
use crate::constants::*;
use crate::event::*;
use crate::state::*;
use crate::utils::require_collection_owner;

/**
 * Account context for creating an abridged vector
 *
 * The vector id is taken from the platform counter, so the vector PDA is
 * derived from the id the platform will hand out next.
 *
 * Access Control: Collection owner only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct CreateAbridgedVector<'info> {
    /// The platform config holding the vector id counter
    #[account(
        mut,
        seeds = [PLATFORM_SEED.as_bytes()],
        bump = platform.bump
    )]
    pub platform: Account<'info, PlatformConfig>,

    /// The new vector (PDA)
    /// - Derived from: ["vector", next_vector_id]
    #[account(
        init,
        payer = owner,
        space = AbridgedVector::LEN,
        seeds = [VECTOR_SEED.as_bytes(), platform.next_vector_id.to_le_bytes().as_ref()],
        bump
    )]
    pub vector: Account<'info, AbridgedVector>,

    /// Collection the vector mints from
    /// CHECK: owner read from the account data in the handler
    pub collection: UncheckedAccount<'info>,

    /// Collection owner, pays for the vector account
    #[account(mut)]
    pub owner: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,
}

/**
 * Creates an abridged vector for a collection
 *
 * @param ctx - The account context
 * @param config - Schedule, price, caps, payment recipient and allowlist root
 * @returns the id of the new vector
 */
pub fn handle_create_abridged_vector(
    ctx: Context<CreateAbridgedVector>,
    config: AbridgedVectorConfig,
) -> Result<u64> {
    // ===== VALIDATION PHASE =====

    require_collection_owner(&ctx.accounts.collection, &ctx.accounts.owner.key())?;

    // ===== EFFECTS PHASE =====

    let vector_id = ctx.accounts.platform.take_vector_id()?;
    let vector = &mut ctx.accounts.vector;
    vector.initialize(
        ctx.bumps.vector,
        vector_id,
        ctx.accounts.collection.key(),
        &config,
    )?;

    emit_cpi!(AbridgedVectorCreated {
        vector_id,
        vector: vector.key(),
        collection: vector.collection,
        edition_id: vector.edition(),
    });

    Ok(vector_id)
}
