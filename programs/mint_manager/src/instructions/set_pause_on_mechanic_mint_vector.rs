use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::require_collection_owner;

/**
 * Account context for pausing a mechanic vector
 *
 * Access Control: Owner of the vector's collection only
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(key: [u8; 32])]
pub struct SetPauseOnMechanicMintVector<'info> {
    /// - Derived from: ["mechanic_vector", key]
    #[account(
        mut,
        seeds = [MECHANIC_VECTOR_SEED.as_bytes(), key.as_ref()],
        bump = mechanic_vector.bump
    )]
    pub mechanic_vector: Account<'info, MechanicVectorMetadata>,

    /// CHECK: address pinned to the vector, owner read in the handler
    #[account(address = mechanic_vector.collection @ MintManagerError::InvalidCollection)]
    pub collection: UncheckedAccount<'info>,

    /// Collection owner
    pub owner: Signer<'info>,
}

/// Pauses or unpauses mints through the mechanic vector, effective immediately
pub fn handle_set_pause_on_mechanic_mint_vector(
    ctx: Context<SetPauseOnMechanicMintVector>,
    key: [u8; 32],
    paused: bool,
) -> Result<()> {
    require_collection_owner(&ctx.accounts.collection, &ctx.accounts.owner.key())?;

    ctx.accounts.mechanic_vector.paused = paused;

    emit_cpi!(MechanicVectorPauseSet { key, paused });

    Ok(())
}
