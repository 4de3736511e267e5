use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::require_collection_owner;

/**
 * Account context for owner changes to a dutch auction
 *
 * Access Control: Owner of the vector's collection only
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(key: [u8; 32])]
pub struct UpdateDutchAuctionVector<'info> {
    /// - Derived from: ["mechanic_vector", key]
    #[account(
        seeds = [MECHANIC_VECTOR_SEED.as_bytes(), key.as_ref()],
        bump = mechanic_vector.bump
    )]
    pub mechanic_vector: Account<'info, MechanicVectorMetadata>,

    /// - Derived from: ["dutch_auction", key]
    #[account(
        mut,
        seeds = [DUTCH_AUCTION_SEED.as_bytes(), key.as_ref()],
        bump = dutch_auction.bump
    )]
    pub dutch_auction: Account<'info, DutchAuctionVector>,

    /// CHECK: address pinned to the vector, owner read in the handler
    #[account(address = mechanic_vector.collection @ MintManagerError::InvalidCollection)]
    pub collection: UncheckedAccount<'info>,

    /// Collection owner
    pub owner: Signer<'info>,
}

/**
 * Overwrites the auction fields named by `update_mask`
 *
 * @param ctx - The account context
 * @param key - Mechanic vector key
 * @param config - New values; only masked fields are read
 * @param update_mask - Bit per field, see the AUCTION_UPDATE_* constants
 *
 * Schedule, total cap and prices cannot change once a token has sold.
 */
pub fn handle_update_dutch_auction_vector(
    ctx: Context<UpdateDutchAuctionVector>,
    key: [u8; 32],
    config: DutchAuctionConfig,
    update_mask: u16,
) -> Result<()> {
    require_collection_owner(&ctx.accounts.collection, &ctx.accounts.owner.key())?;

    let dutch_auction = &mut ctx.accounts.dutch_auction;
    let escrow = dutch_auction.key();
    dutch_auction.apply_update(&config, update_mask, &escrow)?;

    emit_cpi!(DutchAuctionVectorUpdated { key, update_mask });

    Ok(())
}
