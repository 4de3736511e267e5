use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::{debit_escrow, load_if_initialized};

/**
 * Account context for paying a buyer their auction rebate
 *
 * Access Control: Anyone; the rebate always goes to the buyer
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(key: [u8; 32])]
pub struct RebateCollector<'info> {
    /// Auction state and escrow
    /// - Derived from: ["dutch_auction", key]
    #[account(
        mut,
        seeds = [DUTCH_AUCTION_SEED.as_bytes(), key.as_ref()],
        bump = dutch_auction.bump
    )]
    pub dutch_auction: Account<'info, DutchAuctionVector>,

    /// CHECK: the buyer's auction record, empty if they never bought
    /// - Derived from: ["auction_user", key, buyer]
    #[account(
        mut,
        seeds = [AUCTION_USER_SEED.as_bytes(), key.as_ref(), buyer.key().as_ref()],
        bump
    )]
    pub auction_user: UncheckedAccount<'info>,

    /// CHECK: receives the rebate, bound to the record through its seeds
    #[account(mut)]
    pub buyer: UncheckedAccount<'info>,
}

/**
 * Pays the buyer what they posted above the settlement price of their tokens
 *
 * Fails with CollectorNotOwedRebate when nothing is owed, so a second call
 * without a price change in between always fails.
 */
pub fn handle_rebate_collector(ctx: Context<RebateCollector>, key: [u8; 32]) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // ===== EFFECTS PHASE =====

    let mut auction_user = load_auction_user(&ctx.accounts.auction_user)?;
    let amount = ctx.accounts.dutch_auction.collect_rebate(now, &mut auction_user)?;
    let num_rebates = auction_user.num_rebates;

    let mut data = ctx.accounts.auction_user.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    auction_user.try_serialize(&mut writer)?;
    drop(data);

    // ===== INTERACTIONS PHASE =====

    debit_escrow(
        &ctx.accounts.dutch_auction.to_account_info(),
        &ctx.accounts.buyer.to_account_info(),
        amount,
    )?;

    emit_cpi!(RebateCollected {
        key,
        buyer: ctx.accounts.buyer.key(),
        amount,
        num_rebates,
    });

    Ok(())
}

/// A buyer without a record has never posted anything, so is owed nothing
pub fn load_auction_user(info: &AccountInfo) -> Result<UserAuctionInfo> {
    load_if_initialized::<UserAuctionInfo>(info)?
        .ok_or_else(|| error!(MintManagerError::CollectorNotOwedRebate))
}
