use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::debit_escrow;

/**
 * Account context for releasing the payee revenue of a dutch auction
 *
 * Access Control: Anyone; the funds always go to the auction's payment recipient
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(key: [u8; 32])]
pub struct WithdrawDppFunds<'info> {
    /// Auction state and escrow
    /// - Derived from: ["dutch_auction", key]
    #[account(
        mut,
        seeds = [DUTCH_AUCTION_SEED.as_bytes(), key.as_ref()],
        bump = dutch_auction.bump
    )]
    pub dutch_auction: Account<'info, DutchAuctionVector>,

    /// CHECK: pinned to the auction's payment recipient
    #[account(
        mut,
        address = dutch_auction.payment_recipient @ MintManagerError::InvalidDppFundsWithdrawal
    )]
    pub payment_recipient: UncheckedAccount<'info>,
}

/**
 * Pays the recipient clearing price times supply, once
 *
 * Allowed after exhaustion or inside the fixed price plateau. From then on
 * purchases pay the recipient directly.
 */
pub fn handle_withdraw_dpp_funds(ctx: Context<WithdrawDppFunds>, key: [u8; 32]) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // ===== EFFECTS PHASE =====

    let dutch_auction = &mut ctx.accounts.dutch_auction;
    let amount = dutch_auction.withdraw_dpp_funds(now)?;
    let clearing_price = dutch_auction.settlement_price(now)?;

    // ===== INTERACTIONS PHASE =====

    debit_escrow(
        &ctx.accounts.dutch_auction.to_account_info(),
        &ctx.accounts.payment_recipient.to_account_info(),
        amount,
    )?;

    emit_cpi!(DppFundsWithdrawn {
        key,
        payment_recipient: ctx.accounts.payment_recipient.key(),
        amount,
        clearing_price,
    });

    Ok(())
}
