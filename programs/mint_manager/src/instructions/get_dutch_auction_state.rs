use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;
use crate::utils::load_if_initialized;

/// Account context for reading a dutch auction
#[derive(Accounts)]
#[instruction(key: [u8; 32])]
pub struct GetDutchAuctionVectorState<'info> {
    /// - Derived from: ["dutch_auction", key]
    #[account(
        seeds = [DUTCH_AUCTION_SEED.as_bytes(), key.as_ref()],
        bump = dutch_auction.bump
    )]
    pub dutch_auction: Account<'info, DutchAuctionVector>,
}

/// Returns the auction config, live price, supply and escrow flags
pub fn handle_get_dutch_auction_vector_state(
    ctx: Context<GetDutchAuctionVectorState>,
    _key: [u8; 32],
) -> Result<DutchAuctionVectorState> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.dutch_auction.state(now)
}

/// Account context for reading a buyer's auction record
#[derive(Accounts)]
#[instruction(key: [u8; 32], buyer: Pubkey)]
pub struct GetDutchAuctionUserInfo<'info> {
    /// - Derived from: ["dutch_auction", key]
    #[account(
        seeds = [DUTCH_AUCTION_SEED.as_bytes(), key.as_ref()],
        bump = dutch_auction.bump
    )]
    pub dutch_auction: Account<'info, DutchAuctionVector>,

    /// CHECK: PDA ["auction_user", key, buyer], empty if the buyer never bought
    #[account(
        seeds = [AUCTION_USER_SEED.as_bytes(), key.as_ref(), buyer.as_ref()],
        bump
    )]
    pub auction_user: UncheckedAccount<'info>,
}

/// Returns the buyer's record, with the pending rebate computed at read time
pub fn handle_get_dutch_auction_user_info(
    ctx: Context<GetDutchAuctionUserInfo>,
    _key: [u8; 32],
    _buyer: Pubkey,
) -> Result<UserAuctionInfoView> {
    let now = Clock::get()?.unix_timestamp;
    let user = load_if_initialized::<UserAuctionInfo>(&ctx.accounts.auction_user)?.unwrap_or_default();
    ctx.accounts.dutch_auction.user_info(now, &user)
}
