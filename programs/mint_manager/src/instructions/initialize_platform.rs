use anchor_lang::prelude::*;
use crate::constants::*;
use crate::event::*;
use crate::state::*;

/**
 * Account context for creating the platform config
 *
 * Creates the singleton platform config and records the bump of the mint
 * authority PDA that collections grant minting rights to.
 *
 * Access Control: Whoever calls first becomes the admin
 */
#[event_cpi]
#[derive(Accounts)]
pub struct InitializePlatform<'info> {
    /// The platform config account (PDA)
    /// - Derived from: ["platform"]
    #[account(
        init,
        payer = admin,
        space = PlatformConfig::LEN,
        seeds = [PLATFORM_SEED.as_bytes()],
        bump
    )]
    pub platform: Account<'info, PlatformConfig>,

    /// Authority that signs collection mint CPIs
    /// - Derived from: ["mint_authority"]
    /// CHECK: data-less PDA, only its address and bump are used
    #[account(
        seeds = [MINT_AUTHORITY_SEED.as_bytes()],
        bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    /// Becomes the platform admin and pays for the account
    #[account(mut)]
    pub admin: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,
}

/**
 * Initializes the platform config
 *
 * @param ctx - The account context
 * @param fee_recipient - Receiver of the platform mint fee
 * @param mint_fee_per_token - Platform fee per minted token, in lamports
 */
pub fn handle_initialize_platform(
    ctx: Context<InitializePlatform>,
    fee_recipient: Pubkey,
    mint_fee_per_token: u64,
) -> Result<()> {
    let platform = &mut ctx.accounts.platform;
    platform.initialize(
        ctx.bumps.platform,
        ctx.bumps.mint_authority,
        ctx.accounts.admin.key(),
        fee_recipient,
        mint_fee_per_token,
    )?;

    emit_cpi!(PlatformInitialized {
        platform: platform.key(),
        admin: platform.admin,
        fee_recipient,
        mint_fee_per_token,
    });

    Ok(())
}
