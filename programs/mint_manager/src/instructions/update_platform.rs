use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;

/**
 * Account context for admin changes to the platform config
 *
 * Shared by update_platform and set_claim_signer.
 *
 * Access Control: Platform admin only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct UpdatePlatform<'info> {
    /// The platform config account
    #[account(
        mut,
        seeds = [PLATFORM_SEED.as_bytes()],
        bump = platform.bump,
        has_one = admin @ MintManagerError::Unauthorized
    )]
    pub platform: Account<'info, PlatformConfig>,

    /// Current platform admin
    pub admin: Signer<'info>,
}

/**
 * Changes the admin, the fee recipient or the mint fee
 *
 * Only the fields set in `params` are written.
 */
pub fn handle_update_platform(ctx: Context<UpdatePlatform>, params: PlatformUpdateParams) -> Result<()> {
    let platform = &mut ctx.accounts.platform;
    platform.update(&params)?;

    emit_cpi!(PlatformUpdated {
        platform: platform.key(),
        admin: platform.admin,
        fee_recipient: platform.fee_recipient,
        mint_fee_per_token: platform.mint_fee_per_token,
    });

    Ok(())
}

/// Adds (`authorized = true`) or removes a key from the claim signer set
pub fn handle_set_claim_signer(
    ctx: Context<UpdatePlatform>,
    signer: Pubkey,
    authorized: bool,
) -> Result<()> {
    ctx.accounts.platform.set_claim_signer(signer, authorized)?;

    emit_cpi!(ClaimSignerSet { signer, authorized });

    Ok(())
}
