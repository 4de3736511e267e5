use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::mechanics::*;
use crate::state::*;
use crate::utils::{transfer_lamports, CollectionMint};

/**
 * Account context for minting through a mechanic vector
 *
 * Shared by mechanic_mint_by_count and mechanic_mint_by_choice. The platform fee
 * is taken first; the rest of the payment is handed to the mechanic, which says
 * how much of it stays in escrow and how much goes to its payment recipient.
 * Any remaining accounts are forwarded to the collection program.
 *
 * Access Control: Anyone, subject to the mechanic's rules
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(key: [u8; 32])]
pub struct MechanicMint<'info> {
    /// The platform config
    #[account(
        seeds = [PLATFORM_SEED.as_bytes()],
        bump = platform.bump
    )]
    pub platform: Account<'info, PlatformConfig>,

    /// Routing metadata of the vector
    /// - Derived from: ["mechanic_vector", key]
    #[account(
        seeds = [MECHANIC_VECTOR_SEED.as_bytes(), key.as_ref()],
        bump = mechanic_vector.bump
    )]
    pub mechanic_vector: Account<'info, MechanicVectorMetadata>,

    /// Auction state and escrow
    /// - Derived from: ["dutch_auction", key]
    #[account(
        mut,
        seeds = [DUTCH_AUCTION_SEED.as_bytes(), key.as_ref()],
        bump = dutch_auction.bump
    )]
    pub dutch_auction: Account<'info, DutchAuctionVector>,

    /// The minter's auction record
    /// - Derived from: ["auction_user", key, minter]
    #[account(
        init_if_needed,
        payer = minter,
        space = UserAuctionInfo::LEN,
        seeds = [AUCTION_USER_SEED.as_bytes(), key.as_ref(), minter.key().as_ref()],
        bump
    )]
    pub auction_user: Account<'info, UserAuctionInfo>,

    /// Buyer, pays the platform fee and the mechanic payment
    #[account(mut)]
    pub minter: Signer<'info>,

    /// CHECK: compared with the recipient the mechanic names
    #[account(mut)]
    pub payment_recipient: UncheckedAccount<'info>,

    /// CHECK: pinned to the platform fee recipient
    #[account(mut, address = platform.fee_recipient @ MintManagerError::InvalidPlatformConfig)]
    pub fee_recipient: UncheckedAccount<'info>,

    /// CHECK: pinned to the vector's collection
    #[account(mut, address = mechanic_vector.collection @ MintManagerError::InvalidCollection)]
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
 * Mints `num_to_mint` tokens through a count-style mechanic vector
 *
 * @param ctx - The account context
 * @param key - Mechanic vector key
 * @param num_to_mint - Number of tokens
 * @param payment - Lamports the minter pays, platform fee included
 * @param data - Passed to the mechanic untouched
 * @returns the first token id minted by the collection
 */
pub fn handle_mechanic_mint_by_count<'info>(
    ctx: Context<'_, '_, 'info, 'info, MechanicMint<'info>>,
    key: [u8; 32],
    num_to_mint: u32,
    payment: u64,
    data: Vec<u8>,
) -> Result<u64> {
    let (outcome, mint_fee) = process_mechanic_mint(
        ctx.accounts,
        key,
        &MintCall::Count(num_to_mint),
        payment,
        &data,
    )?;

    let first_token_id = collection_mint(&ctx.accounts, ctx.remaining_accounts)
        .mint_amount(ctx.accounts.mechanic_vector.edition(), outcome.num_minted)?;

    emit_cpi!(MechanicMinted {
        key,
        minter: ctx.accounts.minter.key(),
        recipient: ctx.accounts.recipient.key(),
        num_minted: outcome.num_minted,
        escrowed: outcome.escrowed,
        paid_to_recipient: outcome.paid_to_recipient,
        mint_fee,
    });

    Ok(first_token_id)
}

/**
 * Mints the chosen `token_ids` through a choose-style mechanic vector
 *
 * Same parameters as mechanic_mint_by_count, with the ids in place of a count.
 */
pub fn handle_mechanic_mint_by_choice<'info>(
    ctx: Context<'_, '_, 'info, 'info, MechanicMint<'info>>,
    key: [u8; 32],
    token_ids: Vec<u64>,
    payment: u64,
    data: Vec<u8>,
) -> Result<()> {
    let (outcome, mint_fee) = process_mechanic_mint(
        ctx.accounts,
        key,
        &MintCall::Choose(token_ids),
        payment,
        &data,
    )?;

    collection_mint(&ctx.accounts, ctx.remaining_accounts)
        .mint_chosen(ctx.accounts.mechanic_vector.edition(), &outcome.token_ids)?;

    emit_cpi!(MechanicMinted {
        key,
        minter: ctx.accounts.minter.key(),
        recipient: ctx.accounts.recipient.key(),
        num_minted: outcome.num_minted,
        escrowed: outcome.escrowed,
        paid_to_recipient: outcome.paid_to_recipient,
        mint_fee,
    });

    Ok(())
}

/// Validates the call, runs the mechanic and moves the lamports it asked for
fn process_mechanic_mint(
    accounts: &mut MechanicMint,
    key: [u8; 32],
    call: &MintCall,
    payment: u64,
    data: &[u8],
) -> Result<(MechanicMintOutcome, u64)> {
    // ===== VALIDATION PHASE =====

    let mechanic_vector = &accounts.mechanic_vector;
    let num_tokens = u32::try_from(call.num_tokens()).map_err(|_| MintManagerError::InvalidMint)?;
    let mint_fee = accounts.platform.mint_fee(num_tokens)?;
    mechanic_vector.check_call(call, payment, mint_fee)?;

    let request = MechanicMintRequest {
        key,
        payment: payment - mint_fee,
        now: Clock::get()?.unix_timestamp,
    };

    // ===== EFFECTS PHASE =====

    let outcome = match mechanic_vector.mechanic_kind {
        MechanicKind::DiscreteDutchAuction => {
            let mut auction = DiscreteDutchAuction {
                vector: &mut *accounts.dutch_auction,
                user: &mut *accounts.auction_user,
            };
            dispatch_mint(&mut auction, &request, call, data)?
        }
    };
    outcome.check_settlement(request.payment, &accounts.payment_recipient.key())?;

    // ===== INTERACTIONS PHASE =====

    let escrow = match mechanic_vector.mechanic_kind {
        MechanicKind::DiscreteDutchAuction => accounts.dutch_auction.to_account_info(),
    };

    transfer_lamports(
        accounts.minter.to_account_info(),
        accounts.fee_recipient.to_account_info(),
        accounts.system_program.to_account_info(),
        mint_fee,
    )?;
    transfer_lamports(
        accounts.minter.to_account_info(),
        escrow,
        accounts.system_program.to_account_info(),
        outcome.escrowed,
    )?;
    transfer_lamports(
        accounts.minter.to_account_info(),
        accounts.payment_recipient.to_account_info(),
        accounts.system_program.to_account_info(),
        outcome.paid_to_recipient,
    )?;

    Ok((outcome, mint_fee))
}

fn collection_mint<'a, 'info>(
    accounts: &'a MechanicMint<'info>,
    remaining_accounts: &'a [AccountInfo<'info>],
) -> CollectionMint<'a, 'info> {
    CollectionMint {
        collection_program: &accounts.collection_program,
        collection: &accounts.collection,
        mint_authority: &accounts.mint_authority,
        mint_authority_bump: accounts.platform.mint_authority_bump,
        recipient: &accounts.recipient,
        remaining_accounts,
    }
}
