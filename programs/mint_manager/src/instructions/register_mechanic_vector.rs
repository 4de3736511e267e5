use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::mechanics::MechanicKind;
use crate::state::*;
use crate::utils::require_collection_owner;

/**
 * Account context for registering a mechanic vector
 *
 * Creates the routing metadata and hands `data` to the mechanic's initializer.
 * The dutch auction account is only passed for dutch auction mechanics.
 *
 * Access Control: Collection owner only
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(key: [u8; 32])]
pub struct RegisterMechanicVector<'info> {
    /// The new metadata (PDA); registering the same key twice fails here
    /// - Derived from: ["mechanic_vector", key]
    #[account(
        init,
        payer = owner,
        space = MechanicVectorMetadata::LEN,
        seeds = [MECHANIC_VECTOR_SEED.as_bytes(), key.as_ref()],
        bump
    )]
    pub mechanic_vector: Account<'info, MechanicVectorMetadata>,

    /// State of a discrete dutch auction mechanic
    /// - Derived from: ["dutch_auction", key]
    #[account(
        init,
        payer = owner,
        space = DutchAuctionVector::LEN,
        seeds = [DUTCH_AUCTION_SEED.as_bytes(), key.as_ref()],
        bump
    )]
    pub dutch_auction: Option<Account<'info, DutchAuctionVector>>,

    /// Collection minted from
    /// CHECK: owner read from the account data in the handler
    pub collection: UncheckedAccount<'info>,

    /// Collection owner, pays for the new accounts
    #[account(mut)]
    pub owner: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,
}

/**
 * Registers a mechanic vector
 *
 * @param ctx - The account context
 * @param key - Composite key; must equal mechanic_vector_key(collection, edition, mechanic, seed)
 * @param config - Edition, mechanic address, call shape and seed
 * @param data - Mechanic initialization data (a borsh DutchAuctionConfig for dutch auctions)
 */
pub fn handle_register_mechanic_vector(
    ctx: Context<RegisterMechanicVector>,
    key: [u8; 32],
    config: MechanicVectorConfig,
    data: Vec<u8>,
) -> Result<()> {
    // ===== VALIDATION PHASE =====

    let collection = ctx.accounts.collection.key();
    require_collection_owner(&ctx.accounts.collection, &ctx.accounts.owner.key())?;
    config.validate()?;
    require!(
        key == mechanic_vector_key(&collection, config.edition_id, &config.mechanic, config.seed),
        MintManagerError::InvalidMechanic
    );

    let mechanic_kind =
        MechanicKind::from_address(&config.mechanic).ok_or(MintManagerError::InvalidMechanic)?;
    require!(
        !config.is_choose || mechanic_kind.supports_choose(),
        MintManagerError::InvalidMechanic
    );

    // ===== EFFECTS PHASE =====

    let mechanic_vector = &mut ctx.accounts.mechanic_vector;
    mechanic_vector.set_inner(MechanicVectorMetadata {
        bump: ctx.bumps.mechanic_vector,
        key,
        collection,
        edition_id: config.edition_id.unwrap_or(EDITION_SENTINEL),
        mechanic: config.mechanic,
        mechanic_kind,
        is_edition_based: config.edition_id.is_some(),
        is_choose: config.is_choose,
        paused: false,
    });

    match mechanic_kind {
        MechanicKind::DiscreteDutchAuction => {
            let auction_config = DutchAuctionConfig::try_from_slice(&data)
                .map_err(|_| MintManagerError::InvalidVectorConfig)?;
            let bump = ctx.bumps.dutch_auction.ok_or(MintManagerError::InvalidMechanic)?;
            let dutch_auction = ctx
                .accounts
                .dutch_auction
                .as_mut()
                .ok_or(MintManagerError::InvalidMechanic)?;
            let escrow = dutch_auction.key();
            dutch_auction.initialize(bump, key, &auction_config, &escrow)?;
        }
    }

    emit_cpi!(MechanicVectorRegistered {
        key,
        collection,
        edition_id: config.edition_id,
        mechanic: config.mechanic,
        is_choose: config.is_choose,
    });

    Ok(())
}
