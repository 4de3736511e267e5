use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::require_collection_owner;

/**
 * Account context for owner changes to an abridged vector
 *
 * Shared by update_abridged_vector, set_abridged_vector_metadata and
 * delete_abridged_vector.
 *
 * Access Control: Owner of the vector's collection only
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(vector_id: u64)]
pub struct ManageAbridgedVector<'info> {
    /// The vector to change
    /// - Derived from: ["vector", vector_id]
    #[account(
        mut,
        seeds = [VECTOR_SEED.as_bytes(), vector_id.to_le_bytes().as_ref()],
        bump = vector.bump
    )]
    pub vector: Account<'info, AbridgedVector>,

    /// Collection of the vector
    /// CHECK: address pinned to the vector, owner read in the handler
    #[account(address = vector.collection @ MintManagerError::InvalidCollection)]
    pub collection: UncheckedAccount<'info>,

    /// Collection owner
    pub owner: Signer<'info>,
}

/**
 * Overwrites the fields named by `update_mask` with the values in `config`
 *
 * @param ctx - The account context
 * @param vector_id - Id of the vector to update
 * @param config - New values; only masked fields are read
 * @param update_mask - Bit per field, see the VECTOR_UPDATE_* constants
 * @param paused - Paused flag, written when the metadata bit is set
 * @param extra - Free-form metadata, written when the metadata bit is set
 *
 * Start timestamp and price are frozen once a token has been claimed.
 */
pub fn handle_update_abridged_vector(
    ctx: Context<ManageAbridgedVector>,
    vector_id: u64,
    config: AbridgedVectorConfig,
    update_mask: u16,
    paused: bool,
    extra: u128,
) -> Result<()> {
    require_collection_owner(&ctx.accounts.collection, &ctx.accounts.owner.key())?;

    let patch = AbridgedVectorPatch::from_mask(&config, update_mask, paused, extra);
    require!(!patch.is_empty(), MintManagerError::InvalidUpdate);

    ctx.accounts.vector.apply_patch(&patch)?;

    emit_cpi!(AbridgedVectorUpdated {
        vector_id,
        update_mask,
    });

    Ok(())
}

/// Sets the paused flag and the free-form metadata in one write
pub fn handle_set_abridged_vector_metadata(
    ctx: Context<ManageAbridgedVector>,
    vector_id: u64,
    paused: bool,
    extra: u128,
) -> Result<()> {
    require_collection_owner(&ctx.accounts.collection, &ctx.accounts.owner.key())?;

    ctx.accounts.vector.set_metadata(paused, extra)?;

    emit_cpi!(AbridgedVectorMetadataSet {
        vector_id,
        paused,
        metadata: ctx.accounts.vector.flexible_metadata(),
    });

    Ok(())
}

/// Tombstones the vector. The account stays so claim history is kept.
pub fn handle_delete_abridged_vector(ctx: Context<ManageAbridgedVector>, vector_id: u64) -> Result<()> {
    require_collection_owner(&ctx.accounts.collection, &ctx.accounts.owner.key())?;

    ctx.accounts.vector.delete()?;

    emit_cpi!(AbridgedVectorDeleted { vector_id });

    Ok(())
}
