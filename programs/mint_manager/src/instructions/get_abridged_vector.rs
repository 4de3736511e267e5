use anchor_lang::prelude::*;
use crate::constants::*;
use crate::encoding::pack_abridged_vector;
use crate::state::*;

/// Account context for reading an abridged vector
#[derive(Accounts)]
#[instruction(vector_id: u64)]
pub struct GetAbridgedVector<'info> {
    /// - Derived from: ["vector", vector_id]
    #[account(
        seeds = [VECTOR_SEED.as_bytes(), vector_id.to_le_bytes().as_ref()],
        bump = vector.bump
    )]
    pub vector: Account<'info, AbridgedVector>,
}

/// Returns the vector as its packed record, see `encoding::abridged_vector`
pub fn handle_get_abridged_vector(ctx: Context<GetAbridgedVector>, _vector_id: u64) -> Result<Vec<u8>> {
    Ok(pack_abridged_vector(&ctx.accounts.vector).to_vec())
}
