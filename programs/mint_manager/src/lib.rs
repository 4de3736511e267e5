use anchor_lang::prelude::*;

declare_id!("7BfcDohXy6jEM8Nf7KHLWb5JWPYnDMAod6CzmEYwWNtk");

pub mod constants;
pub mod encoding;
pub mod error;
pub mod event;
pub mod instructions;
pub mod mechanics;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test;

use instructions::*;
use state::*;

/**
 * Mint Manager Program
 *
 * A Solana program that sells tokens of NFT collections on their behalf.
 * Collections grant minting to this program's mint authority PDA; the program
 * decides who may mint, when and at what price, collects the payment and asks
 * the collection to mint.
 *
 * Key Features:
 * - Abridged vectors: fixed-price sales with schedule, caps and optional allowlist
 * - Off-chain claims: mints authorized by platform signers (Ed25519), single-use nonces
 * - Mechanic vectors: sales priced by pluggable mechanics
 * - Discrete dutch auction mechanic with rebates down to the clearing price
 * - Platform mint fee on every token
 * - Cross-program call event emission for composability
 *
 * Architecture:
 * - Platform PDA: admin, fee, claim signers, vector id counter
 * - Vector PDAs: one per abridged vector, plus per-user claim counters
 * - Off-chain ledger PDAs: nonces and counters per off-chain vector id
 * - Mechanic vector PDAs: routing metadata keyed by a composite hash
 * - Dutch auction PDAs: auction state, doubling as the escrow
 *
 * Workflow:
 * 1. Admin initializes the platform
 * 2. Collection owners create vectors or register mechanic vectors
 * 3. Buyers mint through vectors, signed claims or mechanics
 * 4. Auction buyers collect rebates; the payee withdraws the revenue
 */
#[program]
pub mod mint_manager {
    use super::*;

    /**
     * Creates the platform config
     *
     * @param ctx - Account context containing the platform and admin accounts
     * @param fee_recipient - Receiver of the platform mint fee
     * @param mint_fee_per_token - Platform fee per minted token, in lamports
     *
     * Access Control: First caller becomes admin
     */
    pub fn initialize_platform(
        ctx: Context<InitializePlatform>,
        fee_recipient: Pubkey,
        mint_fee_per_token: u64,
    ) -> Result<()> {
        handle_initialize_platform(ctx, fee_recipient, mint_fee_per_token)
    }

    /**
     * Changes the admin, fee recipient or mint fee
     *
     * Access Control: Admin only
     */
    pub fn update_platform(ctx: Context<UpdatePlatform>, params: PlatformUpdateParams) -> Result<()> {
        handle_update_platform(ctx, params)
    }

    /**
     * Authorizes or revokes an off-chain claim signer
     *
     * Access Control: Admin only
     */
    pub fn set_claim_signer(ctx: Context<UpdatePlatform>, signer: Pubkey, authorized: bool) -> Result<()> {
        handle_set_claim_signer(ctx, signer, authorized)
    }

    /**
     * Creates an abridged vector
     *
     * @param ctx - Account context containing the platform, vector and collection accounts
     * @param config - Schedule, price, caps, payment recipient and allowlist root
     * @returns the new vector id
     *
     * Access Control: Collection owner only
     */
    pub fn create_abridged_vector(
        ctx: Context<CreateAbridgedVector>,
        config: AbridgedVectorConfig,
    ) -> Result<u64> {
        handle_create_abridged_vector(ctx, config)
    }

    /**
     * Updates the fields of an abridged vector named by `update_mask`
     *
     * Access Control: Collection owner only
     * Note: start timestamp and price are frozen after the first claim
     */
    pub fn update_abridged_vector(
        ctx: Context<ManageAbridgedVector>,
        vector_id: u64,
        config: AbridgedVectorConfig,
        update_mask: u16,
        paused: bool,
        extra: u128,
    ) -> Result<()> {
        handle_update_abridged_vector(ctx, vector_id, config, update_mask, paused, extra)
    }

    /**
     * Tombstones an abridged vector
     *
     * Access Control: Collection owner only
     */
    pub fn delete_abridged_vector(ctx: Context<ManageAbridgedVector>, vector_id: u64) -> Result<()> {
        handle_delete_abridged_vector(ctx, vector_id)
    }

    /// Returns the packed record of an abridged vector
    pub fn get_abridged_vector(ctx: Context<GetAbridgedVector>, vector_id: u64) -> Result<Vec<u8>> {
        handle_get_abridged_vector(ctx, vector_id)
    }

    /**
     * Sets the paused flag and free-form metadata of an abridged vector
     *
     * Access Control: Collection owner only
     */
    pub fn set_abridged_vector_metadata(
        ctx: Context<ManageAbridgedVector>,
        vector_id: u64,
        paused: bool,
        extra: u128,
    ) -> Result<()> {
        handle_set_abridged_vector_metadata(ctx, vector_id, paused, extra)
    }

    /**
     * Mints through an abridged vector
     *
     * @param ctx - Account context; remaining accounts are forwarded to the collection
     * @param vector_id - Id of the vector
     * @param num_tokens - Number of tokens to mint
     * @param payment - Exact lamports paid: price * n + platform fee * n
     * @param proof - Allowlist proof, empty for open vectors
     * @returns the first minted token id
     *
     * Access Control: Anyone passing the vector's checks
     */
    pub fn vector_mint<'info>(
        ctx: Context<'_, '_, 'info, 'info, VectorMint<'info>>,
        vector_id: u64,
        num_tokens: u32,
        payment: u64,
        proof: Vec<[u8; 32]>,
    ) -> Result<u64> {
        handle_vector_mint(ctx, vector_id, num_tokens, payment, proof)
    }

    /**
     * Reports whether an off-chain claim could be settled now
     *
     * Requires the Ed25519 precompile check of the signature as the previous
     * instruction. Never fails on an invalid claim, returns false instead.
     */
    pub fn verify_claim(
        ctx: Context<VerifyClaim>,
        claim: OffchainClaim,
        signature: ClaimSignature,
        claimer: Pubkey,
    ) -> Result<bool> {
        handle_verify_claim(ctx, claim, signature, claimer)
    }

    /**
     * Settles an off-chain claim and mints
     *
     * @param ctx - Account context; remaining accounts are forwarded to the collection
     * @param claim - The signed claim
     * @param signature - Signer and Ed25519 signature over the claim digest
     * @param payment - Exact lamports paid: price * n + platform fee * n
     * @param token_ids - Chosen ids for choose-style collections
     *
     * Access Control: The claimer named in the claim
     */
    pub fn gated_mint<'info>(
        ctx: Context<'_, '_, 'info, 'info, GatedMint<'info>>,
        claim: OffchainClaim,
        signature: ClaimSignature,
        payment: u64,
        token_ids: Option<Vec<u64>>,
    ) -> Result<()> {
        handle_gated_mint(ctx, claim, signature, payment, token_ids)
    }

    /**
     * Registers a mechanic vector and initializes its mechanic
     *
     * Access Control: Collection owner only
     */
    pub fn register_mechanic_vector(
        ctx: Context<RegisterMechanicVector>,
        key: [u8; 32],
        config: MechanicVectorConfig,
        data: Vec<u8>,
    ) -> Result<()> {
        handle_register_mechanic_vector(ctx, key, config, data)
    }

    /**
     * Mints a number of tokens through a mechanic vector
     *
     * Access Control: Anyone passing the mechanic's checks
     */
    pub fn mechanic_mint_by_count<'info>(
        ctx: Context<'_, '_, 'info, 'info, MechanicMint<'info>>,
        key: [u8; 32],
        num_to_mint: u32,
        payment: u64,
        data: Vec<u8>,
    ) -> Result<u64> {
        handle_mechanic_mint_by_count(ctx, key, num_to_mint, payment, data)
    }

    /**
     * Mints chosen token ids through a mechanic vector
     *
     * Access Control: Anyone passing the mechanic's checks
     */
    pub fn mechanic_mint_by_choice<'info>(
        ctx: Context<'_, '_, 'info, 'info, MechanicMint<'info>>,
        key: [u8; 32],
        token_ids: Vec<u64>,
        payment: u64,
        data: Vec<u8>,
    ) -> Result<()> {
        handle_mechanic_mint_by_choice(ctx, key, token_ids, payment, data)
    }

    /**
     * Pauses or unpauses a mechanic vector
     *
     * Access Control: Collection owner only
     */
    pub fn set_pause_on_mechanic_mint_vector(
        ctx: Context<SetPauseOnMechanicMintVector>,
        key: [u8; 32],
        paused: bool,
    ) -> Result<()> {
        handle_set_pause_on_mechanic_mint_vector(ctx, key, paused)
    }

    /**
     * Updates the fields of a dutch auction named by `update_mask`
     *
     * Access Control: Collection owner only
     * Note: schedule, total cap and prices are frozen after the first sale
     */
    pub fn update_dutch_auction_vector(
        ctx: Context<UpdateDutchAuctionVector>,
        key: [u8; 32],
        config: DutchAuctionConfig,
        update_mask: u16,
    ) -> Result<()> {
        handle_update_dutch_auction_vector(ctx, key, config, update_mask)
    }

    /// Returns the state of a dutch auction
    pub fn get_dutch_auction_vector_state(
        ctx: Context<GetDutchAuctionVectorState>,
        key: [u8; 32],
    ) -> Result<DutchAuctionVectorState> {
        handle_get_dutch_auction_vector_state(ctx, key)
    }

    /// Returns a buyer's dutch auction record
    pub fn get_dutch_auction_user_info(
        ctx: Context<GetDutchAuctionUserInfo>,
        key: [u8; 32],
        buyer: Pubkey,
    ) -> Result<UserAuctionInfoView> {
        handle_get_dutch_auction_user_info(ctx, key, buyer)
    }

    /**
     * Pays a buyer their dutch auction rebate
     *
     * Access Control: Anyone
     */
    pub fn rebate_collector(ctx: Context<RebateCollector>, key: [u8; 32]) -> Result<()> {
        handle_rebate_collector(ctx, key)
    }

    /**
     * Pays the dutch auction revenue to its payment recipient, once
     *
     * Access Control: Anyone
     */
    pub fn withdraw_dpp_funds(ctx: Context<WithdrawDppFunds>, key: [u8; 32]) -> Result<()> {
        handle_withdraw_dpp_funds(ctx, key)
    }
}
