use anchor_lang::prelude::*;

/**
 * Program Constants
 *
 * This module defines the constant values used throughout the mint manager program.
 * These constants control PDA derivation, storage limits, update masks and the
 * typed-data domain used to sign off-chain claims.
 */

#[constant]
/// ===== PDA SEED CONSTANTS =====

/// Seed for the platform config PDA
/// - Used in: ["platform"]
/// - Singleton holding the admin, claim signers, mint fee and vector id counter
pub const PLATFORM_SEED: &str = "platform";

/// Seed for abridged vector PDA derivation
/// - Used in: ["vector", vector_id (u64 LE)]
/// - Vector ids are assigned from the platform counter, so PDAs never collide
pub const VECTOR_SEED: &str = "vector";

/// Seed for per-user vector claim counters
/// - Used in: ["vector_user", vector_id (u64 LE), user]
pub const VECTOR_USER_SEED: &str = "vector_user";

/// Seed for consumed off-chain claim nonces
/// - Used in: ["claim_nonce", offchain_vector_id, claim_nonce]
/// - Scopes replay protection to a single off-chain vector
pub const CLAIM_NONCE_SEED: &str = "claim_nonce";

/// Seed for per off-chain vector claim counters
/// - Used in: ["offchain_vector", offchain_vector_id]
pub const OFFCHAIN_VECTOR_SEED: &str = "offchain_vector";

/// Seed for per-user off-chain vector claim counters
/// - Used in: ["offchain_user", offchain_vector_id, claimer]
pub const OFFCHAIN_USER_SEED: &str = "offchain_user";

/// Seed for mechanic vector metadata
/// - Used in: ["mechanic_vector", mechanic_vector_key]
pub const MECHANIC_VECTOR_SEED: &str = "mechanic_vector";

/// Seed for mechanic (strategy module) addresses
/// - Used in: ["mechanic", mechanic_name]
pub const MECHANIC_SEED: &str = "mechanic";

/// Seed for discrete dutch auction vectors (also the auction escrow)
/// - Used in: ["dutch_auction", mechanic_vector_key]
pub const DUTCH_AUCTION_SEED: &str = "dutch_auction";

/// Seed for per-buyer dutch auction records
/// - Used in: ["auction_user", mechanic_vector_key, buyer]
pub const AUCTION_USER_SEED: &str = "auction_user";

/// Seed for the authority that signs collection mint CPIs
/// - Used in: ["mint_authority"]
/// - Collections grant minting rights to this address
pub const MINT_AUTHORITY_SEED: &str = "mint_authority";

/// ===== LIMITS =====

/// Maximum number of authorized off-chain claim signers
pub const MAX_CLAIM_SIGNERS: usize = 8;

/// Maximum number of prices in a dutch auction curve
pub const MAX_PRICES: usize = 64;

/// Maximum on-chain width of a stored price (prices are u64 lamports)
pub const MAX_STORED_BYTES_PER_PRICE: usize = 8;

/// Edition id used in keys and hashes for collection-wide sales
pub const EDITION_SENTINEL: u64 = u64::MAX;

/// Paused flag position inside the 128-bit vector metadata word
pub const VECTOR_PAUSED_BIT: u128 = 1 << 127;

/// ===== ABRIDGED VECTOR UPDATE MASK =====

pub const VECTOR_UPDATE_START_TIMESTAMP: u16 = 1 << 0;
pub const VECTOR_UPDATE_END_TIMESTAMP: u16 = 1 << 1;
pub const VECTOR_UPDATE_PAYMENT_RECIPIENT: u16 = 1 << 2;
pub const VECTOR_UPDATE_MAX_TOTAL_CLAIMABLE: u16 = 1 << 3;
pub const VECTOR_UPDATE_TOKEN_LIMIT_PER_TX: u16 = 1 << 4;
pub const VECTOR_UPDATE_MAX_USER_CLAIMABLE: u16 = 1 << 5;
pub const VECTOR_UPDATE_PRICE_PER_TOKEN: u16 = 1 << 6;
pub const VECTOR_UPDATE_ALLOWLIST_ROOT: u16 = 1 << 7;
pub const VECTOR_UPDATE_METADATA: u16 = 1 << 8;

/// ===== DUTCH AUCTION UPDATE MASK =====

pub const AUCTION_UPDATE_START_TIMESTAMP: u16 = 1 << 0;
pub const AUCTION_UPDATE_END_TIMESTAMP: u16 = 1 << 1;
pub const AUCTION_UPDATE_PAYMENT_RECIPIENT: u16 = 1 << 2;
pub const AUCTION_UPDATE_MAX_TOTAL_CLAIMABLE: u16 = 1 << 3;
pub const AUCTION_UPDATE_TOKEN_LIMIT_PER_TX: u16 = 1 << 4;
pub const AUCTION_UPDATE_MAX_USER_CLAIMABLE: u16 = 1 << 5;
pub const AUCTION_UPDATE_PRICES: u16 = 1 << 6;
pub const AUCTION_UPDATE_PERIOD_DURATION: u16 = 1 << 7;

/// Fields that freeze once the first auction token is sold
pub const AUCTION_FROZEN_AFTER_SALE: u16 = AUCTION_UPDATE_START_TIMESTAMP
    | AUCTION_UPDATE_END_TIMESTAMP
    | AUCTION_UPDATE_MAX_TOTAL_CLAIMABLE
    | AUCTION_UPDATE_PRICES
    | AUCTION_UPDATE_PERIOD_DURATION;

/// ===== CLAIM TYPED-DATA DOMAIN =====

pub const CLAIM_DOMAIN_NAME: &str = "MintManager";
pub const CLAIM_DOMAIN_VERSION: &str = "1";
pub const CLAIM_DOMAIN_TYPE: &str = "EIP712Domain(string name,string version,address verifyingContract,address platform,address collection)";
pub const CLAIM_TYPE: &str = "Claim(address currency,address contractAddress,address claimer,address paymentRecipient,uint256 pricePerToken,uint64 numTokensToMint,uint256 maxClaimableViaVector,uint256 maxClaimablePerUser,uint256 editionId,uint256 claimExpiryTimestamp,bytes32 claimNonce,bytes32 offchainVectorId)";
