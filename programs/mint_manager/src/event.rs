use anchor_lang::prelude::*;

/// Event emitted when the platform config is created
#[event]
pub struct PlatformInitialized {
    /// The platform config account public key
    pub platform: Pubkey,
    /// Admin of the platform
    pub admin: Pubkey,
    /// Receiver of the platform mint fee
    pub fee_recipient: Pubkey,
    /// Mint fee per token in lamports
    pub mint_fee_per_token: u64,
}

/// Event emitted when the admin changes the platform config
#[event]
pub struct PlatformUpdated {
    /// The platform config account public key
    pub platform: Pubkey,
    /// Admin after the update
    pub admin: Pubkey,
    /// Fee recipient after the update
    pub fee_recipient: Pubkey,
    /// Mint fee per token after the update
    pub mint_fee_per_token: u64,
}

/// Event emitted when a claim signer is added or removed
#[event]
pub struct ClaimSignerSet {
    /// The claim signer
    pub signer: Pubkey,
    /// Whether the signer is now authorized
    pub authorized: bool,
}

/// Event emitted when an abridged vector is created
#[event]
pub struct AbridgedVectorCreated {
    /// Id of the new vector
    pub vector_id: u64,
    /// The vector account public key
    pub vector: Pubkey,
    /// Collection the vector mints from
    pub collection: Pubkey,
    /// Edition the vector mints from, if edition based
    pub edition_id: Option<u64>,
}

/// Event emitted when an abridged vector is updated by its owner
#[event]
pub struct AbridgedVectorUpdated {
    /// Id of the vector
    pub vector_id: u64,
    /// Fields written, as an update mask
    pub update_mask: u16,
}

/// Event emitted when an abridged vector is tombstoned
#[event]
pub struct AbridgedVectorDeleted {
    /// Id of the vector
    pub vector_id: u64,
}

/// Event emitted when the metadata word of an abridged vector is set
#[event]
pub struct AbridgedVectorMetadataSet {
    /// Id of the vector
    pub vector_id: u64,
    /// Paused flag
    pub paused: bool,
    /// Free-form metadata
    pub metadata: u128,
}

/// Event emitted on every mint through an abridged vector
#[event]
pub struct VectorMinted {
    /// Id of the vector
    pub vector_id: u64,
    /// Buyer
    pub minter: Pubkey,
    /// Receiver of the tokens
    pub recipient: Pubkey,
    /// Number of tokens minted
    pub num_tokens: u32,
    /// First token id returned by the collection
    pub first_token_id: u64,
    /// Sale price paid to the vector's payment recipient
    pub sale_amount: u64,
    /// Platform fee paid
    pub mint_fee: u64,
    /// Total claimed from the vector after this mint
    pub total_claimed: u32,
}

/// Event emitted when an off-chain claim is settled
#[event]
pub struct OffchainClaimSettled {
    /// Off-chain vector the claim belongs to
    pub offchain_vector_id: [u8; 32],
    /// Consumed nonce
    pub claim_nonce: [u8; 32],
    /// Claimer who settled
    pub claimer: Pubkey,
    /// Receiver of the tokens
    pub recipient: Pubkey,
    /// Collection minted from
    pub collection: Pubkey,
    /// Number of tokens minted
    pub num_tokens: u32,
    /// Sale price paid to the claim's payment recipient
    pub sale_amount: u64,
    /// Platform fee paid
    pub mint_fee: u64,
}

/// Event emitted when a mechanic vector is registered
#[event]
pub struct MechanicVectorRegistered {
    /// Composite key of the mechanic vector
    pub key: [u8; 32],
    /// Collection minted from
    pub collection: Pubkey,
    /// Edition minted from, if edition based
    pub edition_id: Option<u64>,
    /// Mechanic address
    pub mechanic: Pubkey,
    /// Buyers choose token ids
    pub is_choose: bool,
}

/// Event emitted when a mechanic vector is paused or unpaused
#[event]
pub struct MechanicVectorPauseSet {
    /// Composite key of the mechanic vector
    pub key: [u8; 32],
    /// Paused flag after the call
    pub paused: bool,
}

/// Event emitted on every mint through a mechanic
#[event]
pub struct MechanicMinted {
    /// Composite key of the mechanic vector
    pub key: [u8; 32],
    /// Buyer
    pub minter: Pubkey,
    /// Receiver of the tokens
    pub recipient: Pubkey,
    /// Number of tokens minted
    pub num_minted: u32,
    /// Lamports kept in the mechanic's escrow
    pub escrowed: u64,
    /// Lamports paid straight to the payment recipient
    pub paid_to_recipient: u64,
    /// Platform fee paid
    pub mint_fee: u64,
}

/// Event emitted when the owner updates a dutch auction
#[event]
pub struct DutchAuctionVectorUpdated {
    /// Composite key of the mechanic vector
    pub key: [u8; 32],
    /// Fields written, as an update mask
    pub update_mask: u16,
}

/// Event emitted when a buyer is paid a rebate
#[event]
pub struct RebateCollected {
    /// Composite key of the mechanic vector
    pub key: [u8; 32],
    /// Buyer receiving the rebate
    pub buyer: Pubkey,
    /// Lamports paid back
    pub amount: u64,
    /// Number of rebates paid to this buyer so far
    pub num_rebates: u32,
}

/// Event emitted when the payee revenue leaves escrow
#[event]
pub struct DppFundsWithdrawn {
    /// Composite key of the mechanic vector
    pub key: [u8; 32],
    /// Payment recipient
    pub payment_recipient: Pubkey,
    /// Lamports paid out
    pub amount: u64,
    /// Clearing price per token
    pub clearing_price: u64,
}
