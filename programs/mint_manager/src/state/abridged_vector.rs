use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/**
 * Abridged sale vector
 *
 * A sale configuration bound to exactly one collection (optionally one edition of
 * it). Gates and prices direct mints from that collection.
 *
 * Derivation: ["vector", vector_id]
 *
 * Lifecycle:
 * 1. Created by the collection owner (vector id taken from the platform counter)
 * 2. Updated by the owner through a field mask, or by successful claims
 * 3. Tombstoned by delete, never closed
 *
 * Invariants:
 * - total_claimed <= max_total_claimable whenever the cap is nonzero
 * - start_timestamp and price_per_token are frozen once total_claimed > 0
 */
#[account]
#[derive(Default, Debug)]
pub struct AbridgedVector {
    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Vector id, also part of the PDA seeds
    pub vector_id: u64,

    /// Collection this vector mints from
    pub collection: Pubkey,

    /// Edition within the collection (meaningful only when edition_based)
    pub edition_id: u64,

    /// Whether the vector is scoped to a single edition
    pub edition_based: bool,

    /// Claims are allowed from this time (inclusive)
    pub start_timestamp: i64,

    /// Claims are allowed until this time (inclusive), 0 for no end
    pub end_timestamp: i64,

    /// Receives the sale price of each claim
    pub payment_recipient: Pubkey,

    /// Price of one token in lamports
    pub price_per_token: u64,

    /// Maximum tokens per claim, 0 for unlimited
    pub token_limit_per_tx: u32,

    /// Maximum tokens over the vector's life, 0 for unlimited
    pub max_total_claimable: u32,

    /// Maximum tokens per user, 0 for unlimited
    pub max_user_claimable: u32,

    /// Tokens claimed so far
    pub total_claimed: u32,

    /// Merkle root of allowed minters, all zero when open to everyone
    pub allowlist_root: [u8; 32],

    /// Paused flag (top bit) packed with 127 bits of free-form metadata
    pub metadata: u128,

    /// Logical delete tombstone
    pub deleted: bool,
}

impl AbridgedVector {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + // discriminator
        1 +  // bump
        8 +  // vector_id
        32 + // collection
        8 +  // edition_id
        1 +  // edition_based
        8 +  // start_timestamp
        8 +  // end_timestamp
        32 + // payment_recipient
        8 +  // price_per_token
        4 +  // token_limit_per_tx
        4 +  // max_total_claimable
        4 +  // max_user_claimable
        4 +  // total_claimed
        32 + // allowlist_root
        16 + // metadata
        1;   // deleted

    /// Builds a fresh vector from its creation config
    pub fn initialize(
        &mut self,
        bump: u8,
        vector_id: u64,
        collection: Pubkey,
        config: &AbridgedVectorConfig,
    ) -> Result<()> {
        let vector = AbridgedVector {
            bump,
            vector_id,
            collection,
            edition_id: config.edition_id.unwrap_or(EDITION_SENTINEL),
            edition_based: config.edition_id.is_some(),
            start_timestamp: config.start_timestamp,
            end_timestamp: config.end_timestamp,
            payment_recipient: config.payment_recipient,
            price_per_token: config.price_per_token,
            token_limit_per_tx: config.token_limit_per_tx,
            max_total_claimable: config.max_total_claimable,
            max_user_claimable: config.max_user_claimable,
            total_claimed: 0,
            allowlist_root: config.allowlist_root,
            metadata: 0,
            deleted: false,
        };
        vector.validate()?;
        *self = vector;
        Ok(())
    }

    /// Structural checks shared by create and update
    pub fn validate(&self) -> Result<()> {
        // The sentinel already means "collection-wide"
        require!(
            !(self.edition_based && self.edition_id == EDITION_SENTINEL),
            MintManagerError::InvalidVectorConfig
        );
        require!(
            self.payment_recipient != Pubkey::default(),
            MintManagerError::InvalidVectorConfig
        );
        require!(
            self.end_timestamp == 0 || self.end_timestamp > self.start_timestamp,
            MintManagerError::InvalidVectorConfig
        );
        require!(
            self.max_total_claimable == 0 || self.total_claimed <= self.max_total_claimable,
            MintManagerError::InvalidUpdate
        );
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.metadata & VECTOR_PAUSED_BIT != 0
    }

    /// Free-form metadata without the paused flag
    pub fn flexible_metadata(&self) -> u128 {
        self.metadata & !VECTOR_PAUSED_BIT
    }

    pub fn has_allowlist(&self) -> bool {
        self.allowlist_root != [0; 32]
    }

    /// Edition id as seen by collections (None for collection-wide vectors)
    pub fn edition(&self) -> Option<u64> {
        self.edition_based.then_some(self.edition_id)
    }

    /// Applies an owner patch atomically: either every named field is written
    /// and the result is valid, or nothing changes.
    pub fn apply_patch(&mut self, patch: &AbridgedVectorPatch) -> Result<()> {
        require!(!self.deleted, MintManagerError::InvalidUpdate);

        if self.total_claimed > 0 {
            require!(
                patch.start_timestamp.is_none() && patch.price_per_token.is_none(),
                MintManagerError::InvalidUpdate
            );
        }

        let mut next = self.clone();
        if let Some(start_timestamp) = patch.start_timestamp {
            next.start_timestamp = start_timestamp;
        }
        if let Some(end_timestamp) = patch.end_timestamp {
            next.end_timestamp = end_timestamp;
        }
        if let Some(payment_recipient) = patch.payment_recipient {
            next.payment_recipient = payment_recipient;
        }
        if let Some(max_total_claimable) = patch.max_total_claimable {
            next.max_total_claimable = max_total_claimable;
        }
        if let Some(token_limit_per_tx) = patch.token_limit_per_tx {
            next.token_limit_per_tx = token_limit_per_tx;
        }
        if let Some(max_user_claimable) = patch.max_user_claimable {
            next.max_user_claimable = max_user_claimable;
        }
        if let Some(price_per_token) = patch.price_per_token {
            next.price_per_token = price_per_token;
        }
        if let Some(allowlist_root) = patch.allowlist_root {
            next.allowlist_root = allowlist_root;
        }
        if let Some((paused, extra)) = patch.metadata {
            next.metadata = compose_vector_metadata(paused, extra)?;
        }

        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn set_metadata(&mut self, paused: bool, extra: u128) -> Result<()> {
        require!(!self.deleted, MintManagerError::InvalidUpdate);
        self.metadata = compose_vector_metadata(paused, extra)?;
        Ok(())
    }

    pub fn delete(&mut self) -> Result<()> {
        require!(!self.deleted, MintManagerError::InvalidUpdate);
        self.deleted = true;
        Ok(())
    }

    /**
     * Checks a claim of `num_tokens` by a user who already claimed `user_claimed`
     * and records it. Returns the sale price owed for the claim.
     *
     * The cap checks and the counter increment happen together, so two buyers
     * racing for the last tokens cannot both pass.
     */
    pub fn record_claim(&mut self, now: i64, num_tokens: u32, user_claimed: u32) -> Result<u64> {
        require!(!self.deleted, MintManagerError::InvalidMint);
        require!(!self.is_paused(), MintManagerError::MintPaused);
        require!(num_tokens > 0, MintManagerError::InvalidMint);
        require!(now >= self.start_timestamp, MintManagerError::InvalidMint);
        require!(
            self.end_timestamp == 0 || now <= self.end_timestamp,
            MintManagerError::InvalidMint
        );
        require!(
            self.token_limit_per_tx == 0 || num_tokens <= self.token_limit_per_tx,
            MintManagerError::TxLimitExceeded
        );

        let total_claimed = self
            .total_claimed
            .checked_add(num_tokens)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        require!(
            self.max_total_claimable == 0 || total_claimed <= self.max_total_claimable,
            MintManagerError::SoldOut
        );

        let user_total = user_claimed
            .checked_add(num_tokens)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        require!(
            self.max_user_claimable == 0 || user_total <= self.max_user_claimable,
            MintManagerError::UserCapExceeded
        );

        let price = self
            .price_per_token
            .checked_mul(num_tokens as u64)
            .ok_or(MintManagerError::ArithmeticOverflow)?;

        self.total_claimed = total_claimed;
        Ok(price)
    }
}

/// Packs the paused flag into the top bit of the metadata word
pub fn compose_vector_metadata(paused: bool, extra: u128) -> Result<u128> {
    require!(extra & VECTOR_PAUSED_BIT == 0, MintManagerError::InvalidVectorConfig);
    Ok(if paused { extra | VECTOR_PAUSED_BIT } else { extra })
}

/// Per-user claim counter for an abridged vector
/// Derivation: ["vector_user", vector_id, user]
#[account]
#[derive(Default, Debug)]
pub struct VectorUserClaims {
    /// Tokens claimed by this user from the vector (cumulative)
    pub num_claimed: u32,
}

impl VectorUserClaims {
    pub const LEN: usize = 8 + std::mem::size_of::<VectorUserClaims>();
}

/// Creation input for an abridged vector (the collection comes from the accounts)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AbridgedVectorConfig {
    pub edition_id: Option<u64>,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub payment_recipient: Pubkey,
    pub price_per_token: u64,
    pub token_limit_per_tx: u32,
    pub max_total_claimable: u32,
    pub max_user_claimable: u32,
    pub allowlist_root: [u8; 32],
}

/**
 * Field-selective update of an abridged vector
 *
 * Only fields set to `Some` are written, so an update can never zero a field by
 * leaving it out. Built either fluently or from a config plus a bitmask.
 */
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbridgedVectorPatch {
    pub start_timestamp: Option<i64>,
    pub end_timestamp: Option<i64>,
    pub payment_recipient: Option<Pubkey>,
    pub max_total_claimable: Option<u32>,
    pub token_limit_per_tx: Option<u32>,
    pub max_user_claimable: Option<u32>,
    pub price_per_token: Option<u64>,
    pub allowlist_root: Option<[u8; 32]>,
    pub metadata: Option<(bool, u128)>,
}

impl AbridgedVectorPatch {
    /// Selects the fields named by `update_mask` from `config`
    pub fn from_mask(
        config: &AbridgedVectorConfig,
        update_mask: u16,
        paused: bool,
        extra: u128,
    ) -> Self {
        let pick = |bit: u16| update_mask & bit != 0;
        AbridgedVectorPatch {
            start_timestamp: pick(VECTOR_UPDATE_START_TIMESTAMP).then_some(config.start_timestamp),
            end_timestamp: pick(VECTOR_UPDATE_END_TIMESTAMP).then_some(config.end_timestamp),
            payment_recipient: pick(VECTOR_UPDATE_PAYMENT_RECIPIENT).then_some(config.payment_recipient),
            max_total_claimable: pick(VECTOR_UPDATE_MAX_TOTAL_CLAIMABLE).then_some(config.max_total_claimable),
            token_limit_per_tx: pick(VECTOR_UPDATE_TOKEN_LIMIT_PER_TX).then_some(config.token_limit_per_tx),
            max_user_claimable: pick(VECTOR_UPDATE_MAX_USER_CLAIMABLE).then_some(config.max_user_claimable),
            price_per_token: pick(VECTOR_UPDATE_PRICE_PER_TOKEN).then_some(config.price_per_token),
            allowlist_root: pick(VECTOR_UPDATE_ALLOWLIST_ROOT).then_some(config.allowlist_root),
            metadata: pick(VECTOR_UPDATE_METADATA).then_some((paused, extra)),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == AbridgedVectorPatch::default()
    }
}

#[cfg(test)]
impl AbridgedVectorPatch {
    pub fn start_timestamp(mut self, value: i64) -> Self {
        self.start_timestamp = Some(value);
        self
    }

    pub fn end_timestamp(mut self, value: i64) -> Self {
        self.end_timestamp = Some(value);
        self
    }

    pub fn payment_recipient(mut self, value: Pubkey) -> Self {
        self.payment_recipient = Some(value);
        self
    }

    pub fn max_total_claimable(mut self, value: u32) -> Self {
        self.max_total_claimable = Some(value);
        self
    }

    pub fn token_limit_per_tx(mut self, value: u32) -> Self {
        self.token_limit_per_tx = Some(value);
        self
    }

    pub fn max_user_claimable(mut self, value: u32) -> Self {
        self.max_user_claimable = Some(value);
        self
    }

    pub fn price_per_token(mut self, value: u64) -> Self {
        self.price_per_token = Some(value);
        self
    }

    pub fn allowlist_root(mut self, value: [u8; 32]) -> Self {
        self.allowlist_root = Some(value);
        self
    }

    pub fn metadata(mut self, paused: bool, extra: u128) -> Self {
        self.metadata = Some((paused, extra));
        self
    }
}
