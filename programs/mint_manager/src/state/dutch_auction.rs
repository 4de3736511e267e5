use anchor_lang::prelude::*;
use crate::constants::*;
use crate::encoding::{decode_entries, decode_prices, encode_prices, price_at};
use crate::error::*;

/**
 * Discrete dutch auction vector
 *
 * One auction run by the discrete dutch auction mechanic. The price steps down
 * through `num_prices` levels every `period_duration` seconds and then stays at
 * the last level (the fixed price plateau) until `end_timestamp`.
 *
 * Buyers post the current price. Everyone ends up paying the clearing price
 * (`lowest_price_sold_at_index`) and collects the difference as a rebate, so the
 * account doubles as the escrow for posted lamports.
 *
 * Derivation: ["dutch_auction", mechanic_vector_key]
 *
 * Lifecycle:
 * 1. Created with its mechanic vector at registration
 * 2. Decay schedule, cap and prices frozen by the first sale
 * 3. Finalized by exhaustion, or by the payee withdrawal inside the plateau
 * 4. Purchases after the payee withdrawal pay the recipient directly
 *
 * Invariants:
 * - Prices strictly decrease with the index
 * - (num_prices - 1) * period_duration < end_timestamp - start_timestamp
 * - lowest_price_sold_at_index never moves once escrow_funds_finalized is set
 */
#[account]
#[derive(Default, Debug)]
pub struct DutchAuctionVector {
    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Mechanic vector key, also part of the PDA seeds
    pub key: [u8; 32],

    pub start_timestamp: i64,
    pub end_timestamp: i64,

    /// Seconds spent at each price before stepping down
    pub period_duration: u32,

    /// 0 for unlimited
    pub max_user_claimable: u32,

    /// 0 for unlimited (the auction can then never exhaust)
    pub max_total_claimable: u32,

    /// 0 for unlimited
    pub token_limit_per_tx: u32,

    /// Tokens sold so far
    pub current_supply: u32,

    /// Highest price index any sale happened at
    pub lowest_price_sold_at_index: u32,

    pub num_prices: u32,

    /// Width of one entry of `packed_prices`
    pub bytes_per_price: u8,

    /// Receives the auction revenue
    pub payment_recipient: Pubkey,

    /// Gross sales at the price paid at purchase time
    pub total_sales: u64,

    /// The clearing price is fixed
    pub escrow_funds_finalized: bool,

    /// The payee revenue left escrow
    pub payee_revenue_withdrawn: bool,

    /// Big-endian price entries, no width prefix
    pub packed_prices: Vec<u8>,
}

/// Time-based phase of an auction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionPhase {
    NotStarted,
    Decaying,
    FixedPricePlateau,
    Ended,
}

/// Lamport movements owed by one accepted purchase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuctionPurchase {
    pub price_per_token: u64,
    /// Stays in the auction account
    pub escrowed: u64,
    /// Goes straight to the payment recipient
    pub paid_to_recipient: u64,
}

impl DutchAuctionVector {
    /// Calculate the space required for this account
    pub const LEN: usize = 8 + // discriminator
        1 +  // bump
        32 + // key
        8 +  // start_timestamp
        8 +  // end_timestamp
        4 +  // period_duration
        4 +  // max_user_claimable
        4 +  // max_total_claimable
        4 +  // token_limit_per_tx
        4 +  // current_supply
        4 +  // lowest_price_sold_at_index
        4 +  // num_prices
        1 +  // bytes_per_price
        32 + // payment_recipient
        8 +  // total_sales
        1 +  // escrow_funds_finalized
        1 +  // payee_revenue_withdrawn
        4 + MAX_PRICES * MAX_STORED_BYTES_PER_PRICE; // packed_prices

    /// Builds a fresh auction. `escrow` is the address of the auction account.
    pub fn initialize(
        &mut self,
        bump: u8,
        key: [u8; 32],
        config: &DutchAuctionConfig,
        escrow: &Pubkey,
    ) -> Result<()> {
        let mut vector = DutchAuctionVector {
            bump,
            key,
            start_timestamp: config.start_timestamp,
            end_timestamp: config.end_timestamp,
            period_duration: config.period_duration,
            max_user_claimable: config.max_user_claimable,
            max_total_claimable: config.max_total_claimable,
            token_limit_per_tx: config.token_limit_per_tx,
            payment_recipient: config.payment_recipient,
            ..DutchAuctionVector::default()
        };
        vector.store_prices(&config.packed_prices, config.num_prices)?;
        vector.validate(escrow)?;
        *self = vector;
        Ok(())
    }

    /// Stores a width-prefixed price list re-packed at the narrowest width
    fn store_prices(&mut self, packed_prices: &[u8], num_prices: u32) -> Result<()> {
        require!(
            num_prices as usize <= MAX_PRICES,
            MintManagerError::InvalidVectorConfig
        );
        let prices = decode_prices(packed_prices, num_prices)?;
        let repacked = encode_prices(&prices);

        self.bytes_per_price = repacked[0];
        self.packed_prices = repacked[1..].to_vec();
        self.num_prices = num_prices;
        Ok(())
    }

    pub fn prices(&self) -> Result<Vec<u64>> {
        decode_entries(&self.packed_prices, self.bytes_per_price, self.num_prices)
    }

    /// Price list in the width-prefixed wire format
    pub fn encoded_prices(&self) -> Vec<u8> {
        let mut packed = Vec::with_capacity(1 + self.packed_prices.len());
        packed.push(self.bytes_per_price);
        packed.extend_from_slice(&self.packed_prices);
        packed
    }

    pub fn validate(&self, escrow: &Pubkey) -> Result<()> {
        require!(self.period_duration > 0, MintManagerError::InvalidVectorConfig);
        require!(
            self.num_prices >= 2 && self.num_prices as usize <= MAX_PRICES,
            MintManagerError::InvalidVectorConfig
        );
        require!(
            self.payment_recipient != Pubkey::default() && self.payment_recipient != *escrow,
            MintManagerError::InvalidVectorConfig
        );

        let prices = self.prices()?;
        require!(
            prices.windows(2).all(|pair| pair[0] > pair[1]),
            MintManagerError::InvalidVectorConfig
        );

        // The curve has to reach its plateau strictly before the end
        let window = self.end_timestamp as i128 - self.start_timestamp as i128;
        let decay = (self.num_prices as i128 - 1) * self.period_duration as i128;
        require!(decay < window, MintManagerError::InvalidVectorConfig);

        require!(
            self.max_total_claimable == 0 || self.current_supply <= self.max_total_claimable,
            MintManagerError::InvalidUpdate
        );
        Ok(())
    }

    /// Start of the fixed price plateau
    pub fn fpp_start(&self) -> i64 {
        let decay = (self.num_prices.saturating_sub(1) as i64) * self.period_duration as i64;
        self.start_timestamp.saturating_add(decay)
    }

    pub fn phase(&self, now: i64) -> AuctionPhase {
        if now < self.start_timestamp {
            AuctionPhase::NotStarted
        } else if now > self.end_timestamp {
            AuctionPhase::Ended
        } else if now >= self.fpp_start() {
            AuctionPhase::FixedPricePlateau
        } else {
            AuctionPhase::Decaying
        }
    }

    /// Index of the price in effect at `now`
    pub fn price_index(&self, now: i64) -> u32 {
        if now <= self.start_timestamp || self.period_duration == 0 {
            return 0;
        }
        let elapsed = now.saturating_sub(self.start_timestamp) as u64;
        let steps = elapsed / self.period_duration as u64;
        let last = self.num_prices.saturating_sub(1) as u64;
        steps.min(last) as u32
    }

    pub fn current_price(&self, now: i64) -> Result<u64> {
        price_at(&self.packed_prices, self.bytes_per_price, self.price_index(now))
    }

    pub fn is_exhausted(&self) -> bool {
        self.max_total_claimable != 0 && self.current_supply >= self.max_total_claimable
    }

    /// Per-token price buyers are settled at: the clearing price once finalized,
    /// the live price before that
    pub fn settlement_price(&self, now: i64) -> Result<u64> {
        if self.escrow_funds_finalized {
            price_at(
                &self.packed_prices,
                self.bytes_per_price,
                self.lowest_price_sold_at_index,
            )
        } else {
            self.current_price(now)
        }
    }

    /**
     * Accepts a purchase of `num_tokens` paying `payment` lamports.
     *
     * The whole payment is posted on the buyer's record; whatever ends up above
     * the settlement price comes back as a rebate. Once the payee revenue has been
     * withdrawn the price goes straight to the recipient and only the excess stays
     * in escrow.
     */
    pub fn process_purchase(
        &mut self,
        now: i64,
        user: &mut UserAuctionInfo,
        num_tokens: u32,
        payment: u64,
    ) -> Result<AuctionPurchase> {
        require!(num_tokens > 0, MintManagerError::InvalidMint);
        require!(
            matches!(
                self.phase(now),
                AuctionPhase::Decaying | AuctionPhase::FixedPricePlateau
            ),
            MintManagerError::InvalidMint
        );
        require!(!self.is_exhausted(), MintManagerError::SoldOut);
        require!(
            self.token_limit_per_tx == 0 || num_tokens <= self.token_limit_per_tx,
            MintManagerError::TxLimitExceeded
        );

        let current_supply = self
            .current_supply
            .checked_add(num_tokens)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        require!(
            self.max_total_claimable == 0 || current_supply <= self.max_total_claimable,
            MintManagerError::SoldOut
        );

        let num_tokens_bought = user
            .num_tokens_bought
            .checked_add(num_tokens)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        require!(
            self.max_user_claimable == 0 || num_tokens_bought <= self.max_user_claimable,
            MintManagerError::UserCapExceeded
        );

        let price_index = self.price_index(now);
        let price = self.current_price(now)?;
        let cost = price
            .checked_mul(num_tokens as u64)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        require!(payment >= cost, MintManagerError::InvalidPaymentAmount);

        let total_sales = self
            .total_sales
            .checked_add(cost)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        let total_posted = user
            .total_posted
            .checked_add(payment)
            .ok_or(MintManagerError::ArithmeticOverflow)?;

        // ===== EFFECTS =====

        self.current_supply = current_supply;
        self.total_sales = total_sales;
        if !self.escrow_funds_finalized && price_index > self.lowest_price_sold_at_index {
            self.lowest_price_sold_at_index = price_index;
        }
        if self.is_exhausted() {
            self.escrow_funds_finalized = true;
        }

        user.total_posted = total_posted;
        user.num_tokens_bought = num_tokens_bought;
        user.pending_rebate = self.owed_rebate(now, user)?;

        let purchase = if self.payee_revenue_withdrawn {
            AuctionPurchase {
                price_per_token: price,
                escrowed: payment - cost,
                paid_to_recipient: cost,
            }
        } else {
            AuctionPurchase {
                price_per_token: price,
                escrowed: payment,
                paid_to_recipient: 0,
            }
        };
        Ok(purchase)
    }

    /// What `user` has posted beyond the settlement price of their tokens
    pub fn owed_rebate(&self, now: i64, user: &UserAuctionInfo) -> Result<u64> {
        if user.num_tokens_bought == 0 {
            return Ok(0);
        }
        let due = self
            .settlement_price(now)?
            .checked_mul(user.num_tokens_bought as u64)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        Ok(user.total_posted.saturating_sub(due))
    }

    /// Settles the buyer's rebate on their record and returns the lamports owed
    pub fn collect_rebate(&self, now: i64, user: &mut UserAuctionInfo) -> Result<u64> {
        require!(self.current_supply > 0, MintManagerError::CollectorNotOwedRebate);
        let owed = self.owed_rebate(now, user)?;
        require!(owed > 0, MintManagerError::CollectorNotOwedRebate);

        user.total_posted -= owed;
        user.pending_rebate = 0;
        user.num_rebates = user
            .num_rebates
            .checked_add(1)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        Ok(owed)
    }

    /**
     * Releases the payee revenue (clearing price times supply) exactly once.
     *
     * Allowed once the auction is exhausted or has reached its plateau. A plateau
     * withdrawal on an auction that has not exhausted fixes the clearing price at
     * the last price.
     */
    pub fn withdraw_dpp_funds(&mut self, now: i64) -> Result<u64> {
        require!(
            !self.payee_revenue_withdrawn,
            MintManagerError::InvalidDppFundsWithdrawal
        );
        require!(
            self.is_exhausted() || now >= self.fpp_start(),
            MintManagerError::InvalidDppFundsWithdrawal
        );
        require!(self.current_supply > 0, MintManagerError::InvalidDppFundsWithdrawal);

        if !self.escrow_funds_finalized {
            self.lowest_price_sold_at_index = self.num_prices.saturating_sub(1);
            self.escrow_funds_finalized = true;
        }

        let amount = self
            .settlement_price(now)?
            .checked_mul(self.current_supply as u64)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        self.payee_revenue_withdrawn = true;
        Ok(amount)
    }

    /**
     * Overwrites the fields named by `update_mask` with the values in `config`.
     *
     * Applied to a copy and validated as a whole; nothing changes on failure.
     * Schedule, total cap and prices are frozen once a token has sold.
     */
    pub fn apply_update(
        &mut self,
        config: &DutchAuctionConfig,
        update_mask: u16,
        escrow: &Pubkey,
    ) -> Result<()> {
        require!(update_mask != 0, MintManagerError::InvalidUpdate);
        if self.current_supply > 0 {
            require!(
                update_mask & AUCTION_FROZEN_AFTER_SALE == 0,
                MintManagerError::InvalidUpdate
            );
        }

        let pick = |bit: u16| update_mask & bit != 0;
        let mut next = self.clone();
        if pick(AUCTION_UPDATE_START_TIMESTAMP) {
            next.start_timestamp = config.start_timestamp;
        }
        if pick(AUCTION_UPDATE_END_TIMESTAMP) {
            next.end_timestamp = config.end_timestamp;
        }
        if pick(AUCTION_UPDATE_PAYMENT_RECIPIENT) {
            next.payment_recipient = config.payment_recipient;
        }
        if pick(AUCTION_UPDATE_MAX_TOTAL_CLAIMABLE) {
            next.max_total_claimable = config.max_total_claimable;
        }
        if pick(AUCTION_UPDATE_TOKEN_LIMIT_PER_TX) {
            next.token_limit_per_tx = config.token_limit_per_tx;
        }
        if pick(AUCTION_UPDATE_MAX_USER_CLAIMABLE) {
            next.max_user_claimable = config.max_user_claimable;
        }
        if pick(AUCTION_UPDATE_PRICES) {
            next.store_prices(&config.packed_prices, config.num_prices)?;
        }
        if pick(AUCTION_UPDATE_PERIOD_DURATION) {
            next.period_duration = config.period_duration;
        }

        next.validate(escrow)?;
        *self = next;
        Ok(())
    }

    pub fn state(&self, now: i64) -> Result<DutchAuctionVectorState> {
        Ok(DutchAuctionVectorState {
            start_timestamp: self.start_timestamp,
            end_timestamp: self.end_timestamp,
            period_duration: self.period_duration,
            max_user_claimable: self.max_user_claimable,
            max_total_claimable: self.max_total_claimable,
            token_limit_per_tx: self.token_limit_per_tx,
            payment_recipient: self.payment_recipient,
            num_prices: self.num_prices,
            packed_prices: self.encoded_prices(),
            current_price: self.current_price(now)?,
            current_supply: self.current_supply,
            lowest_price_sold_at_index: self.lowest_price_sold_at_index,
            total_sales: self.total_sales,
            auction_exhausted: self.is_exhausted(),
            escrow_funds_finalized: self.escrow_funds_finalized,
            payee_revenue_withdrawn: self.payee_revenue_withdrawn,
        })
    }

    pub fn user_info(&self, now: i64, user: &UserAuctionInfo) -> Result<UserAuctionInfoView> {
        Ok(UserAuctionInfoView {
            total_posted: user.total_posted,
            pending_rebate: self.owed_rebate(now, user)?,
            num_tokens_bought: user.num_tokens_bought,
            num_rebates: user.num_rebates,
        })
    }
}

/// Per-buyer record of one auction
/// Derivation: ["auction_user", mechanic_vector_key, buyer]
#[account]
#[derive(Default, Debug)]
pub struct UserAuctionInfo {
    /// Lamports posted and not yet rebated
    pub total_posted: u64,
    /// Rebate owed as of the last purchase
    pub pending_rebate: u64,
    pub num_tokens_bought: u32,
    pub num_rebates: u32,
}

impl UserAuctionInfo {
    pub const LEN: usize = 8 + std::mem::size_of::<UserAuctionInfo>();
}

/**
 * Auction configuration, used both at registration (every field) and by updates
 * (only the fields named in the update mask).
 *
 * `packed_prices` is width-prefixed; see `encoding::prices`.
 */
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct DutchAuctionConfig {
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub period_duration: u32,
    pub max_user_claimable: u32,
    pub max_total_claimable: u32,
    pub token_limit_per_tx: u32,
    pub payment_recipient: Pubkey,
    pub num_prices: u32,
    pub packed_prices: Vec<u8>,
}

/// Auction view returned by get_dutch_auction_vector_state
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DutchAuctionVectorState {
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub period_duration: u32,
    pub max_user_claimable: u32,
    pub max_total_claimable: u32,
    pub token_limit_per_tx: u32,
    pub payment_recipient: Pubkey,
    pub num_prices: u32,
    pub packed_prices: Vec<u8>,
    pub current_price: u64,
    pub current_supply: u32,
    pub lowest_price_sold_at_index: u32,
    pub total_sales: u64,
    pub auction_exhausted: bool,
    pub escrow_funds_finalized: bool,
    pub payee_revenue_withdrawn: bool,
}

/// Buyer view returned by get_dutch_auction_user_info
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UserAuctionInfoView {
    pub total_posted: u64,
    /// Computed at read time
    pub pending_rebate: u64,
    pub num_tokens_bought: u32,
    pub num_rebates: u32,
}
