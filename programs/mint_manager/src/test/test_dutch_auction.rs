use anchor_lang::prelude::*;

use crate::encoding::*;
use crate::state::*;

const LAMPORTS: u64 = 1_000_000_000;
const START: i64 = 1_000;
const PERIOD: u32 = 100;
const END: i64 = 2_000;

/// 1.0, 0.8, 0.6, 0.4 SOL
fn curve() -> Vec<u64> {
    vec![LAMPORTS, LAMPORTS * 8 / 10, LAMPORTS * 6 / 10, LAMPORTS * 4 / 10]
}

fn auction_config(recipient: Pubkey, prices: &[u64], max_total_claimable: u32) -> DutchAuctionConfig {
    DutchAuctionConfig {
        start_timestamp: START,
        end_timestamp: END,
        period_duration: PERIOD,
        max_user_claimable: 0,
        max_total_claimable,
        token_limit_per_tx: 0,
        payment_recipient: recipient,
        num_prices: prices.len() as u32,
        packed_prices: encode_prices(prices),
    }
}

/// Auction plus a running balance of what it holds in escrow
struct AuctionHarness {
    vector: DutchAuctionVector,
    escrow: Pubkey,
    escrow_balance: i128,
}

impl AuctionHarness {
    fn new(max_total_claimable: u32) -> Self {
        let escrow = Pubkey::new_unique();
        let config = auction_config(Pubkey::new_unique(), &curve(), max_total_claimable);
        let mut vector = DutchAuctionVector::default();
        vector.initialize(255, [9; 32], &config, &escrow).unwrap();
        AuctionHarness { vector, escrow, escrow_balance: 0 }
    }

    fn buy(&mut self, now: i64, user: &mut UserAuctionInfo, num_tokens: u32, payment: u64) -> Result<AuctionPurchase> {
        let purchase = self.vector.process_purchase(now, user, num_tokens, payment)?;
        assert_eq!(purchase.escrowed + purchase.paid_to_recipient, payment);
        self.escrow_balance += purchase.escrowed as i128;
        Ok(purchase)
    }

    fn rebate(&mut self, now: i64, user: &mut UserAuctionInfo) -> Result<u64> {
        let owed = self.vector.collect_rebate(now, user)?;
        self.escrow_balance -= owed as i128;
        assert!(self.escrow_balance >= 0, "escrow overdrawn by a rebate");
        Ok(owed)
    }

    fn withdraw(&mut self, now: i64) -> Result<u64> {
        let amount = self.vector.withdraw_dpp_funds(now)?;
        self.escrow_balance -= amount as i128;
        assert!(self.escrow_balance >= 0, "escrow overdrawn by the payee");
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MintManagerError;

    #[test]
    fn test_price_curve() {
        let harness = AuctionHarness::new(0);
        let vector = &harness.vector;

        assert_eq!(vector.current_price(START - 50).unwrap(), LAMPORTS);
        assert_eq!(vector.current_price(START).unwrap(), LAMPORTS);
        assert_eq!(vector.current_price(START + 99).unwrap(), LAMPORTS);
        assert_eq!(vector.current_price(START + 100).unwrap(), LAMPORTS * 8 / 10);
        assert_eq!(vector.current_price(START + 250).unwrap(), LAMPORTS * 6 / 10);
        assert_eq!(vector.current_price(START + 300).unwrap(), LAMPORTS * 4 / 10);
        assert_eq!(vector.current_price(END).unwrap(), LAMPORTS * 4 / 10);
        assert_eq!(vector.current_price(END + 10_000).unwrap(), LAMPORTS * 4 / 10);

        let mut last = u64::MAX;
        for now in (START - 100..END + 100).step_by(7) {
            let price = vector.current_price(now).unwrap();
            assert!(price <= last);
            last = price;
        }
    }

    #[test]
    fn test_phases() {
        let harness = AuctionHarness::new(0);
        let vector = &harness.vector;

        assert_eq!(vector.fpp_start(), START + 300);
        assert_eq!(vector.phase(START - 1), AuctionPhase::NotStarted);
        assert_eq!(vector.phase(START), AuctionPhase::Decaying);
        assert_eq!(vector.phase(START + 299), AuctionPhase::Decaying);
        assert_eq!(vector.phase(START + 300), AuctionPhase::FixedPricePlateau);
        assert_eq!(vector.phase(END), AuctionPhase::FixedPricePlateau);
        assert_eq!(vector.phase(END + 1), AuctionPhase::Ended);
    }

    #[test]
    fn test_prices_stored_at_narrowest_width() {
        let escrow = Pubkey::new_unique();
        let mut config = auction_config(Pubkey::new_unique(), &curve(), 0);
        config.packed_prices = encode_prices_with_width(&curve(), 32).unwrap();

        let mut vector = DutchAuctionVector::default();
        vector.initialize(1, [1; 32], &config, &escrow).unwrap();

        assert_eq!(vector.bytes_per_price, 4);
        assert_eq!(vector.packed_prices.len(), 16);
        assert_eq!(vector.prices().unwrap(), curve());
        assert_eq!(vector.encoded_prices(), encode_prices(&curve()));
    }

    #[test]
    fn test_rebate_down_to_current_price() {
        let mut harness = AuctionHarness::new(0);
        let mut buyer = UserAuctionInfo::default();

        harness.buy(START, &mut buyer, 1, LAMPORTS).unwrap();
        assert_eq!(buyer.pending_rebate, 0);

        // Price is 0.8 one and a half periods in
        let owed = harness.rebate(START + 150, &mut buyer).unwrap();
        assert_eq!(owed, LAMPORTS * 2 / 10);
        assert_eq!(buyer.total_posted, LAMPORTS * 8 / 10);
        assert_eq!(buyer.num_rebates, 1);
        assert_eq!(buyer.pending_rebate, 0);

        let result = harness.rebate(START + 150, &mut buyer);
        assert_eq!(result.unwrap_err(), MintManagerError::CollectorNotOwedRebate.into());
    }

    #[test]
    fn test_rebate_requires_sales() {
        let mut harness = AuctionHarness::new(0);
        let mut buyer = UserAuctionInfo::default();

        let result = harness.rebate(START + 350, &mut buyer);
        assert_eq!(result.unwrap_err(), MintManagerError::CollectorNotOwedRebate.into());
    }

    #[test]
    fn test_overpayment_is_owed_right_away() {
        let mut harness = AuctionHarness::new(0);
        let mut buyer = UserAuctionInfo::default();

        harness.buy(START, &mut buyer, 2, LAMPORTS * 25 / 10).unwrap();
        assert_eq!(buyer.pending_rebate, LAMPORTS / 2);

        let view = harness.vector.user_info(START + 100, &buyer).unwrap();
        assert_eq!(view.pending_rebate, LAMPORTS * 9 / 10);
        assert_eq!(view.num_tokens_bought, 2);
    }

    #[test]
    fn test_clearing_price_fixed_by_exhaustion() {
        let mut harness = AuctionHarness::new(4);
        let mut a = UserAuctionInfo::default();
        let mut b = UserAuctionInfo::default();
        let mut c = UserAuctionInfo::default();

        harness.buy(START, &mut a, 1, LAMPORTS).unwrap();
        harness.buy(START + 150, &mut b, 2, LAMPORTS * 16 / 10).unwrap();
        assert_eq!(harness.rebate(START + 150, &mut a).unwrap(), LAMPORTS * 2 / 10);

        // Last token sells at 0.6 with a 0.1 overpayment
        harness.buy(START + 250, &mut c, 1, LAMPORTS * 7 / 10).unwrap();
        assert!(harness.vector.is_exhausted());
        assert!(harness.vector.escrow_funds_finalized);
        assert_eq!(harness.vector.lowest_price_sold_at_index, 2);

        let result = harness.buy(START + 260, &mut c, 1, LAMPORTS);
        assert_eq!(result.unwrap_err(), MintManagerError::SoldOut.into());

        // Finalized: later price drops do not change the settlement
        assert_eq!(harness.vector.settlement_price(END).unwrap(), LAMPORTS * 6 / 10);

        assert_eq!(harness.withdraw(START + 250).unwrap(), LAMPORTS * 6 / 10 * 4);
        assert_eq!(harness.rebate(END, &mut a).unwrap(), LAMPORTS * 2 / 10);
        assert_eq!(harness.rebate(END, &mut b).unwrap(), LAMPORTS * 4 / 10);
        assert_eq!(harness.rebate(END, &mut c).unwrap(), LAMPORTS / 10);

        assert_eq!(harness.escrow_balance, 0);
    }

    #[test]
    fn test_withdraw_rules() {
        let mut harness = AuctionHarness::new(10);
        let mut buyer = UserAuctionInfo::default();

        // Nothing sold
        let result = harness.withdraw(START + 300);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidDppFundsWithdrawal.into());

        harness.buy(START + 10, &mut buyer, 3, LAMPORTS * 3).unwrap();

        // Still decaying and not exhausted
        let result = harness.withdraw(START + 299);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidDppFundsWithdrawal.into());
        assert!(!harness.vector.escrow_funds_finalized);

        // Plateau settles at the last price
        let amount = harness.withdraw(START + 300).unwrap();
        assert_eq!(amount, LAMPORTS * 4 / 10 * 3);
        assert!(harness.vector.escrow_funds_finalized);
        assert!(harness.vector.payee_revenue_withdrawn);
        assert_eq!(harness.vector.lowest_price_sold_at_index, 3);

        let result = harness.withdraw(START + 400);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidDppFundsWithdrawal.into());

        assert_eq!(harness.rebate(START + 400, &mut buyer).unwrap(), LAMPORTS * 18 / 10);
        assert_eq!(harness.escrow_balance, 0);
    }

    #[test]
    fn test_purchase_after_withdrawal_pays_recipient() {
        let mut harness = AuctionHarness::new(0);
        let mut early = UserAuctionInfo::default();
        let mut late = UserAuctionInfo::default();

        harness.buy(START, &mut early, 1, LAMPORTS).unwrap();
        harness.withdraw(START + 300).unwrap();

        let purchase = harness.buy(START + 500, &mut late, 1, LAMPORTS / 2).unwrap();
        assert_eq!(purchase.price_per_token, LAMPORTS * 4 / 10);
        assert_eq!(purchase.paid_to_recipient, LAMPORTS * 4 / 10);
        assert_eq!(purchase.escrowed, LAMPORTS / 10);
        assert_eq!(harness.vector.total_sales, LAMPORTS * 14 / 10);

        assert_eq!(harness.rebate(START + 500, &mut late).unwrap(), LAMPORTS / 10);
        assert_eq!(harness.rebate(START + 500, &mut early).unwrap(), LAMPORTS * 6 / 10);
        assert_eq!(harness.escrow_balance, 0);
    }

    #[test]
    fn test_escrow_stays_solvent() {
        let mut harness = AuctionHarness::new(12);
        let mut buyers: Vec<UserAuctionInfo> = (0..4).map(|_| UserAuctionInfo::default()).collect();

        let schedule: [(i64, usize, u32); 6] = [
            (START, 0, 2),
            (START + 120, 1, 1),
            (START + 130, 2, 3),
            (START + 210, 0, 1),
            (START + 330, 3, 2),
            (START + 450, 1, 1),
        ];
        for (now, who, num_tokens) in schedule {
            let price = harness.vector.current_price(now).unwrap();
            let payment = price * num_tokens as u64 + (who as u64) * 1_000;
            harness.buy(now, &mut buyers[who], num_tokens, payment).unwrap();
            for buyer in buyers.iter_mut() {
                let _ = harness.rebate(now, buyer);
            }
        }

        harness.withdraw(START + 500).unwrap();
        for buyer in buyers.iter_mut() {
            let _ = harness.rebate(END, buyer);
        }
        assert_eq!(harness.escrow_balance, 0);
    }

    #[test]
    fn test_purchase_limits() {
        let escrow = Pubkey::new_unique();
        let mut config = auction_config(Pubkey::new_unique(), &curve(), 5);
        config.token_limit_per_tx = 2;
        config.max_user_claimable = 3;
        let mut vector = DutchAuctionVector::default();
        vector.initialize(1, [1; 32], &config, &escrow).unwrap();

        let mut buyer = UserAuctionInfo::default();
        let mut other = UserAuctionInfo::default();

        let result = vector.process_purchase(START - 1, &mut buyer, 1, LAMPORTS);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMint.into());
        let result = vector.process_purchase(END + 1, &mut buyer, 1, LAMPORTS);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMint.into());
        let result = vector.process_purchase(START, &mut buyer, 0, 0);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMint.into());

        let result = vector.process_purchase(START, &mut buyer, 3, LAMPORTS * 3);
        assert_eq!(result.unwrap_err(), MintManagerError::TxLimitExceeded.into());

        let result = vector.process_purchase(START, &mut buyer, 2, LAMPORTS * 2 - 1);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidPaymentAmount.into());

        vector.process_purchase(START, &mut buyer, 2, LAMPORTS * 2).unwrap();
        let result = vector.process_purchase(START, &mut buyer, 2, LAMPORTS * 2);
        assert_eq!(result.unwrap_err(), MintManagerError::UserCapExceeded.into());

        vector.process_purchase(START, &mut other, 2, LAMPORTS * 2).unwrap();
        let result = vector.process_purchase(START, &mut buyer, 2, LAMPORTS * 2);
        assert_eq!(result.unwrap_err(), MintManagerError::SoldOut.into());

        // Purchase at the end timestamp is still inside the plateau
        vector.process_purchase(END, &mut buyer, 1, LAMPORTS).unwrap();
        assert_eq!(vector.current_supply, 5);
        assert!(vector.is_exhausted());
    }

    #[test]
    fn test_invalid_configs() {
        let escrow = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let invalid = |config: DutchAuctionConfig| {
            let result = DutchAuctionVector::default().initialize(1, [1; 32], &config, &escrow);
            assert_eq!(result.unwrap_err(), MintManagerError::InvalidVectorConfig.into());
        };

        invalid(auction_config(recipient, &[LAMPORTS], 0));
        invalid(auction_config(recipient, &[LAMPORTS, LAMPORTS], 0));
        invalid(auction_config(recipient, &[LAMPORTS / 2, LAMPORTS], 0));
        invalid(auction_config(Pubkey::default(), &curve(), 0));
        invalid(auction_config(escrow, &curve(), 0));
        invalid(DutchAuctionConfig {
            period_duration: 0,
            ..auction_config(recipient, &curve(), 0)
        });
        // Three decay periods need strictly more than 300 seconds
        invalid(DutchAuctionConfig {
            end_timestamp: START + 300,
            ..auction_config(recipient, &curve(), 0)
        });

        let config = DutchAuctionConfig {
            end_timestamp: START + 301,
            ..auction_config(recipient, &curve(), 0)
        };
        DutchAuctionVector::default()
            .initialize(1, [1; 32], &config, &escrow)
            .unwrap();

        let config = DutchAuctionConfig {
            num_prices: 5,
            ..auction_config(recipient, &curve(), 0)
        };
        let result = DutchAuctionVector::default().initialize(1, [1; 32], &config, &escrow);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidPackedPrices.into());
    }

    #[test]
    fn test_update_before_and_after_sale() {
        use crate::constants::*;

        let mut harness = AuctionHarness::new(0);
        let escrow = harness.escrow;
        let cheaper = vec![LAMPORTS / 2, LAMPORTS / 4];
        let update = auction_config(Pubkey::new_unique(), &cheaper, 0);

        let result = harness.vector.apply_update(&update, 0, &escrow);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidUpdate.into());

        harness
            .vector
            .apply_update(&update, AUCTION_UPDATE_PRICES, &escrow)
            .unwrap();
        assert_eq!(harness.vector.prices().unwrap(), cheaper);
        assert_eq!(harness.vector.fpp_start(), START + 100);

        let mut buyer = UserAuctionInfo::default();
        harness.buy(START, &mut buyer, 1, LAMPORTS / 2).unwrap();

        for frozen in [
            AUCTION_UPDATE_START_TIMESTAMP,
            AUCTION_UPDATE_END_TIMESTAMP,
            AUCTION_UPDATE_MAX_TOTAL_CLAIMABLE,
            AUCTION_UPDATE_PRICES,
            AUCTION_UPDATE_PERIOD_DURATION,
        ] {
            let result = harness.vector.apply_update(&update, frozen, &escrow);
            assert_eq!(result.unwrap_err(), MintManagerError::InvalidUpdate.into());
        }

        let update = DutchAuctionConfig {
            token_limit_per_tx: 3,
            max_user_claimable: 4,
            ..update
        };
        harness
            .vector
            .apply_update(
                &update,
                AUCTION_UPDATE_PAYMENT_RECIPIENT
                    | AUCTION_UPDATE_TOKEN_LIMIT_PER_TX
                    | AUCTION_UPDATE_MAX_USER_CLAIMABLE,
                &escrow,
            )
            .unwrap();
        assert_eq!(harness.vector.payment_recipient, update.payment_recipient);
        assert_eq!(harness.vector.token_limit_per_tx, 3);
        assert_eq!(harness.vector.max_user_claimable, 4);
    }

    #[test]
    fn test_failed_update_changes_nothing() {
        use crate::constants::*;

        let mut harness = AuctionHarness::new(0);
        let escrow = harness.escrow;
        let before = harness.vector.clone();

        let update = DutchAuctionConfig {
            end_timestamp: START + 200,
            token_limit_per_tx: 7,
            ..auction_config(Pubkey::new_unique(), &curve(), 0)
        };
        let result = harness.vector.apply_update(
            &update,
            AUCTION_UPDATE_END_TIMESTAMP | AUCTION_UPDATE_TOKEN_LIMIT_PER_TX,
            &escrow,
        );
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidVectorConfig.into());
        assert_eq!(harness.vector.end_timestamp, before.end_timestamp);
        assert_eq!(harness.vector.token_limit_per_tx, before.token_limit_per_tx);

        let update = DutchAuctionConfig { payment_recipient: escrow, ..update };
        let result = harness.vector.apply_update(&update, AUCTION_UPDATE_PAYMENT_RECIPIENT, &escrow);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidVectorConfig.into());
    }

    #[test]
    fn test_state_view() {
        let mut harness = AuctionHarness::new(2);
        let mut buyer = UserAuctionInfo::default();
        harness.buy(START + 120, &mut buyer, 2, LAMPORTS * 2).unwrap();

        let state = harness.vector.state(START + 220).unwrap();
        assert_eq!(state.start_timestamp, START);
        assert_eq!(state.end_timestamp, END);
        assert_eq!(state.num_prices, 4);
        assert_eq!(state.packed_prices, encode_prices(&curve()));
        assert_eq!(state.current_price, LAMPORTS * 6 / 10);
        assert_eq!(state.current_supply, 2);
        assert_eq!(state.lowest_price_sold_at_index, 1);
        assert_eq!(state.total_sales, LAMPORTS * 16 / 10);
        assert!(state.auction_exhausted);
        assert!(state.escrow_funds_finalized);
        assert!(!state.payee_revenue_withdrawn);

        let view = harness.vector.user_info(START + 220, &buyer).unwrap();
        assert_eq!(view.pending_rebate, LAMPORTS * 4 / 10);
    }

    #[test]
    fn test_rebate_without_record_not_owed() {
        use crate::instructions::load_auction_user;

        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: [u8; 0] = [];
        let system_program = anchor_lang::system_program::ID;
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &system_program, false, 0);

        let result = load_auction_user(&info);
        assert_eq!(result.unwrap_err(), MintManagerError::CollectorNotOwedRebate.into());
    }

    #[test]
    fn test_rebate_record_loaded() {
        use crate::instructions::load_auction_user;

        let record = UserAuctionInfo {
            total_posted: 3 * LAMPORTS,
            pending_rebate: LAMPORTS / 2,
            num_tokens_bought: 3,
            num_rebates: 1,
        };
        let mut data = Vec::new();
        record.try_serialize(&mut data).unwrap();

        let key = Pubkey::new_unique();
        let mut lamports = LAMPORTS;
        let owner = crate::ID;
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        let loaded = load_auction_user(&info).unwrap();
        assert_eq!(loaded.total_posted, record.total_posted);
        assert_eq!(loaded.pending_rebate, record.pending_rebate);
        assert_eq!(loaded.num_tokens_bought, 3);
        assert_eq!(loaded.num_rebates, 1);

        // Same bytes under another program are not a record
        let mut lamports = LAMPORTS;
        let other = Pubkey::new_unique();
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &other, false, 0);
        assert_eq!(
            load_auction_user(&info).unwrap_err(),
            anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram.into()
        );
    }
}
