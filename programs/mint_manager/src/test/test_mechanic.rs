use anchor_lang::prelude::*;

use crate::constants::EDITION_SENTINEL;
use crate::encoding::encode_prices;
use crate::mechanics::*;
use crate::state::*;

const LAMPORTS: u64 = 1_000_000_000;
const KEY: [u8; 32] = [4; 32];

fn auction(recipient: Pubkey) -> DutchAuctionVector {
    let prices = [LAMPORTS, LAMPORTS / 2];
    let config = DutchAuctionConfig {
        start_timestamp: 0,
        end_timestamp: 1_000,
        period_duration: 100,
        max_user_claimable: 0,
        max_total_claimable: 10,
        token_limit_per_tx: 0,
        payment_recipient: recipient,
        num_prices: prices.len() as u32,
        packed_prices: encode_prices(&prices),
    };
    let mut vector = DutchAuctionVector::default();
    vector
        .initialize(254, KEY, &config, &Pubkey::new_unique())
        .unwrap();
    vector
}

fn request(key: [u8; 32], payment: u64, now: i64) -> MechanicMintRequest {
    MechanicMintRequest { key, payment, now }
}

fn metadata(is_choose: bool) -> MechanicVectorMetadata {
    MechanicVectorMetadata {
        bump: 255,
        key: KEY,
        collection: Pubkey::new_unique(),
        edition_id: EDITION_SENTINEL,
        mechanic: MechanicKind::DiscreteDutchAuction.address(),
        mechanic_kind: MechanicKind::DiscreteDutchAuction,
        is_edition_based: false,
        is_choose,
        paused: false,
    }
}

fn outcome(escrowed: u64, paid_to_recipient: u64, payment_recipient: Pubkey) -> MechanicMintOutcome {
    MechanicMintOutcome {
        num_minted: 1,
        token_ids: vec![],
        escrowed,
        paid_to_recipient,
        payment_recipient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MintManagerError;

    #[test]
    fn test_vector_key_derivation() {
        let collection = Pubkey::new_unique();
        let mechanic = MechanicKind::DiscreteDutchAuction.address();

        let key = mechanic_vector_key(&collection, None, &mechanic, 0);
        assert_eq!(key, mechanic_vector_key(&collection, None, &mechanic, 0));

        assert_ne!(key, mechanic_vector_key(&collection, Some(0), &mechanic, 0));
        assert_ne!(key, mechanic_vector_key(&collection, None, &mechanic, 1));
        assert_ne!(key, mechanic_vector_key(&Pubkey::new_unique(), None, &mechanic, 0));
        assert_ne!(key, mechanic_vector_key(&collection, None, &Pubkey::new_unique(), 0));
    }

    #[test]
    fn test_sentinel_edition_rejected_at_registration() {
        let mechanic = MechanicKind::DiscreteDutchAuction.address();
        let config = |edition_id| MechanicVectorConfig {
            edition_id,
            mechanic,
            is_choose: false,
            seed: 0,
        };

        // Would hash to the same key as a collection-wide vector
        let result = config(Some(EDITION_SENTINEL)).validate();
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidVectorConfig.into());

        assert!(config(None).validate().is_ok());
        assert!(config(Some(0)).validate().is_ok());
        assert!(config(Some(EDITION_SENTINEL - 1)).validate().is_ok());
    }

    #[test]
    fn test_mechanic_registry() {
        for kind in MechanicKind::ALL {
            assert_eq!(MechanicKind::from_address(&kind.address()), Some(kind));
        }
        assert_eq!(MechanicKind::from_address(&Pubkey::new_unique()), None);
        assert!(!MechanicKind::DiscreteDutchAuction.supports_choose());
    }

    #[test]
    fn test_mint_call_shape() {
        assert!(!MintCall::Count(3).is_choose());
        assert_eq!(MintCall::Count(3).num_tokens(), 3);
        assert!(MintCall::Choose(vec![7, 9]).is_choose());
        assert_eq!(MintCall::Choose(vec![7, 9]).num_tokens(), 2);
    }

    #[test]
    fn test_count_dispatch() {
        let recipient = Pubkey::new_unique();
        let mut vector = auction(recipient);
        let mut user = UserAuctionInfo::default();

        let outcome = {
            let mut mechanic = DiscreteDutchAuction { vector: &mut vector, user: &mut user };
            dispatch_mint(&mut mechanic, &request(KEY, 2 * LAMPORTS, 0), &MintCall::Count(2), &[]).unwrap()
        };

        assert_eq!(
            outcome,
            MechanicMintOutcome {
                num_minted: 2,
                token_ids: vec![],
                escrowed: 2 * LAMPORTS,
                paid_to_recipient: 0,
                payment_recipient: recipient,
            }
        );
        assert_eq!(vector.current_supply, 2);
        assert_eq!(user.num_tokens_bought, 2);
        assert_eq!(user.total_posted, 2 * LAMPORTS);
    }

    #[test]
    fn test_choose_dispatch_rejected() {
        let mut vector = auction(Pubkey::new_unique());
        let mut user = UserAuctionInfo::default();
        let mut mechanic = DiscreteDutchAuction { vector: &mut vector, user: &mut user };

        let result = dispatch_mint(
            &mut mechanic,
            &request(KEY, LAMPORTS, 0),
            &MintCall::Choose(vec![1]),
            &[],
        );
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMechanic.into());
    }

    #[test]
    fn test_key_mismatch_rejected() {
        let mut vector = auction(Pubkey::new_unique());
        let mut user = UserAuctionInfo::default();

        let result = {
            let mut mechanic = DiscreteDutchAuction { vector: &mut vector, user: &mut user };
            dispatch_mint(&mut mechanic, &request([5; 32], LAMPORTS, 0), &MintCall::Count(1), &[])
        };
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMechanic.into());
        assert_eq!(vector.current_supply, 0);
        assert_eq!(user.total_posted, 0);
    }

    #[test]
    fn test_auction_errors_surface_through_dispatch() {
        let mut vector = auction(Pubkey::new_unique());
        let mut user = UserAuctionInfo::default();
        let mut mechanic = DiscreteDutchAuction { vector: &mut vector, user: &mut user };

        let result = dispatch_mint(&mut mechanic, &request(KEY, LAMPORTS - 1, 0), &MintCall::Count(1), &[]);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidPaymentAmount.into());

        let result = dispatch_mint(&mut mechanic, &request(KEY, LAMPORTS, 1_001), &MintCall::Count(1), &[]);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMint.into());
    }

    #[test]
    fn test_paused_vector_rejects_until_unpaused() {
        let mut vector = metadata(false);
        vector.paused = true;

        let result = vector.check_call(&MintCall::Count(1), LAMPORTS, 0);
        assert_eq!(result.unwrap_err(), MintManagerError::MechanicPaused.into());

        vector.paused = false;
        assert!(vector.check_call(&MintCall::Count(1), LAMPORTS, 0).is_ok());
    }

    #[test]
    fn test_call_shape_must_match_vector() {
        let result = metadata(true).check_call(&MintCall::Count(1), LAMPORTS, 0);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMechanic.into());

        let result = metadata(false).check_call(&MintCall::Choose(vec![3]), LAMPORTS, 0);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMechanic.into());

        assert!(metadata(true).check_call(&MintCall::Choose(vec![3]), LAMPORTS, 0).is_ok());
    }

    #[test]
    fn test_empty_call_rejected() {
        let result = metadata(false).check_call(&MintCall::Count(0), LAMPORTS, 0);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMint.into());

        let result = metadata(true).check_call(&MintCall::Choose(vec![]), LAMPORTS, 0);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMint.into());
    }

    #[test]
    fn test_payment_must_cover_fee() {
        let vector = metadata(false);
        let fee = 5_000;

        let result = vector.check_call(&MintCall::Count(2), fee - 1, fee);
        assert_eq!(result.unwrap_err(), MintManagerError::MintFeeTooLow.into());

        assert!(vector.check_call(&MintCall::Count(2), fee, fee).is_ok());
    }

    #[test]
    fn test_paused_checked_before_shape() {
        let mut vector = metadata(true);
        vector.paused = true;

        let result = vector.check_call(&MintCall::Count(0), 0, 1);
        assert_eq!(result.unwrap_err(), MintManagerError::MechanicPaused.into());
    }

    #[test]
    fn test_settlement_must_forward_exact_payment() {
        let recipient = Pubkey::new_unique();

        assert!(outcome(600, 400, recipient).check_settlement(1_000, &recipient).is_ok());

        let result = outcome(600, 399, recipient).check_settlement(1_000, &recipient);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidPaymentAmount.into());

        let result = outcome(600, 401, recipient).check_settlement(1_000, &recipient);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidPaymentAmount.into());

        let result = outcome(u64::MAX, 1, recipient).check_settlement(u64::MAX, &recipient);
        assert_eq!(result.unwrap_err(), MintManagerError::ArithmeticOverflow.into());
    }

    #[test]
    fn test_settlement_must_name_passed_recipient() {
        let recipient = Pubkey::new_unique();

        let result = outcome(1_000, 0, recipient).check_settlement(1_000, &Pubkey::new_unique());
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMechanic.into());
    }

    #[test]
    fn test_dispatched_outcome_settles() {
        let recipient = Pubkey::new_unique();
        let mut vector = auction(recipient);
        let mut user = UserAuctionInfo::default();
        let mut mechanic = DiscreteDutchAuction { vector: &mut vector, user: &mut user };

        let request = request(KEY, 3 * LAMPORTS, 0);
        let outcome = dispatch_mint(&mut mechanic, &request, &MintCall::Count(3), &[]).unwrap();
        assert!(outcome.check_settlement(request.payment, &recipient).is_ok());
    }
}
