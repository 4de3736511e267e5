use anchor_lang::prelude::Pubkey;

use crate::state::{AbridgedVector, AbridgedVectorConfig};

const LAMPORTS: u64 = 1_000_000_000;

fn open_config() -> AbridgedVectorConfig {
    AbridgedVectorConfig {
        edition_id: None,
        start_timestamp: 1_000,
        end_timestamp: 0,
        payment_recipient: Pubkey::new_unique(),
        price_per_token: LAMPORTS,
        token_limit_per_tx: 0,
        max_total_claimable: 5,
        max_user_claimable: 0,
        allowlist_root: [0; 32],
    }
}

fn new_vector(config: &AbridgedVectorConfig) -> AbridgedVector {
    let mut vector = AbridgedVector::default();
    vector
        .initialize(255, 1, Pubkey::new_unique(), config)
        .unwrap();
    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::encoding::*;
    use crate::error::MintManagerError;
    use crate::state::AbridgedVectorPatch;

    #[test]
    fn test_cap_five_sells_out_on_sixth() {
        let mut vector = new_vector(&open_config());

        for i in 0..5u32 {
            let price = vector.record_claim(1_000, 1, i).unwrap();
            assert_eq!(price, LAMPORTS);
        }
        assert_eq!(vector.total_claimed, 5);

        let result = vector.record_claim(1_000, 1, 5);
        assert_eq!(result.unwrap_err(), MintManagerError::SoldOut.into());
        assert_eq!(vector.total_claimed, 5);
    }

    #[test]
    fn test_claim_window_and_limits() {
        let mut config = open_config();
        config.end_timestamp = 2_000;
        config.token_limit_per_tx = 2;
        config.max_user_claimable = 3;
        config.max_total_claimable = 0;
        let mut vector = new_vector(&config);

        let result = vector.record_claim(999, 1, 0);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMint.into());
        let result = vector.record_claim(2_001, 1, 0);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMint.into());
        let result = vector.record_claim(1_500, 0, 0);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMint.into());

        let result = vector.record_claim(1_500, 3, 0);
        assert_eq!(result.unwrap_err(), MintManagerError::TxLimitExceeded.into());

        assert_eq!(vector.record_claim(2_000, 2, 0).unwrap(), 2 * LAMPORTS);
        let result = vector.record_claim(2_000, 2, 2);
        assert_eq!(result.unwrap_err(), MintManagerError::UserCapExceeded.into());
        assert_eq!(vector.total_claimed, 2);
    }

    #[test]
    fn test_paused_and_deleted_vectors_reject_claims() {
        let mut vector = new_vector(&open_config());

        vector.set_metadata(true, 42).unwrap();
        assert!(vector.is_paused());
        assert_eq!(vector.flexible_metadata(), 42);
        let result = vector.record_claim(1_000, 1, 0);
        assert_eq!(result.unwrap_err(), MintManagerError::MintPaused.into());

        vector.set_metadata(false, 42).unwrap();
        vector.record_claim(1_000, 1, 0).unwrap();

        vector.delete().unwrap();
        let result = vector.record_claim(1_000, 1, 1);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidMint.into());
        let result = vector.delete();
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidUpdate.into());
    }

    #[test]
    fn test_metadata_cannot_use_paused_bit() {
        let mut vector = new_vector(&open_config());
        let result = vector.set_metadata(false, VECTOR_PAUSED_BIT);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidVectorConfig.into());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut config = open_config();
        config.payment_recipient = Pubkey::default();
        let result = AbridgedVector::default().initialize(255, 1, Pubkey::new_unique(), &config);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidVectorConfig.into());

        let mut config = open_config();
        config.end_timestamp = config.start_timestamp;
        let result = AbridgedVector::default().initialize(255, 1, Pubkey::new_unique(), &config);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidVectorConfig.into());
    }

    #[test]
    fn test_update_mask_writes_only_named_fields() {
        let config = open_config();
        let mut vector = new_vector(&config);

        let mut update = AbridgedVectorConfig::default();
        update.max_user_claimable = 7;
        update.price_per_token = 9;

        let patch = AbridgedVectorPatch::from_mask(
            &update,
            VECTOR_UPDATE_MAX_USER_CLAIMABLE,
            false,
            0,
        );
        vector.apply_patch(&patch).unwrap();

        assert_eq!(vector.max_user_claimable, 7);
        assert_eq!(vector.price_per_token, config.price_per_token);
        assert_eq!(vector.payment_recipient, config.payment_recipient);
        assert_eq!(vector.start_timestamp, config.start_timestamp);

        assert!(AbridgedVectorPatch::from_mask(&update, 0, true, 1).is_empty());
    }

    #[test]
    fn test_frozen_fields_after_first_claim() {
        let mut vector = new_vector(&open_config());

        // Before any claim the price can move
        vector
            .apply_patch(&AbridgedVectorPatch::default().price_per_token(2 * LAMPORTS))
            .unwrap();
        assert_eq!(vector.price_per_token, 2 * LAMPORTS);

        vector.record_claim(1_000, 2, 0).unwrap();

        let result = vector.apply_patch(&AbridgedVectorPatch::default().price_per_token(LAMPORTS));
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidUpdate.into());
        let result = vector.apply_patch(&AbridgedVectorPatch::default().start_timestamp(0));
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidUpdate.into());

        // Cap below what was already claimed
        let result = vector.apply_patch(&AbridgedVectorPatch::default().max_total_claimable(1));
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidUpdate.into());
        assert_eq!(vector.max_total_claimable, 5);

        // Other fields stay mutable
        vector
            .apply_patch(
                &AbridgedVectorPatch::default()
                    .max_total_claimable(10)
                    .end_timestamp(5_000)
                    .metadata(true, 3),
            )
            .unwrap();
        assert_eq!(vector.max_total_claimable, 10);
        assert_eq!(vector.end_timestamp, 5_000);
        assert!(vector.is_paused());
    }

    #[test]
    fn test_failed_patch_changes_nothing() {
        let mut vector = new_vector(&open_config());
        let before = vector.clone();

        let patch = AbridgedVectorPatch::default()
            .max_user_claimable(4)
            .payment_recipient(Pubkey::default());
        let result = vector.apply_patch(&patch);

        assert_eq!(result.unwrap_err(), MintManagerError::InvalidVectorConfig.into());
        assert_eq!(vector.max_user_claimable, before.max_user_claimable);
        assert_eq!(vector.payment_recipient, before.payment_recipient);
    }

    #[test]
    fn test_packed_record_layout() {
        let mut config = open_config();
        config.edition_id = Some(7);
        config.allowlist_root = [9; 32];
        let mut vector = new_vector(&config);
        vector.record_claim(1_000, 3, 0).unwrap();
        vector.set_metadata(true, 5).unwrap();

        let packed = pack_abridged_vector(&vector);
        assert_eq!(packed.len(), PACKED_ABRIDGED_VECTOR_LEN);
        assert_eq!(&packed[0..32], vector.collection.as_ref());
        assert_eq!(&packed[32..40], &7u64.to_be_bytes());
        assert_eq!(packed[40], 1);
        assert_eq!(&packed[109..113], &3u32.to_be_bytes());
        assert_eq!(&packed[113..145], &[9u8; 32]);
        assert_eq!(packed[145], 0);
        assert_eq!(&packed[146..162], &(VECTOR_PAUSED_BIT | 5).to_be_bytes());

        let unpacked = unpack_abridged_vector(&packed).unwrap();
        assert_eq!(unpacked.collection, vector.collection);
        assert_eq!(unpacked.edition(), Some(7));
        assert_eq!(unpacked.total_claimed, 3);
        assert_eq!(unpacked.price_per_token, vector.price_per_token);
        assert!(unpacked.is_paused());
    }

    #[test]
    fn test_unpack_rejects_bad_input() {
        let vector = new_vector(&open_config());
        let packed = pack_abridged_vector(&vector);

        let result = unpack_abridged_vector(&packed[..161]);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidVectorConfig.into());

        let mut corrupted = packed;
        corrupted[40] = 2;
        let result = unpack_abridged_vector(&corrupted);
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidVectorConfig.into());
    }

    #[test]
    fn test_collection_wide_vector_uses_sentinel() {
        let vector = new_vector(&open_config());
        assert_eq!(vector.edition(), None);
        assert_eq!(vector.edition_id, EDITION_SENTINEL);

        let packed = pack_abridged_vector(&vector);
        assert_eq!(&packed[32..40], &u64::MAX.to_be_bytes());
        assert_eq!(packed[40], 0);
    }

    #[test]
    fn test_sentinel_edition_rejected() {
        let mut config = open_config();
        config.edition_id = Some(EDITION_SENTINEL);
        let mut vector = AbridgedVector::default();
        let result = vector.initialize(255, 1, Pubkey::new_unique(), &config);

        // Would pack the same as a collection-wide vector
        assert_eq!(result.unwrap_err(), MintManagerError::InvalidVectorConfig.into());
        assert_eq!(vector.vector_id, 0);

        config.edition_id = Some(EDITION_SENTINEL - 1);
        let vector = new_vector(&config);
        assert_eq!(vector.edition(), Some(EDITION_SENTINEL - 1));
    }
}
