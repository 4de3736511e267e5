use anchor_lang::prelude::*;
use crate::error::*;
use crate::state::AbridgedVector;

pub const PACKED_ABRIDGED_VECTOR_LEN: usize = 162;

/**
 * Packed abridged vector record
 *
 * The record returned by `get_abridged_vector`. Fixed size, big-endian:
 *
 * | offset | width | field                 |
 * |--------|-------|-----------------------|
 * | 0      | 32    | collection            |
 * | 32     | 8     | edition id            |
 * | 40     | 1     | edition based         |
 * | 41     | 8     | start timestamp       |
 * | 49     | 8     | end timestamp         |
 * | 57     | 32    | payment recipient     |
 * | 89     | 8     | price per token       |
 * | 97     | 4     | token limit per tx    |
 * | 101    | 4     | max total claimable   |
 * | 105    | 4     | max user claimable    |
 * | 109    | 4     | total claimed         |
 * | 113    | 32    | allowlist root        |
 * | 145    | 1     | deleted               |
 * | 146    | 16    | metadata (paused bit) |
 */
pub fn pack_abridged_vector(vector: &AbridgedVector) -> [u8; PACKED_ABRIDGED_VECTOR_LEN] {
    let mut out = [0u8; PACKED_ABRIDGED_VECTOR_LEN];
    let mut writer = Writer { buf: &mut out, pos: 0 };

    writer.put(vector.collection.as_ref());
    writer.put(&vector.edition_id.to_be_bytes());
    writer.put(&[vector.edition_based as u8]);
    writer.put(&vector.start_timestamp.to_be_bytes());
    writer.put(&vector.end_timestamp.to_be_bytes());
    writer.put(vector.payment_recipient.as_ref());
    writer.put(&vector.price_per_token.to_be_bytes());
    writer.put(&vector.token_limit_per_tx.to_be_bytes());
    writer.put(&vector.max_total_claimable.to_be_bytes());
    writer.put(&vector.max_user_claimable.to_be_bytes());
    writer.put(&vector.total_claimed.to_be_bytes());
    writer.put(&vector.allowlist_root);
    writer.put(&[vector.deleted as u8]);
    writer.put(&vector.metadata.to_be_bytes());

    out
}

/// Decodes a packed record. The vector id and bump are not part of the record.
pub fn unpack_abridged_vector(packed: &[u8]) -> Result<AbridgedVector> {
    require!(
        packed.len() == PACKED_ABRIDGED_VECTOR_LEN,
        MintManagerError::InvalidVectorConfig
    );
    let mut reader = Reader { buf: packed, pos: 0 };

    Ok(AbridgedVector {
        collection: Pubkey::new_from_array(reader.take()),
        edition_id: u64::from_be_bytes(reader.take()),
        edition_based: reader.take_bool()?,
        start_timestamp: i64::from_be_bytes(reader.take()),
        end_timestamp: i64::from_be_bytes(reader.take()),
        payment_recipient: Pubkey::new_from_array(reader.take()),
        price_per_token: u64::from_be_bytes(reader.take()),
        token_limit_per_tx: u32::from_be_bytes(reader.take()),
        max_total_claimable: u32::from_be_bytes(reader.take()),
        max_user_claimable: u32::from_be_bytes(reader.take()),
        total_claimed: u32::from_be_bytes(reader.take()),
        allowlist_root: reader.take(),
        deleted: reader.take_bool()?,
        metadata: u128::from_be_bytes(reader.take()),
        ..AbridgedVector::default()
    })
}

struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl Writer<'_> {
    fn put(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    // Callers check the total length up front
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn take_bool(&mut self) -> Result<bool> {
        match self.take::<1>()[0] {
            0 => Ok(false),
            1 => Ok(true),
            _ => err!(MintManagerError::InvalidVectorConfig),
        }
    }
}
