use anchor_lang::prelude::*;
use crate::error::*;

/// Largest width a packed price may declare.
pub const MAX_BYTES_PER_PRICE: u8 = 32;

/// Smallest width that can hold every price (at least one byte)
pub fn min_bytes_per_price(prices: &[u64]) -> u8 {
    let max = prices.iter().copied().max().unwrap_or(0);
    let significant_bits = 64 - max.leading_zeros();
    (significant_bits.div_ceil(8)).max(1) as u8
}

/**
 * Packs prices with the minimum width that fits the largest one
 *
 * Layout: `[bytes_per_price: u8][price_0]..[price_{n-1}]`, each price a big-endian
 * unsigned integer of exactly `bytes_per_price` bytes. Widths above 8 bytes are
 * accepted as long as the extra leading bytes are zero, so a list packed for a
 * 256-bit ledger decodes unchanged when the values fit in lamports.
 */
pub fn encode_prices(prices: &[u64]) -> Vec<u8> {
    let width = min_bytes_per_price(prices);
    let mut packed = Vec::with_capacity(1 + prices.len() * width as usize);
    packed.push(width);
    pack_entries(prices, width, &mut packed);
    packed
}

/// Packs prices with an explicit width
#[cfg(test)]
pub fn encode_prices_with_width(prices: &[u64], bytes_per_price: u8) -> Result<Vec<u8>> {
    require!(
        bytes_per_price > 0 && bytes_per_price <= MAX_BYTES_PER_PRICE,
        MintManagerError::InvalidPackedPrices
    );
    require!(
        bytes_per_price >= min_bytes_per_price(prices),
        MintManagerError::InvalidPackedPrices
    );

    let mut packed = Vec::with_capacity(1 + prices.len() * bytes_per_price as usize);
    packed.push(bytes_per_price);
    pack_entries(prices, bytes_per_price, &mut packed);
    Ok(packed)
}

/// Reads `num_prices` entries from a width-prefixed packed list
pub fn decode_prices(packed: &[u8], num_prices: u32) -> Result<Vec<u64>> {
    let (&width, entries) = packed
        .split_first()
        .ok_or(MintManagerError::InvalidPackedPrices)?;
    decode_entries(entries, width, num_prices)
}

/// Reads `num_prices` entries of `bytes_per_price` bytes each (no width prefix)
pub fn decode_entries(entries: &[u8], bytes_per_price: u8, num_prices: u32) -> Result<Vec<u64>> {
    require!(
        bytes_per_price > 0 && bytes_per_price <= MAX_BYTES_PER_PRICE,
        MintManagerError::InvalidPackedPrices
    );
    let width = bytes_per_price as usize;
    let expected_len = width
        .checked_mul(num_prices as usize)
        .ok_or(MintManagerError::InvalidPackedPrices)?;
    require!(entries.len() == expected_len, MintManagerError::InvalidPackedPrices);

    entries.chunks_exact(width).map(read_price).collect()
}

/// Reads the price at `index` without decoding the whole list
pub fn price_at(entries: &[u8], bytes_per_price: u8, index: u32) -> Result<u64> {
    let width = bytes_per_price as usize;
    let start = width
        .checked_mul(index as usize)
        .ok_or(MintManagerError::InvalidPackedPrices)?;
    let chunk = entries
        .get(start..start + width)
        .ok_or(MintManagerError::InvalidPackedPrices)?;
    read_price(chunk)
}

fn pack_entries(prices: &[u64], width: u8, out: &mut Vec<u8>) {
    let width = width as usize;
    for price in prices {
        let be = price.to_be_bytes();
        if width >= be.len() {
            out.extend(std::iter::repeat(0u8).take(width - be.len()));
            out.extend_from_slice(&be);
        } else {
            out.extend_from_slice(&be[be.len() - width..]);
        }
    }
}

fn read_price(chunk: &[u8]) -> Result<u64> {
    let split = chunk.len().saturating_sub(8);
    let (high, low) = chunk.split_at(split);
    // Anything above 64 bits cannot be represented in lamports
    require!(high.iter().all(|b| *b == 0), MintManagerError::InvalidPackedPrices);

    let mut be = [0u8; 8];
    be[8 - low.len()..].copy_from_slice(low);
    Ok(u64::from_be_bytes(be))
}
