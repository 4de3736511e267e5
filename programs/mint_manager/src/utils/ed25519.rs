use anchor_lang::prelude::*;
use anchor_lang::solana_program::ed25519_program;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::sysvar::instructions::get_instruction_relative;

/// Size of the precompile header: signature count + padding
const HEADER_LEN: usize = 2;
/// Size of one Ed25519SignatureOffsets entry (seven u16 fields)
const OFFSETS_LEN: usize = 14;
/// Instruction index meaning "data lives in this same instruction"
const CURRENT_INSTRUCTION: u16 = u16::MAX;

const PUBKEY_LEN: usize = 32;
const SIGNATURE_LEN: usize = 64;

/**
 * Checks that `ix` is an Ed25519 precompile instruction verifying exactly one
 * signature by `signer` over `message`.
 *
 * The runtime has already rejected the transaction if the signature was invalid,
 * so all that is left is to make sure it was checked over the values we expect.
 * Offsets must point into the precompile instruction itself; pointing at another
 * instruction's data would let a caller substitute a different message.
 */
pub fn is_ed25519_verification_of(
    ix: &Instruction,
    signer: &Pubkey,
    message: &[u8],
    signature: &[u8; 64],
) -> bool {
    if ix.program_id != ed25519_program::ID || !ix.accounts.is_empty() {
        return false;
    }

    let data = &ix.data;
    if data.len() < HEADER_LEN + OFFSETS_LEN || data[0] != 1 {
        return false;
    }

    let read_u16 = |at: usize| u16::from_le_bytes([data[at], data[at + 1]]);
    let offsets = HEADER_LEN;
    let signature_offset = read_u16(offsets) as usize;
    let signature_ix = read_u16(offsets + 2);
    let pubkey_offset = read_u16(offsets + 4) as usize;
    let pubkey_ix = read_u16(offsets + 6);
    let message_offset = read_u16(offsets + 8) as usize;
    let message_len = read_u16(offsets + 10) as usize;
    let message_ix = read_u16(offsets + 12);

    if signature_ix != CURRENT_INSTRUCTION
        || pubkey_ix != CURRENT_INSTRUCTION
        || message_ix != CURRENT_INSTRUCTION
    {
        return false;
    }

    let slice = |offset: usize, len: usize| data.get(offset..offset.checked_add(len)?);

    slice(pubkey_offset, PUBKEY_LEN) == Some(signer.as_ref())
        && slice(signature_offset, SIGNATURE_LEN) == Some(&signature[..])
        && message_len == message.len()
        && slice(message_offset, message_len) == Some(message)
}

/// Looks at the instruction right before the current one
pub fn preceding_ed25519_verifies(
    instructions_sysvar: &AccountInfo,
    signer: &Pubkey,
    message: &[u8],
    signature: &[u8; 64],
) -> Result<bool> {
    let ix = match get_instruction_relative(-1, instructions_sysvar) {
        Ok(ix) => ix,
        // No preceding instruction: nothing verified the signature
        Err(_) => return Ok(false),
    };
    Ok(is_ed25519_verification_of(&ix, signer, message, signature))
}
