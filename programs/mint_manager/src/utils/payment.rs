use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use crate::error::*;

/// Native lamport transfer through the system program. A zero amount is a no-op.
pub fn transfer_lamports<'a>(
    from: AccountInfo<'a>,
    to: AccountInfo<'a>,
    system_program: AccountInfo<'a>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let cpi_accounts = Transfer { from, to };
    transfer(CpiContext::new(system_program, cpi_accounts), amount)
}

/// Moves lamports out of an escrow account owned by this program.
/// The escrow has to stay rent exempt afterwards.
pub fn debit_escrow<'a>(
    escrow: &AccountInfo<'a>,
    destination: &AccountInfo<'a>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let rent_exempt_balance = Rent::get()?.minimum_balance(escrow.data_len());
    let escrow_balance = escrow.lamports();
    let available = escrow_balance
        .checked_sub(rent_exempt_balance)
        .ok_or(MintManagerError::InsufficientEscrow)?;
    require!(available >= amount, MintManagerError::InsufficientEscrow);

    let destination_balance = destination.lamports();
    **escrow.try_borrow_mut_lamports()? = escrow_balance
        .checked_sub(amount)
        .ok_or(MintManagerError::ArithmeticOverflow)?;
    **destination.try_borrow_mut_lamports()? = destination_balance
        .checked_add(amount)
        .ok_or(MintManagerError::ArithmeticOverflow)?;
    Ok(())
}
