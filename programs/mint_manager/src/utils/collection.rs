use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::{get_return_data, invoke_signed};
use crate::constants::*;
use crate::error::*;

const COLLECTION_OWNER_OFFSET: usize = 8;

/// Owner recorded in the collection account
pub fn collection_owner(collection: &AccountInfo) -> Result<Pubkey> {
    let data = collection.try_borrow_data()?;
    let owner = data
        .get(COLLECTION_OWNER_OFFSET..COLLECTION_OWNER_OFFSET + 32)
        .ok_or(MintManagerError::InvalidCollection)?;
    Ok(Pubkey::new_from_array(
        owner.try_into().map_err(|_| MintManagerError::InvalidCollection)?,
    ))
}

pub fn require_collection_owner(collection: &AccountInfo, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(
        collection_owner(collection)?,
        *signer,
        MintManagerError::Unauthorized
    );
    Ok(())
}

fn instruction_discriminator(name: &str) -> [u8; 8] {
    let preimage = format!("global:{}", name);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    discriminator
}

fn instruction_data<T: AnchorSerialize>(name: &str, args: &T) -> Result<Vec<u8>> {
    let mut data = instruction_discriminator(name).to_vec();
    args.serialize(&mut data)
        .map_err(|_| error!(MintManagerError::InvalidCollection))?;
    Ok(data)
}

/**
 * Accounts of a mint CPI into a collection program
 *
 * A collection is an account owned by a collection program. Its data starts
 * with an 8-byte discriminator followed by the 32-byte owner key. Collections
 * grant minting to the mint authority PDA of this program and expose two
 * Anchor instructions for it:
 *
 * - `mint_amount_from_mint_manager(recipient, edition_id: Option<u64>, amount: u32)`,
 *   returning the first token id (u64) as return data
 * - `mint_chosen_from_mint_manager(recipient, edition_id: Option<u64>, token_ids: Vec<u64>)`
 *
 * Accounts: collection (writable), mint authority (signer), recipient, then
 * whatever remaining accounts the calling instruction was given.
 */
pub struct CollectionMint<'a, 'info> {
    pub collection_program: &'a AccountInfo<'info>,
    pub collection: &'a AccountInfo<'info>,
    pub mint_authority: &'a AccountInfo<'info>,
    pub mint_authority_bump: u8,
    pub recipient: &'a AccountInfo<'info>,
    pub remaining_accounts: &'a [AccountInfo<'info>],
}

impl<'a, 'info> CollectionMint<'a, 'info> {
    /// Mints `amount` tokens and returns the first token id
    pub fn mint_amount(&self, edition_id: Option<u64>, amount: u32) -> Result<u64> {
        let data = instruction_data(
            "mint_amount_from_mint_manager",
            &(self.recipient.key(), edition_id, amount),
        )?;
        self.invoke(data)?;

        let (program_id, return_data) =
            get_return_data().ok_or(MintManagerError::InvalidCollection)?;
        require_keys_eq!(
            program_id,
            self.collection_program.key(),
            MintManagerError::InvalidCollection
        );
        let first_token_id: [u8; 8] = return_data
            .as_slice()
            .try_into()
            .map_err(|_| MintManagerError::InvalidCollection)?;
        Ok(u64::from_le_bytes(first_token_id))
    }

    pub fn mint_chosen(&self, edition_id: Option<u64>, token_ids: &[u64]) -> Result<()> {
        let data = instruction_data(
            "mint_chosen_from_mint_manager",
            &(self.recipient.key(), edition_id, token_ids.to_vec()),
        )?;
        self.invoke(data)
    }

    fn invoke(&self, data: Vec<u8>) -> Result<()> {
        require_keys_eq!(
            *self.collection.owner,
            self.collection_program.key(),
            MintManagerError::InvalidCollection
        );
        require!(
            self.collection_program.executable,
            MintManagerError::InvalidCollection
        );

        let mut accounts = vec![
            AccountMeta::new(self.collection.key(), false),
            AccountMeta::new_readonly(self.mint_authority.key(), true),
            AccountMeta::new_readonly(self.recipient.key(), false),
        ];
        let mut account_infos = vec![
            self.collection.clone(),
            self.mint_authority.clone(),
            self.recipient.clone(),
        ];
        for account in self.remaining_accounts {
            accounts.push(AccountMeta {
                pubkey: account.key(),
                is_signer: account.is_signer,
                is_writable: account.is_writable,
            });
            account_infos.push(account.clone());
        }
        account_infos.push(self.collection_program.clone());

        let ix = Instruction {
            program_id: self.collection_program.key(),
            accounts,
            data,
        };

        let bump = [self.mint_authority_bump];
        let seeds: &[&[u8]] = &[MINT_AUTHORITY_SEED.as_bytes(), &bump];
        invoke_signed(&ix, &account_infos, &[seeds])?;
        Ok(())
    }
}
