use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/**
 * Platform configuration account
 *
 * Singleton holding everything the sale engine needs that is not owned by a
 * single vector: the admin, the set of keys allowed to sign off-chain claims,
 * the platform mint fee and the vector id counter.
 *
 * Derivation: ["platform"]
 *
 * Lifecycle:
 * 1. Created once by initialize_platform
 * 2. Updated by the admin (fees, signers)
 * 3. next_vector_id incremented on every abridged vector creation
 */
#[account]
#[derive(Default, Debug)]
pub struct PlatformConfig {
    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Bump seed of the mint authority PDA
    /// - Saved to avoid recomputation on every mint CPI
    pub mint_authority_bump: u8,

    /// Admin who can change fees and claim signers
    pub admin: Pubkey,

    /// Receives the platform mint fee
    pub fee_recipient: Pubkey,

    /// Platform fee charged per minted token, in lamports
    pub mint_fee_per_token: u64,

    /// Id the next abridged vector will get
    /// - Starts at 1 so that 0 never names a vector
    pub next_vector_id: u64,

    /// Keys allowed to sign off-chain claims
    pub claim_signers: Vec<Pubkey>,
}

impl PlatformConfig {
    /// Calculate the space required for this account
    pub const LEN: usize = 8 + // discriminator
        1 +  // bump
        1 +  // mint_authority_bump
        32 + // admin
        32 + // fee_recipient
        8 +  // mint_fee_per_token
        8 +  // next_vector_id
        4 + 32 * MAX_CLAIM_SIGNERS; // claim_signers

    pub fn initialize(
        &mut self,
        bump: u8,
        mint_authority_bump: u8,
        admin: Pubkey,
        fee_recipient: Pubkey,
        mint_fee_per_token: u64,
    ) -> Result<()> {
        require!(fee_recipient != Pubkey::default(), MintManagerError::InvalidPlatformConfig);
        self.bump = bump;
        self.mint_authority_bump = mint_authority_bump;
        self.admin = admin;
        self.fee_recipient = fee_recipient;
        self.mint_fee_per_token = mint_fee_per_token;
        self.next_vector_id = 1;
        self.claim_signers = Vec::new();
        Ok(())
    }

    /// Writes the fields set in `params`
    pub fn update(&mut self, params: &PlatformUpdateParams) -> Result<()> {
        if let Some(admin) = params.admin {
            require!(admin != Pubkey::default(), MintManagerError::InvalidPlatformConfig);
            self.admin = admin;
        }
        if let Some(fee_recipient) = params.fee_recipient {
            require!(fee_recipient != Pubkey::default(), MintManagerError::InvalidPlatformConfig);
            self.fee_recipient = fee_recipient;
        }
        if let Some(mint_fee_per_token) = params.mint_fee_per_token {
            self.mint_fee_per_token = mint_fee_per_token;
        }
        Ok(())
    }

    pub fn is_claim_signer(&self, signer: &Pubkey) -> bool {
        self.claim_signers.contains(signer)
    }

    /// Adds or removes a claim signer. Adding an existing signer is a no-op.
    pub fn set_claim_signer(&mut self, signer: Pubkey, authorized: bool) -> Result<()> {
        require!(signer != Pubkey::default(), MintManagerError::InvalidPlatformConfig);

        if authorized {
            if !self.is_claim_signer(&signer) {
                require!(
                    self.claim_signers.len() < MAX_CLAIM_SIGNERS,
                    MintManagerError::TooManyClaimSigners
                );
                self.claim_signers.push(signer);
            }
        } else {
            self.claim_signers.retain(|s| *s != signer);
        }
        Ok(())
    }

    /// Hands out the next vector id
    pub fn take_vector_id(&mut self) -> Result<u64> {
        let vector_id = self.next_vector_id;
        self.next_vector_id = vector_id
            .checked_add(1)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        Ok(vector_id)
    }

    /// Platform fee for minting `num_tokens`
    pub fn mint_fee(&self, num_tokens: u32) -> Result<u64> {
        self.mint_fee_per_token
            .checked_mul(num_tokens as u64)
            .ok_or_else(|| error!(MintManagerError::ArithmeticOverflow))
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlatformUpdateParams {
    pub admin: Option<Pubkey>,
    pub fee_recipient: Option<Pubkey>,
    pub mint_fee_per_token: Option<u64>,
}
