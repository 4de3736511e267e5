pub mod discrete_dutch_auction;

pub use discrete_dutch_auction::*;

use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/// What a mechanic is asked to price and gate
#[derive(Clone, Copy, Debug)]
pub struct MechanicMintRequest {
    /// Mechanic vector key
    pub key: [u8; 32],
    /// Lamports left for the mechanic once the platform fee is taken
    pub payment: u64,
    pub now: i64,
}

/// How a mechanic accepted a mint and where the payment goes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MechanicMintOutcome {
    pub num_minted: u32,
    /// Chosen ids, empty for count mints
    pub token_ids: Vec<u64>,
    /// Lamports kept by the mechanic's escrow
    pub escrowed: u64,
    /// Lamports sent to `payment_recipient` right away
    pub paid_to_recipient: u64,
    pub payment_recipient: Pubkey,
}

impl MechanicMintOutcome {
    /// The outcome has to route exactly the payment it was handed, to the
    /// recipient account passed with the call
    pub fn check_settlement(&self, payment: u64, payment_recipient: &Pubkey) -> Result<()> {
        let forwarded = self
            .escrowed
            .checked_add(self.paid_to_recipient)
            .ok_or(MintManagerError::ArithmeticOverflow)?;
        require!(forwarded == payment, MintManagerError::InvalidPaymentAmount);
        require_keys_eq!(
            *payment_recipient,
            self.payment_recipient,
            MintManagerError::InvalidMechanic
        );
        Ok(())
    }
}

/// Call shape of a mechanic mint
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MintCall {
    Count(u32),
    Choose(Vec<u64>),
}

impl MintCall {
    pub fn is_choose(&self) -> bool {
        matches!(self, MintCall::Choose(_))
    }

    pub fn num_tokens(&self) -> usize {
        match self {
            MintCall::Count(num) => *num as usize,
            MintCall::Choose(token_ids) => token_ids.len(),
        }
    }
}

/**
 * Pluggable sale strategy
 *
 * A mechanic decides whether a mint goes through and what it costs. It never
 * mints: the dispatcher moves the lamports named in the outcome and then asks
 * the collection to mint.
 */
pub trait MintMechanic {
    fn process_num_mint(
        &mut self,
        request: &MechanicMintRequest,
        num_to_mint: u32,
        data: &[u8],
    ) -> Result<MechanicMintOutcome>;

    fn process_choose_mint(
        &mut self,
        request: &MechanicMintRequest,
        token_ids: &[u64],
        data: &[u8],
    ) -> Result<MechanicMintOutcome>;
}

/// Routes a call to the method matching its shape
pub fn dispatch_mint(
    mechanic: &mut dyn MintMechanic,
    request: &MechanicMintRequest,
    call: &MintCall,
    data: &[u8],
) -> Result<MechanicMintOutcome> {
    match call {
        MintCall::Count(num_to_mint) => mechanic.process_num_mint(request, *num_to_mint, data),
        MintCall::Choose(token_ids) => mechanic.process_choose_mint(request, token_ids, data),
    }
}

/// Registry of the mechanics this program knows
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MechanicKind {
    DiscreteDutchAuction,
}

impl MechanicKind {
    pub const ALL: [MechanicKind; 1] = [MechanicKind::DiscreteDutchAuction];

    pub fn name(&self) -> &'static str {
        match self {
            MechanicKind::DiscreteDutchAuction => "discrete_dutch_auction",
        }
    }

    /// Address mechanic vectors name this mechanic by
    /// - Derived from: ["mechanic", name]
    pub fn address(&self) -> Pubkey {
        Pubkey::find_program_address(
            &[MECHANIC_SEED.as_bytes(), self.name().as_bytes()],
            &crate::ID,
        )
        .0
    }

    pub fn from_address(address: &Pubkey) -> Option<MechanicKind> {
        MechanicKind::ALL
            .into_iter()
            .find(|kind| kind.address() == *address)
    }

    pub fn supports_choose(&self) -> bool {
        match self {
            MechanicKind::DiscreteDutchAuction => false,
        }
    }
}
