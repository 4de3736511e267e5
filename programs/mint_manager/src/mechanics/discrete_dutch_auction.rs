use anchor_lang::prelude::*;
use crate::error::*;
use crate::state::{DutchAuctionVector, UserAuctionInfo};
use super::{MechanicMintOutcome, MechanicMintRequest, MintMechanic};

/// Discrete dutch auction bound to the accounts of one buyer
pub struct DiscreteDutchAuction<'a> {
    pub vector: &'a mut DutchAuctionVector,
    pub user: &'a mut UserAuctionInfo,
}

impl MintMechanic for DiscreteDutchAuction<'_> {
    fn process_num_mint(
        &mut self,
        request: &MechanicMintRequest,
        num_to_mint: u32,
        _data: &[u8],
    ) -> Result<MechanicMintOutcome> {
        require!(request.key == self.vector.key, MintManagerError::InvalidMechanic);

        let purchase = self
            .vector
            .process_purchase(request.now, self.user, num_to_mint, request.payment)?;

        Ok(MechanicMintOutcome {
            num_minted: num_to_mint,
            token_ids: Vec::new(),
            escrowed: purchase.escrowed,
            paid_to_recipient: purchase.paid_to_recipient,
            payment_recipient: self.vector.payment_recipient,
        })
    }

    // Buyers cannot pick tokens in an auction
    fn process_choose_mint(
        &mut self,
        _request: &MechanicMintRequest,
        _token_ids: &[u64],
        _data: &[u8],
    ) -> Result<MechanicMintOutcome> {
        err!(MintManagerError::InvalidMechanic)
    }
}
