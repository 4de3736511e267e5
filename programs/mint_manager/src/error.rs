use anchor_lang::prelude::*;

#[error_code]
pub enum MintManagerError {
    // Access control errors
    #[msg("Caller is not authorized to perform this action")]
    Unauthorized,

    // Configuration errors
    #[msg("Invalid vector configuration")]
    InvalidVectorConfig,
    #[msg("Invalid platform configuration")]
    InvalidPlatformConfig,
    #[msg("Too many authorized claim signers")]
    TooManyClaimSigners,
    #[msg("Invalid packed price list")]
    InvalidPackedPrices,
    #[msg("Collection account or program is invalid")]
    InvalidCollection,

    // State conflict errors
    #[msg("Field cannot be updated after tokens have been sold")]
    InvalidUpdate,

    // Capacity errors
    #[msg("Sold out")]
    SoldOut,
    #[msg("Requested more tokens than allowed per transaction")]
    TxLimitExceeded,
    #[msg("Requested more tokens than allowed per user")]
    UserCapExceeded,

    // Payment errors
    #[msg("Payment does not match the amount owed")]
    InvalidPaymentAmount,
    #[msg("Payment does not cover the platform mint fee")]
    MintFeeTooLow,

    // Claim errors
    #[msg("Invalid claim")]
    InvalidClaim,
    #[msg("Minter is not on the allowlist")]
    AllowlistInvalid,

    // Lifecycle errors
    #[msg("Vector is paused")]
    MintPaused,
    #[msg("Mechanic vector is paused")]
    MechanicPaused,
    #[msg("Mint is not allowed at this time or in this state")]
    InvalidMint,
    #[msg("Invalid mechanic")]
    InvalidMechanic,

    // Dutch auction settlement errors
    #[msg("Collector is not owed a rebate")]
    CollectorNotOwedRebate,
    #[msg("Invalid DPP funds withdrawal")]
    InvalidDppFundsWithdrawal,
    #[msg("Escrow balance cannot cover the payout")]
    InsufficientEscrow,

    // System level errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
