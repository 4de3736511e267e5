pub mod platform_config;
pub mod abridged_vector;
pub mod offchain_claim;
pub mod mechanic_vector;
pub mod dutch_auction;

pub use platform_config::*;
pub use abridged_vector::*;
pub use offchain_claim::*;
pub use mechanic_vector::*;
pub use dutch_auction::*;
