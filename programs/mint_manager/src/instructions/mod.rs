pub mod initialize_platform;
pub mod update_platform;
pub mod create_abridged_vector;
pub mod update_abridged_vector;
pub mod get_abridged_vector;
pub mod vector_mint;
pub mod verify_claim;
pub mod gated_mint;
pub mod register_mechanic_vector;
pub mod mechanic_mint;
pub mod set_pause_on_mechanic_mint_vector;
pub mod update_dutch_auction_vector;
pub mod get_dutch_auction_state;
pub mod rebate_collector;
pub mod withdraw_dpp_funds;

pub use initialize_platform::*;
pub use update_platform::*;
pub use create_abridged_vector::*;
pub use update_abridged_vector::*;
pub use get_abridged_vector::*;
pub use vector_mint::*;
pub use verify_claim::*;
pub use gated_mint::*;
pub use register_mechanic_vector::*;
pub use mechanic_mint::*;
pub use set_pause_on_mechanic_mint_vector::*;
pub use update_dutch_auction_vector::*;
pub use get_dutch_auction_state::*;
pub use rebate_collector::*;
pub use withdraw_dpp_funds::*;
