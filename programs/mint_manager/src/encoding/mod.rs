pub mod abridged_vector;
pub mod prices;

pub use abridged_vector::*;
pub use prices::*;
