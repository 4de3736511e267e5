pub mod test_abridged_vector;
pub mod test_dutch_auction;
pub mod test_mechanic;
