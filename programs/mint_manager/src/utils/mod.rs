pub mod accounts;
pub mod claim_digest;
pub mod collection;
pub mod ed25519;
pub mod merkle;
pub mod payment;

pub use accounts::*;
pub use claim_digest::*;
pub use collection::*;
pub use ed25519::*;
pub use merkle::*;
pub use payment::*;
