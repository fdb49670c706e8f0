//! Core types for Nano cryptocurrency operations.

mod account;
mod amount;
mod hash;
mod signature;
mod work;

pub use account::{Account, PublicKey};
pub use amount::Raw;
pub use hash::{BlockHash, Link};
pub use signature::Signature;
pub use work::Work;
