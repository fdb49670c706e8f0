//! Key management: seeds, derivation, and signing keys.

mod derivation;
mod keypair;
mod seed;

pub use derivation::{derive_keypair, derive_secret_key};
pub use keypair::{KeyPair, SecretKey};
pub use seed::Seed;
