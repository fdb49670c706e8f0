//! Deterministic key derivation.
//!
//! Nano derives account keys from a master seed with a single Blake2b pass:
//! `private_key = blake2b-256(seed || index_be32)`. The index is a 32-bit
//! unsigned integer, so every index in `0..=u32::MAX` is a valid, stable
//! derivation parameter.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use crate::keys::{KeyPair, SecretKey};

/// Derive the secret key for an account index.
pub fn derive_secret_key(seed: &[u8; 32], index: u32) -> SecretKey {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(seed);
    hasher.update(index.to_be_bytes());

    let private_key: [u8; 32] = hasher.finalize().into();
    SecretKey::from_bytes(private_key)
}

/// Derive a full keypair from a seed at the given index.
pub fn derive_keypair(seed: &[u8; 32], index: u32) -> KeyPair {
    KeyPair::from_secret_key(derive_secret_key(seed, index))
}
