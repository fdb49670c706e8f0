//! Wallet-facing helpers.
//!
//! Thin, string-oriented functions over the key and account machinery, for
//! callers that deal in hex seeds and addresses rather than typed values.

use alloc::string::String;

use crate::error::Result;
use crate::keys::{derive_keypair, derive_secret_key, SecretKey, Seed};
use crate::types::{Account, PublicKey};

/// Generate a new random seed as 64 lowercase hex characters.
///
/// Uses the system's cryptographically secure random number generator.
#[cfg(feature = "std")]
pub fn generate_seed() -> Result<String> {
    Ok(Seed::random()?.to_hex())
}

/// Check whether a string is a valid hex-encoded seed.
pub fn validate_seed(seed: &str) -> bool {
    Seed::from_hex(seed).is_ok()
}

/// Derive the account address for a seed and index, with the default
/// `nano_` prefix.
pub fn generate_account_id(seed: &str, index: u32) -> Result<Account> {
    let seed = Seed::from_hex(seed)?;
    Ok(seed.derive(index).account())
}

/// Derive the account address for a seed and index, rendered with a
/// caller-chosen prefix.
pub fn generate_account_id_with_prefix(seed: &str, index: u32, prefix: &str) -> Result<String> {
    Ok(generate_account_id(seed, index)?.to_address(prefix))
}

/// Derive the account private key for a seed and index, as hex.
pub fn generate_account_private_key(seed: &str, index: u32) -> Result<String> {
    let seed = Seed::from_hex(seed)?;
    Ok(derive_secret_key(seed.as_bytes(), index).to_hex())
}

/// Derive the account key pair for a seed and index, as
/// `(private_hex, public_hex)`.
pub fn generate_account_key_pair(seed: &str, index: u32) -> Result<(String, String)> {
    let seed = Seed::from_hex(seed)?;
    let keypair = derive_keypair(seed.as_bytes(), index);
    Ok((keypair.secret_key().to_hex(), keypair.public_key().to_hex()))
}

/// Check whether a string is a valid account address.
pub fn validate_account_id(account: &str) -> bool {
    Account::from_address_str_checked(account).is_ok()
}

/// Check whether a string is a valid hex-encoded public key.
pub fn validate_public_key(public_key: &str) -> bool {
    PublicKey::from_hex(public_key).is_ok()
}

/// Check whether a string is a valid hex-encoded private key.
pub fn validate_private_key(private_key: &str) -> bool {
    SecretKey::from_hex(private_key).is_ok()
}
