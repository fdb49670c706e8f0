//! Seed generation and management.

use alloc::string::String;
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::keys::{derive_keypair, KeyPair};

/// Nano wallet seed (32 bytes).
///
/// The seed is the master secret from which all account keys are derived.
/// Its external form is 64 hex characters.
///
/// Seeds are automatically zeroed when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 32]);

impl Seed {
    /// Create a new random seed.
    ///
    /// Uses the system's cryptographically secure random number generator.
    #[cfg(feature = "std")]
    pub fn random() -> Result<Self> {
        let mut bytes = [0u8; 32];
        getrandom::getrandom(&mut bytes).map_err(|_| Error::InvalidSeed)?;
        Ok(Seed(bytes))
    }

    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Seed(bytes)
    }

    /// Get as raw bytes.
    ///
    /// Note: handle with care, this exposes the secret seed.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Create from hex string (64 characters, either case).
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| Error::InvalidSeed)?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| Error::InvalidSeed)?;
        Ok(Seed(arr))
    }

    /// Convert to hex string (64 characters, lowercase).
    ///
    /// Note: handle with care, this exposes the secret seed.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Derive the keypair at the given account index.
    ///
    /// Index 0 is the first account, index 1 the second, and so on. All
    /// 2^32 indices are valid derivation parameters.
    pub fn derive(&self, index: u32) -> KeyPair {
        derive_keypair(&self.0, index)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed([REDACTED])")
    }
}

impl PartialEq for Seed {
    fn eq(&self, other: &Self) -> bool {
        // Constant-time comparison
        use subtle::ConstantTimeEq;
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Seed {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    const TEST_SEED_HEX: &str = "0000000000000000000000000000000000000000000000000000000000000000";

    #[test]
    fn test_seed_hex_roundtrip() {
        let seed = Seed::from_hex(TEST_SEED_HEX).unwrap();
        assert_eq!(seed.to_hex(), TEST_SEED_HEX);
    }

    #[test]
    fn test_seed_hex_is_lowercase() {
        let seed = Seed::from_bytes([0xAB; 32]);
        assert_eq!(&seed.to_hex()[..4], "abab");
        // Uppercase input is accepted.
        assert_eq!(Seed::from_hex(&seed.to_hex().to_uppercase()).unwrap(), seed);
    }

    #[test]
    fn test_seed_invalid_hex() {
        assert!(matches!(Seed::from_hex("ABCD"), Err(Error::InvalidSeed)));
        let bad = "zz00000000000000000000000000000000000000000000000000000000000000";
        assert!(matches!(Seed::from_hex(bad), Err(Error::InvalidSeed)));
    }

    #[test]
    fn test_seed_debug_redacted() {
        let seed = Seed::from_hex(TEST_SEED_HEX).unwrap();
        let debug = format!("{:?}", seed);
        assert_eq!(debug, "Seed([REDACTED])");
    }

    #[test]
    fn test_seed_derive() {
        let seed = Seed::from_hex(TEST_SEED_HEX).unwrap();
        let keypair0 = seed.derive(0);
        let keypair1 = seed.derive(1);

        assert_ne!(keypair0.public_key(), keypair1.public_key());
        assert_eq!(seed.derive(0).public_key(), keypair0.public_key());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_seed_random() {
        let seed1 = Seed::random().unwrap();
        let seed2 = Seed::random().unwrap();

        assert_ne!(seed1, seed2);
    }

    #[test]
    fn test_seed_equality() {
        let seed1 = Seed::from_hex(TEST_SEED_HEX).unwrap();
        let seed2 = Seed::from_hex(TEST_SEED_HEX).unwrap();
        let seed3 =
            Seed::from_hex("1111111111111111111111111111111111111111111111111111111111111111")
                .unwrap();

        assert_eq!(seed1, seed2);
        assert_ne!(seed1, seed3);
    }
}
