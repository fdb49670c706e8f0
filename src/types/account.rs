//! Account and public key types.

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::base32;
use crate::constants::{ACCOUNT_PREFIX_NANO, ACCOUNT_PREFIX_XRB};
use crate::error::{AccountError, Error, Result};

/// Public key (32 bytes).
///
/// Represents an Ed25519 public key used in the Nano network.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Zero public key (burn address).
    pub const ZERO: PublicKey = PublicKey([0u8; 32]);

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        PublicKey(bytes)
    }

    /// Get as raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string (64 characters, uppercase).
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Create from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| Error::InvalidPublicKey)?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| Error::InvalidPublicKey)?;
        Ok(PublicKey(arr))
    }

    /// Convert to an account address.
    pub fn to_account(&self) -> Account {
        Account::from_public_key(self)
    }

    /// Check if this is the zero/burn key.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        PublicKey(bytes)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Nano account address.
///
/// An address is a prefix (`nano_`, with the historical `xrb_` accepted on
/// input) followed by 52 base32 characters encoding the 256-bit public key
/// with 4 bits of padding, and 8 base32 characters encoding a 5-byte
/// Blake2b checksum of the public key, byte-reversed. 65 characters total
/// with the `nano_` prefix.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Account {
    /// The underlying public key.
    public_key: PublicKey,
    /// Cached address string with the default `nano_` prefix.
    address: String,
}

impl Account {
    /// Create an account from a public key.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let address = encode_account(public_key, ACCOUNT_PREFIX_NANO);
        Account {
            public_key: *public_key,
            address,
        }
    }

    /// Parse and checksum-verify an address string.
    ///
    /// Accepts both the `nano_` and `xrb_` prefixes.
    pub fn from_address_str_checked(s: &str) -> Result<Self> {
        let public_key = decode_account(s)?;
        Ok(Account::from_public_key(&public_key))
    }

    /// Get the underlying public key.
    pub const fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Get the address string with the default `nano_` prefix.
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Render the address with a caller-chosen prefix.
    pub fn to_address(&self, prefix: &str) -> String {
        encode_account(&self.public_key, prefix)
    }

    /// Check if this is the burn address.
    pub fn is_burn(&self) -> bool {
        self.public_key.is_zero()
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account({})", self.address)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

impl FromStr for Account {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Account::from_address_str_checked(s)
    }
}

impl From<PublicKey> for Account {
    fn from(public_key: PublicKey) -> Self {
        Account::from_public_key(&public_key)
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.address)
    }
}

impl<'de> Deserialize<'de> for Account {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Account::from_address_str_checked(&s).map_err(serde::de::Error::custom)
    }
}

/// Compute the 5-byte address checksum: Blake2b-40 of the public key,
/// byte-reversed.
fn address_checksum(public_key: &PublicKey) -> [u8; 5] {
    use blake2::digest::consts::U5;
    use blake2::{Blake2b, Digest};

    let mut hasher = Blake2b::<U5>::new();
    hasher.update(public_key.as_bytes());
    let mut checksum: [u8; 5] = hasher.finalize().into();
    checksum.reverse();
    checksum
}

/// Encode a public key to an account address with the given prefix.
fn encode_account(public_key: &PublicKey, prefix: &str) -> String {
    let payload = base32::encode(public_key.as_bytes());
    let checksum = base32::encode(&address_checksum(public_key));
    format!("{}{}{}", prefix, payload, checksum)
}

/// Decode an account address to a public key, verifying the checksum.
fn decode_account(address: &str) -> Result<PublicKey> {
    let data = if let Some(s) = address.strip_prefix(ACCOUNT_PREFIX_NANO) {
        s
    } else if let Some(s) = address.strip_prefix(ACCOUNT_PREFIX_XRB) {
        s
    } else {
        return Err(Error::InvalidAccount(AccountError::InvalidPrefix));
    };

    // 52 chars of public key plus 8 chars of checksum.
    if data.len() != 60 {
        return Err(Error::InvalidAccount(AccountError::InvalidLength));
    }

    let key_bytes = base32::decode(&data[..52])
        .map_err(|_| Error::InvalidAccount(AccountError::InvalidEncoding))?;
    let checksum_bytes = base32::decode(&data[52..])
        .map_err(|_| Error::InvalidAccount(AccountError::InvalidEncoding))?;

    let arr: [u8; 32] = key_bytes
        .try_into()
        .map_err(|_| Error::InvalidAccount(AccountError::InvalidEncoding))?;
    let public_key = PublicKey::from_bytes(arr);

    if checksum_bytes != address_checksum(&public_key) {
        return Err(Error::InvalidAccount(AccountError::ChecksumMismatch));
    }

    Ok(public_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test vector from the Nano documentation
    const TEST_PUBLIC_KEY_HEX: &str =
        "E89208DD038FBB269987689621D52292AE9C35941A7484756ECCED92A65093BA";
    const TEST_ACCOUNT: &str = "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3";

    #[test]
    fn test_public_key_from_hex() {
        let pk = PublicKey::from_hex(TEST_PUBLIC_KEY_HEX).unwrap();
        assert_eq!(pk.to_hex(), TEST_PUBLIC_KEY_HEX);
    }

    #[test]
    fn test_public_key_bad_hex() {
        assert_eq!(PublicKey::from_hex("ABCD"), Err(Error::InvalidPublicKey));
        assert_eq!(PublicKey::from_hex("zz"), Err(Error::InvalidPublicKey));
    }

    #[test]
    fn test_public_key_to_account() {
        let pk = PublicKey::from_hex(TEST_PUBLIC_KEY_HEX).unwrap();
        assert_eq!(pk.to_account().as_str(), TEST_ACCOUNT);
    }

    #[test]
    fn test_account_from_str() {
        let account: Account = TEST_ACCOUNT.parse().unwrap();
        assert_eq!(account.public_key().to_hex(), TEST_PUBLIC_KEY_HEX);
    }

    #[test]
    fn test_account_xrb_prefix() {
        let xrb_account = TEST_ACCOUNT.replace("nano_", "xrb_");
        let account: Account = xrb_account.parse().unwrap();
        assert_eq!(account.public_key().to_hex(), TEST_PUBLIC_KEY_HEX);
        // Output is normalized to the default prefix.
        assert_eq!(account.as_str(), TEST_ACCOUNT);
    }

    #[test]
    fn test_account_custom_prefix() {
        let account: Account = TEST_ACCOUNT.parse().unwrap();
        let xrb = account.to_address("xrb_");
        assert!(xrb.starts_with("xrb_"));
        assert_eq!(xrb.len(), 64);
        assert_eq!(Account::from_address_str_checked(&xrb).unwrap(), account);
    }

    #[test]
    fn test_account_roundtrip() {
        let pk = PublicKey::from_hex(TEST_PUBLIC_KEY_HEX).unwrap();
        let account = Account::from_public_key(&pk);
        let parsed: Account = account.as_str().parse().unwrap();
        assert_eq!(parsed.public_key(), &pk);
    }

    #[test]
    fn test_invalid_account_prefix() {
        let invalid = "invalid_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3";
        assert!(matches!(
            Account::from_address_str_checked(invalid),
            Err(Error::InvalidAccount(AccountError::InvalidPrefix))
        ));
    }

    #[test]
    fn test_invalid_account_length() {
        let invalid = "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuo";
        assert!(matches!(
            Account::from_address_str_checked(invalid),
            Err(Error::InvalidAccount(AccountError::InvalidLength))
        ));
    }

    #[test]
    fn test_invalid_account_checksum() {
        let invalid = "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr4";
        assert!(matches!(
            Account::from_address_str_checked(invalid),
            Err(Error::InvalidAccount(AccountError::ChecksumMismatch))
        ));
    }

    #[test]
    fn test_invalid_account_alphabet() {
        // '0', '2', 'l', 'v' are not in the alphabet
        let invalid = "nano_0t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3";
        assert!(matches!(
            Account::from_address_str_checked(invalid),
            Err(Error::InvalidAccount(AccountError::InvalidEncoding))
        ));
    }

    #[test]
    fn test_burn_address() {
        let account = PublicKey::ZERO.to_account();
        assert!(account.is_burn());
        assert_eq!(
            account.as_str(),
            "nano_1111111111111111111111111111111111111111111111111111hifc8npp"
        );
    }

    #[test]
    fn test_account_serde() {
        let account: Account = TEST_ACCOUNT.parse().unwrap();
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, format!("\"{}\"", TEST_ACCOUNT));

        let recovered: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account, recovered);
    }

    #[test]
    fn test_multiple_accounts() {
        let test_cases = [
            (
                "0000000000000000000000000000000000000000000000000000000000000000",
                "nano_1111111111111111111111111111111111111111111111111111hifc8npp",
            ),
            (
                "E89208DD038FBB269987689621D52292AE9C35941A7484756ECCED92A65093BA",
                "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3",
            ),
            (
                "27733ACAE9454A41A8642929E411B461AD40A07BBAAC67867D0B46559AD84F76",
                "nano_1bum9d7gkjcca8n8acbbwiauarffa4i9qgoeey59t4t8cpffimupua6wr99u",
            ),
        ];

        for (pk_hex, expected_account) in test_cases {
            let pk = PublicKey::from_hex(pk_hex).unwrap();
            assert_eq!(pk.to_account().as_str(), expected_account);

            let parsed: Account = expected_account.parse().unwrap();
            assert_eq!(parsed.public_key().to_hex(), pk_hex);
        }
    }
}
