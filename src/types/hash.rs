//! Block hash and link types.

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::error::{EncodingError, Error, Result};
use crate::types::{Account, PublicKey};

/// Block hash (32 bytes).
///
/// Represents the Blake2b-256 hash of a block's contents. Also used for the
/// proof-of-work root, which is either a block hash or an account public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockHash([u8; 32]);

impl BlockHash {
    /// Zero hash (used as `previous` in opening blocks).
    pub const ZERO: BlockHash = BlockHash([0u8; 32]);

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        BlockHash(bytes)
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
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::BadEncoding(EncodingError::InvalidLength))?;
        Ok(BlockHash(arr))
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", self.to_hex())
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        BlockHash(bytes)
    }
}

impl From<PublicKey> for BlockHash {
    fn from(key: PublicKey) -> Self {
        BlockHash(*key.as_bytes())
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for BlockHash {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BlockHash {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BlockHash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Link field in a state block.
///
/// The link holds 32 multipurpose bytes whose meaning depends on the block
/// subtype:
/// - Send: destination account's public key
/// - Receive/Open: source block hash
/// - Change: zero (unused)
///
/// The `link` and `link_as_account` forms on the wire are two renderings of
/// the same bytes; conversions between them are lossless.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link([u8; 32]);

impl Link {
    /// Zero link (used for change blocks).
    pub const ZERO: Link = Link([0u8; 32]);

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Link(bytes)
    }

    /// Get as raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Create from a destination account (for send blocks).
    pub fn from_account(account: &Account) -> Self {
        Link(*account.public_key().as_bytes())
    }

    /// Create from a source block hash (for receive blocks).
    pub fn from_block_hash(hash: &BlockHash) -> Self {
        Link(*hash.as_bytes())
    }

    /// Create from a public key.
    pub fn from_public_key(key: &PublicKey) -> Self {
        Link(*key.as_bytes())
    }

    /// Interpret as a block hash.
    pub fn as_block_hash(&self) -> BlockHash {
        BlockHash(self.0)
    }

    /// Interpret as a public key.
    pub fn as_public_key(&self) -> PublicKey {
        PublicKey::from_bytes(self.0)
    }

    /// Interpret as an account address.
    pub fn as_account(&self) -> Account {
        Account::from_public_key(&self.as_public_key())
    }

    /// Convert to hex string (64 characters, uppercase).
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Create from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::BadEncoding(EncodingError::InvalidLength))?;
        Ok(Link(arr))
    }

    /// Check if this is the zero link.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Link({})", self.to_hex())
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Link {
    fn from(bytes: [u8; 32]) -> Self {
        Link(bytes)
    }
}

impl From<BlockHash> for Link {
    fn from(hash: BlockHash) -> Self {
        Link(*hash.as_bytes())
    }
}

impl From<PublicKey> for Link {
    fn from(key: PublicKey) -> Self {
        Link(*key.as_bytes())
    }
}

impl Serialize for Link {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Link::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
