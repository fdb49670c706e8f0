//! Proof of work type.

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Proof of work nonce (8 bytes / u64).
///
/// Work is a nonce such that the Blake2b-64bit hash of
/// `nonce_le || root` meets a minimum difficulty threshold.
///
/// The textual form is 16 lowercase hex characters in big-endian order, but
/// the bytes fed into the work hash are little-endian. Both orders are
/// canonical for their context and must not be mixed up.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Work(u64);

impl Work {
    /// Zero work.
    pub const ZERO: Work = Work(0);

    /// Create from u64.
    pub const fn new(value: u64) -> Self {
        Work(value)
    }

    /// Get the inner u64 value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Convert to bytes (little-endian, as fed into the work hash).
    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Create from little-endian bytes.
    pub fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Work(u64::from_le_bytes(bytes))
    }

    /// Convert to big-endian bytes (the textual/display order).
    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Create from big-endian bytes.
    pub fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Work(u64::from_be_bytes(bytes))
    }

    /// Convert to hex string (16 characters, lowercase, big-endian order).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_be_bytes())
    }

    /// Create from hex string (big-endian order).
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| Error::InvalidWork)?;
        let arr: [u8; 8] = bytes.try_into().map_err(|_| Error::InvalidWork)?;
        Ok(Work::from_be_bytes(arr))
    }

    /// Check if this is zero work.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Work({})", self.to_hex())
    }
}

impl fmt::Display for Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<u64> for Work {
    fn from(value: u64) -> Self {
        Work(value)
    }
}

impl From<Work> for u64 {
    fn from(work: Work) -> u64 {
        work.0
    }
}

impl Serialize for Work {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Work {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Work::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
