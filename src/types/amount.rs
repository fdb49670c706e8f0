//! Raw amounts.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;
use core::ops::{Add, Sub};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::constants::NANO_IN_RAW;
use crate::error::{BlockError, Error, Result};

/// Raw amount, the smallest unit of Nano (10^-30 XNO).
///
/// A newtype wrapper around `u128`. All balance arithmetic is done in raw to
/// avoid floating point errors; on the wire a balance is rendered as a
/// decimal string (state blocks) or as 16 big-endian bytes (hashing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Raw(u128);

impl Raw {
    /// Zero raw amount.
    pub const ZERO: Raw = Raw(0);

    /// Maximum possible raw amount (2^128 - 1).
    pub const MAX: Raw = Raw(u128::MAX);

    /// Create a new raw amount from u128.
    #[inline]
    pub const fn new(value: u128) -> Self {
        Raw(value)
    }

    /// Get the inner u128 value.
    #[inline]
    pub const fn as_u128(&self) -> u128 {
        self.0
    }

    /// Create from whole Nano (XNO) units (1 XNO = 10^30 raw).
    pub fn from_nano(nano: u128) -> Result<Self> {
        nano.checked_mul(NANO_IN_RAW)
            .map(Raw)
            .ok_or(Error::InvalidBlock(BlockError::InvalidBalance))
    }

    /// Convert to a Nano (XNO) decimal string, trimming trailing zeros.
    pub fn to_nano_string(&self) -> String {
        let whole = self.0 / NANO_IN_RAW;
        let frac = self.0 % NANO_IN_RAW;

        if frac == 0 {
            whole.to_string()
        } else {
            let frac_str = format!("{:030}", frac);
            let trimmed = frac_str.trim_end_matches('0');
            format!("{}.{}", whole, trimmed)
        }
    }

    /// Check if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Raw) -> Option<Raw> {
        self.0.checked_add(other.0).map(Raw)
    }

    /// Checked subtraction.
    pub fn checked_sub(&self, other: Raw) -> Option<Raw> {
        self.0.checked_sub(other.0).map(Raw)
    }

    /// Saturating addition.
    pub fn saturating_add(&self, other: Raw) -> Raw {
        Raw(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(&self, other: Raw) -> Raw {
        Raw(self.0.saturating_sub(other.0))
    }

    /// Convert to big-endian bytes (16 bytes, as hashed in blocks).
    pub fn to_be_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Create from big-endian bytes.
    pub fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Raw(u128::from_be_bytes(bytes))
    }

    /// Convert to hex string (32 characters, uppercase), the legacy send
    /// block wire form.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.to_be_bytes())
    }

    /// Create from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| Error::InvalidBlock(BlockError::InvalidBalance))?;
        let arr: [u8; 16] = bytes
            .try_into()
            .map_err(|_| Error::InvalidBlock(BlockError::InvalidBalance))?;
        Ok(Raw::from_be_bytes(arr))
    }
}

impl Add for Raw {
    type Output = Raw;

    fn add(self, other: Raw) -> Raw {
        Raw(self.0 + other.0)
    }
}

impl Sub for Raw {
    type Output = Raw;

    fn sub(self, other: Raw) -> Raw {
        Raw(self.0 - other.0)
    }
}

impl From<u128> for Raw {
    fn from(value: u128) -> Self {
        Raw(value)
    }
}

impl From<Raw> for u128 {
    fn from(raw: Raw) -> u128 {
        raw.0
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Raw {
    type Err = Error;

    /// Parse a decimal raw string. Fractional or signed input is rejected.
    fn from_str(s: &str) -> Result<Self> {
        s.parse::<u128>()
            .map(Raw)
            .map_err(|_| Error::InvalidBlock(BlockError::InvalidBalance))
    }
}

impl Serialize for Raw {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Raw {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
