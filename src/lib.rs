//! # XNO-core
//!
//! Core primitives for the Nano cryptocurrency: everything needed to build,
//! sign, and validate account blocks without talking to a node.
//!
//! ## Features
//!
//! - **Blocks**: construct, hash, sign, and serialize state and legacy blocks
//! - **Accounts**: `nano_`/`xrb_` address encoding with Blake2b checksums
//! - **Keys**: seed-based key derivation and Ed25519-Blake2b signatures
//! - **Work**: local proof-of-work generation with difficulty arithmetic
//!
//! The crate produces byte-for-byte the artifacts the Nano network expects;
//! submitting them to a node (RPC, WebSocket) is left to the caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use xno_core::prelude::*;
//!
//! let seed = Seed::random().expect("no entropy source");
//! let keypair = seed.derive(0);
//! println!("Account: {}", keypair.account());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

pub mod base32;
pub mod blocks;
pub mod error;
pub mod keys;
pub mod types;
pub mod wallet;
pub mod work;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::blocks::{Block, BlockBuilder, BlockFields, BlockKind, Subtype, WorkEpoch};
    pub use crate::error::{Error, Result};
    pub use crate::keys::{KeyPair, SecretKey, Seed};
    pub use crate::types::{Account, BlockHash, Link, PublicKey, Raw, Signature, Work};
    pub use crate::work::{WorkThreshold, WorkValidator};

    #[cfg(feature = "work-cpu")]
    pub use crate::work::CpuWorkGenerator;
}

pub use error::{Error, Result};

/// Nano network constants.
pub mod constants {
    /// Nano's base32 alphabet for account encoding.
    pub const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

    /// Account prefix for mainnet.
    pub const ACCOUNT_PREFIX_NANO: &str = "nano_";

    /// Historical account prefix, still accepted on input.
    pub const ACCOUNT_PREFIX_XRB: &str = "xrb_";

    /// Work difficulty threshold for send/change blocks (epoch v2 mainnet).
    pub const WORK_THRESHOLD_SEND: u64 = 0xfffffff800000000;

    /// Work difficulty threshold for state receive blocks (epoch v2 mainnet).
    pub const WORK_THRESHOLD_RECEIVE: u64 = 0xfffffe0000000000;

    /// Single work difficulty threshold used before epoch v2.
    pub const WORK_THRESHOLD_EPOCH_1: u64 = 0xffffffc000000000;

    /// Maximum raw supply (2^128 - 1).
    pub const MAX_SUPPLY_RAW: u128 = 340282366920938463463374607431768211455;

    /// 1 Nano (XNO) in raw units (10^30 raw).
    pub const NANO_IN_RAW: u128 = 1_000_000_000_000_000_000_000_000_000_000;

    /// State block preamble for hashing: 31 zero bytes followed by 0x06.
    pub const STATE_BLOCK_PREAMBLE: [u8; 32] = [
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 6,
    ];

    /// Zero hash (32 bytes of zeros).
    pub const ZERO_HASH: [u8; 32] = [0u8; 32];

    /// Zero public key (burn address).
    pub const ZERO_PUBLIC_KEY: [u8; 32] = [0u8; 32];
}
