//! Proof of work generation, validation, and difficulty arithmetic.
//!
//! Nano attaches a small proof of work to every block as a spam deterrent.
//! The work value is a 64-bit nonce whose Blake2b hash together with the
//! block's root meets a difficulty threshold; the root is the previous block
//! hash, or the account public key for an account's first block.

mod difficulty;
mod validate;

#[cfg(feature = "work-cpu")]
mod cpu;

pub use difficulty::{derive_work_difficulty, derive_work_multiplier, validate_difficulty};
pub use validate::{WorkThreshold, WorkValidator};

#[cfg(feature = "work-cpu")]
pub use cpu::{configure_work_pool, do_work, CpuWorkGenerator};

use crate::types::{BlockHash, Work};

/// Compute the work value for a root/nonce pair.
///
/// A single Blake2b evaluation; higher values mean more work.
pub fn get_work_value(root: &BlockHash, work: Work) -> u64 {
    WorkValidator::work_value(work, root)
}

/// Check a work value against a difficulty threshold.
pub fn validate_work(root: &BlockHash, work: Work, threshold: u64) -> bool {
    WorkValidator::validate(work, root, threshold)
}
