//! Difficulty and multiplier arithmetic.
//!
//! Difficulties are absolute 64-bit thresholds; multipliers express a
//! difficulty relative to a base as the ratio of the search spaces:
//! `multiplier = (2^64 - base) / (2^64 - difficulty)`. A multiplier of 2
//! means twice as many hash evaluations are expected.

use crate::error::{Error, Result};

/// 2^64 as a float, the size of the full nonce space.
const NONCE_SPACE: f64 = 18_446_744_073_709_551_616.0;

/// Expected number of hash evaluations to meet `difficulty`, inverted:
/// the count of acceptable digests. Computed in integers first so high
/// difficulties are not rounded away.
fn acceptance_span(difficulty: u64) -> f64 {
    (u64::MAX - difficulty) as f64 + 1.0
}

/// Validate a difficulty threshold. Any nonzero value is acceptable.
pub fn validate_difficulty(difficulty: u64) -> Result<()> {
    if difficulty == 0 {
        return Err(Error::InvalidDifficulty);
    }
    Ok(())
}

/// Express `difficulty` as a multiplier relative to `base_difficulty`.
pub fn derive_work_multiplier(difficulty: u64, base_difficulty: u64) -> f64 {
    acceptance_span(base_difficulty) / acceptance_span(difficulty)
}

/// Convert a multiplier relative to `base_difficulty` back into an absolute
/// difficulty, rounded to the nearest integer and clamped to
/// `[1, 2^64 - 1]`.
///
/// Fails with [`Error::InvalidDifficulty`] when the multiplier is zero,
/// negative, or not a number.
pub fn derive_work_difficulty(multiplier: f64, base_difficulty: u64) -> Result<u64> {
    if !(multiplier > 0.0) {
        return Err(Error::InvalidDifficulty);
    }

    let difficulty = (NONCE_SPACE - acceptance_span(base_difficulty) / multiplier).round();
    // `as` saturates on both ends; zero is then lifted to the minimum valid
    // threshold.
    Ok((difficulty as u64).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{WORK_THRESHOLD_RECEIVE, WORK_THRESHOLD_SEND};

    #[test]
    fn test_validate_difficulty() {
        assert_eq!(validate_difficulty(0), Err(Error::InvalidDifficulty));
        assert!(validate_difficulty(1).is_ok());
        assert!(validate_difficulty(u64::MAX).is_ok());
    }

    #[test]
    fn test_multiplier_identity() {
        let m = derive_work_multiplier(WORK_THRESHOLD_SEND, WORK_THRESHOLD_SEND);
        assert_eq!(m, 1.0);
    }

    #[test]
    fn test_known_multipliers() {
        // The epoch v2 receive threshold is 1/64 of the send threshold.
        let m = derive_work_multiplier(WORK_THRESHOLD_RECEIVE, WORK_THRESHOLD_SEND);
        assert!((m - 1.0 / 64.0).abs() < 1e-12);

        let m = derive_work_multiplier(WORK_THRESHOLD_SEND, WORK_THRESHOLD_RECEIVE);
        assert!((m - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_multiplier_difficulty_inverse() {
        use crate::constants::WORK_THRESHOLD_EPOCH_1;

        let base = WORK_THRESHOLD_SEND;

        // Difficulties whose acceptance spans are exact in f64 round-trip
        // bit-for-bit.
        for difficulty in [
            base,
            WORK_THRESHOLD_RECEIVE,
            WORK_THRESHOLD_EPOCH_1,
            0x8000000000000000,
            u64::MAX,
        ] {
            let multiplier = derive_work_multiplier(difficulty, base);
            let recovered = derive_work_difficulty(multiplier, base).unwrap();
            assert_eq!(
                recovered, difficulty,
                "difficulty {:016x} round-tripped to {:016x}",
                difficulty, recovered
            );
        }

        // Near 2^64 the f64 spacing is 2048, which bounds the round-trip
        // error for difficulties that are not exactly representable.
        let difficulty = 0xffffffffffffff00;
        let multiplier = derive_work_multiplier(difficulty, base);
        let recovered = derive_work_difficulty(multiplier, base).unwrap();
        assert!(recovered.abs_diff(difficulty) <= 2048);
    }

    #[test]
    fn test_derive_difficulty_rejects_bad_multiplier() {
        let base = WORK_THRESHOLD_SEND;
        assert_eq!(
            derive_work_difficulty(0.0, base),
            Err(Error::InvalidDifficulty)
        );
        assert_eq!(
            derive_work_difficulty(-1.5, base),
            Err(Error::InvalidDifficulty)
        );
        assert_eq!(
            derive_work_difficulty(f64::NAN, base),
            Err(Error::InvalidDifficulty)
        );
    }

    #[test]
    fn test_derive_difficulty_clamps() {
        // A tiny multiplier asks for a difficulty below zero; the result is
        // clamped to the minimum valid threshold.
        assert_eq!(derive_work_difficulty(1e-30, 1).unwrap(), 1);

        // A huge multiplier saturates at the maximum.
        assert_eq!(
            derive_work_difficulty(1e30, WORK_THRESHOLD_SEND).unwrap(),
            u64::MAX
        );
    }
}
