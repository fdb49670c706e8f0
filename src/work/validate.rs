//! Work validation.
//!
//! A work nonce is valid for a root when
//! `u64_le(blake2b-8(work_le || root)) >= threshold`. Both the nonce bytes
//! going into the hash and the digest coming out are little-endian; the
//! textual form of work is big-endian. This asymmetry is part of the wire
//! protocol.

use blake2::digest::consts::U8;
use blake2::{Blake2b, Digest};

use crate::blocks::Subtype;
use crate::constants::{WORK_THRESHOLD_EPOCH_1, WORK_THRESHOLD_RECEIVE, WORK_THRESHOLD_SEND};
use crate::types::{BlockHash, Work};

/// Work difficulty thresholds for the two block cost classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkThreshold {
    /// Threshold for send/change blocks and all legacy blocks.
    pub send: u64,
    /// Threshold for state receive blocks.
    pub receive: u64,
}

impl WorkThreshold {
    /// Mainnet thresholds (epoch v2).
    pub const MAINNET: WorkThreshold = WorkThreshold {
        send: WORK_THRESHOLD_SEND,
        receive: WORK_THRESHOLD_RECEIVE,
    };

    /// Thresholds before epoch v2: one difficulty class for everything.
    pub const EPOCH_1: WorkThreshold = WorkThreshold {
        send: WORK_THRESHOLD_EPOCH_1,
        receive: WORK_THRESHOLD_EPOCH_1,
    };

    /// Get the threshold for a state block subtype.
    pub fn for_subtype(&self, subtype: Subtype) -> u64 {
        match subtype {
            Subtype::Receive => self.receive,
            Subtype::Send | Subtype::Open | Subtype::Change | Subtype::Epoch => self.send,
        }
    }
}

impl Default for WorkThreshold {
    fn default() -> Self {
        Self::MAINNET
    }
}

/// Work validator for checking proof of work.
pub struct WorkValidator;

impl WorkValidator {
    /// Calculate the work value of a nonce for a given root.
    ///
    /// One Blake2b-8 evaluation over the little-endian nonce followed by
    /// the 32-byte root; the digest is read as a little-endian u64.
    pub fn work_value(work: Work, root: &BlockHash) -> u64 {
        let mut hasher = Blake2b::<U8>::new();
        hasher.update(work.to_le_bytes());
        hasher.update(root.as_bytes());
        let digest: [u8; 8] = hasher.finalize().into();
        u64::from_le_bytes(digest)
    }

    /// Validate work against a threshold.
    pub fn validate(work: Work, root: &BlockHash, threshold: u64) -> bool {
        Self::work_value(work, root) >= threshold
    }

    /// Validate work at the mainnet send/change threshold.
    pub fn validate_send(work: Work, root: &BlockHash) -> bool {
        Self::validate(work, root, WORK_THRESHOLD_SEND)
    }

    /// Validate work at the mainnet state-receive threshold.
    pub fn validate_receive(work: Work, root: &BlockHash) -> bool {
        Self::validate(work, root, WORK_THRESHOLD_RECEIVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_value_known_answer() {
        let root =
            BlockHash::from_hex("991CF190094C00F0B68E2E5F75F6BEE95A2E0BD93CEAA4A6734DB9F19B728948")
                .unwrap();
        let work = Work::new(0x123456789abcdef0);

        assert_eq!(WorkValidator::work_value(work, &root), 0x4428d1263c5dc8d7);
    }

    #[test]
    fn test_mainnet_block_work() {
        // Confirmed receive block from the live network.
        let root =
            BlockHash::from_hex("8195EF99F3563709922F781BD096D5338FDF1B5B846C61B79AE7739CD74546BF")
                .unwrap();
        let work = Work::from_hex("371099a5670cb3ed").unwrap();

        assert_eq!(
            WorkValidator::work_value(work, &root),
            0xffffffffb5e7f26e
        );
        assert!(WorkValidator::validate_send(work, &root));
        assert!(WorkValidator::validate_receive(work, &root));
    }

    #[test]
    fn test_validate_zero_work_fails() {
        let root =
            BlockHash::from_hex("991CF190094C00F0B68E2E5F75F6BEE95A2E0BD93CEAA4A6734DB9F19B728948")
                .unwrap();

        assert!(!WorkValidator::validate_send(Work::ZERO, &root));
    }

    #[test]
    fn test_threshold_for_subtype() {
        let threshold = WorkThreshold::MAINNET;

        assert_eq!(threshold.for_subtype(Subtype::Send), WORK_THRESHOLD_SEND);
        assert_eq!(threshold.for_subtype(Subtype::Change), WORK_THRESHOLD_SEND);
        assert_eq!(threshold.for_subtype(Subtype::Epoch), WORK_THRESHOLD_SEND);
        // An account's first block has no previous to relax the threshold.
        assert_eq!(threshold.for_subtype(Subtype::Open), WORK_THRESHOLD_SEND);
        assert_eq!(
            threshold.for_subtype(Subtype::Receive),
            WORK_THRESHOLD_RECEIVE
        );
    }

    #[test]
    fn test_epoch_1_is_uniform() {
        let threshold = WorkThreshold::EPOCH_1;
        assert_eq!(threshold.send, threshold.receive);
        assert_eq!(threshold.for_subtype(Subtype::Send), WORK_THRESHOLD_EPOCH_1);
        assert_eq!(
            threshold.for_subtype(Subtype::Receive),
            WORK_THRESHOLD_EPOCH_1
        );
    }

    #[test]
    fn test_threshold_ordering() {
        // Receiving is cheaper than sending under epoch v2; epoch v1 sits
        // between the two.
        assert!(WORK_THRESHOLD_RECEIVE < WORK_THRESHOLD_EPOCH_1);
        assert!(WORK_THRESHOLD_EPOCH_1 < WORK_THRESHOLD_SEND);
    }

    #[test]
    fn test_different_roots_produce_different_values() {
        let work = Work::from_hex("7202df8a7c380578").unwrap();
        let root1 =
            BlockHash::from_hex("991CF190094C00F0B68E2E5F75F6BEE95A2E0BD93CEAA4A6734DB9F19B728948")
                .unwrap();
        let root2 = BlockHash::ZERO;

        assert_ne!(
            WorkValidator::work_value(work, &root1),
            WorkValidator::work_value(work, &root2)
        );
    }
}
