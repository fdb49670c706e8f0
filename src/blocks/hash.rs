//! Block hashing.
//!
//! Every block variant hashes a fixed concatenation of its fields with
//! Blake2b-256. State blocks prepend a 32-byte preamble (31 zero bytes and
//! 0x06) that separates them from the legacy layouts:
//!
//! - state:   preamble || account || previous || representative || balance || link
//! - send:    previous || destination || balance
//! - receive: previous || source
//! - open:    source || representative || account
//! - change:  previous || representative
//!
//! Balances are 16 big-endian bytes; everything else is 32 raw bytes.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use crate::blocks::BlockFields;
use crate::constants::STATE_BLOCK_PREAMBLE;
use crate::types::{Account, BlockHash, Link, Raw};

/// Block hasher, dispatching on the block variant.
pub struct BlockHasher;

impl BlockHasher {
    /// Compute the hash of a block's fields.
    pub fn hash(fields: &BlockFields) -> BlockHash {
        match fields {
            BlockFields::State {
                account,
                previous,
                representative,
                balance,
                link,
            } => Self::hash_state(account, previous, representative, *balance, link),
            BlockFields::Send {
                previous,
                destination,
                balance,
            } => Self::hash_send(previous, destination, *balance),
            BlockFields::Receive { previous, source } => Self::hash_receive(previous, source),
            BlockFields::Open {
                source,
                representative,
                account,
            } => Self::hash_open(source, representative, account),
            BlockFields::Change {
                previous,
                representative,
            } => Self::hash_change(previous, representative),
        }
    }

    /// Compute a state block hash from its parts.
    pub fn hash_state(
        account: &Account,
        previous: &BlockHash,
        representative: &Account,
        balance: Raw,
        link: &Link,
    ) -> BlockHash {
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(STATE_BLOCK_PREAMBLE);
        hasher.update(account.public_key().as_bytes());
        hasher.update(previous.as_bytes());
        hasher.update(representative.public_key().as_bytes());
        hasher.update(balance.to_be_bytes());
        hasher.update(link.as_bytes());
        finalize(hasher)
    }

    /// Compute a legacy send block hash from its parts.
    pub fn hash_send(previous: &BlockHash, destination: &Account, balance: Raw) -> BlockHash {
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(previous.as_bytes());
        hasher.update(destination.public_key().as_bytes());
        hasher.update(balance.to_be_bytes());
        finalize(hasher)
    }

    /// Compute a legacy receive block hash from its parts.
    pub fn hash_receive(previous: &BlockHash, source: &BlockHash) -> BlockHash {
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(previous.as_bytes());
        hasher.update(source.as_bytes());
        finalize(hasher)
    }

    /// Compute a legacy open block hash from its parts.
    pub fn hash_open(
        source: &BlockHash,
        representative: &Account,
        account: &Account,
    ) -> BlockHash {
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(source.as_bytes());
        hasher.update(representative.public_key().as_bytes());
        hasher.update(account.public_key().as_bytes());
        finalize(hasher)
    }

    /// Compute a legacy change block hash from its parts.
    pub fn hash_change(previous: &BlockHash, representative: &Account) -> BlockHash {
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(previous.as_bytes());
        hasher.update(representative.public_key().as_bytes());
        finalize(hasher)
    }
}

fn finalize(hasher: Blake2b<U32>) -> BlockHash {
    let digest: [u8; 32] = hasher.finalize().into();
    BlockHash::from_bytes(digest)
}
