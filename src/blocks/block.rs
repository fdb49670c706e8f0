//! The block model.
//!
//! A [`Block`] is a tagged record: one case per block kind, each carrying
//! exactly the fields that go into its hash, plus the signature, the work
//! nonce, and an optional per-block difficulty override. Hash and validity
//! results are cached on the block and every field mutation drops them, so
//! a stale "valid" can never survive an edit.

use core::fmt;
use serde::{Deserialize, Serialize};

#[cfg(feature = "work-cpu")]
use core::sync::atomic::AtomicBool;

use crate::blocks::BlockHasher;
use crate::error::{BlockError, Error, Result};
use crate::keys::{KeyPair, SecretKey};
use crate::types::{Account, BlockHash, Link, Raw, Signature, Work};
use crate::work::{WorkThreshold, WorkValidator};

#[cfg(feature = "work-cpu")]
use crate::work::CpuWorkGenerator;

/// The kind of a block: universal state, or one of the legacy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Universal state block.
    State,
    /// Legacy send block.
    Send,
    /// Legacy receive block.
    Receive,
    /// Legacy open block.
    Open,
    /// Legacy change block.
    Change,
}

impl BlockKind {
    /// The wire name of this kind, as used in the JSON `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::State => "state",
            BlockKind::Send => "send",
            BlockKind::Receive => "receive",
            BlockKind::Open => "open",
            BlockKind::Change => "change",
        }
    }

    /// Parse a wire name.
    pub fn from_type_str(s: &str) -> Result<Self> {
        match s {
            "state" => Ok(BlockKind::State),
            "send" => Ok(BlockKind::Send),
            "receive" => Ok(BlockKind::Receive),
            "open" => Ok(BlockKind::Open),
            "change" => Ok(BlockKind::Change),
            _ => Err(Error::InvalidBlock(BlockError::UnknownVariant)),
        }
    }

    /// Whether this is one of the legacy kinds.
    pub fn is_legacy(&self) -> bool {
        !matches!(self, BlockKind::State)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State block subtype, describing the operation a state block performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subtype {
    /// Send funds to another account.
    Send,
    /// Receive funds from a pending block.
    Receive,
    /// Open the account (first block).
    Open,
    /// Change representative.
    Change,
    /// Epoch upgrade block.
    Epoch,
}

impl Subtype {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Subtype::Send => "send",
            Subtype::Receive => "receive",
            Subtype::Open => "open",
            Subtype::Change => "change",
            Subtype::Epoch => "epoch",
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The protocol epoch whose work rules apply to a block.
///
/// Before epoch v2 a single threshold covered every block; v2 split the
/// cost into a send class and a cheaper receive class. Defaults to v2, the
/// live network's rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkEpoch {
    /// Pre-v2 rules: one threshold for all blocks.
    V1,
    /// Epoch v2 rules (current mainnet).
    #[default]
    V2,
}

/// The hashed fields of a block, one case per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockFields {
    /// Universal state block fields.
    State {
        /// The account this block belongs to.
        account: Account,
        /// Hash of the previous block, zero for the account's first block.
        previous: BlockHash,
        /// Representative account.
        representative: Account,
        /// Account balance after this block.
        balance: Raw,
        /// Multipurpose link field.
        link: Link,
    },
    /// Legacy send block fields.
    Send {
        /// Hash of the previous block.
        previous: BlockHash,
        /// Destination account.
        destination: Account,
        /// Account balance after this block.
        balance: Raw,
    },
    /// Legacy receive block fields.
    Receive {
        /// Hash of the previous block.
        previous: BlockHash,
        /// Hash of the send block being received.
        source: BlockHash,
    },
    /// Legacy open block fields.
    Open {
        /// Hash of the send block being received.
        source: BlockHash,
        /// Representative account.
        representative: Account,
        /// The account being opened.
        account: Account,
    },
    /// Legacy change block fields.
    Change {
        /// Hash of the previous block.
        previous: BlockHash,
        /// The new representative account.
        representative: Account,
    },
}

impl BlockFields {
    /// The kind tag of these fields.
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockFields::State { .. } => BlockKind::State,
            BlockFields::Send { .. } => BlockKind::Send,
            BlockFields::Receive { .. } => BlockKind::Receive,
            BlockFields::Open { .. } => BlockKind::Open,
            BlockFields::Change { .. } => BlockKind::Change,
        }
    }

    /// The root the proof of work must cover.
    ///
    /// `previous` when the block extends a chain; the account public key
    /// when it starts one (open blocks, and state blocks with a zero
    /// `previous`).
    pub fn root(&self) -> BlockHash {
        match self {
            BlockFields::State {
                account, previous, ..
            } => {
                if previous.is_zero() {
                    BlockHash::from(*account.public_key())
                } else {
                    *previous
                }
            }
            BlockFields::Send { previous, .. }
            | BlockFields::Receive { previous, .. }
            | BlockFields::Change { previous, .. } => *previous,
            BlockFields::Open { account, .. } => BlockHash::from(*account.public_key()),
        }
    }
}

/// Cached derived state, dropped whenever a field changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Validity {
    hash: Option<BlockHash>,
    signature: Option<bool>,
    work: Option<bool>,
}

/// A Nano block.
///
/// Carries the hashed fields for its variant together with the signature
/// and work that complete it. A freshly built block is a draft; once work
/// is attached and the block is signed (in either order) it is complete.
///
/// Methods that answer validity questions take `&mut self` because they
/// memoize their result on the block; exclusive access also makes the
/// mutate-then-invalidate step atomic with respect to readers.
#[derive(Debug, Clone)]
pub struct Block {
    fields: BlockFields,
    /// Subtype of a state block; drives the default work difficulty.
    subtype: Option<Subtype>,
    /// Signing identity for legacy send/receive/change blocks, which do not
    /// hash an account. Never serialized.
    signer: Option<Account>,
    signature: Option<Signature>,
    work: Option<Work>,
    /// Per-block difficulty override.
    difficulty: Option<u64>,
    epoch: WorkEpoch,
    cache: Validity,
}

/// Blocks compare by wire content: fields, signature, and work.
///
/// Local annotations (subtype, difficulty override, epoch) and caches do
/// not affect equality.
impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
            && self.signature == other.signature
            && self.work == other.work
    }
}

impl Eq for Block {}

impl Block {
    /// Create a draft block from its hashed fields.
    pub fn new(fields: BlockFields) -> Self {
        Block {
            fields,
            subtype: None,
            signer: None,
            signature: None,
            work: None,
            difficulty: None,
            epoch: WorkEpoch::default(),
            cache: Validity::default(),
        }
    }

    fn invalidate(&mut self) {
        self.cache = Validity::default();
    }

    /// The block's kind tag.
    pub fn kind(&self) -> BlockKind {
        self.fields.kind()
    }

    /// The block's hashed fields.
    pub fn fields(&self) -> &BlockFields {
        &self.fields
    }

    /// The state block subtype, if one was declared.
    pub fn subtype(&self) -> Option<Subtype> {
        self.subtype
    }

    /// Declare the state block subtype.
    ///
    /// The subtype selects the default difficulty class, so the cached work
    /// validity is dropped.
    pub fn set_subtype(&mut self, subtype: Option<Subtype>) {
        self.subtype = subtype;
        self.cache.work = None;
    }

    /// Infer a state block's subtype from its contents.
    ///
    /// Needs the balance before this block to tell sends from receives;
    /// without it a non-open, non-change block is assumed to be a send.
    /// Returns `None` for legacy blocks, which carry their kind directly.
    pub fn infer_subtype(&self, previous_balance: Option<Raw>) -> Option<Subtype> {
        let (previous, balance, link) = match &self.fields {
            BlockFields::State {
                previous,
                balance,
                link,
                ..
            } => (previous, balance, link),
            _ => return None,
        };

        Some(if previous.is_zero() {
            Subtype::Open
        } else if link.is_zero() {
            Subtype::Change
        } else {
            match previous_balance {
                Some(prev) if *balance < prev => Subtype::Send,
                Some(prev) if *balance > prev => Subtype::Receive,
                Some(_) => Subtype::Change,
                None => Subtype::Send,
            }
        })
    }

    /// The account this block belongs to.
    ///
    /// For legacy send/receive/change blocks, which do not hash an account,
    /// this is the locally attached signing identity (if any).
    pub fn account(&self) -> Option<&Account> {
        match &self.fields {
            BlockFields::State { account, .. } | BlockFields::Open { account, .. } => {
                Some(account)
            }
            _ => self.signer.as_ref(),
        }
    }

    /// Set the block's account.
    pub fn set_account(&mut self, new: Account) {
        match &mut self.fields {
            BlockFields::State { account, .. } | BlockFields::Open { account, .. } => {
                *account = new;
            }
            _ => self.signer = Some(new),
        }
        self.invalidate();
    }

    /// The previous block hash, for variants that chain on one.
    pub fn previous(&self) -> Option<&BlockHash> {
        match &self.fields {
            BlockFields::State { previous, .. }
            | BlockFields::Send { previous, .. }
            | BlockFields::Receive { previous, .. }
            | BlockFields::Change { previous, .. } => Some(previous),
            BlockFields::Open { .. } => None,
        }
    }

    /// Set the previous block hash.
    pub fn set_previous(&mut self, new: BlockHash) -> Result<()> {
        match &mut self.fields {
            BlockFields::State { previous, .. }
            | BlockFields::Send { previous, .. }
            | BlockFields::Receive { previous, .. }
            | BlockFields::Change { previous, .. } => *previous = new,
            BlockFields::Open { .. } => {
                return Err(Error::InvalidBlock(BlockError::NoSuchField("previous")))
            }
        }
        self.invalidate();
        Ok(())
    }

    /// The representative account, for variants that carry one.
    pub fn representative(&self) -> Option<&Account> {
        match &self.fields {
            BlockFields::State { representative, .. }
            | BlockFields::Open { representative, .. }
            | BlockFields::Change { representative, .. } => Some(representative),
            _ => None,
        }
    }

    /// Set the representative account.
    pub fn set_representative(&mut self, new: Account) -> Result<()> {
        match &mut self.fields {
            BlockFields::State { representative, .. }
            | BlockFields::Open { representative, .. }
            | BlockFields::Change { representative, .. } => *representative = new,
            _ => {
                return Err(Error::InvalidBlock(BlockError::NoSuchField(
                    "representative",
                )))
            }
        }
        self.invalidate();
        Ok(())
    }

    /// The balance after this block, for variants that carry one.
    pub fn balance(&self) -> Option<Raw> {
        match &self.fields {
            BlockFields::State { balance, .. } | BlockFields::Send { balance, .. } => {
                Some(*balance)
            }
            _ => None,
        }
    }

    /// Set the balance.
    pub fn set_balance(&mut self, new: Raw) -> Result<()> {
        match &mut self.fields {
            BlockFields::State { balance, .. } | BlockFields::Send { balance, .. } => {
                *balance = new
            }
            _ => return Err(Error::InvalidBlock(BlockError::NoSuchField("balance"))),
        }
        self.invalidate();
        Ok(())
    }

    /// The link field of a state block.
    pub fn link(&self) -> Option<&Link> {
        match &self.fields {
            BlockFields::State { link, .. } => Some(link),
            _ => None,
        }
    }

    /// The link field rendered as an account address.
    pub fn link_as_account(&self) -> Option<Account> {
        self.link().map(Link::as_account)
    }

    /// Set the link field.
    pub fn set_link(&mut self, new: Link) -> Result<()> {
        match &mut self.fields {
            BlockFields::State { link, .. } => *link = new,
            _ => return Err(Error::InvalidBlock(BlockError::NoSuchField("link"))),
        }
        self.invalidate();
        Ok(())
    }

    /// The destination account of a legacy send block.
    pub fn destination(&self) -> Option<&Account> {
        match &self.fields {
            BlockFields::Send { destination, .. } => Some(destination),
            _ => None,
        }
    }

    /// Set the destination account.
    pub fn set_destination(&mut self, new: Account) -> Result<()> {
        match &mut self.fields {
            BlockFields::Send { destination, .. } => *destination = new,
            _ => {
                return Err(Error::InvalidBlock(BlockError::NoSuchField(
                    "destination",
                )))
            }
        }
        self.invalidate();
        Ok(())
    }

    /// The source block hash of a receive or open block.
    pub fn source(&self) -> Option<&BlockHash> {
        match &self.fields {
            BlockFields::Receive { source, .. } | BlockFields::Open { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }

    /// Set the source block hash.
    pub fn set_source(&mut self, new: BlockHash) -> Result<()> {
        match &mut self.fields {
            BlockFields::Receive { source, .. } | BlockFields::Open { source, .. } => {
                *source = new
            }
            _ => return Err(Error::InvalidBlock(BlockError::NoSuchField("source"))),
        }
        self.invalidate();
        Ok(())
    }

    /// The root the proof of work must cover.
    pub fn root(&self) -> BlockHash {
        self.fields.root()
    }

    /// The block hash, computed on first use and cached until a field
    /// changes.
    pub fn block_hash(&mut self) -> BlockHash {
        if let Some(hash) = self.cache.hash {
            return hash;
        }
        let hash = BlockHasher::hash(&self.fields);
        self.cache.hash = Some(hash);
        hash
    }

    /// The attached signature, if any.
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// Attach an externally produced signature.
    pub fn set_signature(&mut self, signature: Signature) {
        self.signature = Some(signature);
        self.cache.signature = None;
    }

    /// The attached work nonce, if any.
    pub fn work(&self) -> Option<Work> {
        self.work
    }

    /// Attach an externally solved work nonce.
    pub fn set_work(&mut self, work: Work) {
        self.work = Some(work);
        self.cache.work = None;
    }

    /// The work epoch whose rules price this block.
    pub fn epoch(&self) -> WorkEpoch {
        self.epoch
    }

    /// Select the work epoch.
    pub fn set_epoch(&mut self, epoch: WorkEpoch) {
        self.epoch = epoch;
        self.cache.work = None;
    }

    /// The default difficulty for this block under its epoch's rules.
    ///
    /// Under epoch v2 only a state block that receives into an existing
    /// chain (subtype `receive`, nonzero `previous`) gets the reduced
    /// threshold; legacy blocks and every other state block pay the full
    /// send-class difficulty.
    pub fn default_difficulty(&self) -> u64 {
        let threshold = match self.epoch {
            WorkEpoch::V1 => WorkThreshold::EPOCH_1,
            WorkEpoch::V2 => WorkThreshold::MAINNET,
        };
        match (&self.fields, self.subtype) {
            (BlockFields::State { previous, .. }, Some(Subtype::Receive))
                if !previous.is_zero() =>
            {
                threshold.receive
            }
            _ => threshold.send,
        }
    }

    /// The difficulty this block's work is held to: the per-block override
    /// if one was set, otherwise the epoch default.
    pub fn difficulty(&self) -> u64 {
        self.difficulty.unwrap_or_else(|| self.default_difficulty())
    }

    /// Override (or clear) the difficulty for this block.
    pub fn set_difficulty(&mut self, difficulty: Option<u64>) -> Result<()> {
        if let Some(d) = difficulty {
            crate::work::validate_difficulty(d)?;
        }
        self.difficulty = difficulty;
        self.cache.work = None;
        Ok(())
    }

    /// The work value of the attached nonce, if any.
    pub fn work_value(&self) -> Option<u64> {
        self.work
            .map(|work| WorkValidator::work_value(work, &self.root()))
    }

    /// Whether the attached work meets this block's difficulty. Cached.
    pub fn has_valid_work(&mut self) -> bool {
        if let Some(valid) = self.cache.work {
            return valid;
        }
        let valid = match self.work {
            Some(work) => WorkValidator::validate(work, &self.root(), self.difficulty()),
            None => false,
        };
        self.cache.work = Some(valid);
        valid
    }

    /// Recheck the attached work, refreshing the cache.
    pub fn verify_work(&mut self) -> bool {
        self.cache.work = None;
        self.has_valid_work()
    }

    /// Whether the attached signature verifies under the block's account.
    /// Cached. A block with no account or no signature is simply invalid;
    /// malformed signatures are not distinguished from mismatches.
    pub fn has_valid_signature(&mut self) -> bool {
        if let Some(valid) = self.cache.signature {
            return valid;
        }
        let hash = self.block_hash();
        let valid = match (self.account().cloned(), self.signature) {
            (Some(account), Some(signature)) => {
                KeyPair::verify_with_public_key(account.public_key(), &hash, &signature)
            }
            _ => false,
        };
        self.cache.signature = Some(valid);
        valid
    }

    /// Recheck the attached signature, refreshing the cache.
    pub fn verify_signature(&mut self) -> bool {
        self.cache.signature = None;
        self.has_valid_signature()
    }

    /// Sign this block.
    ///
    /// When the block names an account the key must derive exactly that
    /// account; signing with any other key fails with
    /// [`Error::InvalidSignature`] and leaves the block untouched. A legacy
    /// block with no account attached adopts the key's account as its
    /// signing identity.
    pub fn sign(&mut self, secret_key: &SecretKey) -> Result<()> {
        let keypair = KeyPair::from_secret_key(secret_key.clone());

        if let Some(account) = self.account() {
            if account.public_key() != keypair.public_key() {
                return Err(Error::InvalidSignature);
            }
        } else {
            self.signer = Some(keypair.account());
        }

        let hash = self.block_hash();
        self.signature = Some(keypair.sign(&hash));
        self.cache.signature = Some(true);
        Ok(())
    }

    /// Solve work for this block and attach it.
    ///
    /// Uses the given difficulty for this solve only, falling back to the
    /// block's configured difficulty. Blocks until a nonce is found.
    #[cfg(feature = "work-cpu")]
    pub fn solve_work(&mut self, difficulty: Option<u64>) -> Result<()> {
        self.solve_work_inner(difficulty, None)
    }

    /// Solve work with a cancellation token.
    ///
    /// On cancellation, returns [`Error::Cancelled`] and leaves the block
    /// unmodified.
    #[cfg(feature = "work-cpu")]
    pub fn solve_work_cancellable(
        &mut self,
        difficulty: Option<u64>,
        cancelled: &AtomicBool,
    ) -> Result<()> {
        self.solve_work_inner(difficulty, Some(cancelled))
    }

    #[cfg(feature = "work-cpu")]
    fn solve_work_inner(
        &mut self,
        difficulty: Option<u64>,
        cancelled: Option<&AtomicBool>,
    ) -> Result<()> {
        let threshold = difficulty.unwrap_or_else(|| self.difficulty());
        let work = CpuWorkGenerator::new().generate(&self.root(), threshold, cancelled)?;
        self.work = Some(work);
        self.cache.work = None;
        Ok(())
    }

    /// Whether the block is complete: signature verifies and work meets the
    /// difficulty.
    pub fn is_complete(&mut self) -> bool {
        self.has_valid_signature() && self.has_valid_work()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::derive_keypair;
    use core::str::FromStr;

    const SOURCE: &str = "A688CF225F2F16B89E49D3153899E9B36C218672379E61A66D6495CB275392BE";

    fn test_keypair() -> KeyPair {
        derive_keypair(&[0u8; 32], 0)
    }

    fn state_block(keypair: &KeyPair) -> Block {
        Block::new(BlockFields::State {
            account: keypair.account(),
            previous: BlockHash::ZERO,
            representative: keypair.account(),
            balance: Raw::from_str("1000000000000000000000000000000").unwrap(),
            link: Link::from_hex(SOURCE).unwrap(),
        })
    }

    #[test]
    fn test_root_selection() {
        let keypair = test_keypair();

        // Opening state block: root is the account key.
        let block = state_block(&keypair);
        assert_eq!(block.root().as_bytes(), keypair.public_key().as_bytes());

        // Chained state block: root is previous.
        let mut block = state_block(&keypair);
        let previous = BlockHash::from_hex(SOURCE).unwrap();
        block.set_previous(previous).unwrap();
        assert_eq!(block.root(), previous);

        // Legacy open: root is the account key.
        let block = Block::new(BlockFields::Open {
            source: BlockHash::from_hex(SOURCE).unwrap(),
            representative: keypair.account(),
            account: keypair.account(),
        });
        assert_eq!(block.root().as_bytes(), keypair.public_key().as_bytes());

        // Legacy change: root is previous.
        let block = Block::new(BlockFields::Change {
            previous,
            representative: keypair.account(),
        });
        assert_eq!(block.root(), previous);
    }

    #[test]
    fn test_sign_and_verify() {
        let keypair = test_keypair();
        let mut block = state_block(&keypair);

        assert!(!block.has_valid_signature());
        block.sign(keypair.secret_key()).unwrap();
        assert!(block.has_valid_signature());
        assert!(block.verify_signature());
    }

    #[test]
    fn test_sign_rejects_foreign_key() {
        let keypair = test_keypair();
        let other = derive_keypair(&[0u8; 32], 1);
        let mut block = state_block(&keypair);

        assert_eq!(
            block.sign(other.secret_key()),
            Err(Error::InvalidSignature)
        );
        assert!(block.signature().is_none());
    }

    #[test]
    fn test_legacy_block_adopts_signer() {
        let keypair = test_keypair();
        let mut block = Block::new(BlockFields::Receive {
            previous: BlockHash::from_hex(SOURCE).unwrap(),
            source: BlockHash::from_hex(SOURCE).unwrap(),
        });

        assert!(block.account().is_none());
        block.sign(keypair.secret_key()).unwrap();
        assert_eq!(block.account(), Some(&keypair.account()));
        assert!(block.has_valid_signature());
    }

    #[test]
    fn test_mutation_invalidates_signature() {
        let keypair = test_keypair();
        let mut block = state_block(&keypair);
        block.sign(keypair.secret_key()).unwrap();
        assert!(block.has_valid_signature());

        block.set_balance(Raw::new(42)).unwrap();
        assert!(!block.has_valid_signature());
    }

    #[test]
    fn test_mutation_invalidates_work() {
        let keypair = test_keypair();
        let mut block = state_block(&keypair);

        // Trivial difficulty so any nonce passes against the current root.
        block.set_difficulty(Some(1)).unwrap();
        block.set_work(Work::new(7));
        assert!(block.has_valid_work());

        // Changing a field moves the root; the cached result must not
        // survive.
        block
            .set_previous(BlockHash::from_hex(SOURCE).unwrap())
            .unwrap();
        assert_eq!(block.cache.work, None);
        assert!(block.verify_work());
    }

    #[test]
    fn test_hash_cached_and_invalidated() {
        let keypair = test_keypair();
        let mut block = state_block(&keypair);

        let hash1 = block.block_hash();
        assert_eq!(block.block_hash(), hash1);

        block.set_balance(Raw::new(1)).unwrap();
        assert_ne!(block.block_hash(), hash1);
    }

    #[test]
    fn test_field_setters_respect_variant() {
        let keypair = test_keypair();
        let mut block = Block::new(BlockFields::Change {
            previous: BlockHash::from_hex(SOURCE).unwrap(),
            representative: keypair.account(),
        });

        assert_eq!(
            block.set_balance(Raw::new(1)),
            Err(Error::InvalidBlock(BlockError::NoSuchField("balance")))
        );
        assert_eq!(
            block.set_link(Link::ZERO),
            Err(Error::InvalidBlock(BlockError::NoSuchField("link")))
        );
        assert_eq!(
            block.set_source(BlockHash::ZERO),
            Err(Error::InvalidBlock(BlockError::NoSuchField("source")))
        );
        assert!(block.set_representative(keypair.account()).is_ok());

        let mut send = Block::new(BlockFields::Send {
            previous: BlockHash::from_hex(SOURCE).unwrap(),
            destination: keypair.account(),
            balance: Raw::new(10),
        });
        assert!(send.set_destination(keypair.account()).is_ok());
        assert_eq!(
            send.set_previous(BlockHash::ZERO),
            Ok(())
        );

        let mut receive = Block::new(BlockFields::Receive {
            previous: BlockHash::from_hex(SOURCE).unwrap(),
            source: BlockHash::from_hex(SOURCE).unwrap(),
        });
        assert!(receive.set_source(BlockHash::ZERO).is_ok());
        assert_eq!(
            receive.set_destination(keypair.account()),
            Err(Error::InvalidBlock(BlockError::NoSuchField("destination")))
        );
    }

    #[test]
    fn test_default_difficulty_policy() {
        let keypair = test_keypair();

        // Opening state block: full difficulty even as a receive.
        let mut block = state_block(&keypair);
        block.set_subtype(Some(Subtype::Receive));
        assert_eq!(block.default_difficulty(), WorkThreshold::MAINNET.send);

        // Chained state receive: reduced difficulty.
        block
            .set_previous(BlockHash::from_hex(SOURCE).unwrap())
            .unwrap();
        block.set_subtype(Some(Subtype::Receive));
        assert_eq!(block.default_difficulty(), WorkThreshold::MAINNET.receive);

        // Same block under epoch v1 rules.
        block.set_epoch(WorkEpoch::V1);
        assert_eq!(block.default_difficulty(), WorkThreshold::EPOCH_1.send);
        block.set_epoch(WorkEpoch::V2);

        // Send subtype: full difficulty.
        block.set_subtype(Some(Subtype::Send));
        assert_eq!(block.default_difficulty(), WorkThreshold::MAINNET.send);

        // Legacy blocks always pay the send class.
        let legacy = Block::new(BlockFields::Receive {
            previous: BlockHash::from_hex(SOURCE).unwrap(),
            source: BlockHash::from_hex(SOURCE).unwrap(),
        });
        assert_eq!(legacy.default_difficulty(), WorkThreshold::MAINNET.send);
    }

    #[test]
    fn test_difficulty_override() {
        let keypair = test_keypair();
        let mut block = state_block(&keypair);

        assert_eq!(block.difficulty(), block.default_difficulty());
        block.set_difficulty(Some(0x1000)).unwrap();
        assert_eq!(block.difficulty(), 0x1000);
        block.set_difficulty(None).unwrap();
        assert_eq!(block.difficulty(), block.default_difficulty());

        assert_eq!(
            block.set_difficulty(Some(0)),
            Err(Error::InvalidDifficulty)
        );
    }

    #[test]
    fn test_work_value_and_validity() {
        let keypair = test_keypair();
        let mut block = state_block(&keypair);

        assert_eq!(block.work_value(), None);
        assert!(!block.has_valid_work());

        block.set_work(Work::new(12345));
        let value = block.work_value().unwrap();
        assert_eq!(
            value,
            WorkValidator::work_value(Work::new(12345), &block.root())
        );

        block.set_difficulty(Some(value)).unwrap();
        assert!(block.has_valid_work());
        block.set_difficulty(Some(value.saturating_add(1))).unwrap();
        assert!(!block.has_valid_work());
    }

    #[test]
    fn test_completeness() {
        let keypair = test_keypair();
        let mut block = state_block(&keypair);

        assert!(!block.is_complete());
        block.sign(keypair.secret_key()).unwrap();
        assert!(!block.is_complete());

        block.set_difficulty(Some(1)).unwrap();
        block.set_work(Work::new(7));
        assert!(block.is_complete());
    }

    #[test]
    fn test_infer_subtype() {
        let keypair = test_keypair();

        let mut block = state_block(&keypair);
        assert_eq!(block.infer_subtype(None), Some(Subtype::Open));

        block
            .set_previous(BlockHash::from_hex(SOURCE).unwrap())
            .unwrap();
        assert_eq!(
            block.infer_subtype(Some(Raw::new(u128::MAX))),
            Some(Subtype::Send)
        );
        assert_eq!(block.infer_subtype(Some(Raw::new(1))), Some(Subtype::Receive));

        block.set_link(Link::ZERO).unwrap();
        assert_eq!(block.infer_subtype(None), Some(Subtype::Change));

        let legacy = Block::new(BlockFields::Change {
            previous: BlockHash::from_hex(SOURCE).unwrap(),
            representative: keypair.account(),
        });
        assert_eq!(legacy.infer_subtype(None), None);
    }

    #[test]
    fn test_equality_ignores_annotations() {
        let keypair = test_keypair();
        let mut a = state_block(&keypair);
        let mut b = state_block(&keypair);
        assert_eq!(a, b);

        b.set_subtype(Some(Subtype::Receive));
        b.set_difficulty(Some(1)).unwrap();
        assert_eq!(a, b);

        a.set_work(Work::new(9));
        assert_ne!(a, b);
    }
}
