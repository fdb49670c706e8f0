//! Fluent block builder.
//!
//! The builder is the draft stage of a block's life: fields may be missing
//! or arrive in any order, and [`BlockBuilder::build`] checks the variant's
//! requirements before handing out a [`Block`].

use crate::blocks::{Block, BlockFields, BlockHasher, BlockKind, Subtype, WorkEpoch};
use crate::error::{BlockError, Error, Result};
use crate::keys::KeyPair;
use crate::types::{Account, BlockHash, Link, Raw, Signature, Work};

/// Builder for blocks of any variant.
///
/// # Example
///
/// ```
/// use xno_core::prelude::*;
///
/// # fn main() -> xno_core::error::Result<()> {
/// let seed = Seed::from_hex("0000000000000000000000000000000000000000000000000000000000000000")?;
/// let keypair = seed.derive(0);
///
/// let block = BlockBuilder::new(BlockKind::State)
///     .account(keypair.account())
///     .previous(BlockHash::ZERO)
///     .representative(keypair.account())
///     .balance(Raw::from_nano(1)?)
///     .link(Link::ZERO)
///     .sign(&keypair)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    kind: BlockKind,
    account: Option<Account>,
    previous: Option<BlockHash>,
    representative: Option<Account>,
    balance: Option<Raw>,
    link: Option<Link>,
    destination: Option<Account>,
    source: Option<BlockHash>,
    subtype: Option<Subtype>,
    signature: Option<Signature>,
    work: Option<Work>,
    difficulty: Option<u64>,
    epoch: WorkEpoch,
}

impl BlockBuilder {
    /// Create a builder for the given block kind.
    pub fn new(kind: BlockKind) -> Self {
        BlockBuilder {
            kind,
            account: None,
            previous: None,
            representative: None,
            balance: None,
            link: None,
            destination: None,
            source: None,
            subtype: None,
            signature: None,
            work: None,
            difficulty: None,
            epoch: WorkEpoch::default(),
        }
    }

    /// Set the account.
    ///
    /// For legacy send/receive/change blocks this attaches the signing
    /// identity without entering the hash.
    pub fn account(mut self, account: Account) -> Self {
        self.account = Some(account);
        self
    }

    /// Set the previous block hash. Use [`BlockHash::ZERO`] for an
    /// account's first state block.
    pub fn previous(mut self, hash: BlockHash) -> Self {
        self.previous = Some(hash);
        self
    }

    /// Set the representative account.
    pub fn representative(mut self, account: Account) -> Self {
        self.representative = Some(account);
        self
    }

    /// Set the balance after this block.
    pub fn balance(mut self, balance: Raw) -> Self {
        self.balance = Some(balance);
        self
    }

    /// Set the link field of a state block.
    pub fn link(mut self, link: Link) -> Self {
        self.link = Some(link);
        self
    }

    /// Set the link field from a destination account (send semantics).
    pub fn link_as_account(mut self, account: &Account) -> Self {
        self.link = Some(Link::from_account(account));
        self
    }

    /// Set the link field from a source block hash (receive semantics).
    pub fn link_as_block(mut self, hash: &BlockHash) -> Self {
        self.link = Some(Link::from_block_hash(hash));
        self
    }

    /// Set the destination account of a legacy send block.
    pub fn destination(mut self, account: Account) -> Self {
        self.destination = Some(account);
        self
    }

    /// Set the source block hash of a legacy receive/open block.
    pub fn source(mut self, hash: BlockHash) -> Self {
        self.source = Some(hash);
        self
    }

    /// Declare the state block subtype.
    pub fn subtype(mut self, subtype: Subtype) -> Self {
        self.subtype = Some(subtype);
        self
    }

    /// Attach a pre-computed signature.
    pub fn signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Attach a proof of work nonce.
    pub fn work(mut self, work: Work) -> Self {
        self.work = Some(work);
        self
    }

    /// Override the work difficulty for the built block.
    pub fn difficulty(mut self, difficulty: u64) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Select the work epoch for the built block.
    pub fn epoch(mut self, epoch: WorkEpoch) -> Self {
        self.epoch = epoch;
        self
    }

    /// Sign the draft with the given keypair.
    ///
    /// A no-op while required fields are still missing; `build` will then
    /// report what is absent.
    pub fn sign(mut self, keypair: &KeyPair) -> Self {
        if let Ok(fields) = self.fields() {
            let hash = BlockHasher::hash(&fields);
            self.signature = Some(keypair.sign(&hash));
            if self.account.is_none() {
                self.account = Some(keypair.account());
            }
        }
        self
    }

    /// The hash of the block being built.
    ///
    /// Fails while required fields are missing.
    pub fn hash(&self) -> Result<BlockHash> {
        Ok(BlockHasher::hash(&self.fields()?))
    }

    fn require<T: Clone>(field: &Option<T>, name: &'static str) -> Result<T> {
        field
            .clone()
            .ok_or(Error::InvalidBlock(BlockError::MissingField(name)))
    }

    /// Assemble the variant fields, checking presence.
    fn fields(&self) -> Result<BlockFields> {
        Ok(match self.kind {
            BlockKind::State => BlockFields::State {
                account: Self::require(&self.account, "account")?,
                previous: Self::require(&self.previous, "previous")?,
                representative: Self::require(&self.representative, "representative")?,
                balance: Self::require(&self.balance, "balance")?,
                link: Self::require(&self.link, "link")?,
            },
            BlockKind::Send => BlockFields::Send {
                previous: Self::require(&self.previous, "previous")?,
                destination: Self::require(&self.destination, "destination")?,
                balance: Self::require(&self.balance, "balance")?,
            },
            BlockKind::Receive => BlockFields::Receive {
                previous: Self::require(&self.previous, "previous")?,
                source: Self::require(&self.source, "source")?,
            },
            BlockKind::Open => BlockFields::Open {
                source: Self::require(&self.source, "source")?,
                representative: Self::require(&self.representative, "representative")?,
                account: Self::require(&self.account, "account")?,
            },
            BlockKind::Change => BlockFields::Change {
                previous: Self::require(&self.previous, "previous")?,
                representative: Self::require(&self.representative, "representative")?,
            },
        })
    }

    /// Build the block.
    ///
    /// Fails with [`Error::InvalidBlock`] naming the first missing required
    /// field of the variant.
    pub fn build(self) -> Result<Block> {
        let fields = self.fields()?;
        let legacy_signer = match fields.kind() {
            BlockKind::Send | BlockKind::Receive | BlockKind::Change => self.account,
            _ => None,
        };

        let mut block = Block::new(fields);
        block.set_subtype(self.subtype);
        if let Some(signer) = legacy_signer {
            block.set_account(signer);
        }
        if let Some(signature) = self.signature {
            block.set_signature(signature);
        }
        if let Some(work) = self.work {
            block.set_work(work);
        }
        block.set_difficulty(self.difficulty)?;
        block.set_epoch(self.epoch);
        Ok(block)
    }
}

/// Builder for a state block that sends funds.
pub fn send_block_builder(
    account: Account,
    previous: BlockHash,
    representative: Account,
    new_balance: Raw,
    destination: &Account,
) -> BlockBuilder {
    BlockBuilder::new(BlockKind::State)
        .account(account)
        .previous(previous)
        .representative(representative)
        .balance(new_balance)
        .link_as_account(destination)
        .subtype(Subtype::Send)
}

/// Builder for a state block that receives a pending send.
pub fn receive_block_builder(
    account: Account,
    previous: BlockHash,
    representative: Account,
    new_balance: Raw,
    source_hash: &BlockHash,
) -> BlockBuilder {
    BlockBuilder::new(BlockKind::State)
        .account(account)
        .previous(previous)
        .representative(representative)
        .balance(new_balance)
        .link_as_block(source_hash)
        .subtype(Subtype::Receive)
}

/// Builder for a state block that opens an account.
pub fn open_block_builder(
    account: Account,
    representative: Account,
    balance: Raw,
    source_hash: &BlockHash,
) -> BlockBuilder {
    BlockBuilder::new(BlockKind::State)
        .account(account)
        .previous(BlockHash::ZERO)
        .representative(representative)
        .balance(balance)
        .link_as_block(source_hash)
        .subtype(Subtype::Open)
}

/// Builder for a state block that changes the representative.
pub fn change_block_builder(
    account: Account,
    previous: BlockHash,
    new_representative: Account,
    balance: Raw,
) -> BlockBuilder {
    BlockBuilder::new(BlockKind::State)
        .account(account)
        .previous(previous)
        .representative(new_representative)
        .balance(balance)
        .link(Link::ZERO)
        .subtype(Subtype::Change)
}
