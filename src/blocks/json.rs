//! Block wire format.
//!
//! Serialization matches the JSON the reference node's `process` RPC
//! accepts, byte for byte: 32-byte values as 64 uppercase hex characters,
//! work as 16 lowercase hex characters, state balances as decimal strings
//! and legacy send balances as 32 uppercase hex characters. Key order is
//! fixed per variant; state blocks carry both `link` and `link_as_account`
//! renderings of the link field.
//!
//! Parsing accepts either link rendering and tolerates absent signature and
//! work, producing an incomplete block.

use alloc::string::String;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blocks::{Block, BlockBuilder, BlockFields, BlockKind};
use crate::error::{BlockError, Error, Result};
use crate::types::{Account, BlockHash, Link, Raw, Signature, Work};

// Serialization structs; field declaration order is the wire key order.

#[derive(Serialize)]
struct StateSer<'a> {
    account: &'a Account,
    previous: &'a BlockHash,
    representative: &'a Account,
    balance: &'a Raw,
    link: &'a Link,
    link_as_account: Account,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<&'a Signature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    work: Option<Work>,
    #[serde(rename = "type")]
    block_type: &'static str,
}

#[derive(Serialize)]
struct SendSer<'a> {
    #[serde(rename = "type")]
    block_type: &'static str,
    previous: &'a BlockHash,
    destination: &'a Account,
    balance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    work: Option<Work>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<&'a Signature>,
}

#[derive(Serialize)]
struct ReceiveSer<'a> {
    #[serde(rename = "type")]
    block_type: &'static str,
    previous: &'a BlockHash,
    source: &'a BlockHash,
    #[serde(skip_serializing_if = "Option::is_none")]
    work: Option<Work>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<&'a Signature>,
}

#[derive(Serialize)]
struct OpenSer<'a> {
    #[serde(rename = "type")]
    block_type: &'static str,
    source: &'a BlockHash,
    representative: &'a Account,
    account: &'a Account,
    #[serde(skip_serializing_if = "Option::is_none")]
    work: Option<Work>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<&'a Signature>,
}

#[derive(Serialize)]
struct ChangeSer<'a> {
    #[serde(rename = "type")]
    block_type: &'static str,
    previous: &'a BlockHash,
    representative: &'a Account,
    #[serde(skip_serializing_if = "Option::is_none")]
    work: Option<Work>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<&'a Signature>,
}

// Parsing structs; everything optional so that missing required fields are
// reported by name through the builder.

#[derive(Deserialize)]
struct StateDe {
    account: Option<Account>,
    previous: Option<BlockHash>,
    representative: Option<Account>,
    balance: Option<Raw>,
    link: Option<Link>,
    link_as_account: Option<Account>,
    signature: Option<Signature>,
    work: Option<Work>,
}

#[derive(Deserialize)]
struct SendDe {
    previous: Option<BlockHash>,
    destination: Option<Account>,
    /// Legacy send balances travel as 32 hex characters.
    balance: Option<String>,
    signature: Option<Signature>,
    work: Option<Work>,
}

#[derive(Deserialize)]
struct ReceiveDe {
    previous: Option<BlockHash>,
    source: Option<BlockHash>,
    signature: Option<Signature>,
    work: Option<Work>,
}

#[derive(Deserialize)]
struct OpenDe {
    source: Option<BlockHash>,
    representative: Option<Account>,
    account: Option<Account>,
    signature: Option<Signature>,
    work: Option<Work>,
}

#[derive(Deserialize)]
struct ChangeDe {
    previous: Option<BlockHash>,
    representative: Option<Account>,
    signature: Option<Signature>,
    work: Option<Work>,
}

impl Block {
    /// Render the block as its wire JSON string.
    ///
    /// Signature and work are omitted while unset.
    pub fn to_json(&self) -> String {
        let serialized = match self.fields() {
            BlockFields::State {
                account,
                previous,
                representative,
                balance,
                link,
            } => serde_json::to_string(&StateSer {
                account,
                previous,
                representative,
                balance,
                link,
                link_as_account: link.as_account(),
                signature: self.signature(),
                work: self.work(),
                block_type: "state",
            }),
            BlockFields::Send {
                previous,
                destination,
                balance,
            } => serde_json::to_string(&SendSer {
                block_type: "send",
                previous,
                destination,
                balance: balance.to_hex(),
                work: self.work(),
                signature: self.signature(),
            }),
            BlockFields::Receive { previous, source } => serde_json::to_string(&ReceiveSer {
                block_type: "receive",
                previous,
                source,
                work: self.work(),
                signature: self.signature(),
            }),
            BlockFields::Open {
                source,
                representative,
                account,
            } => serde_json::to_string(&OpenSer {
                block_type: "open",
                source,
                representative,
                account,
                work: self.work(),
                signature: self.signature(),
            }),
            BlockFields::Change {
                previous,
                representative,
            } => serde_json::to_string(&ChangeSer {
                block_type: "change",
                previous,
                representative,
                work: self.work(),
                signature: self.signature(),
            }),
        };
        serialized.expect("block wire structs always serialize")
    }

    /// Render the block as a JSON value tree.
    pub fn to_value(&self) -> Value {
        serde_json::from_str(&self.to_json()).expect("to_json emits valid JSON")
    }

    /// Parse a block from its wire JSON string.
    pub fn from_json(s: &str) -> Result<Block> {
        let value: Value =
            serde_json::from_str(s).map_err(|_| Error::InvalidBlock(BlockError::Malformed))?;
        Block::from_value(&value)
    }

    /// Parse a block from a JSON value tree.
    ///
    /// The `type` key selects the variant; missing required fields are
    /// reported by name. Either of `link`/`link_as_account` populates a
    /// state block's link.
    pub fn from_value(value: &Value) -> Result<Block> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(Error::InvalidBlock(BlockError::UnknownVariant))
            .and_then(BlockKind::from_type_str)?;

        let mut builder = BlockBuilder::new(kind);
        match kind {
            BlockKind::State => {
                let de: StateDe = parse(value)?;
                if let Some(account) = de.account {
                    builder = builder.account(account);
                }
                if let Some(previous) = de.previous {
                    builder = builder.previous(previous);
                }
                if let Some(representative) = de.representative {
                    builder = builder.representative(representative);
                }
                if let Some(balance) = de.balance {
                    builder = builder.balance(balance);
                }
                match (de.link, de.link_as_account) {
                    (Some(link), _) => builder = builder.link(link),
                    (None, Some(account)) => builder = builder.link_as_account(&account),
                    (None, None) => {}
                }
                builder = attach(builder, de.signature, de.work);
            }
            BlockKind::Send => {
                let de: SendDe = parse(value)?;
                if let Some(previous) = de.previous {
                    builder = builder.previous(previous);
                }
                if let Some(destination) = de.destination {
                    builder = builder.destination(destination);
                }
                if let Some(balance) = de.balance {
                    builder = builder.balance(Raw::from_hex(&balance)?);
                }
                builder = attach(builder, de.signature, de.work);
            }
            BlockKind::Receive => {
                let de: ReceiveDe = parse(value)?;
                if let Some(previous) = de.previous {
                    builder = builder.previous(previous);
                }
                if let Some(source) = de.source {
                    builder = builder.source(source);
                }
                builder = attach(builder, de.signature, de.work);
            }
            BlockKind::Open => {
                let de: OpenDe = parse(value)?;
                if let Some(source) = de.source {
                    builder = builder.source(source);
                }
                if let Some(representative) = de.representative {
                    builder = builder.representative(representative);
                }
                if let Some(account) = de.account {
                    builder = builder.account(account);
                }
                builder = attach(builder, de.signature, de.work);
            }
            BlockKind::Change => {
                let de: ChangeDe = parse(value)?;
                if let Some(previous) = de.previous {
                    builder = builder.previous(previous);
                }
                if let Some(representative) = de.representative {
                    builder = builder.representative(representative);
                }
                builder = attach(builder, de.signature, de.work);
            }
        }

        builder.build()
    }
}

fn parse<'de, T: Deserialize<'de>>(value: &Value) -> Result<T> {
    T::deserialize(value.clone()).map_err(|_| Error::InvalidBlock(BlockError::Malformed))
}

fn attach(
    mut builder: BlockBuilder,
    signature: Option<Signature>,
    work: Option<Work>,
) -> BlockBuilder {
    if let Some(signature) = signature {
        builder = builder.signature(signature);
    }
    if let Some(work) = work {
        builder = builder.work(work);
    }
    builder
}
