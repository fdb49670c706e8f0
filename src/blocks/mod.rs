//! Block construction, hashing, signing, and serialization.

mod block;
mod builder;
mod hash;
mod json;

pub use block::{Block, BlockFields, BlockKind, Subtype, WorkEpoch};
pub use builder::{
    change_block_builder, open_block_builder, receive_block_builder, send_block_builder,
    BlockBuilder,
};
pub use hash::BlockHasher;
