//! Identifiers for chains, blocks, and checkpoint bookkeeping.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::buf::{Buf20, Buf32};

/// Identifies one chain of the bridged pair.
///
/// Bound into every transition digest so that hashes computed for one
/// deployment can never be replayed against another.
#[derive(
    Copy,
    Clone,
    Eq,
    Default,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct CoreId(Buf20);

impl_buf_wrapper!(CoreId, Buf20, 20);

/// Hash of a block, usually of its header.
#[derive(
    Copy,
    Clone,
    Eq,
    Default,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct BlockHash(Buf32);

impl_buf_wrapper!(BlockHash, Buf32, 32);

/// Root of a chain's account/storage state at some block.
#[derive(
    Copy,
    Clone,
    Eq,
    Default,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct StateRoot(Buf32);

impl_buf_wrapper!(StateRoot, Buf32, 32);

/// Root of the transactions included in a block.
#[derive(
    Copy,
    Clone,
    Eq,
    Default,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct TxRoot(Buf32);

impl_buf_wrapper!(TxRoot, Buf32, 32);

/// Digest of the chain's mutable kernel configuration at a checkpoint.
#[derive(
    Copy,
    Clone,
    Eq,
    Default,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct KernelHash(Buf32);

impl_buf_wrapper!(KernelHash, Buf32, 32);

/// Height of a block within its chain.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct BlockHeight(u64);

impl_transparent_thin_wrapper!(BlockHeight => u64);

impl std::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Count of ancestor checkpoints; a finality-distance metric.
///
/// Increases by one for every checkpoint added on top of genesis.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct Dynasty(u64);

impl_transparent_thin_wrapper!(Dynasty => u64);

impl Dynasty {
    pub const ZERO: Dynasty = Dynasty(0);

    pub const fn incr(&self) -> Dynasty {
        Dynasty(self.0 + 1)
    }
}

impl std::fmt::Display for Dynasty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Hash identifying a cross-chain message, primary key of both boxes.
#[derive(
    Copy,
    Clone,
    Eq,
    Default,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct MsgHash(Buf32);

impl_buf_wrapper!(MsgHash, Buf32, 32);
