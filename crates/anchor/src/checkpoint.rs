//! Checkpoint bookkeeping for one chain.

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use causeway_identifiers::{
    BlockHash, BlockHeight, Buf32, CoreId, Dynasty, KernelHash, StateRoot, TxRoot,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    errors::{AnchorError, AnchorResult},
    transition::{OriginAnchor, TransitionObject},
};

/// A finalized block header submitted for checkpointing.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct CheckpointHeader {
    pub block_hash: BlockHash,
    pub parent_hash: BlockHash,
    pub state_root: StateRoot,
    pub height: BlockHeight,
    pub gas_used: u64,
    pub tx_root: TxRoot,
    pub kernel_hash: KernelHash,
}

/// How far the external finality vote has taken a checkpoint.
///
/// Ordered: a checkpoint's finality only ever moves forward.
#[derive(
    Copy,
    Clone,
    Debug,
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
pub enum CheckpointFinality {
    /// Registered in the store, no votes recorded yet.
    Registered,

    /// Justified by the finality vote.
    Justified,

    /// Finalized; will never revert.
    Finalized,
}

/// Outcome report from the external finality-voting collaborator.
///
/// The store only records these outcomes; it never computes them.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct FinalityUpdate {
    pub block_hash: BlockHash,
    pub justified: bool,
    pub finalized: bool,
}

/// A registered checkpoint.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct CheckpointRecord {
    block_hash: BlockHash,
    parent_hash: BlockHash,
    state_root: StateRoot,
    height: BlockHeight,
    tx_root: TxRoot,
    kernel_hash: KernelHash,

    /// Count of ancestor checkpoints.
    dynasty: Dynasty,

    /// Cumulative gas consumed up to and including this checkpoint.
    gas_consumed: u64,

    finality: CheckpointFinality,
}

impl CheckpointRecord {
    pub fn block_hash(&self) -> BlockHash {
        self.block_hash
    }

    pub fn parent_hash(&self) -> BlockHash {
        self.parent_hash
    }

    pub fn state_root(&self) -> StateRoot {
        self.state_root
    }

    pub fn height(&self) -> BlockHeight {
        self.height
    }

    pub fn tx_root(&self) -> TxRoot {
        self.tx_root
    }

    pub fn kernel_hash(&self) -> KernelHash {
        self.kernel_hash
    }

    pub fn dynasty(&self) -> Dynasty {
        self.dynasty
    }

    pub fn gas_consumed(&self) -> u64 {
        self.gas_consumed
    }

    pub fn finality(&self) -> CheckpointFinality {
        self.finality
    }
}

/// Per-chain store of checkpointed block headers.
///
/// Checkpoints form a chain rooted at an explicitly constructed genesis;
/// every later checkpoint must extend an already-known one. Dynasty counts
/// ancestors and is the finality-distance metric bound into transition
/// digests.
#[derive(
    Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize, Deserialize, Serialize,
)]
pub struct CheckpointStore {
    core_id: CoreId,
    checkpoints: BTreeMap<BlockHash, CheckpointRecord>,

    /// Highest-dynasty justified-or-finalized checkpoint.
    head: BlockHash,
}

impl CheckpointStore {
    /// Bootstraps the store with its genesis checkpoint.
    ///
    /// The genesis header is accepted unconditionally and starts at dynasty
    /// zero, already finalized. This is the only way a parentless checkpoint
    /// ever enters the store.
    pub fn new(core_id: CoreId, genesis: CheckpointHeader) -> Self {
        let record = CheckpointRecord {
            block_hash: genesis.block_hash,
            parent_hash: genesis.parent_hash,
            state_root: genesis.state_root,
            height: genesis.height,
            tx_root: genesis.tx_root,
            kernel_hash: genesis.kernel_hash,
            dynasty: Dynasty::ZERO,
            gas_consumed: genesis.gas_used,
            finality: CheckpointFinality::Finalized,
        };

        let mut checkpoints = BTreeMap::new();
        checkpoints.insert(genesis.block_hash, record);

        Self {
            core_id,
            checkpoints,
            head: genesis.block_hash,
        }
    }

    pub fn core_id(&self) -> CoreId {
        self.core_id
    }

    /// Looks up a checkpoint; unknown hashes are a hard failure.
    pub fn checkpoint(&self, block_hash: BlockHash) -> AnchorResult<&CheckpointRecord> {
        self.checkpoints
            .get(&block_hash)
            .ok_or(AnchorError::CheckpointNotFound(block_hash))
    }

    /// Whether the block has been registered as a checkpoint.
    pub fn contains(&self, block_hash: BlockHash) -> bool {
        self.checkpoints.contains_key(&block_hash)
    }

    /// Registers a new checkpoint extending a known parent.
    ///
    /// Dynasty and cumulative gas derive from the parent; the record starts
    /// unvoted and waits on [`Self::apply_finality_update`] reports.
    pub fn add_checkpoint(&mut self, header: CheckpointHeader) -> AnchorResult<Dynasty> {
        if self.checkpoints.contains_key(&header.block_hash) {
            return Err(AnchorError::DuplicateCheckpoint(header.block_hash));
        }

        let parent = self
            .checkpoints
            .get(&header.parent_hash)
            .ok_or(AnchorError::UnknownParent(header.parent_hash))?;

        if header.height <= parent.height {
            return Err(AnchorError::NonIncreasingHeight {
                parent: parent.height,
                got: header.height,
            });
        }

        let dynasty = parent.dynasty.incr();
        let gas_consumed = parent.gas_consumed.saturating_add(header.gas_used);

        let record = CheckpointRecord {
            block_hash: header.block_hash,
            parent_hash: header.parent_hash,
            state_root: header.state_root,
            height: header.height,
            tx_root: header.tx_root,
            kernel_hash: header.kernel_hash,
            dynasty,
            gas_consumed,
            finality: CheckpointFinality::Registered,
        };

        info!(block_hash = %header.block_hash, %dynasty, height = %header.height, "added checkpoint");
        self.checkpoints.insert(header.block_hash, record);
        Ok(dynasty)
    }

    /// Records the outcome of the external finality vote for a checkpoint.
    ///
    /// Finality never regresses; a report weaker than what is already
    /// recorded is a no-op.
    pub fn apply_finality_update(&mut self, update: FinalityUpdate) -> AnchorResult<()> {
        let record = self
            .checkpoints
            .get_mut(&update.block_hash)
            .ok_or(AnchorError::FinalityForUnknown(update.block_hash))?;

        let reported = if update.finalized {
            CheckpointFinality::Finalized
        } else if update.justified {
            CheckpointFinality::Justified
        } else {
            CheckpointFinality::Registered
        };

        if reported > record.finality {
            info!(block_hash = %update.block_hash, ?reported, "checkpoint finality advanced");
            record.finality = reported;
        }

        let (dynasty, finality) = (record.dynasty, record.finality);
        if finality >= CheckpointFinality::Justified {
            let head_dynasty = self.checkpoints[&self.head].dynasty;
            if dynasty > head_dynasty {
                self.head = update.block_hash;
            }
        }
        Ok(())
    }

    /// The highest-dynasty checkpoint the finality vote has stood behind.
    ///
    /// This is what the counterpart chain consumes as its view of us.
    pub fn head(&self) -> OriginAnchor {
        let record = &self.checkpoints[&self.head];
        OriginAnchor::new(record.dynasty, record.block_hash)
    }

    pub fn current_dynasty(&self) -> Dynasty {
        self.checkpoints[&self.head].dynasty
    }

    /// Builds the transition object for a checkpointed block, bound to the
    /// supplied counterpart anchor.
    ///
    /// Fails hard for any block hash that was never checkpointed. The result
    /// varies with `origin` on purpose: it certifies the checkpoint together
    /// with the freshest known origin checkpoint, not an auxiliary-only fact.
    pub fn transition_at(
        &self,
        block_hash: BlockHash,
        origin: OriginAnchor,
    ) -> AnchorResult<TransitionObject> {
        let record = self.checkpoint(block_hash)?;

        Ok(TransitionObject {
            core_id: self.core_id,
            kernel_hash: record.kernel_hash,
            auxiliary_dynasty: record.dynasty,
            auxiliary_block_hash: record.block_hash,
            gas_consumed: record.gas_consumed,
            origin_dynasty: origin.dynasty,
            origin_block_hash: origin.block_hash,
            tx_root: record.tx_root,
        })
    }

    /// The canonical transition hash for a checkpointed block.
    pub fn transition_hash_at(
        &self,
        block_hash: BlockHash,
        origin: OriginAnchor,
    ) -> AnchorResult<Buf32> {
        let transition = self.transition_at(block_hash, origin)?;
        let digest = transition.compute_hash();
        debug!(%block_hash, %digest, "computed transition hash");
        Ok(digest)
    }
}
