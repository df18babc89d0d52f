use causeway_identifiers::{BlockHash, BlockHeight};
use thiserror::Error;

pub type AnchorResult<T> = Result<T, AnchorError>;

/// Failures of the checkpoint/anchoring layer.
///
/// Lookups of unregistered checkpoints are hard failures by design; the soft
/// path for unknown keys belongs to the bounty ledger, not here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnchorError {
    /// Checkpoint not defined for the given block hash.
    #[error("checkpoint not defined for block {0:?}")]
    CheckpointNotFound(BlockHash),

    /// The submitted header's parent has never been checkpointed.
    #[error("parent {0:?} is not a known checkpoint")]
    UnknownParent(BlockHash),

    /// A checkpoint for this block hash already exists.
    #[error("block {0:?} is already checkpointed")]
    DuplicateCheckpoint(BlockHash),

    /// Child height must exceed the parent's.
    #[error("height {got} does not extend parent height {parent}")]
    NonIncreasingHeight {
        parent: BlockHeight,
        got: BlockHeight,
    },

    /// A finality report referenced a block we never checkpointed.
    #[error("finality update for unknown checkpoint {0:?}")]
    FinalityForUnknown(BlockHash),
}
