//! Checkpoint and state-root anchoring for the Causeway bridge.
//!
//! One chain's checkpointed history, folded into transition digests, becomes
//! the state roots the counterpart chain trusts. The finality vote itself is
//! an external collaborator; this crate only records its outcomes.

mod checkpoint;
mod errors;
mod state_root;
mod transition;

pub use checkpoint::{
    CheckpointFinality, CheckpointHeader, CheckpointRecord, CheckpointStore, FinalityUpdate,
};
pub use errors::{AnchorError, AnchorResult};
pub use state_root::StateRootStore;
pub use transition::{OriginAnchor, TransitionObject, TRANSITION_CODEC_VERSION};
