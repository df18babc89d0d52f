//! Trusted state roots of the counterpart chain.

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use causeway_identifiers::{BlockHeight, StateRoot};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-height trusted state roots, populated by the external anchoring
/// mechanism and read by proof verification.
///
/// This store never blocks: a missing height is an immediate miss and the
/// caller retries later with a fresh proof. Writes are last-write-wins per
/// height — re-anchoring a height is the anchoring mechanism's prerogative.
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct StateRootStore {
    roots: BTreeMap<BlockHeight, StateRoot>,
}

impl StateRootStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the counterpart chain's state root at `height`.
    pub fn set_state_root(&mut self, height: BlockHeight, root: StateRoot) {
        debug!(%height, %root, "anchored state root");
        self.roots.insert(height, root);
    }

    /// The trusted root at `height`, if one has been anchored.
    pub fn state_root_at(&self, height: BlockHeight) -> Option<StateRoot> {
        self.roots.get(&height).copied()
    }

    /// Highest height with an anchored root.
    pub fn latest_height(&self) -> Option<BlockHeight> {
        self.roots.keys().next_back().copied()
    }
}
