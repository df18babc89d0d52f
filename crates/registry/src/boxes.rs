//! Keyed message slots for one side of the bridge.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use causeway_identifiers::{AccountAddr, MsgHash};
use causeway_msg_types::{MessageEntry, MessageStatus};
use serde::{Deserialize, Serialize};

/// One endpoint's outbox or inbox.
///
/// Slots are keyed by message hash and governed independently of the
/// counterpart side's copy. The box also remembers each sender's most recent
/// message, which drives the one-in-flight-per-sender rule on confirm.
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct MessageBox {
    entries: BTreeMap<MsgHash, MessageEntry>,
    latest_by_sender: BTreeMap<AccountAddr, MsgHash>,
}

impl MessageBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, msg_hash: &MsgHash) -> Option<&MessageEntry> {
        self.entries.get(msg_hash)
    }

    /// The slot's status; vacant slots read as `Undeclared`.
    pub fn status(&self, msg_hash: &MsgHash) -> MessageStatus {
        self.entries
            .get(msg_hash)
            .map(|e| e.status())
            .unwrap_or(MessageStatus::Undeclared)
    }

    /// Inserts a slot and tracks it as the sender's latest message.
    pub fn insert(&mut self, msg_hash: MsgHash, entry: MessageEntry) {
        self.latest_by_sender.insert(entry.intent().sender, msg_hash);
        self.entries.insert(msg_hash, entry);
    }

    /// Updates a slot's status in place; `false` when the slot is vacant.
    pub fn set_status(&mut self, msg_hash: &MsgHash, status: MessageStatus) -> bool {
        match self.entries.get_mut(msg_hash) {
            Some(entry) => {
                entry.set_status(status);
                true
            }
            None => false,
        }
    }

    /// The sender's most recent message in this box.
    pub fn latest_for_sender(&self, sender: &AccountAddr) -> Option<(MsgHash, &MessageEntry)> {
        let msg_hash = self.latest_by_sender.get(sender)?;
        self.entries.get(msg_hash).map(|entry| (*msg_hash, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
