//! Message lifecycle states and box slots.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use causeway_identifiers::Nonce;
use serde::{Deserialize, Serialize};

use crate::intent::MessageIntent;

/// Lifecycle state of a message within one box.
///
/// The outbox and inbox copies of a message run this machine independently;
/// only the hash key links them. Happy path is `Declared -> Confirmed ->
/// Progressed`, with the revocation branch splitting off any non-terminal
/// state.
///
/// The borsh discriminant of each variant is the byte published in the box
/// storage leaf, so variant order is wire format.
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
pub enum MessageStatus {
    /// No message has ever occupied the slot.
    Undeclared,

    /// Declared on the sending chain, not yet proven across.
    Declared,

    /// Proven against the counterpart chain's state root.
    Confirmed,

    /// Completed; business effect applied. Terminal.
    Progressed,

    /// Sender has begun walking the message back.
    RevocationDeclared,

    /// Revocation acknowledged on the declaring side. Terminal.
    RevocationConfirmed,

    /// Message revoked on the receiving side. Terminal.
    Revoked,
}

impl MessageStatus {
    /// Whether the slot can never transition again.
    ///
    /// A sender's inbox slot must reach a terminal state before the inbox
    /// accepts a new message from that sender.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MessageStatus::Progressed
                | MessageStatus::RevocationConfirmed
                | MessageStatus::Revoked
        )
    }
}

/// One occupied slot in an outbox or inbox.
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
pub struct MessageEntry {
    intent: MessageIntent,
    nonce: Nonce,
    status: MessageStatus,
}

impl MessageEntry {
    pub fn new(intent: MessageIntent, nonce: Nonce, status: MessageStatus) -> Self {
        Self {
            intent,
            nonce,
            status,
        }
    }

    pub fn intent(&self) -> &MessageIntent {
        &self.intent
    }

    pub fn nonce(&self) -> Nonce {
        self.nonce
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    pub fn set_status(&mut self, status: MessageStatus) {
        self.status = status;
    }
}
