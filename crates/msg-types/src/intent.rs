//! Declared message intents and their canonical hashing.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use causeway_identifiers::{hash, AccountAddr, MsgHash, Nonce, TokenAmount};
use serde::{Deserialize, Serialize};

use crate::hash_lock::HashLock;

/// Version of the message preimage encoding.
///
/// Folded into every message hash; any change to the preimage field set or
/// ordering must bump this, never silently alter the encoding.
pub const MSG_CODEC_VERSION: u16 = 1;

/// Domain separation tag for message hashes.
const MSG_DOMAIN_TAG: &[u8] = b"causeway/msg-intent";

/// The kind of operation a message declares.
///
/// Part of the hashed preimage, so a transfer declaration can never be
/// reinterpreted as a revocation or vice versa.
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
pub enum IntentKind {
    /// Redeem/mint value on the counterpart chain.
    Transfer,

    /// Walk back a previously declared transfer.
    Revocation,
}

/// A cross-chain intent as declared by a sender.
///
/// This is the payload relayers carry across; every field is bound into the
/// message hash together with the sender's nonce.
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
pub struct MessageIntent {
    /// Operation kind.
    pub kind: IntentKind,

    /// Declaring account on the sending chain.
    pub sender: AccountAddr,

    /// Beneficiary account on the receiving chain.
    pub recipient: AccountAddr,

    /// Value being moved.
    pub amount: TokenAmount,

    /// Fee offered to the relayer that completes the message.
    pub fee: TokenAmount,

    /// Commitment gating the progress step.
    pub hash_lock: HashLock,
}

/// Fixed-order preimage for [`compute_message_hash`].
///
/// Field order is wire format; see [`MSG_CODEC_VERSION`].
#[derive(BorshSerialize)]
struct MessagePreimage {
    version: u16,
    kind: IntentKind,
    sender: AccountAddr,
    nonce: Nonce,
    recipient: AccountAddr,
    amount: TokenAmount,
    fee: TokenAmount,
    hash_lock: HashLock,
}

/// Computes the canonical hash identifying a message.
///
/// Deterministic across both endpoints: the inbox side recomputes this from
/// the relayed intent fields and the proven nonce, and only an exact match
/// with the outbox declaration will verify.
pub fn compute_message_hash(intent: &MessageIntent, nonce: Nonce) -> MsgHash {
    let preimage = MessagePreimage {
        version: MSG_CODEC_VERSION,
        kind: intent.kind,
        sender: intent.sender,
        nonce,
        recipient: intent.recipient,
        amount: intent.amount,
        fee: intent.fee,
        hash_lock: intent.hash_lock,
    };

    let mut buf = Vec::new();
    buf.extend_from_slice(MSG_DOMAIN_TAG);
    let serialized = borsh::to_vec(&preimage).expect("msg: serialize preimage");
    buf.extend(&serialized);

    MsgHash::from(hash::raw(&buf))
}
