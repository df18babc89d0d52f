//! Proven storage layout of the message boxes.
//!
//! Each endpoint publishes its box slots into its chain's state trie so the
//! counterpart can prove them against an anchored state root. The outbox
//! leaf sits under a key derived from the full sender+nonce+hash triple; the
//! inbox leaf is keyed by hash alone, since a verifier recomputes the hash
//! locally from the relayed intent fields.

use causeway_identifiers::{hash, AccountAddr, Buf32, MsgHash, Nonce};

use crate::status::MessageStatus;

const OUTBOX_KEY_TAG: &[u8] = b"causeway/outbox-slot";
const INBOX_KEY_TAG: &[u8] = b"causeway/inbox-slot";

/// Storage key of a sender's outbox slot.
pub fn outbox_storage_key(sender: &AccountAddr, nonce: Nonce, msg_hash: &MsgHash) -> Buf32 {
    let mut buf = Vec::with_capacity(OUTBOX_KEY_TAG.len() + 20 + 8 + 32);
    buf.extend_from_slice(OUTBOX_KEY_TAG);
    buf.extend_from_slice(sender.as_slice());
    buf.extend_from_slice(&nonce.into_inner().to_be_bytes());
    buf.extend_from_slice(msg_hash.as_slice());
    hash::raw(&buf)
}

/// Storage key of an inbox slot.
pub fn inbox_storage_key(msg_hash: &MsgHash) -> Buf32 {
    let mut buf = Vec::with_capacity(INBOX_KEY_TAG.len() + 32);
    buf.extend_from_slice(INBOX_KEY_TAG);
    buf.extend_from_slice(msg_hash.as_slice());
    hash::raw(&buf)
}

/// Encodes the status byte stored under a box storage key.
pub fn encode_status_leaf(status: MessageStatus) -> Vec<u8> {
    borsh::to_vec(&status).expect("msg: serialize status leaf")
}

#[cfg(test)]
mod tests {
    use causeway_identifiers::Buf20;

    use super::*;

    #[test]
    fn test_outbox_key_distinct_per_nonce() {
        let sender = AccountAddr::from(Buf20::new([1; 20]));
        let h = MsgHash::from(Buf32::new([2; 32]));
        let k0 = outbox_storage_key(&sender, Nonce::ZERO, &h);
        let k1 = outbox_storage_key(&sender, Nonce::ZERO.incr(), &h);
        assert_ne!(k0, k1);
    }

    #[test]
    fn test_key_domains_disjoint() {
        // Same message hash must land on different keys in the two boxes.
        let sender = AccountAddr::from(Buf20::new([1; 20]));
        let h = MsgHash::from(Buf32::new([2; 32]));
        let outbox = outbox_storage_key(&sender, Nonce::ZERO, &h);
        let inbox = inbox_storage_key(&h);
        assert_ne!(outbox, inbox);
    }

    #[test]
    fn test_status_leaf_is_single_byte() {
        assert_eq!(encode_status_leaf(MessageStatus::Declared).len(), 1);
    }
}
