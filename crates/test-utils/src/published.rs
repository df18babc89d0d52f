//! Stand-in for a chain runtime's published storage trie.
//!
//! In production each chain's runtime materializes its endpoint's box slots
//! into the chain state trie; relayers read proofs out of it. Tests use this
//! to play that role for both sides of the bridge.

use causeway_identifiers::{AccountAddr, MsgHash, Nonce, StateRoot};
use causeway_mpt::MerkleTrie;
use causeway_msg_types::{
    storage::{encode_status_leaf, inbox_storage_key, outbox_storage_key},
    MessageStatus,
};

/// Published box slots of one endpoint, backed by a real trie.
#[derive(Debug, Default)]
pub struct PublishedState {
    trie: MerkleTrie,
}

impl PublishedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes (or re-publishes) an outbox slot's status leaf.
    pub fn publish_outbox_slot(
        &mut self,
        sender: &AccountAddr,
        nonce: Nonce,
        msg_hash: &MsgHash,
        status: MessageStatus,
    ) {
        let key = outbox_storage_key(sender, nonce, msg_hash);
        self.trie.insert(key.as_slice(), encode_status_leaf(status));
    }

    /// Publishes (or re-publishes) an inbox slot's status leaf.
    pub fn publish_inbox_slot(&mut self, msg_hash: &MsgHash, status: MessageStatus) {
        let key = inbox_storage_key(msg_hash);
        self.trie.insert(key.as_slice(), encode_status_leaf(status));
    }

    /// Root the counterpart chain would anchor for this state.
    pub fn state_root(&self) -> StateRoot {
        StateRoot::from(self.trie.root_hash())
    }

    /// Proof of an outbox slot, as a relayer would assemble it.
    pub fn prove_outbox_slot(
        &self,
        sender: &AccountAddr,
        nonce: Nonce,
        msg_hash: &MsgHash,
    ) -> Vec<Vec<u8>> {
        let key = outbox_storage_key(sender, nonce, msg_hash);
        self.trie
            .prove(key.as_slice())
            .expect("published outbox slot missing")
    }

    /// Proof of an inbox slot.
    pub fn prove_inbox_slot(&self, msg_hash: &MsgHash) -> Vec<Vec<u8>> {
        let key = inbox_storage_key(msg_hash);
        self.trie
            .prove(key.as_slice())
            .expect("published inbox slot missing")
    }
}
