//! One side of the bridge: the message registry and its operations.

use causeway_anchor::StateRootStore;
use causeway_identifiers::{AccountAddr, BlockHeight, MsgHash, Nonce, StateRoot, TokenAmount};
use causeway_mpt::verify_proof;
use causeway_msg_types::{
    compute_message_hash,
    storage::{encode_status_leaf, inbox_storage_key, outbox_storage_key},
    MessageEntry, MessageIntent, MessageStatus, UnlockSecret,
};
use tracing::{debug, info};

use crate::{
    accounting::TokenAccounting,
    bounty::BountyLedger,
    boxes::MessageBox,
    errors::{RegistryError, RegistryResult},
    sequencer::NonceSequencer,
};

/// A bridge endpoint: outbox, inbox, nonce sequencing, bounty escrow, and
/// the trusted view of the counterpart chain's state roots.
///
/// All operations are validate-then-commit: any failure aborts with no state
/// mutation, and there is no waiting primitive anywhere — a missing root or
/// an unverifiable proof fails immediately and the caller retries later.
#[derive(Debug)]
pub struct Endpoint<A> {
    /// Bounty required from declarers, snapshotted into each message.
    bounty_param: TokenAmount,

    sequencer: NonceSequencer,
    bounties: BountyLedger,
    outbox: MessageBox,
    inbox: MessageBox,
    state_roots: StateRootStore,
    accounting: A,
}

impl<A: TokenAccounting> Endpoint<A> {
    pub fn new(bounty_param: TokenAmount, accounting: A) -> Self {
        Self {
            bounty_param,
            sequencer: NonceSequencer::new(),
            bounties: BountyLedger::new(),
            outbox: MessageBox::new(),
            inbox: MessageBox::new(),
            state_roots: StateRootStore::new(),
            accounting,
        }
    }

    /// Updates the bounty parameter for future declarations.
    ///
    /// Messages already escrowed keep the amount captured when they were
    /// declared.
    pub fn set_bounty(&mut self, amount: TokenAmount) {
        info!(old = %self.bounty_param, new = %amount, "bounty parameter changed");
        self.bounty_param = amount;
    }

    pub fn bounty_param(&self) -> TokenAmount {
        self.bounty_param
    }

    /// Feed for the external anchoring mechanism.
    pub fn set_state_root(&mut self, height: BlockHeight, root: StateRoot) {
        self.state_roots.set_state_root(height, root);
    }

    pub fn state_roots(&self) -> &StateRootStore {
        &self.state_roots
    }

    pub fn outbox_status(&self, msg_hash: &MsgHash) -> MessageStatus {
        self.outbox.status(msg_hash)
    }

    pub fn inbox_status(&self, msg_hash: &MsgHash) -> MessageStatus {
        self.inbox.status(msg_hash)
    }

    pub fn next_nonce(&self, account: &AccountAddr) -> Nonce {
        self.sequencer.next(account)
    }

    pub fn escrowed(&self, msg_hash: &MsgHash) -> TokenAmount {
        self.bounties.escrowed(msg_hash)
    }

    pub fn penalty(&self, msg_hash: &MsgHash) -> TokenAmount {
        self.bounties.penalty(msg_hash)
    }

    pub fn charged(&self, msg_hash: &MsgHash) -> TokenAmount {
        self.bounties.charged(msg_hash)
    }

    /// Declares a new outbound intent.
    ///
    /// Consumes the sender's next nonce, escrows the current bounty
    /// parameter against the message, and opens the outbox slot as
    /// `Declared`.
    pub fn declare(&mut self, intent: MessageIntent, nonce: Nonce) -> RegistryResult<MsgHash> {
        if intent.recipient.is_zero() {
            return Err(RegistryError::ZeroRecipient);
        }
        if intent.amount.is_zero() {
            return Err(RegistryError::ZeroAmount);
        }
        self.sequencer.check(&intent.sender, nonce)?;

        let msg_hash = compute_message_hash(&intent, nonce);
        if let Some(existing) = self.outbox.entry(&msg_hash) {
            if !existing.status().is_terminal() {
                return Err(RegistryError::MessageActive(msg_hash));
            }
        }

        self.bounties.escrow(msg_hash, self.bounty_param);
        self.sequencer.advance(&intent.sender);
        self.outbox.insert(
            msg_hash,
            MessageEntry::new(intent, nonce, MessageStatus::Declared),
        );

        info!(%msg_hash, sender = %intent.sender, %nonce, "declared message");
        Ok(msg_hash)
    }

    /// Confirms an inbound intent against the counterpart chain's anchored
    /// state root at `block_height`.
    ///
    /// The message hash is recomputed locally from the relayed fields, so a
    /// verified proof of the declared outbox slot authenticates the whole
    /// intent. A sender gets one in-flight inbox message at a time: until
    /// the previous one is terminal, further confirms are refused.
    pub fn confirm(
        &mut self,
        intent: MessageIntent,
        proven_nonce: Nonce,
        storage_proof: &[Vec<u8>],
        block_height: BlockHeight,
    ) -> RegistryResult<MsgHash> {
        if intent.recipient.is_zero() {
            return Err(RegistryError::ZeroRecipient);
        }
        if intent.amount.is_zero() {
            return Err(RegistryError::ZeroAmount);
        }
        if storage_proof.is_empty() {
            return Err(RegistryError::EmptyProof);
        }

        let root = self
            .state_roots
            .state_root_at(block_height)
            .ok_or(RegistryError::NoStateRoot(block_height))?;

        let msg_hash = compute_message_hash(&intent, proven_nonce);

        let key = outbox_storage_key(&intent.sender, proven_nonce, &msg_hash);
        let value = encode_status_leaf(MessageStatus::Declared);
        verify_proof(root.into_inner(), key.as_slice(), &value, storage_proof)?;

        if let Some((_, prev)) = self.inbox.latest_for_sender(&intent.sender) {
            if !prev.status().is_terminal() {
                return Err(RegistryError::PreviousProcessIncomplete);
            }
            if proven_nonce <= prev.nonce() {
                return Err(RegistryError::NonceMismatch {
                    expected: prev.nonce().incr(),
                    got: proven_nonce,
                });
            }
        }

        self.inbox.insert(
            msg_hash,
            MessageEntry::new(intent, proven_nonce, MessageStatus::Confirmed),
        );

        info!(%msg_hash, sender = %intent.sender, height = %block_height, "confirmed message");
        Ok(msg_hash)
    }

    /// Confirms the outbox copy of a message by proving the counterpart
    /// inbox slot reached `Confirmed`.
    pub fn confirm_outbox(
        &mut self,
        msg_hash: MsgHash,
        storage_proof: &[Vec<u8>],
        block_height: BlockHeight,
    ) -> RegistryResult<()> {
        let entry = self
            .outbox
            .entry(&msg_hash)
            .ok_or(RegistryError::UnknownMessage(msg_hash))?;
        if entry.status() != MessageStatus::Declared {
            return Err(RegistryError::InvalidStatus {
                status: entry.status(),
            });
        }
        if storage_proof.is_empty() {
            return Err(RegistryError::EmptyProof);
        }
        let root = self
            .state_roots
            .state_root_at(block_height)
            .ok_or(RegistryError::NoStateRoot(block_height))?;

        let key = inbox_storage_key(&msg_hash);
        let value = encode_status_leaf(MessageStatus::Confirmed);
        verify_proof(root.into_inner(), key.as_slice(), &value, storage_proof)?;

        self.outbox.set_status(&msg_hash, MessageStatus::Confirmed);
        info!(%msg_hash, "outbox message confirmed");
        Ok(())
    }

    /// Progresses a confirmed inbox message with its revealed secret.
    ///
    /// The token accounting collaborator is invoked exactly once; its
    /// failure aborts the operation and the slot stays `Confirmed`.
    pub fn progress_inbox(
        &mut self,
        msg_hash: MsgHash,
        secret: &UnlockSecret,
    ) -> RegistryResult<()> {
        let entry = *self
            .inbox
            .entry(&msg_hash)
            .ok_or(RegistryError::UnknownMessage(msg_hash))?;
        if entry.status() != MessageStatus::Confirmed {
            return Err(RegistryError::InvalidStatus {
                status: entry.status(),
            });
        }
        if !entry.intent().hash_lock.matches(secret) {
            return Err(RegistryError::HashLockMismatch);
        }

        // the business effect commits together with the transition
        self.accounting
            .credit(entry.intent().recipient, entry.intent().amount)?;

        self.inbox.set_status(&msg_hash, MessageStatus::Progressed);
        info!(%msg_hash, recipient = %entry.intent().recipient, "progressed inbox message");
        Ok(())
    }

    /// Progresses a confirmed outbox message with its revealed secret,
    /// releasing the escrowed bounty to the submitter.
    pub fn progress_outbox(
        &mut self,
        msg_hash: MsgHash,
        secret: &UnlockSecret,
    ) -> RegistryResult<TokenAmount> {
        let entry = *self
            .outbox
            .entry(&msg_hash)
            .ok_or(RegistryError::UnknownMessage(msg_hash))?;
        if entry.status() != MessageStatus::Confirmed {
            return Err(RegistryError::InvalidStatus {
                status: entry.status(),
            });
        }
        if !entry.intent().hash_lock.matches(secret) {
            return Err(RegistryError::HashLockMismatch);
        }

        self.outbox.set_status(&msg_hash, MessageStatus::Progressed);
        let released = self.bounties.release(&msg_hash);
        info!(%msg_hash, %released, "progressed outbox message");
        Ok(released)
    }

    /// Begins walking back a declared message.
    ///
    /// Charges the 1.5x penalty against the escrow and returns the amount
    /// the revoker owes.
    pub fn declare_revocation(&mut self, msg_hash: MsgHash) -> RegistryResult<TokenAmount> {
        let entry = self
            .outbox
            .entry(&msg_hash)
            .ok_or(RegistryError::UnknownMessage(msg_hash))?;
        if !matches!(
            entry.status(),
            MessageStatus::Declared | MessageStatus::Confirmed
        ) {
            return Err(RegistryError::InvalidStatus {
                status: entry.status(),
            });
        }

        let penalty = self.bounties.charge_penalty(&msg_hash);
        self.outbox
            .set_status(&msg_hash, MessageStatus::RevocationDeclared);
        info!(%msg_hash, %penalty, "revocation declared");
        Ok(penalty)
    }

    /// Revokes the inbox copy of a message by proving the counterpart
    /// outbox declared its revocation.
    ///
    /// A revoked inbox slot is terminal and frees the sender to confirm a
    /// new message.
    pub fn confirm_revocation(
        &mut self,
        msg_hash: MsgHash,
        storage_proof: &[Vec<u8>],
        block_height: BlockHeight,
    ) -> RegistryResult<()> {
        let entry = self
            .inbox
            .entry(&msg_hash)
            .ok_or(RegistryError::UnknownMessage(msg_hash))?;
        if entry.status().is_terminal() {
            return Err(RegistryError::InvalidStatus {
                status: entry.status(),
            });
        }
        if storage_proof.is_empty() {
            return Err(RegistryError::EmptyProof);
        }
        let root = self
            .state_roots
            .state_root_at(block_height)
            .ok_or(RegistryError::NoStateRoot(block_height))?;

        let key = outbox_storage_key(&entry.intent().sender, entry.nonce(), &msg_hash);
        let value = encode_status_leaf(MessageStatus::RevocationDeclared);
        verify_proof(root.into_inner(), key.as_slice(), &value, storage_proof)?;

        self.inbox.set_status(&msg_hash, MessageStatus::Revoked);
        info!(%msg_hash, "inbox message revoked");
        Ok(())
    }

    /// Completes a revocation on the declaring side by proving the
    /// counterpart inbox slot was revoked. Refunds the escrow.
    pub fn progress_revocation(
        &mut self,
        msg_hash: MsgHash,
        storage_proof: &[Vec<u8>],
        block_height: BlockHeight,
    ) -> RegistryResult<TokenAmount> {
        let entry = self
            .outbox
            .entry(&msg_hash)
            .ok_or(RegistryError::UnknownMessage(msg_hash))?;
        if entry.status() != MessageStatus::RevocationDeclared {
            return Err(RegistryError::InvalidStatus {
                status: entry.status(),
            });
        }
        if storage_proof.is_empty() {
            return Err(RegistryError::EmptyProof);
        }
        let root = self
            .state_roots
            .state_root_at(block_height)
            .ok_or(RegistryError::NoStateRoot(block_height))?;

        let key = inbox_storage_key(&msg_hash);
        let value = encode_status_leaf(MessageStatus::Revoked);
        verify_proof(root.into_inner(), key.as_slice(), &value, storage_proof)?;

        self.outbox
            .set_status(&msg_hash, MessageStatus::RevocationConfirmed);
        let refund = self.bounties.release(&msg_hash);
        debug!(%msg_hash, %refund, "revocation completed");
        Ok(refund)
    }
}
