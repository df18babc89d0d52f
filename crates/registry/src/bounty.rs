//! Bounty escrow and penalty accounting.

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use causeway_identifiers::{MsgHash, TokenAmount};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Escrow tied to a single message.
///
/// `amount` is a snapshot of the endpoint bounty parameter at declare time.
/// It is a copied value on purpose: later parameter changes must never reach
/// back into already-escrowed messages.
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
pub struct BountyRecord {
    amount: TokenAmount,

    /// Penalty actually charged, zero until a qualifying misbehavior.
    charged: TokenAmount,
}

impl BountyRecord {
    pub fn amount(&self) -> TokenAmount {
        self.amount
    }

    pub fn charged(&self) -> TokenAmount {
        self.charged
    }
}

/// Escrow and penalty ledger, keyed by message hash.
///
/// Lookups for unknown hashes answer zero rather than failing — callers
/// cannot distinguish "no penalty" from "unknown message" at this layer.
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
pub struct BountyLedger {
    records: BTreeMap<MsgHash, BountyRecord>,
}

impl BountyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escrows the bounty for a freshly declared message.
    pub fn escrow(&mut self, msg_hash: MsgHash, amount: TokenAmount) {
        debug!(%msg_hash, %amount, "escrowed bounty");
        self.records.insert(
            msg_hash,
            BountyRecord {
                amount,
                charged: TokenAmount::ZERO,
            },
        );
    }

    /// The escrowed bounty, zero for unknown hashes.
    pub fn escrowed(&self, msg_hash: &MsgHash) -> TokenAmount {
        self.records
            .get(msg_hash)
            .map(|r| r.amount)
            .unwrap_or(TokenAmount::ZERO)
    }

    /// The standing penalty quote: exactly one and a half times the
    /// escrowed bounty, zero for unknown hashes.
    pub fn penalty(&self, msg_hash: &MsgHash) -> TokenAmount {
        self.escrowed(msg_hash).with_half_again()
    }

    /// Penalty already charged against the message, zero until misbehavior.
    pub fn charged(&self, msg_hash: &MsgHash) -> TokenAmount {
        self.records
            .get(msg_hash)
            .map(|r| r.charged)
            .unwrap_or(TokenAmount::ZERO)
    }

    /// Charges the penalty against an escrowed message and returns it.
    ///
    /// Unknown hashes charge nothing and answer zero.
    pub fn charge_penalty(&mut self, msg_hash: &MsgHash) -> TokenAmount {
        match self.records.get_mut(msg_hash) {
            Some(record) => {
                record.charged = record.amount.with_half_again();
                debug!(%msg_hash, charged = %record.charged, "charged penalty");
                record.charged
            }
            None => TokenAmount::ZERO,
        }
    }

    /// Releases the escrow, removing the record.
    ///
    /// Returns the released amount; zero when nothing was escrowed.
    pub fn release(&mut self, msg_hash: &MsgHash) -> TokenAmount {
        match self.records.remove(msg_hash) {
            Some(record) => {
                debug!(%msg_hash, amount = %record.amount, "released bounty");
                record.amount
            }
            None => TokenAmount::ZERO,
        }
    }
}
