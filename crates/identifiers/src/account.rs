//! Chain account identifiers.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::buf::Buf20;

/// Address of an account on either chain.
///
/// The all-zeroes address is reserved and rejected as a message participant.
#[derive(
    Copy,
    Clone,
    Eq,
    Default,
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
pub struct AccountAddr(Buf20);

impl_buf_wrapper!(AccountAddr, Buf20, 20);

/// Per-account message sequence number.
///
/// Strictly increasing by one per declared message; enforced by the nonce
/// sequencer before an intent is ever hashed.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
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
pub struct Nonce(u64);

impl_transparent_thin_wrapper!(Nonce => u64);

impl Nonce {
    pub const ZERO: Nonce = Nonce(0);

    /// The nonce immediately following this one.
    pub const fn incr(&self) -> Nonce {
        Nonce(self.0 + 1)
    }
}

impl std::fmt::Display for Nonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
