//! Hash-lock commitment gating the final progress transition.
//!
//! The declarer commits to `hash(secret)` when declaring an intent. Whoever
//! later submits the matching preimage may progress the message, which stops
//! third parties from front-running the progress step with a copied payload.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use causeway_identifiers::{hash, Buf32};
use serde::{Deserialize, Serialize};

/// The preimage that unlocks a declared message.
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
pub struct UnlockSecret(Buf32);

impl UnlockSecret {
    pub const fn new(data: [u8; 32]) -> Self {
        Self(Buf32::new(data))
    }

    pub const fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl From<Buf32> for UnlockSecret {
    fn from(value: Buf32) -> Self {
        Self(value)
    }
}

/// Commitment to an [`UnlockSecret`], carried in the declared intent.
#[derive(
    Copy,
    Clone,
    Debug,
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
pub struct HashLock(Buf32);

impl HashLock {
    pub const fn new(data: [u8; 32]) -> Self {
        Self(Buf32::new(data))
    }

    /// Derives the lock for a given secret.
    pub fn from_secret(secret: &UnlockSecret) -> Self {
        Self(hash::raw(secret.as_slice()))
    }

    /// Checks a revealed secret against this lock, byte-exact.
    pub fn matches(&self, secret: &UnlockSecret) -> bool {
        Self::from_secret(secret) == *self
    }
}

impl From<Buf32> for HashLock {
    fn from(value: Buf32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_matches_own_secret() {
        let secret = UnlockSecret::new([9u8; 32]);
        let lock = HashLock::from_secret(&secret);
        assert!(lock.matches(&secret));
    }

    #[test]
    fn test_lock_rejects_other_secret() {
        let secret = UnlockSecret::new([9u8; 32]);
        let other = UnlockSecret::new([10u8; 32]);
        let lock = HashLock::from_secret(&secret);
        assert!(!lock.matches(&other));
    }
}
