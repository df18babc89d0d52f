//! Per-account nonce sequencing.

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use causeway_identifiers::{AccountAddr, Nonce};
use serde::{Deserialize, Serialize};

use crate::errors::{RegistryError, RegistryResult};

/// Monotonic per-account message counters.
///
/// Enforces exactly-once ordering of declarations: a declare is only valid
/// with the account's next nonce, checked before the intent is ever hashed.
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
pub struct NonceSequencer {
    next: BTreeMap<AccountAddr, Nonce>,
}

impl NonceSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The nonce the account must use for its next declaration.
    pub fn next(&self, account: &AccountAddr) -> Nonce {
        self.next.get(account).copied().unwrap_or(Nonce::ZERO)
    }

    /// Rejects anything but the exact next nonce.
    pub fn check(&self, account: &AccountAddr, nonce: Nonce) -> RegistryResult<()> {
        let expected = self.next(account);
        if nonce != expected {
            return Err(RegistryError::NonceMismatch {
                expected,
                got: nonce,
            });
        }
        Ok(())
    }

    /// Consumes the account's current nonce.
    pub fn advance(&mut self, account: &AccountAddr) {
        let next = self.next(account).incr();
        self.next.insert(*account, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(tag: u8) -> AccountAddr {
        AccountAddr::from(causeway_identifiers::Buf20::new([tag; 20]))
    }

    #[test]
    fn test_starts_at_zero() {
        let seq = NonceSequencer::new();
        assert_eq!(seq.next(&account(1)), Nonce::ZERO);
        seq.check(&account(1), Nonce::ZERO).unwrap();
    }

    #[test]
    fn test_advance_is_per_account() {
        let mut seq = NonceSequencer::new();
        seq.advance(&account(1));
        assert_eq!(seq.next(&account(1)), Nonce::new(1));
        assert_eq!(seq.next(&account(2)), Nonce::ZERO);
    }

    #[test]
    fn test_rejects_stale_and_skipped() {
        let mut seq = NonceSequencer::new();
        seq.advance(&account(1));

        assert_eq!(
            seq.check(&account(1), Nonce::ZERO),
            Err(RegistryError::NonceMismatch {
                expected: Nonce::new(1),
                got: Nonce::ZERO,
            })
        );
        assert_eq!(
            seq.check(&account(1), Nonce::new(5)),
            Err(RegistryError::NonceMismatch {
                expected: Nonce::new(1),
                got: Nonce::new(5),
            })
        );
    }
}
