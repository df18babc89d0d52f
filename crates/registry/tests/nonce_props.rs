//! Property tests for nonce sequencing.

use causeway_identifiers::{Nonce, TokenAmount};
use causeway_registry::{Endpoint, NoopAccounting, RegistryError};
use causeway_test_utils::{test_account, transfer_intent};
use proptest::prelude::*;

proptest! {
    /// Any declaration that skips ahead is refused with the exact expected
    /// nonce in the error.
    #[test]
    fn skipped_nonce_always_fails(skip in 1u64..1_000_000) {
        let mut endpoint = Endpoint::new(TokenAmount::new(10), NoopAccounting);
        let sender = test_account(1);
        let (intent, _) = transfer_intent(sender, test_account(2), 100);

        let result = endpoint.declare(intent, Nonce::new(skip));
        prop_assert_eq!(
            result,
            Err(RegistryError::NonceMismatch {
                expected: Nonce::ZERO,
                got: Nonce::new(skip),
            })
        );
        // the failed declare left no trace
        prop_assert_eq!(endpoint.next_nonce(&sender), Nonce::ZERO);
    }

    /// Declaring in order always succeeds and advances by exactly one,
    /// while replaying the just-used nonce always fails.
    #[test]
    fn sequential_declares_advance_by_one(count in 1usize..20) {
        let mut endpoint = Endpoint::new(TokenAmount::new(10), NoopAccounting);
        let sender = test_account(1);

        for i in 0..count {
            let (intent, _) =
                transfer_intent(sender, test_account(2), 100 + i as u64);
            let nonce = Nonce::new(i as u64);
            endpoint.declare(intent, nonce).unwrap();
            prop_assert_eq!(endpoint.next_nonce(&sender), nonce.incr());

            let (replay, _) =
                transfer_intent(sender, test_account(3), 7 + i as u64);
            prop_assert!(endpoint.declare(replay, nonce).is_err());
        }
    }
}
