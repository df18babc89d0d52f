//! Generic test helpers for the Causeway workspace.

mod published;

use arbitrary::{Arbitrary, Unstructured};
use causeway_identifiers::{AccountAddr, Buf20, TokenAmount};
use causeway_msg_types::{HashLock, IntentKind, MessageIntent, UnlockSecret};
use rand::{rngs::OsRng, RngCore};

pub use published::PublishedState;

/// The default buffer size for the `ArbitraryGenerator`.
const ARB_GEN_LEN: usize = 65_536;

/// Generates arbitrary instances of workspace types from fresh OS entropy.
#[derive(Debug)]
pub struct ArbitraryGenerator {
    buf: Vec<u8>, // Persistent buffer
}

impl Default for ArbitraryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArbitraryGenerator {
    /// Creates a new `ArbitraryGenerator` with a default buffer size.
    pub fn new() -> Self {
        Self::new_with_size(ARB_GEN_LEN)
    }

    /// Creates a new `ArbitraryGenerator` with a specified buffer size.
    pub fn new_with_size(s: usize) -> Self {
        Self { buf: vec![0u8; s] }
    }

    /// Generates an arbitrary instance of type `T` using the default RNG,
    /// [`OsRng`].
    pub fn generate<T>(&mut self) -> T
    where
        T: for<'a> Arbitrary<'a> + Clone,
    {
        self.generate_with_rng::<T, OsRng>(&mut OsRng)
    }

    /// Generates an arbitrary instance of type `T` using the provided RNG.
    pub fn generate_with_rng<T, R>(&mut self, rng: &mut R) -> T
    where
        T: for<'a> Arbitrary<'a> + Clone,
        R: RngCore,
    {
        rng.fill_bytes(&mut self.buf);
        let mut u = Unstructured::new(&self.buf);
        T::arbitrary(&mut u).expect("could not generate arbitrary instance")
    }
}

/// A deterministic test account address built from a tag byte.
pub fn test_account(tag: u8) -> AccountAddr {
    AccountAddr::from(Buf20::new([tag; 20]))
}

/// A deterministic secret and its matching lock.
pub fn test_secret(tag: u8) -> (UnlockSecret, HashLock) {
    let secret = UnlockSecret::new([tag; 32]);
    let lock = HashLock::from_secret(&secret);
    (secret, lock)
}

/// A transfer intent with a freshly derived hash lock.
///
/// Returns the intent together with the secret that unlocks it.
pub fn transfer_intent(
    sender: AccountAddr,
    recipient: AccountAddr,
    amount: u64,
) -> (MessageIntent, UnlockSecret) {
    let (secret, hash_lock) = test_secret(0xd5);
    let intent = MessageIntent {
        kind: IntentKind::Transfer,
        sender,
        recipient,
        amount: TokenAmount::new(amount),
        fee: TokenAmount::new(1),
        hash_lock,
    };
    (intent, secret)
}
