//! Token amount arithmetic.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

type RawTokenAmount = u64;

/// An amount of bridged token value, in the token's smallest unit.
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
#[repr(transparent)]
pub struct TokenAmount(RawTokenAmount);

impl_transparent_thin_wrapper!(TokenAmount => RawTokenAmount);

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount(0);

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(&self, other: TokenAmount) -> Option<TokenAmount> {
        self.0.checked_add(other.0).map(TokenAmount)
    }

    pub fn checked_sub(&self, other: TokenAmount) -> Option<TokenAmount> {
        self.0.checked_sub(other.0).map(TokenAmount)
    }

    pub fn saturating_add(&self, other: TokenAmount) -> TokenAmount {
        TokenAmount(self.0.saturating_add(other.0))
    }

    /// The amount plus half of itself, truncating.
    ///
    /// This is the exact 1.5x factor of the bounty penalty rule; saturates
    /// rather than wraps on overflow.
    pub fn with_half_again(&self) -> TokenAmount {
        TokenAmount(self.0.saturating_add(self.0 / 2))
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
