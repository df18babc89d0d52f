//! Seam to the fungible-token accounting that rides on confirmed messages.

use causeway_identifiers::{AccountAddr, TokenAmount};

use crate::errors::AccountingError;

/// Token accounting collaborator, invoked exactly once per successful inbox
/// progress.
///
/// The registry treats the credit as part of the atomic progress operation:
/// if this returns an error the whole operation aborts and the message stays
/// `Confirmed`. Implementations must not leave partial effects behind on
/// failure.
pub trait TokenAccounting {
    /// Applies the business effect of a progressed message.
    fn credit(&mut self, recipient: AccountAddr, amount: TokenAmount)
        -> Result<(), AccountingError>;
}

/// Accounting stub that accepts every credit. Used in tests and by
/// deployments that settle value outside the registry.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopAccounting;

impl TokenAccounting for NoopAccounting {
    fn credit(
        &mut self,
        _recipient: AccountAddr,
        _amount: TokenAmount,
    ) -> Result<(), AccountingError> {
        Ok(())
    }
}
