//! Message registry for one Causeway bridge endpoint.
//!
//! The registry runs the message lifecycle machine over two independently
//! governed boxes (outbox and inbox), sequences per-account nonces, escrows
//! bounties at declare time, and checks relayed storage proofs against the
//! anchored state roots of the counterpart chain.

mod accounting;
mod bounty;
mod boxes;
mod endpoint;
mod errors;
mod sequencer;

pub use accounting::{NoopAccounting, TokenAccounting};
pub use bounty::{BountyLedger, BountyRecord};
pub use boxes::MessageBox;
pub use endpoint::Endpoint;
pub use errors::{AccountingError, RegistryError, RegistryResult};
pub use sequencer::NonceSequencer;
