//! Core identifier types and buffer types for the Causeway bridge.

#[macro_use]
mod macros;

mod account;
mod amount;
mod buf;
mod chain;
pub mod hash;

pub use account::{AccountAddr, Nonce};
pub use amount::TokenAmount;
pub use buf::{Buf20, Buf32};
pub use chain::{BlockHash, BlockHeight, CoreId, Dynasty, KernelHash, MsgHash, StateRoot, TxRoot};
