use causeway_identifiers::{BlockHeight, MsgHash, Nonce};
use causeway_mpt::ProofError;
use causeway_msg_types::MessageStatus;
use thiserror::Error;

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Failure surfaced by the token accounting collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("token accounting rejected the credit: {0}")]
pub struct AccountingError(pub String);

/// Registry operation failures.
///
/// Every variant names one distinct refusal; operations fail fast with no
/// state mutation, and retrying is the caller's concern.
// leaving this one flat because callers match on it a lot
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Recipient is the reserved zero address.
    #[error("recipient address must not be zero")]
    ZeroRecipient,

    /// Declared amount is zero.
    #[error("amount must not be zero")]
    ZeroAmount,

    /// The storage proof carried no nodes.
    #[error("storage proof must not be empty")]
    EmptyProof,

    /// No trusted state root has been anchored at the given height.
    #[error("no state root anchored at height {0}")]
    NoStateRoot(BlockHeight),

    /// Nonce is not the sequencer's next value for the sender.
    #[error("nonce mismatch: expected {expected}, got {got}")]
    NonceMismatch { expected: Nonce, got: Nonce },

    /// The sender's previous inbox message has not reached a terminal state.
    #[error("previous process is not completed")]
    PreviousProcessIncomplete,

    /// The storage proof did not verify against the anchored root.
    #[error("storage proof verification failed: {0}")]
    Proof(#[from] ProofError),

    /// The message hash already occupies a live slot.
    #[error("message {0:?} is already active")]
    MessageActive(MsgHash),

    /// The slot's current status forbids the attempted operation.
    #[error("operation not allowed while message is {status:?}")]
    InvalidStatus { status: MessageStatus },

    /// The revealed secret does not match the declared hash lock.
    #[error("unlock secret does not match the hash lock")]
    HashLockMismatch,

    /// No slot exists for the message hash.
    #[error("unknown message {0:?}")]
    UnknownMessage(MsgHash),

    /// The token accounting collaborator refused the business effect.
    #[error(transparent)]
    Accounting(#[from] AccountingError),
}
