use thiserror::Error;

/// Ways an inclusion proof can fail to verify.
///
/// Verification fails closed: any structural problem surfaces as one of
/// these, never as a silent pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// The proof carried no nodes at all.
    #[error("proof contains no nodes")]
    EmptyProof,

    /// A node was not decodable as a trie node.
    #[error("malformed node encoding at proof index {0}")]
    MalformedNode(usize),

    /// A node's digest does not match the reference that pointed at it.
    #[error("node at proof index {0} does not match its expected reference")]
    NodeMismatch(usize),

    /// The path in the proof diverges from the requested key.
    #[error("proof path diverges from key at proof index {0}")]
    PathDivergence(usize),

    /// The proof ran out of nodes before reaching a value for the key.
    #[error("proof ends before resolving the key")]
    Exhausted,

    /// Nodes remain after the value was already resolved.
    #[error("unexpected trailing node at proof index {0}")]
    TrailingNode(usize),

    /// The resolved value differs from the claimed value.
    #[error("resolved value does not match the expected value")]
    ValueMismatch,
}
