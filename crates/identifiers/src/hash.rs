//! Canonical hashing for the bridge protocol.
//!
//! Every digest that crosses the chain boundary goes through this module so
//! that both endpoints agree byte for byte on what was hashed.

use borsh::BorshSerialize;
use sha2::{Digest, Sha256};

use crate::buf::Buf32;

/// Direct SHA-256 digest of a byte slice.
pub fn raw(buf: &[u8]) -> Buf32 {
    let mut hasher = Sha256::new();
    hasher.update(buf);
    Buf32::new(hasher.finalize().into())
}

/// Computes a SHA-256 digest over the canonical borsh serialization of a
/// value.
///
/// The borsh encoding of the input type is part of the cross-chain protocol:
/// reordering, adding, or removing fields changes every digest computed from
/// it and must be treated as a breaking protocol change.
pub fn compute_borsh_hash<T: BorshSerialize>(v: &T) -> Buf32 {
    let buf = borsh::to_vec(v).expect("hash: borsh serialize");
    raw(&buf)
}
