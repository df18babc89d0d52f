//! Transition objects, the unit of cross-chain trust.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use causeway_identifiers::{hash, BlockHash, Buf32, CoreId, Dynasty, KernelHash, TxRoot};
use serde::{Deserialize, Serialize};

/// Version of the transition preimage encoding.
///
/// Folded into every transition hash; bump on any change to the field set or
/// ordering.
pub const TRANSITION_CODEC_VERSION: u16 = 1;

/// Domain separation tag for transition hashes.
const TRANSITION_DOMAIN_TAG: &[u8] = b"causeway/transition";

/// The counterpart chain's best-known checkpoint at some instant.
///
/// Deliberately a call-time input rather than a cached field: the transition
/// hash of a fixed auxiliary checkpoint changes as this anchor advances.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct OriginAnchor {
    pub dynasty: Dynasty,
    pub block_hash: BlockHash,
}

impl OriginAnchor {
    pub fn new(dynasty: Dynasty, block_hash: BlockHash) -> Self {
        Self {
            dynasty,
            block_hash,
        }
    }
}

/// Everything a transition digest commits to.
///
/// Binds a local auxiliary checkpoint together with the freshest origin
/// checkpoint known at commit time; that pairing is what makes the digest a
/// cross-chain anchor instead of a purely local hash. Field order is wire
/// format; see [`TRANSITION_CODEC_VERSION`].
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct TransitionObject {
    /// Chain this transition belongs to.
    pub core_id: CoreId,

    /// Kernel configuration digest at the checkpoint.
    pub kernel_hash: KernelHash,

    /// Dynasty of the local checkpoint.
    pub auxiliary_dynasty: Dynasty,

    /// Block hash of the local checkpoint.
    pub auxiliary_block_hash: BlockHash,

    /// Cumulative gas consumed up to and including the checkpoint.
    pub gas_consumed: u64,

    /// Dynasty of the counterpart anchor.
    pub origin_dynasty: Dynasty,

    /// Block hash of the counterpart anchor.
    pub origin_block_hash: BlockHash,

    /// Transaction root of the local checkpoint.
    pub tx_root: TxRoot,
}

impl TransitionObject {
    /// Computes the canonical transition hash.
    ///
    /// Deterministic and idempotent for a fixed full input context.
    pub fn compute_hash(&self) -> Buf32 {
        let mut buf = Vec::new();
        buf.extend_from_slice(TRANSITION_DOMAIN_TAG);
        buf.extend_from_slice(&TRANSITION_CODEC_VERSION.to_be_bytes());
        let serialized = borsh::to_vec(self).expect("transition: serialize");
        buf.extend(&serialized);
        hash::raw(&buf)
    }
}

#[cfg(test)]
mod tests {
    use causeway_identifiers::Buf20;

    use super::*;

    fn test_transition() -> TransitionObject {
        TransitionObject {
            core_id: CoreId::from(Buf20::new([2; 20])),
            kernel_hash: KernelHash::from(Buf32::new([3; 32])),
            auxiliary_dynasty: Dynasty::new(4),
            auxiliary_block_hash: BlockHash::from(Buf32::new([5; 32])),
            gas_consumed: 21_000,
            origin_dynasty: Dynasty::new(6),
            origin_block_hash: BlockHash::from(Buf32::new([7; 32])),
            tx_root: TxRoot::from(Buf32::new([8; 32])),
        }
    }

    #[test]
    fn test_hash_idempotent() {
        let t = test_transition();
        assert_eq!(t.compute_hash(), t.compute_hash());
    }

    #[test]
    fn test_hash_binds_origin_anchor() {
        let t = test_transition();
        let h = t.compute_hash();

        let mut moved = t;
        moved.origin_dynasty = Dynasty::new(7);
        assert_ne!(moved.compute_hash(), h);

        let mut moved = t;
        moved.origin_block_hash = BlockHash::from(Buf32::new([9; 32]));
        assert_ne!(moved.compute_hash(), h);
    }

    #[test]
    fn test_hash_binds_local_checkpoint() {
        let t = test_transition();
        let h = t.compute_hash();

        let mut other = t;
        other.gas_consumed += 1;
        assert_ne!(other.compute_hash(), h);

        let mut other = t;
        other.kernel_hash = KernelHash::from(Buf32::new([1; 32]));
        assert_ne!(other.compute_hash(), h);
    }
}
