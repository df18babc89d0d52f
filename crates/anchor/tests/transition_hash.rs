//! Transition hashing across an advancing origin anchor.

use causeway_anchor::{
    AnchorError, CheckpointHeader, CheckpointStore, FinalityUpdate, OriginAnchor,
};
use causeway_identifiers::{
    BlockHash, BlockHeight, Buf20, Buf32, CoreId, Dynasty, KernelHash, StateRoot, TxRoot,
};
use causeway_test_utils::ArbitraryGenerator;

fn header(tag: u8, parent: BlockHash, height: u64) -> CheckpointHeader {
    CheckpointHeader {
        block_hash: BlockHash::from(Buf32::new([tag; 32])),
        parent_hash: parent,
        state_root: StateRoot::from(Buf32::new([tag ^ 0xff; 32])),
        height: BlockHeight::new(height),
        gas_used: 500,
        tx_root: TxRoot::from(Buf32::new([tag ^ 0x0f; 32])),
        kernel_hash: KernelHash::from(Buf32::new([0xaa; 32])),
    }
}

fn auxiliary_store() -> (CheckpointStore, CheckpointHeader) {
    let genesis = header(1, BlockHash::from(Buf32::zero()), 0);
    let store = CheckpointStore::new(CoreId::from(Buf20::new([2; 20])), genesis);
    (store, genesis)
}

#[test]
fn unregistered_block_hash_fails_hard() {
    let (store, _) = auxiliary_store();
    let missing = BlockHash::from(Buf32::new([0x77; 32]));
    let origin = OriginAnchor::new(Dynasty::ZERO, BlockHash::from(Buf32::new([0x88; 32])));

    assert_eq!(
        store.transition_hash_at(missing, origin).unwrap_err(),
        AnchorError::CheckpointNotFound(missing)
    );
}

#[test]
fn registered_block_hash_is_deterministic() {
    let (store, genesis) = auxiliary_store();
    let origin = OriginAnchor::new(Dynasty::new(3), BlockHash::from(Buf32::new([0x88; 32])));

    let first = store.transition_hash_at(genesis.block_hash, origin).unwrap();
    let second = store.transition_hash_at(genesis.block_hash, origin).unwrap();
    assert_eq!(first, second);
}

#[test]
fn transition_binds_checkpoint_fields() {
    let (store, genesis) = auxiliary_store();
    let origin = OriginAnchor::new(Dynasty::ZERO, BlockHash::from(Buf32::new([0x88; 32])));

    let transition = store.transition_at(genesis.block_hash, origin).unwrap();
    assert_eq!(transition.core_id, store.core_id());
    assert_eq!(transition.auxiliary_block_hash, genesis.block_hash);
    assert_eq!(transition.auxiliary_dynasty, Dynasty::ZERO);
    assert_eq!(transition.kernel_hash, genesis.kernel_hash);
    assert_eq!(transition.tx_root, genesis.tx_root);
    assert_eq!(transition.gas_consumed, genesis.gas_used);
    assert_eq!(transition.origin_dynasty, origin.dynasty);
    assert_eq!(transition.origin_block_hash, origin.block_hash);
}

#[test]
fn distinct_origin_anchors_never_collide() {
    let (store, genesis) = auxiliary_store();
    let mut generator = ArbitraryGenerator::new();

    let mut previous: Option<(OriginAnchor, Buf32)> = None;
    for _ in 0..16 {
        let anchor: OriginAnchor = generator.generate();
        let digest = store
            .transition_hash_at(genesis.block_hash, anchor)
            .unwrap();
        if let Some((prev_anchor, prev_digest)) = previous {
            if prev_anchor != anchor {
                assert_ne!(prev_digest, digest);
            }
        }
        previous = Some((anchor, digest));
    }
}

#[test]
fn same_checkpoint_rehashes_as_origin_advances() {
    // The origin side is its own checkpoint store; its head is what the
    // auxiliary side binds into transitions.
    let origin_genesis = header(0x10, BlockHash::from(Buf32::zero()), 0);
    let mut origin_store =
        CheckpointStore::new(CoreId::from(Buf20::new([1; 20])), origin_genesis);

    let (aux_store, aux_genesis) = auxiliary_store();

    let before = aux_store
        .transition_hash_at(aux_genesis.block_hash, origin_store.head())
        .unwrap();

    // origin chain checkpoints a new justified block
    let next = header(0x11, origin_genesis.block_hash, 5);
    origin_store.add_checkpoint(next).unwrap();
    origin_store
        .apply_finality_update(FinalityUpdate {
            block_hash: next.block_hash,
            justified: true,
            finalized: false,
        })
        .unwrap();

    let after = aux_store
        .transition_hash_at(aux_genesis.block_hash, origin_store.head())
        .unwrap();

    // same auxiliary checkpoint, fresher origin anchor, different digest
    assert_ne!(before, after);

    // and the fresh digest is reproducible for the fixed new context
    let again = aux_store
        .transition_hash_at(aux_genesis.block_hash, origin_store.head())
        .unwrap();
    assert_eq!(after, again);
}
