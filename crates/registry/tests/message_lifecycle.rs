//! End-to-end message lifecycle across two mirrored endpoints.
//!
//! These tests play the relayer: they read proofs out of a simulated
//! published storage trie on one side and feed them to the other side's
//! registry, the way the off-system transport would.

use causeway_identifiers::{AccountAddr, BlockHeight, MsgHash, Nonce, TokenAmount};
use causeway_msg_types::{compute_message_hash, MessageStatus, UnlockSecret};
use causeway_registry::{
    AccountingError, Endpoint, NoopAccounting, RegistryError, TokenAccounting,
};
use causeway_test_utils::{test_account, transfer_intent, PublishedState};

const BOUNTY: u64 = 100;

fn origin() -> Endpoint<NoopAccounting> {
    Endpoint::new(TokenAmount::new(BOUNTY), NoopAccounting)
}

fn auxiliary() -> Endpoint<NoopAccounting> {
    Endpoint::new(TokenAmount::new(BOUNTY), NoopAccounting)
}

/// Publishes the outbox slot and anchors its root on the receiving side.
fn relay_outbox_slot(
    published: &mut PublishedState,
    receiver: &mut Endpoint<impl TokenAccounting>,
    sender: &AccountAddr,
    nonce: Nonce,
    msg_hash: &MsgHash,
    status: MessageStatus,
    height: BlockHeight,
) -> Vec<Vec<u8>> {
    published.publish_outbox_slot(sender, nonce, msg_hash, status);
    receiver.set_state_root(height, published.state_root());
    published.prove_outbox_slot(sender, nonce, msg_hash)
}

#[test]
fn scenario_a_declare_confirm_progress() {
    let mut origin = origin();
    let mut auxiliary = auxiliary();
    let mut origin_published = PublishedState::new();
    let mut aux_published = PublishedState::new();

    let sender = test_account(1);
    let recipient = test_account(2);
    let (intent, secret) = transfer_intent(sender, recipient, 5_000);

    // declare on the origin side
    let msg_hash = origin.declare(intent, Nonce::ZERO).unwrap();
    assert_eq!(origin.outbox_status(&msg_hash), MessageStatus::Declared);
    assert_eq!(origin.escrowed(&msg_hash), TokenAmount::new(100));
    assert_eq!(origin.penalty(&msg_hash), TokenAmount::new(150));
    assert_eq!(origin.charged(&msg_hash), TokenAmount::ZERO);

    // relay the declaration proof to the auxiliary side
    let height = BlockHeight::new(7);
    let proof = relay_outbox_slot(
        &mut origin_published,
        &mut auxiliary,
        &sender,
        Nonce::ZERO,
        &msg_hash,
        MessageStatus::Declared,
        height,
    );
    let confirmed = auxiliary
        .confirm(intent, Nonce::ZERO, &proof, height)
        .unwrap();
    assert_eq!(confirmed, msg_hash);
    assert_eq!(auxiliary.inbox_status(&msg_hash), MessageStatus::Confirmed);

    // relay the inbox confirmation back so the outbox can confirm too
    aux_published.publish_inbox_slot(&msg_hash, MessageStatus::Confirmed);
    let back_height = BlockHeight::new(9);
    origin.set_state_root(back_height, aux_published.state_root());
    let back_proof = aux_published.prove_inbox_slot(&msg_hash);
    origin
        .confirm_outbox(msg_hash, &back_proof, back_height)
        .unwrap();
    assert_eq!(origin.outbox_status(&msg_hash), MessageStatus::Confirmed);

    // the recipient reveals the secret; both sides progress independently
    auxiliary.progress_inbox(msg_hash, &secret).unwrap();
    assert_eq!(auxiliary.inbox_status(&msg_hash), MessageStatus::Progressed);

    let released = origin.progress_outbox(msg_hash, &secret).unwrap();
    assert_eq!(released, TokenAmount::new(100));
    assert_eq!(origin.outbox_status(&msg_hash), MessageStatus::Progressed);
    assert_eq!(origin.escrowed(&msg_hash), TokenAmount::ZERO);
    assert_eq!(origin.penalty(&msg_hash), TokenAmount::ZERO);
}

#[test]
fn scenario_b_proof_against_wrong_root() {
    let mut origin = origin();
    let mut auxiliary = auxiliary();

    let sender = test_account(1);
    let (intent, _) = transfer_intent(sender, test_account(2), 5_000);
    let msg_hash = origin.declare(intent, Nonce::ZERO).unwrap();

    // the proof comes from an honest-looking state...
    let mut real_published = PublishedState::new();
    real_published.publish_outbox_slot(&sender, Nonce::ZERO, &msg_hash, MessageStatus::Declared);
    let proof = real_published.prove_outbox_slot(&sender, Nonce::ZERO, &msg_hash);

    // ...but the anchored root at that height belongs to a different state
    let mut other_published = PublishedState::new();
    other_published.publish_inbox_slot(&msg_hash, MessageStatus::Confirmed);
    let height = BlockHeight::new(7);
    auxiliary.set_state_root(height, other_published.state_root());

    let result = auxiliary.confirm(intent, Nonce::ZERO, &proof, height);
    assert!(matches!(result, Err(RegistryError::Proof(_))));

    // no partial commit on the inbox
    assert_eq!(auxiliary.inbox_status(&msg_hash), MessageStatus::Undeclared);
}

#[test]
fn scenario_c_one_in_flight_per_sender() {
    let mut origin = origin();
    let mut auxiliary = auxiliary();
    let mut origin_published = PublishedState::new();

    let sender = test_account(1);
    let (first_intent, _) = transfer_intent(sender, test_account(2), 1_000);
    let (second_intent, _) = transfer_intent(sender, test_account(3), 2_000);

    let first = origin.declare(first_intent, Nonce::ZERO).unwrap();
    let second = origin.declare(second_intent, Nonce::new(1)).unwrap();

    // confirm the first message
    let height = BlockHeight::new(4);
    let proof = relay_outbox_slot(
        &mut origin_published,
        &mut auxiliary,
        &sender,
        Nonce::ZERO,
        &first,
        MessageStatus::Declared,
        height,
    );
    auxiliary
        .confirm(first_intent, Nonce::ZERO, &proof, height)
        .unwrap();

    // the second confirm is refused while the first is in flight
    let height2 = BlockHeight::new(5);
    let proof2 = relay_outbox_slot(
        &mut origin_published,
        &mut auxiliary,
        &sender,
        Nonce::new(1),
        &second,
        MessageStatus::Declared,
        height2,
    );
    assert_eq!(
        auxiliary.confirm(second_intent, Nonce::new(1), &proof2, height2),
        Err(RegistryError::PreviousProcessIncomplete)
    );

    // the sender walks the first message back
    let penalty = origin.declare_revocation(first).unwrap();
    assert_eq!(penalty, TokenAmount::new(150));
    assert_eq!(origin.charged(&first), TokenAmount::new(150));

    let height3 = BlockHeight::new(6);
    let revocation_proof = relay_outbox_slot(
        &mut origin_published,
        &mut auxiliary,
        &sender,
        Nonce::ZERO,
        &first,
        MessageStatus::RevocationDeclared,
        height3,
    );
    auxiliary
        .confirm_revocation(first, &revocation_proof, height3)
        .unwrap();
    assert_eq!(auxiliary.inbox_status(&first), MessageStatus::Revoked);

    // the revoked slot frees the sender, and the earlier proof still holds
    // against the root it was anchored under
    auxiliary
        .confirm(second_intent, Nonce::new(1), &proof2, height2)
        .unwrap();
    assert_eq!(auxiliary.inbox_status(&second), MessageStatus::Confirmed);
}

#[test]
fn declare_argument_checks() {
    let mut origin = origin();
    let sender = test_account(1);

    let (mut zero_recipient, _) = transfer_intent(sender, test_account(2), 1_000);
    zero_recipient.recipient = AccountAddr::zero();
    assert_eq!(
        origin.declare(zero_recipient, Nonce::ZERO),
        Err(RegistryError::ZeroRecipient)
    );

    let (mut zero_amount, _) = transfer_intent(sender, test_account(2), 1_000);
    zero_amount.amount = TokenAmount::ZERO;
    assert_eq!(
        origin.declare(zero_amount, Nonce::ZERO),
        Err(RegistryError::ZeroAmount)
    );

    // nothing was committed by the failed declares
    assert_eq!(origin.next_nonce(&sender), Nonce::ZERO);
}

#[test]
fn declare_nonce_sequencing() {
    let mut origin = origin();
    let sender = test_account(1);
    let (intent, _) = transfer_intent(sender, test_account(2), 1_000);

    // skipped nonce
    assert_eq!(
        origin.declare(intent, Nonce::new(1)),
        Err(RegistryError::NonceMismatch {
            expected: Nonce::ZERO,
            got: Nonce::new(1),
        })
    );

    origin.declare(intent, Nonce::ZERO).unwrap();

    // replayed nonce
    assert_eq!(
        origin.declare(intent, Nonce::ZERO),
        Err(RegistryError::NonceMismatch {
            expected: Nonce::new(1),
            got: Nonce::ZERO,
        })
    );
}

#[test]
fn confirm_argument_checks() {
    let mut auxiliary = auxiliary();
    let sender = test_account(1);
    let (intent, _) = transfer_intent(sender, test_account(2), 1_000);
    let height = BlockHeight::new(3);

    // empty proof is its own failure
    assert_eq!(
        auxiliary.confirm(intent, Nonce::ZERO, &[], height),
        Err(RegistryError::EmptyProof)
    );

    // height with no anchored root fails before any proof work
    let bogus_proof = vec![vec![0u8; 8]];
    assert_eq!(
        auxiliary.confirm(intent, Nonce::ZERO, &bogus_proof, height),
        Err(RegistryError::NoStateRoot(height))
    );
}

#[test]
fn progress_requires_confirmed_and_matching_secret() {
    let mut origin = origin();
    let sender = test_account(1);
    let (intent, secret) = transfer_intent(sender, test_account(2), 1_000);
    let msg_hash = origin.declare(intent, Nonce::ZERO).unwrap();

    // declared but unconfirmed outbox cannot progress
    assert_eq!(
        origin.progress_outbox(msg_hash, &secret),
        Err(RegistryError::InvalidStatus {
            status: MessageStatus::Declared,
        })
    );

    // unknown hash is a hard lookup failure
    let missing = compute_message_hash(&intent, Nonce::new(9));
    assert_eq!(
        origin.progress_outbox(missing, &secret),
        Err(RegistryError::UnknownMessage(missing))
    );
}

#[test]
fn progress_inbox_rejects_wrong_secret_and_reentry() {
    let mut origin = origin();
    let mut auxiliary = auxiliary();
    let mut origin_published = PublishedState::new();

    let sender = test_account(1);
    let (intent, secret) = transfer_intent(sender, test_account(2), 1_000);
    let msg_hash = origin.declare(intent, Nonce::ZERO).unwrap();

    let height = BlockHeight::new(3);
    let proof = relay_outbox_slot(
        &mut origin_published,
        &mut auxiliary,
        &sender,
        Nonce::ZERO,
        &msg_hash,
        MessageStatus::Declared,
        height,
    );
    auxiliary
        .confirm(intent, Nonce::ZERO, &proof, height)
        .unwrap();

    let wrong = UnlockSecret::new([0xee; 32]);
    assert_eq!(
        auxiliary.progress_inbox(msg_hash, &wrong),
        Err(RegistryError::HashLockMismatch)
    );
    assert_eq!(auxiliary.inbox_status(&msg_hash), MessageStatus::Confirmed);

    auxiliary.progress_inbox(msg_hash, &secret).unwrap();

    // double progress is rejected by the state check
    assert_eq!(
        auxiliary.progress_inbox(msg_hash, &secret),
        Err(RegistryError::InvalidStatus {
            status: MessageStatus::Progressed,
        })
    );
}

#[test]
fn bounty_snapshot_survives_parameter_change() {
    let mut origin = origin();
    let sender = test_account(1);
    let (intent, _) = transfer_intent(sender, test_account(2), 1_000);

    let before = origin.declare(intent, Nonce::ZERO).unwrap();
    origin.set_bounty(TokenAmount::new(500));

    // already-escrowed message keeps its declare-time snapshot
    assert_eq!(origin.escrowed(&before), TokenAmount::new(100));
    assert_eq!(origin.penalty(&before), TokenAmount::new(150));

    // messages declared after the change pick up the new parameter
    let (next_intent, _) = transfer_intent(sender, test_account(3), 2_000);
    let after = origin.declare(next_intent, Nonce::new(1)).unwrap();
    assert_eq!(origin.escrowed(&after), TokenAmount::new(500));
    assert_eq!(origin.penalty(&after), TokenAmount::new(750));
}

/// Accounting double that records credits and can be told to refuse them.
#[derive(Debug, Default)]
struct RecordingAccounting {
    credits: Vec<(AccountAddr, TokenAmount)>,
    refuse: bool,
}

impl TokenAccounting for &mut RecordingAccounting {
    fn credit(
        &mut self,
        recipient: AccountAddr,
        amount: TokenAmount,
    ) -> Result<(), AccountingError> {
        if self.refuse {
            return Err(AccountingError("ledger unavailable".into()));
        }
        self.credits.push((recipient, amount));
        Ok(())
    }
}

#[test]
fn accounting_failure_aborts_progress() {
    let mut accounting = RecordingAccounting {
        refuse: true,
        ..Default::default()
    };

    let mut origin = origin();
    let mut origin_published = PublishedState::new();
    let mut auxiliary = Endpoint::new(TokenAmount::new(BOUNTY), &mut accounting);

    let sender = test_account(1);
    let recipient = test_account(2);
    let (intent, secret) = transfer_intent(sender, recipient, 1_000);
    let msg_hash = origin.declare(intent, Nonce::ZERO).unwrap();

    let height = BlockHeight::new(3);
    let proof = relay_outbox_slot(
        &mut origin_published,
        &mut auxiliary,
        &sender,
        Nonce::ZERO,
        &msg_hash,
        MessageStatus::Declared,
        height,
    );
    auxiliary
        .confirm(intent, Nonce::ZERO, &proof, height)
        .unwrap();

    // the refused credit aborts the whole operation
    assert!(matches!(
        auxiliary.progress_inbox(msg_hash, &secret),
        Err(RegistryError::Accounting(_))
    ));
    assert_eq!(auxiliary.inbox_status(&msg_hash), MessageStatus::Confirmed);

    drop(auxiliary);
    accounting.refuse = false;

    let mut auxiliary = Endpoint::new(TokenAmount::new(BOUNTY), &mut accounting);
    auxiliary.set_state_root(height, origin_published.state_root());
    auxiliary
        .confirm(intent, Nonce::ZERO, &proof, height)
        .unwrap();
    auxiliary.progress_inbox(msg_hash, &secret).unwrap();

    drop(auxiliary);
    // exactly one credit, with the declared recipient and amount
    assert_eq!(accounting.credits, vec![(recipient, TokenAmount::new(1_000))]);
}
