//! Write-facade behavior against a canned transport: local validation,
//! value attachment, revert classification, and the per-entity in-flight
//! guard.

use std::borrow::Cow;

use alloy::primitives::Address;
use alloy_sol_types::SolValue;
use relief_client::env::mutate::{
    DisasterRequestForm, MutateError, ProposalForm, REQUEST_STAKE,
};
use relief_client::env::Relief;
use relief_client::{Client, ReliefMutate, RevertReason};
use relief_primitives::vote::VoteRecord;
use tokio_test::{assert_pending, task};

use common::mocks::{sample_receipt, MockTransport};

mod common;

const CONTRACT: &str = "0x64C48E92C70a85e9B2AeD8AA4B4E9bABab2979b8";

fn facade(client: &Client<MockTransport>) -> ReliefMutate<'_, MockTransport> {
    client.mutate::<Relief>(
        Cow::Borrowed("ethereum"),
        Cow::Borrowed("sepolia"),
        Cow::Borrowed(CONTRACT),
    )
}

fn request_form() -> DisasterRequestForm {
    DisasterRequestForm {
        title: "Earthquake".to_owned(),
        description: "northern region".to_owned(),
        photo_cid: "QmQuake".to_owned(),
        residual_address: Address::repeat_byte(0x44),
    }
}

fn proposal_form() -> ProposalForm {
    ProposalForm {
        disaster_id: 3,
        title: "Rebuild".to_owned(),
        amount: "0.5".to_owned(),
        description: "materials".to_owned(),
        photo_cid: "QmPreview".to_owned(),
        proof_cid: "QmEvidence".to_owned(),
    }
}

#[tokio::test]
async fn test_disaster_request_attaches_the_fixed_stake() {
    let transport = MockTransport::default();
    transport.queue_receipt(sample_receipt());

    let client = Client::new(transport.clone());
    let receipt = facade(&client)
        .submit_disaster_request(request_form())
        .await
        .unwrap();

    assert_eq!(receipt.transaction_hash, "0x8f1d");

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "addRequest(string,string,string,address)");
    assert_eq!(calls[0].value, Some(REQUEST_STAKE), "the stake rides in the value field");
}

#[tokio::test]
async fn test_blank_fields_are_refused_before_the_network() {
    let transport = MockTransport::default();
    let client = Client::new(transport.clone());

    let mut form = request_form();
    form.title = "   ".to_owned();

    let err = facade(&client).submit_disaster_request(form).await.unwrap_err();
    assert!(matches!(err, MutateError::MissingField("title")));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_proposal_amount_must_parse_to_at_least_one_wei() {
    let transport = MockTransport::default();
    let client = Client::new(transport.clone());

    for amount in ["0", "-1", "abc"] {
        let mut form = proposal_form();
        form.amount = amount.to_owned();

        let err = facade(&client).submit_proposal(form).await.unwrap_err();
        assert!(
            matches!(err, MutateError::TooSmallAmount),
            "`{amount}` must be refused locally"
        );
    }

    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_donate_rejects_nonpositive_amounts_locally() {
    let transport = MockTransport::default();
    let client = Client::new(transport.clone());

    for amount in ["0", "0.0", "-1"] {
        let err = facade(&client).donate(3, amount).await.unwrap_err();
        assert!(matches!(err, MutateError::TooSmallAmount), "`{amount}`");
    }

    assert!(transport.calls().is_empty(), "invalid amounts never reach the network");
}

#[tokio::test]
async fn test_donate_attaches_the_value_and_reports_the_gas_fee() {
    let transport = MockTransport::default();
    transport.queue_receipt(sample_receipt());

    let client = Client::new(transport.clone());
    let receipt = facade(&client).donate(3, "1").await.unwrap();

    assert_eq!(receipt.tx_hash, "0x8f1d");
    // 21_000 gas at 2 gwei.
    assert_eq!(receipt.gas_fee, "0.000042");

    let calls = transport.calls();
    assert_eq!(calls[0].method, "donate(uint256)");
    assert_eq!(calls[0].value, Some(1_000_000_000_000_000_000));
}

#[tokio::test]
async fn test_vote_proposal_returns_the_confirmed_record() {
    let transport = MockTransport::default();
    transport.queue_receipt(sample_receipt());
    transport.queue_query("proposalHasVoted(uint256,address)", true.abi_encode());
    transport.queue_query("proposalVoteType(uint256,address)", true.abi_encode());

    let client = Client::new(transport.clone());
    let record = facade(&client)
        .vote_proposal(7, true, Address::repeat_byte(0x55))
        .await
        .unwrap();

    assert_eq!(record, VoteRecord::cast(true), "the record comes from a re-read, not a guess");
    assert_eq!(transport.mutation_count(), 1);
}

#[tokio::test]
async fn test_vote_request_refuses_a_duplicate_before_submitting() {
    let transport = MockTransport::default();
    transport.queue_query("requestHasVoted(uint256,address)", true.abi_encode());
    transport.queue_query("requestVoteType(uint256,address)", true.abi_encode());

    let client = Client::new(transport.clone());
    let err = facade(&client)
        .vote_request(9, false, Address::repeat_byte(0x55))
        .await
        .unwrap_err();

    assert!(matches!(err, MutateError::AlreadyVoted));
    assert_eq!(transport.mutation_count(), 0, "the duplicate never becomes a transaction");
}

#[tokio::test]
async fn test_vote_request_submits_when_no_vote_is_on_record() {
    let transport = MockTransport::default();
    transport.queue_query("requestHasVoted(uint256,address)", false.abi_encode());
    transport.queue_receipt(sample_receipt());
    transport.queue_query("requestHasVoted(uint256,address)", true.abi_encode());
    transport.queue_query("requestVoteType(uint256,address)", true.abi_encode());

    let client = Client::new(transport.clone());
    let record = facade(&client)
        .vote_request(9, true, Address::repeat_byte(0x55))
        .await
        .unwrap();

    assert_eq!(record, VoteRecord::cast(true));
    assert_eq!(transport.mutation_count(), 1);
}

#[tokio::test]
async fn test_concurrent_votes_for_the_same_proposal_are_refused_locally() {
    let transport = MockTransport::default();
    transport.hold_mutations();

    let client = Client::new(transport.clone());
    let mutate = facade(&client);
    let voter = Address::repeat_byte(0x55);

    let mut first = task::spawn(mutate.vote_proposal(7, true, voter));
    assert_pending!(first.poll(), "the first vote parks at the transport");

    let second = mutate.vote_proposal(7, false, voter).await;
    assert!(
        matches!(second, Err(MutateError::AlreadyInFlight(_))),
        "the duplicate is refused while the first is unconfirmed"
    );
    assert_eq!(transport.mutation_count(), 1, "only the first vote reached the network");

    transport.queue_receipt(sample_receipt());
    transport.queue_query("proposalHasVoted(uint256,address)", true.abi_encode());
    transport.queue_query("proposalVoteType(uint256,address)", true.abi_encode());
    transport.release_mutations();

    let record = first.await.unwrap();
    assert_eq!(record, VoteRecord::cast(true));

    // The slot cleared on settle, so a later mutation for the same
    // proposal goes through.
    transport.queue_receipt(sample_receipt());
    let settled = mutate.finalize_proposal(7).await;
    assert!(settled.is_ok(), "the slot must clear once the vote settles");
}

#[tokio::test]
async fn test_finalize_classifies_the_contract_verdict() {
    let transport = MockTransport::default();
    transport.queue_revert("Already approved");

    let client = Client::new(transport.clone());
    let err = facade(&client).finalize_proposal(7).await.unwrap_err();

    assert!(
        matches!(err, MutateError::Rejected(RevertReason::AlreadyApproved)),
        "got: {err}"
    );
    assert_eq!(transport.mutation_count(), 1, "a revert settles the attempt, no retry");
}

#[tokio::test]
async fn test_underfunded_account_rejection_lands_in_the_taxonomy() {
    // The node refuses an underfunded write before execution; the message
    // classifies with the contract's own insufficient-funds rejection.
    let transport = MockTransport::default();
    transport.queue_revert("insufficient funds for gas * price + value");

    let client = Client::new(transport.clone());
    let err = facade(&client).donate(3, "1").await.unwrap_err();

    assert!(
        matches!(err, MutateError::Rejected(RevertReason::InsufficientFunds)),
        "got: {err}"
    );
}

#[tokio::test]
async fn test_unknown_revert_reasons_are_carried_verbatim() {
    let transport = MockTransport::default();
    transport.queue_revert("Paused by governance");

    let client = Client::new(transport.clone());
    let err = facade(&client).pay_out(3).await.unwrap_err();

    assert!(
        matches!(
            &err,
            MutateError::Rejected(RevertReason::ContractRejected(raw))
                if raw == "Paused by governance"
        ),
        "got: {err}"
    );
}
