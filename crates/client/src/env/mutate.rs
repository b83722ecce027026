use alloy::primitives::Address;
use relief_primitives::donation::DonationReceipt;
use relief_primitives::units::{format_ether, parse_positive_ether};
use relief_primitives::vote::VoteRecord;
use thiserror::Error;
use tracing::info;

use methods::{
    AddRequest, Donate, FinalizeDisaster, FinalizeProposal, PayOut, SubmitProposal, VoteProposal,
    VoteRequest,
};

use crate::client::{CallClient, ClientError};
use crate::env::{query, utils};
use crate::guard::MutationTarget;
use crate::revert::RevertReason;
use crate::transport::{Transport, TransportError, TxReceipt};

mod methods;

/// Stake attached to every disaster request, in wei (0.01 ETH).
pub const REQUEST_STAKE: u128 = 10_000_000_000_000_000;

/// Input for `addRequest`; the photo must already be pinned.
#[derive(Clone, Debug)]
pub struct DisasterRequestForm {
    pub title: String,
    pub description: String,
    pub photo_cid: String,
    pub residual_address: Address,
}

/// Input for `submitProposal`; both CIDs must already be pinned.
///
/// `amount` is an ETH decimal string; presence and wei-parseability are
/// the only local checks, bounds belong to the contract.
#[derive(Clone, Debug)]
pub struct ProposalForm {
    pub disaster_id: u64,
    pub title: String,
    pub amount: String,
    pub description: String,
    pub photo_cid: String,
    pub proof_cid: String,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MutateError<T: Transport> {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("amount must be a decimal number of at least 1 wei")]
    TooSmallAmount,
    #[error("a mutation for this entity is already in flight")]
    AlreadyInFlight(MutationTarget),
    #[error("a vote for this entity is already on record")]
    AlreadyVoted,
    #[error("contract rejected the call: {0}")]
    Rejected(RevertReason),
    #[error(transparent)]
    Client(ClientError<T>),
}

impl<T: Transport> From<ClientError<T>> for MutateError<T> {
    fn from(err: ClientError<T>) -> Self {
        if let ClientError::Transport(transport_err) = &err {
            if let Some(reason) = transport_err.revert_reason() {
                return Self::Rejected(RevertReason::classify(reason));
            }
        }

        Self::Client(err)
    }
}

fn required<T: Transport>(value: &str, field: &'static str) -> Result<(), MutateError<T>> {
    if value.trim().is_empty() {
        return Err(MutateError::MissingField(field));
    }

    Ok(())
}

/// Write side of the relief contract.
///
/// Every operation wraps one transaction lifecycle: build, submit, await
/// one confirmation, map the receipt. A revert settles the attempt; no
/// operation retries on its own. Vote and finalize calls hold a per-entity
/// in-flight slot from build to settle, so a rapid duplicate for the same
/// entity is refused locally without a second submission.
#[derive(Debug)]
pub struct ReliefMutate<'a, T> {
    pub client: CallClient<'a, T>,
}

impl<T: Transport> ReliefMutate<'_, T> {
    /// Stakes [`REQUEST_STAKE`] and submits a new disaster request.
    pub async fn submit_disaster_request(
        &self,
        form: DisasterRequestForm,
    ) -> Result<TxReceipt, MutateError<T>> {
        required(&form.title, "title")?;
        required(&form.description, "description")?;
        required(&form.photo_cid, "photo_cid")?;

        let receipt = utils::send_mutate(
            &self.client,
            AddRequest {
                title: form.title,
                photo_cid: form.photo_cid,
                description: form.description,
                residual_address: form.residual_address,
            },
            REQUEST_STAKE,
        )
        .await?;

        info!(tx_hash = %receipt.transaction_hash, "disaster request submitted");
        Ok(receipt)
    }

    /// Submits a funding proposal against a disaster's pool.
    pub async fn submit_proposal(&self, form: ProposalForm) -> Result<TxReceipt, MutateError<T>> {
        required(&form.title, "title")?;
        required(&form.description, "description")?;
        required(&form.photo_cid, "photo_cid")?;
        required(&form.proof_cid, "proof_cid")?;
        required(&form.amount, "amount")?;

        let amount_wei =
            parse_positive_ether(&form.amount).map_err(|_| MutateError::TooSmallAmount)?;

        let receipt = utils::send_mutate(
            &self.client,
            SubmitProposal {
                disaster_id: form.disaster_id,
                title: form.title,
                amount_wei,
                description: form.description,
                photo_cid: form.photo_cid,
                proof_cid: form.proof_cid,
            },
            0,
        )
        .await?;

        info!(form.disaster_id, tx_hash = %receipt.transaction_hash, "proposal submitted");
        Ok(receipt)
    }

    /// Casts the voter's verdict on a proposal, then re-fetches the vote
    /// record so the caller sees the confirmed terminal state rather than
    /// its own optimistic guess.
    pub async fn vote_proposal(
        &self,
        proposal_id: u64,
        approve: bool,
        voter: Address,
    ) -> Result<VoteRecord, MutateError<T>> {
        let target = MutationTarget::Proposal(proposal_id);
        let _permit = self
            .client
            .guard
            .acquire(target)
            .ok_or(MutateError::AlreadyInFlight(target))?;

        let receipt = utils::send_mutate(
            &self.client,
            VoteProposal {
                proposal_id,
                approve,
            },
            0,
        )
        .await?;

        info!(proposal_id, approve, tx_hash = %receipt.transaction_hash, "proposal vote confirmed");
        Ok(query::proposal_vote_record(&self.client, proposal_id, voter).await)
    }

    /// Casts an admin's verdict on a disaster request.
    ///
    /// The reviewer's own record is pre-checked and a duplicate vote is
    /// refused before anything is submitted; the contract enforces the
    /// same rule as the backstop.
    pub async fn vote_request(
        &self,
        request_id: u64,
        approve: bool,
        voter: Address,
    ) -> Result<VoteRecord, MutateError<T>> {
        let target = MutationTarget::Request(request_id);
        let _permit = self
            .client
            .guard
            .acquire(target)
            .ok_or(MutateError::AlreadyInFlight(target))?;

        let existing = query::request_vote_record(&self.client, request_id, voter).await;
        if existing.voted {
            return Err(MutateError::AlreadyVoted);
        }

        let receipt = utils::send_mutate(
            &self.client,
            VoteRequest {
                request_id,
                approve,
            },
            0,
        )
        .await?;

        info!(request_id, approve, tx_hash = %receipt.transaction_hash, "request vote confirmed");
        Ok(query::request_vote_record(&self.client, request_id, voter).await)
    }

    /// Settles a proposal vote: pays out or rejects per the contract's
    /// threshold rules. Never retried after a revert.
    pub async fn finalize_proposal(&self, proposal_id: u64) -> Result<TxReceipt, MutateError<T>> {
        let target = MutationTarget::Proposal(proposal_id);
        let _permit = self
            .client
            .guard
            .acquire(target)
            .ok_or(MutateError::AlreadyInFlight(target))?;

        let receipt = utils::send_mutate(&self.client, FinalizeProposal { proposal_id }, 0).await?;

        info!(proposal_id, tx_hash = %receipt.transaction_hash, "proposal finalized");
        Ok(receipt)
    }

    /// Settles a disaster request: activates the disaster or rejects the
    /// request per the contract's rules.
    pub async fn finalize_request(&self, request_id: u64) -> Result<TxReceipt, MutateError<T>> {
        let target = MutationTarget::Request(request_id);
        let _permit = self
            .client
            .guard
            .acquire(target)
            .ok_or(MutateError::AlreadyInFlight(target))?;

        let receipt = utils::send_mutate(&self.client, FinalizeDisaster { request_id }, 0).await?;

        info!(request_id, tx_hash = %receipt.transaction_hash, "disaster request finalized");
        Ok(receipt)
    }

    /// Donates `amount` (ETH decimal string) to a disaster's pool.
    ///
    /// The amount must parse to at least 1 wei before anything goes out;
    /// the receipt reports the gas fee actually paid.
    pub async fn donate(
        &self,
        disaster_id: u64,
        amount: &str,
    ) -> Result<DonationReceipt, MutateError<T>> {
        let value = parse_positive_ether(amount).map_err(|_| MutateError::TooSmallAmount)?;

        let receipt = utils::send_mutate(&self.client, Donate { disaster_id }, value).await?;

        info!(disaster_id, tx_hash = %receipt.transaction_hash, "donation confirmed");
        Ok(DonationReceipt {
            gas_fee: format_ether(receipt.gas_fee()),
            tx_hash: receipt.transaction_hash,
        })
    }

    /// Releases a disaster's residual funds to its payout address.
    pub async fn pay_out(&self, disaster_id: u64) -> Result<TxReceipt, MutateError<T>> {
        let target = MutationTarget::Disaster(disaster_id);
        let _permit = self
            .client
            .guard
            .acquire(target)
            .ok_or(MutateError::AlreadyInFlight(target))?;

        let receipt = utils::send_mutate(&self.client, PayOut { disaster_id }, 0).await?;

        info!(disaster_id, tx_hash = %receipt.transaction_hash, "residual funds paid out");
        Ok(receipt)
    }
}
