use alloy::primitives::Address;
use futures_util::future::{join_all, try_join_all};
use relief_primitives::disaster::{Disaster, DisasterInfo, DisasterStatus, VotableRequest};
use relief_primitives::donation::{Donation, DonationSummary};
use relief_primitives::proposal::{ProposalDetail, ProposalFilter, ProposalSummary};
use relief_primitives::units::format_ether;
use relief_primitives::vote::VoteRecord;
use thiserror::Error;
use tracing::warn;

use admin::{AdminRequest, VotableRequestsRequest};
use disasters::{
    DisasterByIdRequest, DisasterListRequest, DueDisastersRequest, OngoingDisastersRequest,
    VotableDisasterIdsRequest,
};
use donations::{DonatorsRequest, MyDonationsRequest};
use proposals::{
    OngoingProposalIdsRequest, ProposalByIdRequest, ProposalListRequest,
    UnvotedProposalIdsRequest, VotedProposalIdsRequest,
};
use votes::{
    ProposalHasVotedRequest, ProposalVoteTypeRequest, RequestHasVotedRequest,
    RequestVoteTypeRequest,
};

use crate::client::{CallClient, ClientError};
use crate::env::utils;
use crate::transport::{Transport, TransportError};

mod admin;
mod disasters;
mod donations;
mod proposals;
mod votes;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueryError<T: Transport> {
    #[error("this listing requires a caller address")]
    MissingCaller,
    #[error("caller is not an admin")]
    NotAdmin,
    #[error("record not found")]
    NotFound,
    #[error("donation ledger arrays disagree: {donators} donators, {amounts} amounts")]
    DonationLedgerMismatch { donators: usize, amounts: usize },
    #[error(transparent)]
    Client(#[from] ClientError<T>),
}

fn codec<T: Transport>(err: eyre::Report) -> QueryError<T> {
    QueryError::Client(ClientError::Codec(err))
}

/// True when the failure is the contract refusing the read, which for a
/// keyed lookup means the record does not exist.
fn reverted<T: Transport>(err: &ClientError<T>) -> bool {
    matches!(err, ClientError::Transport(e) if e.is_revert())
}

/// Read side of the relief contract.
///
/// Results are snapshots of remote state: stale after any confirmed
/// mutation, refreshed only by calling again. Listing order is the
/// contract's return order, never re-sorted here.
#[derive(Debug)]
pub struct ReliefQuery<'a, T> {
    pub client: CallClient<'a, T>,
}

impl<T: Transport> ReliefQuery<'_, T> {
    /// Disasters listed under `status`.
    ///
    /// `Votable` is caller-scoped: the contract returns ids eligible for
    /// the caller's review, each resolved by a secondary lookup.
    pub async fn disasters(
        &self,
        status: DisasterStatus,
        caller: Option<Address>,
    ) -> Result<Vec<Disaster>, QueryError<T>> {
        match status {
            DisasterStatus::Active => {
                let raw = utils::send_query(&self.client, OngoingDisastersRequest).await?;
                raw.into_iter()
                    .map(|d| d.into_view(DisasterStatus::Active))
                    .collect::<eyre::Result<_>>()
                    .map_err(codec)
            }
            DisasterStatus::Expired => {
                let raw = utils::send_query(&self.client, DueDisastersRequest).await?;
                raw.into_iter()
                    .map(|d| d.into_view(DisasterStatus::Expired))
                    .collect::<eyre::Result<_>>()
                    .map_err(codec)
            }
            DisasterStatus::Votable => {
                let caller = caller.ok_or(QueryError::MissingCaller)?;

                let ids =
                    utils::send_query(&self.client, VotableDisasterIdsRequest { caller }).await?;

                let lookups = ids
                    .into_iter()
                    .map(|id| utils::send_query(&self.client, DisasterByIdRequest { id }));

                try_join_all(lookups)
                    .await?
                    .into_iter()
                    .map(|d| d.into_view(DisasterStatus::Votable))
                    .collect::<eyre::Result<_>>()
                    .map_err(codec)
            }
        }
    }

    /// Summary listing of every disaster, for selection dropdowns.
    pub async fn disaster_list(&self) -> Result<Vec<DisasterInfo>, QueryError<T>> {
        utils::send_query(&self.client, DisasterListRequest)
            .await
            .map_err(Into::into)
    }

    /// Proposals of `disaster_id` under `filter`.
    ///
    /// `All` comes back in one round trip; the other filters return id
    /// lists resolved one lookup per id, input order preserved. Zero
    /// matching ids is an empty listing, not an error.
    pub async fn proposals(
        &self,
        disaster_id: u64,
        filter: ProposalFilter,
        caller: Option<Address>,
    ) -> Result<Vec<ProposalSummary>, QueryError<T>> {
        let ids = match filter {
            ProposalFilter::All => {
                let proposals =
                    utils::send_query(&self.client, ProposalListRequest { disaster_id }).await?;
                return Ok(proposals.into_iter().map(Into::into).collect());
            }
            ProposalFilter::Ongoing => {
                utils::send_query(&self.client, OngoingProposalIdsRequest { disaster_id }).await?
            }
            ProposalFilter::Votable => {
                let caller = caller.ok_or(QueryError::MissingCaller)?;
                utils::send_query(
                    &self.client,
                    UnvotedProposalIdsRequest {
                        disaster_id,
                        caller,
                    },
                )
                .await?
            }
            ProposalFilter::Voted => {
                let caller = caller.ok_or(QueryError::MissingCaller)?;
                utils::send_query(
                    &self.client,
                    VotedProposalIdsRequest {
                        disaster_id,
                        caller,
                    },
                )
                .await?
            }
        };

        if ids.is_empty() {
            return Ok(vec![]);
        }

        let lookups = ids
            .into_iter()
            .map(|id| utils::send_query(&self.client, ProposalByIdRequest { id }));

        Ok(try_join_all(lookups)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Full proposal joined with its parent disaster's header fields.
    pub async fn proposal_detail(&self, proposal_id: u64) -> Result<ProposalDetail, QueryError<T>> {
        let proposal = utils::send_query(&self.client, ProposalByIdRequest { id: proposal_id })
            .await
            .map_err(|e| {
                if reverted(&e) {
                    QueryError::NotFound
                } else {
                    e.into()
                }
            })?;

        let disaster = utils::send_query(
            &self.client,
            DisasterByIdRequest {
                id: proposal.disaster_id,
            },
        )
        .await
        .map_err(|e| {
            if reverted(&e) {
                QueryError::NotFound
            } else {
                e.into()
            }
        })?;

        let disaster = disaster.into_info().map_err(codec)?;

        Ok(ProposalDetail {
            proposal,
            disaster_name: disaster.name,
            disaster_total_votes: disaster.total_votes,
        })
    }

    /// The caller's standing on a proposal. Fails closed: any read fault
    /// is reported as "not voted", since the record only gates UI
    /// affordances, never fund movement.
    pub async fn proposal_vote_record(&self, proposal_id: u64, voter: Address) -> VoteRecord {
        proposal_vote_record(&self.client, proposal_id, voter).await
    }

    /// As [`Self::proposal_vote_record`], for disaster requests.
    pub async fn request_vote_record(&self, request_id: u64, voter: Address) -> VoteRecord {
        request_vote_record(&self.client, request_id, voter).await
    }

    /// Donation ledger of a disaster, zipped from the contract's parallel
    /// arrays. A length mismatch is a data-integrity fault, surfaced
    /// rather than truncated.
    pub async fn donations(&self, disaster_id: u64) -> Result<Vec<Donation>, QueryError<T>> {
        let (donators, amounts) =
            utils::send_query(&self.client, DonatorsRequest { disaster_id }).await?;

        if donators.len() != amounts.len() {
            return Err(QueryError::DonationLedgerMismatch {
                donators: donators.len(),
                amounts: amounts.len(),
            });
        }

        Ok(donators
            .into_iter()
            .zip(amounts)
            .map(|(donator, amount)| Donation {
                donator,
                amount: format_ether(amount),
            })
            .collect())
    }

    /// The caller's donation aggregates across every disaster they backed.
    pub async fn my_donations(
        &self,
        donator: Address,
    ) -> Result<Vec<DonationSummary>, QueryError<T>> {
        utils::send_query(&self.client, MyDonationsRequest { donator })
            .await
            .map_err(Into::into)
    }

    /// Whether `account` holds the admin role.
    pub async fn is_admin(&self, account: Address) -> Result<bool, QueryError<T>> {
        utils::send_query(&self.client, AdminRequest { account })
            .await
            .map_err(Into::into)
    }

    /// Pending disaster requests for admin review, each joined with the
    /// reviewer's own vote record. Requires the admin role; this is a
    /// deliberately different eligibility predicate from proposal
    /// votability, which is vote-history-scoped.
    pub async fn votable_requests(
        &self,
        caller: Address,
    ) -> Result<Vec<VotableRequest>, QueryError<T>> {
        if !self.is_admin(caller).await? {
            return Err(QueryError::NotAdmin);
        }

        let requests = utils::send_query(&self.client, VotableRequestsRequest { caller }).await?;

        let votes = join_all(
            requests
                .iter()
                .map(|request| request_vote_record(&self.client, request.id, caller)),
        )
        .await;

        Ok(requests
            .into_iter()
            .zip(votes)
            .map(|(request, vote)| VotableRequest { request, vote })
            .collect())
    }
}

pub(crate) async fn proposal_vote_record<T: Transport>(
    client: &CallClient<'_, T>,
    proposal_id: u64,
    voter: Address,
) -> VoteRecord {
    let voted = match utils::send_query(
        client,
        ProposalHasVotedRequest {
            id: proposal_id,
            voter,
        },
    )
    .await
    {
        Ok(voted) => voted,
        Err(err) => {
            warn!(proposal_id, %err, "vote record lookup failed, treating as not voted");
            return VoteRecord::not_voted();
        }
    };

    if !voted {
        return VoteRecord::not_voted();
    }

    match utils::send_query(
        client,
        ProposalVoteTypeRequest {
            id: proposal_id,
            voter,
        },
    )
    .await
    {
        Ok(approve) => VoteRecord::cast(approve),
        Err(err) => {
            warn!(proposal_id, %err, "vote type lookup failed, treating as not voted");
            VoteRecord::not_voted()
        }
    }
}

pub(crate) async fn request_vote_record<T: Transport>(
    client: &CallClient<'_, T>,
    request_id: u64,
    voter: Address,
) -> VoteRecord {
    let voted = match utils::send_query(
        client,
        RequestHasVotedRequest {
            id: request_id,
            voter,
        },
    )
    .await
    {
        Ok(voted) => voted,
        Err(err) => {
            warn!(request_id, %err, "vote record lookup failed, treating as not voted");
            return VoteRecord::not_voted();
        }
    };

    if !voted {
        return VoteRecord::not_voted();
    }

    match utils::send_query(
        client,
        RequestVoteTypeRequest {
            id: request_id,
            voter,
        },
    )
    .await
    {
        Ok(approve) => VoteRecord::cast(approve),
        Err(err) => {
            warn!(request_id, %err, "vote type lookup failed, treating as not voted");
            VoteRecord::not_voted()
        }
    }
}
