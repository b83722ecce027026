//! ABI mirror structs fixing the contract's positional tuple layouts.
//!
//! Field order here is the one true wire format of the system: every record
//! the contract returns is a positional tuple, and these declarations pin
//! each name to its index. Conversions into the view models are fallible;
//! a count or timestamp that does not fit `u64` is a decode error, never a
//! silent truncation.

use alloy::primitives::U256;
use alloy_sol_types::sol;
use eyre::{eyre, Result};
use relief_primitives::disaster::{Disaster, DisasterInfo, DisasterRequest, DisasterStatus};
use relief_primitives::donation::DonationSummary;
use relief_primitives::proposal::Proposal;
use relief_primitives::units::format_ether;

sol! {
    /// `disasters(uint256)` record, also the element of the
    /// `getOngoingDisaster` / `getDueDisaster` / `getDisasterList` arrays.
    #[derive(Debug)]
    struct SolDisaster {
        uint256 id;              // [0]
        string name;             // [1]
        string photoCid;         // [2]
        address residualAddress; // [3]
        uint256 balance;         // [4] wei
        uint256 dueDate;         // [5] unix seconds
        uint256 totalVotes;      // [6]
    }

    /// `proposals(uint256)` record, also the element of the
    /// `getProposalList` array.
    #[derive(Debug)]
    struct SolProposal {
        uint256 proposalId;   // [0]
        uint256 disasterId;   // [1]
        string title;         // [2]
        string photoCid;      // [3]
        string description;   // [4]
        string proofCid;      // [5]
        uint256 amount;       // [6] wei
        address proposer;     // [7]
        bool approved;        // [8]
        uint256 approveVotes; // [9]
        uint256 rejectVotes;  // [10]
        uint256 dueDate;      // [11] unix seconds
    }

    /// Element of the `getVotableRequests(address)` array.
    #[derive(Debug)]
    struct SolDisasterRequest {
        uint256 id;              // [0]
        string title;            // [1]
        string description;      // [2]
        string photoCid;         // [3]
        address proposer;        // [4]
        address residualAddress; // [5]
        uint256 votingDeadline;  // [6] unix seconds
        uint256 approveVotes;    // [7]
        uint256 rejectVotes;     // [8]
        bool ended;              // [9]
    }

    /// Element of the `getMyDonations(address)` array.
    #[derive(Debug)]
    struct SolDonationSummary {
        uint256 disasterId;    // [0]
        string name;           // [1]
        address donateAddress; // [2]
        string photoCid;       // [3]
        uint256 totalAmount;   // [4] wei
        uint256 votingPower;   // [5] wei-scaled weight
    }
}

/// Coerces a count or timestamp that is guaranteed to fit the platform.
pub(crate) fn to_count(value: U256, field: &'static str) -> Result<u64> {
    u64::try_from(value).map_err(|_| eyre!("field `{field}` does not fit u64: {value}"))
}

/// Coerces a monetary field to wei; amounts stay strings downstream.
pub(crate) fn to_wei(value: U256, field: &'static str) -> Result<u128> {
    u128::try_from(value).map_err(|_| eyre!("field `{field}` does not fit the wei range: {value}"))
}

impl SolDisaster {
    /// Full view, stamped with the window the record was fetched from.
    pub(crate) fn into_view(self, status: DisasterStatus) -> Result<Disaster> {
        Ok(Disaster {
            id: to_count(self.id, "disaster.id")?,
            name: self.name,
            photo_cid: self.photoCid,
            residual_address: self.residualAddress.to_string(),
            balance: format_ether(to_wei(self.balance, "disaster.balance")?),
            due_date: to_count(self.dueDate, "disaster.dueDate")?,
            total_votes: to_count(self.totalVotes, "disaster.totalVotes")?,
            status,
        })
    }

    /// Header projection for id lookups and dropdown listings.
    pub(crate) fn into_info(self) -> Result<DisasterInfo> {
        Ok(DisasterInfo {
            id: to_count(self.id, "disaster.id")?,
            name: self.name,
            photo_cid: self.photoCid,
            total_votes: to_count(self.totalVotes, "disaster.totalVotes")?,
        })
    }
}

impl TryFrom<SolProposal> for Proposal {
    type Error = eyre::Report;

    fn try_from(sol: SolProposal) -> Result<Self> {
        Ok(Self {
            proposal_id: to_count(sol.proposalId, "proposal.proposalId")?,
            disaster_id: to_count(sol.disasterId, "proposal.disasterId")?,
            title: sol.title,
            photo_cid: sol.photoCid,
            description: sol.description,
            proof_cid: sol.proofCid,
            amount: format_ether(to_wei(sol.amount, "proposal.amount")?),
            proposer_address: sol.proposer.to_string(),
            approved: sol.approved,
            approve_votes: to_count(sol.approveVotes, "proposal.approveVotes")?,
            reject_votes: to_count(sol.rejectVotes, "proposal.rejectVotes")?,
            due_date: to_count(sol.dueDate, "proposal.dueDate")?,
        })
    }
}

impl TryFrom<SolDisasterRequest> for DisasterRequest {
    type Error = eyre::Report;

    fn try_from(sol: SolDisasterRequest) -> Result<Self> {
        Ok(Self {
            id: to_count(sol.id, "request.id")?,
            title: sol.title,
            description: sol.description,
            photo_cid: sol.photoCid,
            proposer: sol.proposer.to_string(),
            residual_address: sol.residualAddress.to_string(),
            voting_deadline: to_count(sol.votingDeadline, "request.votingDeadline")?,
            approve_votes: to_count(sol.approveVotes, "request.approveVotes")?,
            reject_votes: to_count(sol.rejectVotes, "request.rejectVotes")?,
            ended: sol.ended,
        })
    }
}

impl TryFrom<SolDonationSummary> for DonationSummary {
    type Error = eyre::Report;

    fn try_from(sol: SolDonationSummary) -> Result<Self> {
        Ok(Self {
            disaster_id: to_count(sol.disasterId, "donation.disasterId")?,
            name: sol.name,
            donation_address: sol.donateAddress.to_string(),
            photo_cid: sol.photoCid,
            total_amount: format_ether(to_wei(sol.totalAmount, "donation.totalAmount")?),
            voting_power: format_ether(to_wei(sol.votingPower, "donation.votingPower")?),
        })
    }
}
