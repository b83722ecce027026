use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which slice of a disaster's proposals a listing should return.
///
/// `Votable` and `Voted` are computed relative to a caller's vote history
/// and therefore need an authenticated address.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ProposalFilter {
    All,
    Ongoing,
    Votable,
    Voted,
}

impl fmt::Display for ProposalFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.pad("All"),
            Self::Ongoing => f.pad("Ongoing"),
            Self::Votable => f.pad("Votable"),
            Self::Voted => f.pad("Voted"),
        }
    }
}

#[derive(Clone, Copy, Debug, Error)]
#[error("invalid proposal filter")]
pub struct InvalidProposalFilter(());

impl FromStr for ProposalFilter {
    type Err = InvalidProposalFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(Self::All),
            "Ongoing" => Ok(Self::Ongoing),
            "Votable" => Ok(Self::Votable),
            "Voted" => Ok(Self::Voted),
            _ => Err(InvalidProposalFilter(())),
        }
    }
}

/// A funding request against an existing disaster's pool.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub proposal_id: u64,
    pub disaster_id: u64,
    pub title: String,
    pub photo_cid: String,
    pub description: String,
    /// CID of the supporting evidence document.
    pub proof_cid: String,
    /// Requested amount, ETH decimal string.
    pub amount: String,
    pub proposer_address: String,
    pub approved: bool,
    pub approve_votes: u64,
    pub reject_votes: u64,
    /// Unix seconds.
    pub due_date: u64,
}

/// List projection of a proposal, as rendered on listing cards.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSummary {
    pub proposal_id: u64,
    pub title: String,
    pub photo_cid: String,
    pub description: String,
    pub amount: String,
    pub proposer_address: String,
    pub due_date: u64,
}

impl From<Proposal> for ProposalSummary {
    fn from(proposal: Proposal) -> Self {
        Self {
            proposal_id: proposal.proposal_id,
            title: proposal.title,
            photo_cid: proposal.photo_cid,
            description: proposal.description,
            amount: proposal.amount,
            proposer_address: proposal.proposer_address,
            due_date: proposal.due_date,
        }
    }
}

/// Full proposal joined with its parent disaster's name and vote weight.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDetail {
    #[serde(flatten)]
    pub proposal: Proposal,
    pub disaster_name: String,
    /// Total voting weight of the parent disaster's donor pool.
    pub disaster_total_votes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_round_trips_through_display() {
        for filter in [
            ProposalFilter::All,
            ProposalFilter::Ongoing,
            ProposalFilter::Votable,
            ProposalFilter::Voted,
        ] {
            let parsed: ProposalFilter = filter.to_string().parse().unwrap();
            assert_eq!(parsed, filter, "filter should survive a display cycle");
        }
    }

    #[test]
    fn test_summary_projection_keeps_card_fields() {
        let proposal = Proposal {
            proposal_id: 7,
            disaster_id: 3,
            title: "Rebuild the bridge".to_owned(),
            photo_cid: "QmPreview".to_owned(),
            description: "materials and labour".to_owned(),
            proof_cid: "QmEvidence".to_owned(),
            amount: "2.5".to_owned(),
            proposer_address: "0x0000000000000000000000000000000000000002".to_owned(),
            approved: false,
            approve_votes: 1,
            reject_votes: 0,
            due_date: 1_700_000_000,
        };

        let summary = ProposalSummary::from(proposal.clone());
        assert_eq!(summary.proposal_id, proposal.proposal_id, "id must carry over");
        assert_eq!(summary.amount, "2.5", "amount stays a decimal string");
    }

    #[test]
    fn test_detail_flattens_proposal_fields() {
        let proposal = Proposal {
            proposal_id: 7,
            disaster_id: 3,
            title: "Rebuild the bridge".to_owned(),
            photo_cid: "QmPreview".to_owned(),
            description: "materials and labour".to_owned(),
            proof_cid: "QmEvidence".to_owned(),
            amount: "2.5".to_owned(),
            proposer_address: "0x0000000000000000000000000000000000000002".to_owned(),
            approved: false,
            approve_votes: 1,
            reject_votes: 0,
            due_date: 1_700_000_000,
        };
        let detail = ProposalDetail {
            proposal,
            disaster_name: "Flood".to_owned(),
            disaster_total_votes: 42,
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["proposalId"], 7, "proposal fields flatten to the top level");
        assert_eq!(json["disasterName"], "Flood");
    }
}
