use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vote::VoteRecord;

/// Lifecycle window a disaster is listed under.
///
/// The window is not stored on-chain as a field; it follows from the
/// contract-side due-date and finalization state, and is stamped onto the
/// record according to which listing returned it.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum DisasterStatus {
    /// Accepting donations and proposals.
    Active,
    /// Past its due date.
    Expired,
    /// Pending admin review before activation.
    Votable,
}

impl fmt::Display for DisasterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.pad("Active"),
            Self::Expired => f.pad("Expired"),
            Self::Votable => f.pad("Votable"),
        }
    }
}

#[derive(Clone, Copy, Debug, Error)]
#[error("invalid disaster status")]
pub struct InvalidDisasterStatus(());

impl FromStr for DisasterStatus {
    type Err = InvalidDisasterStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Expired" => Ok(Self::Expired),
            "Votable" => Ok(Self::Votable),
            _ => Err(InvalidDisasterStatus(())),
        }
    }
}

/// An approved, running fundraising campaign.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disaster {
    pub id: u64,
    pub name: String,
    pub photo_cid: String,
    /// Payout address receiving residual funds, checksummed hex.
    pub residual_address: String,
    /// Remaining pool balance, ETH decimal string.
    pub balance: String,
    /// Unix seconds.
    pub due_date: u64,
    pub total_votes: u64,
    pub status: DisasterStatus,
}

/// Header projection used by id lookups and selection listings.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterInfo {
    pub id: u64,
    pub name: String,
    pub photo_cid: String,
    pub total_votes: u64,
}

/// A staked submission proposing a new disaster, pending admin vote.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterRequest {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub photo_cid: String,
    pub proposer: String,
    pub residual_address: String,
    /// Unix seconds.
    pub voting_deadline: u64,
    pub approve_votes: u64,
    pub reject_votes: u64,
    pub ended: bool,
}

/// Admin review entry: a pending request joined with the reviewer's own
/// vote record.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VotableRequest {
    #[serde(flatten)]
    pub request: DisasterRequest,
    pub vote: VoteRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_display() {
        for status in [
            DisasterStatus::Active,
            DisasterStatus::Expired,
            DisasterStatus::Votable,
        ] {
            let parsed: DisasterStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status, "status should survive a display cycle");
        }
    }

    #[test]
    fn test_status_rejects_unknown_names() {
        assert!("Ongoing".parse::<DisasterStatus>().is_err());
        assert!("active".parse::<DisasterStatus>().is_err());
    }

    #[test]
    fn test_disaster_serializes_camel_case() {
        let disaster = Disaster {
            id: 3,
            name: "Flood".to_owned(),
            photo_cid: "QmPhoto".to_owned(),
            residual_address: "0x0000000000000000000000000000000000000001".to_owned(),
            balance: "1.5".to_owned(),
            due_date: 1_700_000_000,
            total_votes: 42,
            status: DisasterStatus::Active,
        };

        let json = serde_json::to_value(&disaster).unwrap();
        assert_eq!(json["photoCid"], "QmPhoto", "field names should be camelCase");
        assert_eq!(json["residualAddress"].as_str().unwrap().len(), 42, "address kept verbatim");
    }
}
