use core::fmt;

/// Classified contract revert reasons.
///
/// The contract rejects with free-text reason strings; the table below maps
/// each known string to a stable category. Exact matches are tried first,
/// then a substring pass for the legacy contract's embellished variants.
/// Anything unrecognized is carried verbatim, never defaulted to a known
/// category.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum RevertReason {
    AlreadyVoted,
    VotingPeriodEnded,
    NoVotingPower,
    MustStake,
    InsufficientFunds,
    NotEnoughVotes,
    AlreadyApproved,
    AlreadyFinalized,
    OnlyAdmins,
    ContractRejected(String),
}

/// `(reason string, category)` as emitted by the deployed contract.
const KNOWN_REASONS: &[(&str, RevertReason)] = &[
    ("Already voted", RevertReason::AlreadyVoted),
    ("Voting period ended", RevertReason::VotingPeriodEnded),
    (
        "No voting power for this disaster",
        RevertReason::NoVotingPower,
    ),
    ("Must stake 0.01 ETH", RevertReason::MustStake),
    ("insufficient funds", RevertReason::InsufficientFunds),
    ("Insufficient funds", RevertReason::InsufficientFunds),
    ("Not enough votes", RevertReason::NotEnoughVotes),
    ("Already approved", RevertReason::AlreadyApproved),
    ("Already finalized", RevertReason::AlreadyFinalized),
    ("Only admins can finalize", RevertReason::OnlyAdmins),
    ("Only admins can vote", RevertReason::OnlyAdmins),
];

impl RevertReason {
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        for (known, reason) in KNOWN_REASONS {
            if raw == *known {
                return reason.clone();
            }
        }

        // Legacy contract wraps reasons in surrounding text.
        for (known, reason) in KNOWN_REASONS {
            if raw.contains(known) {
                return reason.clone();
            }
        }

        Self::ContractRejected(raw.to_owned())
    }
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyVoted => f.pad("already voted"),
            Self::VotingPeriodEnded => f.pad("voting period has ended"),
            Self::NoVotingPower => f.pad("no voting power for this disaster"),
            Self::MustStake => f.pad("the fixed stake amount was not attached"),
            Self::InsufficientFunds => f.pad("insufficient funds"),
            Self::NotEnoughVotes => f.pad("approval threshold not met"),
            Self::AlreadyApproved => f.pad("already approved"),
            Self::AlreadyFinalized => f.pad("already finalized"),
            Self::OnlyAdmins => f.pad("admin role required"),
            Self::ContractRejected(raw) => write!(f, "contract rejected: {raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_reasons_map_exactly() {
        assert_eq!(
            RevertReason::classify("Already voted"),
            RevertReason::AlreadyVoted
        );
        assert_eq!(
            RevertReason::classify("Not enough votes"),
            RevertReason::NotEnoughVotes
        );
        assert_eq!(
            RevertReason::classify("Must stake 0.01 ETH"),
            RevertReason::MustStake
        );
        assert_eq!(
            RevertReason::classify("Only admins can vote"),
            RevertReason::OnlyAdmins
        );
    }

    #[test]
    fn test_embellished_reasons_fall_back_to_substring() {
        assert_eq!(
            RevertReason::classify("execution reverted: Already voted"),
            RevertReason::AlreadyVoted
        );
        assert_eq!(
            RevertReason::classify("err: insufficient funds for gas * price + value"),
            RevertReason::InsufficientFunds
        );
    }

    #[test]
    fn test_unknown_reason_is_carried_verbatim() {
        let raw = "Paused by governance";
        assert_eq!(
            RevertReason::classify(raw),
            RevertReason::ContractRejected(raw.to_owned()),
            "unknown text must never collapse into a known category"
        );
    }

    #[test]
    fn test_insensitive_casing_is_not_guessed() {
        // "already voted" (lowercase) is not a string the contract emits.
        assert_eq!(
            RevertReason::classify("already voted"),
            RevertReason::ContractRejected("already voted".to_owned())
        );
    }
}
