use alloy::primitives::{Address, U256};
use alloy_sol_types::SolValue;
use relief_primitives::proposal::Proposal;

use super::disasters::decode_ids;
use crate::env::Method;
use crate::protocol::ethereum::Ethereum;
use crate::sol::SolProposal;

/// `getProposalList(uint256)` — full records of a disaster's proposals,
/// one round trip.
#[derive(Copy, Clone, Debug)]
pub(super) struct ProposalListRequest {
    pub(super) disaster_id: u64,
}

impl Method<Ethereum> for ProposalListRequest {
    const METHOD: &'static str = "getProposalList(uint256)";

    type Returns = Vec<Proposal>;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(U256::from(self.disaster_id).abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Vec::<SolProposal>::abi_decode(&response)?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }
}

/// `getOngoingProposal(uint256)` — ids of proposals still inside their
/// voting window.
#[derive(Copy, Clone, Debug)]
pub(super) struct OngoingProposalIdsRequest {
    pub(super) disaster_id: u64,
}

impl Method<Ethereum> for OngoingProposalIdsRequest {
    const METHOD: &'static str = "getOngoingProposal(uint256)";

    type Returns = Vec<u64>;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(U256::from(self.disaster_id).abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        decode_ids(&response)
    }
}

/// `getUnvoteProposal(uint256,address)` — ids the caller has not voted on.
#[derive(Copy, Clone, Debug)]
pub(super) struct UnvotedProposalIdsRequest {
    pub(super) disaster_id: u64,
    pub(super) caller: Address,
}

impl Method<Ethereum> for UnvotedProposalIdsRequest {
    const METHOD: &'static str = "getUnvoteProposal(uint256,address)";

    type Returns = Vec<u64>;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok((U256::from(self.disaster_id), self.caller).abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        decode_ids(&response)
    }
}

/// `getVotedProposal(uint256,address)` — ids the caller already voted on.
#[derive(Copy, Clone, Debug)]
pub(super) struct VotedProposalIdsRequest {
    pub(super) disaster_id: u64,
    pub(super) caller: Address,
}

impl Method<Ethereum> for VotedProposalIdsRequest {
    const METHOD: &'static str = "getVotedProposal(uint256,address)";

    type Returns = Vec<u64>;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok((U256::from(self.disaster_id), self.caller).abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        decode_ids(&response)
    }
}

/// `proposals(uint256)` — one record by id.
#[derive(Copy, Clone, Debug)]
pub(super) struct ProposalByIdRequest {
    pub(super) id: u64,
}

impl Method<Ethereum> for ProposalByIdRequest {
    const METHOD: &'static str = "proposals(uint256)";

    type Returns = Proposal;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(U256::from(self.id).abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        SolProposal::abi_decode(&response)?.try_into()
    }
}
