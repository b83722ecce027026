use alloy::primitives::{Address, U256};
use alloy_sol_types::SolValue;

use crate::env::Method;
use crate::protocol::ethereum::Ethereum;

/// `proposalHasVoted(uint256,address)`.
#[derive(Copy, Clone, Debug)]
pub(super) struct ProposalHasVotedRequest {
    pub(super) id: u64,
    pub(super) voter: Address,
}

impl Method<Ethereum> for ProposalHasVotedRequest {
    const METHOD: &'static str = "proposalHasVoted(uint256,address)";

    type Returns = bool;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok((U256::from(self.id), self.voter).abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        bool::abi_decode(&response).map_err(Into::into)
    }
}

/// `proposalVoteType(uint256,address)` — only meaningful after a positive
/// `proposalHasVoted`.
#[derive(Copy, Clone, Debug)]
pub(super) struct ProposalVoteTypeRequest {
    pub(super) id: u64,
    pub(super) voter: Address,
}

impl Method<Ethereum> for ProposalVoteTypeRequest {
    const METHOD: &'static str = "proposalVoteType(uint256,address)";

    type Returns = bool;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok((U256::from(self.id), self.voter).abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        bool::abi_decode(&response).map_err(Into::into)
    }
}

/// `requestHasVoted(uint256,address)`.
#[derive(Copy, Clone, Debug)]
pub(super) struct RequestHasVotedRequest {
    pub(super) id: u64,
    pub(super) voter: Address,
}

impl Method<Ethereum> for RequestHasVotedRequest {
    const METHOD: &'static str = "requestHasVoted(uint256,address)";

    type Returns = bool;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok((U256::from(self.id), self.voter).abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        bool::abi_decode(&response).map_err(Into::into)
    }
}

/// `requestVoteType(uint256,address)`.
#[derive(Copy, Clone, Debug)]
pub(super) struct RequestVoteTypeRequest {
    pub(super) id: u64,
    pub(super) voter: Address,
}

impl Method<Ethereum> for RequestVoteTypeRequest {
    const METHOD: &'static str = "requestVoteType(uint256,address)";

    type Returns = bool;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok((U256::from(self.id), self.voter).abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        bool::abi_decode(&response).map_err(Into::into)
    }
}
