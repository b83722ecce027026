use alloy::primitives::{Address, U256};
use alloy_sol_types::SolValue;
use relief_primitives::disaster::DisasterInfo;

use crate::env::Method;
use crate::protocol::ethereum::Ethereum;
use crate::sol::{to_count, SolDisaster};

/// `getOngoingDisaster()` — full records of disasters inside their
/// donation window.
#[derive(Copy, Clone, Debug)]
pub(super) struct OngoingDisastersRequest;

impl Method<Ethereum> for OngoingDisastersRequest {
    const METHOD: &'static str = "getOngoingDisaster()";

    type Returns = Vec<SolDisaster>;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(vec![])
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Vec::<SolDisaster>::abi_decode(&response).map_err(Into::into)
    }
}

/// `getDueDisaster()` — full records of disasters past their due date.
#[derive(Copy, Clone, Debug)]
pub(super) struct DueDisastersRequest;

impl Method<Ethereum> for DueDisastersRequest {
    const METHOD: &'static str = "getDueDisaster()";

    type Returns = Vec<SolDisaster>;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(vec![])
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Vec::<SolDisaster>::abi_decode(&response).map_err(Into::into)
    }
}

/// `getVotableDisaster(address)` — ids the caller may still review.
#[derive(Copy, Clone, Debug)]
pub(super) struct VotableDisasterIdsRequest {
    pub(super) caller: Address,
}

impl Method<Ethereum> for VotableDisasterIdsRequest {
    const METHOD: &'static str = "getVotableDisaster(address)";

    type Returns = Vec<u64>;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(self.caller.abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        decode_ids(&response)
    }
}

/// `disasters(uint256)` — one record by id.
#[derive(Copy, Clone, Debug)]
pub(super) struct DisasterByIdRequest {
    pub(super) id: u64,
}

impl Method<Ethereum> for DisasterByIdRequest {
    const METHOD: &'static str = "disasters(uint256)";

    type Returns = SolDisaster;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(U256::from(self.id).abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        SolDisaster::abi_decode(&response).map_err(Into::into)
    }
}

/// `getDisasterList()` — every disaster, header fields only.
#[derive(Copy, Clone, Debug)]
pub(super) struct DisasterListRequest;

impl Method<Ethereum> for DisasterListRequest {
    const METHOD: &'static str = "getDisasterList()";

    type Returns = Vec<DisasterInfo>;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(vec![])
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Vec::<SolDisaster>::abi_decode(&response)?
            .into_iter()
            .map(SolDisaster::into_info)
            .collect()
    }
}

pub(super) fn decode_ids(response: &[u8]) -> eyre::Result<Vec<u64>> {
    Vec::<U256>::abi_decode(response)?
        .into_iter()
        .map(|id| to_count(id, "id"))
        .collect()
}
