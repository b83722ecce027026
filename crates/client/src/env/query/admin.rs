use alloy::primitives::Address;
use alloy_sol_types::SolValue;
use relief_primitives::disaster::DisasterRequest;

use crate::env::Method;
use crate::protocol::ethereum::Ethereum;
use crate::sol::SolDisasterRequest;

/// `admins(address)` — the contract's admin-role mapping.
#[derive(Copy, Clone, Debug)]
pub(super) struct AdminRequest {
    pub(super) account: Address,
}

impl Method<Ethereum> for AdminRequest {
    const METHOD: &'static str = "admins(address)";

    type Returns = bool;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(self.account.abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        bool::abi_decode(&response).map_err(Into::into)
    }
}

/// `getVotableRequests(address)` — pending disaster requests the admin
/// may review.
#[derive(Copy, Clone, Debug)]
pub(super) struct VotableRequestsRequest {
    pub(super) caller: Address,
}

impl Method<Ethereum> for VotableRequestsRequest {
    const METHOD: &'static str = "getVotableRequests(address)";

    type Returns = Vec<DisasterRequest>;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(self.caller.abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Vec::<SolDisasterRequest>::abi_decode(&response)?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }
}
