use alloy::primitives::{Address, U256};
use alloy_sol_types::SolValue;

use crate::env::Method;
use crate::protocol::ethereum::Ethereum;

/// `addRequest(string,string,string,address)` — payable, carries the
/// admission stake. Parameter order on the wire is title, photo CID,
/// description, residual address.
#[derive(Clone, Debug)]
pub(super) struct AddRequest {
    pub(super) title: String,
    pub(super) photo_cid: String,
    pub(super) description: String,
    pub(super) residual_address: Address,
}

impl Method<Ethereum> for AddRequest {
    const METHOD: &'static str = "addRequest(string,string,string,address)";

    type Returns = ();

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok((
            self.title,
            self.photo_cid,
            self.description,
            self.residual_address,
        )
            .abi_encode_params())
    }

    fn decode(_response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Ok(())
    }
}

/// `submitProposal(uint256,string,uint256,string,string,string)`.
#[derive(Clone, Debug)]
pub(super) struct SubmitProposal {
    pub(super) disaster_id: u64,
    pub(super) title: String,
    pub(super) amount_wei: u128,
    pub(super) description: String,
    pub(super) photo_cid: String,
    pub(super) proof_cid: String,
}

impl Method<Ethereum> for SubmitProposal {
    const METHOD: &'static str = "submitProposal(uint256,string,uint256,string,string,string)";

    type Returns = ();

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok((
            U256::from(self.disaster_id),
            self.title,
            U256::from(self.amount_wei),
            self.description,
            self.photo_cid,
            self.proof_cid,
        )
            .abi_encode_params())
    }

    fn decode(_response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Ok(())
    }
}

/// `voteProposal(uint256,bool)`.
#[derive(Copy, Clone, Debug)]
pub(super) struct VoteProposal {
    pub(super) proposal_id: u64,
    pub(super) approve: bool,
}

impl Method<Ethereum> for VoteProposal {
    const METHOD: &'static str = "voteProposal(uint256,bool)";

    type Returns = ();

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok((U256::from(self.proposal_id), self.approve).abi_encode())
    }

    fn decode(_response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Ok(())
    }
}

/// `voteRequest(uint256,bool)` — admin only, contract-enforced.
#[derive(Copy, Clone, Debug)]
pub(super) struct VoteRequest {
    pub(super) request_id: u64,
    pub(super) approve: bool,
}

impl Method<Ethereum> for VoteRequest {
    const METHOD: &'static str = "voteRequest(uint256,bool)";

    type Returns = ();

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok((U256::from(self.request_id), self.approve).abi_encode())
    }

    fn decode(_response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Ok(())
    }
}

/// `finalizeProposal(uint256)`.
#[derive(Copy, Clone, Debug)]
pub(super) struct FinalizeProposal {
    pub(super) proposal_id: u64,
}

impl Method<Ethereum> for FinalizeProposal {
    const METHOD: &'static str = "finalizeProposal(uint256)";

    type Returns = ();

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(U256::from(self.proposal_id).abi_encode())
    }

    fn decode(_response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Ok(())
    }
}

/// `finalizeDisaster(uint256)` — settles a disaster request.
#[derive(Copy, Clone, Debug)]
pub(super) struct FinalizeDisaster {
    pub(super) request_id: u64,
}

impl Method<Ethereum> for FinalizeDisaster {
    const METHOD: &'static str = "finalizeDisaster(uint256)";

    type Returns = ();

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(U256::from(self.request_id).abi_encode())
    }

    fn decode(_response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Ok(())
    }
}

/// `donate(uint256)` — payable, the donation rides in the value field.
#[derive(Copy, Clone, Debug)]
pub(super) struct Donate {
    pub(super) disaster_id: u64,
}

impl Method<Ethereum> for Donate {
    const METHOD: &'static str = "donate(uint256)";

    type Returns = ();

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(U256::from(self.disaster_id).abi_encode())
    }

    fn decode(_response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Ok(())
    }
}

/// `payOutToCampaignTeam(uint256)` — releases residual funds.
#[derive(Copy, Clone, Debug)]
pub(super) struct PayOut {
    pub(super) disaster_id: u64,
}

impl Method<Ethereum> for PayOut {
    const METHOD: &'static str = "payOutToCampaignTeam(uint256)";

    type Returns = ();

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(U256::from(self.disaster_id).abi_encode())
    }

    fn decode(_response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Ok(())
    }
}
