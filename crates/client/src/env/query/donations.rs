use alloy::primitives::{Address, U256};
use alloy_sol_types::SolValue;
use relief_primitives::donation::DonationSummary;

use crate::env::Method;
use crate::protocol::ethereum::Ethereum;
use crate::sol::{to_wei, SolDonationSummary};

/// `getDonators(uint256)` — parallel arrays of donor addresses and wei
/// amounts, index-aligned. The façade zips and length-checks them.
#[derive(Copy, Clone, Debug)]
pub(super) struct DonatorsRequest {
    pub(super) disaster_id: u64,
}

impl Method<Ethereum> for DonatorsRequest {
    const METHOD: &'static str = "getDonators(uint256)";

    type Returns = (Vec<String>, Vec<u128>);

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(U256::from(self.disaster_id).abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        let (donators, amounts) = <(Vec<Address>, Vec<U256>)>::abi_decode_params(&response)?;

        let donators = donators.into_iter().map(|a| a.to_string()).collect();
        let amounts = amounts
            .into_iter()
            .map(|a| to_wei(a, "donation.amount"))
            .collect::<eyre::Result<_>>()?;

        Ok((donators, amounts))
    }
}

/// `getMyDonations(address)` — the caller's aggregates per disaster.
#[derive(Copy, Clone, Debug)]
pub(super) struct MyDonationsRequest {
    pub(super) donator: Address,
}

impl Method<Ethereum> for MyDonationsRequest {
    const METHOD: &'static str = "getMyDonations(address)";

    type Returns = Vec<DonationSummary>;

    fn encode(self) -> eyre::Result<Vec<u8>> {
        Ok(self.donator.abi_encode())
    }

    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns> {
        Vec::<SolDonationSummary>::abi_decode(&response)?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }
}
