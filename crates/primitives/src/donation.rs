use serde::{Deserialize, Serialize};

/// One donor's contribution to a disaster pool.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    /// Donor address, checksummed hex.
    pub donator: String,
    /// ETH decimal string.
    pub amount: String,
}

/// Donor-side aggregate across one disaster.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationSummary {
    pub disaster_id: u64,
    pub name: String,
    /// The disaster's donation address.
    pub donation_address: String,
    pub photo_cid: String,
    /// Sum donated so far, ETH decimal string.
    pub total_amount: String,
    /// Vote weight earned by the donations, ETH decimal string.
    pub voting_power: String,
}

/// Outcome of a confirmed donation transaction.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationReceipt {
    pub tx_hash: String,
    /// `gasUsed * effectiveGasPrice`, ETH decimal string.
    pub gas_fee: String,
}
