use serde::{Deserialize, Serialize};
use url::Url;

pub use crate::protocol::ethereum::Credentials;

/// Everything needed to reach the relief contract: where it lives and,
/// when writes are wanted, who signs for them.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClientConfig {
    pub rpc_url: Url,
    /// Network label, e.g. `sepolia`; keys the transport's network table.
    pub network_id: String,
    /// The contract's address, checksummed hex.
    pub contract_id: String,
    /// When set, [`crate::Client::connect`] verifies the node serves this
    /// chain before any call goes out.
    #[serde(default)]
    pub chain_id: Option<u64>,
    /// Absent for a read-only session.
    #[serde(default)]
    pub credentials: Option<Credentials>,
}
