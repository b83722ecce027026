use core::error::Error as CoreError;
use std::borrow::Cow;

/// Errors a transport can produce.
///
/// Reverts are the one failure class the façades inspect: a revert carries
/// the contract's verdict, everything else is plumbing.
pub trait TransportError: CoreError {
    /// True when the failure is a contract revert rather than a transport
    /// fault.
    fn is_revert(&self) -> bool;

    /// The revert reason string, when the node surfaced one.
    fn revert_reason(&self) -> Option<&str>;
}

/// The two call shapes the contract exposes: reads resolve to raw return
/// data, writes are signed, submitted, and awaited to one confirmation
/// before the mined receipt comes back.
pub trait Transport {
    type Error: TransportError;

    #[expect(async_fn_in_trait, reason = "Should be fine")]
    async fn query(
        &self,
        request: TransportRequest<'_>,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, Self::Error>;

    #[expect(async_fn_in_trait, reason = "Should be fine")]
    async fn mutate(
        &self,
        request: TransportRequest<'_>,
        payload: Vec<u8>,
        value: u128,
    ) -> Result<TxReceipt, Self::Error>;
}

#[derive(Debug)]
#[non_exhaustive]
pub struct TransportRequest<'a> {
    pub protocol: Cow<'a, str>,
    pub network_id: Cow<'a, str>,
    pub contract_id: Cow<'a, str>,
    /// Full method signature, e.g. `donate(uint256)`; its keccak-256 prefix
    /// forms the call selector.
    pub method: Cow<'a, str>,
}

impl<'a> TransportRequest<'a> {
    #[must_use]
    pub const fn new(
        protocol: Cow<'a, str>,
        network_id: Cow<'a, str>,
        contract_id: Cow<'a, str>,
        method: Cow<'a, str>,
    ) -> Self {
        Self {
            protocol,
            network_id,
            contract_id,
            method,
        }
    }
}

/// Mined transaction receipt fields the façades report on.
#[expect(clippy::exhaustive_structs, reason = "this is exhaustive")]
#[derive(Clone, Debug)]
pub struct TxReceipt {
    pub transaction_hash: String,
    pub block_number: u64,
    pub gas_used: u128,
    pub effective_gas_price: u128,
}

impl TxReceipt {
    /// Total gas fee paid, in wei.
    #[must_use]
    pub const fn gas_fee(&self) -> u128 {
        self.gas_used.saturating_mul(self.effective_gas_price)
    }
}
