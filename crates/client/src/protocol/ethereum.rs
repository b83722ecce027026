use std::borrow::Cow;
use std::collections::BTreeMap;

use alloy::eips::BlockId;
use alloy::network::{Ethereum as EthereumNetwork, EthereumWallet, ReceiptResponse};
use alloy::primitives::{keccak256, Address, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::{RpcError, TransportErrorKind};
use alloy_sol_types::{Revert, SolError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use super::Protocol;
use crate::transport::{Transport, TransportError, TransportRequest, TxReceipt};

#[derive(Copy, Clone, Debug)]
pub enum Ethereum {}

impl Protocol for Ethereum {
    const PROTOCOL: &'static str = "ethereum";
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(try_from = "serde_creds::Credentials")]
pub struct Credentials {
    pub account_id: String,
    pub secret_key: String,
}

mod serde_creds {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Deserialize, Serialize)]
    pub struct Credentials {
        account_id: String,
        secret_key: String,
    }

    impl TryFrom<Credentials> for super::Credentials {
        type Error = &'static str;

        fn try_from(creds: Credentials) -> Result<Self, Self::Error> {
            Ok(Self {
                account_id: creds.account_id,
                secret_key: creds.secret_key,
            })
        }
    }
}

#[derive(Debug)]
pub struct NetworkConfig {
    pub rpc_url: Url,
    /// Absent for a read-only network; writes then fail with
    /// [`EthereumError::NoSigner`].
    pub access_key: Option<PrivateKeySigner>,
}

#[derive(Debug)]
pub struct EthereumConfig<'a> {
    pub networks: BTreeMap<Cow<'a, str>, NetworkConfig>,
}

#[derive(Clone, Debug)]
struct Network {
    provider: DynProvider<EthereumNetwork>,
    signer_address: Option<Address>,
}

#[derive(Clone, Debug)]
pub struct EthereumTransport<'a> {
    networks: BTreeMap<Cow<'a, str>, Network>,
}

impl<'a> EthereumTransport<'a> {
    #[must_use]
    pub fn new(config: &EthereumConfig<'a>) -> Self {
        let mut networks = BTreeMap::new();

        for (network_id, network_config) in &config.networks {
            let signer_address = network_config.access_key.as_ref().map(PrivateKeySigner::address);

            let builder = ProviderBuilder::new();
            let provider: DynProvider<EthereumNetwork> = match &network_config.access_key {
                Some(key) => builder
                    .wallet(EthereumWallet::from(key.clone()))
                    .connect_http(network_config.rpc_url.clone())
                    .erased(),
                None => builder.connect_http(network_config.rpc_url.clone()).erased(),
            };

            let _ignored = networks.insert(
                network_id.clone(),
                Network {
                    provider,
                    signer_address,
                },
            );
        }

        Self { networks }
    }

    /// Address of the signer bound to `network_id`, when one is configured.
    #[must_use]
    pub fn signer_address(&self, network_id: &str) -> Option<Address> {
        self.networks.get(network_id)?.signer_address
    }

    /// The chain id the network's RPC node reports.
    pub async fn chain_id(&self, network_id: &str) -> Result<u64, EthereumError> {
        let Some(network) = self.networks.get(network_id) else {
            return Err(EthereumError::UnknownNetwork(network_id.to_owned()));
        };

        network
            .provider
            .get_chain_id()
            .await
            .map_err(|e| EthereumError::Custom {
                operation: ErrorOperation::Query,
                reason: format!("Failed to fetch chain id: {e}"),
            })
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EthereumError {
    #[error("unknown network `{0}`")]
    UnknownNetwork(String),
    #[error("no signer configured for this network")]
    NoSigner,
    #[error("contract reverted: {reason}")]
    Reverted { reason: String },
    #[error("invalid response from RPC while {operation}")]
    InvalidResponse { operation: ErrorOperation },
    #[error("error while {operation}: {reason}")]
    Custom {
        operation: ErrorOperation,
        reason: String,
    },
}

#[derive(Copy, Clone, Debug, Error)]
#[non_exhaustive]
pub enum ErrorOperation {
    #[error("querying contract")]
    Query,
    #[error("mutating contract")]
    Mutate,
}

impl TransportError for EthereumError {
    fn is_revert(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }

    fn revert_reason(&self) -> Option<&str> {
        match self {
            Self::Reverted { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Pulls the revert reason out of an RPC error payload, when the node
/// surfaced one.
fn extract_revert_reason(err: &RpcError<TransportErrorKind>) -> Option<String> {
    let payload = err.as_error_resp()?;

    if let Some(data) = payload.as_revert_data() {
        if let Ok(revert) = Revert::abi_decode(&data) {
            return Some(revert.reason);
        }
    }

    // Some nodes inline the reason into the message instead of the data.
    let message = &*payload.message;
    if let Some(reason) = message.strip_prefix("execution reverted: ") {
        return Some(reason.to_owned());
    }

    // An underfunded account is rejected by the node before execution, with
    // neither revert data nor the reverted prefix; surface the message so it
    // classifies alongside the contract's own insufficient-funds rejection.
    message
        .contains("insufficient funds")
        .then(|| message.to_owned())
}

impl Transport for EthereumTransport<'_> {
    type Error = EthereumError;

    async fn query(
        &self,
        request: TransportRequest<'_>,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, Self::Error> {
        let Some(network) = self.networks.get(&request.network_id) else {
            return Err(EthereumError::UnknownNetwork(
                request.network_id.into_owned(),
            ));
        };

        network
            .query(
                request.contract_id.into_owned(),
                request.method.into_owned(),
                payload,
            )
            .await
    }

    async fn mutate(
        &self,
        request: TransportRequest<'_>,
        payload: Vec<u8>,
        value: u128,
    ) -> Result<TxReceipt, Self::Error> {
        let Some(network) = self.networks.get(&request.network_id) else {
            return Err(EthereumError::UnknownNetwork(
                request.network_id.into_owned(),
            ));
        };

        network
            .mutate(
                request.contract_id.into_owned(),
                request.method.into_owned(),
                payload,
                value,
            )
            .await
    }
}

fn call_data(method: &str, args: &[u8]) -> Vec<u8> {
    let selector = &keccak256(method.as_bytes())[..4];

    let mut data = Vec::with_capacity(4_usize.saturating_add(args.len()));
    data.extend_from_slice(selector);
    data.extend_from_slice(args);
    data
}

#[cfg(test)]
mod tests {
    use alloy::rpc::json_rpc::ErrorPayload;

    use super::*;
    use crate::revert::RevertReason;

    fn rpc_error(message: &'static str) -> RpcError<TransportErrorKind> {
        RpcError::ErrorResp(ErrorPayload {
            code: -32000,
            message: message.into(),
            data: None,
        })
    }

    #[test]
    fn test_reverted_prefix_message_yields_the_reason() {
        let reason = extract_revert_reason(&rpc_error("execution reverted: Already voted"));
        assert_eq!(reason.as_deref(), Some("Already voted"));
    }

    #[test]
    fn test_node_insufficient_funds_rejection_classifies() {
        // Pre-execution rejection: no revert data, no reverted prefix.
        let reason =
            extract_revert_reason(&rpc_error("insufficient funds for gas * price + value"))
                .expect("the node message must be surfaced");

        assert_eq!(
            RevertReason::classify(&reason),
            RevertReason::InsufficientFunds,
            "an underfunded account lands in the taxonomy, not in a catch-all"
        );
    }

    #[test]
    fn test_unrelated_rpc_errors_carry_no_reason() {
        assert_eq!(extract_revert_reason(&rpc_error("nonce too low")), None);
    }
}

impl Network {
    async fn query(
        &self,
        contract_id: String,
        method: String,
        args: Vec<u8>,
    ) -> Result<Vec<u8>, EthereumError> {
        let address = contract_id
            .parse::<Address>()
            .map_err(|e| EthereumError::Custom {
                operation: ErrorOperation::Query,
                reason: e.to_string(),
            })?;

        debug!(%method, contract=%address, "issuing eth_call");

        let request = TransactionRequest::default()
            .to(address)
            .input(Bytes::from(call_data(&method, &args)).into());

        let bytes = self
            .provider
            .call(request)
            .block(BlockId::latest())
            .await
            .map_err(|e| {
                if let Some(reason) = extract_revert_reason(&e) {
                    return EthereumError::Reverted { reason };
                }
                error!(%method, %e, "eth_call failed");
                EthereumError::Custom {
                    operation: ErrorOperation::Query,
                    reason: format!("Failed to execute eth_call: {e}"),
                }
            })?;

        Ok(bytes.into())
    }

    async fn mutate(
        &self,
        contract_id: String,
        method: String,
        args: Vec<u8>,
        value: u128,
    ) -> Result<TxReceipt, EthereumError> {
        if self.signer_address.is_none() {
            return Err(EthereumError::NoSigner);
        }

        let address = contract_id
            .parse::<Address>()
            .map_err(|e| EthereumError::Custom {
                operation: ErrorOperation::Mutate,
                reason: e.to_string(),
            })?;

        let mut request = TransactionRequest::default()
            .to(address)
            .input(Bytes::from(call_data(&method, &args)).into());

        if value > 0 {
            request = request.value(U256::from(value));
        }

        let tx = self
            .provider
            .send_transaction(request.clone())
            .await
            .map_err(|e| {
                if let Some(reason) = extract_revert_reason(&e) {
                    return EthereumError::Reverted { reason };
                }
                error!(%method, %e, "transaction submission failed");
                EthereumError::Custom {
                    operation: ErrorOperation::Mutate,
                    reason: format!("Failed to send transaction: {e}"),
                }
            })?;

        info!(%method, tx_hash = %tx.tx_hash(), "transaction submitted, awaiting confirmation");

        // Confirmation is awaited without a deadline; a submitted write can
        // neither be cancelled nor resubmitted from here.
        let receipt = tx
            .with_required_confirmations(1)
            .get_receipt()
            .await
            .map_err(|e| EthereumError::Custom {
                operation: ErrorOperation::Mutate,
                reason: format!("Failed to get transaction receipt: {e}"),
            })?;

        let block_number = receipt
            .block_number()
            .ok_or(EthereumError::InvalidResponse {
                operation: ErrorOperation::Mutate,
            })?;

        if !receipt.status() {
            // Re-simulate at the mined block to recover the revert reason
            // the receipt itself does not carry.
            let reason = match self.provider.call(request).block(block_number.into()).await {
                Err(ref e) => extract_revert_reason(e),
                Ok(_) => None,
            };

            return match reason {
                Some(reason) => Err(EthereumError::Reverted { reason }),
                None => Err(EthereumError::Custom {
                    operation: ErrorOperation::Mutate,
                    reason: "Transaction failed".to_owned(),
                }),
            };
        }

        info!(
            %method,
            tx_hash = %receipt.transaction_hash(),
            block_number,
            gas_used = receipt.gas_used(),
            "transaction confirmed"
        );

        Ok(TxReceipt {
            transaction_hash: receipt.transaction_hash().to_string(),
            block_number,
            gas_used: receipt.gas_used().into(),
            effective_gas_price: receipt.effective_gas_price(),
        })
    }
}
