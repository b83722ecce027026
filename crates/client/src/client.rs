use std::borrow::Cow;
use std::collections::BTreeMap;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::env::Method;
use crate::guard::InFlightGuard;
use crate::protocol::ethereum::{EthereumConfig, EthereumError, EthereumTransport, NetworkConfig};
use crate::protocol::Protocol;
use crate::transport::{Transport, TransportRequest, TxReceipt};

/// Session establishment failures.
///
/// The headless analogs of the wallet-connect failure modes: no configured
/// signer stands in for a missing wallet extension, an unparseable or
/// mismatched key for a locked one.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConnectError {
    #[error("no signer credentials configured")]
    WalletUnavailable,
    #[error("signer credentials are invalid: {0}")]
    InvalidCredentials(&'static str),
    #[error("connected node serves chain {found}, expected {expected}")]
    ChainMismatch { expected: u64, found: u64 },
    #[error("rpc error while connecting: {0}")]
    Rpc(#[from] EthereumError),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError<T: Transport> {
    #[error("transport error: {0}")]
    Transport(T::Error),
    #[error("codec error: {0}")]
    Codec(#[from] eyre::Report),
    #[error("unsupported protocol `{found}`, expected `{expected}`")]
    UnsupportedProtocol {
        found: String,
        expected: &'static str,
    },
}

#[derive(Clone, Debug)]
pub struct Client<T> {
    transport: T,
    guard: InFlightGuard,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            guard: InFlightGuard::default(),
        }
    }
}

impl Client<EthereumTransport<'static>> {
    /// Builds a client from config; read-capable always, write-capable when
    /// credentials are present and consistent.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConnectError> {
        let access_key = config
            .credentials
            .as_ref()
            .map(|credentials| {
                let signer = credentials
                    .secret_key
                    .parse::<PrivateKeySigner>()
                    .map_err(|_| ConnectError::InvalidCredentials("secret key does not parse"))?;

                let account = credentials
                    .account_id
                    .parse::<Address>()
                    .map_err(|_| {
                        ConnectError::InvalidCredentials("account id is not an address")
                    })?;

                if signer.address() != account {
                    return Err(ConnectError::InvalidCredentials(
                        "secret key does not match account id",
                    ));
                }

                Ok(signer)
            })
            .transpose()?;

        let mut networks = BTreeMap::new();
        let _ignored = networks.insert(
            Cow::Owned(config.network_id.clone()),
            NetworkConfig {
                rpc_url: config.rpc_url.clone(),
                access_key,
            },
        );

        Ok(Self::new(EthereumTransport::new(&EthereumConfig {
            networks,
        })))
    }

    /// [`Self::from_config`] plus a chain-id handshake: when the config
    /// pins a chain, the node must serve it before any call goes out.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ConnectError> {
        let client = Self::from_config(config)?;

        if let Some(expected) = config.chain_id {
            let found = client.transport.chain_id(&config.network_id).await?;
            if found != expected {
                return Err(ConnectError::ChainMismatch { expected, found });
            }
        }

        Ok(client)
    }

    /// The active signer address for `network_id`, or `None` for a
    /// read-only session.
    #[must_use]
    pub fn signer_address(&self, network_id: &str) -> Option<Address> {
        self.transport.signer_address(network_id)
    }

    /// As [`Self::signer_address`], failing when no signer is bound.
    pub fn require_signer(&self, network_id: &str) -> Result<Address, ConnectError> {
        self.signer_address(network_id)
            .ok_or(ConnectError::WalletUnavailable)
    }
}

impl<T: Transport> Client<T> {
    async fn query_raw(
        &self,
        request: TransportRequest<'_>,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, T::Error> {
        self.transport.query(request, payload).await
    }

    async fn mutate_raw(
        &self,
        request: TransportRequest<'_>,
        payload: Vec<u8>,
        value: u128,
    ) -> Result<TxReceipt, T::Error> {
        self.transport.mutate(request, payload, value).await
    }

    pub fn query<'a, E: Environment<'a, T>>(
        &'a self,
        protocol: Cow<'a, str>,
        network_id: Cow<'a, str>,
        contract_id: Cow<'a, str>,
    ) -> E::Query {
        E::query(CallClient {
            protocol,
            network_id,
            contract_id,
            guard: &self.guard,
            client: self,
        })
    }

    pub fn mutate<'a, E: Environment<'a, T>>(
        &'a self,
        protocol: Cow<'a, str>,
        network_id: Cow<'a, str>,
        contract_id: Cow<'a, str>,
    ) -> E::Mutate {
        E::mutate(CallClient {
            protocol,
            network_id,
            contract_id,
            guard: &self.guard,
            client: self,
        })
    }
}

#[derive(Debug)]
pub struct CallClient<'a, T> {
    pub(crate) protocol: Cow<'a, str>,
    pub(crate) network_id: Cow<'a, str>,
    pub(crate) contract_id: Cow<'a, str>,
    pub(crate) guard: &'a InFlightGuard,
    client: &'a Client<T>,
}

impl<T: Transport> CallClient<'_, T> {
    fn request(&self, method: &'static str) -> TransportRequest<'_> {
        TransportRequest {
            protocol: Cow::Borrowed(&self.protocol),
            network_id: Cow::Borrowed(&self.network_id),
            contract_id: Cow::Borrowed(&self.contract_id),
            method: Cow::Borrowed(method),
        }
    }

    pub(crate) async fn query<P, M>(&self, params: M) -> Result<M::Returns, ClientError<T>>
    where
        M: Method<P>,
        P: Protocol,
    {
        let payload = M::encode(params)?;

        let response = self
            .client
            .query_raw(self.request(M::METHOD), payload)
            .await
            .map_err(ClientError::Transport)?;

        M::decode(response).map_err(ClientError::Codec)
    }

    pub(crate) async fn mutate<P, M>(
        &self,
        params: M,
        value: u128,
    ) -> Result<TxReceipt, ClientError<T>>
    where
        M: Method<P>,
        P: Protocol,
    {
        let payload = M::encode(params)?;

        self.client
            .mutate_raw(self.request(M::METHOD), payload, value)
            .await
            .map_err(ClientError::Transport)
    }
}

pub trait Environment<'a, T> {
    type Query;
    type Mutate;

    fn query(client: CallClient<'a, T>) -> Self::Query;
    fn mutate(client: CallClient<'a, T>) -> Self::Mutate;
}
