use crate::client::{CallClient, Environment};
use crate::protocol::Protocol;

pub mod mutate;
pub mod query;

pub use mutate::ReliefMutate;
pub use query::ReliefQuery;

/// One contract method: its full Solidity signature, the ABI encoding of
/// its params, and the decoding of its return tuple.
pub trait Method<P: Protocol> {
    type Returns;

    /// Full signature, e.g. `donate(uint256)`; the transport derives the
    /// call selector from it.
    const METHOD: &'static str;

    fn encode(self) -> eyre::Result<Vec<u8>>;
    fn decode(response: Vec<u8>) -> eyre::Result<Self::Returns>;
}

/// The relief contract's call surface.
#[derive(Copy, Clone, Debug)]
pub enum Relief {}

impl<'a, T: 'a> Environment<'a, T> for Relief {
    type Query = ReliefQuery<'a, T>;
    type Mutate = ReliefMutate<'a, T>;

    fn query(client: CallClient<'a, T>) -> Self::Query {
        ReliefQuery { client }
    }

    fn mutate(client: CallClient<'a, T>) -> Self::Mutate {
        ReliefMutate { client }
    }
}

pub(crate) mod utils {
    use super::Method;
    use crate::client::{CallClient, ClientError};
    use crate::protocol::ethereum::Ethereum;
    use crate::protocol::Protocol;
    use crate::transport::{Transport, TxReceipt};

    pub(crate) async fn send_query<M, R, T: Transport>(
        client: &CallClient<'_, T>,
        params: M,
    ) -> Result<R, ClientError<T>>
    where
        M: Method<Ethereum, Returns = R>,
    {
        match &*client.protocol {
            Ethereum::PROTOCOL => client.query::<Ethereum, _>(params).await,
            unsupported_protocol => Err(ClientError::UnsupportedProtocol {
                found: unsupported_protocol.to_owned(),
                expected: Ethereum::PROTOCOL,
            }),
        }
    }

    pub(crate) async fn send_mutate<M, T: Transport>(
        client: &CallClient<'_, T>,
        params: M,
        value: u128,
    ) -> Result<TxReceipt, ClientError<T>>
    where
        M: Method<Ethereum>,
    {
        match &*client.protocol {
            Ethereum::PROTOCOL => client.mutate::<Ethereum, _>(params, value).await,
            unsupported_protocol => Err(ClientError::UnsupportedProtocol {
                found: unsupported_protocol.to_owned(),
                expected: Ethereum::PROTOCOL,
            }),
        }
    }
}
