//! Contract client for the disaster-relief crowdfunding platform.
//!
//! The crate is layered: a [`transport::Transport`] carries raw ABI bytes
//! to one contract on one network, [`client::Client`] adds session
//! establishment and call plumbing on top, and the [`env`] module exposes
//! the typed read ([`ReliefQuery`]) and write ([`ReliefMutate`]) facades
//! that the rest of the application talks to.
//!
//! ```no_run
//! use std::borrow::Cow;
//!
//! use relief_client::env::Relief;
//! use relief_client::{Client, ClientConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config: ClientConfig = toml::from_str(
//!     r#"
//!     rpc_url = "https://sepolia.example.org"
//!     network_id = "sepolia"
//!     contract_id = "0x64C48E92C70a85e9B2AeD8AA4B4E9bABab2979b8"
//!     chain_id = 11155111
//!     "#,
//! )?;
//! let client = Client::connect(&config).await?;
//!
//! let query = client.query::<Relief>(
//!     Cow::Borrowed("ethereum"),
//!     Cow::Owned(config.network_id.clone()),
//!     Cow::Owned(config.contract_id.clone()),
//! );
//!
//! let disasters = query.disaster_list().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod env;
pub mod guard;
pub mod protocol;
pub mod revert;
pub mod transport;

mod sol;

pub use client::{CallClient, Client, ClientError, ConnectError, Environment};
pub use config::ClientConfig;
pub use env::{ReliefMutate, ReliefQuery};
pub use revert::RevertReason;
pub use transport::{Transport, TransportError, TransportRequest, TxReceipt};
