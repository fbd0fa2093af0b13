//! Client for a zkSync layer-2 node.
//!
//! [`transport`] moves JSON-RPC envelopes, [`provider`] maps the node's api
//! onto typed requests and [`wallet`] builds, signs and submits operations
//! for one account.

pub mod config;
pub mod error;
pub mod provider;
pub mod transport;
pub mod wallet;

pub use config::{ClientConfig, ConfigError, Network};
pub use error::{ClientError, Result};
pub use provider::{DefaultProvider, Provider};
pub use transport::{HttpTransport, RpcError, Transport};
pub use wallet::Wallet;
