//! Signer strategies for zkSync transactions.
//!
//! A submission carries up to two signatures: the layer-2 [`ZkSigner`] signs
//! the canonical encoding, and an [`EthSigner`] proves control of the
//! on-chain account. The two halves can be combined freely, e.g. a hardware
//! backed [`DefaultEthSigner`] with a software layer-2 key.

pub mod error;
pub mod eth;
pub mod zk;

pub use error::{Result, SignerError};
pub use eth::create2::Create2EthSigner;
pub use eth::default::DefaultEthSigner;
pub use eth::EthSigner;
pub use zk::ZkSigner;
