//! Core types for the zkSync client SDK
//!
//! This module re-exports the alloy types the other workspace crates rely on
//! to keep a single source of truth for primitive versions.

pub mod alloy {
    pub mod primitives {
        pub use alloy::primitives::{
            address, b256, eip191_hash_message, keccak256, Address, PrimitiveSignature, B256,
        };
    }

    pub mod signers {
        pub use alloy::signers::{local::PrivateKeySigner, Signer};
    }

    pub mod utils {
        pub use alloy::hex;
    }
}

pub mod create2;
pub mod error;
pub mod fee;
pub mod operation;
pub mod serde_utils;
pub mod signature;
pub mod state;
pub mod token;
pub mod transaction;
pub mod utils;

pub use error::{PrimitivesError, Result};
pub use fee::{
    TransactionFeeBatchRequest, TransactionFeeDetails, TransactionFeeRequest, TransactionType,
};
pub use operation::{
    BlockInfo, ContractAddress, EthOpInfo, Toggle2FA, Toggle2FAResponse, TransactionDetails,
};
pub use signature::{EthSignature, EthSignatureType, Signature};
pub use state::{AccountState, DepositingBalance, DepositingState, State};
pub use token::{Token, Tokens};
pub use transaction::{
    ChangePubKey, ChangePubKeyAuthType, ChangePubKeyCreate2, ChangePubKeyEcdsa, ChangePubKeyVariant,
    ForcedExit, Order, SignableTransaction, SignedTransaction, Swap, TimeRange, Transfer, Withdraw,
    ZkSyncTransaction,
};
