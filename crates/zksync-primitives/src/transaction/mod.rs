//! Layer-2 transactions accepted by `tx_submit` and `submit_txs_batch`.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::serde_utils::parse_biguint;
use crate::{EthSignature, Result, Signature};

mod change_pub_key;
mod encoding;
mod forced_exit;
mod swap;
mod transfer;
mod withdraw;

pub use change_pub_key::{
    ChangePubKey, ChangePubKeyAuthType, ChangePubKeyCreate2, ChangePubKeyEcdsa,
    ChangePubKeyVariant,
};
pub use forced_exit::ForcedExit;
pub use swap::{Order, Swap};
pub use transfer::Transfer;
pub use withdraw::Withdraw;

/// Latest transaction format version understood by the network.
pub const CURRENT_TX_VERSION: u8 = 1;

/// Validity window, in unix seconds, during which the network accepts a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub valid_from: u64,
    pub valid_until: u64,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            valid_from: 0,
            valid_until: u32::MAX as u64,
        }
    }
}

impl TimeRange {
    pub fn new(valid_from: u64, valid_until: u64) -> Self {
        Self {
            valid_from,
            valid_until,
        }
    }
}

/// Common behaviour of every submittable layer-2 transaction.
pub trait SignableTransaction {
    /// Canonical byte encoding signed by the layer-2 key.
    fn signing_bytes(&self) -> Result<Vec<u8>>;
    fn fee(&self) -> &str;
    fn nonce(&self) -> u32;
    fn signature(&self) -> Option<&Signature>;
    fn set_signature(&mut self, signature: Signature);

    fn fee_integer(&self) -> Result<BigUint> {
        parse_biguint("fee", self.fee())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ZkSyncTransaction {
    Transfer(Transfer),
    Withdraw(Withdraw),
    ChangePubKey(ChangePubKey),
    ForcedExit(ForcedExit),
    Swap(Swap),
}

macro_rules! dispatch {
    ($self:ident, $tx:ident => $body:expr) => {
        match $self {
            ZkSyncTransaction::Transfer($tx) => $body,
            ZkSyncTransaction::Withdraw($tx) => $body,
            ZkSyncTransaction::ChangePubKey($tx) => $body,
            ZkSyncTransaction::ForcedExit($tx) => $body,
            ZkSyncTransaction::Swap($tx) => $body,
        }
    };
}

impl ZkSyncTransaction {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Transfer(_) => "Transfer",
            Self::Withdraw(_) => "Withdraw",
            Self::ChangePubKey(_) => "ChangePubKey",
            Self::ForcedExit(_) => "ForcedExit",
            Self::Swap(_) => "Swap",
        }
    }

    pub fn is_signed(&self) -> bool {
        self.signature().is_some()
    }
}

impl SignableTransaction for ZkSyncTransaction {
    fn signing_bytes(&self) -> Result<Vec<u8>> {
        dispatch!(self, tx => tx.signing_bytes())
    }

    fn fee(&self) -> &str {
        dispatch!(self, tx => tx.fee())
    }

    fn nonce(&self) -> u32 {
        dispatch!(self, tx => tx.nonce())
    }

    fn signature(&self) -> Option<&Signature> {
        dispatch!(self, tx => tx.signature())
    }

    fn set_signature(&mut self, signature: Signature) {
        dispatch!(self, tx => tx.set_signature(signature))
    }
}

impl From<Transfer> for ZkSyncTransaction {
    fn from(tx: Transfer) -> Self {
        Self::Transfer(tx)
    }
}

impl From<Withdraw> for ZkSyncTransaction {
    fn from(tx: Withdraw) -> Self {
        Self::Withdraw(tx)
    }
}

impl From<ChangePubKey> for ZkSyncTransaction {
    fn from(tx: ChangePubKey) -> Self {
        Self::ChangePubKey(tx)
    }
}

impl From<ForcedExit> for ZkSyncTransaction {
    fn from(tx: ForcedExit) -> Self {
        Self::ForcedExit(tx)
    }
}

impl From<Swap> for ZkSyncTransaction {
    fn from(tx: Swap) -> Self {
        Self::Swap(tx)
    }
}

/// Batch element: a signed transaction and its optional on-chain-style signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub tx: ZkSyncTransaction,
    pub signature: Option<EthSignature>,
}

impl SignedTransaction {
    pub fn new(tx: impl Into<ZkSyncTransaction>, signature: Option<EthSignature>) -> Self {
        Self {
            tx: tx.into(),
            signature,
        }
    }
}
