use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use super::encoding::TxEncoder;
use super::{SignableTransaction, TimeRange};
use crate::{Result, Signature};

/// Withdraw the full balance of an account with no signing key set, paid by the initiator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForcedExit {
    pub initiator_account_id: u32,
    pub target: Address,
    pub token: u32,
    pub fee: String,
    pub nonce: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    #[serde(flatten)]
    pub time_range: TimeRange,
}

impl ForcedExit {
    pub const TX_TYPE: u8 = 8;
}

impl SignableTransaction for ForcedExit {
    fn signing_bytes(&self) -> Result<Vec<u8>> {
        Ok(TxEncoder::versioned(Self::TX_TYPE)
            .u32(self.initiator_account_id)
            .address(&self.target)
            .u32(self.token)
            .amount("fee", &self.fee_integer()?)?
            .u32(self.nonce)
            .time_range(&self.time_range)
            .finish())
    }

    fn fee(&self) -> &str {
        &self.fee
    }

    fn nonce(&self) -> u32 {
        self.nonce
    }

    fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    fn set_signature(&mut self, signature: Signature) {
        self.signature = Some(signature);
    }
}
