use alloy::primitives::Address;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::encoding::TxEncoder;
use super::{SignableTransaction, TimeRange};
use crate::serde_utils::biguint_str;
use crate::{Result, Signature};

/// Move funds from the layer-2 account to an on-chain address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdraw {
    pub account_id: u32,
    pub from: Address,
    pub to: Address,
    pub token: u32,
    #[serde(with = "biguint_str")]
    pub amount: BigUint,
    pub fee: String,
    pub nonce: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    #[serde(flatten)]
    pub time_range: TimeRange,
}

impl Withdraw {
    pub const TX_TYPE: u8 = 3;
}

impl SignableTransaction for Withdraw {
    fn signing_bytes(&self) -> Result<Vec<u8>> {
        Ok(TxEncoder::versioned(Self::TX_TYPE)
            .u32(self.account_id)
            .address(&self.from)
            .address(&self.to)
            .u32(self.token)
            .amount("amount", &self.amount)?
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
