use alloy::primitives::{keccak256, Address};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::encoding::TxEncoder;
use super::{SignableTransaction, TimeRange};
use crate::serde_utils::{biguint_pair, biguint_str};
use crate::{EthSignature, PrimitivesError, Result, Signature};

const ORDER_MARKER: u8 = b'o';

/// One side of an atomic swap, signed independently by its owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub account_id: u32,
    pub recipient: Address,
    pub nonce: u32,
    pub token_buy: u32,
    pub token_sell: u32,
    /// `[sell, buy]` exchange ratio.
    #[serde(with = "biguint_pair")]
    pub ratio: [BigUint; 2],
    #[serde(with = "biguint_str")]
    pub amount: BigUint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_signature: Option<EthSignature>,
    #[serde(flatten)]
    pub time_range: TimeRange,
}

impl Order {
    pub fn signing_bytes(&self) -> Result<Vec<u8>> {
        if self.token_buy == self.token_sell {
            return Err(PrimitivesError::InvalidInputError(
                "order must buy and sell different tokens".into(),
            ));
        }
        Ok(TxEncoder::with_marker(ORDER_MARKER)
            .u32(self.account_id)
            .address(&self.recipient)
            .u32(self.nonce)
            .u32(self.token_sell)
            .u32(self.token_buy)
            .amount("ratio", &self.ratio[0])?
            .amount("ratio", &self.ratio[1])?
            .amount("amount", &self.amount)?
            .time_range(&self.time_range)
            .finish())
    }

    pub fn set_signature(&mut self, signature: Signature) {
        self.signature = Some(signature);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swap {
    pub submitter_id: u32,
    pub submitter_address: Address,
    pub nonce: u32,
    pub orders: (Order, Order),
    #[serde(with = "biguint_pair")]
    pub amounts: [BigUint; 2],
    pub fee: String,
    pub fee_token: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
}

impl Swap {
    pub const TX_TYPE: u8 = 11;
}

impl SignableTransaction for Swap {
    /// The orders enter the encoding only through the hash of their
    /// concatenated canonical bytes.
    fn signing_bytes(&self) -> Result<Vec<u8>> {
        let mut orders = self.orders.0.signing_bytes()?;
        orders.extend(self.orders.1.signing_bytes()?);
        Ok(TxEncoder::versioned(Self::TX_TYPE)
            .u32(self.submitter_id)
            .address(&self.submitter_address)
            .u32(self.nonce)
            .bytes(keccak256(orders).as_slice())
            .u32(self.fee_token)
            .amount("fee", &self.fee_integer()?)?
            .amount("amounts", &self.amounts[0])?
            .amount("amounts", &self.amounts[1])?
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
