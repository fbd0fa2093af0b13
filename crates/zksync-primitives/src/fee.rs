//! Fee estimate requests and responses for `get_tx_fee` / `get_txs_batch_fee_in_wei`.

use alloy::primitives::Address;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_utils::biguint_str;
use crate::transaction::ChangePubKeyAuthType;
use crate::{PrimitivesError, Result};

/// Transaction kind as understood by the fee endpoints.
///
/// Serializes to the raw wire shape: plain strings for most kinds,
/// `{"ChangePubKey": "ECDSA"}` for key changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Withdraw,
    FastWithdraw,
    Transfer,
    ForcedExit,
    Swap,
    ChangePubKey(ChangePubKeyAuthType),
}

impl TransactionType {
    pub fn raw(&self) -> Value {
        match self {
            Self::Withdraw => Value::from("Withdraw"),
            Self::FastWithdraw => Value::from("FastWithdraw"),
            Self::Transfer => Value::from("Transfer"),
            Self::ForcedExit => Value::from("ForcedExit"),
            Self::Swap => Value::from("Swap"),
            Self::ChangePubKey(auth) => {
                let auth = match auth {
                    ChangePubKeyAuthType::Onchain => "Onchain",
                    ChangePubKeyAuthType::Ecdsa => "ECDSA",
                    ChangePubKeyAuthType::Create2 => "CREATE2",
                };
                serde_json::json!({ "ChangePubKey": auth })
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionFeeRequest {
    pub transaction_type: TransactionType,
    pub address: Address,
    /// Token symbol or contract address.
    pub token_identifier: String,
}

impl TransactionFeeRequest {
    pub fn new(
        transaction_type: TransactionType,
        address: Address,
        token_identifier: impl Into<String>,
    ) -> Self {
        Self {
            transaction_type,
            address,
            token_identifier: token_identifier.into(),
        }
    }
}

/// Fee estimate for several transactions paid together.
///
/// `transaction_types[i]` targets `addresses[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionFeeBatchRequest {
    pub transaction_types: Vec<TransactionType>,
    pub addresses: Vec<Address>,
    pub token_identifier: String,
}

impl TransactionFeeBatchRequest {
    pub fn new(
        transaction_types: Vec<TransactionType>,
        addresses: Vec<Address>,
        token_identifier: impl Into<String>,
    ) -> Result<Self> {
        let request = Self {
            transaction_types,
            addresses,
            token_identifier: token_identifier.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Fails when the two lists are not position-aligned.
    pub fn validate(&self) -> Result<()> {
        if self.transaction_types.len() != self.addresses.len() {
            return Err(PrimitivesError::InvalidInputError(format!(
                "batch fee request has {} transaction types but {} addresses",
                self.transaction_types.len(),
                self.addresses.len()
            )));
        }
        Ok(())
    }

    pub fn transaction_types_raw(&self) -> Vec<Value> {
        self.transaction_types.iter().map(TransactionType::raw).collect()
    }

    pub fn push(&mut self, transaction_type: TransactionType, address: Address) {
        self.transaction_types.push(transaction_type);
        self.addresses.push(address);
    }
}

/// Fee breakdown in minor units of the fee token.
///
/// The batch endpoint only reports `total_fee`; the remaining fields then stay zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFeeDetails {
    #[serde(default, with = "biguint_str")]
    pub gas_tx_amount: BigUint,
    #[serde(default, with = "biguint_str")]
    pub gas_price_wei: BigUint,
    #[serde(default, with = "biguint_str")]
    pub gas_fee: BigUint,
    #[serde(default, with = "biguint_str")]
    pub zkp_fee: BigUint,
    #[serde(with = "biguint_str")]
    pub total_fee: BigUint,
}
