use std::collections::HashMap;

use alloy::primitives::Address;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::serde_utils::{biguint_str, biguint_str_map};
use crate::utils::EMPTY_PUB_KEY_HASH;

/// Response of `account_info`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    pub address: Address,
    /// Unset until the account receives its first deposit or transfer.
    pub id: Option<u32>,
    #[serde(default)]
    pub depositing: DepositingState,
    pub committed: State,
    pub verified: State,
}

impl AccountState {
    pub fn committed_balance(&self, symbol: &str) -> BigUint {
        self.committed
            .balances
            .get(symbol)
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(default, with = "biguint_str_map")]
    pub balances: HashMap<String, BigUint>,
    pub nonce: u32,
    pub pub_key_hash: String,
}

impl State {
    /// False while the account still reports the all-zero public key hash.
    pub fn has_signing_key(&self) -> bool {
        !self.pub_key_hash.eq_ignore_ascii_case(&EMPTY_PUB_KEY_HASH)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositingState {
    #[serde(default)]
    pub balances: HashMap<String, DepositingBalance>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositingBalance {
    #[serde(with = "biguint_str")]
    pub amount: BigUint,
    pub expected_accept_block: u64,
}
