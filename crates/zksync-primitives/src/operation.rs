//! Records returned by the status and bookkeeping endpoints.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::EthSignature;

/// Response of `contract_address`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAddress {
    pub main_contract: Address,
    pub gov_contract: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub block_number: u64,
    pub committed: bool,
    pub verified: bool,
}

/// Response of `tx_info`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub executed: bool,
    pub success: Option<bool>,
    pub fail_reason: Option<String>,
    pub block: Option<BlockInfo>,
}

/// Response of `ethop_info` for a priority operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthOpInfo {
    pub executed: bool,
    pub block: Option<BlockInfo>,
}

/// Enable or disable two-factor authentication for an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toggle2FA {
    pub enable: bool,
    pub account_id: u32,
    /// Milliseconds since the unix epoch.
    pub time_stamp_milliseconds: u64,
    pub signature: EthSignature,
    /// Only used when disabling: the layer-2 key allowed to act alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_key_hash: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle2FAResponse {
    pub success: bool,
}
