use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use super::encoding::TxEncoder;
use super::{SignableTransaction, TimeRange};
use crate::utils::decode_pub_key_hash;
use crate::{Result, Signature};

/// How the on-chain account authorizes a new layer-2 signing key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangePubKeyAuthType {
    Onchain,
    #[serde(rename = "ECDSA")]
    Ecdsa,
    #[serde(rename = "CREATE2")]
    Create2,
}

/// Authorization by an ECDSA signature of the account owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePubKeyEcdsa {
    pub eth_signature: String,
    pub batch_hash: B256,
}

/// Authorization by the account's CREATE2 derivation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePubKeyCreate2 {
    pub creator_address: String,
    pub salt_arg: String,
    pub code_hash: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChangePubKeyVariant {
    Onchain,
    #[serde(rename = "ECDSA")]
    Ecdsa(ChangePubKeyEcdsa),
    #[serde(rename = "CREATE2")]
    Create2(ChangePubKeyCreate2),
}

impl ChangePubKeyVariant {
    pub fn auth_type(&self) -> ChangePubKeyAuthType {
        match self {
            Self::Onchain => ChangePubKeyAuthType::Onchain,
            Self::Ecdsa(_) => ChangePubKeyAuthType::Ecdsa,
            Self::Create2(_) => ChangePubKeyAuthType::Create2,
        }
    }
}

/// Set or rotate the layer-2 public key hash controlling an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePubKey {
    pub account_id: u32,
    pub account: Address,
    pub new_pk_hash: String,
    pub fee_token: u32,
    pub fee: String,
    pub nonce: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_auth_data: Option<ChangePubKeyVariant>,
    #[serde(flatten)]
    pub time_range: TimeRange,
}

impl ChangePubKey {
    /// Bytes an ECDSA owner signs to authorize `new_pk_hash`:
    /// `pub_key_hash ++ nonce ++ account_id ++ batch_hash`.
    pub fn eth_auth_message(&self, batch_hash: B256) -> Result<Vec<u8>> {
        let mut message = Vec::with_capacity(20 + 4 + 4 + 32);
        message.extend_from_slice(&decode_pub_key_hash(&self.new_pk_hash)?);
        message.extend_from_slice(&self.nonce.to_be_bytes());
        message.extend_from_slice(&self.account_id.to_be_bytes());
        message.extend_from_slice(batch_hash.as_slice());
        Ok(message)
    }
}

impl ChangePubKey {
    pub const TX_TYPE: u8 = 7;
}

impl SignableTransaction for ChangePubKey {
    fn signing_bytes(&self) -> Result<Vec<u8>> {
        Ok(TxEncoder::versioned(Self::TX_TYPE)
            .u32(self.account_id)
            .address(&self.account)
            .pub_key_hash(&self.new_pk_hash)?
            .u32(self.fee_token)
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
